use crate::core::export::{DEFAULT_EXPORT_PREFIX, DEFAULT_SHEET_NAME};
use crate::core::partition::{GroupMode, GroupSizing};
use crate::domain::model::SheetFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate, INPUT_EXTENSIONS};
use clap::{ArgGroup, Parser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "random-grouping")]
#[command(about = "Randomly split a spreadsheet of names into balanced groups")]
#[command(group(ArgGroup::new("sizing").required(true).args(["groups", "group_size"])))]
pub struct CliConfig {
    #[arg(short, long, help = "Spreadsheet to load (.xlsx, .xls, .xlsb, .ods or .csv)")]
    pub input: String,

    #[arg(short, long, help = "Number of groups to create")]
    pub groups: Option<String>,

    #[arg(short = 's', long, help = "Number of members per group")]
    pub group_size: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_EXPORT_PREFIX)]
    pub prefix: String,

    #[arg(long, value_enum, default_value_t = SheetFormat::Xlsx)]
    pub format: SheetFormat,

    #[arg(long, default_value = DEFAULT_SHEET_NAME)]
    pub sheet_name: String,

    #[arg(long, help = "Seed for a reproducible grouping")]
    pub seed: Option<u64>,

    #[arg(long, help = "Print the run report as JSON")]
    pub json: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn export_prefix(&self) -> &str {
        &self.prefix
    }

    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    fn output_format(&self) -> SheetFormat {
        self.format
    }

    fn sizing(&self) -> Result<GroupSizing> {
        match (self.groups.as_deref(), self.group_size.as_deref()) {
            (Some(groups), _) => GroupSizing::parse(GroupMode::ByGroups, Some(groups)),
            (None, Some(size)) => GroupSizing::parse(GroupMode::BySize, Some(size)),
            (None, None) => GroupSizing::parse(GroupMode::ByGroups, None),
        }
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extension("input", &self.input, INPUT_EXTENSIONS)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("prefix", &self.prefix)?;
        if self.format == SheetFormat::Xlsx {
            validation::validate_sheet_name("sheet_name", &self.sheet_name)?;
        }
        self.sizing()?;
        Ok(())
    }
}

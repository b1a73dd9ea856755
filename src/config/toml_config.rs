use crate::adapters::AnyCodec;
use crate::core::export::{DEFAULT_EXPORT_PREFIX, DEFAULT_SHEET_NAME};
use crate::core::partition::{GroupMode, GroupSizing};
use crate::domain::model::SheetFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GroupingError, Result};
use crate::utils::validation::{self, Validate, INPUT_EXTENSIONS, OUTPUT_FORMATS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub grouping: GroupingConfig,
    pub export: ExportConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    /// 未指定時依副檔名判斷
    pub format: Option<SheetFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    pub mode: GroupMode,
    pub value: Option<i64>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
    pub prefix: Option<String>,
    pub format: Option<SheetFormat>,
    pub sheet_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GroupingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GROUP_COUNT})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GroupingError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("input.path", &self.input.path)?;
        if self.input.format.is_none() {
            validation::validate_file_extension("input.path", &self.input.path, INPUT_EXTENSIONS)?;
        }

        validation::validate_path("export.output_path", &self.export.output_path)?;

        if let Some(prefix) = &self.export.prefix {
            validation::validate_non_empty_string("export.prefix", prefix)?;
        }

        let format = self.output_format();
        validation::validate_one_of("export.format", format.extension(), OUTPUT_FORMATS)?;
        if format == SheetFormat::Xlsx {
            validation::validate_sheet_name("export.sheet_name", self.sheet_name())?;
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            validation::validate_non_empty_string("logging.level", level)?;
        }

        self.sizing()?;
        Ok(())
    }

    /// 讀取用的編解碼器
    pub fn input_codec(&self) -> Result<AnyCodec> {
        match self.input.format {
            Some(format) => Ok(AnyCodec::new(format)),
            None => AnyCodec::for_path(&self.input.path),
        }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn export_prefix(&self) -> &str {
        self.export.prefix.as_deref().unwrap_or(DEFAULT_EXPORT_PREFIX)
    }

    fn sheet_name(&self) -> &str {
        self.export.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME)
    }

    fn output_format(&self) -> SheetFormat {
        self.export.format.unwrap_or_default()
    }

    fn sizing(&self) -> Result<GroupSizing> {
        match self.grouping.value {
            Some(value) => GroupSizing::new(self.grouping.mode, value),
            None => GroupSizing::parse(self.grouping.mode, None),
        }
    }

    fn seed(&self) -> Option<u64> {
        self.grouping.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use random_grouping::core::report::{render_groups, render_member_preview};
use random_grouping::domain::ports::ConfigProvider;
use random_grouping::utils::error::ErrorSeverity;
use random_grouping::utils::{logger, validation::Validate};
use random_grouping::{AnyCodec, GroupingEngine, GroupingError, LocalStorage, Session, TomlConfig};

#[derive(Parser)]
#[command(name = "toml_grouper")]
#[command(about = "Random grouping driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "grouping.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Dry run - load and summarize members without grouping or exporting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌；命令列 --verbose 優先
    let level = if args.verbose {
        "debug"
    } else {
        config.log_level().unwrap_or("info")
    };
    logger::init_with_level(level, config.log_json());

    tracing::info!("🚀 Starting TOML-based grouping tool");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(seed) = args.seed {
        config.grouping.seed = Some(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    let decoder = match config.input_codec() {
        Ok(codec) => codec,
        Err(e) => exit_with(&e),
    };
    let encoder = AnyCodec::new(config.output_format());
    let engine = GroupingEngine::new(LocalStorage::current_dir(), decoder, encoder);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No grouping or export will occur");
        let mut session = Session::new();
        match engine.upload(&mut session, config.input_path()).await {
            Ok(summary) => {
                println!("{}", render_member_preview(session.members(), &summary));
                let sizing = config.sizing()?;
                println!(
                    "Would create {} groups and write to {}",
                    sizing.group_count(summary.total),
                    config.output_path()
                );
            }
            Err(e) => exit_with(&e),
        }
        return Ok(());
    }

    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    match engine.run(&config, &mut rng).await {
        Ok(report) => {
            println!("{}", render_member_preview(&report.members, &report.member_summary));
            println!("{}", render_groups(&report.partition, &report.group_summary));
            println!("✅ Grouping completed successfully!");
            println!("📁 Output saved to: {}", report.output_path);
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Input: {}", config.input_path());
    println!("  Mode: {:?}", config.grouping.mode);
    if let Some(value) = config.grouping.value {
        println!("  Value: {}", value);
    }
    if let Some(seed) = config.seed() {
        println!("  Seed: {}", seed);
    }
    println!("  Output: {}", config.output_path());
    println!("  Format: {}", config.output_format());
    println!("  Prefix: {}", config.export_prefix());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn exit_with(e: &GroupingError) -> ! {
    tracing::error!(
        "❌ Grouping failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}

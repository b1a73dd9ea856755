use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use random_grouping::core::report::{render_groups, render_member_preview};
use random_grouping::domain::ports::ConfigProvider;
use random_grouping::utils::error::ErrorSeverity;
use random_grouping::utils::{logger, validation::Validate};
use random_grouping::{AnyCodec, CliConfig, GroupingEngine, GroupingError, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting random-grouping CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let decoder = match AnyCodec::for_path(config.input_path()) {
        Ok(codec) => codec,
        Err(e) => exit_with(&e),
    };
    let encoder = AnyCodec::new(config.output_format());
    let engine = GroupingEngine::new(LocalStorage::current_dir(), decoder, encoder);

    let mut rng = match config.seed() {
        Some(seed) => {
            tracing::info!("🎯 Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_rng(&mut rand::rng()),
    };

    match engine.run(&config, &mut rng).await {
        Ok(report) => {
            if config.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_member_preview(&report.members, &report.member_summary));
                println!("{}", render_groups(&report.partition, &report.group_summary));
                println!("📁 Output saved to: {}", report.output_path);
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn exit_with(e: &GroupingError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Grouping failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}

use clap::Parser;
use jyotish_lookup::config::OutputFormat;
use jyotish_lookup::core::prompt::{daily_report_prompt, quick_analysis_prompt};
use jyotish_lookup::domain::ports::ConfigProvider;
use jyotish_lookup::utils::logger;
use jyotish_lookup::{CliConfig, DayRecommender, ReferenceIndex};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 設定錯誤在初始化日誌前就可能發生，此時只能輸出到 stderr
    let settings = match cli.resolve_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let log_format = cli
        .log_format
        .map(|format| format.as_str())
        .or(settings.log_format())
        .unwrap_or("compact");
    logger::init_logger(log_format, settings.log_level(), cli.verbose);

    tracing::info!("Starting jyotish-lookup");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let index = match ReferenceIndex::from_config(&settings) {
        Ok(index) => Arc::new(index),
        Err(e) => {
            tracing::error!("❌ Failed to build reference index: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    let sweeper = settings
        .sweep_interval()
        .map(|interval| index.spawn_sweeper(interval));

    let day = cli.day_input();
    let recommendations = DayRecommender::new(&index).recommend(&day).await;

    match cli.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
        }
        OutputFormat::DailyPrompt => println!("{}", daily_report_prompt(&day, &recommendations)),
        OutputFormat::QuickPrompt => println!("{}", quick_analysis_prompt(&day, &recommendations)),
    }

    if let Some(sweeper) = sweeper {
        sweeper.shutdown().await;
    }
    tracing::info!("✅ Done (cached files: {})", index.stats().size);
    Ok(())
}

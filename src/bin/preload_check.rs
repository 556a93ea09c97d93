use clap::Parser;
use jyotish_lookup::config::TomlConfig;
use jyotish_lookup::utils::{logger, validation::Validate};
use jyotish_lookup::ReferenceIndex;

#[derive(Parser)]
#[command(name = "preload-check")]
#[command(about = "Load every reference file and report cache statistics")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override the data source location
    #[arg(long)]
    source: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };
    if let Some(source) = args.source {
        config.source.location = source;
    }

    logger::init_logger(
        config.log_format().unwrap_or("compact"),
        config.log_level(),
        args.verbose,
    );

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let index = ReferenceIndex::from_config(&config)?;
    let report = index.preload_all().await;

    for (category, count) in &report.loaded {
        println!("✅ {:<13} {:>3} entries ({})", category, count, index.file_name(*category));
    }
    for (category, reason) in &report.failed {
        println!("❌ {:<13} {}", category, reason);
    }

    let stats = index.stats();
    println!("📦 Cached files: {}", stats.size);
    println!("{}", serde_json::to_string_pretty(&stats)?);

    if !report.is_complete() {
        std::process::exit(2);
    }
    Ok(())
}

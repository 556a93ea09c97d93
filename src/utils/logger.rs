use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG 優先，其次是設定檔的 level，最後才是預設值
fn build_filter(level: Option<&str>, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if let Some(filter) = level.and_then(|level| EnvFilter::try_new(level).ok()) {
        return filter;
    }
    let fallback = if verbose {
        "jyotish_lookup=debug,info"
    } else {
        "jyotish_lookup=info"
    };
    EnvFilter::new(fallback)
}

pub fn init_cli_logger(level: Option<&str>, verbose: bool) {
    tracing_subscriber::registry()
        .with(build_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// JSON 格式，方便收集到集中式日誌系統
pub fn init_json_logger(level: Option<&str>, verbose: bool) {
    tracing_subscriber::registry()
        .with(build_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}

/// 依設定的格式名稱初始化 ("json" 以外一律使用 compact)
pub fn init_logger(format: &str, level: Option<&str>, verbose: bool) {
    match format {
        "json" => init_json_logger(level, verbose),
        _ => init_cli_logger(level, verbose),
    }
}

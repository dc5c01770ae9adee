use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive used when `RUST_LOG` is unset. A configured level wins
/// over the verbose flag.
pub fn default_directive(verbose: bool, level: Option<&str>) -> String {
    match level.map(str::trim).filter(|level| !level.is_empty()) {
        Some(level) => format!("rnm_explorer={},info", level),
        None if verbose => "rnm_explorer=debug,info".to_string(),
        None => "rnm_explorer=info".to_string(),
    }
}

fn env_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose, level)))
        .unwrap_or_else(|_| EnvFilter::new("rnm_explorer=info"))
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(env_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Machine-readable logs, one JSON object per event on stderr.
pub fn init_json_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(env_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json(),
        )
        .init();
}

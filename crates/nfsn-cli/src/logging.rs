//! Tracing setup shared by the binaries

use crate::args::CommonArgs;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Environment variable holding the default log level
pub const LOG_LEVEL_ENV: &str = "NFSN_LOG_LEVEL";

/// Parse a level name; unknown names yield `None`
pub fn parse_level(name: &str) -> Option<Level> {
    match name.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Pick the max level: `-q` and `-v` win over `$NFSN_LOG_LEVEL`, which wins over INFO
pub fn select_level(common: &CommonArgs, env_level: Option<&str>) -> Level {
    if common.quiet {
        Level::WARN
    } else if common.verbose {
        Level::DEBUG
    } else {
        env_level.and_then(parse_level).unwrap_or(Level::INFO)
    }
}

/// Install the global subscriber, logging to stderr
pub fn init(common: &CommonArgs) -> anyhow::Result<()> {
    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    let level = select_level(common, env_level.as_deref());

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Запросы к mock видны через `TraceLayer` на уровне `tower_http=debug`.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{default_level},tower_http=debug")))
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init mock logging: {e}"))?;

    Ok(())
}

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

mod logging;

use logging::init_logging;

const DEFAULT_ADDR: &str = "127.0.0.1:8090";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let addr = std::env::var("MOCK_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_logging(&log_level)?;

    let posts = posts_mock::sample_posts();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        posts = posts.len(),
        "mock content api listening on http://{addr}{}",
        posts_mock::POSTS_PATH
    );
    posts_mock::run(listener, posts).await?;
    Ok(())
}

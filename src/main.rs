use todo_task::{api, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Starting todo-task {} on {}:{} ({:?})",
        env!("CARGO_PKG_VERSION"),
        config.host,
        config.port,
        config.storage
    );

    api::serve(config).await
}

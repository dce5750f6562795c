use std::future::Future;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use tool_scout::config::{AppConfig, ServerConfig};

fn init_logging(server: &ServerConfig) {
    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load()?;
    init_logging(&config.server);

    let app = tool_scout::build_app(&config)?;
    let addr = config.server.socket_addr()?;

    let available = config.ai.configured_count();
    if available == 0 {
        tracing::warn!("no provider API keys configured; generation requests will fail");
    }
    tracing::info!(
        %addr,
        providers = available,
        environment = ?config.server.environment,
        persistent = config.storage.data_dir.is_some(),
        "tool-scout listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("tool-scout stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(signal::ctrl_c()).await;
}

/// Resolves when `signal` fires; never resolves if the signal handler failed.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        // Without a handler, keep serving until the process is killed.
        tracing::error!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Ctrl+C received, shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn failed_handler_install_does_not_trigger_shutdown() {
        let failing = async { Err::<(), _>(io::Error::new(io::ErrorKind::Other, "no signals")) };

        let result = timeout(Duration::from_millis(50), wait_for_shutdown(failing)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn received_signal_triggers_shutdown() {
        let received = async { Ok::<(), io::Error>(()) };

        let result = timeout(Duration::from_millis(50), wait_for_shutdown(received)).await;
        assert!(result.is_ok());
    }
}

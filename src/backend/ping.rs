use crate::app_config::Backend;
use crate::backend::BackendError;
use crate::domain::Pong;
use reqwest::Client;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, instrument, warn};

/// Checks that the backend is reachable, retrying with exponential backoff up to the configured number of attempts.
#[instrument(skip_all, fields(url = config.url()))]
pub async fn ping(client: &Client, config: &Backend) -> Result<Pong, BackendError> {
    let strategy = ExponentialBackoff::from_millis(config.retry_ms())
        .factor(2)
        .max_delay(config.retry_max_delay_ms())
        .map(jitter)
        .take(config.max_attempts().saturating_sub(1));

    info!("🏓 Pinging backend...");
    let pong = Retry::spawn(strategy, || async {
        ping_once(client, config.url()).await.inspect_err(|e| warn!("⚠️ Ping failed: {}", e))
    })
    .await?;

    info!(result = %pong.result, "🏓 Pinging backend... OK");
    Ok(pong)
}

async fn ping_once(client: &Client, url: &str) -> Result<Pong, BackendError> {
    let pong = client
        .get(format!("{}/client/v4/ping", url.trim_end_matches('/')))
        .send()
        .await?
        .error_for_status()?
        .json::<Pong>()
        .await?;

    Ok(pong)
}

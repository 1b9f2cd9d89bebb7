use std::sync::Arc;

use anyhow::Context;

use eventhub_auth::{FileTokenRepository, TokenStore};
use eventhub_client::{ApiClient, ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    eventhub_observability::init_pretty();

    let config = ClientConfig::from_env().context("invalid backend url")?;
    let tokens = match FileTokenRepository::at_default_location() {
        Ok(repo) => TokenStore::new(Arc::new(repo)),
        Err(err) => {
            tracing::warn!("token file unavailable ({err}); using an empty in-memory slot");
            TokenStore::in_memory()
        }
    };
    let client = ApiClient::new(config, tokens).context("failed to build http client")?;

    tracing::info!(url = %client.config().health_url(), "checking backend health");
    let body = client.health().await.context("health check failed")?;
    tracing::info!(%body, "backend is up");

    match client.tokens().claims() {
        Some(claims) => tracing::info!(
            subject = %claims.subject_id,
            role = %claims.role,
            expired = claims.is_expired(chrono::Utc::now()),
            "stored session (unverified)"
        ),
        None => tracing::info!("no stored session"),
    }

    Ok(())
}

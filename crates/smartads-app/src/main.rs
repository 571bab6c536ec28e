//! SmartAds — application entry point.
//!
//! Wires the HTTP remote authority and the file snapshot store into
//! the session service, restores persisted state, and reports status.

use smartads_core::error::SmartadsError;
use smartads_remote::{HttpRemoteAuthority, RemoteConfig};
use smartads_session::{SessionConfig, SessionService};
use smartads_store::FileStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), SmartadsError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("smartads=info".parse().unwrap()),
        )
        .json()
        .init();

    let remote_config = RemoteConfig::from_env();
    let state_file =
        std::env::var("SMARTADS_STATE_FILE").unwrap_or_else(|_| "smartads_data.json".into());
    tracing::info!(
        backend = %remote_config.base_url,
        state_file = %state_file,
        "Starting SmartAds session service..."
    );

    let remote = HttpRemoteAuthority::new(&remote_config)
        .map_err(|e| SmartadsError::Transport(e.to_string()))?;
    let store = FileStore::new(state_file);

    let service = SessionService::new(remote, store, SessionConfig::default())?;
    service.initialize().await;

    let accounts = service.accounts().await;
    tracing::info!(
        accounts = accounts.len(),
        logged_in = service.current_account().await.is_some(),
        "Session state ready"
    );

    Ok(())
}

//! Passforge service entry point.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use passforge::adapters::http::{self, PassAppState};
use passforge::adapters::signing::CmsPassSigner;
use passforge::adapters::storage::InMemoryRegistrationStore;
use passforge::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let signer = Arc::new(CmsPassSigner::from_config(&config.wallet)?);
    let registration_store = Arc::new(InMemoryRegistrationStore::new());
    let state = PassAppState::from_config(&config.wallet, signer, registration_store);

    let app = http::router(state, &config.server);
    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, pass_type = %config.wallet.pass_type_identifier, "passforge listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

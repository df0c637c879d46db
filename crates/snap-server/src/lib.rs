//! Expense Snap Server
//!
//! HTTP front end: receipt extraction plus expense CRUD over a configured
//! store.
//!
//! # Routes
//!
//! - `POST /api/process-image`: multipart `image` field, returns a draft
//! - `GET|POST /api/expenses`, `PUT|DELETE /api/expenses/:id`
//! - `GET /api/summary`: totals per category and currency
//! - `GET /health`

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use snap_domain::traits::{ExpenseStore, ModelProvider};
use snap_extractor::ReceiptExtractor;
use snap_llm::SharedProvider;
use snap_store::StoreError;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Store could not be opened
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the provider, extractor and store described by the configuration
///
/// A missing model key does not fail startup; extraction requests report it.
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let provider: SharedProvider = Arc::new(config.model.build());
    if let Err(e) = provider.ensure_ready() {
        warn!("Receipt extraction unavailable: {}", e);
    }

    let extractor = ReceiptExtractor::new(provider, config.extractor.clone());
    let store = config.store.open()?;

    Ok(AppState {
        extractor: Arc::new(extractor),
        store,
    })
}

/// Start the HTTP server
///
/// Opens the store, wires the extractor and serves until the process exits.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Expense Snap server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {}", config.model.model);

    let state = build_state(&config)?;
    info!("Store backend: {}", state.store.backend_name());

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_state_from_test_config() {
        let config = ServerConfig::default_test_config();
        let state = build_state(&config).unwrap();
        assert_eq!(state.extractor.model_name(), "gemini-2.5-flash");
        assert_eq!(state.store.backend_name(), "sqlite");
    }

    #[test]
    fn test_build_state_missing_store_key() {
        let mut config = ServerConfig::default_test_config();
        config.store = snap_store::StoreConfig::Postgrest {
            url: "http://localhost".to_string(),
            api_key: None,
            api_key_env: "SNAP_SERVER_TEST_UNSET_VARIABLE".to_string(),
            table: "expenses".to_string(),
        };
        assert!(matches!(build_state(&config), Err(ServerError::Store(_))));
    }
}

#![allow(dead_code)] // not every test binary uses every helper

use paygate_core::{Config, HttpRemoteClient, TransactionFactory};
use std::sync::Arc;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

pub fn test_config(server_url: String) -> Config {
    Config {
        base_url: server_url,
        environment_key: "test-env-key".to_string(),
        access_secret: "test-secret".to_string(),
        timeout_secs: 5,
    }
}

pub fn client_for(server_url: String) -> HttpRemoteClient {
    HttpRemoteClient::new(&test_config(server_url))
}

pub fn factory_for(server_url: String) -> TransactionFactory {
    TransactionFactory::new(Arc::new(client_for(server_url)))
}

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::error::Error;

/// Boundary to the remote payment service.
///
/// Implementations perform one authenticated HTTP round trip per call and
/// hand back the subtree under `expected_key` as a generic attribute tree.
/// A missing `expected_key` is an API contract mismatch and surfaces as
/// [`Error::RemoteProtocol`]; transport failures and non-success statuses
/// surface as [`Error::RemoteCall`]. No retries happen at this layer.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn get(&self, path: &str, expected_key: &str) -> Result<Value, Error>;

    async fn post(&self, path: &str, body: Value, expected_key: &str) -> Result<Value, Error>;
}

/// HTTP client for the remote payment service.
#[derive(Clone)]
pub struct HttpRemoteClient {
    client: Client,
    base_url: String,
    environment_key: String,
    access_secret: String,
}

impl HttpRemoteClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        HttpRemoteClient {
            client,
            base_url: config.base_url.clone(),
            environment_key: config.environment_key.clone(),
            access_secret: config.access_secret.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn extract(mut tree: Value, expected_key: &str) -> Result<Value, Error> {
        match tree.get_mut(expected_key) {
            Some(subtree) => Ok(subtree.take()),
            None => Err(Error::missing_key(expected_key)),
        }
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn get(&self, path: &str, expected_key: &str) -> Result<Value, Error> {
        tracing::debug!(%path, "GET against remote payment service");
        let response = self
            .client
            .get(self.url(path))
            .basic_auth(&self.environment_key, Some(&self.access_secret))
            .send()
            .await?
            .error_for_status()?;

        let tree = response.json::<Value>().await?;
        Self::extract(tree, expected_key)
    }

    async fn post(&self, path: &str, body: Value, expected_key: &str) -> Result<Value, Error> {
        tracing::debug!(%path, "POST against remote payment service");
        let response = self
            .client
            .post(self.url(path))
            .basic_auth(&self.environment_key, Some(&self.access_secret))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let tree = response.json::<Value>().await?;
        Self::extract(tree, expected_key)
    }
}

use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use url::Url;

/// Credentials and endpoint for the remote payment service.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub base_url: String,
    pub environment_key: String,
    pub access_secret: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        let base_url = env::var("PAYGATE_BASE_URL")?;
        Url::parse(&base_url)?;

        Ok(Config {
            base_url,
            environment_key: env::var("PAYGATE_ENVIRONMENT_KEY")?,
            access_secret: env::var("PAYGATE_ACCESS_SECRET")?,
            timeout_secs: env::var("PAYGATE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
        })
    }
}

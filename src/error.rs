use thiserror::Error;

/// Errors surfaced by the transaction core.
///
/// Nothing here is retried or swallowed internally; every failure is
/// propagated to the immediate caller so callers can distinguish bad input,
/// transport failures, and unexpected server shapes.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("remote call failed: {0}")]
    RemoteCall(#[from] reqwest::Error),

    #[error("unexpected response shape: missing key `{key}`")]
    RemoteProtocol { key: String },

    #[error("failed to decode transaction attributes: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unsupported digest algorithm `{0}`")]
    UnsupportedDigest(String),

    #[error("signed field `{0}` is not present on this transaction")]
    SignatureFieldMissing(String),
}

impl Error {
    pub fn missing_key(key: impl Into<String>) -> Self {
        Error::RemoteProtocol { key: key.into() }
    }
}

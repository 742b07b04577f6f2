use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::Error;

/// Server-supplied signing envelope on an offsite purchase.
///
/// `fields` is an ordered, space-separated list of attribute names whose
/// values (joined with `|`) make up the signed message; `signature` is the
/// hex HMAC digest the server computed over it with the shared secret.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SignedFields {
    pub fields: String,
    pub algorithm: String,
    pub signature: String,
}

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

fn bad_key(_: hmac::digest::InvalidLength) -> Error {
    Error::InvalidInput("HMAC key rejected by digest".to_string())
}

/// Computes the hex HMAC of `message` under `key` using the named algorithm.
///
/// Algorithm names match what the remote service emits in the `signed`
/// envelope; anything else is an [`Error::UnsupportedDigest`].
pub fn hmac_hex(algorithm: &str, key: &str, message: &str) -> Result<String, Error> {
    let digest = match algorithm {
        "sha1" => {
            let mut mac = HmacSha1::new_from_slice(key.as_bytes()).map_err(bad_key)?;
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        "sha256" => {
            let mut mac = HmacSha256::new_from_slice(key.as_bytes()).map_err(bad_key)?;
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        "sha512" => {
            let mut mac = HmacSha512::new_from_slice(key.as_bytes()).map_err(bad_key)?;
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        other => return Err(Error::UnsupportedDigest(other.to_string())),
    };
    Ok(digest)
}

//! Keyed password hashing for stored-hash equality checks.
//!
//! Every account shares one HMAC key; there is no per-user salt. The output is
//! standard padded base64 of the raw digest, byte-compatible with the hashes
//! already stored in the account table.

use super::error::ConfigError;
use base64ct::{Base64, Encoding};
use hmac::{Hmac, Mac};
use md5::Md5;
use secrecy::{ExposeSecret, SecretString};

type HmacMd5 = Hmac<Md5>;

/// Hashes plaintext passwords with a pre-keyed MAC.
#[derive(Clone)]
pub struct CredentialHasher {
    mac: HmacMd5,
}

impl CredentialHasher {
    /// # Errors
    /// Returns an error if the key is empty.
    pub fn new(key: &SecretString) -> Result<Self, ConfigError> {
        let key = key.expose_secret();
        if key.is_empty() {
            return Err(ConfigError::EmptyPasswordKey);
        }
        let mac = HmacMd5::new_from_slice(key.as_bytes())
            .map_err(|_| ConfigError::InvalidKey("password hashing"))?;
        Ok(Self { mac })
    }

    /// Deterministic: the same plaintext always yields the same hash.
    #[must_use]
    pub fn hash(&self, plaintext: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(plaintext.as_bytes());
        Base64::encode_string(&mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("mac", &"HMAC-MD5")
            .finish_non_exhaustive()
    }
}

/// One-shot form of [`CredentialHasher::hash`].
///
/// # Errors
/// Returns an error if the key is empty.
pub fn hash(plaintext: &str, key: &str) -> Result<String, ConfigError> {
    let hasher = CredentialHasher::new(&SecretString::from(key.to_string()))?;
    Ok(hasher.hash(plaintext))
}

//! Decryption key handling for protected containers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Required key length in hex characters.
pub const ACTIVATION_BYTES_LEN: usize = 8;

/// Errors raised when parsing a decryption key.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Key is not an 8-character hex string.
    #[error("activation bytes must be exactly {ACTIVATION_BYTES_LEN} hex characters")]
    InvalidFormat,
}

/// The 8-hex-character key unlocking a protected audiobook container.
///
/// Validated once at the adapter boundary via [`FromStr`]; the pipeline
/// trusts it afterwards and forwards it verbatim to every external
/// invocation. Case is preserved as given.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivationBytes(String);

impl ActivationBytes {
    /// The raw hex string, as supplied by the caller.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ActivationBytes {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == ACTIVATION_BYTES_LEN && s.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(KeyError::InvalidFormat)
        }
    }
}

impl TryFrom<String> for ActivationBytes {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ActivationBytes> for String {
    fn from(value: ActivationBytes) -> Self {
        value.0
    }
}

// The key is account-derived secret material; keep it out of logs.
impl fmt::Debug for ActivationBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActivationBytes(********)")
    }
}

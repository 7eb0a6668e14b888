//! secrets::traits
//!
//! Secret storage trait and the error type shared by every secret source.
//!
//! # Security
//!
//! Implementations MUST:
//! - Never log, print, or include secret values in error messages
//! - Be thread-safe (Send + Sync)

use std::fmt;

use thiserror::Error;

/// Errors from resolving or storing secrets.
///
/// Messages name the reference or key, never the value behind it.
#[derive(Debug, Error)]
pub enum SecretError {
    /// Nothing is stored or exported under the given name.
    #[error("secret not found: {0}")]
    NotFound(String),

    /// The secret source exists but could not be read.
    #[error("failed to read secret: {0}")]
    ReadError(String),

    #[error("failed to write secret: {0}")]
    WriteError(String),

    #[error("failed to delete secret: {0}")]
    DeleteError(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Store backend not compiled in or not recognized.
    #[error("secret provider not available: {0}")]
    ProviderNotAvailable(String),

    /// A secret reference string that does not follow `scheme:value`.
    #[error("invalid secret reference '{0}' (expected env:NAME, file:PATH or store:KEY)")]
    InvalidReference(String),
}

/// A resolved secret value.
///
/// `Debug` and `Display` are redacted; call [`Plaintext::expose`] at the one
/// place the raw value is needed.
#[derive(Clone, PartialEq, Eq)]
pub struct Plaintext(String);

impl Plaintext {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret. Do not log it.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Plaintext(<redacted>)")
    }
}

impl fmt::Display for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Key-value storage for long-lived credentials such as git tokens.
///
/// Keys are plain names chosen by the user (e.g. "github.token") and are
/// stored as-is.
pub trait SecretStore: Send + Sync {
    /// Returns `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, SecretError>;

    /// Overwrites any existing value for the key.
    fn set(&self, key: &str, value: &str) -> Result<(), SecretError>;

    /// Idempotent: deleting a missing key succeeds.
    fn delete(&self, key: &str) -> Result<(), SecretError>;

    fn exists(&self, key: &str) -> Result<bool, SecretError> {
        Ok(self.get(key)?.is_some())
    }
}

//! secrets
//!
//! Secret references, resolution, and storage for git credentials.
//!
//! # Architecture
//!
//! Operations receive a [`SecretRef`] rather than a token. The
//! [`SecretResolver`] turns it into a [`Plaintext`] only when the clone step
//! needs it. Long-lived tokens can be kept in a [`SecretStore`]:
//!
//! - [`FileSecretStore`]: `~/.cogpipe/secrets.toml` (default)
//! - `KeychainSecretStore`: OS keychain (requires the `keychain` feature)
//!
//! Secrets are never logged or included in error messages.

mod file_store;
#[cfg(feature = "keychain")]
mod keychain_store;
mod reference;
mod traits;

pub use file_store::FileSecretStore;
#[cfg(feature = "keychain")]
pub use keychain_store::KeychainSecretStore;
pub use reference::{SecretRef, SecretResolver};
pub use traits::{Plaintext, SecretError, SecretStore};

/// The default secret store provider name.
pub const DEFAULT_PROVIDER: &str = "file";

/// Create a secret store by provider name (`"file"` or `"keychain"`).
pub fn create_store(provider: &str) -> Result<Box<dyn SecretStore>, SecretError> {
    match provider {
        "file" => Ok(Box::new(FileSecretStore::new()?)),
        #[cfg(feature = "keychain")]
        "keychain" => Ok(Box::new(KeychainSecretStore::new())),
        #[cfg(not(feature = "keychain"))]
        "keychain" => Err(SecretError::ProviderNotAvailable(
            "keychain support not enabled (compile with --features keychain)".into(),
        )),
        other => Err(SecretError::ProviderNotAvailable(format!(
            "unknown secret provider: '{}' (valid: file, keychain)",
            other
        ))),
    }
}

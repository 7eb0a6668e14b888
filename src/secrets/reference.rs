//! secrets::reference
//!
//! Opaque secret references and their resolution to plaintext.
//!
//! A reference names where a credential lives, never the credential itself:
//!
//! - `env:GIT_TOKEN` reads an environment variable
//! - `file:/run/secrets/token` reads a file (one trailing newline trimmed)
//! - `store:github.token` reads from the configured [`SecretStore`]
//!
//! Bare strings are rejected so a literal token can never end up in argv or
//! shell history by accident.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;

use super::traits::{Plaintext, SecretError, SecretStore};

/// Where a secret can be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretRef {
    Env(String),
    File(PathBuf),
    Store(String),
}

impl FromStr for SecretRef {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SecretError::InvalidReference(redact_reference(s));
        let (scheme, value) = s.split_once(':').ok_or_else(invalid)?;
        if value.is_empty() {
            return Err(invalid());
        }

        match scheme {
            "env" => Ok(SecretRef::Env(value.to_string())),
            "file" => Ok(SecretRef::File(PathBuf::from(value))),
            "store" => Ok(SecretRef::Store(value.to_string())),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretRef::Env(name) => write!(f, "env:{}", name),
            SecretRef::File(path) => write!(f, "file:{}", path.display()),
            SecretRef::Store(key) => write!(f, "store:{}", key),
        }
    }
}

/// Invalid references may well be a pasted token; keep only a short prefix.
fn redact_reference(s: &str) -> String {
    let prefix: String = s.chars().take(4).collect();
    if prefix.len() < s.len() {
        format!("{}...", prefix)
    } else {
        prefix
    }
}

/// Resolves [`SecretRef`]s on demand.
pub struct SecretResolver {
    store: Box<dyn SecretStore>,
}

impl SecretResolver {
    pub fn new(store: Box<dyn SecretStore>) -> Self {
        Self { store }
    }

    /// Resolve a reference to its plaintext value.
    ///
    /// Empty values are reported as missing.
    pub fn resolve(&self, reference: &SecretRef) -> Result<Plaintext, SecretError> {
        debug!(secret = %reference, "resolving secret");

        let value = match reference {
            SecretRef::Env(name) => match std::env::var(name) {
                Ok(value) => value,
                Err(std::env::VarError::NotPresent) => {
                    return Err(SecretError::NotFound(format!(
                        "environment variable {}",
                        name
                    )))
                }
                Err(std::env::VarError::NotUnicode(_)) => {
                    return Err(SecretError::ReadError(format!(
                        "environment variable {} is not valid UTF-8",
                        name
                    )))
                }
            },
            SecretRef::File(path) => {
                let mut content = std::fs::read_to_string(path).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::PermissionDenied {
                        SecretError::PermissionDenied(path.display().to_string())
                    } else {
                        SecretError::ReadError(format!("{}: {}", path.display(), e))
                    }
                })?;
                if content.ends_with('\n') {
                    content.pop();
                    if content.ends_with('\r') {
                        content.pop();
                    }
                }
                content
            }
            SecretRef::Store(key) => self
                .store
                .get(key)?
                .ok_or_else(|| SecretError::NotFound(format!("store key {}", key)))?,
        };

        if value.is_empty() {
            return Err(SecretError::NotFound(format!("{} (empty)", reference)));
        }
        Ok(Plaintext::new(value))
    }
}

impl fmt::Debug for SecretResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::FileSecretStore;
    use tempfile::TempDir;

    fn resolver(temp: &TempDir) -> SecretResolver {
        SecretResolver::new(Box::new(FileSecretStore::with_path(
            temp.path().join("secrets.toml"),
        )))
    }

    #[test]
    fn parses_known_schemes() {
        assert_eq!(
            "env:GIT_TOKEN".parse::<SecretRef>().unwrap(),
            SecretRef::Env("GIT_TOKEN".into())
        );
        assert_eq!(
            "file:/run/secrets/token".parse::<SecretRef>().unwrap(),
            SecretRef::File(PathBuf::from("/run/secrets/token"))
        );
        assert_eq!(
            "store:github.token".parse::<SecretRef>().unwrap(),
            SecretRef::Store("github.token".into())
        );
    }

    #[test]
    fn rejects_bare_values_without_echoing_them() {
        let err = "ghp_supersecretvalue".parse::<SecretRef>().unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, SecretError::InvalidReference(_)));
        assert!(!msg.contains("supersecret"), "leaked: {}", msg);

        assert!("env:".parse::<SecretRef>().is_err());
        assert!("vault:x".parse::<SecretRef>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for raw in ["env:A", "file:/tmp/x", "store:k"] {
            let parsed: SecretRef = raw.parse().unwrap();
            assert_eq!(parsed.to_string(), raw);
        }
    }

    #[test]
    fn resolves_environment_variable() {
        let temp = TempDir::new().unwrap();
        std::env::set_var("COGPIPE_TEST_RESOLVE_ENV", "tok-env");

        let value = resolver(&temp)
            .resolve(&SecretRef::Env("COGPIPE_TEST_RESOLVE_ENV".into()))
            .unwrap();
        assert_eq!(value.expose(), "tok-env");
    }

    #[test]
    fn missing_environment_variable_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = resolver(&temp)
            .resolve(&SecretRef::Env("COGPIPE_TEST_DEFINITELY_UNSET".into()))
            .unwrap_err();
        assert!(matches!(err, SecretError::NotFound(_)));
    }

    #[test]
    fn resolves_file_and_trims_one_newline() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("token");
        std::fs::write(&path, "tok-file\n").unwrap();

        let value = resolver(&temp).resolve(&SecretRef::File(path)).unwrap();
        assert_eq!(value.expose(), "tok-file");
    }

    #[test]
    fn resolves_store_key() {
        let temp = TempDir::new().unwrap();
        let resolver = resolver(&temp);
        resolver.store.set("github.token", "tok-store").unwrap();

        let value = resolver
            .resolve(&SecretRef::Store("github.token".into()))
            .unwrap();
        assert_eq!(value.expose(), "tok-store");

        let err = resolver
            .resolve(&SecretRef::Store("missing".into()))
            .unwrap_err();
        assert!(matches!(err, SecretError::NotFound(_)));
    }

    #[test]
    fn empty_secret_is_reported_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty");
        std::fs::write(&path, "\n").unwrap();

        let err = resolver(&temp).resolve(&SecretRef::File(path)).unwrap_err();
        assert!(matches!(err, SecretError::NotFound(_)));
    }
}

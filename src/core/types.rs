//! core::types
//!
//! Shared domain types.

use crate::secrets::SecretRef;

/// The remote repository an operation runs against.
///
/// The token is a reference; it is resolved only when the clone step runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    /// HTTPS clone URL, with or without the `https://` prefix
    pub url: String,
    /// Account name used for basic auth
    pub user: String,
    /// Where the access token is found
    pub token: SecretRef,
}

impl RemoteRepository {
    pub fn new(url: impl Into<String>, user: impl Into<String>, token: SecretRef) -> Self {
        Self {
            url: url.into(),
            user: user.into(),
            token,
        }
    }
}

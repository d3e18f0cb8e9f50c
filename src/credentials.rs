//! API credentials.

use std::env;
use std::fmt;

use crate::error::{Result, SoracomError};

/// Header carrying the API key on every authenticated request.
pub(crate) const API_KEY_HEADER: &str = "X-Soracom-API-Key";

/// Header carrying the session token on every authenticated request.
pub(crate) const TOKEN_HEADER: &str = "X-Soracom-Token";

/// Credentials returned by the auth endpoint.
///
/// Immutable after construction. Authentication and token refresh return a
/// *new* `Credentials` value rather than mutating client state in place, so
/// clients can be shared across tasks without locks; the caller threads the
/// fresh value back in via
/// [`SoracomClient::with_credentials`](crate::SoracomClient::with_credentials).
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    token: String,
    operator_id: String,
}

impl Credentials {
    /// Assemble credentials from their parts.
    pub fn new(
        api_key: impl Into<String>,
        token: impl Into<String>,
        operator_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            token: token.into(),
            operator_id: operator_id.into(),
        }
    }

    /// Read credentials from `SORACOM_API_KEY`, `SORACOM_TOKEN` and
    /// `SORACOM_OPERATOR_ID`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three variables is not set.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            env::var(name).map_err(|_| {
                SoracomError::ConfigMissing(format!("{name} environment variable not set"))
            })
        };
        Ok(Self {
            api_key: var("SORACOM_API_KEY")?,
            token: var("SORACOM_TOKEN")?,
            operator_id: var("SORACOM_OPERATOR_ID")?,
        })
    }

    /// The API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The session token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The operator these credentials belong to.
    pub fn operator_id(&self) -> &str {
        &self.operator_id
    }

    /// The same credentials carrying a refreshed session token.
    pub(crate) fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            api_key: self.api_key.clone(),
            token: token.into(),
            operator_id: self.operator_id.clone(),
        }
    }
}

impl fmt::Debug for Credentials {
    // Secrets stay out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("operator_id", &self.operator_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_secrets() {
        let creds = Credentials::new("key-123", "token-456", "OP0012345678");
        let debug = format!("{creds:?}");
        assert!(debug.contains("OP0012345678"));
        assert!(!debug.contains("key-123"));
        assert!(!debug.contains("token-456"));
    }

    #[test]
    fn with_token_keeps_identity() {
        let creds = Credentials::new("key", "old", "OP1");
        let refreshed = creds.with_token("new");
        assert_eq!(refreshed.api_key(), "key");
        assert_eq!(refreshed.token(), "new");
        assert_eq!(refreshed.operator_id(), "OP1");
        // Original is untouched.
        assert_eq!(creds.token(), "old");
    }
}

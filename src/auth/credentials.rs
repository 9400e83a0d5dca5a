//! Credential management for Apirone API authorization.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};

use crate::error::ApironeError;

/// Options key the transfer key is sent under.
pub const TRANSFER_KEY: &str = "transfer-key";

/// The credential that will actually be used for a request.
#[derive(Clone)]
pub enum Credential {
    /// JWT access token, sent as `Authorization: Bearer <token>`
    Token(SecretString),
    /// Account or wallet transfer key, sent as the `transfer-key` option
    TransferKey(SecretString),
    /// Nothing configured
    None,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Token(_) => f.write_str("Token([REDACTED])"),
            Credential::TransferKey(_) => f.write_str("TransferKey([REDACTED])"),
            Credential::None => f.write_str("None"),
        }
    }
}

/// Authorization material attached to an account or wallet handle.
///
/// Both a token and a transfer key may be stored; the token wins when a
/// request is authorized.
#[derive(Clone, Default)]
pub struct Credentials {
    token: Option<SecretString>,
    transfer_key: Option<SecretString>,
}

impl Credentials {
    /// Empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credentials holding only a bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::from(token.into())),
            transfer_key: None,
        }
    }

    /// Credentials holding only a transfer key.
    pub fn with_transfer_key(transfer_key: impl Into<String>) -> Self {
        Self {
            token: None,
            transfer_key: Some(SecretString::from(transfer_key.into())),
        }
    }

    /// Read credentials from `APIRONE_TOKEN` and `APIRONE_TRANSFER_KEY`.
    ///
    /// Returns `None` if neither variable is set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars("APIRONE_TOKEN", "APIRONE_TRANSFER_KEY")
    }

    /// Read credentials from custom environment variable names.
    ///
    /// Returns `None` if neither variable is set.
    pub fn try_from_env_vars(token_var: &str, transfer_key_var: &str) -> Option<Self> {
        let token = std::env::var(token_var).ok().map(SecretString::from);
        let transfer_key = std::env::var(transfer_key_var).ok().map(SecretString::from);
        if token.is_none() && transfer_key.is_none() {
            return None;
        }
        Some(Self {
            token,
            transfer_key,
        })
    }

    /// Replace the token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.map(SecretString::from);
    }

    /// Replace the transfer key.
    pub fn set_transfer_key(&mut self, transfer_key: Option<String>) {
        self.transfer_key = transfer_key.map(SecretString::from);
    }

    /// The token, if set.
    ///
    /// This method exposes the secret - use carefully.
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret())
    }

    /// The transfer key, if set.
    ///
    /// This method exposes the secret - use carefully.
    pub fn transfer_key(&self) -> Option<&str> {
        self.transfer_key.as_ref().map(|k| k.expose_secret())
    }

    /// Whether any credential is stored.
    pub fn is_set(&self) -> bool {
        self.token.is_some() || self.transfer_key.is_some()
    }

    /// The credential a request would be authorized with.
    pub fn resolve(&self) -> Credential {
        match (&self.token, &self.transfer_key) {
            (Some(token), _) => Credential::Token(token.clone()),
            (None, Some(key)) => Credential::TransferKey(key.clone()),
            (None, None) => Credential::None,
        }
    }

    /// Put the credential into the request.
    ///
    /// A token becomes an `Authorization` header and leaves `options`
    /// untouched; a transfer key becomes the `transfer-key` option and leaves
    /// `headers` untouched. Fails with [`ApironeError::CredentialsNotSet`]
    /// when nothing is stored.
    pub fn apply_auth(
        &self,
        options: &mut Map<String, Value>,
        headers: &mut HeaderMap,
    ) -> Result<(), ApironeError> {
        match self.resolve() {
            Credential::Token(token) => {
                headers.insert(AUTHORIZATION, bearer(token.expose_secret())?);
                Ok(())
            }
            Credential::TransferKey(key) => {
                options.insert(
                    TRANSFER_KEY.to_string(),
                    Value::String(key.expose_secret().to_string()),
                );
                Ok(())
            }
            Credential::None => Err(ApironeError::CredentialsNotSet),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |set: bool| if set { "[REDACTED]" } else { "None" };
        f.debug_struct("Credentials")
            .field("token", &redact(self.token.is_some()))
            .field("transfer_key", &redact(self.transfer_key.is_some()))
            .finish()
    }
}

/// Build an `Authorization: Bearer` header value.
pub(crate) fn bearer(token: &str) -> Result<HeaderValue, ApironeError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| ApironeError::InvalidArgument(format!("invalid token: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::with_transfer_key("super_secret");
        let debug_str = format!("{:?}", creds);
        assert!(!debug_str.contains("super_secret"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!format!("{:?}", creds.resolve()).contains("super_secret"));
    }

    #[test]
    fn test_transfer_key_goes_into_options() {
        let creds = Credentials::with_transfer_key("tk");
        let mut options = Map::new();
        let mut headers = HeaderMap::new();
        creds.apply_auth(&mut options, &mut headers).unwrap();

        assert_eq!(options.get(TRANSFER_KEY), Some(&Value::from("tk")));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_token_goes_into_header() {
        let creds = Credentials::with_token("jwt");
        let mut options = Map::new();
        let mut headers = HeaderMap::new();
        creds.apply_auth(&mut options, &mut headers).unwrap();

        assert!(options.is_empty());
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer jwt");
    }

    #[test]
    fn test_token_wins_over_transfer_key() {
        let mut creds = Credentials::with_transfer_key("tk");
        creds.set_token(Some("jwt".to_string()));
        let mut options = Map::new();
        let mut headers = HeaderMap::new();
        creds.apply_auth(&mut options, &mut headers).unwrap();

        assert!(!options.contains_key(TRANSFER_KEY));
        assert!(headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_missing_credentials() {
        let creds = Credentials::new();
        let mut options = Map::new();
        let mut headers = HeaderMap::new();
        let err = creds.apply_auth(&mut options, &mut headers).unwrap_err();

        assert!(matches!(err, ApironeError::CredentialsNotSet));
        assert!(options.is_empty());
        assert!(headers.is_empty());
    }
}

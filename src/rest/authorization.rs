//! Token authorization endpoints.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde_json::{Map, Value};

use crate::auth::bearer;
use crate::error::ApironeError;
use crate::rest::endpoints::auth;
use crate::rest::transport::HttpTransport;
use crate::rest::{ApironeClient, RequestOptions};

impl<T: HttpTransport> ApironeClient<T> {
    /// Log in with account credentials.
    ///
    /// The response carries an access token for
    /// [`crate::rest::Account::token`] and a refresh token.
    pub async fn login(&self, login: &str, password: &str) -> Result<Value, ApironeError> {
        let mut options = Map::new();
        options.insert("login".to_string(), login.into());
        options.insert("password".to_string(), password.into());
        self.post(auth::LOGIN, options).await
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Value, ApironeError> {
        self.with_bearer(auth::REFRESH_TOKEN, refresh_token).await
    }

    /// Revoke an access token.
    pub async fn logout(&self, access_token: &str) -> Result<Value, ApironeError> {
        self.with_bearer(auth::LOGOUT, access_token).await
    }

    async fn with_bearer(&self, path: &str, token: &str) -> Result<Value, ApironeError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer(token)?);
        self.request(Method::POST, path, RequestOptions::empty(), headers)
            .await
    }
}

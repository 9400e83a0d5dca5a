//! Wallet endpoints.
//!
//! A wallet holds addresses in a single currency.

use reqwest::Method;
use serde_json::{Map, Value};

use crate::auth::Credentials;
use crate::error::ApironeError;
use crate::rest::endpoints::{self, ResourcePaths};
use crate::rest::resource::{authorized, parse_saved, with_option};
use crate::rest::transport::{HttpTransport, ReqwestTransport};
use crate::rest::{ApironeClient, RequestOptions};
use crate::types::{CallbackBuilder, TransferBuilder};

/// Handle to one wallet.
pub struct Wallet<T = ReqwestTransport> {
    client: ApironeClient<T>,
    id: String,
    paths: ResourcePaths,
    credentials: Credentials,
}

impl<T> Clone for Wallet<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            id: self.id.clone(),
            paths: self.paths.clone(),
            credentials: self.credentials.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Wallet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("id", &self.id)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl<T: HttpTransport> ApironeClient<T> {
    /// Handle to an existing wallet.
    pub fn wallet(&self, id: impl Into<String>) -> Wallet<T> {
        let id = id.into();
        Wallet {
            client: self.clone(),
            paths: ResourcePaths::wallet(&id),
            id,
            credentials: Credentials::new(),
        }
    }

    /// Create a wallet in `currency` with optional initial settings (see
    /// [`crate::types::SettingsBuilder`]; pass `()` for none).
    ///
    /// The response carries the wallet ID and its transfer key.
    pub async fn create_wallet(
        &self,
        currency: &str,
        settings: impl Into<RequestOptions>,
    ) -> Result<Value, ApironeError> {
        let options = with_option(settings, "currency", currency)?;
        self.post(endpoints::WALLETS, options).await
    }
}

impl<T: HttpTransport> Wallet<T> {
    /// Handle from a saved `{"wallet": .., "transfer-key": ..}` object.
    pub fn from_json(client: &ApironeClient<T>, json: &Value) -> Result<Self, ApironeError> {
        let (id, credentials) = parse_saved(json, "wallet")?;
        Ok(client.wallet(id).credentials(credentials))
    }

    /// The wallet ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Authorize protected calls with the transfer key.
    pub fn transfer_key(mut self, transfer_key: impl Into<String>) -> Self {
        self.credentials.set_transfer_key(Some(transfer_key.into()));
        self
    }

    /// Authorize protected calls with an access token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.credentials.set_token(Some(token.into()));
        self
    }

    /// Replace the credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Credentials, for updating a token in place.
    pub fn credentials_mut(&mut self) -> &mut Credentials {
        &mut self.credentials
    }

    /// Wallet info.
    pub async fn info(&self) -> Result<Value, ApironeError> {
        self.client.get(self.paths.root(), ()).await
    }

    /// Wallet balance, or the balance of one of its addresses.
    pub async fn balance(&self, address: Option<&str>) -> Result<Value, ApironeError> {
        let mut options = Map::new();
        if let Some(address) = address {
            options.insert("address".to_string(), address.into());
        }
        self.client.get(&self.paths.balance(), options).await
    }

    /// Create a new address, optionally with its own callback.
    pub async fn generate_address(
        &self,
        addr_type: Option<&str>,
        callback: Option<CallbackBuilder>,
    ) -> Result<Value, ApironeError> {
        let mut options = Map::new();
        if let Some(addr_type) = addr_type {
            options.insert("addr-type".to_string(), addr_type.into());
        }
        if let Some(callback) = callback {
            options.insert("callback".to_string(), callback.into());
        }
        self.client.post(&self.paths.addresses(), options).await
    }

    /// Info on one address.
    pub async fn address_info(&self, address: &str) -> Result<Value, ApironeError> {
        self.client.get(&self.paths.address(address), ()).await
    }

    /// Balance of one address.
    pub async fn address_balance(&self, address: &str) -> Result<Value, ApironeError> {
        self.client.get(&self.paths.address_balance(address), ()).await
    }

    /// Wallet addresses; see [`crate::types::AddressesBuilder`].
    pub async fn addresses(&self, options: impl Into<RequestOptions>) -> Result<Value, ApironeError> {
        self.client.get(&self.paths.addresses(), options).await
    }

    /// Fees and amounts of a transfer without sending it.
    pub async fn estimation(&self, transfer: &TransferBuilder) -> Result<Value, ApironeError> {
        self.client
            .get(&self.paths.transfer(), transfer.to_estimation_options())
            .await
    }

    /// Send funds. Requires credentials.
    pub async fn transfer(&self, options: impl Into<RequestOptions>) -> Result<Value, ApironeError> {
        authorized(
            &self.client,
            &self.credentials,
            Method::POST,
            &self.paths.transfer(),
            options,
        )
        .await
    }

    /// Transaction history; see [`crate::types::HistoryBuilder`].
    pub async fn history(&self, options: impl Into<RequestOptions>) -> Result<Value, ApironeError> {
        self.client.get(&self.paths.history(), options).await
    }

    /// One history item by ID.
    pub async fn history_item(&self, item: &str) -> Result<Value, ApironeError> {
        self.client.get(&self.paths.history_item(item), ()).await
    }

    /// History of one address.
    pub async fn address_history(
        &self,
        address: &str,
        options: impl Into<RequestOptions>,
    ) -> Result<Value, ApironeError> {
        self.client
            .get(&self.paths.address_history(address), options)
            .await
    }

    /// Saved wallet callback. Requires credentials.
    pub async fn callback_info(&self) -> Result<Value, ApironeError> {
        authorized(
            &self.client,
            &self.credentials,
            Method::GET,
            &self.paths.callback(),
            (),
        )
        .await
    }

    /// Saved callback of one address. Requires credentials.
    pub async fn address_callback_info(&self, address: &str) -> Result<Value, ApironeError> {
        authorized(
            &self.client,
            &self.credentials,
            Method::GET,
            &self.paths.address_callback(address),
            (),
        )
        .await
    }

    /// Callback log of one address. Requires credentials.
    pub async fn address_callback_log(
        &self,
        address: &str,
        options: impl Into<RequestOptions>,
    ) -> Result<Value, ApironeError> {
        authorized(
            &self.client,
            &self.credentials,
            Method::GET,
            &self.paths.address_callback_log(address),
            options,
        )
        .await
    }

    /// Change callback, forwarding or fee settings. Requires credentials.
    pub async fn settings(&self, settings: impl Into<RequestOptions>) -> Result<Value, ApironeError> {
        authorized(
            &self.client,
            &self.credentials,
            Method::PATCH,
            self.paths.root(),
            settings,
        )
        .await
    }
}

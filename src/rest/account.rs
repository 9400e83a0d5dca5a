//! Account endpoints.
//!
//! An account holds addresses in every supported currency, sends transfers
//! and issues invoices.

use reqwest::Method;
use serde_json::{Map, Value};

use crate::auth::Credentials;
use crate::error::ApironeError;
use crate::rest::endpoints::{self, ResourcePaths};
use crate::rest::resource::{authorized, parse_saved, with_option};
use crate::rest::transport::{HttpTransport, ReqwestTransport};
use crate::rest::{ApironeClient, RequestOptions};
use crate::types::serde_helpers::comma_join;
use crate::types::{CallbackBuilder, TransferBuilder};

/// Handle to one account.
///
/// Obtained with [`ApironeClient::account`] or [`Account::from_json`].
/// Protected calls use the handle's credentials; everything else is public.
pub struct Account<T = ReqwestTransport> {
    client: ApironeClient<T>,
    id: String,
    paths: ResourcePaths,
    credentials: Credentials,
}

impl<T> Clone for Account<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            id: self.id.clone(),
            paths: self.paths.clone(),
            credentials: self.credentials.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Account<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl<T: HttpTransport> ApironeClient<T> {
    /// Handle to an existing account.
    pub fn account(&self, id: impl Into<String>) -> Account<T> {
        let id = id.into();
        Account {
            client: self.clone(),
            paths: ResourcePaths::account(&id),
            id,
            credentials: Credentials::new(),
        }
    }

    /// Create a new account.
    ///
    /// The response carries the account ID and its transfer key; both must
    /// be stored by the caller.
    pub async fn create_account(&self) -> Result<Value, ApironeError> {
        self.post(endpoints::ACCOUNTS, ()).await
    }
}

impl<T: HttpTransport> Account<T> {
    /// Handle from a saved `{"account": .., "transfer-key": ..}` object, such
    /// as the account creation response.
    pub fn from_json(client: &ApironeClient<T>, json: &Value) -> Result<Self, ApironeError> {
        let (id, credentials) = parse_saved(json, "account")?;
        Ok(client.account(id).credentials(credentials))
    }

    /// The account ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Authorize protected calls with the transfer key.
    pub fn transfer_key(mut self, transfer_key: impl Into<String>) -> Self {
        self.credentials.set_transfer_key(Some(transfer_key.into()));
        self
    }

    /// Authorize protected calls with an access token. Takes precedence over
    /// the transfer key.
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

    /// Account info, optionally for one currency.
    pub async fn info(&self, currency: Option<&str>) -> Result<Value, ApironeError> {
        let mut options = Map::new();
        if let Some(currency) = currency {
            options.insert("currency".to_string(), currency.into());
        }
        self.client.get(self.paths.root(), options).await
    }

    /// Balance, optionally restricted to a currency and to some addresses.
    pub async fn balance(
        &self,
        currency: Option<&str>,
        addresses: &[&str],
    ) -> Result<Value, ApironeError> {
        let mut options = Map::new();
        if let Some(currency) = currency {
            options.insert("currency".to_string(), currency.into());
        }
        if !addresses.is_empty() {
            options.insert("addresses".to_string(), comma_join(addresses).into());
        }
        self.client.get(&self.paths.balance(), options).await
    }

    /// Create a new address in `currency`.
    pub async fn generate_address(
        &self,
        currency: &str,
        addr_type: Option<&str>,
        callback: Option<CallbackBuilder>,
    ) -> Result<Value, ApironeError> {
        let mut options = Map::new();
        options.insert("currency".to_string(), currency.into());
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

    /// Addresses in `currency`; see [`crate::types::AddressesBuilder`].
    pub async fn addresses(
        &self,
        currency: &str,
        options: impl Into<RequestOptions>,
    ) -> Result<Value, ApironeError> {
        let options = with_option(options, "currency", currency)?;
        self.client.get(&self.paths.addresses(), options).await
    }

    /// Fees and amounts of a transfer without sending it.
    pub async fn estimation(
        &self,
        currency: &str,
        transfer: &TransferBuilder,
    ) -> Result<Value, ApironeError> {
        let options = with_option(transfer.to_estimation_options(), "currency", currency)?;
        self.client.get(&self.paths.transfer(), options).await
    }

    /// Send funds. Requires credentials.
    pub async fn transfer(
        &self,
        currency: &str,
        options: impl Into<RequestOptions>,
    ) -> Result<Value, ApironeError> {
        let options = with_option(options, "currency", currency)?;
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

    /// History of one address; see [`crate::types::PagerBuilder`].
    pub async fn address_history(
        &self,
        address: &str,
        options: impl Into<RequestOptions>,
    ) -> Result<Value, ApironeError> {
        self.client
            .get(&self.paths.address_history(address), options)
            .await
    }

    /// Saved callback of a currency. Requires credentials.
    pub async fn callback_info(&self, currency: &str) -> Result<Value, ApironeError> {
        let options = with_option((), "currency", currency)?;
        authorized(
            &self.client,
            &self.credentials,
            Method::GET,
            &self.paths.callback(),
            options,
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

    /// Callbacks sent for one address and the responses received. Requires
    /// credentials.
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

    /// Change callback, forwarding or fee settings of a currency; see
    /// [`crate::types::SettingsBuilder`]. Requires credentials.
    pub async fn settings(
        &self,
        currency: &str,
        settings: impl Into<RequestOptions>,
    ) -> Result<Value, ApironeError> {
        let options = with_option(settings, "currency", currency)?;
        authorized(
            &self.client,
            &self.credentials,
            Method::PATCH,
            self.paths.root(),
            options,
        )
        .await
    }

    /// Create an invoice; see [`crate::types::InvoiceBuilder`].
    pub async fn invoice_create(
        &self,
        invoice: impl Into<RequestOptions>,
    ) -> Result<Value, ApironeError> {
        self.client.post(&self.paths.invoices(), invoice).await
    }

    /// Invoice status.
    ///
    /// The public variant needs no credentials. The private one also
    /// returns security-sensitive data such as the callback and requires
    /// credentials.
    pub async fn invoice_info(&self, invoice: &str, private: bool) -> Result<Value, ApironeError> {
        if !private {
            return self.client.get(&endpoints::public_invoice(invoice), ()).await;
        }
        authorized(
            &self.client,
            &self.credentials,
            Method::GET,
            &self.paths.invoice(invoice),
            (),
        )
        .await
    }

    /// Invoices of the account. Requires credentials.
    pub async fn invoices_list(
        &self,
        options: impl Into<RequestOptions>,
    ) -> Result<Value, ApironeError> {
        authorized(
            &self.client,
            &self.credentials,
            Method::GET,
            &self.paths.invoices(),
            options,
        )
        .await
    }
}

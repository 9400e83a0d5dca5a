//! Service information: supported currencies, network fees and rates.

use serde_json::{Map, Value};

use crate::error::ApironeError;
use crate::rest::ApironeClient;
use crate::rest::endpoints;
use crate::rest::transport::HttpTransport;

impl<T: HttpTransport> ApironeClient<T> {
    /// Currencies, address types and fees supported for accounts.
    pub async fn account_service_info(&self) -> Result<Value, ApironeError> {
        self.options(endpoints::ACCOUNTS).await
    }

    /// Currencies, address types and fees supported for wallets.
    pub async fn wallet_service_info(&self) -> Result<Value, ApironeError> {
        self.options(endpoints::WALLETS).await
    }

    /// Current network fee estimates for a currency.
    pub async fn network_fee(&self, currency: &str) -> Result<Value, ApironeError> {
        self.get(&endpoints::network_fee(currency), ()).await
    }

    /// Exchange rates, optionally for one currency and one fiat.
    pub async fn ticker(
        &self,
        currency: Option<&str>,
        fiat: Option<&str>,
    ) -> Result<Value, ApironeError> {
        let mut options = Map::new();
        if let Some(currency) = currency.filter(|c| !c.is_empty()) {
            options.insert("currency".to_string(), currency.into());
        }
        if let Some(fiat) = fiat.filter(|f| !f.is_empty()) {
            options.insert("fiat".to_string(), fiat.into());
        }
        self.get(endpoints::TICKER, options).await
    }
}

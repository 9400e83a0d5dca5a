//! Apirone REST API endpoint paths.
//!
//! Paths are relative to the client's base URL.

/// Base URL for the Apirone REST API.
pub const APIRONE_BASE_URL: &str = "https://apirone.com/api/";

/// Account collection; POST creates an account, OPTIONS lists supported currencies.
pub const ACCOUNTS: &str = "v2/accounts";
/// Wallet collection; POST creates a wallet, OPTIONS lists supported currencies.
pub const WALLETS: &str = "v2/wallets";
/// Exchange rates.
pub const TICKER: &str = "v2/ticker";

/// Authorization endpoints.
pub mod auth {
    /// Obtain access and refresh tokens.
    pub const LOGIN: &str = "v2/auth/login";
    /// Exchange a refresh token for a new token pair.
    pub const REFRESH_TOKEN: &str = "v2/auth/refresh-token";
    /// Revoke an access token.
    pub const LOGOUT: &str = "v2/auth/logout";
}

/// Network fee estimate for a currency.
pub fn network_fee(currency: &str) -> String {
    format!("v2/networks/{currency}/fee")
}

/// Public invoice info.
pub fn public_invoice(invoice: &str) -> String {
    format!("v2/invoices/{invoice}")
}

/// Paths below one account or wallet.
///
/// ```
/// use apirone_api_client::rest::endpoints::ResourcePaths;
///
/// let wallet = ResourcePaths::wallet("btc-1");
/// assert_eq!(wallet.root(), "v2/wallets/btc-1");
/// assert_eq!(wallet.address_history("bc1q"), "v2/wallets/btc-1/addresses/bc1q/history");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    root: String,
}

impl ResourcePaths {
    /// Paths under `v2/accounts/{account}`.
    pub fn account(account: &str) -> Self {
        Self {
            root: format!("{ACCOUNTS}/{account}"),
        }
    }

    /// Paths under `v2/wallets/{wallet}`.
    pub fn wallet(wallet: &str) -> Self {
        Self {
            root: format!("{WALLETS}/{wallet}"),
        }
    }

    /// The resource itself: info (GET) and settings (PATCH).
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Balance of the resource.
    pub fn balance(&self) -> String {
        format!("{}/balance", self.root)
    }

    /// Address list (GET) and address generation (POST).
    pub fn addresses(&self) -> String {
        format!("{}/addresses", self.root)
    }

    /// One address.
    pub fn address(&self, address: &str) -> String {
        format!("{}/addresses/{address}", self.root)
    }

    /// Balance of one address.
    pub fn address_balance(&self, address: &str) -> String {
        format!("{}/addresses/{address}/balance", self.root)
    }

    /// History of one address.
    pub fn address_history(&self, address: &str) -> String {
        format!("{}/addresses/{address}/history", self.root)
    }

    /// Callback settings of one address.
    pub fn address_callback(&self, address: &str) -> String {
        format!("{}/addresses/{address}/callback", self.root)
    }

    /// Callback delivery log of one address.
    pub fn address_callback_log(&self, address: &str) -> String {
        format!("{}/addresses/{address}/callback-log", self.root)
    }

    /// Transfer (POST) and estimation (GET).
    pub fn transfer(&self) -> String {
        format!("{}/transfer", self.root)
    }

    /// Transaction history.
    pub fn history(&self) -> String {
        format!("{}/history", self.root)
    }

    /// One history item.
    pub fn history_item(&self, item: &str) -> String {
        format!("{}/history/{item}", self.root)
    }

    /// Callback settings of the resource.
    pub fn callback(&self) -> String {
        format!("{}/callback", self.root)
    }

    /// Invoice list (GET) and invoice creation (POST).
    pub fn invoices(&self) -> String {
        format!("{}/invoices", self.root)
    }

    /// One invoice, with its private details.
    pub fn invoice(&self, invoice: &str) -> String {
        format!("{}/invoices/{invoice}", self.root)
    }
}

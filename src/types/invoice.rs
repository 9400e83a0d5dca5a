//! Invoice creation options.

use serde::Serialize;
use serde_with::skip_serializing_none;
use time::OffsetDateTime;

use crate::rest::RequestOptions;
use crate::rest::options::to_options;
use crate::types::serde_helpers::rfc3339_option;

/// Fiat price shown on the invoice page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Price {
    /// Fiat currency code, e.g. `usd`
    pub currency: String,
    /// Amount in that currency
    pub amount: u64,
}

/// Merchant data displayed to the payer.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub merchant: Option<String>,
    pub url: Option<String>,
    pub price: Option<Price>,
}

impl UserData {
    fn is_empty(&self) -> bool {
        self.merchant.is_none() && self.url.is_none() && self.price.is_none()
    }
}

/// Options for creating an invoice.
///
/// # Example
///
/// ```rust
/// use apirone_api_client::types::InvoiceBuilder;
///
/// let invoice = InvoiceBuilder::new("btc")
///     .amount(150_000)
///     .lifetime(3600)
///     .callback_url("https://shop.example/apirone")
///     .merchant("Example Shop")
///     .price("usd", 100);
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InvoiceBuilder {
    currency: String,
    amount: Option<u64>,
    lifetime: Option<u64>,
    #[serde(serialize_with = "rfc3339_option::serialize")]
    expire: Option<OffsetDateTime>,
    callback_url: Option<String>,
    linkback: Option<String>,
    #[serde(skip_serializing_if = "UserData::is_empty")]
    user_data: UserData,
}

impl InvoiceBuilder {
    /// Invoice in the given currency with the amount chosen by the payer.
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            amount: None,
            lifetime: None,
            expire: None,
            callback_url: None,
            linkback: None,
            user_data: UserData::default(),
        }
    }

    /// Invoice currency.
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Amount in minor units.
    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Lifetime in seconds.
    pub fn lifetime(mut self, seconds: u64) -> Self {
        self.lifetime = Some(seconds);
        self
    }

    /// Absolute expiry time.
    pub fn expire(mut self, expire: OffsetDateTime) -> Self {
        self.expire = Some(expire);
        self
    }

    /// URL notified when the invoice status changes.
    pub fn callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// URL the payer is sent back to.
    pub fn linkback(mut self, url: impl Into<String>) -> Self {
        self.linkback = Some(url.into());
        self
    }

    /// Merchant name shown on the invoice page.
    pub fn merchant(mut self, merchant: impl Into<String>) -> Self {
        self.user_data.merchant = Some(merchant.into());
        self
    }

    /// Merchant URL shown on the invoice page.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.user_data.url = Some(url.into());
        self
    }

    /// Price in a fiat currency, shown next to the crypto amount.
    pub fn price(mut self, currency: impl Into<String>, amount: u64) -> Self {
        self.user_data.price = Some(Price {
            currency: currency.into(),
            amount,
        });
        self
    }

    /// Request options; an expiry without an RFC 3339 form gives [`RequestOptions::Invalid`].
    pub fn to_options(&self) -> RequestOptions {
        to_options(self)
    }
}

impl From<InvoiceBuilder> for RequestOptions {
    fn from(invoice: InvoiceBuilder) -> Self {
        invoice.to_options()
    }
}

//! History, pagination and address list filters.

use serde::Serialize;
use serde_with::skip_serializing_none;
use time::OffsetDateTime;

use crate::rest::RequestOptions;
use crate::rest::options::to_options;
use crate::types::common::HistoryItemType;
use crate::types::serde_helpers::{rfc3339, search_filter};

/// Filter for account and wallet history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryBuilder {
    offset: Option<u64>,
    limit: Option<u64>,
    currency: Option<String>,
    address: Option<String>,
    date_from: Option<OffsetDateTime>,
    date_to: Option<OffsetDateTime>,
    item_type: Option<HistoryItemType>,
}

/// Limit/offset pair shared by the list projections.
#[skip_serializing_none]
#[derive(Serialize)]
struct PageProjection<'a> {
    limit: Option<u64>,
    offset: Option<u64>,
    currency: Option<&'a str>,
    q: Option<String>,
}

impl HistoryBuilder {
    /// Empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items to skip.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Maximum number of items.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Currency to list (accounts hold several).
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Only items touching this address.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Only items at or after this time.
    pub fn date_from(mut self, from: OffsetDateTime) -> Self {
        self.date_from = Some(from);
        self
    }

    /// Only items at or before this time.
    pub fn date_to(mut self, to: OffsetDateTime) -> Self {
        self.date_to = Some(to);
        self
    }

    /// Only payments or only receipts.
    pub fn item_type(mut self, item_type: HistoryItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    /// Query options. A date with no RFC 3339 form yields
    /// [`RequestOptions::Invalid`].
    pub fn to_options(&self) -> RequestOptions {
        let dates = (
            self.date_from.as_ref().map(rfc3339).transpose(),
            self.date_to.as_ref().map(rfc3339).transpose(),
        );
        let (date_from, date_to) = match dates {
            (Ok(from), Ok(to)) => (from, to),
            (Err(e), _) | (_, Err(e)) => {
                return RequestOptions::Invalid(format!("history date out of range: {e}"));
            }
        };
        let q = search_filter(&[
            ("address", self.address.clone()),
            ("date_from", date_from),
            ("date_to", date_to),
            ("item_type", self.item_type.map(|t| t.to_string())),
        ]);
        to_options(&PageProjection {
            limit: self.limit,
            offset: self.offset,
            currency: self.currency.as_deref(),
            q,
        })
    }
}

impl From<HistoryBuilder> for RequestOptions {
    fn from(history: HistoryBuilder) -> Self {
        history.to_options()
    }
}

/// Plain limit/offset pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagerBuilder {
    offset: Option<u64>,
    limit: Option<u64>,
}

impl PagerBuilder {
    /// No pagination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items to skip.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Maximum number of items.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query options.
    pub fn to_options(&self) -> RequestOptions {
        to_options(&PageProjection {
            limit: self.limit,
            offset: self.offset,
            currency: None,
            q: None,
        })
    }
}

impl From<PagerBuilder> for RequestOptions {
    fn from(pager: PagerBuilder) -> Self {
        pager.to_options()
    }
}

/// Filter for address lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressesBuilder {
    offset: Option<u64>,
    limit: Option<u64>,
    address: Option<String>,
    empty: Option<bool>,
}

impl AddressesBuilder {
    /// Empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Search by address.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Only empty (`true`) or only funded (`false`) addresses.
    pub fn empty(mut self, empty: bool) -> Self {
        self.empty = Some(empty);
        self
    }

    /// Query options.
    pub fn to_options(&self) -> RequestOptions {
        let q = search_filter(&[
            ("address", self.address.clone()),
            ("empty", self.empty.map(|e| e.to_string())),
        ]);
        to_options(&PageProjection {
            limit: self.limit,
            offset: self.offset,
            currency: None,
            q,
        })
    }
}

impl From<AddressesBuilder> for RequestOptions {
    fn from(addresses: AddressesBuilder) -> Self {
        addresses.to_options()
    }
}

//! Transfer and estimation options.

use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::error::ApironeError;
use crate::rest::RequestOptions;
use crate::rest::options::to_options;
use crate::types::common::Fee;
use crate::types::destinations::{Destination, DestinationsBuilder, parse_amount};
use crate::types::serde_helpers::comma_join;

/// Options for a transfer, or for estimating one.
///
/// # Example
///
/// ```rust
/// use apirone_api_client::types::{Fee, TransferBuilder};
///
/// let transfer = TransferBuilder::new()
///     .add_destination("3N2aXAebXqvV8TDXBabm9ydr2gXR6Q5xNd", "10000")?
///     .add_destination("bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh", "25%")?
///     .fee(Fee::Priority)
///     .subtract_fee_from_amount(true);
/// # Ok::<(), apirone_api_client::ApironeError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferBuilder {
    destinations: Vec<Destination>,
    addresses: Vec<String>,
    subtract_fee_from_amount: Option<bool>,
    fee: Option<Fee>,
}

#[skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct TransferProjection<'a> {
    destinations: Option<&'a [Destination]>,
    addresses: Option<String>,
    subtract_fee_from_amount: Option<bool>,
    fee: Option<&'static str>,
    fee_rate: Option<u64>,
}

#[skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct EstimationProjection {
    destinations: Option<String>,
    addresses: Option<String>,
    subtract_fee_from_amount: Option<bool>,
    fee: Option<&'static str>,
    fee_rate: Option<u64>,
}

impl TransferBuilder {
    /// Create empty transfer options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a destination. The amount is validated like
    /// [`DestinationsBuilder::add`].
    pub fn add_destination(
        mut self,
        address: impl Into<String>,
        amount: &str,
    ) -> Result<Self, ApironeError> {
        self.destinations.push(Destination {
            address: address.into(),
            amount: parse_amount(amount)?,
        });
        Ok(self)
    }

    /// Replace the destinations.
    pub fn destinations(mut self, destinations: DestinationsBuilder) -> Self {
        self.destinations = destinations.items().to_vec();
        self
    }

    /// Spend only from this source address. May be called repeatedly.
    pub fn add_address(mut self, address: impl Into<String>) -> Self {
        self.addresses.push(address.into());
        self
    }

    /// Deduct the network fee from the transferred amounts.
    pub fn subtract_fee_from_amount(mut self, subtract: bool) -> Self {
        self.subtract_fee_from_amount = Some(subtract);
        self
    }

    /// Fee selection.
    pub fn fee(mut self, fee: Fee) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Options for the transfer call: destinations as a JSON list.
    pub fn to_options(&self) -> RequestOptions {
        to_options(&TransferProjection {
            destinations: (!self.destinations.is_empty()).then_some(self.destinations.as_slice()),
            addresses: (!self.addresses.is_empty()).then(|| comma_join(&self.addresses)),
            subtract_fee_from_amount: self.subtract_fee_from_amount,
            fee: self.fee.map(|f| f.as_str()),
            fee_rate: self.fee.and_then(|f| f.rate()),
        })
    }

    /// Options for the estimation call: destinations as `addr:amount,..`.
    pub fn to_estimation_options(&self) -> RequestOptions {
        to_options(&EstimationProjection {
            destinations: (!self.destinations.is_empty()).then(|| comma_join(&self.destinations)),
            addresses: (!self.addresses.is_empty()).then(|| comma_join(&self.addresses)),
            subtract_fee_from_amount: self.subtract_fee_from_amount,
            fee: self.fee.map(|f| f.as_str()),
            fee_rate: self.fee.and_then(|f| f.rate()),
        })
    }
}

impl From<TransferBuilder> for RequestOptions {
    fn from(transfer: TransferBuilder) -> Self {
        transfer.to_options()
    }
}

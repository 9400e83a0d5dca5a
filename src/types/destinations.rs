//! Forwarding destinations and amount validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApironeError;
use crate::types::serde_helpers::comma_join;

/// One destination of a transfer or of forwarding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Receiving address
    pub address: String,
    /// Amount in minor units, or a percentage such as `"50%"`
    pub amount: String,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.amount)
    }
}

/// Validate and normalize a destination amount.
///
/// Spaces are stripped. The rest must be a positive integer, optionally
/// followed by `%`, and percentages may not exceed 100.
pub fn parse_amount(amount: &str) -> Result<String, ApironeError> {
    let cleaned: String = amount.chars().filter(|c| *c != ' ').collect();
    let invalid = || ApironeError::InvalidArgument(format!("Incorrect amount value: {cleaned}"));

    let (digits, percent) = match cleaned.strip_suffix('%') {
        Some(digits) => (digits, true),
        None => (cleaned.as_str(), false),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    // Digit strings too long for u128 are still positive.
    let value = digits.parse::<u128>().unwrap_or(u128::MAX);
    if value == 0 || (percent && value > 100) {
        return Err(invalid());
    }
    Ok(cleaned)
}

/// Ordered set of destinations keyed by address.
///
/// Adding an address that is already present replaces its amount in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationsBuilder {
    items: Vec<Destination>,
}

impl DestinationsBuilder {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a destination.
    pub fn add(mut self, address: impl Into<String>, amount: &str) -> Result<Self, ApironeError> {
        let address = address.into();
        let amount = parse_amount(amount)?;
        match self.items.iter_mut().find(|d| d.address == address) {
            Some(existing) => existing.amount = amount,
            None => self.items.push(Destination { address, amount }),
        }
        Ok(self)
    }

    /// Remove a destination.
    pub fn remove(mut self, address: &str) -> Self {
        self.items.retain(|d| d.address != address);
        self
    }

    /// Whether an address is present.
    pub fn contains(&self, address: &str) -> bool {
        self.items.iter().any(|d| d.address == address)
    }

    /// Destinations in insertion order.
    pub fn items(&self) -> &[Destination] {
        &self.items
    }

    /// Whether no destination is set.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// JSON form: `[{"address": .., "amount": ..}, ..]`.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.items).unwrap_or_default()
    }
}

/// Parses `"addr:amount,addr:amount"`.
impl FromStr for DestinationsBuilder {
    type Err = ApironeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = Self::new();
        for part in s.split(',').filter(|p| !p.trim().is_empty()) {
            let (address, amount) = part.split_once(':').ok_or_else(|| {
                ApironeError::InvalidArgument(format!("Incorrect destination: {part}"))
            })?;
            builder = builder.add(address.trim(), amount)?;
        }
        Ok(builder)
    }
}

impl fmt::Display for DestinationsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", comma_join(&self.items))
    }
}

impl From<DestinationsBuilder> for Value {
    fn from(destinations: DestinationsBuilder) -> Self {
        destinations.to_value()
    }
}

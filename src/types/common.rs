//! Common domain types for the Apirone API.

use serde::{Deserialize, Serialize};

/// Network fee selection for transfers and wallet settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fee {
    /// Standard fee
    Normal,
    /// Higher fee for faster confirmation
    Priority,
    /// Explicit fee rate (satoshi per byte or the currency's equivalent)
    Custom(u64),
}

impl Fee {
    /// Value of the `fee` option.
    pub fn as_str(&self) -> &'static str {
        match self {
            Fee::Normal => "normal",
            Fee::Priority => "priority",
            Fee::Custom(_) => "custom",
        }
    }

    /// Value of the `fee-rate` option, only present for custom fees.
    pub fn rate(&self) -> Option<u64> {
        match self {
            Fee::Custom(rate) => Some(*rate),
            _ => None,
        }
    }
}

impl std::fmt::Display for Fee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a history item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryItemType {
    /// Outgoing funds
    Payment,
    /// Incoming funds
    Receipt,
}

impl std::fmt::Display for HistoryItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryItemType::Payment => write!(f, "payment"),
            HistoryItemType::Receipt => write!(f, "receipt"),
        }
    }
}

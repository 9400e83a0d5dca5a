//! Account and wallet settings.

use serde::Serialize;
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::rest::RequestOptions;
use crate::rest::options::to_options;
use crate::types::callback::CallbackBuilder;
use crate::types::common::Fee;
use crate::types::destinations::DestinationsBuilder;

/// Callback, forwarding destinations and fee of an account currency or a
/// wallet. Also used when creating a wallet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsBuilder {
    callback: Option<CallbackBuilder>,
    destinations: Option<DestinationsBuilder>,
    fee: Option<Fee>,
}

#[skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct SettingsProjection {
    callback: Option<Value>,
    destinations: Option<Value>,
    fee: Option<&'static str>,
    fee_rate: Option<u64>,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback for incoming payments.
    pub fn callback(mut self, callback: CallbackBuilder) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Forwarding destinations. An empty set clears forwarding.
    pub fn destinations(mut self, destinations: DestinationsBuilder) -> Self {
        self.destinations = Some(destinations);
        self
    }

    /// Fee policy for forwarding.
    pub fn fee(mut self, fee: Fee) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn to_options(&self) -> RequestOptions {
        to_options(&SettingsProjection {
            callback: self.callback.as_ref().map(CallbackBuilder::to_value),
            destinations: self.destinations.as_ref().map(DestinationsBuilder::to_value),
            fee: self.fee.map(|f| f.as_str()),
            fee_rate: self.fee.and_then(|f| f.rate()),
        })
    }
}

impl From<SettingsBuilder> for RequestOptions {
    fn from(settings: SettingsBuilder) -> Self {
        settings.to_options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_options() {
        let settings = SettingsBuilder::new()
            .callback(CallbackBuilder::new().url("https://shop.example/cb"))
            .destinations("addr1:100%".parse().unwrap())
            .fee(Fee::Priority);

        let RequestOptions::Map(map) = settings.to_options() else {
            panic!("expected map options");
        };
        assert_eq!(
            Value::Object(map),
            json!({
                "callback": {"url": "https://shop.example/cb"},
                "destinations": [{"address": "addr1", "amount": "100%"}],
                "fee": "priority"
            })
        );
    }

    #[test]
    fn test_empty_destinations_are_sent() {
        let settings = SettingsBuilder::new().destinations(DestinationsBuilder::new());
        let RequestOptions::Map(map) = settings.to_options() else {
            panic!("expected map options");
        };
        assert_eq!(map["destinations"], json!([]));
    }
}

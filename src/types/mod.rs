//! Request option builders and common types.

pub mod callback;
pub mod common;
pub mod destinations;
pub mod history;
pub mod invoice;
pub mod serde_helpers;
pub mod settings;
pub mod transfer;

pub use callback::CallbackBuilder;
pub use common::*;
pub use destinations::{Destination, DestinationsBuilder};
pub use history::{AddressesBuilder, HistoryBuilder, PagerBuilder};
pub use invoice::{InvoiceBuilder, Price, UserData};
pub use settings::SettingsBuilder;
pub use transfer::TransferBuilder;

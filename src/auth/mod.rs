//! Authorization for the Apirone API.
//!
//! Protected endpoints (transfers, callback logs, private invoices, settings)
//! accept either a JWT access token or the account/wallet transfer key.

mod credentials;

pub use credentials::{Credential, Credentials, TRANSFER_KEY};
pub(crate) use credentials::bearer;

//! Apirone REST API client.
//!
//! [`ApironeClient`] owns the request pipeline; the account, wallet,
//! authorization and service endpoints are methods on it or on the
//! [`Account`] and [`Wallet`] handles it hands out.
//!
//! # Custom transports
//!
//! The network call goes through the [`HttpTransport`] trait, so a client can
//! be built around a stub for tests:
//!
//! ```rust
//! use apirone_api_client::ApironeClient;
//! use apirone_api_client::rest::{
//!     HttpTransport, TransportError, TransportRequest, TransportResponse,
//! };
//! use reqwest::StatusCode;
//! use reqwest::header::HeaderMap;
//!
//! struct Fixed;
//!
//! impl HttpTransport for Fixed {
//!     async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
//!         Ok(TransportResponse {
//!             status: StatusCode::OK,
//!             headers: HeaderMap::new(),
//!             body: r#"{"btc":1}"#.to_string(),
//!         })
//!     }
//! }
//!
//! let client = ApironeClient::builder().build_with_transport(Fixed)?;
//! # Ok::<(), apirone_api_client::ApironeError>(())
//! ```

mod account;
mod authorization;
pub mod classify;
mod client;
pub mod encode;
pub mod endpoints;
pub(crate) mod exchange;
pub(crate) mod options;
mod resource;
mod service;
pub mod transport;
mod wallet;

pub use account::Account;
pub use classify::{classify, error_message};
pub use client::{ApironeClient, ApironeClientBuilder};
pub use encode::{EncodeMode, encode};
pub use exchange::{Exchange, HeaderEntry};
pub use options::RequestOptions;
pub use transport::{
    DEFAULT_TIMEOUT, HttpTransport, ReqwestTransport, TransportConfig, TransportError,
    TransportErrorCategory, TransportRequest, TransportResponse,
};
pub use wallet::Wallet;

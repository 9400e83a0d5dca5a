//! # Apirone API Client
//!
//! An async Rust client library for the Apirone cryptocurrency processing REST API.
//!
//! ## Features
//!
//! - Accounts, wallets, invoices, transfers and callbacks
//! - Authorization by transfer key or bearer token
//! - Typed errors for every error status, transport failures and bad bodies
//! - Optional audit logging of every exchange with credentials masked
//! - Pluggable HTTP transport for testing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apirone_api_client::ApironeClient;
//! use apirone_api_client::types::HistoryBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApironeClient::new()?;
//!
//!     let account = client.account("apr-e729d9982f0ca1d2f1a3a2c4e1a2f7a9");
//!     let balance = account.balance(Some("btc"), &[]).await?;
//!     println!("Balance: {}", balance);
//!
//!     let history = account
//!         .history(HistoryBuilder::new().currency("btc").limit(10))
//!         .await?;
//!     println!("History: {}", history);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod logging;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, ApironeError, ErrorKind};
pub use rest::{Account, ApironeClient, ApironeClientBuilder, RequestOptions, Wallet};

/// Result type alias using ApironeError
pub type Result<T> = std::result::Result<T, ApironeError>;

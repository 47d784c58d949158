//! REST API client for the Bittrex v1.1 exchange API
//!
//! This crate provides a signed request executor and typed wrappers for the
//! public, market and account endpoints.
//!
//! # Features
//!
//! - **Public**: Markets, currencies, tickers, summaries, order book, history
//! - **Market**: Limit buy/sell, cancel, open orders
//! - **Account**: Balances, deposit addresses, withdrawals, order history
//!
//! # Authentication
//!
//! Every request is a GET whose query string carries `apikey` and a fresh
//! 24-character `nonce`. The full URL is signed with HMAC-SHA512 using the
//! API secret and the hex digest is sent in the `apisign` header.
//!
//! # Errors
//!
//! A non-200 status or a failed transport yields [`RestError::Http`]; a 200
//! response whose envelope has `success: false` yields [`RestError::Api`].
//! Nothing is retried.
//!
//! # Example
//!
//! ```no_run
//! use bittrex_rest::{BittrexRestClient, ClientConfig, Credentials, OrderBookType};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new(Credentials::from_env()?)
//!         .with_timeout(Duration::from_secs(10));
//!     let client = BittrexRestClient::new(config);
//!
//!     let summary = client.get_market_summary("BTC-LTC").await?;
//!     println!("BTC-LTC: {:?}", summary.last);
//!
//!     let book = client.public().get_order_book("BTC-LTC", OrderBookType::Both).await?;
//!     println!("best bid: {:?}", book.best_bid());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! Request URLs and response bodies are logged at `debug` level under the
//! `bittrex_rest::http` target.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use bittrex_auth::Credentials;
pub use client::{BittrexRestClient, ClientConfig};
pub use error::{ErrorKind, HttpFailure, RestError, RestResult};
pub use transport::{ReqwestTransport, Transport, TransportError, TransportOptions};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

// Re-export endpoint-specific types
pub use types::{
    // Envelope
    Envelope, ExchangeResponse,
    // Public
    Currency, Market, MarketSummary, MarketTrade, OrderBook, OrderBookEntry, OrderBookType, Ticker,
    // Trading
    OpenOrder, OrderUuid,
    // Account
    Balance, Deposit, DepositAddress, Order, OrderHistoryEntry, Withdrawal,
};

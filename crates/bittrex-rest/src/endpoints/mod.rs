//! API endpoint implementations
//!
//! Each wrapper builds its query parameters from typed arguments, calls the
//! signed request executor and decodes the envelope's `result`. Optional
//! arguments left as `None` are not sent.

pub mod account;
pub mod market;
pub mod public;

pub use account::AccountEndpoints;
pub use market::MarketEndpoints;
pub use public::PublicEndpoints;

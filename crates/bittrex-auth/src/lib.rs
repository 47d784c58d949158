//! Credentials and request signing for the Bittrex v1.1 API
//!
//! Every authenticated request carries the API key and a single-use nonce in
//! its query string, and an `apisign` header holding the HMAC-SHA512 of the
//! full request URL keyed with the API secret.
//!
//! # Example
//!
//! ```
//! use bittrex_auth::{Credentials, RequestSigner};
//!
//! # fn main() -> Result<(), bittrex_auth::AuthError> {
//! let creds = Credentials::new("my_key", "my_secret")?;
//! let signer = RequestSigner::new(&creds);
//!
//! assert_eq!(signer.nonce().len(), 24);
//!
//! let signature = signer.sign("https://bittrex.com/api/v1.1/account/getbalances?apikey=my_key");
//! assert_eq!(signature.len(), 128);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod nonce;

pub use credentials::{Credentials, RequestSigner, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult};
pub use nonce::{generate_nonce, NONCE_LEN};

//! API credentials for Bittrex
//!
//! Implements HMAC-SHA512 URL signing as required by every v1.1 endpoint.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;

use crate::error::{AuthError, AuthResult};
use crate::nonce::generate_nonce;

type HmacSha512 = Hmac<Sha512>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "BITTREX_API_KEY";

/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "BITTREX_API_SECRET";

/// API credentials for authenticated requests
///
/// The secret is never transmitted. It is only used as HMAC key material.
pub struct Credentials {
    /// API key (sent as the `apikey` query parameter)
    api_key: String,
    /// API secret (zeroized on drop)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// # Errors
    /// Returns `AuthError::InvalidCredentials` if either value is empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BITTREX_API_KEY` and `BITTREX_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Self::new(api_key, api_secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a fully assembled request URL
    ///
    /// Returns the lowercase hex HMAC-SHA512 of `url` keyed with the secret
    /// (128 characters).
    pub fn sign(&self, url: &str) -> String {
        let mut mac = HmacSha512::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(url.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", prefix))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Per-request signer
///
/// Holds the nonce generated for one request. Create a new signer for every
/// request; a signer must not be reused.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    nonce: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with a fresh nonce
    pub fn new(credentials: &'a Credentials) -> Self {
        Self {
            credentials,
            nonce: generate_nonce(),
        }
    }

    /// Get the nonce for this request
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the full request URL
    pub fn sign(&self, url: &str) -> String {
        self.credentials.sign(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("test_api_key", "test_api_secret").unwrap()
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("key", ""),
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let debug = format!("{:?}", creds());
        assert!(!debug.contains("test_api_secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let signature = creds().sign("https://bittrex.com/api/v1.1/account/getbalances");
        assert_eq!(signature.len(), 128);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signing_consistency() {
        let url = "https://bittrex.com/api/v1.1/account/getbalance?apikey=k&currency=BTC&nonce=abc";
        let creds = creds();
        assert_eq!(creds.sign(url), creds.sign(url));
        assert_ne!(creds.sign(url), creds.sign(&format!("{}d", url)));
    }

    #[test]
    fn test_known_vector() {
        // RFC 4231 test case 2
        let creds = Credentials::new("key", "Jefe").unwrap();
        assert_eq!(
            creds.sign("what do ya want for nothing?"),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_request_signer_fresh_nonce() {
        let creds = creds();
        let a = RequestSigner::new(&creds);
        let b = RequestSigner::new(&creds);
        assert_ne!(a.nonce(), b.nonce());
        assert_eq!(a.api_key(), "test_api_key");
    }

    #[test]
    fn test_clone_keeps_secret() {
        let creds = creds();
        let cloned = creds.clone();
        assert_eq!(creds.sign("x"), cloned.sign("x"));
    }
}

//! Per-request nonce generation

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Number of random bytes behind each nonce
const NONCE_BYTES: usize = 16;

/// Length of an encoded nonce (16 bytes, padded base64)
pub const NONCE_LEN: usize = 24;

/// Generate a fresh nonce for a single request
pub fn generate_nonce() -> String {
    let bytes: [u8; NONCE_BYTES] = rand::random();
    BASE64.encode(bytes)
}

//! Update-channel authentication tokens.
//!
//! Every pass embeds an authentication token the device presents when it
//! registers for updates or polls for a fresh pass. The token is derived
//! one-way from the serial number and a shared secret; knowing a token does
//! not reveal the secret, and verification is constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Derive the update authentication token for a serial number.
///
/// HMAC-SHA256 keyed by the shared secret over the serial number, hex-encoded.
/// Deterministic for a given (secret, serial) pair.
pub fn derive_update_token(secret: &str, serial_number: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(serial_number.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a presented token against the derivation for `serial_number`.
///
/// Comparison is constant-time to avoid leaking the expected token through
/// timing differences.
pub fn verify_update_token(secret: &str, serial_number: &str, presented: &str) -> bool {
    let expected = derive_update_token(secret, serial_number);
    constant_time_compare(expected.as_bytes(), presented.as_bytes())
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

//! Serial number derivation.
//!
//! Each issued pass is identified by a serial number derived from the user
//! and merchant identities. The derivation is deterministic so a re-issued
//! pass for the same user/merchant pair replaces the previous one in the
//! wallet instead of appearing as a second card.

use sha2::{Digest, Sha256};

/// Length of a derived serial number in hex characters.
const SERIAL_LEN: usize = 32;

/// Derive the stable serial number for a user/merchant pair.
///
/// SHA-256 over `user_id:merchant_id`, hex-encoded and truncated to 32
/// characters (128 bits), which keeps collisions out of reach while staying
/// well under Wallet's serial length limits.
pub fn derive_serial_number(user_id: &str, merchant_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(b":");
    hasher.update(merchant_id.as_bytes());
    let digest = hasher.finalize();
    let mut serial = hex::encode(digest);
    serial.truncate(SERIAL_LEN);
    serial
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_pair_yields_same_serial() {
        assert_eq!(
            derive_serial_number("user-1", "merchant-1"),
            derive_serial_number("user-1", "merchant-1")
        );
    }

    #[test]
    fn different_users_yield_different_serials() {
        assert_ne!(
            derive_serial_number("user-1", "merchant-1"),
            derive_serial_number("user-2", "merchant-1")
        );
    }

    #[test]
    fn different_merchants_yield_different_serials() {
        assert_ne!(
            derive_serial_number("user-1", "merchant-1"),
            derive_serial_number("user-1", "merchant-2")
        );
    }

    #[test]
    fn user_and_merchant_are_not_interchangeable() {
        assert_ne!(
            derive_serial_number("alpha", "beta"),
            derive_serial_number("beta", "alpha")
        );
    }

    #[test]
    fn serial_is_lowercase_hex_of_fixed_length() {
        let serial = derive_serial_number("user-1", "merchant-1");
        assert_eq!(serial.len(), SERIAL_LEN);
        assert!(serial.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    proptest! {
        #[test]
        fn derivation_is_deterministic(user in "[ -~]{1,40}", merchant in "[ -~]{1,40}") {
            prop_assert_eq!(
                derive_serial_number(&user, &merchant),
                derive_serial_number(&user, &merchant)
            );
        }
    }
}

//! Wallet pass configuration
//!
//! Identifiers and signing material for the Apple Wallet pass type this
//! service issues. Certificates and the private key arrive as base64 text;
//! sources that strip trailing `=` padding are tolerated (see
//! [`decode_base64_padded`]).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Wallet pass configuration (identifiers, signing credentials, update channel)
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// Apple pass type identifier (e.g. `pass.com.example.loyalty`)
    pub pass_type_identifier: String,

    /// Apple developer team identifier (10 alphanumeric characters)
    pub team_identifier: String,

    /// Organization name shown on the pass
    pub organization_name: String,

    /// Base URL of the PassKit web service for pass updates
    pub web_service_url: String,

    /// Base64-encoded signer certificate (PEM or DER)
    pub signer_certificate: String,

    /// Base64-encoded signer private key (PKCS#8, PEM or DER)
    pub signer_private_key: Secret<String>,

    /// Base64-encoded intermediate certificate completing the chain
    pub intermediate_certificate: String,

    /// Shared secret for deriving per-serial update authentication tokens
    pub update_auth_secret: Secret<String>,

    /// Signing timeout in seconds
    #[serde(default = "default_signing_timeout")]
    pub signing_timeout_secs: u64,
}

impl WalletConfig {
    /// Bounded timeout applied to each signing invocation
    pub fn signing_timeout(&self) -> Duration {
        Duration::from_secs(self.signing_timeout_secs)
    }

    /// Validate wallet configuration
    ///
    /// Checks identifier formats, credential presence, and that each base64
    /// credential decodes (after padding correction). In production the web
    /// service URL must use HTTPS; Wallet clients refuse plain HTTP.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.pass_type_identifier.is_empty() {
            return Err(ValidationError::MissingRequired(
                "WALLET__PASS_TYPE_IDENTIFIER",
            ));
        }
        if !self.pass_type_identifier.starts_with("pass.") {
            return Err(ValidationError::InvalidPassTypeIdentifier);
        }
        if self.team_identifier.len() != 10
            || !self.team_identifier.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ValidationError::InvalidTeamIdentifier);
        }
        if self.organization_name.is_empty() {
            return Err(ValidationError::MissingRequired("WALLET__ORGANIZATION_NAME"));
        }
        if !self.web_service_url.starts_with("http://") && !self.web_service_url.starts_with("https://") {
            return Err(ValidationError::InvalidWebServiceUrl);
        }
        if *environment == Environment::Production && !self.web_service_url.starts_with("https://") {
            return Err(ValidationError::WebServiceUrlMustBeHttps);
        }
        if self.signer_certificate.is_empty() {
            return Err(ValidationError::MissingRequired("WALLET__SIGNER_CERTIFICATE"));
        }
        if self.signer_private_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("WALLET__SIGNER_PRIVATE_KEY"));
        }
        if self.intermediate_certificate.is_empty() {
            return Err(ValidationError::MissingRequired(
                "WALLET__INTERMEDIATE_CERTIFICATE",
            ));
        }
        if self.update_auth_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("WALLET__UPDATE_AUTH_SECRET"));
        }
        if self.signing_timeout_secs == 0 || self.signing_timeout_secs > 60 {
            return Err(ValidationError::InvalidSigningTimeout);
        }

        decode_base64_padded(&self.signer_certificate)
            .map_err(|_| ValidationError::InvalidBase64("WALLET__SIGNER_CERTIFICATE"))?;
        decode_base64_padded(self.signer_private_key.expose_secret())
            .map_err(|_| ValidationError::InvalidBase64("WALLET__SIGNER_PRIVATE_KEY"))?;
        decode_base64_padded(&self.intermediate_certificate)
            .map_err(|_| ValidationError::InvalidBase64("WALLET__INTERMEDIATE_CERTIFICATE"))?;

        Ok(())
    }
}

fn default_signing_timeout() -> u64 {
    10
}

/// Decode base64 text, restoring any stripped `=` padding first.
///
/// Credential values are frequently copied out of systems that drop trailing
/// padding. The input is padded to the next multiple of 4 before decoding,
/// which is a no-op for already-padded values.
pub fn decode_base64_padded(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let trimmed = input.trim();
    match trimmed.len() % 4 {
        0 => STANDARD.decode(trimmed),
        rem => {
            let mut padded = String::with_capacity(trimmed.len() + (4 - rem));
            padded.push_str(trimmed);
            for _ in rem..4 {
                padded.push('=');
            }
            STANDARD.decode(&padded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use proptest::prelude::*;

    fn test_config() -> WalletConfig {
        WalletConfig {
            pass_type_identifier: "pass.com.example.loyalty".to_string(),
            team_identifier: "ABCDE12345".to_string(),
            organization_name: "Example Co".to_string(),
            web_service_url: "https://passes.example.com".to_string(),
            signer_certificate: STANDARD.encode(b"signer-cert"),
            signer_private_key: Secret::new(STANDARD.encode(b"signer-key")),
            intermediate_certificate: STANDARD.encode(b"intermediate-cert"),
            update_auth_secret: Secret::new("shared-secret".to_string()),
            signing_timeout_secs: 10,
        }
    }

    // ============================================================
    // Validation Tests
    // ============================================================

    #[test]
    fn valid_config_passes_validation() {
        let config = test_config();
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn pass_type_identifier_must_have_pass_prefix() {
        let config = WalletConfig {
            pass_type_identifier: "com.example.loyalty".to_string(),
            ..test_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidPassTypeIdentifier)
        ));
    }

    #[test]
    fn team_identifier_must_be_ten_alphanumeric_chars() {
        let config = WalletConfig {
            team_identifier: "SHORT".to_string(),
            ..test_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidTeamIdentifier)
        ));

        let config = WalletConfig {
            team_identifier: "ABCDE-1234".to_string(),
            ..test_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn production_requires_https_web_service_url() {
        let config = WalletConfig {
            web_service_url: "http://passes.example.com".to_string(),
            ..test_config()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::WebServiceUrlMustBeHttps)
        ));
    }

    #[test]
    fn missing_update_secret_is_rejected() {
        let config = WalletConfig {
            update_auth_secret: Secret::new(String::new()),
            ..test_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn invalid_base64_credential_is_rejected() {
        let config = WalletConfig {
            signer_certificate: "not!valid!base64!".to_string(),
            ..test_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidBase64("WALLET__SIGNER_CERTIFICATE"))
        ));
    }

    #[test]
    fn credential_missing_padding_still_validates() {
        let stripped = STANDARD.encode(b"signer-cert").trim_end_matches('=').to_string();
        let config = WalletConfig {
            signer_certificate: stripped,
            ..test_config()
        };
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn signing_timeout_bounds() {
        let config = WalletConfig {
            signing_timeout_secs: 0,
            ..test_config()
        };
        assert!(config.validate(&Environment::Development).is_err());

        let config = WalletConfig {
            signing_timeout_secs: 120,
            ..test_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    // ============================================================
    // Base64 Padding Tests
    // ============================================================

    #[test]
    fn decodes_value_with_padding_stripped() {
        // "ab" encodes to "YWI=" (length mod 4 == 3 after stripping)
        assert_eq!(decode_base64_padded("YWI").unwrap(), b"ab");
        // "a" encodes to "YQ==" (length mod 4 == 2 after stripping)
        assert_eq!(decode_base64_padded("YQ").unwrap(), b"a");
    }

    #[test]
    fn decoding_padded_value_is_unchanged() {
        assert_eq!(decode_base64_padded("YWI=").unwrap(), b"ab");
        assert_eq!(decode_base64_padded("YQ==").unwrap(), b"a");
        assert_eq!(decode_base64_padded("YWJj").unwrap(), b"abc");
    }

    #[test]
    fn decodes_value_with_surrounding_whitespace() {
        assert_eq!(decode_base64_padded("  YWI \n").unwrap(), b"ab");
    }

    #[test]
    fn rejects_garbage_input() {
        assert!(decode_base64_padded("!!!!").is_err());
    }

    proptest! {
        /// Stripping padding from any encoded value and re-decoding recovers
        /// the original bytes; already-padded input decodes identically.
        #[test]
        fn padding_correction_round_trips(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let encoded = STANDARD.encode(&bytes);
            let stripped = encoded.trim_end_matches('=');
            prop_assert_eq!(decode_base64_padded(stripped).unwrap(), bytes.clone());
            prop_assert_eq!(decode_base64_padded(&encoded).unwrap(), bytes);
        }
    }
}

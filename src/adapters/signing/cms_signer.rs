//! CMS pass signer.
//!
//! Produces the detached, DER-encoded CMS signature over the pass manifest
//! using the configured X.509 credentials. The signer certificate and the
//! intermediate certificate are embedded in the SignedData structure so
//! wallet clients can build the chain without fetching anything.

use std::sync::Arc;

use async_trait::async_trait;
use cryptographic_message_syntax::{SignedDataBuilder, SignerBuilder};
use secrecy::ExposeSecret;
use x509_certificate::{CapturedX509Certificate, InMemorySigningKeyPair};

use crate::config::{decode_base64_padded, WalletConfig};
use crate::ports::{PassSigner, SigningError};

/// Parsed signing material, shared across requests.
struct Credentials {
    signing_key: InMemorySigningKeyPair,
    certificate: CapturedX509Certificate,
    chain: Vec<CapturedX509Certificate>,
}

/// [`PassSigner`] backed by an in-process CMS implementation.
pub struct CmsPassSigner {
    credentials: Arc<Credentials>,
}

impl CmsPassSigner {
    /// Parse the base64 credentials from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::Credentials`] if any value is not valid
    /// base64 (after padding correction) or does not parse as an X.509
    /// certificate / PKCS#8 private key.
    pub fn from_config(config: &WalletConfig) -> Result<Self, SigningError> {
        let certificate = parse_certificate(&config.signer_certificate, "signer certificate")?;
        let intermediate =
            parse_certificate(&config.intermediate_certificate, "intermediate certificate")?;
        let signing_key = parse_signing_key(config.signer_private_key.expose_secret())?;

        Ok(Self {
            credentials: Arc::new(Credentials {
                signing_key,
                certificate,
                chain: vec![intermediate],
            }),
        })
    }
}

#[async_trait]
impl PassSigner for CmsPassSigner {
    async fn sign_manifest(&self, manifest: &[u8]) -> Result<Vec<u8>, SigningError> {
        let credentials = Arc::clone(&self.credentials);
        let manifest = manifest.to_vec();

        // RSA signing is CPU-bound; keep it off the async worker threads so
        // the caller's timeout stays enforceable.
        tokio::task::spawn_blocking(move || sign_detached(&credentials, &manifest))
            .await
            .map_err(|e| SigningError::Backend(format!("signing task aborted: {e}")))?
    }
}

/// Build the detached SignedData over the manifest bytes.
fn sign_detached(credentials: &Credentials, manifest: &[u8]) -> Result<Vec<u8>, SigningError> {
    let signer = SignerBuilder::new(&credentials.signing_key, credentials.certificate.clone());

    let mut builder = SignedDataBuilder::default()
        .content_external(manifest.to_vec())
        .signer(signer);
    for certificate in &credentials.chain {
        builder = builder.certificate(certificate.clone());
    }

    builder
        .build_der()
        .map_err(|e| SigningError::Backend(format!("failed to build detached signature: {e}")))
}

fn parse_certificate(
    encoded: &str,
    label: &str,
) -> Result<CapturedX509Certificate, SigningError> {
    let decoded = decode_base64_padded(encoded)
        .map_err(|e| SigningError::Credentials(format!("{label} is not valid base64: {e}")))?;

    let parsed = if looks_like_pem(&decoded) {
        CapturedX509Certificate::from_pem(&decoded)
    } else {
        CapturedX509Certificate::from_der(decoded)
    };
    parsed.map_err(|e| SigningError::Credentials(format!("{label} is not a valid certificate: {e}")))
}

fn parse_signing_key(encoded: &str) -> Result<InMemorySigningKeyPair, SigningError> {
    let decoded = decode_base64_padded(encoded).map_err(|e| {
        SigningError::Credentials(format!("signer private key is not valid base64: {e}"))
    })?;

    let parsed = if looks_like_pem(&decoded) {
        InMemorySigningKeyPair::from_pkcs8_pem(&decoded)
    } else {
        InMemorySigningKeyPair::from_pkcs8_der(&decoded)
    };
    parsed.map_err(|e| {
        SigningError::Credentials(format!("signer private key is not valid PKCS#8: {e}"))
    })
}

fn looks_like_pem(data: &[u8]) -> bool {
    data.starts_with(b"-----BEGIN")
}

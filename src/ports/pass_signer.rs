//! Pass signer port.
//!
//! Defines the contract for producing the detached signature over a pass
//! manifest. The production adapter signs in-process with X.509 credentials;
//! tests substitute a stub. Keeping the seam this narrow means the build
//! pipeline never learns where signatures come from.

use async_trait::async_trait;

/// Errors from signature generation.
///
/// Signing failures are caused by bad credentials or malformed input, not
/// transient conditions; callers must fail the build rather than retry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SigningError {
    /// The configured credentials could not be decoded or parsed.
    #[error("signer credentials rejected: {0}")]
    Credentials(String),

    /// Signature generation itself failed.
    #[error("signature generation failed: {0}")]
    Backend(String),
}

/// Port for producing a detached, DER-encoded signature over manifest bytes.
#[async_trait]
pub trait PassSigner: Send + Sync {
    /// Sign the manifest, returning the detached signature blob.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError`] if the credentials are unusable or signature
    /// generation fails. Implementations must never return a placeholder
    /// signature on failure.
    async fn sign_manifest(&self, manifest: &[u8]) -> Result<Vec<u8>, SigningError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_signer_is_object_safe() {
        fn _accepts_dyn(_signer: &dyn PassSigner) {}
    }

    #[test]
    fn signing_error_messages_carry_context() {
        let err = SigningError::Credentials("not valid PKCS#8".to_string());
        assert!(err.to_string().contains("credentials rejected"));

        let err = SigningError::Backend("CMS build failed".to_string());
        assert!(err.to_string().contains("CMS build failed"));
    }
}

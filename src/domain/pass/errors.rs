//! Pass-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidInput | 400 |
//! | Signing | 500 |
//! | Packaging | 500 |
//! | Unauthorized | 401 |
//! | UnknownPassType | 404 |
//! | Storage | 500 |

/// Errors raised while building a pass bundle.
///
/// A failed build never yields a partial archive; in particular, a signing
/// failure is surfaced instead of substituting a placeholder signature, since
/// Wallet clients reject a pass whose signature does not verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassBuildError {
    /// A required request field is missing or malformed.
    InvalidInput { field: String, message: String },

    /// The signer rejected the manifest, misfired, or timed out.
    Signing(String),

    /// I/O failure while writing build files or assembling the archive.
    Packaging(String),
}

impl PassBuildError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        PassBuildError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        PassBuildError::Signing(message.into())
    }

    pub fn packaging(message: impl Into<String>) -> Self {
        PassBuildError::Packaging(message.into())
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            PassBuildError::InvalidInput { field, message } => {
                format!("Invalid value for '{}': {}", field, message)
            }
            PassBuildError::Signing(reason) => format!("Pass signing failed: {}", reason),
            PassBuildError::Packaging(reason) => format!("Pass packaging failed: {}", reason),
        }
    }
}

impl std::fmt::Display for PassBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PassBuildError {}

/// Errors raised by the PassKit web-service endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebServiceError {
    /// The presented update token does not match the serial's derivation.
    Unauthorized,

    /// The request names a pass type this service does not issue.
    UnknownPassType(String),

    /// Registration storage failed.
    Storage(String),
}

impl WebServiceError {
    pub fn unknown_pass_type(pass_type: impl Into<String>) -> Self {
        WebServiceError::UnknownPassType(pass_type.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        WebServiceError::Storage(message.into())
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            WebServiceError::Unauthorized => "Invalid authentication token".to_string(),
            WebServiceError::UnknownPassType(pass_type) => {
                format!("Unknown pass type: {}", pass_type)
            }
            WebServiceError::Storage(reason) => format!("Registration storage failed: {}", reason),
        }
    }
}

impl std::fmt::Display for WebServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for WebServiceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_names_field() {
        let err = PassBuildError::invalid_input("user_id", "is required");
        assert!(err.message().contains("user_id"));
        assert!(err.message().contains("is required"));
    }

    #[test]
    fn signing_message_includes_reason() {
        let err = PassBuildError::signing("signer exited with status 1");
        assert!(err.message().contains("signing failed"));
        assert!(err.message().contains("status 1"));
    }

    #[test]
    fn packaging_message_includes_reason() {
        let err = PassBuildError::packaging("disk full");
        assert!(err.message().contains("disk full"));
    }

    #[test]
    fn display_matches_message() {
        let err = PassBuildError::signing("boom");
        assert_eq!(format!("{}", err), err.message());
    }

    #[test]
    fn unknown_pass_type_message_names_type() {
        let err = WebServiceError::unknown_pass_type("pass.com.other");
        assert!(err.message().contains("pass.com.other"));
    }

    #[test]
    fn unauthorized_message_is_opaque() {
        // Must not leak what the expected token would have been.
        let msg = WebServiceError::Unauthorized.message();
        assert_eq!(msg, "Invalid authentication token");
    }
}

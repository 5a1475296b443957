//! HTTP handlers for pass endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers. The web-service endpoints speak the PassKit protocol: the
//! device authenticates with `Authorization: ApplePass <token>`.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Json, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use secrecy::Secret;

use crate::application::handlers::pass::{
    BuildPassHandler, PollOutcome, PollUpdatesHandler, PollUpdatesQuery, RecordLogsCommand,
    RecordLogsHandler, RegisterDeviceCommand, RegisterDeviceHandler, UnregisterDeviceCommand,
    UnregisterDeviceHandler,
};
use crate::config::WalletConfig;
use crate::domain::pass::{PassBuildError, PassIdentity, WebServiceError, PKPASS_CONTENT_TYPE};
use crate::ports::{PassSigner, RegistrationOutcome, RegistrationStore};

use super::dto::{BuildPassRequest, ErrorResponse, LogRequest, RegisterDeviceRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped
/// dependencies for efficient sharing across handlers.
#[derive(Clone)]
pub struct PassAppState {
    pub signer: Arc<dyn PassSigner>,
    pub registration_store: Arc<dyn RegistrationStore>,
    pub identity: PassIdentity,
    pub update_auth_secret: Secret<String>,
    pub signing_timeout: Duration,
}

impl PassAppState {
    /// Assemble state from configuration plus the port implementations.
    pub fn from_config(
        config: &WalletConfig,
        signer: Arc<dyn PassSigner>,
        registration_store: Arc<dyn RegistrationStore>,
    ) -> Self {
        Self {
            signer,
            registration_store,
            identity: PassIdentity {
                pass_type_identifier: config.pass_type_identifier.clone(),
                team_identifier: config.team_identifier.clone(),
                organization_name: config.organization_name.clone(),
                web_service_url: config.web_service_url.clone(),
            },
            update_auth_secret: config.update_auth_secret.clone(),
            signing_timeout: config.signing_timeout(),
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn build_pass_handler(&self) -> BuildPassHandler {
        BuildPassHandler::new(
            self.signer.clone(),
            self.identity.clone(),
            self.update_auth_secret.clone(),
            self.signing_timeout,
        )
    }

    pub fn register_device_handler(&self) -> RegisterDeviceHandler {
        RegisterDeviceHandler::new(
            self.registration_store.clone(),
            self.identity.clone(),
            self.update_auth_secret.clone(),
        )
    }

    pub fn unregister_device_handler(&self) -> UnregisterDeviceHandler {
        UnregisterDeviceHandler::new(
            self.registration_store.clone(),
            self.identity.clone(),
            self.update_auth_secret.clone(),
        )
    }

    pub fn poll_updates_handler(&self) -> PollUpdatesHandler {
        PollUpdatesHandler::new(self.identity.clone(), self.update_auth_secret.clone())
    }

    pub fn record_logs_handler(&self) -> RecordLogsHandler {
        RecordLogsHandler::new()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /v1/passes - build and return a signed pass bundle
pub async fn build_pass(
    State(state): State<PassAppState>,
    Json(request): Json<BuildPassRequest>,
) -> Result<impl IntoResponse, PassApiError> {
    let handler = state.build_pass_handler();
    let cmd = request.try_into_command()?;

    let built = handler.handle(cmd).await?;

    let headers = [
        (header::CONTENT_TYPE, PKPASS_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", built.filename),
        ),
    ];
    Ok((StatusCode::OK, headers, built.bytes))
}

/// POST /v1/devices/{device}/registrations/{pass_type}/{serial} - register a device
pub async fn register_device(
    State(state): State<PassAppState>,
    Path((device_library_id, pass_type_identifier, serial_number)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(request): Json<RegisterDeviceRequest>,
) -> Result<impl IntoResponse, PassApiError> {
    let auth_token = apple_pass_token(&headers)?;
    let push_token = match request.push_token {
        Some(token) if !token.trim().is_empty() => token,
        _ => return Err(PassBuildError::invalid_input("pushToken", "is required").into()),
    };

    let handler = state.register_device_handler();
    let outcome = handler
        .handle(RegisterDeviceCommand {
            device_library_id,
            pass_type_identifier,
            serial_number,
            push_token,
            auth_token,
        })
        .await?;

    let status = match outcome {
        RegistrationOutcome::Created => StatusCode::CREATED,
        RegistrationOutcome::AlreadyRegistered => StatusCode::OK,
    };
    Ok(status)
}

/// DELETE /v1/devices/{device}/registrations/{pass_type}/{serial} - unregister a device
pub async fn unregister_device(
    State(state): State<PassAppState>,
    Path((device_library_id, pass_type_identifier, serial_number)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, PassApiError> {
    let auth_token = apple_pass_token(&headers)?;

    let handler = state.unregister_device_handler();
    handler
        .handle(UnregisterDeviceCommand {
            device_library_id,
            pass_type_identifier,
            serial_number,
            auth_token,
        })
        .await?;

    Ok(StatusCode::OK)
}

/// GET /v1/passes/{pass_type}/{serial} - poll for an updated pass
pub async fn get_updated_pass(
    State(state): State<PassAppState>,
    Path((pass_type_identifier, serial_number)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, PassApiError> {
    let auth_token = apple_pass_token(&headers)?;

    let handler = state.poll_updates_handler();
    let outcome = handler
        .handle(PollUpdatesQuery {
            pass_type_identifier,
            serial_number,
            auth_token,
        })
        .await?;

    match outcome {
        PollOutcome::NotModified => Ok(StatusCode::NOT_MODIFIED),
    }
}

/// POST /v1/log - accept wallet client diagnostics
pub async fn record_logs(
    State(state): State<PassAppState>,
    Json(request): Json<LogRequest>,
) -> Result<impl IntoResponse, PassApiError> {
    let handler = state.record_logs_handler();
    handler.handle(RecordLogsCommand { logs: request.logs }).await;
    Ok(StatusCode::OK)
}

/// Extract the token from an `Authorization: ApplePass <token>` header.
fn apple_pass_token(headers: &HeaderMap) -> Result<String, PassApiError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("ApplePass "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(PassApiError::WebService(WebServiceError::Unauthorized))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum PassApiError {
    Build(PassBuildError),
    WebService(WebServiceError),
}

impl From<PassBuildError> for PassApiError {
    fn from(err: PassBuildError) -> Self {
        Self::Build(err)
    }
}

impl From<WebServiceError> for PassApiError {
    fn from(err: WebServiceError) -> Self {
        Self::WebService(err)
    }
}

impl IntoResponse for PassApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            PassApiError::Build(err) => {
                let status = match err {
                    PassBuildError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                    PassBuildError::Signing(_) | PassBuildError::Packaging(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.message())
            }
            PassApiError::WebService(err) => {
                let status = match err {
                    WebServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
                    WebServiceError::UnknownPassType(_) => StatusCode::NOT_FOUND,
                    WebServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.message())
            }
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "pass request failed");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryRegistrationStore;
    use crate::domain::pass::derive_update_token;
    use crate::ports::SigningError;
    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use serde_json::json;

    const TEST_SECRET: &str = "update-secret";
    const PASS_TYPE: &str = "pass.com.example.loyalty";

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct StubSigner;

    #[async_trait]
    impl PassSigner for StubSigner {
        async fn sign_manifest(&self, _manifest: &[u8]) -> Result<Vec<u8>, SigningError> {
            Ok(b"stub-signature".to_vec())
        }
    }

    struct FailingSigner;

    #[async_trait]
    impl PassSigner for FailingSigner {
        async fn sign_manifest(&self, _manifest: &[u8]) -> Result<Vec<u8>, SigningError> {
            Err(SigningError::Backend("bad credentials".to_string()))
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn test_state_with(signer: Arc<dyn PassSigner>) -> PassAppState {
        PassAppState {
            signer,
            registration_store: Arc::new(InMemoryRegistrationStore::new()),
            identity: PassIdentity {
                pass_type_identifier: PASS_TYPE.to_string(),
                team_identifier: "ABCDE12345".to_string(),
                organization_name: "Example Co".to_string(),
                web_service_url: "https://passes.example.com".to_string(),
            },
            update_auth_secret: Secret::new(TEST_SECRET.to_string()),
            signing_timeout: Duration::from_secs(5),
        }
    }

    fn test_state() -> PassAppState {
        test_state_with(Arc::new(StubSigner))
    }

    fn build_request() -> BuildPassRequest {
        serde_json::from_value(json!({
            "user_id": "user-123",
            "merchant_id": "merchant-456",
            "merchant_name": "Corner Cafe"
        }))
        .unwrap()
    }

    fn auth_headers(serial: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let token = derive_update_token(TEST_SECRET, serial);
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("ApplePass {token}")).unwrap(),
        );
        headers
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn build_pass_returns_pkpass_bytes() {
        let response = build_pass(State(test_state()), Json(build_request()))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PKPASS_CONTENT_TYPE
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains("corner-cafe-loyalty.pkpass"));
    }

    #[tokio::test]
    async fn build_pass_signing_failure_is_server_error() {
        let result = build_pass(State(test_state_with(Arc::new(FailingSigner))), Json(build_request())).await;

        let err = result.err().expect("must fail");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn register_device_with_valid_token_creates() {
        let state = test_state();
        let request: RegisterDeviceRequest =
            serde_json::from_value(json!({"pushToken": "apns-123"})).unwrap();

        let response = register_device(
            State(state),
            Path((
                "device-1".to_string(),
                PASS_TYPE.to_string(),
                "serial-1".to_string(),
            )),
            auth_headers("serial-1"),
            Json(request),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn register_device_without_auth_is_unauthorized() {
        let state = test_state();
        let request: RegisterDeviceRequest =
            serde_json::from_value(json!({"pushToken": "apns-123"})).unwrap();

        let result = register_device(
            State(state),
            Path((
                "device-1".to_string(),
                PASS_TYPE.to_string(),
                "serial-1".to_string(),
            )),
            HeaderMap::new(),
            Json(request),
        )
        .await;

        let response = result.err().expect("must fail").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn register_device_without_push_token_is_bad_request() {
        let state = test_state();
        let request: RegisterDeviceRequest = serde_json::from_value(json!({})).unwrap();

        let result = register_device(
            State(state),
            Path((
                "device-1".to_string(),
                PASS_TYPE.to_string(),
                "serial-1".to_string(),
            )),
            auth_headers("serial-1"),
            Json(request),
        )
        .await;

        let response = result.err().expect("must fail").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn poll_returns_not_modified() {
        let response = get_updated_pass(
            State(test_state()),
            Path((PASS_TYPE.to_string(), "serial-1".to_string())),
            auth_headers("serial-1"),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn record_logs_acknowledges() {
        let request: LogRequest =
            serde_json::from_value(json!({"logs": ["something went wrong"]})).unwrap();

        let response = record_logs(State(test_state()), Json(request))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error Mapping Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn api_error_maps_invalid_input_to_400() {
        let err = PassApiError::from(PassBuildError::invalid_input("user_id", "is required"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_signing_to_500() {
        let err = PassApiError::from(PassBuildError::signing("signer unavailable"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn api_error_maps_packaging_to_500() {
        let err = PassApiError::from(PassBuildError::packaging("disk full"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn api_error_maps_unauthorized_to_401() {
        let err = PassApiError::from(WebServiceError::Unauthorized);
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn api_error_maps_unknown_pass_type_to_404() {
        let err = PassApiError::from(WebServiceError::unknown_pass_type("pass.com.other"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Auth Header Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn apple_pass_token_parses_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("ApplePass abc123"),
        );
        assert_eq!(apple_pass_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn apple_pass_token_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );
        assert!(apple_pass_token(&headers).is_err());
    }

    #[test]
    fn apple_pass_token_rejects_missing_header() {
        assert!(apple_pass_token(&HeaderMap::new()).is_err());
    }

    #[test]
    fn apple_pass_token_rejects_empty_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("ApplePass "));
        assert!(apple_pass_token(&headers).is_err());
    }
}

//! Axum router configuration for pass endpoints.
//!
//! This module defines the route structure for the pass-issuing API and the
//! PassKit web-service protocol, and wires them to their handlers.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    build_pass, get_updated_pass, record_logs, register_device, unregister_device, PassAppState,
};

/// Create the pass-issuing router.
///
/// # Routes
/// - `POST /passes` - Build and return a signed pass bundle
pub fn issue_routes() -> Router<PassAppState> {
    Router::new().route("/passes", post(build_pass))
}

/// Create the PassKit web-service router.
///
/// These endpoints are called by wallet clients, not by the app; they
/// authenticate with the per-serial `ApplePass` token instead of user auth.
///
/// # Routes
/// - `POST /devices/{device}/registrations/{pass_type}/{serial}` - Register a device
/// - `DELETE /devices/{device}/registrations/{pass_type}/{serial}` - Unregister a device
/// - `GET /passes/{pass_type}/{serial}` - Poll for an updated pass
/// - `POST /log` - Accept wallet client diagnostics
pub fn web_service_routes() -> Router<PassAppState> {
    Router::new()
        .route(
            "/devices/:device_library_id/registrations/:pass_type_identifier/:serial_number",
            post(register_device).delete(unregister_device),
        )
        .route(
            "/passes/:pass_type_identifier/:serial_number",
            get(get_updated_pass),
        )
        .route("/log", post(record_logs))
}

/// Create the complete pass module router, mounted under `/v1`.
pub fn pass_router() -> Router<PassAppState> {
    Router::new().nest("/v1", issue_routes().merge(web_service_routes()))
}

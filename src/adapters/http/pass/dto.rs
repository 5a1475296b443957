//! HTTP DTOs (Data Transfer Objects) for pass endpoints.
//!
//! These types define the JSON request/response structure for the pass API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::handlers::pass::BuildPassCommand;
use crate::domain::pass::{Coordinate, PassBuildError};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to build a signed pass bundle.
///
/// Required fields are optional at the serde layer so a missing value
/// surfaces as this API's own error shape instead of a generic
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildPassRequest {
    pub user_id: Option<String>,
    pub merchant_id: Option<String>,
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub location: Option<LocationDto>,
    /// Stamp records or empty slots; only non-null entries count.
    #[serde(default)]
    pub stamps: Vec<Option<serde_json::Value>>,
    #[serde(default)]
    pub sat_back: i64,
    #[serde(default)]
    pub credit_balance: f64,
    #[serde(default)]
    pub user_balance: f64,
    #[serde(default)]
    pub is_nonprofit: bool,
    #[serde(default)]
    pub has_qr_payments: bool,
}

/// Caller-supplied coordinate.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationDto {
    pub lat: f64,
    pub lng: f64,
}

impl BuildPassRequest {
    /// Convert into a command, rejecting missing required fields.
    pub fn try_into_command(self) -> Result<BuildPassCommand, PassBuildError> {
        Ok(BuildPassCommand {
            user_id: required(self.user_id, "user_id")?,
            merchant_id: required(self.merchant_id, "merchant_id")?,
            merchant_name: required(self.merchant_name, "merchant_name")?,
            location: self.location.map(|l| Coordinate {
                latitude: l.lat,
                longitude: l.lng,
            }),
            stamps: self.stamps,
            sat_back: self.sat_back,
            credit_balance: self.credit_balance,
            user_balance: self.user_balance,
            is_nonprofit: self.is_nonprofit,
            has_qr_payments: self.has_qr_payments,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, PassBuildError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PassBuildError::invalid_input(field, "is required")),
    }
}

/// Registration body sent by Wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDeviceRequest {
    #[serde(rename = "pushToken")]
    pub push_token: Option<String>,
}

/// Log batch sent by Wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct LogRequest {
    #[serde(default)]
    pub logs: Vec<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Error payload returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

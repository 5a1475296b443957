//! Registration store port.
//!
//! Short-lived keyed storage of device registrations for the pass-update
//! channel. The store is owned by the service and injected where needed: an
//! in-memory map for tests and single-node deployments, a persistent store
//! for production.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A device registered to receive update pushes for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRegistration {
    /// Wallet's identifier for the device.
    pub device_library_id: String,

    /// Serial number of the registered pass.
    pub serial_number: String,

    /// APNs push token supplied by the device.
    pub push_token: String,

    /// When the registration was recorded.
    pub registered_at: DateTime<Utc>,
}

/// Result of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// First registration for this device/serial pair.
    Created,

    /// The pair was already registered; the push token was refreshed.
    AlreadyRegistered,
}

/// Errors from registration storage operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationStoreError {
    #[error("registration storage error: {0}")]
    Backend(String),
}

/// Port for persisting device registrations keyed by device + serial.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Record a registration, refreshing the push token if it already exists.
    async fn register(
        &self,
        registration: DeviceRegistration,
    ) -> Result<RegistrationOutcome, RegistrationStoreError>;

    /// Remove a registration. Returns `true` if one existed.
    async fn unregister(
        &self,
        device_library_id: &str,
        serial_number: &str,
    ) -> Result<bool, RegistrationStoreError>;

    /// Look up a registration by device + serial.
    async fn find(
        &self,
        device_library_id: &str,
        serial_number: &str,
    ) -> Result<Option<DeviceRegistration>, RegistrationStoreError>;
}

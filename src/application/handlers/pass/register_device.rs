//! RegisterDeviceHandler - registers a device for pass update pushes.
//!
//! Wallet presents the pass's authentication token when registering; the
//! handler re-derives the token from the serial and compares in constant
//! time before touching the store.

use std::sync::Arc;

use chrono::Utc;
use secrecy::{ExposeSecret, Secret};

use crate::domain::pass::{verify_update_token, PassIdentity, WebServiceError};
use crate::ports::{DeviceRegistration, RegistrationOutcome, RegistrationStore};

/// Command to register a device for updates to one pass.
#[derive(Debug, Clone)]
pub struct RegisterDeviceCommand {
    pub device_library_id: String,
    pub pass_type_identifier: String,
    pub serial_number: String,
    pub push_token: String,
    pub auth_token: String,
}

/// Command to remove a device registration.
#[derive(Debug, Clone)]
pub struct UnregisterDeviceCommand {
    pub device_library_id: String,
    pub pass_type_identifier: String,
    pub serial_number: String,
    pub auth_token: String,
}

/// Handler for device registrations.
pub struct RegisterDeviceHandler {
    store: Arc<dyn RegistrationStore>,
    identity: PassIdentity,
    update_auth_secret: Secret<String>,
}

impl RegisterDeviceHandler {
    pub fn new(
        store: Arc<dyn RegistrationStore>,
        identity: PassIdentity,
        update_auth_secret: Secret<String>,
    ) -> Self {
        Self {
            store,
            identity,
            update_auth_secret,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterDeviceCommand,
    ) -> Result<RegistrationOutcome, WebServiceError> {
        authorize(
            &self.identity,
            self.update_auth_secret.expose_secret(),
            &cmd.pass_type_identifier,
            &cmd.serial_number,
            &cmd.auth_token,
        )?;

        self.store
            .register(DeviceRegistration {
                device_library_id: cmd.device_library_id,
                serial_number: cmd.serial_number,
                push_token: cmd.push_token,
                registered_at: Utc::now(),
            })
            .await
            .map_err(|e| WebServiceError::storage(e.to_string()))
    }
}

/// Handler for removing device registrations.
pub struct UnregisterDeviceHandler {
    store: Arc<dyn RegistrationStore>,
    identity: PassIdentity,
    update_auth_secret: Secret<String>,
}

impl UnregisterDeviceHandler {
    pub fn new(
        store: Arc<dyn RegistrationStore>,
        identity: PassIdentity,
        update_auth_secret: Secret<String>,
    ) -> Self {
        Self {
            store,
            identity,
            update_auth_secret,
        }
    }

    /// Returns `true` if a registration existed and was removed.
    pub async fn handle(&self, cmd: UnregisterDeviceCommand) -> Result<bool, WebServiceError> {
        authorize(
            &self.identity,
            self.update_auth_secret.expose_secret(),
            &cmd.pass_type_identifier,
            &cmd.serial_number,
            &cmd.auth_token,
        )?;

        self.store
            .unregister(&cmd.device_library_id, &cmd.serial_number)
            .await
            .map_err(|e| WebServiceError::storage(e.to_string()))
    }
}

/// Shared authorization for web-service operations on one pass.
pub(super) fn authorize(
    identity: &PassIdentity,
    secret: &str,
    pass_type_identifier: &str,
    serial_number: &str,
    auth_token: &str,
) -> Result<(), WebServiceError> {
    if pass_type_identifier != identity.pass_type_identifier {
        return Err(WebServiceError::unknown_pass_type(pass_type_identifier));
    }
    if !verify_update_token(secret, serial_number, auth_token) {
        return Err(WebServiceError::Unauthorized);
    }
    Ok(())
}

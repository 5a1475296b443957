//! In-memory registration store.
//!
//! Registrations live in a process-local map and are lost on restart; suits
//! tests and single-node deployments. Production deployments swap in a
//! persistent implementation of the same port.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::ports::{
    DeviceRegistration, RegistrationOutcome, RegistrationStore, RegistrationStoreError,
};

type RegistrationKey = (String, String);

/// [`RegistrationStore`] backed by an in-process map.
#[derive(Debug, Default)]
pub struct InMemoryRegistrationStore {
    registrations: RwLock<HashMap<RegistrationKey, DeviceRegistration>>,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(device_library_id: &str, serial_number: &str) -> RegistrationKey {
        (device_library_id.to_string(), serial_number.to_string())
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn register(
        &self,
        registration: DeviceRegistration,
    ) -> Result<RegistrationOutcome, RegistrationStoreError> {
        let key = Self::key(&registration.device_library_id, &registration.serial_number);
        let mut registrations = self
            .registrations
            .write()
            .map_err(|_| RegistrationStoreError::Backend("registration lock poisoned".into()))?;

        let outcome = if registrations.contains_key(&key) {
            RegistrationOutcome::AlreadyRegistered
        } else {
            RegistrationOutcome::Created
        };
        registrations.insert(key, registration);
        Ok(outcome)
    }

    async fn unregister(
        &self,
        device_library_id: &str,
        serial_number: &str,
    ) -> Result<bool, RegistrationStoreError> {
        let mut registrations = self
            .registrations
            .write()
            .map_err(|_| RegistrationStoreError::Backend("registration lock poisoned".into()))?;
        Ok(registrations
            .remove(&Self::key(device_library_id, serial_number))
            .is_some())
    }

    async fn find(
        &self,
        device_library_id: &str,
        serial_number: &str,
    ) -> Result<Option<DeviceRegistration>, RegistrationStoreError> {
        let registrations = self
            .registrations
            .read()
            .map_err(|_| RegistrationStoreError::Backend("registration lock poisoned".into()))?;
        Ok(registrations
            .get(&Self::key(device_library_id, serial_number))
            .cloned())
    }
}

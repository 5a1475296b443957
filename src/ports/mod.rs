//! Ports - trait seams between the application core and the outside world.

mod pass_signer;
mod registration_store;

pub use pass_signer::{PassSigner, SigningError};
pub use registration_store::{
    DeviceRegistration, RegistrationOutcome, RegistrationStore, RegistrationStoreError,
};

//! Storage adapters.

mod in_memory_registration_store;

pub use in_memory_registration_store::InMemoryRegistrationStore;

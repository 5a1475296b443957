//! Command and query handlers.

pub mod pass;

//! PollUpdatesHandler - query handler for pass-update polling.
//!
//! This service keeps no store of issued passes, so a valid poll always
//! answers "no update". The endpoint still authenticates so that token
//! probing behaves identically to a full implementation.

use secrecy::{ExposeSecret, Secret};

use crate::domain::pass::{PassIdentity, WebServiceError};

use super::register_device::authorize;

/// Query for the latest version of one pass.
#[derive(Debug, Clone)]
pub struct PollUpdatesQuery {
    pub pass_type_identifier: String,
    pub serial_number: String,
    pub auth_token: String,
}

/// Outcome of a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The pass has not changed since it was issued.
    NotModified,
}

/// Handler for pass-update polls.
pub struct PollUpdatesHandler {
    identity: PassIdentity,
    update_auth_secret: Secret<String>,
}

impl PollUpdatesHandler {
    pub fn new(identity: PassIdentity, update_auth_secret: Secret<String>) -> Self {
        Self {
            identity,
            update_auth_secret,
        }
    }

    pub async fn handle(&self, query: PollUpdatesQuery) -> Result<PollOutcome, WebServiceError> {
        authorize(
            &self.identity,
            self.update_auth_secret.expose_secret(),
            &query.pass_type_identifier,
            &query.serial_number,
            &query.auth_token,
        )?;

        Ok(PollOutcome::NotModified)
    }
}

//! HTTP adapter for pass endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PassAppState;
pub use routes::pass_router;

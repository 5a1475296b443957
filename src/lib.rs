//! Passforge - Apple Wallet loyalty pass issuing service
//!
//! This crate builds signed `.pkpass` bundles for merchant loyalty cards and
//! exposes the PassKit web-service endpoints (registration, update polling,
//! logging) needed to keep issued passes updatable.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

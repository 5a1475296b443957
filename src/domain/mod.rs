//! Domain layer - pure pass-construction logic.
//!
//! No I/O lives here; everything is deterministic and unit-testable.

pub mod pass;

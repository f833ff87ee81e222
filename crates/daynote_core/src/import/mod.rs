//! Import layer for exported note records.
//!
//! # Responsibility
//! - Turn raw, loosely-typed export JSON into validated `Note` values.
//!
//! # Invariants
//! - Import is pure: no file writes, no logging.
//! - Unknown export keys are ignored, never rejected.

pub mod record;

//! Note domain model.
//!
//! # Responsibility
//! - Define the normalized note record produced by the import layer.
//! - Keep note kind (plain vs checklist) explicit in the type.
//!
//! # Invariants
//! - Every `Note` has exactly one body kind, decided at import time.
//! - Edit time is always stored in UTC.

pub mod note;

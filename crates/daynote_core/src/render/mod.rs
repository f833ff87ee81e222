//! Markdown rendering for validated notes.
//!
//! # Responsibility
//! - Render one `Note` as a top-level bullet with sub-bullets.
//! - Derive the daily journal file a note belongs to.
//!
//! # Invariants
//! - Rendering is pure and deterministic; no I/O, no clock access.
//! - All dates and times are rendered in UTC.

pub mod daily;
pub mod markdown;

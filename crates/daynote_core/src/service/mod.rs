//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate import and rendering into the conversion use-case.
//! - Keep the CLI decoupled from file layout details.

pub mod convert_service;

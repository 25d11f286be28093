//! Core use-case services.
//!
//! # Responsibility
//! - Own the directory reconciliation engine that presentation layers call.
//! - Keep UI layers decoupled from storage and transport details.

pub mod directory;

//! Derived views over the in-memory collection.
//!
//! # Responsibility
//! - Expose stateless filter/sort functions the presentation layer renders
//!   from.
//! - Keep view shaping out of the reconciliation engine's mutation paths.

pub mod view;

//! Domain model for directory user records.
//!
//! # Responsibility
//! - Define the canonical record shape used by remote decode, local
//!   persistence and the in-memory collection alike.
//! - Keep boundary input/patch types next to the record they produce.
//!
//! # Invariants
//! - One struct serves every surface; there are no per-layer DTO copies.
//! - Deletion is a hard removal from the collection, never a tombstone.

pub mod user;

//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable local store contract the engine depends on.
//! - Isolate SQLite and JSON-codec details from reconciliation logic.
//!
//! # Invariants
//! - The durable store only ever holds locally-created records; callers
//!   enforce that, the store persists whatever list it is given wholesale.

pub mod local_user_repo;

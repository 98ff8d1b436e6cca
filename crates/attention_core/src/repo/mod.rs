//! Repository layer for durable worker state.
//!
//! # Responsibility
//! - Define the load/save contract over the single state record.
//! - Isolate SQLite query details from the cycle orchestration.
//!
//! # Invariants
//! - Repository APIs surface failures; swallowing them is the caller's policy.

pub mod state_repo;

//! Domain model for attention notifications.
//!
//! # Responsibility
//! - Define the records flowing through one check cycle: account, fetched
//!   change summaries, the persisted worker state and derived intents.
//!
//! # Invariants
//! - Only `WorkerState` is ever persisted; every other type is transient.

pub mod account;
pub mod change;
pub mod intent;
pub mod state;

//! Check-cycle building blocks.
//!
//! # Responsibility
//! - State loading/saving policy (failures degrade, never propagate).
//! - Throttle decision, relevance filter and notification grouping.
//!
//! # Invariants
//! - Everything here is host-agnostic; host primitives arrive as traits.

pub mod filter;
pub mod grouping;
pub mod state_manager;
pub mod throttle;

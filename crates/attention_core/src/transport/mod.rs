//! Remote change-list transport.
//!
//! # Responsibility
//! - Query the remote list endpoint for changes in the caller's attention set.
//! - Decode the remote wire format into `ChangeSummary` records.
//!
//! # Invariants
//! - No relevance filtering happens here; callers receive every decoded change.

pub mod http;
pub mod wire;

pub use http::{
    authenticated_change_query_url, change_query_url, HttpChangeSource, HttpCredentials,
};
pub use wire::{parse_change_list, parse_timestamp_ms, XSSI_PREFIX};

//! Failure types reported by host capabilities.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Remote fetch failure. Aborts the cycle with zero notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    InvalidRequest(String),
    Transport(String),
    Status(u16),
    Decode(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest(message) => write!(f, "invalid change query: {message}"),
            Self::Transport(message) => write!(f, "change fetch failed: {message}"),
            Self::Status(code) => write!(f, "change fetch returned HTTP {code}"),
            Self::Decode(message) => write!(f, "cannot decode change list: {message}"),
        }
    }
}

impl Error for FetchError {}

/// Notification presentation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationError {
    PermissionDenied,
    Unavailable(String),
}

impl Display for PresentationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "notification permission denied"),
            Self::Unavailable(message) => write!(f, "notifications unavailable: {message}"),
        }
    }
}

impl Error for PresentationError {}

/// Window enumeration/open/focus failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    Enumerate(String),
    Open(String),
    Focus(String),
}

impl Display for RoutingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enumerate(message) => write!(f, "cannot enumerate windows: {message}"),
            Self::Open(message) => write!(f, "cannot open window: {message}"),
            Self::Focus(message) => write!(f, "cannot focus window: {message}"),
        }
    }
}

impl Error for RoutingError {}

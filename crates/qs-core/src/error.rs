//! Error types for the address-bar bindings and option parsing.
//!
//! The codec itself (`parse`, `stringify`, `parse_url`, `stringify_url`) never
//! fails; only operations that touch the host or interpret user-supplied names
//! return these errors.

use std::fmt;

use thiserror::Error;

/// A host capability required by the address-bar bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPrimitive {
    /// Read access to the current origin, path and search string.
    Location,
    /// Replacing the current address without adding a history entry.
    History,
}

impl fmt::Display for HostPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostPrimitive::Location => f.write_str("address accessor"),
            HostPrimitive::History => f.write_str("history replacement"),
        }
    }
}

/// Errors that can occur when talking to the host or reading options.
#[derive(Error, Debug)]
pub enum QsError {
    /// The host does not provide a primitive the operation depends on.
    #[error("{operation}() requires a browsing-context host, but its {primitive} is unavailable")]
    HostUnavailable {
        operation: &'static str,
        primitive: HostPrimitive,
    },

    /// The host refused to replace the current address.
    #[error("host rejected address replacement: {0}")]
    ReplaceRejected(String),

    /// An address could not be parsed as an absolute URL.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] url::ParseError),

    /// An array format name other than `none`, `bracket`, `index` or `comma`.
    #[error("unknown array format '{0}' (expected none, bracket, index or comma)")]
    UnknownArrayFormat(String),
}

/// Convenience alias used throughout qs-core.
pub type Result<T> = std::result::Result<T, QsError>;

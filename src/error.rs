//! Error types for metric delivery.
//!
//! Every failure on the send path ends up in a [`SendError`] handed to the
//! configured error hook. None of these are ever returned to the host server.

use std::io;
use thiserror::Error;

// ============================================================================
// Send Errors (datagram delivery)
// ============================================================================

/// Errors reported by the UDP send primitive.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("failed to bind outbound UDP socket: {0}")]
    Bind(#[source] io::Error),

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("payload of {len} bytes exceeds the {max} byte datagram limit")]
    Oversized { len: usize, max: usize },

    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("no IPv4 address found for {host}")]
    NoAddress { host: String },

    #[error("send failed: {0}")]
    Io(#[from] io::Error),
}

impl SendError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Bind(_) => "bind",
            Self::Serialize(_) => "serialize",
            Self::Oversized { .. } => "oversized",
            Self::Resolve { .. } => "resolve",
            Self::NoAddress { .. } => "no_address",
            Self::Io(_) => "io",
        }
    }
}

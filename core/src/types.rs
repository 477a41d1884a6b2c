use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of the codec produced a status code.
/// The two status spaces are disjoint and never cross-translated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Compress,
    Decompress,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Compress   => f.write_str("compress"),
            Direction::Decompress => f.write_str("decompress"),
        }
    }
}

/// Unified stream error.
/// - Resource exhaustion (`AllocationFailed`, `BufferLimitExceeded`) is kept apart
///   from `CodecFault` so callers can tell a full sink from malformed data.
/// - `InternalInvariantViolation` means the wrapped codec broke its contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Bad level/profile pair, bad window bits, bad config document.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Scratch or output buffer could not be allocated.
    #[error("insufficient memory for buffer allocation ({requested} bytes)")]
    AllocationFailed { requested: usize },

    /// Output hit its configured maximum and still needs room.
    #[error("output buffer limit of {limit} bytes exceeded")]
    BufferLimitExceeded { limit: usize },

    /// Any non-Ok status reported by the codec.
    #[error("Error {code} {message}")]
    CodecFault {
        code: i32,
        direction: Direction,
        message: &'static str,
    },

    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(&'static str),
}

impl StreamError {
    /// True for errors caused by running out of room rather than by the data.
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(
            self,
            StreamError::AllocationFailed { .. } | StreamError::BufferLimitExceeded { .. }
        )
    }

    /// Raw codec status, if this error came from the codec.
    pub fn codec_code(&self) -> Option<(Direction, i32)> {
        match self {
            StreamError::CodecFault { code, direction, .. } => Some((*direction, *code)),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(e: serde_json::Error) -> Self {
        StreamError::InvalidConfiguration(e.to_string())
    }
}

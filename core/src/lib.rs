//! deflate-core
//!
//! Streaming deflate/gzip/zlib over bounded codec transfer units.
//! Pure Rust, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

pub mod compression;
pub mod telemetry;

// Drive loop and public API
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{MemoryProfile, Wrapper};
    pub use crate::constants::wrapper_ids;
    pub use crate::stream::{
        compress_stream, compress_with, decompress_stream, decompress_with, ApiConfig,
        CompressParams, DecompressParams, StreamOutput,
    };
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::{Direction, StreamError};
}

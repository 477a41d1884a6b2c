//! compression/mod.rs
//! Codec side of the drive loop.
//!
//! - `sizing`: level-buffer size per compression level and memory profile.
//! - `status`: raw codec status codes to `StreamError`.
//! - `codecs`: the `StreamCodec` capability and its flate2-backed sessions.

pub mod constants;
pub mod types;
pub mod sizing;
pub mod status;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use sizing::{minimum_for, profile_from_raw, resolve, resolve_raw};
pub use status::{message_for, translate};

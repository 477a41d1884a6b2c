//! compression/codecs/mod.rs
//! The codec capability driven by the stream loop, and its deflate-backed
//! implementations.
//!
//! The driver never looks inside a codec: it hands over an input slice and an
//! output window, reads back how much moved, and asks whether the terminal
//! phase has been reached.

pub mod deflate;
pub mod gzip;
pub mod inflate;

pub use deflate::*;
pub use inflate::*;

use crate::compression::types::{FlushMode, StepResult};
use crate::types::Direction;

// Require Send so independent sessions can live on separate threads.
pub trait StreamCodec: Send {
    /// Which status table this codec's codes belong to.
    fn direction(&self) -> Direction;

    /// Advance the codec once. `consumed` and `written` count bytes taken from
    /// the front of `input` and placed at the front of `output`.
    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
        end_of_stream: bool,
    ) -> StepResult;

    /// True once no more output will ever be produced for this stream.
    fn is_terminal(&self) -> bool;
}

/// Copy as much of `pending[*pos..]` into `output` as fits; returns bytes copied.
pub(crate) fn drain_into(pending: &[u8], pos: &mut usize, output: &mut [u8]) -> usize {
    let n = (pending.len() - *pos).min(output.len());
    output[..n].copy_from_slice(&pending[*pos..*pos + n]);
    *pos += n;
    n
}

/// Byte counters of a flate2 engine, as `usize` deltas.
pub(crate) fn delta(after: u64, before: u64) -> usize {
    usize::try_from(after.saturating_sub(before)).unwrap_or(usize::MAX)
}

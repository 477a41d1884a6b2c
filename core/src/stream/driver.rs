//! stream/driver.rs
//! The drive loop: feeds input slices and output windows to a codec until the
//! input is exhausted and the codec has reached its terminal phase.
//!
//! Per outer pass the cursor hands out one slice. The inner loop keeps calling
//! the codec on that slice while it completely fills the output window, so a
//! codec is never starved of room. Any non-Ok status aborts the call and the
//! partially filled output is dropped with it.

use tracing::{debug, warn};

use crate::compression::codecs::StreamCodec;
use crate::compression::status::translate;
use crate::compression::types::FlushMode;
use crate::stream::input::InputCursor;
use crate::stream::output::OutputArranger;
use crate::telemetry::DriveCounters;
use crate::types::StreamError;

/// Successful result of one drive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveOutcome {
    pub data: Vec<u8>,
    /// Input bytes the codec never looked at because its stream had ended.
    pub unused_input: usize,
}

pub fn drive<C: StreamCodec + ?Sized>(
    codec: &mut C,
    mut input: InputCursor<'_>,
    mut output: OutputArranger,
    counters: &mut DriveCounters,
) -> Result<DriveOutcome, StreamError> {
    let direction = codec.direction();
    let mut unused_input = 0;

    while !codec.is_terminal() {
        let mut slice = input.next_slice();
        counters.add_slice();
        let end_of_stream = input.is_drained();
        let flush = if end_of_stream { FlushMode::FullFlush } else { FlushMode::NoFlush };
        let mut progressed = false;

        loop {
            let window = output.ensure_window()?;
            let window_len = window.len();
            let r = codec.step(slice, window, flush, end_of_stream);

            if r.consumed > slice.len() || r.written > window_len {
                return Err(StreamError::InternalInvariantViolation(
                    "codec reported more bytes than it was given",
                ));
            }
            output.commit(r.written)?;
            counters.add_step(r.consumed, r.written);
            slice = &slice[r.consumed..];
            progressed |= r.consumed > 0 || r.written > 0;

            if let Some(err) = translate(r.code, direction) {
                warn!(%direction, code = r.code, offset = input.offset() - slice.len(), "codec fault");
                return Err(err);
            }
            if codec.is_terminal() || r.written < window_len {
                break;
            }
        }

        if codec.is_terminal() {
            unused_input = slice.len() + input.remaining();
            break;
        }
        if !slice.is_empty() {
            return Err(StreamError::InternalInvariantViolation(
                "codec left input unconsumed with output room to spare",
            ));
        }
        if end_of_stream && !progressed {
            return Err(StreamError::InternalInvariantViolation(
                "codec made no progress at end of stream",
            ));
        }
    }

    counters.growth_events = output.growth_events();
    counters.unused_input = unused_input as u64;
    debug!(
        %direction,
        bytes_in = counters.bytes_in,
        bytes_out = output.written(),
        growths = counters.growth_events,
        unused_input,
        "stream finished"
    );

    Ok(DriveOutcome {
        data: output.finish(),
        unused_input,
    })
}

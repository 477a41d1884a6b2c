//! stream/output.rs
//! Growable output sink.
//!
//! Capacity starts at `min(initial, max)`, doubles when the occupied region
//! reaches it, and is clamped to `max`. Contents survive every growth; a failed
//! growth leaves the existing bytes untouched.

use tracing::trace;

use crate::constants::MAX_TRANSFER_UNIT;
use crate::types::StreamError;

/// Capacity to grow to once `occupied` has reached `capacity`.
///
/// Doubles while that stays within `max`, otherwise jumps to `max`. Fails when
/// the buffer is already at `max`.
pub fn next_capacity(capacity: usize, occupied: usize, max: usize) -> Result<usize, StreamError> {
    if occupied < capacity {
        return Ok(capacity);
    }
    if capacity >= max {
        return Err(StreamError::BufferLimitExceeded { limit: max });
    }
    Ok(if capacity <= max / 2 { capacity * 2 } else { max })
}

#[derive(Debug)]
pub struct OutputArranger {
    buf: Option<Vec<u8>>,
    occupied: usize,
    initial: usize,
    max_length: usize,
    growths: u64,
}

impl OutputArranger {
    pub fn new(initial: usize, max_length: usize) -> Result<Self, StreamError> {
        if initial == 0 || max_length == 0 {
            return Err(StreamError::InvalidConfiguration(format!(
                "output sizes must be positive (initial {}, max {})",
                initial, max_length
            )));
        }
        Ok(Self {
            buf: None,
            occupied: 0,
            initial,
            max_length,
            growths: 0,
        })
    }

    /// Writable region after the occupied bytes. Allocates on first use and
    /// grows when full.
    pub fn ensure_window(&mut self) -> Result<&mut [u8], StreamError> {
        let capacity = self.capacity();
        if self.buf.is_none() {
            let mut buf = Vec::new();
            resize_to(&mut buf, self.initial.min(self.max_length))?;
            self.buf = Some(buf);
        } else if self.occupied == capacity {
            let target = next_capacity(capacity, self.occupied, self.max_length)?;
            if let Some(buf) = self.buf.as_mut() {
                resize_to(buf, target)?;
            }
            self.growths += 1;
            trace!(from = capacity, to = target, occupied = self.occupied, "output buffer grown");
        }

        let occupied = self.occupied;
        match self.buf.as_mut() {
            Some(buf) => {
                let end = buf.len().min(occupied.saturating_add(MAX_TRANSFER_UNIT));
                Ok(&mut buf[occupied..end])
            }
            None => Err(StreamError::InternalInvariantViolation("output buffer missing")),
        }
    }

    /// Mark `written` bytes of the last window as occupied.
    pub fn commit(&mut self, written: usize) -> Result<(), StreamError> {
        let occupied = self.occupied.checked_add(written).filter(|&o| o <= self.capacity());
        match occupied {
            Some(o) => {
                self.occupied = o;
                Ok(())
            }
            None => Err(StreamError::InternalInvariantViolation(
                "codec reported more output than the window held",
            )),
        }
    }

    pub fn written(&self) -> usize {
        self.occupied
    }

    pub fn capacity(&self) -> usize {
        self.buf.as_ref().map_or(0, Vec::len)
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn growth_events(&self) -> u64 {
        self.growths
    }

    /// Hand the occupied bytes to the caller.
    pub fn finish(self) -> Vec<u8> {
        let mut buf = self.buf.unwrap_or_default();
        buf.truncate(self.occupied);
        buf
    }
}

/// Grow `buf` to exactly `len` zeroed bytes; on failure `buf` is untouched.
fn resize_to(buf: &mut Vec<u8>, len: usize) -> Result<(), StreamError> {
    buf.try_reserve_exact(len.saturating_sub(buf.len()))
        .map_err(|_| StreamError::AllocationFailed { requested: len })?;
    buf.resize(len, 0);
    Ok(())
}

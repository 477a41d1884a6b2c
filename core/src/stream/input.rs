//! stream/input.rs
//! Borrowed cursor that hands input out in codec-sized slices.

use crate::constants::MAX_TRANSFER_UNIT;

/// Read position over a borrowed payload.
///
/// Each slice is at most `unit` bytes; `unit` defaults to the transfer
/// ceiling and only differs when a caller wants smaller windows.
#[derive(Debug, Clone)]
pub struct InputCursor<'a> {
    data: &'a [u8],
    remaining: usize,
    unit: usize,
}

impl<'a> InputCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_unit(data, MAX_TRANSFER_UNIT)
    }

    /// A zero unit is bumped to one byte.
    pub fn with_unit(data: &'a [u8], unit: usize) -> Self {
        Self {
            data,
            remaining: data.len(),
            unit: unit.clamp(1, MAX_TRANSFER_UNIT),
        }
    }

    /// Next slice of at most `unit` bytes. Empty once drained.
    pub fn next_slice(&mut self) -> &'a [u8] {
        let offset = self.data.len() - self.remaining;
        let len = self.remaining.min(self.unit);
        self.remaining -= len;
        &self.data[offset..offset + len]
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn offset(&self) -> usize {
        self.data.len() - self.remaining
    }

    /// True when no bytes are left to hand out.
    pub fn is_drained(&self) -> bool {
        self.remaining == 0
    }

    pub fn unit(&self) -> usize {
        self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_payload_in_order() {
        let data: Vec<u8> = (0..10).collect();
        let mut cur = InputCursor::with_unit(&data, 4);
        assert_eq!(cur.next_slice(), &[0, 1, 2, 3]);
        assert!(!cur.is_drained());
        assert_eq!(cur.next_slice(), &[4, 5, 6, 7]);
        assert_eq!(cur.next_slice(), &[8, 9]);
        assert!(cur.is_drained());
        assert!(cur.next_slice().is_empty());
        assert_eq!(cur.offset(), 10);
    }

    #[test]
    fn empty_payload_is_drained_immediately() {
        let mut cur = InputCursor::new(&[]);
        assert!(cur.is_drained());
        assert!(cur.next_slice().is_empty());
    }

    #[test]
    fn default_unit_is_transfer_ceiling() {
        let cur = InputCursor::new(b"abc");
        assert_eq!(cur.unit(), MAX_TRANSFER_UNIT);
        assert_eq!(InputCursor::with_unit(b"abc", 0).unit(), 1);
    }
}

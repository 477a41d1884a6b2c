//! telemetry/counters.rs
//! Mutable counters filled in while a drive loop runs.
//!
//! Converted into an immutable `TelemetrySnapshot` once the call ends.
use serde::{Deserialize, Serialize};

/// Deterministic counters for one drive call.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveCounters {
    /// Input slices handed out by the cursor.
    pub slices: u64,
    /// Codec step invocations.
    pub steps: u64,
    /// Output buffer reallocations after the first allocation.
    pub growth_events: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// Input bytes left behind the codec's terminal phase.
    pub unused_input: u64,
    pub scratch_bytes: u64,
}

impl DriveCounters {
    /// Record one input slice pulled from the cursor.
    pub fn add_slice(&mut self) {
        self.slices += 1;
    }

    /// Record one codec step.
    pub fn add_step(&mut self, consumed: usize, written: usize) {
        self.steps += 1;
        self.bytes_in += consumed as u64;
        self.bytes_out += written as u64;
    }
}

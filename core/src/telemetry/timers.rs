//! telemetry/timers.rs
//! Wall-clock split of one drive call.
//!
//! A call has two phases: setup (validation, scratch and output allocation)
//! and the drive loop itself. Everything else falls into `elapsed`.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTimes {
    pub setup: Duration,
    pub drive: Duration,
}

impl PhaseTimes {
    pub fn total(&self) -> Duration {
        self.setup + self.drive
    }
}

#[derive(Clone, Debug)]
pub struct TelemetryTimer {
    start: Instant,
    end: Option<Instant>,
    phases: PhaseTimes,
}

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            end: None,
            phases: PhaseTimes::default(),
        }
    }

    /// Run the setup closure, charging its wall time to `setup`.
    pub fn setup<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let t = Instant::now();
        let out = f();
        self.phases.setup += t.elapsed();
        out
    }

    /// Run the drive closure, charging its wall time to `drive`.
    pub fn drive<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let t = Instant::now();
        let out = f();
        self.phases.drive += t.elapsed();
        out
    }

    pub fn finish(&mut self) {
        self.end = Some(Instant::now());
    }

    pub fn phases(&self) -> PhaseTimes {
        self.phases
    }

    /// Time since `new`, frozen by `finish`.
    pub fn elapsed(&self) -> Duration {
        self.end.unwrap_or_else(Instant::now).duration_since(self.start)
    }
}

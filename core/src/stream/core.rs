//! stream/core.rs
//! Stable public API: one-shot compression and decompression of an in-memory
//! payload.

use serde::{Deserialize, Serialize};

use crate::compression::codecs::{DeflateCodec, InflateCodec};
use crate::compression::sizing::{profile_from_raw, resolve};
use crate::compression::types::MemoryProfile;
use crate::constants::{
    wrapper_ids, DEF_BUF_SIZE, MAX_TRANSFER_UNIT, MAX_WINDOW_BITS, MIN_WINDOW_BITS, UNBOUNDED_OUTPUT,
};
use crate::stream::driver::drive;
use crate::stream::input::InputCursor;
use crate::stream::output::OutputArranger;
use crate::stream::scratch::ScratchBuffer;
use crate::telemetry::{DriveCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{Direction, StreamError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressParams {
    /// 0..=3.
    pub level: i32,
    /// Wrapper id, see [`wrapper_ids`].
    pub flags: u16,
    pub profile: MemoryProfile,
    /// 0 selects the default window.
    pub window_bits: u16,
}

impl Default for CompressParams {
    fn default() -> Self {
        Self {
            level: 2,
            flags: wrapper_ids::GZIP,
            profile: MemoryProfile::Default,
            window_bits: 0,
        }
    }
}

impl CompressParams {
    /// Level and profile must name a row of the level-buffer table. Flags and
    /// window bits are left to the codec, which reports them as status codes.
    pub fn validate(&self) -> Result<(), StreamError> {
        resolve(self.level, self.profile).map(|_| ())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompressParams {
    pub flags: u16,
    pub window_bits: u16,
}

impl Default for DecompressParams {
    fn default() -> Self {
        Self { flags: wrapper_ids::AUTO, window_bits: 0 }
    }
}

impl DecompressParams {
    pub fn validate(&self) -> Result<(), StreamError> {
        validate_window_bits(self.window_bits)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// First output allocation.
    pub initial_buffer: usize,

    /// Output ceiling.
    /// - `None` → unbounded.
    /// - `Some(n)` → `BufferLimitExceeded` once more than `n` bytes are needed.
    pub max_output: Option<usize>,

    /// Largest input slice handed to the codec per call.
    pub transfer_unit: usize,

    /// Attach a `TelemetrySnapshot` to the result.
    pub collect_telemetry: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            initial_buffer: DEF_BUF_SIZE,
            max_output: None,
            transfer_unit: MAX_TRANSFER_UNIT,
            collect_telemetry: false,
        }
    }
}

impl ApiConfig {
    pub fn new(max_output: Option<usize>, collect_telemetry: bool) -> Self {
        Self { max_output, collect_telemetry, ..Self::default() }
    }

    pub fn with_telemetry() -> Self {
        Self::new(None, true)
    }

    /// Missing fields take their defaults.
    pub fn from_json(doc: &str) -> Result<Self, StreamError> {
        let cfg: ApiConfig = serde_json::from_str(doc)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        if self.initial_buffer == 0 {
            return Err(StreamError::InvalidConfiguration("initial_buffer must be positive".into()));
        }
        if self.max_output == Some(0) {
            return Err(StreamError::InvalidConfiguration("max_output must be positive".into()));
        }
        if self.transfer_unit == 0 || self.transfer_unit > MAX_TRANSFER_UNIT {
            return Err(StreamError::InvalidConfiguration(format!(
                "transfer_unit must be in 1..={}",
                MAX_TRANSFER_UNIT
            )));
        }
        Ok(())
    }

    pub fn max_length(&self) -> usize {
        self.max_output.unwrap_or(UNBOUNDED_OUTPUT)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamOutput {
    pub data: Vec<u8>,
    /// Bytes after the end of the compressed stream (decompression only).
    pub unused_input: usize,
    pub telemetry: Option<TelemetrySnapshot>,
}

fn validate_window_bits(window_bits: u16) -> Result<(), StreamError> {
    if window_bits != 0 && !(MIN_WINDOW_BITS..=MAX_WINDOW_BITS).contains(&window_bits) {
        return Err(StreamError::InvalidConfiguration(format!(
            "window bits {} outside {}..={}",
            window_bits, MIN_WINDOW_BITS, MAX_WINDOW_BITS
        )));
    }
    Ok(())
}

/// Compress `payload` in one call.
pub fn compress_with(
    payload: &[u8],
    params: &CompressParams,
    config: &ApiConfig,
) -> Result<StreamOutput, StreamError> {
    params.validate()?;
    config.validate()?;

    let mut timer = TelemetryTimer::new();
    let mut counters = DriveCounters::default();

    let (mut scratch, output) = timer.setup(|| {
        let scratch = ScratchBuffer::for_level(params.level, params.profile)?;
        let output = OutputArranger::new(config.initial_buffer, config.max_length())?;
        Ok::<_, StreamError>((scratch, output))
    })?;
    counters.scratch_bytes = scratch.len() as u64;

    let outcome = {
        let mut codec = DeflateCodec::new(
            params.level,
            params.flags,
            params.window_bits,
            scratch.as_mut_slice(),
        );
        let input = InputCursor::with_unit(payload, config.transfer_unit);
        timer.drive(|| drive(&mut codec, input, output, &mut counters))?
    };
    timer.finish();

    Ok(StreamOutput {
        data: outcome.data,
        unused_input: outcome.unused_input,
        telemetry: config
            .collect_telemetry
            .then(|| TelemetrySnapshot::from(Direction::Compress, &counters, &timer)),
    })
}

/// Host-facing compression entry point with raw values.
///
/// `profile` is a raw [`MemoryProfile`] value; `flags` a wrapper id.
pub fn compress_stream(
    payload: &[u8],
    level: i32,
    flags: u16,
    profile: u8,
    window_bits: u16,
) -> Result<Vec<u8>, StreamError> {
    let params = CompressParams {
        level,
        flags,
        profile: profile_from_raw(profile)?,
        window_bits,
    };
    compress_with(payload, &params, &ApiConfig::default()).map(|out| out.data)
}

/// Decompress `payload` in one call.
pub fn decompress_with(
    payload: &[u8],
    params: &DecompressParams,
    config: &ApiConfig,
) -> Result<StreamOutput, StreamError> {
    params.validate()?;
    config.validate()?;

    let mut timer = TelemetryTimer::new();
    let mut counters = DriveCounters::default();

    let output = timer.setup(|| OutputArranger::new(config.initial_buffer, config.max_length()))?;
    let mut codec = InflateCodec::new(params.flags);

    let input = InputCursor::with_unit(payload, config.transfer_unit);
    let outcome = timer.drive(|| drive(&mut codec, input, output, &mut counters))?;
    timer.finish();

    Ok(StreamOutput {
        data: outcome.data,
        unused_input: outcome.unused_input,
        telemetry: config
            .collect_telemetry
            .then(|| TelemetrySnapshot::from(Direction::Decompress, &counters, &timer)),
    })
}

/// Host-facing decompression entry point. Trailing bytes after the stream are
/// ignored; use [`decompress_with`] to see how many there were.
pub fn decompress_stream(payload: &[u8], flags: u16, window_bits: u16) -> Result<Vec<u8>, StreamError> {
    let params = DecompressParams { flags, window_bits };
    decompress_with(payload, &params, &ApiConfig::default()).map(|out| out.data)
}

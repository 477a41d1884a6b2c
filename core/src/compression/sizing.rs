//! compression/sizing.rs
//! Level-buffer size lookup keyed by compression level × memory profile.

use num_enum::TryFromPrimitive;

use crate::compression::constants::level_buf::*;
use crate::compression::constants::MAX_LEVEL;
use crate::compression::types::MemoryProfile;
use crate::types::StreamError;
use crate::utils::enum_name_or_hex;

fn tier(profile: MemoryProfile) -> usize {
    match profile {
        MemoryProfile::Minimal    => TIER_MIN,
        MemoryProfile::Small      => TIER_SMALL,
        MemoryProfile::Medium     => TIER_MEDIUM,
        MemoryProfile::Large      => TIER_LARGE,
        MemoryProfile::ExtraLarge => TIER_EXTRA_LARGE,
        MemoryProfile::Default    => TIER_LARGE,
    }
}

fn required(level: i32) -> Option<usize> {
    match level {
        0 => Some(LVL0_REQ),
        1 => Some(LVL1_REQ),
        2 => Some(LVL2_REQ),
        3 => Some(LVL3_REQ),
        _ => None,
    }
}

/// Resolve the scratch size for `(level, profile)`.
///
/// Every supported pair maps to exactly one positive size; anything else is
/// `InvalidConfiguration`.
pub fn resolve(level: i32, profile: MemoryProfile) -> Result<usize, StreamError> {
    let req = required(level).ok_or_else(|| {
        StreamError::InvalidConfiguration(format!(
            "invalid memory level or compression level: level {} (supported 0..={})",
            level, MAX_LEVEL
        ))
    })?;
    Ok(req + TOKEN_SIZE * tier(profile) * K)
}

/// Decode a raw profile value coming from a host.
pub fn profile_from_raw(raw: u8) -> Result<MemoryProfile, StreamError> {
    MemoryProfile::try_from_primitive(raw).map_err(|_| {
        StreamError::InvalidConfiguration(format!(
            "invalid memory level or compression level: profile {}",
            enum_name_or_hex::<MemoryProfile>(raw)
        ))
    })
}

/// Same as [`resolve`] for a raw profile value.
pub fn resolve_raw(level: i32, profile: u8) -> Result<usize, StreamError> {
    resolve(level, profile_from_raw(profile)?)
}

/// Smallest scratch buffer the codec accepts for `level`.
pub fn minimum_for(level: i32) -> Option<usize> {
    resolve(level, MemoryProfile::Minimal).ok()
}

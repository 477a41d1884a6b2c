//! compression/types.rs
//! Codec-facing enums: memory profiles, wrappers, flush modes and status kinds.
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::compression::constants::{comp_status, decomp_status};
use crate::constants::wrapper_ids;

/// Working-buffer size tier.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryProfile {
    #[default]
    Default    = 0,
    Minimal    = 1,
    Small      = 2,
    Medium     = 3,
    Large      = 4,
    ExtraLarge = 5,
}

impl MemoryProfile {
    pub const ALL: [MemoryProfile; 6] = [
        MemoryProfile::Default,
        MemoryProfile::Minimal,
        MemoryProfile::Small,
        MemoryProfile::Medium,
        MemoryProfile::Large,
        MemoryProfile::ExtraLarge,
    ];
}

/// Stream wrapper selected by the passthrough `flags`.
#[repr(u16)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wrapper {
    /// Raw deflate, no header or trailer.
    Deflate   = wrapper_ids::DEFLATE,
    #[default]
    Gzip      = wrapper_ids::GZIP,
    GzipNoHdr = wrapper_ids::GZIP_NO_HDR,
    Zlib      = wrapper_ids::ZLIB,
    ZlibNoHdr = wrapper_ids::ZLIB_NO_HDR,
    /// Decompression only.
    Auto      = wrapper_ids::AUTO,
}

/// Flush instruction for one codec step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlushMode {
    /// Hold back buffered data.
    NoFlush,
    /// Emit everything buffered; combined with end-of-stream it closes the stream.
    FullFlush,
}

/// Outcome of a single codec step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepResult {
    /// Bytes taken from the front of the input slice.
    pub consumed: usize,
    /// Bytes written to the front of the output window.
    pub written: usize,
    /// Raw status code of the step's direction.
    pub code: i32,
}

impl StepResult {
    pub fn ok(consumed: usize, written: usize) -> Self {
        Self { consumed, written, code: 0 }
    }

    pub fn fault(consumed: usize, written: usize, code: i32) -> Self {
        Self { consumed, written, code }
    }
}

/// Compress-side status kinds.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum CompressStatus {
    Ok                  = comp_status::COMP_OK,
    OutputOverflow      = comp_status::STATELESS_OVERFLOW,
    InvalidState        = comp_status::INVALID_STATE,
    InvalidLevel        = comp_status::INVALID_LEVEL,
    LevelBufferTooSmall = comp_status::INVALID_LEVEL_BUF,
    InvalidFlush        = comp_status::INVALID_FLUSH,
    InvalidParam        = comp_status::INVALID_PARAM,
    InvalidOperation    = comp_status::INVALID_OPERATION,
}

/// Decompress-side status kinds.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum DecompressStatus {
    Ok                = decomp_status::DECOMP_OK,
    EndOfInput        = decomp_status::END_INPUT,
    OutputOverflow    = decomp_status::OUT_OVERFLOW,
    NameOverflow      = decomp_status::NAME_OVERFLOW,
    CommentOverflow   = decomp_status::COMMENT_OVERFLOW,
    ExtraOverflow     = decomp_status::EXTRA_OVERFLOW,
    NeedDictionary    = decomp_status::NEED_DICT,
    InvalidBlock      = decomp_status::INVALID_BLOCK,
    InvalidSymbol     = decomp_status::INVALID_SYMBOL,
    InvalidLookback   = decomp_status::INVALID_LOOKBACK,
    InvalidWrapper    = decomp_status::INVALID_WRAPPER,
    UnsupportedMethod = decomp_status::UNSUPPORTED_METHOD,
    ChecksumMismatch  = decomp_status::INCORRECT_CHECKSUM,
}

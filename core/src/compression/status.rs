//! compression/status.rs
//! Codec status → stream error translation.
//!
//! Two immutable tables, one per direction. Pure lookup: no allocation, no state.

use crate::compression::constants::{comp_status::*, decomp_status::*};
use crate::types::{Direction, StreamError};

static COMPRESS_MESSAGES: &[(i32, &str)] = &[
    (INVALID_FLUSH,      "Invalid flush type"),
    (INVALID_PARAM,      "Invalid parameter"),
    (STATELESS_OVERFLOW, "Not enough room in output buffer"),
    (INVALID_OPERATION,  "Invalid operation"),
    (INVALID_STATE,      "Invalid state"),
    (INVALID_LEVEL,      "Invalid compression level."),
    (INVALID_LEVEL_BUF,  "Level buffer too small."),
];

static DECOMPRESS_MESSAGES: &[(i32, &str)] = &[
    (END_INPUT,          "End of input reached"),
    (OUT_OVERFLOW,       "End of output reached"),
    (NAME_OVERFLOW,      "End of gzip name buffer reached"),
    (COMMENT_OVERFLOW,   "End of gzip comment buffer reached"),
    (EXTRA_OVERFLOW,     "End of extra buffer reached"),
    (NEED_DICT,          "Dictionary needed to continue"),
    (INVALID_BLOCK,      "Invalid deflate block found"),
    (INVALID_SYMBOL,     "Invalid deflate symbol found"),
    (INVALID_LOOKBACK,   "Invalid lookback distance found"),
    (INVALID_WRAPPER,    "Invalid gzip/zlib wrapper found"),
    (UNSUPPORTED_METHOD, "Gzip/zlib wrapper specifies unsupported compress method"),
    (INCORRECT_CHECKSUM, "Incorrect checksum found"),
];

const COMPRESS_UNKNOWN: &str = "Unknown Error";
const DECOMPRESS_UNKNOWN: &str = "Unknown error";

/// Human-readable reason for `code` in `direction`. `None` for Ok.
pub fn message_for(code: i32, direction: Direction) -> Option<&'static str> {
    if code == 0 {
        return None;
    }
    let (table, unknown) = match direction {
        Direction::Compress   => (COMPRESS_MESSAGES, COMPRESS_UNKNOWN),
        Direction::Decompress => (DECOMPRESS_MESSAGES, DECOMPRESS_UNKNOWN),
    };
    let msg = table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, m)| *m)
        .unwrap_or(unknown);
    Some(msg)
}

/// Translate a raw status into an error, or `None` when the step succeeded.
pub fn translate(code: i32, direction: Direction) -> Option<StreamError> {
    message_for(code, direction).map(|message| StreamError::CodecFault {
        code,
        direction,
        message,
    })
}

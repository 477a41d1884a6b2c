//! compression/constants.rs
//! Versioned codec constants: status codes and level-buffer tables.

/// Compress-side status codes.
pub mod comp_status {
    pub const COMP_OK: i32                = 0;
    pub const STATELESS_OVERFLOW: i32     = -1;
    pub const INVALID_STATE: i32          = -3;
    pub const INVALID_LEVEL: i32          = -4;
    pub const INVALID_LEVEL_BUF: i32      = -5;
    pub const INVALID_FLUSH: i32          = -7;
    pub const INVALID_PARAM: i32          = -8;
    pub const INVALID_OPERATION: i32      = -9;
}

/// Decompress-side status codes.
pub mod decomp_status {
    pub const DECOMP_OK: i32              = 0;
    pub const END_INPUT: i32              = 1;
    pub const OUT_OVERFLOW: i32           = 2;
    pub const NAME_OVERFLOW: i32          = 3;
    pub const COMMENT_OVERFLOW: i32       = 4;
    pub const EXTRA_OVERFLOW: i32         = 5;
    pub const NEED_DICT: i32              = 6;
    pub const INVALID_BLOCK: i32          = -1;
    pub const INVALID_SYMBOL: i32         = -2;
    pub const INVALID_LOOKBACK: i32       = -3;
    pub const INVALID_WRAPPER: i32        = -4;
    pub const UNSUPPORTED_METHOD: i32     = -5;
    pub const INCORRECT_CHECKSUM: i32     = -6;
}

/// Level-buffer sizing inputs.
pub mod level_buf {
    pub const K: usize = 1024;
    pub const TOKEN_SIZE: usize = 4;

    pub const LVL1_HASH_SIZE: usize = 8 * K;
    pub const LVL2_HASH_SIZE: usize = 32 * K;
    pub const LVL3_HASH_SIZE: usize = 32 * K;

    /// Fixed part each level needs before the token tier.
    pub const LVL0_REQ: usize = 0;
    pub const LVL1_REQ: usize = 4 * K + 2 * LVL1_HASH_SIZE;
    pub const LVL2_REQ: usize = 4 * K + 2 * LVL2_HASH_SIZE;
    pub const LVL3_REQ: usize = 4 * K + 4 * 4 * K + 2 * LVL3_HASH_SIZE;

    /// Token tiers, in units of K tokens.
    pub const TIER_MIN: usize = 1;
    pub const TIER_SMALL: usize = 16;
    pub const TIER_MEDIUM: usize = 32;
    pub const TIER_LARGE: usize = 64;
    pub const TIER_EXTRA_LARGE: usize = 128;
}

/// Highest supported compression level.
pub const MAX_LEVEL: i32 = 3;

/// flate2 level used for each supported level (index = level).
pub const FLATE_LEVELS: [u32; 4] = [1, 3, 6, 9];

/// gzip member framing.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
pub const GZIP_METHOD_DEFLATE: u8 = 8;
pub const GZIP_OS_UNKNOWN: u8 = 0xff;
pub const GZIP_HEADER_LEN: usize = 10;
pub const GZIP_TRAILER_LEN: usize = 8;
/// Longest FNAME / FCOMMENT accepted, terminator included.
pub const GZIP_FIELD_LIMIT: usize = 64 * 1024;
/// Longest FEXTRA payload accepted.
pub const GZIP_EXTRA_LIMIT: usize = 32 * 1024;

/// zlib framing.
pub const ZLIB_METHOD_DEFLATE: u8 = 8;
pub const ZLIB_MAX_CINFO: u8 = 7;
pub const ZLIB_FDICT: u8 = 0x20;
/// Big-endian Adler-32 of the uncompressed data.
pub const ZLIB_TRAILER_LEN: usize = 4;

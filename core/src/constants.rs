/// Initial output buffer size (16 KiB).
pub const DEF_BUF_SIZE: usize = 16 * 1024;

/// Largest chunk a single codec call can take in or hand out.
/// The codec's transfer fields are 32-bit.
pub const MAX_TRANSFER_UNIT: usize = u32::MAX as usize;

/// Output maximum when the caller does not set one.
pub const UNBOUNDED_OUTPUT: usize = usize::MAX;

/// Window bits used when the caller passes 0.
pub const DEFAULT_WINDOW_BITS: u16 = 15;
pub const MIN_WINDOW_BITS: u16 = 8;
pub const MAX_WINDOW_BITS: u16 = 15;

/// Wrapper identifiers passed through `flags` (mirrored from the codec ABI).
pub mod wrapper_ids {
    pub const DEFLATE: u16        = 0x0000;
    pub const GZIP: u16           = 0x0001;
    pub const GZIP_NO_HDR: u16    = 0x0002;
    pub const ZLIB: u16           = 0x0003;
    pub const ZLIB_NO_HDR: u16    = 0x0004;
    /// Decompression only: pick gzip or zlib from the leading bytes.
    pub const AUTO: u16           = 0x00ff;
}

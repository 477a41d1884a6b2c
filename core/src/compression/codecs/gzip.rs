//! compression/codecs/gzip.rs
//! gzip member framing (RFC 1952) around a raw deflate body.
//!
//! The deflate engine only speaks raw deflate and zlib; the gzip header and
//! trailer are written and checked here.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::compression::constants::decomp_status::{
    COMMENT_OVERFLOW, EXTRA_OVERFLOW, INCORRECT_CHECKSUM, INVALID_WRAPPER, NAME_OVERFLOW,
    UNSUPPORTED_METHOD,
};
use crate::compression::constants::{
    GZIP_EXTRA_LIMIT, GZIP_FIELD_LIMIT, GZIP_HEADER_LEN, GZIP_MAGIC, GZIP_METHOD_DEFLATE,
    GZIP_OS_UNKNOWN, GZIP_TRAILER_LEN,
};
use crate::utils::compute_crc32;

bitflags::bitflags! {
    /// gzip FLG byte. Bits 5..7 are reserved and must be zero.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GzipFlags: u8 {
        const FTEXT    = 0b0000_0001;
        const FHCRC    = 0b0000_0010;
        const FEXTRA   = 0b0000_0100;
        const FNAME    = 0b0000_1000;
        const FCOMMENT = 0b0001_0000;
    }
}

/// Fields of a parsed member header that callers may care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GzipHeaderInfo {
    /// Total header length in bytes, optional fields included.
    pub len: usize,
    pub flags: GzipFlags,
    pub mtime: u32,
    pub os: u8,
}

/// Minimal member header: no optional fields, mtime 0.
pub fn build_header(xfl: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(GZIP_HEADER_LEN);
    out.extend_from_slice(&GZIP_MAGIC);
    out.push(GZIP_METHOD_DEFLATE);
    out.push(GzipFlags::empty().bits());
    // Writes into a Vec cannot fail.
    let _ = out.write_u32::<LittleEndian>(0);
    out.push(xfl);
    out.push(GZIP_OS_UNKNOWN);
    out
}

/// CRC-32 then ISIZE (input length mod 2^32), both little-endian.
pub fn build_trailer(crc: u32, total_in: u64) -> [u8; GZIP_TRAILER_LEN] {
    let mut out = [0u8; GZIP_TRAILER_LEN];
    LittleEndian::write_u32(&mut out[0..4], crc);
    LittleEndian::write_u32(&mut out[4..8], total_in as u32);
    out
}

/// Verify a member trailer against what was actually inflated.
pub fn check_trailer(trailer: &[u8], crc: u32, total_out: u64) -> Result<(), i32> {
    if trailer.len() < GZIP_TRAILER_LEN {
        return Err(INVALID_WRAPPER);
    }
    let want_crc = LittleEndian::read_u32(&trailer[0..4]);
    let want_len = LittleEndian::read_u32(&trailer[4..8]);
    if want_crc != crc || want_len != total_out as u32 {
        return Err(INCORRECT_CHECKSUM);
    }
    Ok(())
}

enum Field {
    Complete(usize),
    NeedMore,
    TooLong,
}

/// Length of a zero-terminated field at the start of `buf`, terminator included.
fn zero_terminated(buf: &[u8], limit: usize) -> Field {
    let window = &buf[..buf.len().min(limit)];
    match window.iter().position(|b| *b == 0) {
        Some(pos) => Field::Complete(pos + 1),
        None if buf.len() >= limit => Field::TooLong,
        None => Field::NeedMore,
    }
}

/// Parse a member header from the bytes seen so far.
///
/// - `Ok(Some(info))`: header complete, body starts at `info.len`.
/// - `Ok(None)`: header is valid so far but more bytes are needed.
/// - `Err(code)`: decompress-side status describing the defect.
pub fn parse_header(buf: &[u8]) -> Result<Option<GzipHeaderInfo>, i32> {
    let magic_seen = buf.len().min(2);
    if buf[..magic_seen] != GZIP_MAGIC[..magic_seen] {
        return Err(INVALID_WRAPPER);
    }
    if buf.len() > 2 && buf[2] != GZIP_METHOD_DEFLATE {
        return Err(UNSUPPORTED_METHOD);
    }
    if buf.len() > 3 && GzipFlags::from_bits(buf[3]).is_none() {
        return Err(INVALID_WRAPPER);
    }
    if buf.len() < GZIP_HEADER_LEN {
        return Ok(None);
    }

    let flags = GzipFlags::from_bits_truncate(buf[3]);
    let mtime = LittleEndian::read_u32(&buf[4..8]);
    let os = buf[9];
    let mut off = GZIP_HEADER_LEN;

    if flags.contains(GzipFlags::FEXTRA) {
        if buf.len() < off + 2 {
            return Ok(None);
        }
        let xlen = LittleEndian::read_u16(&buf[off..off + 2]) as usize;
        if xlen > GZIP_EXTRA_LIMIT {
            return Err(EXTRA_OVERFLOW);
        }
        off += 2;
        if buf.len() < off + xlen {
            return Ok(None);
        }
        off += xlen;
    }

    for (flag, overflow) in [
        (GzipFlags::FNAME, NAME_OVERFLOW),
        (GzipFlags::FCOMMENT, COMMENT_OVERFLOW),
    ] {
        if flags.contains(flag) {
            match zero_terminated(&buf[off..], GZIP_FIELD_LIMIT) {
                Field::Complete(n) => off += n,
                Field::NeedMore => return Ok(None),
                Field::TooLong => return Err(overflow),
            }
        }
    }

    if flags.contains(GzipFlags::FHCRC) {
        if buf.len() < off + 2 {
            return Ok(None);
        }
        let want = LittleEndian::read_u16(&buf[off..off + 2]);
        if want != compute_crc32(&buf[..off]) as u16 {
            return Err(INCORRECT_CHECKSUM);
        }
        off += 2;
    }

    Ok(Some(GzipHeaderInfo { len: off, flags, mtime, os }))
}

/// Longest header `parse_header` can accept; bounds the staging buffer.
pub const MAX_HEADER_LEN: usize = GZIP_HEADER_LEN + 2 + GZIP_EXTRA_LIMIT + 2 * GZIP_FIELD_LIMIT + 2;

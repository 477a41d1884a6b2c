//! compression/codecs/inflate.rs
//! Inflate session: raw deflate, zlib, gzip, or auto-detected gzip/zlib.
//!
//! Wrapper headers and trailers are parsed here; the engine only ever sees
//! raw deflate data.

use adler2::Adler32;
use byteorder::{BigEndian, ByteOrder};
use crc32fast::Hasher;
use flate2::{Decompress, FlushDecompress, Status};
use num_enum::TryFromPrimitive;
use tracing::debug;

use crate::compression::codecs::{delta, gzip, StreamCodec};
use crate::compression::constants::decomp_status::{
    END_INPUT, INCORRECT_CHECKSUM, INVALID_BLOCK, INVALID_WRAPPER, NEED_DICT, UNSUPPORTED_METHOD,
};
use crate::compression::constants::{
    GZIP_MAGIC, GZIP_TRAILER_LEN, ZLIB_FDICT, ZLIB_MAX_CINFO, ZLIB_METHOD_DEFLATE, ZLIB_TRAILER_LEN,
};
use crate::compression::types::{FlushMode, StepResult, Wrapper};
use crate::types::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Init,
    Detect,
    ZlibHeader,
    GzipHeader,
    Body,
    Trailer,
    End,
}

/// One decompression session.
pub struct InflateCodec {
    flags: u16,
    wrapper: Wrapper,
    engine: Option<Decompress>,
    phase: Phase,
    staged: Vec<u8>,
    crc: Hasher,
    adler: Adler32,
}

/// Check a two-byte zlib header (RFC 1950).
pub fn check_zlib_header(cmf: u8, flg: u8) -> Result<(), i32> {
    if cmf & 0x0f != ZLIB_METHOD_DEFLATE {
        return Err(UNSUPPORTED_METHOD);
    }
    if cmf >> 4 > ZLIB_MAX_CINFO || (u16::from(cmf) << 8 | u16::from(flg)) % 31 != 0 {
        return Err(INVALID_WRAPPER);
    }
    if flg & ZLIB_FDICT != 0 {
        return Err(NEED_DICT);
    }
    Ok(())
}

/// Check the big-endian Adler-32 that closes a zlib stream.
pub fn check_zlib_trailer(trailer: &[u8], adler: u32) -> Result<(), i32> {
    if trailer.len() < ZLIB_TRAILER_LEN {
        return Err(INVALID_WRAPPER);
    }
    if BigEndian::read_u32(&trailer[..ZLIB_TRAILER_LEN]) != adler {
        return Err(INCORRECT_CHECKSUM);
    }
    Ok(())
}

impl InflateCodec {
    pub fn new(flags: u16) -> Self {
        Self {
            flags,
            wrapper: Wrapper::Auto,
            engine: None,
            phase: Phase::Init,
            staged: Vec::new(),
            crc: Hasher::new(),
            adler: Adler32::new(),
        }
    }

    /// Wrapper in effect; `Auto` until the leading bytes have been seen.
    pub fn wrapper(&self) -> Wrapper {
        self.wrapper
    }

    fn start(&mut self) -> Result<Phase, i32> {
        self.wrapper = match Wrapper::try_from_primitive(self.flags) {
            Ok(w @ (Wrapper::Deflate | Wrapper::Gzip | Wrapper::Zlib | Wrapper::Auto)) => w,
            _ => return Err(INVALID_WRAPPER),
        };
        debug!(wrapper = ?self.wrapper, "inflate session started");
        Ok(match self.wrapper {
            Wrapper::Deflate => {
                self.engine = Some(Decompress::new(false));
                Phase::Body
            }
            Wrapper::Zlib => Phase::ZlibHeader,
            Wrapper::Gzip => Phase::GzipHeader,
            _ => Phase::Detect,
        })
    }

    /// Returns (consumed, written, stream_ended).
    fn inflate_body(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        end_of_stream: bool,
    ) -> Result<(usize, usize, bool), i32> {
        let engine = self.engine.as_mut().ok_or(INVALID_BLOCK)?;
        let mut consumed = 0;
        let mut written = 0;
        loop {
            let before_in = engine.total_in();
            let before_out = engine.total_out();
            let status = engine
                .decompress(&input[consumed..], &mut output[written..], FlushDecompress::None)
                .map_err(|_| INVALID_BLOCK)?;
            let c = delta(engine.total_in(), before_in);
            let w = delta(engine.total_out(), before_out);

            let produced = &output[written..written + w];
            match self.wrapper {
                Wrapper::Gzip => self.crc.update(produced),
                Wrapper::Zlib => self.adler.write_slice(produced),
                _ => {}
            }
            consumed += c;
            written += w;

            if let Status::StreamEnd = status {
                return Ok((consumed, written, true));
            }
            if written == output.len() {
                return Ok((consumed, written, false));
            }
            if c == 0 && w == 0 {
                if end_of_stream && consumed == input.len() {
                    return Err(END_INPUT);
                }
                return Ok((consumed, written, false));
            }
        }
    }
}

impl StreamCodec for InflateCodec {
    fn direction(&self) -> Direction {
        Direction::Decompress
    }

    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        _flush: FlushMode,
        end_of_stream: bool,
    ) -> StepResult {
        let mut consumed = 0;
        let mut written = 0;
        loop {
            let avail = &input[consumed..];
            match self.phase {
                Phase::Init => match self.start() {
                    Ok(next) => self.phase = next,
                    Err(code) => return StepResult::fault(0, 0, code),
                },
                Phase::Detect | Phase::ZlibHeader => {
                    let take = avail.len().min(2 - self.staged.len());
                    self.staged.extend_from_slice(&avail[..take]);
                    consumed += take;
                    if self.staged.len() < 2 {
                        if end_of_stream && consumed == input.len() {
                            return StepResult::fault(consumed, written, END_INPUT);
                        }
                        return StepResult::ok(consumed, written);
                    }
                    if self.phase == Phase::Detect && self.staged[..2] == GZIP_MAGIC {
                        self.wrapper = Wrapper::Gzip;
                        self.phase = Phase::GzipHeader;
                        continue;
                    }
                    if let Err(code) = check_zlib_header(self.staged[0], self.staged[1]) {
                        return StepResult::fault(consumed, written, code);
                    }
                    self.staged.clear();
                    self.wrapper = Wrapper::Zlib;
                    self.engine = Some(Decompress::new(false));
                    self.phase = Phase::Body;
                }
                Phase::GzipHeader => {
                    let take = avail.len().min(gzip::MAX_HEADER_LEN - self.staged.len());
                    self.staged.extend_from_slice(&avail[..take]);
                    match gzip::parse_header(&self.staged) {
                        Err(code) => return StepResult::fault(consumed, written, code),
                        Ok(None) => {
                            consumed += take;
                            if end_of_stream && consumed == input.len() {
                                return StepResult::fault(consumed, written, END_INPUT);
                            }
                            return StepResult::ok(consumed, written);
                        }
                        Ok(Some(info)) => {
                            let overshoot = self.staged.len() - info.len;
                            consumed += take - overshoot;
                            self.staged.clear();
                            self.engine = Some(Decompress::new(false));
                            self.phase = Phase::Body;
                        }
                    }
                }
                Phase::Body => {
                    let res = self.inflate_body(avail, &mut output[written..], end_of_stream);
                    let (c, w, ended) = match res {
                        Ok(v) => v,
                        Err(code) => return StepResult::fault(consumed, written, code),
                    };
                    consumed += c;
                    written += w;
                    if !ended {
                        return StepResult::ok(consumed, written);
                    }
                    self.phase = if self.wrapper == Wrapper::Deflate { Phase::End } else { Phase::Trailer };
                }
                Phase::Trailer => {
                    let trailer_len = match self.wrapper {
                        Wrapper::Gzip => GZIP_TRAILER_LEN,
                        _ => ZLIB_TRAILER_LEN,
                    };
                    let take = avail.len().min(trailer_len - self.staged.len());
                    self.staged.extend_from_slice(&avail[..take]);
                    consumed += take;
                    if self.staged.len() < trailer_len {
                        if end_of_stream && consumed == input.len() {
                            return StepResult::fault(consumed, written, END_INPUT);
                        }
                        return StepResult::ok(consumed, written);
                    }
                    let checked = match self.wrapper {
                        Wrapper::Gzip => {
                            let crc = self.crc.clone().finalize();
                            let total_out = self.engine.as_ref().map_or(0, |e| e.total_out());
                            gzip::check_trailer(&self.staged, crc, total_out)
                        }
                        _ => check_zlib_trailer(&self.staged, self.adler.checksum()),
                    };
                    if let Err(code) = checked {
                        return StepResult::fault(consumed, written, code);
                    }
                    self.staged.clear();
                    self.phase = Phase::End;
                }
                Phase::End => return StepResult::ok(consumed, written),
            }
        }
    }

    fn is_terminal(&self) -> bool {
        self.phase == Phase::End
    }
}

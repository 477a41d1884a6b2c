//! compression/codecs/deflate.rs
//! Deflate (raw / zlib / gzip) compression session over flate2's streaming engine.

use crc32fast::Hasher;
use flate2::{Compress, Compression, FlushCompress, Status};
use num_enum::TryFromPrimitive;
use tracing::debug;

use crate::compression::codecs::{delta, drain_into, gzip, StreamCodec};
use crate::compression::constants::comp_status::{
    INVALID_LEVEL, INVALID_LEVEL_BUF, INVALID_PARAM, INVALID_STATE,
};
use crate::compression::constants::{FLATE_LEVELS, MAX_LEVEL};
use crate::compression::sizing::minimum_for;
use crate::compression::types::{FlushMode, StepResult, Wrapper};
use crate::constants::{MAX_WINDOW_BITS, MIN_WINDOW_BITS};
use crate::types::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Init,
    Header,
    Body,
    Trailer,
    End,
}

/// One compression session. Borrows its level buffer for its whole life;
/// input is staged through that buffer before the engine sees it.
pub struct DeflateCodec<'s> {
    level: i32,
    flags: u16,
    window_bits: u16,
    scratch: &'s mut [u8],
    engine: Option<Compress>,
    wrapper: Wrapper,
    phase: Phase,
    pending: Vec<u8>,
    pending_pos: usize,
    crc: Hasher,
}

impl<'s> DeflateCodec<'s> {
    /// Parameters are checked on the first step and reported as status codes.
    pub fn new(level: i32, flags: u16, window_bits: u16, scratch: &'s mut [u8]) -> Self {
        Self {
            level,
            flags,
            window_bits,
            scratch,
            engine: None,
            wrapper: Wrapper::Deflate,
            phase: Phase::Init,
            pending: Vec::new(),
            pending_pos: 0,
            crc: Hasher::new(),
        }
    }

    fn start(&mut self) -> Result<Phase, i32> {
        if !(0..=MAX_LEVEL).contains(&self.level) {
            return Err(INVALID_LEVEL);
        }
        match minimum_for(self.level) {
            Some(min) if self.scratch.len() >= min => {}
            _ => return Err(INVALID_LEVEL_BUF),
        }
        if self.window_bits != 0 && !(MIN_WINDOW_BITS..=MAX_WINDOW_BITS).contains(&self.window_bits) {
            return Err(INVALID_PARAM);
        }
        self.wrapper = match Wrapper::try_from_primitive(self.flags) {
            Ok(w @ (Wrapper::Deflate | Wrapper::Gzip | Wrapper::Zlib)) => w,
            _ => return Err(INVALID_PARAM),
        };

        let level = Compression::new(FLATE_LEVELS[self.level as usize]);
        self.engine = Some(Compress::new(level, self.wrapper == Wrapper::Zlib));
        debug!(
            level = self.level,
            wrapper = ?self.wrapper,
            scratch = self.scratch.len(),
            "deflate session started"
        );

        if self.wrapper == Wrapper::Gzip {
            let xfl = match self.level {
                0 => 4,
                MAX_LEVEL => 2,
                _ => 0,
            };
            self.pending = gzip::build_header(xfl);
            self.pending_pos = 0;
            return Ok(Phase::Header);
        }
        Ok(Phase::Body)
    }

    /// Returns (consumed, written, stream_ended).
    fn deflate_body(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
        end_of_stream: bool,
    ) -> Result<(usize, usize, bool), i32> {
        let engine = self.engine.as_mut().ok_or(INVALID_STATE)?;
        let final_mode = match (flush, end_of_stream) {
            (_, true) => FlushCompress::Finish,
            (FlushMode::FullFlush, false) => FlushCompress::Full,
            (FlushMode::NoFlush, false) => FlushCompress::None,
        };

        let mut consumed = 0;
        let mut written = 0;
        loop {
            // flate2 keeps its own match state, so the level buffer serves as the
            // input staging area: each engine pass sees at most one buffer of input.
            let take = (input.len() - consumed).min(self.scratch.len());
            let last = consumed + take == input.len();
            self.scratch[..take].copy_from_slice(&input[consumed..consumed + take]);
            let mode = if last { final_mode } else { FlushCompress::None };

            let before_in = engine.total_in();
            let before_out = engine.total_out();
            let status = engine
                .compress(&self.scratch[..take], &mut output[written..], mode)
                .map_err(|_| INVALID_STATE)?;
            let c = delta(engine.total_in(), before_in);
            let w = delta(engine.total_out(), before_out);

            if self.wrapper == Wrapper::Gzip {
                self.crc.update(&input[consumed..consumed + c]);
            }
            consumed += c;
            written += w;

            if let Status::StreamEnd = status {
                return Ok((consumed, written, true));
            }
            if written == output.len() {
                return Ok((consumed, written, false));
            }
            if consumed == input.len() && !end_of_stream {
                return Ok((consumed, written, false));
            }
            if c == 0 && w == 0 {
                return Ok((consumed, written, false));
            }
        }
    }
}

impl StreamCodec for DeflateCodec<'_> {
    fn direction(&self) -> Direction {
        Direction::Compress
    }

    fn step(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushMode,
        end_of_stream: bool,
    ) -> StepResult {
        let mut consumed = 0;
        let mut written = 0;
        loop {
            match self.phase {
                Phase::Init => match self.start() {
                    Ok(next) => self.phase = next,
                    Err(code) => return StepResult::fault(0, 0, code),
                },
                Phase::Header | Phase::Trailer => {
                    written += drain_into(&self.pending, &mut self.pending_pos, &mut output[written..]);
                    if self.pending_pos < self.pending.len() {
                        return StepResult::ok(consumed, written);
                    }
                    self.phase = if self.phase == Phase::Header { Phase::Body } else { Phase::End };
                }
                Phase::Body => {
                    let res = self.deflate_body(
                        &input[consumed..],
                        &mut output[written..],
                        flush,
                        end_of_stream,
                    );
                    let (c, w, ended) = match res {
                        Ok(v) => v,
                        Err(code) => return StepResult::fault(consumed, written, code),
                    };
                    consumed += c;
                    written += w;
                    if !ended {
                        return StepResult::ok(consumed, written);
                    }
                    self.phase = match self.wrapper {
                        Wrapper::Gzip => {
                            let total_in = self.engine.as_ref().map_or(0, |e| e.total_in());
                            let crc = std::mem::replace(&mut self.crc, Hasher::new()).finalize();
                            self.pending = gzip::build_trailer(crc, total_in).to_vec();
                            self.pending_pos = 0;
                            Phase::Trailer
                        }
                        _ => Phase::End,
                    };
                }
                Phase::End => return StepResult::ok(consumed, written),
            }
        }
    }

    fn is_terminal(&self) -> bool {
        self.phase == Phase::End
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::constants::comp_status::COMP_OK;
    use crate::compression::sizing::resolve;
    use crate::compression::types::MemoryProfile;

    fn scratch_for(level: i32) -> Vec<u8> {
        vec![0u8; resolve(level, MemoryProfile::Minimal).unwrap()]
    }

    #[test]
    fn finishes_empty_input_in_one_step() {
        let mut scratch = scratch_for(1);
        let mut codec = DeflateCodec::new(1, Wrapper::Deflate as u16, 0, &mut scratch);
        let mut out = vec![0u8; 64];
        let r = codec.step(&[], &mut out, FlushMode::FullFlush, true);
        assert_eq!(r.code, COMP_OK);
        assert!(r.written > 0);
        assert!(codec.is_terminal());
    }

    #[test]
    fn rejects_bad_level_and_small_buffer() {
        let mut scratch = scratch_for(1);
        let mut codec = DeflateCodec::new(7, 0, 0, &mut scratch);
        let mut out = vec![0u8; 64];
        assert_eq!(codec.step(b"x", &mut out, FlushMode::NoFlush, false).code, INVALID_LEVEL);

        let mut tiny = vec![0u8; 16];
        let mut codec = DeflateCodec::new(1, 0, 0, &mut tiny);
        assert_eq!(codec.step(b"x", &mut out, FlushMode::NoFlush, false).code, INVALID_LEVEL_BUF);
    }

    #[test]
    fn rejects_headerless_wrappers_and_bad_window() {
        let mut out = vec![0u8; 64];
        for flags in [Wrapper::GzipNoHdr as u16, Wrapper::ZlibNoHdr as u16, 0x77] {
            let mut scratch = scratch_for(0);
            let mut codec = DeflateCodec::new(0, flags, 0, &mut scratch);
            assert_eq!(codec.step(b"x", &mut out, FlushMode::NoFlush, false).code, INVALID_PARAM);
        }
        let mut scratch = scratch_for(0);
        let mut codec = DeflateCodec::new(0, 0, 16, &mut scratch);
        assert_eq!(codec.step(b"x", &mut out, FlushMode::NoFlush, false).code, INVALID_PARAM);
    }

    #[test]
    fn gzip_header_survives_tiny_windows() {
        let mut scratch = scratch_for(2);
        let mut codec = DeflateCodec::new(2, Wrapper::Gzip as u16, 0, &mut scratch);
        let mut produced = Vec::new();
        let mut out = [0u8; 3];
        let mut guard = 0;
        while !codec.is_terminal() {
            let r = codec.step(&[], &mut out, FlushMode::FullFlush, true);
            assert_eq!(r.code, COMP_OK);
            produced.extend_from_slice(&out[..r.written]);
            guard += 1;
            assert!(guard < 1000);
        }
        assert_eq!(&produced[..2], &[0x1f, 0x8b]);
        // header + empty final block + trailer
        assert!(produced.len() >= 10 + 2 + 8);
    }
}

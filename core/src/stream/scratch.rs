//! stream/scratch.rs
//! Level buffer lent to one compression session.

use tracing::trace;

use crate::compression::sizing::resolve;
use crate::compression::types::MemoryProfile;
use crate::types::StreamError;

/// Owned working memory for a single codec session. Released on drop, so
/// every exit path of the drive loop gives it back exactly once.
#[derive(Debug)]
pub struct ScratchBuffer {
    buf: Vec<u8>,
}

impl ScratchBuffer {
    /// Fallible zeroed allocation of `len` bytes.
    pub fn allocate(len: usize) -> Result<Self, StreamError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| StreamError::AllocationFailed { requested: len })?;
        buf.resize(len, 0);
        Ok(Self { buf })
    }

    /// Sized from the level × profile table.
    pub fn for_level(level: i32, profile: MemoryProfile) -> Result<Self, StreamError> {
        Self::allocate(resolve(level, profile)?)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        trace!(bytes = self.buf.len(), "scratch buffer released");
    }
}

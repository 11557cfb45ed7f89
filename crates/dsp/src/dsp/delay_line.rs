//! Predelay - circular buffer of dry samples
//!
//! The read cursor sits one slot ahead of the write cursor, i.e. on the oldest
//! sample. Writing then reading within the same step therefore delays the
//! signal by `len - 1` samples.

use crate::error::{CompressError, Result};
use sndcomp_core::StereoSample;

pub struct DelayLine {
    buffer: Vec<StereoSample>,
    write_pos: usize,
    read_pos: usize,
}

/// Advance a cursor by one, wrapping at `len`
#[inline]
pub fn wrap_next(pos: usize, len: usize) -> usize {
    let next = pos + 1;
    if next >= len {
        0
    } else {
        next
    }
}

/// Buffer length for a predelay in seconds: truncated, and at least 1 so the
/// cursor arithmetic stays defined when the predelay is zero
pub fn predelay_len(rate: u32, predelay_secs: f32) -> usize {
    ((rate as f32 * predelay_secs) as usize).max(1)
}

impl DelayLine {
    /// Allocate a silent delay line of `len` samples (at least 1)
    pub fn new(len: usize) -> Result<Self> {
        let len = len.max(1);
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| CompressError::Allocation {
                what: "predelay buffer",
                len,
            })?;
        buffer.resize(len, StereoSample::SILENCE);

        Ok(Self {
            buffer,
            write_pos: 0,
            read_pos: wrap_next(0, len),
        })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Store `input`, return the delayed sample, and advance both cursors
    #[inline]
    pub fn process(&mut self, input: StereoSample) -> StereoSample {
        let len = self.buffer.len();
        self.buffer[self.write_pos] = input;
        let delayed = self.buffer[self.read_pos];
        self.write_pos = wrap_next(self.write_pos, len);
        self.read_pos = wrap_next(self.read_pos, len);
        delayed
    }
}

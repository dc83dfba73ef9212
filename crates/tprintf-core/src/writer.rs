//! Capacity-bounded output accumulation.
//!
//! `BoundedWriter` is the single component allowed to touch the destination
//! buffer. Every byte of formatted output passes through [`BoundedWriter::append`]
//! or [`BoundedWriter::fill`]; both count the full logical length while storing
//! only what fits before the terminator slot. This mirrors the `snprintf`
//! return-value contract: the caller always learns how long the output would
//! have been, regardless of capacity.

/// Accumulates rendered bytes into a fixed-capacity destination buffer.
///
/// Invariant: the store cursor never exceeds `min(logical, capacity - 1)`
/// for non-zero capacity; with capacity 0 nothing is stored at all.
pub struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    cursor: usize,
    logical: usize,
}

impl<'a> BoundedWriter<'a> {
    /// Wrap a destination buffer. Capacity is `buf.len()`, including the
    /// slot reserved for the terminating zero byte.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            cursor: 0,
            logical: 0,
        }
    }

    /// Append `bytes`, counting all of them and storing the prefix that fits.
    pub fn append(&mut self, bytes: &[u8]) {
        self.logical = self.logical.saturating_add(bytes.len());
        let limit = self.buf.len().saturating_sub(1);
        if self.cursor < limit {
            let n = bytes.len().min(limit - self.cursor);
            self.buf[self.cursor..self.cursor + n].copy_from_slice(&bytes[..n]);
            self.cursor += n;
        }
    }

    /// Append `count` copies of `byte` (padding), same bounding rules as
    /// [`append`](Self::append). Padding is never materialized up front, so a
    /// huge field width costs only the stored prefix.
    pub fn fill(&mut self, byte: u8, count: usize) {
        self.logical = self.logical.saturating_add(count);
        let limit = self.buf.len().saturating_sub(1);
        if self.cursor < limit {
            let n = count.min(limit - self.cursor);
            for slot in &mut self.buf[self.cursor..self.cursor + n] {
                *slot = byte;
            }
            self.cursor += n;
        }
    }

    /// Logical length accumulated so far.
    #[must_use]
    pub fn logical_len(&self) -> usize {
        self.logical
    }

    /// Terminate the buffer and return the logical length.
    ///
    /// With non-zero capacity the zero byte lands at
    /// `min(logical, capacity - 1)`, which is exactly where the store cursor
    /// stopped. With capacity 0 the buffer is untouched.
    pub fn finish(self) -> usize {
        if !self.buf.is_empty() {
            self.buf[self.cursor] = 0;
        }
        self.logical
    }
}

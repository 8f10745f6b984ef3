//! Bounds-checked reading over an in-memory JPEG byte stream.

use crate::error::JpegScanError;

/// A read-only view over a byte slice with an explicit position.
///
/// All multi-byte values are big-endian, as the interchange format defines them.
/// A read that needs more bytes than remain fails with
/// [`JpegScanError::UnexpectedEnd`] and leaves the position untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    source: &'a [u8],
    position: usize,
    // Offset of `source[0]` within the outermost buffer, so errors and
    // positions of sub-cursors stay meaningful to the caller.
    base: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            position: 0,
            base: 0,
        }
    }

    /// Absolute position within the original buffer.
    pub fn position(&self) -> usize {
        self.base + self.position
    }

    pub fn remaining(&self) -> usize {
        self.source.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn remaining_data(&self) -> &'a [u8] {
        &self.source[self.position..]
    }

    pub fn peek(&self) -> Result<u8, JpegScanError> {
        self.ensure(1)?;
        Ok(self.source[self.position])
    }

    /// Looks `distance` bytes ahead without moving.
    pub fn peek_at(&self, distance: usize) -> Result<u8, JpegScanError> {
        self.ensure(distance + 1)?;
        Ok(self.source[self.position + distance])
    }

    pub fn read_u8(&mut self) -> Result<u8, JpegScanError> {
        let value = self.peek()?;
        self.position += 1;
        Ok(value)
    }

    pub fn read_u16_be(&mut self) -> Result<u16, JpegScanError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], JpegScanError> {
        self.ensure(count)?;
        let bytes = &self.source[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    pub fn advance(&mut self, count: usize) -> Result<(), JpegScanError> {
        self.ensure(count)?;
        self.position += count;
        Ok(())
    }

    /// Splits off a cursor over the next `count` bytes and advances past them.
    pub fn sub_cursor(&mut self, count: usize) -> Result<ByteCursor<'a>, JpegScanError> {
        let base = self.position();
        let source = self.read_bytes(count)?;
        Ok(ByteCursor {
            source,
            position: 0,
            base,
        })
    }

    fn ensure(&self, count: usize) -> Result<(), JpegScanError> {
        let available = self.remaining();
        if count > available {
            return Err(JpegScanError::UnexpectedEnd {
                position: self.position(),
                needed: count,
                available,
            });
        }
        Ok(())
    }
}

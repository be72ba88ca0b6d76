//! Sequential little-endian reader over a byte slice.

use super::error::DecodeError;

/// Forward-only reader that tracks its position inside a borrowed buffer.
///
/// `base` is added to every reported offset so errors raised while reading a
/// sub-slice (a program payload) still point into the enclosing buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    pub fn with_base(data: &'a [u8], base: usize) -> Self {
        Self { data, pos: 0, base }
    }

    /// Absolute offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `n` bytes. The position only moves on success.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::OutOfRange {
                offset: self.position(),
                requested: n,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read `n` bytes of UTF-8 text.
    ///
    /// With `strict` set, invalid UTF-8 is a [`DecodeError::Malformed`] and the
    /// position is left at the start of the text. Otherwise invalid sequences
    /// are replaced with U+FFFD.
    pub fn read_text(&mut self, n: usize, strict: bool) -> Result<String, DecodeError> {
        let start = self.position();
        let checkpoint = self.pos;
        let bytes = self.read_bytes(n)?;
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_owned()),
            Err(e) if strict => {
                self.pos = checkpoint;
                Err(DecodeError::Malformed {
                    offset: start + e.valid_up_to(),
                    reason: format!("text field is not valid UTF-8: {e}"),
                })
            }
            Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

//! Bounds-checked cursor over a message's raw bytes.
//!
//! Every multi-byte value on the wire is little-endian. Reads either
//! consume exactly the encoded width or fail without moving the cursor;
//! decoders never see partial values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("buffer truncated: need {needed} more bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },
    #[error("string is not valid UTF-8")]
    InvalidString(#[from] std::string::FromUtf8Error),
}

/// Read cursor over one message's payload.
///
/// The buffer borrows the payload; dropping it at any cursor position is
/// safe and releases nothing but the borrow.
pub struct ChunkBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ChunkBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read offset from the start of the payload.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Total payload length, independent of the cursor.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True once the cursor has consumed every byte.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], ChunkError> {
        if self.remaining() < needed {
            return Err(ChunkError::Truncated {
                needed,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(slice)
    }

    pub fn skip(&mut self, count: usize) -> Result<(), ChunkError> {
        self.take(count).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, ChunkError> {
        Ok(self.take(1)?[0])
    }

    /// One byte, any nonzero value is `true`.
    pub fn read_bool(&mut self) -> Result<bool, ChunkError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16, ChunkError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i16(&mut self) -> Result<i16, ChunkError> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32, ChunkError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32, ChunkError> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_f32(&mut self) -> Result<f32, ChunkError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, ChunkError> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(f64::from_le_bytes(raw))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, ChunkError> {
        Ok(self.take(len)?.to_vec())
    }

    /// Length-prefixed string in the game's "safe string" encoding.
    ///
    /// The `u16` header either holds the plain length, or has its top four
    /// bits set (`0xF000`) with the length in the low 12 bits and the
    /// characters stored bitwise-NOTed. The NOTed form is detected by the
    /// high bit of the first stored byte.
    pub fn read_safe_string(&mut self) -> Result<String, ChunkError> {
        let start = self.pos;
        let result = self.read_safe_string_inner();
        if result.is_err() {
            // The header may have been consumed before the body failed;
            // rewind so a failed read never moves the cursor.
            self.pos = start;
        }
        result
    }

    fn read_safe_string_inner(&mut self) -> Result<String, ChunkError> {
        let info = self.read_u16()?;
        let len = if info & 0xF000 == 0xF000 {
            (info & 0x0FFF) as usize
        } else {
            info as usize
        };
        let mut bytes = self.read_bytes(len)?;
        if bytes.first().is_some_and(|b| b & 0x80 != 0) {
            for b in &mut bytes {
                *b = !*b;
            }
        }
        Ok(String::from_utf8(bytes)?)
    }
}

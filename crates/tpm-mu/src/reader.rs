//! Cursor over a wire-format buffer.

use crate::MuError;

/// A bounds-checked big-endian reader positioned inside a byte buffer.
///
/// # Example
///
/// ```
/// use tpm_mu::Reader;
///
/// let buf = [0x00, 0x0b, 0xff];
/// let mut offset = 0;
/// let mut r = Reader::new(&buf, &mut offset);
/// assert_eq!(r.u16().unwrap(), 0x000b);
/// assert_eq!(r.u8().unwrap(), 0xff);
/// drop(r);
/// assert_eq!(offset, 3);
/// ```
pub struct Reader<'a> {
    buf: &'a [u8],
    offset: &'a mut usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8], offset: &'a mut usize) -> Self {
        Self { buf, offset }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(*self.offset)
    }

    fn take(&mut self, need: usize) -> Result<&'a [u8], MuError> {
        let have = self.remaining();
        if have < need {
            return Err(MuError::Truncated {
                need,
                offset: *self.offset,
                have,
            });
        }
        let slice = &self.buf[*self.offset..*self.offset + need];
        *self.offset += need;
        Ok(slice)
    }

    pub fn u8(&mut self) -> Result<u8, MuError> {
        Ok(self.take(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16, MuError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn u32(&mut self) -> Result<u32, MuError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads `n` raw bytes.
    pub fn bytes(&mut self, n: usize) -> Result<&'a [u8], MuError> {
        self.take(n)
    }

    /// Reads a `u16` size prefix followed by that many payload bytes.
    pub fn sized(&mut self) -> Result<&'a [u8], MuError> {
        let size = self.u16()? as usize;
        if size > self.remaining() {
            return Err(MuError::SizeExceedsBuffer {
                size,
                remaining: self.remaining(),
            });
        }
        self.take(size)
    }
}

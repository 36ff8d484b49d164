use super::error::FrameError;

pub struct FrameReader<'a> {
    frame: &'a [u8],
}

impl<'a> FrameReader<'a> {
    pub fn new(frame: &'a [u8]) -> Self {
        Self { frame }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), FrameError> {
        if self.frame.len() < needed {
            return Err(FrameError::TooShort {
                needed,
                actual: self.frame.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FrameError> {
        self.frame
            .get(offset)
            .copied()
            .ok_or(FrameError::TooShort {
                needed: offset + 1,
                actual: self.frame.len(),
            })
    }

    /// Big-endian reconstruction: `(high << 8) | low`, the byte-order rule
    /// for every multi-byte field in the frame.
    pub fn read_u16_be(&self, offset: usize) -> Result<u16, FrameError> {
        let high = self.read_u8(offset)?;
        let low = self.read_u8(offset + 1)?;
        Ok(u16::from_be_bytes([high, low]))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], FrameError> {
        self.frame.get(range.clone()).ok_or(FrameError::TooShort {
            needed: range.end,
            actual: self.frame.len(),
        })
    }
}

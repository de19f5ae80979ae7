use crate::wire::MAX_VARINT_LEN;
use crate::TinyError;
use anyhow::Result;
use std::str;

/// Read-side codec over a borrowed byte slice.
///
/// Every read either consumes exactly the bytes that the matching write produced,
/// or fails without moving past the end of the input.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Count of bytes consumed so far.
    pub fn pos(&self) -> usize {
        self.pos
    }
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn require(&self, len: usize) -> Result<()> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(TinyError::UnexpectedEnd {
                offset: self.pos,
                needed: len - remaining,
            }
            .into());
        }
        Ok(())
    }
    pub fn advance(&mut self, len: usize) -> Result<()> {
        self.require(len)?;
        self.pos += len;
        Ok(())
    }
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        self.require(len)?;
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Builds a [`TinyError::Malformed`] located at the current offset.
    pub fn malformed(&self, reason: &'static str) -> anyhow::Error {
        TinyError::Malformed {
            offset: self.pos,
            reason,
        }
        .into()
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => {
                self.pos -= 1;
                Err(self.malformed("bool byte is neither 0 nor 1"))
            }
        }
    }

    pub fn read_uvarint(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut u = 0u64;
        for i in 0..MAX_VARINT_LEN {
            let byte = self.read_u8()?;
            let group = (byte & 0x7f) as u64;
            if i == MAX_VARINT_LEN - 1 && group > 1 {
                self.pos = start;
                return Err(self.malformed("varint overflows 64 bits"));
            }
            u |= group << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(u);
            }
        }
        self.pos = start;
        Err(self.malformed("varint is longer than 10 bytes"))
    }
    pub fn read_ivarint(&mut self) -> Result<i64> {
        let u = self.read_uvarint()?;
        Ok(super::unzigzag(u))
    }

    /// A count of elements or bytes, bounded by the platform's `usize`.
    pub fn read_len(&mut self) -> Result<usize> {
        let u = self.read_uvarint()?;
        usize::try_from(u).map_err(|_| self.malformed("length does not fit in usize"))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let mut buf = [0u8; 4];
        let len = buf.len();
        buf.copy_from_slice(self.take(len)?);
        Ok(f32::from_le_bytes(buf))
    }
    pub fn read_f64(&mut self) -> Result<f64> {
        let mut buf = [0u8; 8];
        let len = buf.len();
        buf.copy_from_slice(self.take(len)?);
        Ok(f64::from_le_bytes(buf))
    }

    pub fn read_block(&mut self) -> Result<&'a [u8]> {
        let len = self.read_len()?;
        self.take(len)
    }
    pub fn read_str(&mut self) -> Result<&'a str> {
        let start = self.pos;
        let bytes = self.read_block()?;
        str::from_utf8(bytes).map_err(|_| {
            self.pos = start;
            self.malformed("string is not valid UTF-8")
        })
    }
}

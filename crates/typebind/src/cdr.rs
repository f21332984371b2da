// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! CDR little-endian wire codec.
//!
//! Implements the encoding the transport runtime speaks on the wire: a
//! 4-byte OMG encapsulation header (representation identifier + options)
//! followed by the little-endian CDR payload. Alignment is computed relative
//! to the start of the payload, not the buffer.

use std::fmt;

/// CDR encapsulation identifier for little-endian plain CDR.
pub const ENCAPSULATION_CDR_LE: u16 = 0x0001;
/// CDR encapsulation identifier for big-endian plain CDR (rejected).
pub const ENCAPSULATION_CDR_BE: u16 = 0x0000;
/// Encapsulation header length: identifier (2) + options (2).
pub const ENCAPSULATION_LEN: usize = 4;

/// Error raised by the CDR cursors and codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdrError {
    WriteFailed { offset: usize, reason: &'static str },
    ReadFailed { offset: usize, reason: &'static str },
    BadEncapsulation { identifier: u16 },
}

impl fmt::Display for CdrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CdrError::WriteFailed { offset, reason } => {
                write!(f, "write failed at offset {}: {}", offset, reason)
            }
            CdrError::ReadFailed { offset, reason } => {
                write!(f, "read failed at offset {}: {}", offset, reason)
            }
            CdrError::BadEncapsulation { identifier } => {
                write!(f, "unsupported encapsulation identifier {:#06x}", identifier)
            }
        }
    }
}

impl std::error::Error for CdrError {}

/// Result alias local to the CDR codec.
pub type CdrResult<T> = Result<T, CdrError>;

macro_rules! impl_write_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self, value: $type) -> CdrResult<()> {
            if self.offset + $size > self.buffer.len() {
                return Err(CdrError::WriteFailed {
                    offset: self.offset,
                    reason: "buffer too small",
                });
            }
            let bytes = value.to_le_bytes();
            self.buffer[self.offset..self.offset + $size].copy_from_slice(&bytes);
            self.offset += $size;
            Ok(())
        }
    };
}

macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> CdrResult<$type> {
            if self.offset + $size > self.buffer.len() {
                return Err(CdrError::ReadFailed {
                    offset: self.offset,
                    reason: "unexpected end of buffer",
                });
            }
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(&self.buffer[self.offset..self.offset + $size]);
            self.offset += $size;
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Mutable cursor for writing (bounds-checked, zero-copy).
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> CursorMut<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_write_le!(write_u8, u8, 1);
    impl_write_le!(write_u16_le, u16, 2);
    impl_write_le!(write_u32_le, u32, 4);
    impl_write_le!(write_u64_le, u64, 8);

    pub fn write_bytes(&mut self, data: &[u8]) -> CdrResult<()> {
        if self.offset + data.len() > self.buffer.len() {
            return Err(CdrError::WriteFailed {
                offset: self.offset,
                reason: "buffer too small",
            });
        }
        self.buffer[self.offset..self.offset + data.len()].copy_from_slice(data);
        self.offset += data.len();
        Ok(())
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }
}

/// Immutable cursor for reading (bounds-checked, zero-copy).
#[derive(Debug)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_u16_le, u16, 2);
    impl_read_le!(read_u32_le, u32, 4);
    impl_read_le!(read_u64_le, u64, 8);

    pub fn read_bytes(&mut self, len: usize) -> CdrResult<&'a [u8]> {
        if self.offset + len > self.buffer.len() {
            return Err(CdrError::ReadFailed {
                offset: self.offset,
                reason: "unexpected end of buffer",
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}

/// Padding needed to bring a payload offset up to `alignment`.
pub const fn padding_for(payload_offset: usize, alignment: usize) -> usize {
    if alignment <= 1 {
        0
    } else {
        let rem = payload_offset % alignment;
        if rem == 0 {
            0
        } else {
            alignment - rem
        }
    }
}

/// Encoder: writes the encapsulation header, then little-endian payload.
pub struct EncoderLE<'a> {
    cursor: CursorMut<'a>,
}

impl<'a> EncoderLE<'a> {
    /// Create a new encoder and write the 4-byte encapsulation header.
    pub fn new(buffer: &'a mut [u8]) -> CdrResult<Self> {
        let mut cursor = CursorMut::new(buffer);
        // The identifier is big-endian on the wire whatever the host is.
        cursor.write_bytes(&ENCAPSULATION_CDR_LE.to_be_bytes())?;
        cursor.write_bytes(&[0x00, 0x00])?; // options
        Ok(EncoderLE { cursor })
    }

    pub fn write_bool(&mut self, value: bool) -> CdrResult<()> {
        self.cursor.write_u8(u8::from(value))
    }

    pub fn write_u8(&mut self, value: u8) -> CdrResult<()> {
        self.cursor.write_u8(value)
    }

    pub fn write_i8(&mut self, value: i8) -> CdrResult<()> {
        self.cursor.write_u8(value as u8)
    }

    pub fn write_u16(&mut self, value: u16) -> CdrResult<()> {
        self.align(2)?;
        self.cursor.write_u16_le(value)
    }

    pub fn write_i16(&mut self, value: i16) -> CdrResult<()> {
        self.write_u16(value as u16)
    }

    pub fn write_u32(&mut self, value: u32) -> CdrResult<()> {
        self.align(4)?;
        self.cursor.write_u32_le(value)
    }

    pub fn write_i32(&mut self, value: i32) -> CdrResult<()> {
        self.write_u32(value as u32)
    }

    pub fn write_u64(&mut self, value: u64) -> CdrResult<()> {
        self.align(8)?;
        self.cursor.write_u64_le(value)
    }

    pub fn write_i64(&mut self, value: i64) -> CdrResult<()> {
        self.write_u64(value as u64)
    }

    pub fn write_f32(&mut self, value: f32) -> CdrResult<()> {
        self.write_u32(value.to_bits())
    }

    pub fn write_f64(&mut self, value: f64) -> CdrResult<()> {
        self.write_u64(value.to_bits())
    }

    /// Pad with zero bytes up to payload alignment.
    fn align(&mut self, alignment: usize) -> CdrResult<()> {
        let payload_offset = self.cursor.offset() - ENCAPSULATION_LEN;
        let pad = padding_for(payload_offset, alignment);
        const ZEROES: [u8; 8] = [0u8; 8];
        self.cursor.write_bytes(&ZEROES[..pad])
    }

    /// Total bytes written, header included.
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }
}

/// Decoder: validates the encapsulation header, then reads little-endian
/// payload. Big-endian and unknown encapsulations are rejected outright.
#[derive(Debug)]
pub struct DecoderLE<'a> {
    cursor: Cursor<'a>,
}

impl<'a> DecoderLE<'a> {
    pub fn new(buffer: &'a [u8]) -> CdrResult<Self> {
        let mut cursor = Cursor::new(buffer);
        let raw = cursor.read_bytes(2)?;
        let identifier = u16::from_be_bytes([raw[0], raw[1]]);
        if identifier != ENCAPSULATION_CDR_LE {
            return Err(CdrError::BadEncapsulation { identifier });
        }
        cursor.read_bytes(2)?; // options, ignored
        Ok(DecoderLE { cursor })
    }

    pub fn read_bool(&mut self) -> CdrResult<bool> {
        Ok(self.cursor.read_u8()? != 0)
    }

    pub fn read_u8(&mut self) -> CdrResult<u8> {
        self.cursor.read_u8()
    }

    pub fn read_i8(&mut self) -> CdrResult<i8> {
        Ok(self.cursor.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> CdrResult<u16> {
        self.align(2)?;
        self.cursor.read_u16_le()
    }

    pub fn read_i16(&mut self) -> CdrResult<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> CdrResult<u32> {
        self.align(4)?;
        self.cursor.read_u32_le()
    }

    pub fn read_i32(&mut self) -> CdrResult<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> CdrResult<u64> {
        self.align(8)?;
        self.cursor.read_u64_le()
    }

    pub fn read_i64(&mut self) -> CdrResult<i64> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> CdrResult<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> CdrResult<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    fn align(&mut self, alignment: usize) -> CdrResult<()> {
        let payload_offset = self.cursor.offset() - ENCAPSULATION_LEN;
        let pad = padding_for(payload_offset, alignment);
        self.cursor.read_bytes(pad)?;
        Ok(())
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }
}

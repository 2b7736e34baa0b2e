use crate::buffer::{fixed_window, PREFIX_LEN};
use crate::text::{self, TextEncoding};
use crate::{ByteAccess, Endian, Error, FixedWidth, Result};
use alloc::string::String;

/// Reads values sequentially from a slice of bytes.
///
/// Each `read_*` method decodes the value at the current position using the matching
/// [`ByteAccess`] accessor, then advances the position by the number of bytes the value
/// occupies. Multi-byte numbers take an [`Endian`] per call.
///
/// The reader holds a shared borrow of its input, so the bytes cannot change underneath it.
/// To read what a [`BinaryWriter`](crate::BinaryWriter) has produced so far, use
/// [`BinaryWriter::reader`](crate::BinaryWriter::reader).
///
/// Reads are not transactional. If a method returns an error, callers must not assume anything
/// about the position. In practice each accessor validates its range before the position moves.
///
/// Besides the byte position, the reader keeps a bit position that is only used by
/// [`BinaryReader::read_bit`].
#[derive(Copy, Clone, Debug)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
    bit_pos: u8,
}

impl<'a> BinaryReader<'a> {
    /// Constructor
    pub fn new(data: &'a [u8]) -> Self {
        Self::starting_at(data, 0)
    }

    /// Creates a reader whose first read happens at `position`.
    pub fn starting_at(data: &'a [u8], position: usize) -> Self {
        Self {
            data,
            pos: position,
            bit_pos: 0,
        }
    }

    /// Sets the bit [`BinaryReader::read_bit`] starts from. Fails with [`Error::EndOfData`] if
    /// `bit_position > 7`.
    pub fn with_bit_position(mut self, bit_position: u8) -> Result<Self> {
        if bit_position > 7 {
            return Err(Error::EndOfData);
        }
        self.bit_pos = bit_position;
        Ok(self)
    }

    /// The entire input, including bytes already read.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The input that has not been read yet. Empty if the position is at or past the end.
    pub fn rest(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or(&[])
    }

    /// Current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Index of the next bit [`BinaryReader::read_bit`] returns, in `0..=7`.
    pub fn bit_position(&self) -> u8 {
        self.bit_pos
    }

    /// Number of bytes at or after the current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there is nothing left to read.
    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Moves to `position`. The position is not checked here; the next read reports
    /// [`Error::EndOfData`] if it is out of range. The bit position is left unchanged.
    pub fn jump(&mut self, position: usize) {
        self.pos = position;
    }

    /// Skips `len` bytes without reading them. The bit position is left unchanged.
    pub fn advance(&mut self, len: usize) {
        self.pos = self.pos.saturating_add(len);
    }

    /// Reads a fixed-width numeric value.
    #[inline(always)]
    pub fn read_num<T: FixedWidth>(&mut self, endian: Endian) -> Result<T> {
        let value = self.data.get_num(self.pos, endian)?;
        self.pos += T::WIDTH;
        Ok(value)
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8> {
        let value = self.data.get_u8(self.pos)?;
        self.pos += 1;
        Ok(value)
    }

    /// Reads a single `i8` value.
    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a `u16`.
    #[inline(always)]
    pub fn read_u16(&mut self, endian: Endian) -> Result<u16> {
        self.read_num(endian)
    }

    /// Reads a `u32`.
    #[inline(always)]
    pub fn read_u32(&mut self, endian: Endian) -> Result<u32> {
        self.read_num(endian)
    }

    /// Reads a `u64`.
    #[inline(always)]
    pub fn read_u64(&mut self, endian: Endian) -> Result<u64> {
        self.read_num(endian)
    }

    /// Reads an `i16`.
    #[inline(always)]
    pub fn read_i16(&mut self, endian: Endian) -> Result<i16> {
        self.read_num(endian)
    }

    /// Reads an `i32`.
    #[inline(always)]
    pub fn read_i32(&mut self, endian: Endian) -> Result<i32> {
        self.read_num(endian)
    }

    /// Reads an `i64`.
    #[inline(always)]
    pub fn read_i64(&mut self, endian: Endian) -> Result<i64> {
        self.read_num(endian)
    }

    /// Reads an `f32` stored as the bit pattern of a `u32`.
    #[inline(always)]
    pub fn read_f32(&mut self, endian: Endian) -> Result<f32> {
        self.read_num(endian)
    }

    /// Reads an `f64` stored as the bit pattern of a `u64`.
    #[inline(always)]
    pub fn read_f64(&mut self, endian: Endian) -> Result<f64> {
        self.read_num(endian)
    }

    /// Reads a `bool`. The byte must be 0 or 1.
    pub fn read_bool(&mut self) -> Result<bool> {
        let value = self.data.get_bool(self.pos)?;
        self.pos += 1;
        Ok(value)
    }

    /// Reads a slice of bytes whose length is `len`. This function returns a slice reference
    /// to the bytes; it does not copy them.
    #[inline(always)]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let data = self.data;
        let bytes = data.get_bytes(self.pos, len)?;
        self.pos += len;
        Ok(bytes)
    }

    /// Reads a small array of bytes, with a constant length.
    #[inline(always)]
    pub fn read_cbytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let Ok(bytes) = <[u8; N]>::try_from(self.read_bytes(N)?) else {
            return Err(Error::EndOfData);
        };
        Ok(bytes)
    }

    /// Reads a 7-bit encoded integer of at most 5 bytes and returns it as `i32`.
    pub fn read_7bit_encoded_i32(&mut self) -> Result<i32> {
        let (value, len) = self.data.get_7bit_encoded_u32(self.pos)?;
        self.pos += len;
        Ok(value as i32)
    }

    /// Reads a 7-bit encoded integer of at most 10 bytes and returns it as `i64`.
    pub fn read_7bit_encoded_i64(&mut self) -> Result<i64> {
        let (value, len) = self.data.get_7bit_encoded_u64(self.pos)?;
        self.pos += len;
        Ok(value as i64)
    }

    /// Reads a null-terminated UTF-8 string. The position moves past the terminator.
    ///
    /// This does not copy any data.
    pub fn read_cstring(&mut self) -> Result<&'a str> {
        let data = self.data;
        let s = data.get_cstring(self.pos)?;
        self.pos += s.len() + 1;
        Ok(s)
    }

    /// Reads a null-terminated UTF-8 string and strips leading and trailing whitespace.
    ///
    /// The position moves past the terminator, whatever was trimmed.
    pub fn read_cstring_trimmed(&mut self) -> Result<&'a str> {
        Ok(self.read_cstring()?.trim())
    }

    /// Reads a null-terminated string without validating it. The position moves past the
    /// terminator.
    #[cfg(feature = "bstr")]
    pub fn read_cstring_bstr(&mut self) -> Result<&'a bstr::BStr> {
        let data = self.data;
        let bytes = data.get_cstring_bytes(self.pos)?;
        self.pos += bytes.len() + 1;
        Ok(bstr::BStr::new(bytes))
    }

    /// Reads a string of `len` bytes.
    ///
    /// If fewer than `len` bytes remain, the remaining bytes are decoded instead and the
    /// position moves to the end of the input.
    pub fn read_fixed_string(&mut self, len: usize, encoding: TextEncoding) -> Result<String> {
        let window = fixed_window(self.data, self.pos, len, encoding)?;
        let s = text::decode(window, encoding)?;
        self.pos += window.len();
        Ok(s)
    }

    /// Reads the content of a length-prefixed string without decoding it.
    pub fn read_prefixed_bytes(&mut self) -> Result<&'a [u8]> {
        let data = self.data;
        let bytes = data.get_prefixed_bytes(self.pos)?;
        self.pos += PREFIX_LEN + bytes.len();
        Ok(bytes)
    }

    /// Reads a length-prefixed string.
    pub fn read_prefixed_string(&mut self, encoding: TextEncoding) -> Result<String> {
        let data = self.data;
        let bytes = data.get_prefixed_bytes(self.pos)?;
        let s = text::decode(bytes, encoding)?;
        self.pos += PREFIX_LEN + bytes.len();
        Ok(s)
    }

    /// Reads a 7-bit encoded string.
    ///
    /// The returned text starts with the length byte; see
    /// [`ByteAccess::get_7bit_encoded_bytes`]. The position moves past the window that was
    /// decoded.
    pub fn read_7bit_encoded_string(&mut self, encoding: TextEncoding) -> Result<String> {
        let data = self.data;
        let bytes = data.get_7bit_encoded_bytes(self.pos)?;
        let s = text::decode(bytes, encoding)?;
        self.pos += bytes.len();
        Ok(s)
    }

    /// Reads one bit of the byte at the current position, least-significant bit first.
    ///
    /// The byte position only advances once all 8 bits of the byte have been read.
    pub fn read_bit(&mut self) -> Result<u8> {
        let bit = self.data.get_bit(self.pos, self.bit_pos)?;
        if self.bit_pos == 7 {
            self.bit_pos = 0;
            self.pos += 1;
        } else {
            self.bit_pos += 1;
        }
        Ok(bit)
    }
}

impl<'a> From<&'a [u8]> for BinaryReader<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

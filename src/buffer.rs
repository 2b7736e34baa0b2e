use crate::text::{self, TextEncoding};
use crate::varint;
use crate::{BinaryReader, Endian, Error, FixedWidth, Result};
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Deref;
use tracing::debug;

/// Width of the length field that precedes a length-prefixed string.
pub const PREFIX_LEN: usize = 8;

/// Offset-addressed, bounds-checked access to a sequence of bytes.
///
/// Every accessor is a pure function of the bytes and an offset; no cursor state is involved.
/// Accessors validate the whole range they touch before reading, and report
/// [`Error::EndOfData`] if it does not fit.
///
/// This trait is implemented for `[u8]`, so it is available on byte slices, `Vec<u8>` and
/// [`ByteBuffer`] alike.
pub trait ByteAccess {
    /// The underlying bytes.
    fn data(&self) -> &[u8];

    /// Returns the sub-range `offset..offset + len`. This does not copy the bytes.
    fn get_bytes(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let end = offset.checked_add(len).ok_or(Error::EndOfData)?;
        self.data().get(offset..end).ok_or(Error::EndOfData)
    }

    /// Reads a fixed-width numeric value at `offset`.
    fn get_num<T: FixedWidth>(&self, offset: usize, endian: Endian) -> Result<T> {
        let window = self.get_bytes(offset, T::WIDTH)?;
        let Ok(bytes) = <T::Bytes>::try_from(window) else {
            return Err(Error::EndOfData);
        };
        Ok(T::from_bytes(bytes, endian))
    }

    /// Reads a `u8` at `offset`.
    fn get_u8(&self, offset: usize) -> Result<u8> {
        self.data().get(offset).copied().ok_or(Error::EndOfData)
    }

    /// Reads an `i8` at `offset`.
    fn get_i8(&self, offset: usize) -> Result<i8> {
        Ok(self.get_u8(offset)? as i8)
    }

    /// Reads a `u16` at `offset`.
    fn get_u16(&self, offset: usize, endian: Endian) -> Result<u16> {
        self.get_num(offset, endian)
    }

    /// Reads an `i16` at `offset`.
    fn get_i16(&self, offset: usize, endian: Endian) -> Result<i16> {
        self.get_num(offset, endian)
    }

    /// Reads a `u32` at `offset`.
    fn get_u32(&self, offset: usize, endian: Endian) -> Result<u32> {
        self.get_num(offset, endian)
    }

    /// Reads an `i32` at `offset`.
    fn get_i32(&self, offset: usize, endian: Endian) -> Result<i32> {
        self.get_num(offset, endian)
    }

    /// Reads a `u64` at `offset`.
    fn get_u64(&self, offset: usize, endian: Endian) -> Result<u64> {
        self.get_num(offset, endian)
    }

    /// Reads an `i64` at `offset`.
    fn get_i64(&self, offset: usize, endian: Endian) -> Result<i64> {
        self.get_num(offset, endian)
    }

    /// Reads an `f32` at `offset`. The value is the bit pattern of the `u32` at the same offset.
    fn get_f32(&self, offset: usize, endian: Endian) -> Result<f32> {
        self.get_num(offset, endian)
    }

    /// Reads an `f64` at `offset`. The value is the bit pattern of the `u64` at the same offset.
    fn get_f64(&self, offset: usize, endian: Endian) -> Result<f64> {
        self.get_num(offset, endian)
    }

    /// Reads a `bool` at `offset`. The byte must be 0 or 1; anything else is
    /// [`Error::InvalidValue`].
    fn get_bool(&self, offset: usize) -> Result<bool> {
        match self.get_u8(offset)? {
            0 => Ok(false),
            1 => Ok(true),
            value => {
                debug!(offset, value, "byte is not a bool");
                Err(Error::InvalidValue)
            }
        }
    }

    /// Returns bit `bit_index` (0 is the least-significant bit) of the byte at `offset`, as 0 or 1.
    ///
    /// `bit_index` must be in `0..=7`; larger indexes are rejected with [`Error::EndOfData`].
    fn get_bit(&self, offset: usize, bit_index: u8) -> Result<u8> {
        if bit_index > 7 {
            debug!(offset, bit_index, "bit index out of range");
            return Err(Error::EndOfData);
        }
        Ok((self.get_u8(offset)? >> bit_index) & 1)
    }

    /// Decodes a 7-bit encoded `u32` at `offset`. Returns the value and its encoded length.
    fn get_7bit_encoded_u32(&self, offset: usize) -> Result<(u32, usize)> {
        varint::decode_u32(self.data(), offset)
    }

    /// Decodes a 7-bit encoded `u64` at `offset`. Returns the value and its encoded length.
    fn get_7bit_encoded_u64(&self, offset: usize) -> Result<(u64, usize)> {
        varint::decode_u64(self.data(), offset)
    }

    /// Returns the bytes of a null-terminated string at `offset`, without the terminator.
    ///
    /// Fails with [`Error::StringConversion`] if there is no zero byte at or after `offset`.
    fn get_cstring_bytes(&self, offset: usize) -> Result<&[u8]> {
        let rest = self.data().get(offset..).ok_or(Error::EndOfData)?;
        match rest.iter().position(|&b| b == 0) {
            Some(nul) => Ok(&rest[..nul]),
            None => {
                debug!(offset, "null-terminated string has no terminator");
                Err(Error::StringConversion)
            }
        }
    }

    /// Reads a null-terminated UTF-8 string at `offset`.
    fn get_cstring(&self, offset: usize) -> Result<&str> {
        let bytes = self.get_cstring_bytes(offset)?;
        core::str::from_utf8(bytes).map_err(|_| {
            debug!(offset, "null-terminated string is not UTF-8");
            Error::StringConversion
        })
    }

    /// Reads a null-terminated UTF-8 string at `offset` and strips leading and trailing
    /// whitespace.
    fn get_cstring_trimmed(&self, offset: usize) -> Result<&str> {
        Ok(self.get_cstring(offset)?.trim())
    }

    /// Returns the bytes of a null-terminated string at `offset` as a `BStr`, without validating
    /// them.
    #[cfg(feature = "bstr")]
    fn get_cstring_bstr(&self, offset: usize) -> Result<&bstr::BStr> {
        Ok(bstr::BStr::new(self.get_cstring_bytes(offset)?))
    }

    /// Decodes a string of `len` bytes at `offset`.
    ///
    /// If fewer than `len` bytes remain, the bytes that do remain are decoded and no error is
    /// reported. See [`fixed_window`] for the exact window.
    fn get_fixed_string(
        &self,
        offset: usize,
        len: usize,
        encoding: TextEncoding,
    ) -> Result<String> {
        text::decode(fixed_window(self.data(), offset, len, encoding)?, encoding)
    }

    /// Returns the content of a length-prefixed string at `offset`.
    ///
    /// The prefix is a little-endian `u64` of [`PREFIX_LEN`] bytes giving the content length in
    /// bytes. The content follows the prefix.
    fn get_prefixed_bytes(&self, offset: usize) -> Result<&[u8]> {
        let len = self.get_u64(offset, Endian::Little)?;
        let len = usize::try_from(len).map_err(|_| Error::EndOfData)?;
        let start = offset.checked_add(PREFIX_LEN).ok_or(Error::EndOfData)?;
        self.get_bytes(start, len)
    }

    /// Decodes a length-prefixed string at `offset`.
    fn get_prefixed_string(&self, offset: usize, encoding: TextEncoding) -> Result<String> {
        text::decode(self.get_prefixed_bytes(offset)?, encoding)
    }

    /// Returns the raw window of a 7-bit encoded string at `offset`.
    ///
    /// The string starts with a 7-bit encoded character count `n`. The window returned is the
    /// `n + 1` bytes starting at `offset` itself, so the first byte of the window is the count.
    /// Decoded text therefore begins with a control character holding the length
    /// (`"\u{f}This is a test!"`). Readers built on this crate rely on that framing.
    ///
    /// `n` counts characters but the window counts bytes. For text with multi-byte characters
    /// the window ends before the encoded text does: `"héllo"` written as UTF-8 decodes as
    /// `"\u{5}héll"`, and the `o` is left for the next read. With UTF-16 or UTF-32 the window
    /// usually splits a code unit, and decoding fails with [`Error::StringConversion`].
    fn get_7bit_encoded_bytes(&self, offset: usize) -> Result<&[u8]> {
        let (count, _) = self.get_7bit_encoded_u32(offset)?;
        let len = usize::try_from(count)
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or(Error::EndOfData)?;
        self.get_bytes(offset, len)
    }

    /// Decodes a 7-bit encoded string at `offset`. See [`ByteAccess::get_7bit_encoded_bytes`].
    fn get_7bit_encoded_string(&self, offset: usize, encoding: TextEncoding) -> Result<String> {
        text::decode(self.get_7bit_encoded_bytes(offset)?, encoding)
    }
}

impl ByteAccess for [u8] {
    #[inline(always)]
    fn data(&self) -> &[u8] {
        self
    }
}

/// Returns the bytes a fixed-length string read at `offset` consumes.
///
/// This is `data[offset..offset + len]`, shortened to the end of `data` if needed. When the
/// window is shortened, a trailing partial code unit (for UTF-16 and UTF-32) is dropped. Fails
/// with [`Error::EndOfData`] only if `offset` is past the end of `data`.
pub fn fixed_window(
    data: &[u8],
    offset: usize,
    len: usize,
    encoding: TextEncoding,
) -> Result<&[u8]> {
    let rest = data.get(offset..).ok_or(Error::EndOfData)?;
    if rest.len() >= len {
        return Ok(&rest[..len]);
    }
    let whole = rest.len() - rest.len() % encoding.code_unit_size();
    Ok(&rest[..whole])
}

/// An owned, growable sequence of bytes.
///
/// `ByteBuffer` dereferences to `[u8]`, so all of the [`ByteAccess`] accessors are available on
/// it. [`BinaryWriter`](crate::BinaryWriter) builds one; [`ByteBuffer::reader`] reads it back.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// The contents of the buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Extracts the inner vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Creates a reader positioned at the start of the buffer.
    ///
    /// The reader borrows the buffer, so the buffer cannot change while the reader is alive.
    pub fn reader(&self) -> BinaryReader<'_> {
        BinaryReader::new(&self.bytes)
    }

    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.bytes.reserve(additional);
    }

    pub(crate) fn vec_mut(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buffer: ByteBuffer) -> Self {
        buffer.bytes
    }
}

use crate::text::{self, TextEncoding};
use crate::varint;
use crate::{BinaryReader, ByteBuffer, Endian, Error, FixedWidth, Result, PREFIX_LEN};
use alloc::vec::Vec;
use tracing::debug;

/// Encodes values sequentially into an owned, growable [`ByteBuffer`].
///
/// The write position is always the length of the buffer. Numeric writes cannot fail; string
/// writes fail with [`Error::StringConversion`] if the text cannot be represented in the
/// requested encoding, and [`BinaryWriter::write_bit`] has its own error cases.
#[derive(Clone, Default, Debug)]
pub struct BinaryWriter {
    buffer: ByteBuffer,
}

impl BinaryWriter {
    /// Creates a new `BinaryWriter` over an empty buffer.
    pub fn new() -> Self {
        Self {
            buffer: ByteBuffer::new(),
        }
    }

    /// Creates a new `BinaryWriter` with the given capacity.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            buffer: ByteBuffer::with_capacity(len),
        }
    }

    /// Creates a `BinaryWriter` that appends to `bytes`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            buffer: ByteBuffer::from(bytes),
        }
    }

    /// Current write position, which is the number of bytes in the buffer.
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Accesses the inner buffer
    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Extracts the inner buffer
    pub fn into_buffer(self) -> ByteBuffer {
        self.buffer
    }

    /// Extracts the written bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer.into_vec()
    }

    /// Creates a reader over the bytes written so far. The writer cannot be used while the
    /// reader is alive.
    pub fn reader(&self) -> BinaryReader<'_> {
        self.buffer.reader()
    }

    /// Writes `bytes` to the output.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Writes a small, fixed-size array of bytes.
    pub fn write_cbytes<const N: usize>(&mut self, value: [u8; N]) {
        self.write_bytes(&value)
    }

    /// Writes a fixed-width numeric value.
    pub fn write_num<T: FixedWidth>(&mut self, value: T, endian: Endian) {
        self.write_bytes(value.to_bytes(endian).as_ref())
    }

    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value])
    }

    /// Writes a single `i8` value
    pub fn write_i8(&mut self, value: i8) {
        self.write_bytes(&[value as u8])
    }

    /// Writes a single `u16` value
    pub fn write_u16(&mut self, value: u16, endian: Endian) {
        self.write_num(value, endian)
    }

    /// Writes a single `u32` value
    pub fn write_u32(&mut self, value: u32, endian: Endian) {
        self.write_num(value, endian)
    }

    /// Writes a single `u64` value
    pub fn write_u64(&mut self, value: u64, endian: Endian) {
        self.write_num(value, endian)
    }

    /// Writes a single `i16` value
    pub fn write_i16(&mut self, value: i16, endian: Endian) {
        self.write_num(value, endian)
    }

    /// Writes a single `i32` value
    pub fn write_i32(&mut self, value: i32, endian: Endian) {
        self.write_num(value, endian)
    }

    /// Writes a single `i64` value
    pub fn write_i64(&mut self, value: i64, endian: Endian) {
        self.write_num(value, endian)
    }

    /// Writes an `f32` value. The value is encoded as the bit pattern of a `u32`.
    pub fn write_f32(&mut self, value: f32, endian: Endian) {
        self.write_num(value, endian)
    }

    /// Writes an `f64` value. The value is encoded as the bit pattern of a `u64`.
    pub fn write_f64(&mut self, value: f64, endian: Endian) {
        self.write_num(value, endian)
    }

    /// Writes a `bool` value. True is encoded as 1. False is encoded as 0.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8)
    }

    /// Encodes an `i32` value using a variable-length encoding.
    ///
    /// Although this function takes `i32` values, applications should avoid using this for
    /// negative values. This function can correctly encode negative values, but most "small"
    /// negative value (e.g. `-10`) will be encoded with the maximum number of bytes, which wastes
    /// space.
    pub fn write_7bit_encoded_i32(&mut self, value: i32) {
        varint::encode_u32(value as u32, self.buffer.vec_mut());
    }

    /// Encodes an `i64` value using a variable-length encoding.
    ///
    /// The same caveat about negative values applies as for
    /// [`BinaryWriter::write_7bit_encoded_i32`].
    pub fn write_7bit_encoded_i64(&mut self, value: i64) {
        varint::encode_u64(value as u64, self.buffer.vec_mut());
    }

    /// Writes a string in length-prefixed form: the encoded byte count as a little-endian `u64`,
    /// then the encoded bytes.
    pub fn write_prefixed_string(&mut self, s: &str, encoding: TextEncoding) -> Result<()> {
        let bytes = text::encode(s, encoding)?;
        let len = u64::try_from(bytes.len()).map_err(|_| Error::StringConversion)?;
        self.buffer.reserve(PREFIX_LEN + bytes.len());
        self.write_u64(len, Endian::Little);
        self.write_bytes(&bytes);
        Ok(())
    }

    /// Writes a string as UTF-8 followed by a zero byte.
    ///
    /// Text that contains a NUL character is rejected, since it could not be read back.
    pub fn write_cstring(&mut self, s: &str) -> Result<()> {
        if s.as_bytes().contains(&0) {
            debug!(len = s.len(), "null-terminated string contains NUL");
            return Err(Error::StringConversion);
        }
        self.buffer.reserve(s.len() + 1);
        self.write_bytes(s.as_bytes());
        self.write_u8(0);
        Ok(())
    }

    /// Writes a string prefixed by its character count as a 7-bit encoded integer, then the
    /// encoded bytes.
    ///
    /// The count is the number of Unicode scalar values, not grapheme clusters: `"e\u{301}"`
    /// counts as 2. Only ASCII text reads back whole; see
    /// [`ByteAccess::get_7bit_encoded_bytes`](crate::ByteAccess::get_7bit_encoded_bytes).
    pub fn write_7bit_encoded_string(&mut self, s: &str, encoding: TextEncoding) -> Result<()> {
        let bytes = text::encode(s, encoding)?;
        let count = i32::try_from(s.chars().count()).map_err(|_| Error::StringConversion)?;
        self.write_7bit_encoded_i32(count);
        self.write_bytes(&bytes);
        Ok(())
    }

    /// Sets (`on == true`) or clears bit `bit_offset` of the most recently written byte.
    ///
    /// This edits the last byte in place; it does not write a new one. Fails with
    /// [`Error::EndOfData`] if `bit_offset > 7` and with [`Error::ArraySize`] if nothing has been
    /// written yet.
    pub fn write_bit(&mut self, on: bool, bit_offset: u8) -> Result<()> {
        if bit_offset > 7 {
            debug!(bit_offset, "bit offset out of range");
            return Err(Error::EndOfData);
        }
        let Some(byte) = self.buffer.vec_mut().last_mut() else {
            debug!("bit write on an empty buffer");
            return Err(Error::ArraySize);
        };
        if on {
            *byte |= 1 << bit_offset;
        } else {
            *byte &= !(1 << bit_offset);
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::io::Write for BinaryWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

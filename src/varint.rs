//! 7-bit variable-length integers.
//!
//! Each byte carries 7 bits of the value, least-significant group first. The high bit of a byte
//! is set when more bytes follow. This is the encoding used by .NET's
//! `BinaryWriter.Write7BitEncodedInt`.

use crate::{Error, Result};
use alloc::vec::Vec;
use tracing::debug;

const MORE: u8 = 0x80;
const MASK: u8 = 0x7f;

/// Maximum encoded size of a `u32`.
pub const MAX_LEN_U32: usize = 5;

/// Maximum encoded size of a `u64`.
pub const MAX_LEN_U64: usize = 10;

/// Appends the encoding of `value` to `out`.
pub fn encode_u32(value: u32, out: &mut Vec<u8>) {
    encode_u64(u64::from(value), out)
}

/// Appends the encoding of `value` to `out`.
pub fn encode_u64(mut value: u64, out: &mut Vec<u8>) {
    while value >= u64::from(MORE) {
        out.push((value as u8 & MASK) | MORE);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Number of bytes [`encode_u32`] emits for `value`.
pub fn encoded_len_u32(value: u32) -> usize {
    encoded_len_u64(u64::from(value))
}

/// Number of bytes [`encode_u64`] emits for `value`.
pub fn encoded_len_u64(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Decodes a `u32` starting at `offset`. Returns the value and the number of bytes it occupies.
///
/// Bits of the fifth byte that do not fit in 32 bits are ignored. A value whose fifth byte still
/// has the continuation bit set is rejected with [`Error::EndOfData`], as is a value that runs
/// off the end of `data`.
pub fn decode_u32(data: &[u8], offset: usize) -> Result<(u32, usize)> {
    let (value, len) = decode(data, offset, MAX_LEN_U32)?;
    Ok((value as u32, len))
}

/// Decodes a `u64` starting at `offset`. Returns the value and the number of bytes it occupies.
pub fn decode_u64(data: &[u8], offset: usize) -> Result<(u64, usize)> {
    decode(data, offset, MAX_LEN_U64)
}

fn decode(data: &[u8], offset: usize, max_len: usize) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;

    for len in 1..=max_len {
        let index = offset.checked_add(len - 1).ok_or(Error::EndOfData)?;
        let b = *data.get(index).ok_or(Error::EndOfData)?;
        value |= u64::from(b & MASK) << shift;

        if (b & MORE) == 0 {
            return Ok((value, len));
        }

        shift += 7;
    }

    debug!(offset, max_len, "7-bit encoded integer is too long");
    Err(Error::EndOfData)
}

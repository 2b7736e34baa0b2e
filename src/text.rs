//! Text encodings supported by the string accessors.

use crate::{Error, Result};
use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use tracing::debug;
use zerocopy::byteorder::{LE, U16, U32};
use zerocopy::{FromBytes, IntoBytes};

/// Text encoding used by a string read or write.
///
/// The encoded stream does not record which encoding was used, so applications must read a
/// string back with the same encoding that wrote it.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum TextEncoding {
    /// 7-bit ASCII. Writing fails for text containing any other character.
    Ascii,
    /// UTF-8.
    #[default]
    Utf8,
    /// UTF-16, little-endian code units, no byte-order mark.
    Utf16,
    /// UTF-32, little-endian code units, no byte-order mark.
    Utf32,
}

impl TextEncoding {
    /// Size in bytes of one code unit.
    pub fn code_unit_size(self) -> usize {
        match self {
            Self::Ascii | Self::Utf8 => 1,
            Self::Utf16 => 2,
            Self::Utf32 => 4,
        }
    }
}

/// Decodes `bytes` as text. Every byte must belong to a valid code unit.
pub(crate) fn decode(bytes: &[u8], encoding: TextEncoding) -> Result<String> {
    let decoded = match encoding {
        TextEncoding::Ascii => {
            if bytes.is_ascii() {
                String::from_utf8(bytes.to_vec()).ok()
            } else {
                None
            }
        }
        TextEncoding::Utf8 => core::str::from_utf8(bytes).ok().map(String::from),
        TextEncoding::Utf16 => <[U16<LE>]>::ref_from_bytes(bytes).ok().and_then(|units| {
            char::decode_utf16(units.iter().map(|u| u.get()))
                .collect::<core::result::Result<String, _>>()
                .ok()
        }),
        TextEncoding::Utf32 => <[U32<LE>]>::ref_from_bytes(bytes)
            .ok()
            .and_then(|units| units.iter().map(|u| char::from_u32(u.get())).collect()),
    };

    decoded.ok_or_else(|| {
        debug!(?encoding, len = bytes.len(), "bytes are not valid text");
        Error::StringConversion
    })
}

/// Encodes `s`. UTF-8 and ASCII text is returned without copying.
pub(crate) fn encode(s: &str, encoding: TextEncoding) -> Result<Cow<'_, [u8]>> {
    match encoding {
        TextEncoding::Ascii => {
            if s.is_ascii() {
                Ok(Cow::Borrowed(s.as_bytes()))
            } else {
                debug!("text cannot be encoded as ASCII");
                Err(Error::StringConversion)
            }
        }
        TextEncoding::Utf8 => Ok(Cow::Borrowed(s.as_bytes())),
        TextEncoding::Utf16 => {
            let mut out = Vec::with_capacity(s.len() * 2);
            for unit in s.encode_utf16() {
                out.extend_from_slice(U16::<LE>::new(unit).as_bytes());
            }
            Ok(Cow::Owned(out))
        }
        TextEncoding::Utf32 => {
            let mut out = Vec::with_capacity(s.len() * 4);
            for c in s.chars() {
                out.extend_from_slice(U32::<LE>::new(c as u32).as_bytes());
            }
            Ok(Cow::Owned(out))
        }
    }
}

//! Cursor-based reading and writing of hand-built binary formats.
//!
//! [`BinaryWriter`] appends fixed-width numbers, booleans and strings to a growable
//! [`ByteBuffer`]. [`BinaryReader`] walks a byte slice and decodes the same sequence of values.
//! The format is whatever sequence of writes the caller chooses; the reader has to replay the
//! same sequence of reads.
//!
//! Every multi-byte number takes an [`Endian`] argument (little-endian is the default value of
//! the enum). [`ByteAccess`] exposes the same decoders as offset-addressed functions without a
//! cursor.
//!
//! Strings can be written three ways:
//!
//! * length-prefixed: a little-endian `u64` byte count, then the text;
//! * null-terminated: UTF-8 text, then a zero byte;
//! * 7-bit encoded: the character count as a 7-bit variable-length integer, then the text.
//!   When read back, the returned text includes the count byte, and only ASCII text comes back
//!   whole: the count is in characters but the reader takes that many bytes, so multi-byte text
//!   is cut short and the reader stops inside it. See [`ByteAccess::get_7bit_encoded_bytes`].
//!
//! # References
//! * <https://learn.microsoft.com/en-us/dotnet/api/system.io.binarywriter.write7bitencodedint>

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod buffer;
mod endian;
mod error;
mod reader;
mod text;
pub mod varint;
mod writer;


pub use buffer::{fixed_window, ByteAccess, ByteBuffer, PREFIX_LEN};
pub use endian::{Endian, FixedWidth};
pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use text::TextEncoding;
pub use writer::BinaryWriter;

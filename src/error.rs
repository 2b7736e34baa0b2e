//! Error type shared by the buffer accessors, the reader and the writer.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by [`ByteAccess`](crate::ByteAccess), [`BinaryReader`](crate::BinaryReader)
/// and [`BinaryWriter`](crate::BinaryWriter).
///
/// Nothing is retried or recovered internally. Reads are not transactional: if a `read_*` method
/// fails, callers must not assume the cursor is where it was before the call.
#[derive(Error, Copy, Clone, Eq, PartialEq, Debug)]
pub enum Error {
    /// An offset, length or width reaches past the end of the data. Also used when a 7-bit
    /// encoded integer is longer than its maximum encoded size, and for bit indexes above 7.
    #[error("unexpected end of data")]
    EndOfData,

    /// The bytes are not valid in the requested text encoding, a null-terminated string has no
    /// terminator, or a string cannot be represented in the requested encoding.
    #[error("string conversion failed")]
    StringConversion,

    /// A byte that should hold a boolean is neither 0 nor 1.
    #[error("invalid value")]
    InvalidValue,

    /// A bit write was attempted before any byte was written.
    #[error("buffer is empty")]
    ArraySize,
}

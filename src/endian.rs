/// Byte order of a multi-byte numeric value.
///
/// Passed to each read or write; it is never stored with the data.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum Endian {
    /// Least-significant byte first.
    #[default]
    Little,
    /// Most-significant byte first.
    Big,
}

/// A numeric type with a fixed encoded width.
///
/// Values are assembled from (or split into) a byte array in the requested order, so decoding
/// never depends on the alignment of the source data. Floating-point values use the bit pattern
/// of the unsigned integer with the same width.
pub trait FixedWidth: Copy + Sized {
    /// Number of bytes in the encoded form.
    const WIDTH: usize;

    /// The encoded form.
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Assembles a value from its encoded bytes.
    fn from_bytes(bytes: Self::Bytes, endian: Endian) -> Self;

    /// Splits a value into its encoded bytes.
    fn to_bytes(self, endian: Endian) -> Self::Bytes;
}

macro_rules! impl_fixed_width {
    ($($t:ty),* $(,)?) => {
        $(
            impl FixedWidth for $t {
                const WIDTH: usize = core::mem::size_of::<$t>();

                type Bytes = [u8; core::mem::size_of::<$t>()];

                #[inline(always)]
                fn from_bytes(bytes: Self::Bytes, endian: Endian) -> Self {
                    match endian {
                        Endian::Little => <$t>::from_le_bytes(bytes),
                        Endian::Big => <$t>::from_be_bytes(bytes),
                    }
                }

                #[inline(always)]
                fn to_bytes(self, endian: Endian) -> Self::Bytes {
                    match endian {
                        Endian::Little => self.to_le_bytes(),
                        Endian::Big => self.to_be_bytes(),
                    }
                }
            }
        )*
    };
}

impl_fixed_width!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

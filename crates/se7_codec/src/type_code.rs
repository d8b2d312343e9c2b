//! Protocol-level type codes and their canonical widths.
//!
//! A type code is a 32-bit bitmask. The integer family grows one bit per
//! width doubling (`0b11`, `0b111`, `0b1_1111`, `0b11_1111`), and bit 9
//! marks unsigned integers. Booleans, wide characters and floats are
//! "irregular" codes whose width does not follow that pattern.

use crate::error::{CodecError, CodecResult};
use std::fmt;

/// Number of bytes a value occupies on disk.
pub type ByteWidth = usize;

/// A fixed-width tag identifying a primitive's kind, width and signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeCode(u32);

impl TypeCode {
    /// Bit set on unsigned integer codes.
    pub const UNSIGNED_BIT: u32 = 0b10_0000_0000;

    /// `bool`.
    pub const BOOL: Self = Self(0b10_0000_0001);
    /// Signed 8-bit integer. OR with [`Self::UNSIGNED_BIT`] for `u8`.
    pub const INT8: Self = Self(0b00_0000_0011);
    /// Signed 16-bit integer.
    pub const INT16: Self = Self(0b00_0000_0111);
    /// UTF-16 code unit.
    pub const WIDE_CHAR: Self = Self(0b10_0000_1111);
    /// Signed 32-bit integer.
    pub const INT32: Self = Self(0b00_0001_1111);
    /// Signed 64-bit integer.
    pub const INT64: Self = Self(0b00_0011_1111);
    /// 32-bit float.
    pub const FLOAT32: Self = Self(0b01_0111_1111);
    /// 64-bit float.
    pub const FLOAT64: Self = Self(0b01_1111_1111);

    /// Wraps a raw code read from or destined for disk.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw code.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns this code with the unsigned bit set.
    #[must_use]
    pub const fn unsigned(self) -> Self {
        Self(self.0 | Self::UNSIGNED_BIT)
    }

    /// Returns this code with the unsigned bit cleared.
    #[must_use]
    pub const fn without_sign(self) -> Self {
        Self(self.0 & !Self::UNSIGNED_BIT)
    }

    /// Returns true if the unsigned bit is set.
    ///
    /// `BOOL` and `WIDE_CHAR` carry the bit as part of their fixed pattern.
    #[must_use]
    pub const fn has_unsigned_bit(self) -> bool {
        self.0 & Self::UNSIGNED_BIT != 0
    }

    /// Returns the code as 4 bytes in native order.
    #[must_use]
    pub const fn to_ne_bytes(self) -> [u8; 4] {
        self.0.to_ne_bytes()
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#012b}", self.0)
    }
}

/// Resolves a type code to its canonical byte width.
///
/// This does not consult the registry: widths are a property of the format.
///
/// # Errors
///
/// Returns [`CodecError::UnknownTypeCode`] if the code is neither one of the
/// irregular codes nor, after stripping the unsigned bit, an integer class.
pub fn width_for(code: TypeCode) -> CodecResult<ByteWidth> {
    match code {
        TypeCode::BOOL => return Ok(1),
        TypeCode::WIDE_CHAR => return Ok(2),
        TypeCode::FLOAT32 => return Ok(4),
        TypeCode::FLOAT64 => return Ok(8),
        _ => {}
    }

    match code.without_sign() {
        TypeCode::INT8 => Ok(1),
        TypeCode::INT16 => Ok(2),
        TypeCode::INT32 => Ok(4),
        TypeCode::INT64 => Ok(8),
        _ => Err(CodecError::UnknownTypeCode { code: code.0 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_widths() {
        assert_eq!(width_for(TypeCode::BOOL).unwrap(), 1);
        assert_eq!(width_for(TypeCode::WIDE_CHAR).unwrap(), 2);
        assert_eq!(width_for(TypeCode::FLOAT32).unwrap(), 4);
        assert_eq!(width_for(TypeCode::FLOAT64).unwrap(), 8);
    }

    #[test]
    fn integer_widths_ignore_sign() {
        for (code, width) in [
            (TypeCode::INT8, 1),
            (TypeCode::INT16, 2),
            (TypeCode::INT32, 4),
            (TypeCode::INT64, 8),
        ] {
            assert_eq!(width_for(code).unwrap(), width);
            assert_eq!(width_for(code.unsigned()).unwrap(), width);
        }
    }

    #[test]
    fn signed_and_unsigned_differ_by_one_bit() {
        let diff = TypeCode::INT32.as_u32() ^ TypeCode::INT32.unsigned().as_u32();
        assert_eq!(diff, TypeCode::UNSIGNED_BIT);
        assert_eq!(diff.count_ones(), 1);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        for raw in [0, 0b1, 0b111_1111, 0b10_0111_1111, u32::MAX] {
            assert_eq!(
                width_for(TypeCode::from_raw(raw)),
                Err(CodecError::UnknownTypeCode { code: raw })
            );
        }
    }

    #[test]
    fn floats_do_not_take_the_unsigned_bit() {
        assert!(!TypeCode::FLOAT32.has_unsigned_bit());
        assert!(!TypeCode::FLOAT64.has_unsigned_bit());
        assert!(width_for(TypeCode::FLOAT32.unsigned()).is_err());
        assert!(width_for(TypeCode::FLOAT64.unsigned()).is_err());
    }

    #[test]
    fn display_is_binary() {
        assert_eq!(TypeCode::INT32.to_string(), "0b0000011111");
    }
}

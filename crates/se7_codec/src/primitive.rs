//! The closed set of primitive kinds a record can carry.

use crate::error::CodecError;
use crate::type_code::{ByteWidth, TypeCode};
use bytes::BufMut;
use std::any::TypeId;

/// A value that can be written as the payload of a record.
///
/// Implemented for `bool`, the fixed-width integers, `f32`, `f64` and
/// [`WideChar`]. References, pointers and structured types do not implement
/// it, so they are rejected at compile time.
///
/// The record writer resolves the type code from the value's `TypeId`
/// through the registry. Implementing this trait for any other type
/// compiles, but writing it fails with [`CodecError::TypeNotFound`].
pub trait Primitive: Copy + Send + Sync + 'static {
    /// Appends the value's bytes to `out` in native byte order.
    fn put_ne_bytes<B: BufMut>(&self, out: &mut B);
}

macro_rules! impl_primitive_ne {
    ($($t:ty),* $(,)?) => {
        $(
            impl Primitive for $t {
                fn put_ne_bytes<B: BufMut>(&self, out: &mut B) {
                    out.put_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_primitive_ne!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

impl Primitive for bool {
    fn put_ne_bytes<B: BufMut>(&self, out: &mut B) {
        out.put_u8(u8::from(*self));
    }
}

/// A 16-bit wide character (one UTF-16 code unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WideChar(pub u16);

impl WideChar {
    /// Returns the UTF-16 code unit.
    #[must_use]
    pub const fn code_unit(self) -> u16 {
        self.0
    }
}

impl From<u16> for WideChar {
    fn from(unit: u16) -> Self {
        Self(unit)
    }
}

impl TryFrom<char> for WideChar {
    type Error = CodecError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        let mut units = [0u16; 2];
        match ch.encode_utf16(&mut units) {
            [unit] => Ok(Self(*unit)),
            _ => Err(CodecError::UnrepresentableChar { ch }),
        }
    }
}

impl Primitive for WideChar {
    fn put_ne_bytes<B: BufMut>(&self, out: &mut B) {
        out.put_slice(&self.0.to_ne_bytes());
    }
}

/// Every primitive kind the format knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `u8`
    U8,
    /// `i16`
    I16,
    /// `u16`
    U16,
    /// [`WideChar`]
    WideChar,
    /// `i32`
    I32,
    /// `u32`
    U32,
    /// `i64`
    I64,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
}

impl PrimitiveKind {
    /// All kinds, in registration order.
    pub const ALL: [Self; 12] = [
        Self::Bool,
        Self::I8,
        Self::U8,
        Self::I16,
        Self::U16,
        Self::WideChar,
        Self::I32,
        Self::U32,
        Self::I64,
        Self::U64,
        Self::F32,
        Self::F64,
    ];

    /// Returns the type code for this kind.
    #[must_use]
    pub const fn code(self) -> TypeCode {
        match self {
            Self::Bool => TypeCode::BOOL,
            Self::I8 => TypeCode::INT8,
            Self::U8 => TypeCode::INT8.unsigned(),
            Self::I16 => TypeCode::INT16,
            Self::U16 => TypeCode::INT16.unsigned(),
            Self::WideChar => TypeCode::WIDE_CHAR,
            Self::I32 => TypeCode::INT32,
            Self::U32 => TypeCode::INT32.unsigned(),
            Self::I64 => TypeCode::INT64,
            Self::U64 => TypeCode::INT64.unsigned(),
            Self::F32 => TypeCode::FLOAT32,
            Self::F64 => TypeCode::FLOAT64,
        }
    }

    /// Returns the canonical width of this kind in bytes.
    #[must_use]
    pub const fn width(self) -> ByteWidth {
        match self {
            Self::Bool | Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 | Self::WideChar => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    /// Returns true for signed integers and floats.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::F32 | Self::F64
        )
    }

    /// Looks up the kind a code belongs to.
    #[must_use]
    pub fn from_code(code: TypeCode) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Returns the Rust type name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::WideChar => "WideChar",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    pub(crate) fn type_id(self) -> TypeId {
        match self {
            Self::Bool => TypeId::of::<bool>(),
            Self::I8 => TypeId::of::<i8>(),
            Self::U8 => TypeId::of::<u8>(),
            Self::I16 => TypeId::of::<i16>(),
            Self::U16 => TypeId::of::<u16>(),
            Self::WideChar => TypeId::of::<WideChar>(),
            Self::I32 => TypeId::of::<i32>(),
            Self::U32 => TypeId::of::<u32>(),
            Self::I64 => TypeId::of::<i64>(),
            Self::U64 => TypeId::of::<u64>(),
            Self::F32 => TypeId::of::<f32>(),
            Self::F64 => TypeId::of::<f64>(),
        }
    }
}

//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while resolving type codes or encoding records.
///
/// None of these involve I/O. `TypeNotFound` and `UnknownTypeCode` indicate
/// a programming error or a code from an incompatible format version.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value's type has no registered type code.
    #[error("type not registered: {type_name}")]
    TypeNotFound {
        /// Name of the unregistered type.
        type_name: String,
    },

    /// The type code does not resolve to any canonical width.
    #[error("unknown type code: {code:#012b}")]
    UnknownTypeCode {
        /// The raw code.
        code: u32,
    },

    /// The field name does not fit the 4-byte length prefix.
    #[error("field name too long: {len} bytes exceeds u32::MAX")]
    NameTooLong {
        /// Byte length of the rejected name.
        len: usize,
    },

    /// A value produced a different number of bytes than its code's width.
    #[error("value for type code {code:#012b} encoded to {actual} bytes, expected {expected}")]
    WidthMismatch {
        /// The raw code.
        code: u32,
        /// Canonical width of the code.
        expected: usize,
        /// Bytes the value actually produced.
        actual: usize,
    },

    /// A `char` outside the Basic Multilingual Plane cannot be a wide character.
    #[error("character {ch:?} does not fit in one UTF-16 code unit")]
    UnrepresentableChar {
        /// The rejected character.
        ch: char,
    },
}

impl CodecError {
    /// Create a type-not-found error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        Self::TypeNotFound {
            type_name: type_name.into(),
        }
    }
}

//! Encoding of a single self-describing record.
//!
//! ```text
//! byte        byte_order_marker   (0 = little-endian, 1 = big-endian)
//! 4 bytes     type_code
//! 4 bytes     name_length
//! N bytes     name
//! W bytes     value               (W = width_for(type_code))
//! ```
//!
//! All multi-byte fields are in native byte order. There is no file header;
//! records simply follow one another.

use crate::byte_order::ByteOrder;
use crate::error::{CodecError, CodecResult};
use crate::primitive::Primitive;
use crate::registry::{TypeIdentity, TypeRegistry};
use crate::type_code::{width_for, ByteWidth, TypeCode};
use bytes::{BufMut, BytesMut};

/// Bytes before the name: marker (1) + type code (4) + name length (4).
pub const RECORD_HEADER_SIZE: usize = 9;

/// Largest name the 4-byte length prefix can describe.
pub const MAX_NAME_LEN: usize = u32::MAX as usize;

/// Returns the total encoded size of a record with the given name and width.
#[must_use]
pub const fn encoded_len(name_len: usize, width: ByteWidth) -> usize {
    RECORD_HEADER_SIZE + name_len + width
}

/// Encodes records into a reusable scratch buffer.
///
/// The whole record is built in memory before anything is returned, so a
/// failed lookup or an oversized name never produces a partial record.
///
/// # Example
///
/// ```
/// use se7_codec::{RecordEncoder, TypeCode};
///
/// let mut encoder = RecordEncoder::new();
/// let bytes = encoder.encode("boing", 27i32).unwrap();
///
/// assert_eq!(bytes.len(), 9 + 5 + 4);
/// assert_eq!(&bytes[1..5], &TypeCode::INT32.to_ne_bytes());
/// assert_eq!(&bytes[9..14], b"boing");
/// ```
#[derive(Debug)]
pub struct RecordEncoder<'r> {
    registry: &'r TypeRegistry,
    buffer: BytesMut,
}

impl RecordEncoder<'static> {
    /// Creates an encoder backed by the process-wide registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::global())
    }
}

impl Default for RecordEncoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> RecordEncoder<'r> {
    /// Creates an encoder that resolves codes through `registry`.
    #[must_use]
    pub fn with_registry(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            buffer: BytesMut::new(),
        }
    }

    /// Encodes one record and returns its bytes.
    ///
    /// The returned slice is valid until the next call.
    ///
    /// # Errors
    ///
    /// - [`CodecError::TypeNotFound`] if `T` is not registered
    /// - [`CodecError::UnknownTypeCode`] if the registered code has no width
    /// - [`CodecError::NameTooLong`] if `name` exceeds [`MAX_NAME_LEN`]
    /// - [`CodecError::WidthMismatch`] if `value` wrote the wrong byte count
    pub fn encode<T: Primitive>(&mut self, name: &str, value: T) -> CodecResult<&[u8]> {
        self.buffer.clear();

        let code = self.registry.code_for(TypeIdentity::of::<T>())?;
        let width = width_for(code)?;
        let name_len =
            u32::try_from(name.len()).map_err(|_| CodecError::NameTooLong { len: name.len() })?;

        self.buffer.reserve(encoded_len(name.len(), width));
        self.buffer.put_u8(ByteOrder::native().marker());
        self.buffer.put_slice(&code.to_ne_bytes());
        self.buffer.put_u32_ne(name_len);
        self.buffer.put_slice(name.as_bytes());

        let value_start = self.buffer.len();
        value.put_ne_bytes(&mut self.buffer);
        let actual = self.buffer.len() - value_start;

        if actual != width {
            self.buffer.clear();
            return Err(CodecError::WidthMismatch {
                code: code.as_u32(),
                expected: width,
                actual,
            });
        }

        Ok(&self.buffer)
    }

    /// Returns the code `T` would be written with.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TypeNotFound`] if `T` is not registered.
    pub fn code_of<T: Primitive>(&self) -> CodecResult<TypeCode> {
        self.registry.code_of::<T>()
    }
}

/// Encodes a single record into a fresh buffer.
///
/// # Errors
///
/// See [`RecordEncoder::encode`].
pub fn encode_record<T: Primitive>(name: &str, value: T) -> CodecResult<Vec<u8>> {
    let mut encoder = RecordEncoder::new();
    Ok(encoder.encode(name, value)?.to_vec())
}

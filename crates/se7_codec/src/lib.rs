//! # SE7 Codec
//!
//! Type codes, the type registry and record encoding for the SE7 record
//! store.
//!
//! A record is a named primitive value tagged with enough metadata to be
//! parsed without a schema:
//!
//! - a byte-order marker ([`ByteOrder`])
//! - a [`TypeCode`] identifying kind, width and signedness
//! - a length-prefixed name
//! - the value's raw bytes, exactly [`width_for`] of its code
//!
//! Type codes are resolved from a value's Rust type through the
//! process-wide [`TypeRegistry`], which is built once on first use.
//!
//! ## Usage
//!
//! ```
//! use se7_codec::{encode_record, width_for, TypeCode, TypeRegistry};
//!
//! let code = TypeRegistry::global().code_of::<u16>().unwrap();
//! assert_eq!(code, TypeCode::INT16.unsigned());
//! assert_eq!(width_for(code).unwrap(), 2);
//!
//! let bytes = encode_record("count", 7u16).unwrap();
//! assert_eq!(bytes.len(), 9 + "count".len() + 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod byte_order;
mod error;
mod primitive;
mod record;
mod registry;
mod type_code;

/// Re-exported so [`Primitive`] can be implemented without a direct dependency.
pub use bytes;

pub use byte_order::ByteOrder;
pub use error::{CodecError, CodecResult};
pub use primitive::{Primitive, PrimitiveKind, WideChar};
pub use record::{encode_record, encoded_len, RecordEncoder, MAX_NAME_LEN, RECORD_HEADER_SIZE};
pub use registry::{TypeIdentity, TypeRegistry};
pub use type_code::{width_for, ByteWidth, TypeCode};

/// Populates the process-wide type registry. Idempotent and thread-safe.
pub fn register_known_types() {
    TypeRegistry::global();
}

/// Looks up a type code in the process-wide registry.
///
/// # Errors
///
/// Returns [`CodecError::TypeNotFound`] if the type is not registered.
pub fn code_for(identity: TypeIdentity) -> CodecResult<TypeCode> {
    TypeRegistry::global().code_for(identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn global_lookup_helpers() {
        register_known_types();
        assert_eq!(code_for(TypeIdentity::of::<bool>()).unwrap(), TypeCode::BOOL);
        assert_eq!(code_for(TypeIdentity::of::<WideChar>()).unwrap(), TypeCode::WIDE_CHAR);
        assert!(code_for(TypeIdentity::of::<()>()).is_err());
    }

    proptest! {
        #[test]
        fn arbitrary_codes_resolve_only_to_known_widths(raw in any::<u32>()) {
            let code = TypeCode::from_raw(raw);
            match width_for(code) {
                Ok(width) => prop_assert!([1, 2, 4, 8].contains(&width)),
                Err(err) => prop_assert_eq!(err, CodecError::UnknownTypeCode { code: raw }),
            }
        }

        #[test]
        fn stripping_sign_never_changes_integer_width(kind in prop::sample::select(PrimitiveKind::ALL.to_vec())) {
            let code = kind.code();
            if let Ok(stripped) = width_for(code.without_sign()) {
                prop_assert_eq!(stripped, kind.width());
            }
        }
    }
}

//! Writes encoded records to a storage backend.

use crate::error::WriteCause;
use se7_codec::{Primitive, RecordEncoder};
use se7_storage::StorageBackend;

/// Encodes one record and appends it to `sink` in a single call.
///
/// Returns the offset of the record in the sink. Encoding finishes before
/// the sink is touched, so a codec error leaves the sink unmodified.
///
/// # Errors
///
/// - [`WriteCause::Codec`] if the value cannot be encoded
/// - [`WriteCause::Storage`] if the append fails; the sink may then hold
///   part of the record
pub fn write_record<T: Primitive>(
    sink: &mut dyn StorageBackend,
    encoder: &mut RecordEncoder<'_>,
    name: &str,
    value: T,
) -> Result<u64, WriteCause> {
    let bytes = encoder.encode(name, value)?;
    Ok(sink.append(bytes)?)
}

//! Error types for the record store.

use se7_codec::CodecError;
use se7_storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors returned by a [`crate::Store`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// The backing sink could not be opened or created.
    #[error("failed to open store at {}: {source}", path.display())]
    StoreOpenFailure {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },

    /// A record could not be written.
    ///
    /// If the cause is a storage error, an unknown number of bytes may have
    /// reached the sink; the store should be truncated before reuse.
    #[error("failed to write field {field:?}: {cause}")]
    WriteFailure {
        /// Name of the field being written.
        field: String,
        /// What went wrong.
        #[source]
        cause: WriteCause,
    },

    /// Flush, sync or size query on the backing sink failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// The underlying reason a write failed.
#[derive(Debug, Error)]
pub enum WriteCause {
    /// The value could not be encoded; nothing was written.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The sink rejected the record bytes.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CoreError {
    /// Creates a write failure for `field`.
    pub fn write_failure(field: impl Into<String>, cause: impl Into<WriteCause>) -> Self {
        Self::WriteFailure {
            field: field.into(),
            cause: cause.into(),
        }
    }

    /// Returns the codec error behind a write failure, if that is the cause.
    ///
    /// Codec errors (`TypeNotFound`, `UnknownTypeCode`, ...) are programming
    /// or format-version errors, distinct from I/O failures.
    #[must_use]
    pub fn codec_error(&self) -> Option<&CodecError> {
        match self {
            Self::WriteFailure {
                cause: WriteCause::Codec(err),
                ..
            } => Some(err),
            _ => None,
        }
    }

    /// Returns true if the value's type was not registered.
    #[must_use]
    pub fn is_type_not_found(&self) -> bool {
        matches!(self.codec_error(), Some(CodecError::TypeNotFound { .. }))
    }

    /// Returns true if a type code had no canonical width.
    #[must_use]
    pub fn is_unknown_type_code(&self) -> bool {
        matches!(self.codec_error(), Some(CodecError::UnknownTypeCode { .. }))
    }
}

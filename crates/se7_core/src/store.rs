//! The store session: one backing sink plus the write operation.

use crate::config::StoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::writer::write_record;
use se7_codec::{Primitive, RecordEncoder, TypeRegistry};
use se7_storage::{FileBackend, InMemoryBackend, StorageBackend, StorageResult};
use std::any::type_name;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// A session over one backing sink.
///
/// Each [`Store::write`] appends one self-describing record. Records carry
/// no cross-record state, so a store has nothing to finalize: dropping it
/// releases the sink, and whatever was appended stays on disk.
///
/// Constructing any store populates the process-wide [`TypeRegistry`] if
/// no earlier store has.
///
/// # Example
///
/// ```no_run
/// use se7_core::Store;
/// use std::path::Path;
///
/// let mut store = Store::open(Path::new("test.se7"))?;
/// store.write("boing", 27i32)?;
/// store.write("ratio", 0.5f64)?;
/// store.flush()?;
/// # Ok::<(), se7_core::CoreError>(())
/// ```
pub struct Store {
    backend: Box<dyn StorageBackend>,
    encoder: RecordEncoder<'static>,
    config: StoreConfig,
    path: Option<PathBuf>,
    records_written: u64,
}

impl Store {
    /// Opens the store file at `path`, creating it if missing.
    ///
    /// Existing content is preserved and new records are appended after it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StoreOpenFailure`] if the file cannot be opened
    /// or created.
    pub fn open(path: &Path) -> CoreResult<Self> {
        Self::open_with_config(path, StoreConfig::default())
    }

    /// Opens the store file at `path` with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StoreOpenFailure`] if directories cannot be
    /// created, the file cannot be opened, or (with `exclusive`) another
    /// handle holds the lock.
    pub fn open_with_config(path: &Path, config: StoreConfig) -> CoreResult<Self> {
        let backend =
            open_file_backend(path, &config).map_err(|source| CoreError::StoreOpenFailure {
                path: path.to_path_buf(),
                source,
            })?;

        let mut store = Self::with_backend(Box::new(backend), config);
        store.path = Some(path.to_path_buf());

        debug!(
            path = %path.display(),
            size = store.size().unwrap_or_default(),
            "opened record store"
        );
        Ok(store)
    }

    /// Opens a store that keeps its records in memory.
    #[must_use]
    pub fn open_in_memory() -> Self {
        Self::with_backend(Box::new(InMemoryBackend::new()), StoreConfig::default())
    }

    /// Wraps an already opened backend.
    ///
    /// This is how alternative transports plug in; the store only needs
    /// sequential appends from them.
    #[must_use]
    pub fn with_backend(backend: Box<dyn StorageBackend>, config: StoreConfig) -> Self {
        let registry = TypeRegistry::global();

        Self {
            backend,
            encoder: RecordEncoder::with_registry(registry),
            config,
            path: None,
            records_written: 0,
        }
    }

    /// Appends one record named `name` holding `value`.
    ///
    /// Returns the offset of the record in the sink.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::WriteFailure`]. When the cause is a codec error
    /// (for example `TypeNotFound`) nothing was written. When the cause is a
    /// storage error from the append, part of the record may have reached
    /// the sink and the store should be truncated to its previous
    /// [`Store::size`] before writing again.
    ///
    /// With `sync_on_write`, a failed sync is also reported as a
    /// `WriteFailure`. The record itself was appended in full by then and
    /// is counted in [`Store::records_written`].
    pub fn write<T: Primitive>(&mut self, name: &str, value: T) -> CoreResult<u64> {
        let offset = write_record(self.backend.as_mut(), &mut self.encoder, name, value)
            .map_err(|cause| {
                warn!(field = name, error = %cause, "record write failed");
                CoreError::write_failure(name, cause)
            })?;

        self.records_written += 1;
        trace!(field = name, ty = type_name::<T>(), offset, "record written");

        if self.config.sync_on_write {
            self.backend.sync().map_err(|cause| {
                warn!(field = name, offset, error = %cause, "record sync failed");
                CoreError::write_failure(name, cause)
            })?;
        }

        Ok(offset)
    }

    /// Flushes buffered records to the operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend flush fails.
    pub fn flush(&mut self) -> CoreResult<()> {
        Ok(self.backend.flush()?)
    }

    /// Syncs records and file metadata to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend sync fails.
    pub fn sync(&mut self) -> CoreResult<()> {
        Ok(self.backend.sync()?)
    }

    /// Returns the size of the sink in bytes, including pre-existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    pub fn size(&self) -> CoreResult<u64> {
        Ok(self.backend.size()?)
    }

    /// Returns the number of records written through this session.
    #[must_use]
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Returns the file path, or `None` for stores not opened from a path.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the backing sink.
    #[must_use]
    pub fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }

    /// Returns the backing sink mutably, e.g. to truncate after a failed write.
    pub fn backend_mut(&mut self) -> &mut dyn StorageBackend {
        self.backend.as_mut()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("records_written", &self.records_written)
            .finish_non_exhaustive()
    }
}

fn open_file_backend(path: &Path, config: &StoreConfig) -> StorageResult<FileBackend> {
    let mut backend = if config.create_dirs {
        FileBackend::open_with_create_dirs(path)?
    } else {
        FileBackend::open(path)?
    };

    if config.exclusive {
        backend.try_lock_exclusive()?;
    }
    Ok(backend)
}

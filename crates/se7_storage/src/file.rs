//! File-based storage backend.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use fs2::FileExt;
use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A file-based storage backend.
///
/// The file is opened for combined read/write in binary mode. An existing
/// file keeps its contents and new data is appended after it; a missing
/// file is created empty.
///
/// # Locking
///
/// [`FileBackend::open_exclusive`] additionally takes an OS advisory
/// exclusive lock, so a second exclusive open of the same file fails with
/// [`StorageError::Locked`] until the first backend is dropped.
///
/// # Example
///
/// ```no_run
/// use se7_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open(Path::new("values.se7")).unwrap();
/// backend.append(b"record bytes").unwrap();
/// backend.sync().unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    file: RwLock<File>,
    size: RwLock<u64>,
    locked: bool,
}

impl FileBackend {
    /// Opens or creates a file backend at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(file),
            size: RwLock::new(size),
            locked: false,
        })
    }

    /// Opens or creates a file backend, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or file cannot be opened.
    pub fn open_with_create_dirs(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Opens or creates a file backend and takes an exclusive advisory lock.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Locked`] if another handle holds the lock,
    /// or an I/O error if the file cannot be opened.
    pub fn open_exclusive(path: &Path) -> StorageResult<Self> {
        let mut backend = Self::open(path)?;
        backend.try_lock_exclusive()?;
        Ok(backend)
    }

    /// Takes an exclusive advisory lock on an already opened backend.
    ///
    /// Locking twice through the same backend is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Locked`] if another handle holds the lock.
    pub fn try_lock_exclusive(&mut self) -> StorageResult<()> {
        if self.locked {
            return Ok(());
        }

        if let Err(err) = FileExt::try_lock_exclusive(&*self.file.get_mut()) {
            if err.kind() == fs2::lock_contended_error().kind() {
                return Err(StorageError::Locked {
                    path: self.path.clone(),
                });
            }
            return Err(err.into());
        }

        self.locked = true;
        Ok(())
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if this backend holds the exclusive lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl StorageBackend for FileBackend {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let size = *self.size.read();
        let end = offset.saturating_add(len as u64);

        if offset > size || end > size {
            return Err(StorageError::ReadPastEnd { offset, len, size });
        }

        if len == 0 {
            return Ok(Vec::new());
        }

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(offset))?;

        let mut buffer = vec![0u8; len];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    fn append(&mut self, data: &[u8]) -> StorageResult<u64> {
        if data.is_empty() {
            return Ok(*self.size.read());
        }

        let mut file = self.file.write();
        let mut size = self.size.write();

        // The real end of file is authoritative; another handle may have
        // appended since the last call.
        let offset = file.seek(SeekFrom::End(0))?;
        if let Err(err) = file.write_all(data) {
            // A partial write may have moved the end of file.
            *size = file.metadata().map_or(offset, |meta| meta.len());
            return Err(err.into());
        }
        *size = offset + data.len() as u64;

        Ok(offset)
    }

    fn flush(&mut self) -> StorageResult<()> {
        self.file.write().flush()?;
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(*self.size.read())
    }

    fn sync(&mut self) -> StorageResult<()> {
        self.file.write().sync_all()?;
        Ok(())
    }

    fn truncate(&mut self, new_size: u64) -> StorageResult<()> {
        let file = self.file.write();
        let mut size = self.size.write();

        if new_size > *size {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!(
                    "cannot truncate to size {} which is greater than current size {}",
                    new_size, *size
                ),
            )));
        }

        file.set_len(new_size)?;
        file.sync_all()?;
        *size = new_size;

        Ok(())
    }
}

impl Drop for FileBackend {
    fn drop(&mut self) {
        if self.locked {
            // Closing the descriptor releases the lock anyway.
            let _ = FileExt::unlock(&*self.file.get_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_missing_path_creates_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.se7");

        let backend = FileBackend::open(&path).unwrap();
        assert_eq!(backend.size().unwrap(), 0);
        assert!(path.exists());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn open_existing_file_does_not_truncate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.se7");
        std::fs::write(&path, b"existing").unwrap();

        let mut backend = FileBackend::open(&path).unwrap();
        assert_eq!(backend.size().unwrap(), 8);

        let offset = backend.append(b"+more").unwrap();
        assert_eq!(offset, 8);
        drop(backend);

        assert_eq!(std::fs::read(&path).unwrap(), b"existing+more");
    }

    #[test]
    fn append_returns_sequential_offsets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.se7");

        let mut backend = FileBackend::open(&path).unwrap();
        assert_eq!(backend.append(b"abc").unwrap(), 0);
        assert_eq!(backend.append(b"defg").unwrap(), 3);
        assert_eq!(backend.size().unwrap(), 7);
        assert_eq!(backend.read_at(0, 7).unwrap(), b"abcdefg");
        assert_eq!(backend.read_at(3, 4).unwrap(), b"defg");
    }

    #[test]
    fn read_past_end_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.se7");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.append(b"hello").unwrap();

        let result = backend.read_at(3, 10);
        assert!(matches!(result, Err(StorageError::ReadPastEnd { .. })));
    }

    #[test]
    fn empty_append_is_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.se7");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.append(b"x").unwrap();
        assert_eq!(backend.append(b"").unwrap(), 1);
        assert_eq!(backend.size().unwrap(), 1);
    }

    #[test]
    fn truncate_cuts_off_tail() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.se7");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.append(b"complete|partial").unwrap();
        backend.truncate(8).unwrap();

        assert_eq!(backend.size().unwrap(), 8);
        assert_eq!(backend.append(b"!").unwrap(), 8);
        drop(backend);
        assert_eq!(std::fs::read(&path).unwrap(), b"complete!");
    }

    #[test]
    fn truncate_beyond_size_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.se7");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.append(b"abc").unwrap();
        assert!(backend.truncate(10).is_err());
        assert_eq!(backend.size().unwrap(), 3);
    }

    #[test]
    fn create_with_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("values.se7");

        let backend = FileBackend::open_with_create_dirs(&path).unwrap();
        assert_eq!(backend.path(), path);
        assert!(path.exists());
    }

    #[test]
    fn open_in_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("values.se7");

        let result = FileBackend::open(&path);
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[test]
    fn exclusive_open_is_released_on_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.se7");

        let first = FileBackend::open_exclusive(&path).unwrap();
        assert!(first.is_locked());

        let second = FileBackend::open_exclusive(&path);
        assert!(matches!(second, Err(StorageError::Locked { .. })));

        drop(first);
        let third = FileBackend::open_exclusive(&path).unwrap();
        assert!(third.is_locked());
    }

    #[test]
    fn lock_after_create_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("values.se7");

        let mut first = FileBackend::open_with_create_dirs(&path).unwrap();
        assert!(!first.is_locked());
        first.try_lock_exclusive().unwrap();
        first.try_lock_exclusive().unwrap();
        assert!(first.is_locked());

        let mut second = FileBackend::open(&path).unwrap();
        assert!(matches!(
            second.try_lock_exclusive(),
            Err(StorageError::Locked { .. })
        ));
        assert!(!second.is_locked());
    }

    #[test]
    fn append_offset_follows_real_end_of_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.se7");

        let mut backend = FileBackend::open(&path).unwrap();
        assert_eq!(backend.append(b"abc").unwrap(), 0);

        let mut other = OpenOptions::new().append(true).open(&path).unwrap();
        other.write_all(b"xyz").unwrap();
        drop(other);

        assert_eq!(backend.append(b"def").unwrap(), 6);
        assert_eq!(backend.size().unwrap(), 9);
        assert_eq!(backend.read_at(0, 9).unwrap(), b"abcxyzdef");
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn failed_append_keeps_size_in_step_with_file() {
        let path = Path::new("/dev/full");
        let Ok(mut backend) = FileBackend::open(path) else {
            return;
        };
        let result = backend.append(b"no space");
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert_eq!(
            backend.size().unwrap(),
            std::fs::metadata(path).unwrap().len()
        );
    }

    #[test]
    fn flush_and_sync() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.se7");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.append(b"data").unwrap();
        assert!(backend.flush().is_ok());
        assert!(backend.sync().is_ok());
    }
}

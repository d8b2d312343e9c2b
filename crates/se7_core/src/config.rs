//! Store configuration.

/// Options for opening a [`crate::Store`].
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Create missing parent directories of the store file.
    pub create_dirs: bool,

    /// Sync the sink to durable storage after every record.
    pub sync_on_write: bool,

    /// Hold an advisory exclusive lock on the store file.
    pub exclusive: bool,
}

impl StoreConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to create missing parent directories.
    #[must_use]
    pub const fn create_dirs(mut self, value: bool) -> Self {
        self.create_dirs = value;
        self
    }

    /// Sets whether to sync after every record.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Sets whether to take an exclusive lock on the file.
    #[must_use]
    pub const fn exclusive(mut self, value: bool) -> Self {
        self.exclusive = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert!(!config.create_dirs);
        assert!(!config.sync_on_write);
        assert!(!config.exclusive);
    }

    #[test]
    fn builder_pattern() {
        let config = StoreConfig::new().create_dirs(true).exclusive(true);

        assert!(config.create_dirs);
        assert!(!config.sync_on_write);
        assert!(config.exclusive);
    }
}

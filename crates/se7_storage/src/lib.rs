//! # SE7 Storage
//!
//! Byte sinks for the SE7 record store.
//!
//! Backends are **opaque byte stores**: they append raw bytes and never
//! interpret them. The record format belongs to `se7_codec`; this crate only
//! provides the transport a store writes through.
//!
//! ## Design Principles
//!
//! - Backends are simple byte sinks (append, flush, sync)
//! - Opening never truncates pre-existing content
//! - Resources are released when the backend is dropped
//! - Must be `Send + Sync`
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral stores
//! - [`FileBackend`] - For persistent stores using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use se7_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! let offset = backend.append(b"hello world").unwrap();
//! let data = backend.read_at(offset, 11).unwrap();
//! assert_eq!(&data, b"hello world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;

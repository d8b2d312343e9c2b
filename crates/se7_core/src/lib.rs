//! # SE7 Core
//!
//! A typed, self-describing binary record store.
//!
//! A [`Store`] owns one backing sink and appends named primitive values to
//! it. Every record carries its own byte-order marker, type code and name,
//! so a file can be scanned later without any external schema.
//!
//! This crate provides:
//! - [`Store`], the session object owning the sink
//! - [`StoreConfig`] for open options
//! - [`CoreError`], covering open failures and write failures
//!
//! Encoding lives in `se7_codec`, transports in `se7_storage`.
//!
//! ```
//! use se7_core::Store;
//!
//! let mut store = Store::open_in_memory();
//! store.write("boing", 27i32).unwrap();
//! assert_eq!(store.size().unwrap(), 9 + 5 + 4);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod store;
mod writer;

pub use config::StoreConfig;
pub use error::{CoreError, CoreResult, WriteCause};
pub use store::Store;
pub use writer::write_record;

pub use se7_codec::{
    width_for, ByteOrder, CodecError, Primitive, PrimitiveKind, TypeCode, TypeRegistry, WideChar,
};
pub use se7_storage::{FileBackend, InMemoryBackend, StorageBackend, StorageError};

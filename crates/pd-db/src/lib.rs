//! pd-db - Storage layer for pitchdata
//!
//! This crate provides the in-memory [`ReferentialStore`] that enforces
//! primary and foreign keys, the DuckDB backend used to read CSV sources and
//! to hold the durable native copy, and the [`PersistenceManager`] that saves
//! and restores the store as a portable JSON document or a native file.

pub mod duckdb;
pub mod error;
pub mod persist;
pub mod snapshot;
pub mod store;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use persist::{PersistenceManager, SnapshotFormat, StorageMode};
pub use snapshot::{PortableSnapshot, StoreSnapshot};
pub use store::{ReferentialStore, RelationCounts, StoreError, Upserted};

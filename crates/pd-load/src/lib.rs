//! pd-load - Staging pipeline for pitchdata
//!
//! This crate reads raw records from CSV or in-memory sources, stages them
//! into a [`ReferentialStore`](pd_db::ReferentialStore) one record at a time
//! with per-record failure isolation, and exposes the [`Pipeline`] facade
//! used to load, snapshot, clear, save and restore a store.

pub mod error;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod source;

pub use error::{LoadError, LoadResult};
pub use loader::StagingLoader;
pub use pipeline::{Pipeline, SourceMap};
pub use report::{Issue, IssueKind, LoadReport, LoadSummary};
pub use source::{line_number, CsvSource, MemorySource, RecordSource, SourceRecord};

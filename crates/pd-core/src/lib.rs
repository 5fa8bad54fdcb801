//! pd-core - Core library for pitchdata
//!
//! This crate provides the fixed relation schema, typed rows and their keys,
//! raw source records, the record validator, the per-relation record
//! transformers, and configuration parsing used by the store and loader.

pub mod config;
pub mod error;
pub mod record;
pub mod row;
pub mod schema;
mod serde_helpers;
pub mod transform;
pub mod validate;

pub use config::{DatabaseConfig, PipelineConfig, SourcesConfig};
pub use error::{CoreError, CoreResult};
pub use record::RawRecord;
pub use row::{FormerName, Goalscorer, MatchKey, MatchResult, NameKey, Row, RowKey, Shootout};
pub use schema::{ColumnDef, ColumnType, ForeignKeyDef, Relation, RelationDef};
pub use transform::{
    transformer_for, FormerNameTransformer, GoalscorerTransformer, RecordTransformer,
    ResultTransformer, ShootoutTransformer, Skip, TransformError, Transformed,
};
pub use validate::missing_fields;

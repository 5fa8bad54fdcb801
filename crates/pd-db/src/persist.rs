//! Saving and restoring a store
//!
//! A store is persisted in one of two formats. The portable format is a
//! JSON [`PortableSnapshot`] document. The native format is a DuckDB
//! database file with one keyed table per relation. [`PersistenceManager::load`]
//! detects the format from the file contents (the DuckDB magic header or a
//! JSON object), so either can be restored regardless of the manager's
//! [`StorageMode`].

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use crate::snapshot::PortableSnapshot;
use crate::store::{ReferentialStore, RelationCounts};
use pd_core::{DatabaseConfig, Relation};
use std::fmt;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Where the store lives between process runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    /// Memory only; saves write the portable document
    Ephemeral,
    /// Backed by a native DuckDB file at this path
    Durable(PathBuf),
}

impl StorageMode {
    /// Resolve the mode from configuration, relative to `root`
    pub fn from_config(config: &DatabaseConfig, root: &Path) -> Self {
        if config.is_ephemeral() {
            StorageMode::Ephemeral
        } else {
            StorageMode::Durable(root.join(&config.path))
        }
    }

    /// The native database file, if any
    pub fn native_path(&self) -> Option<&Path> {
        match self {
            StorageMode::Ephemeral => None,
            StorageMode::Durable(path) => Some(path),
        }
    }
}

/// On-disk format of a saved store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// JSON document
    Portable,
    /// DuckDB database file
    Native,
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotFormat::Portable => write!(f, "portable"),
            SnapshotFormat::Native => write!(f, "native"),
        }
    }
}

/// Saves and restores a [`ReferentialStore`]
#[derive(Debug, Clone)]
pub struct PersistenceManager {
    mode: StorageMode,
}

impl PersistenceManager {
    pub fn new(mode: StorageMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> &StorageMode {
        &self.mode
    }

    /// Write the whole store to `target`.
    ///
    /// In durable mode the native file is rewritten and then copied to
    /// `target`; otherwise the portable document is written.
    pub fn save(&self, store: &ReferentialStore, target: &Path) -> DbResult<SnapshotFormat> {
        let counts = store.counts();
        let format = match &self.mode {
            StorageMode::Ephemeral => {
                write_portable(&PortableSnapshot::export(store), target)?;
                SnapshotFormat::Portable
            }
            StorageMode::Durable(native) => {
                write_native(store, native)?;
                if !same_file(native, target) {
                    ensure_parent(target)?;
                    fs::copy(native, target).map_err(|e| DbError::io(target, e))?;
                }
                SnapshotFormat::Native
            }
        };

        log::info!(
            "Saved {} rows to {} ({})",
            counts.total(),
            target.display(),
            format
        );
        Ok(format)
    }

    /// Restore rows from `source` into `store` by upsert.
    ///
    /// Existing rows with the same key are replaced and unrelated rows are
    /// kept, so loading the same file twice leaves the store unchanged.
    pub fn load(&self, store: &mut ReferentialStore, source: &Path) -> DbResult<SnapshotFormat> {
        let format = detect_format(source)?;
        let doc = match format {
            SnapshotFormat::Portable => read_portable(source)?,
            SnapshotFormat::Native => read_native(source)?,
        };
        let applied = doc.import_into(store)?;

        log::info!(
            "Restored {} rows from {} ({})",
            applied.total(),
            source.display(),
            format
        );
        Ok(format)
    }

    /// Rewrite the native file from the store; a no-op when ephemeral
    pub fn flush(&self, store: &ReferentialStore) -> DbResult<Option<RelationCounts>> {
        match &self.mode {
            StorageMode::Ephemeral => Ok(None),
            StorageMode::Durable(native) => write_native(store, native).map(Some),
        }
    }

    /// Load the native file into `store` if it already exists.
    ///
    /// Returns whether anything was restored.
    pub fn restore_durable(&self, store: &mut ReferentialStore) -> DbResult<bool> {
        match self.mode.native_path() {
            Some(native) if native.exists() => {
                self.load(store, native)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Magic bytes of a DuckDB database file, after its 8-byte checksum
const DUCKDB_MAGIC: &[u8; 4] = b"DUCK";
const DUCKDB_MAGIC_OFFSET: usize = 8;

/// Tell a native file by its DuckDB magic and a portable document by a
/// leading `{`. Anything else is rejected.
pub fn detect_format(path: &Path) -> DbResult<SnapshotFormat> {
    let file = fs::File::open(path).map_err(|e| DbError::io(path, e))?;
    let mut reader = BufReader::new(file);

    let mut head = Vec::with_capacity(DUCKDB_MAGIC_OFFSET + DUCKDB_MAGIC.len());
    reader
        .by_ref()
        .take((DUCKDB_MAGIC_OFFSET + DUCKDB_MAGIC.len()) as u64)
        .read_to_end(&mut head)
        .map_err(|e| DbError::io(path, e))?;
    if head.get(DUCKDB_MAGIC_OFFSET..) == Some(&DUCKDB_MAGIC[..]) {
        return Ok(SnapshotFormat::Native);
    }

    let mut first = None;
    for byte in head.iter().copied().map(Ok).chain(reader.bytes()) {
        let byte = byte.map_err(|e| DbError::io(path, e))?;
        if !byte.is_ascii_whitespace() {
            first = Some(byte);
            break;
        }
    }

    match first {
        Some(b'{') => Ok(SnapshotFormat::Portable),
        Some(_) => Err(DbError::InvalidSnapshot {
            path: path.display().to_string(),
            message: "neither a JSON snapshot nor a DuckDB database".to_string(),
        }),
        None => Err(DbError::InvalidSnapshot {
            path: path.display().to_string(),
            message: "file is empty".to_string(),
        }),
    }
}

/// Write a portable document atomically
pub fn write_portable(doc: &PortableSnapshot, path: &Path) -> DbResult<()> {
    ensure_parent(path)?;

    let json = serde_json::to_string_pretty(doc).map_err(|e| DbError::InvalidSnapshot {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    // Write to a temporary file first
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json).map_err(|e| DbError::io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| DbError::io(path, e))?;
    Ok(())
}

/// Read a portable document
pub fn read_portable(path: &Path) -> DbResult<PortableSnapshot> {
    let content = fs::read_to_string(path).map_err(|e| DbError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| DbError::InvalidSnapshot {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn write_native(store: &ReferentialStore, path: &Path) -> DbResult<RelationCounts> {
    ensure_parent(path)?;
    let db = DuckDbBackend::from_path(path)?;
    let counts = db.write_store(store)?;
    log::debug!("Wrote native file {}", path.display());
    Ok(counts)
}

fn read_native(path: &Path) -> DbResult<PortableSnapshot> {
    let db = DuckDbBackend::open_existing(path)?;
    let mut rows = Vec::new();
    for relation in Relation::ALL {
        rows.extend(db.read_rows(relation)?);
    }
    Ok(PortableSnapshot::from_rows(rows))
}

fn ensure_parent(path: &Path) -> DbResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| DbError::io(parent, e))
        }
        _ => Ok(()),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
#[path = "persist_test.rs"]
mod tests;

//! Record sources
//!
//! A [`RecordSource`] yields the raw records of one relation in source
//! order. Reading is the only suspension point of a load.

use crate::error::{LoadError, LoadResult};
use async_trait::async_trait;
use pd_core::RawRecord;
use std::path::{Path, PathBuf};

/// Line of the record at 0-based `index` when every record takes one line
pub fn line_number(index: usize) -> usize {
    index + 2
}

/// A raw record with its position in the source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    /// 1-based line the record starts on; the header is line 1
    pub line: usize,
    pub record: RawRecord,
    /// Cells beyond the last header column
    pub extra_cells: Vec<String>,
}

impl SourceRecord {
    pub fn new(line: usize, record: RawRecord) -> Self {
        Self {
            line,
            record,
            extra_cells: Vec::new(),
        }
    }

    /// Number records one line each, starting after the header
    pub fn numbered<I>(records: I) -> Vec<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Self::new(line_number(index), record))
            .collect()
    }
}

/// A table of raw records with a header row
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Read every record in source order
    async fn read_records(&self) -> LoadResult<Vec<SourceRecord>>;

    /// Human-readable origin used in reports and logs
    fn describe(&self) -> String;
}

/// CSV file with a header row
///
/// Cells are decoded as UTF-8 with invalid bytes replaced, so a badly
/// encoded row still reaches the loader. Empty cells and cells missing from
/// short rows read as `None`.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for CsvSource {
    async fn read_records(&self) -> LoadResult<Vec<SourceRecord>> {
        let path = self.path.clone();
        let source_name = self.describe();

        let read = tokio::task::spawn_blocking(move || read_csv_file(&path))
            .await
            .map_err(|e| LoadError::Task {
                source_name: source_name.clone(),
                message: e.to_string(),
            })?;

        read.map_err(|cause| LoadError::SourceUnreadable { source_name, cause })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn read_csv_file(path: &Path) -> Result<Vec<SourceRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|cell| decode_cell(cell).trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for (index, row) in reader.byte_records().enumerate() {
        let row = row?;
        let line = row
            .position()
            .map_or(line_number(index), |p| p.line() as usize);
        if std::str::from_utf8(row.as_slice()).is_err() {
            log::warn!("{}:{}: invalid UTF-8 replaced", path.display(), line);
        }

        let mut record = RawRecord::new();
        for (i, name) in headers.iter().enumerate() {
            let value = row.get(i).map(decode_cell).filter(|v| !v.is_empty());
            record.set(name.clone(), value);
        }
        let extra_cells = row.iter().skip(headers.len()).map(decode_cell).collect();

        records.push(SourceRecord {
            line,
            record,
            extra_cells,
        });
    }
    Ok(records)
}

fn decode_cell(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Records already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    records: Vec<RawRecord>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn read_records(&self) -> LoadResult<Vec<SourceRecord>> {
        Ok(SourceRecord::numbered(self.records.clone()))
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;

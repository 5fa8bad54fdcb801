//! Pipeline facade
//!
//! A [`Pipeline`] owns one store and its persistence settings. It is the
//! handle callers load sources through, take snapshots from, and save or
//! restore. In durable mode every change is flushed to the native file.

use crate::error::LoadResult;
use crate::loader::StagingLoader;
use crate::report::{LoadReport, LoadSummary};
use crate::source::{CsvSource, RecordSource};
use pd_core::{transformer_for, PipelineConfig, Relation};
use pd_db::{
    PersistenceManager, PortableSnapshot, ReferentialStore, RelationCounts, SnapshotFormat,
    StorageMode, StoreSnapshot,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Source file per relation
pub type SourceMap = BTreeMap<Relation, PathBuf>;

/// Store handle with loading and persistence
#[derive(Debug)]
pub struct Pipeline {
    store: ReferentialStore,
    persistence: PersistenceManager,
}

impl Pipeline {
    /// Create a pipeline with an empty store
    pub fn new(mode: StorageMode) -> Self {
        Self {
            store: ReferentialStore::new(),
            persistence: PersistenceManager::new(mode),
        }
    }

    /// Create a pipeline from configuration.
    ///
    /// Paths resolve against `root`. A durable store whose native file
    /// already exists starts with that file's rows.
    pub fn open(config: &PipelineConfig, root: &Path) -> LoadResult<Self> {
        config.validate()?;
        let mut pipeline = Self::new(StorageMode::from_config(&config.database, root));
        if pipeline.persistence.restore_durable(&mut pipeline.store)? {
            log::info!(
                "Opened durable store with {} rows",
                pipeline.store.counts().total()
            );
        }
        Ok(pipeline)
    }

    pub fn store(&self) -> &ReferentialStore {
        &self.store
    }

    pub fn mode(&self) -> &StorageMode {
        self.persistence.mode()
    }

    /// Load one relation from a CSV file
    pub async fn load_relation(&mut self, relation: Relation, path: &Path) -> LoadResult<LoadReport> {
        self.load_source(relation, &CsvSource::new(path)).await
    }

    /// Load one relation from any record source.
    ///
    /// An unreadable source fails before anything is inserted.
    pub async fn load_source(
        &mut self,
        relation: Relation,
        source: &dyn RecordSource,
    ) -> LoadResult<LoadReport> {
        let records = source.read_records().await?;
        let report = StagingLoader::new(&mut self.store).load(
            transformer_for(relation),
            &source.describe(),
            &records,
        );

        if report.inserted > 0 {
            self.persistence.flush(&self.store)?;
        }
        Ok(report)
    }

    /// Load every relation present in `sources`, parents first.
    ///
    /// Stops at the first fatal error; relations loaded before it keep
    /// their rows.
    pub async fn load_all(&mut self, sources: &SourceMap) -> LoadResult<LoadSummary> {
        let mut summary = LoadSummary::default();
        for relation in Relation::ALL {
            let Some(path) = sources.get(&relation) else {
                continue;
            };
            let report = self.load_relation(relation, path).await?;
            summary.push(report);
        }
        Ok(summary)
    }

    /// Load the sources named in `config`, resolved against `root`
    pub async fn load_configured(
        &mut self,
        config: &PipelineConfig,
        root: &Path,
    ) -> LoadResult<LoadSummary> {
        let sources: SourceMap = config.source_paths(root).into_iter().collect();
        self.load_all(&sources).await
    }

    /// Current row counts
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::capture(&self.store)
    }

    /// Delete every row
    pub fn clear_all(&mut self) -> LoadResult<()> {
        self.store.clear_all();
        self.persistence.flush(&self.store)?;
        Ok(())
    }

    /// Delete every row of one relation.
    ///
    /// Clearing `results` also clears the relations that reference it, so
    /// the store never holds orphans.
    pub fn clear(&mut self, relation: Relation) -> LoadResult<()> {
        for dependent in Relation::DELETE_ORDER {
            if dependent.parent() == Some(relation) {
                log::info!("Clearing {} with its parent {}", dependent, relation);
                self.store.clear(dependent);
            }
        }
        self.store.clear(relation);
        self.persistence.flush(&self.store)?;
        Ok(())
    }

    /// Save the whole store to `path`
    pub async fn save(&self, path: &Path) -> LoadResult<SnapshotFormat> {
        Ok(self.persistence.save(&self.store, path)?)
    }

    /// Restore rows from `path`, detecting its format
    pub async fn load(&mut self, path: &Path) -> LoadResult<SnapshotFormat> {
        let format = self.persistence.load(&mut self.store, path)?;
        self.persistence.flush(&self.store)?;
        Ok(format)
    }

    /// The portable document for the current rows
    pub fn export(&self) -> PortableSnapshot {
        PortableSnapshot::export(&self.store)
    }

    /// Upsert every row of `doc`
    pub fn import(&mut self, doc: PortableSnapshot) -> LoadResult<RelationCounts> {
        let applied = doc.import_into(&mut self.store)?;
        self.persistence.flush(&self.store)?;
        Ok(applied)
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;

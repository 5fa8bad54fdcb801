//! Store snapshots
//!
//! [`StoreSnapshot`] is the verification view of a store: row counts plus a
//! timestamp. [`PortableSnapshot`] is the backend-independent document
//! holding every row of every relation.

use crate::error::DbResult;
use crate::store::{ReferentialStore, RelationCounts};
use chrono::{DateTime, Utc};
use pd_core::{FormerName, Goalscorer, MatchResult, Relation, Row, Shootout};
use serde::{Deserialize, Serialize};

/// Per-relation row counts at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub results_count: usize,
    pub goalscorers_count: usize,
    pub shootouts_count: usize,
    pub former_names_count: usize,
    pub last_updated: DateTime<Utc>,
}

impl StoreSnapshot {
    /// Capture the current counts of `store`
    pub fn capture(store: &ReferentialStore) -> Self {
        Self::from_counts(store.counts())
    }

    pub fn from_counts(counts: RelationCounts) -> Self {
        Self {
            results_count: counts.results,
            goalscorers_count: counts.goalscorers,
            shootouts_count: counts.shootouts,
            former_names_count: counts.former_names,
            last_updated: Utc::now(),
        }
    }

    pub fn counts(&self) -> RelationCounts {
        RelationCounts {
            results: self.results_count,
            goalscorers: self.goalscorers_count,
            shootouts: self.shootouts_count,
            former_names: self.former_names_count,
        }
    }
}

/// Full contents of a store, one row sequence per relation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PortableSnapshot {
    pub results: Vec<MatchResult>,
    pub goalscorers: Vec<Goalscorer>,
    pub shootouts: Vec<Shootout>,
    pub former_names: Vec<FormerName>,
}

impl PortableSnapshot {
    /// Copy every row out of `store`
    pub fn export(store: &ReferentialStore) -> Self {
        Self::from_rows(
            Relation::ALL
                .iter()
                .flat_map(|&relation| store.rows(relation).iter().cloned()),
        )
    }

    /// Group rows of any relation into a document, keeping their order
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
    {
        let mut doc = Self::default();
        for row in rows {
            doc.push(row);
        }
        doc
    }

    fn push(&mut self, row: Row) {
        match row {
            Row::Result(r) => self.results.push(r),
            Row::Goalscorer(g) => self.goalscorers.push(g),
            Row::Shootout(s) => self.shootouts.push(s),
            Row::FormerName(n) => self.former_names.push(n),
        }
    }

    pub fn counts(&self) -> RelationCounts {
        RelationCounts {
            results: self.results.len(),
            goalscorers: self.goalscorers.len(),
            shootouts: self.shootouts.len(),
            former_names: self.former_names.len(),
        }
    }

    /// Upsert every row into `store`, parents first.
    ///
    /// Returns the number of rows applied per relation.
    pub fn import_into(self, store: &mut ReferentialStore) -> DbResult<RelationCounts> {
        Ok(RelationCounts {
            results: store.upsert_all(self.results.into_iter().map(Row::from))?,
            goalscorers: store.upsert_all(self.goalscorers.into_iter().map(Row::from))?,
            shootouts: store.upsert_all(self.shootouts.into_iter().map(Row::from))?,
            former_names: store.upsert_all(self.former_names.into_iter().map(Row::from))?,
        })
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;

//! In-memory referential store
//!
//! [`ReferentialStore`] holds the rows of the four relations in insertion
//! order. Each relation keeps a hash index from [`RowKey`] to row positions:
//! primary-key uniqueness and foreign-key existence are both checked with a
//! single lookup at insert time. Deletion is administrative and never checks
//! foreign keys.

use pd_core::{MatchKey, Relation, Row, RowKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Rejection of a single row by the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A row with the same primary key already exists (S001)
    #[error("[S001] Duplicate key {key} in {relation}")]
    DuplicateKey { relation: Relation, key: String },

    /// The referenced `results` row does not exist (S002)
    #[error("[S002] Foreign key violation in {relation}: no {parent} row for {key}")]
    ForeignKeyViolation {
        relation: Relation,
        parent: Relation,
        key: MatchKey,
    },
}

/// What an upsert did with a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Inserted,
    Replaced,
}

/// Row counts per relation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationCounts {
    pub results: usize,
    pub goalscorers: usize,
    pub shootouts: usize,
    pub former_names: usize,
}

impl RelationCounts {
    pub fn get(&self, relation: Relation) -> usize {
        match relation {
            Relation::Result => self.results,
            Relation::Goalscorer => self.goalscorers,
            Relation::Shootout => self.shootouts,
            Relation::FormerName => self.former_names,
        }
    }

    pub fn set(&mut self, relation: Relation, count: usize) {
        match relation {
            Relation::Result => self.results = count,
            Relation::Goalscorer => self.goalscorers = count,
            Relation::Shootout => self.shootouts = count,
            Relation::FormerName => self.former_names = count,
        }
    }

    pub fn total(&self) -> usize {
        self.results + self.goalscorers + self.shootouts + self.former_names
    }
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Row>,
    index: HashMap<RowKey, Vec<usize>>,
}

impl Table {
    fn contains(&self, key: &RowKey) -> bool {
        self.index.contains_key(key)
    }

    fn push(&mut self, key: RowKey, row: Row) {
        let pos = self.rows.len();
        self.rows.push(row);
        self.index.entry(key).or_default().push(pos);
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.index.clear();
    }
}

/// Rows of all four relations with their key indexes
///
/// The store assumes a single writer; it is a plain owned value mutated
/// through `&mut self`.
#[derive(Debug, Default)]
pub struct ReferentialStore {
    tables: [Table; 4],
}

fn slot(relation: Relation) -> usize {
    match relation {
        Relation::Result => 0,
        Relation::Goalscorer => 1,
        Relation::Shootout => 2,
        Relation::FormerName => 3,
    }
}

impl ReferentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, relation: Relation) -> &Table {
        &self.tables[slot(relation)]
    }

    fn table_mut(&mut self, relation: Relation) -> &mut Table {
        &mut self.tables[slot(relation)]
    }

    fn check_parent(&self, row: &Row) -> Result<(), StoreError> {
        let (Some(key), Some(parent)) = (row.parent_key(), row.relation().parent()) else {
            return Ok(());
        };
        if self.table(parent).contains(&RowKey::Match(key.clone())) {
            return Ok(());
        }
        Err(StoreError::ForeignKeyViolation {
            relation: row.relation(),
            parent,
            key,
        })
    }

    /// Insert a row, rejecting primary-key duplicates and orphans.
    ///
    /// Never overwrites an existing row. Goalscorer rows have no primary key
    /// and are always appended.
    pub fn insert(&mut self, row: Row) -> Result<(), StoreError> {
        let relation = row.relation();
        if let Some(key) = row.primary_key() {
            if self.table(relation).contains(&key) {
                return Err(StoreError::DuplicateKey {
                    relation,
                    key: key.to_string(),
                });
            }
        }
        self.check_parent(&row)?;

        let key = row.index_key();
        self.table_mut(relation).push(key, row);
        Ok(())
    }

    /// Insert a row, replacing an existing row with the same key.
    ///
    /// Foreign keys are still enforced. For Goalscorer rows the key is the
    /// whole row, so upserting an identical row is a no-op.
    pub fn upsert(&mut self, row: Row) -> Result<Upserted, StoreError> {
        self.upsert_occurrence(row, 0)
    }

    /// Upsert a batch of rows, returning how many were applied.
    ///
    /// Identical Goalscorer rows inside one batch are matched by occurrence:
    /// the k-th copy in the batch replaces the k-th existing copy, or is
    /// appended when the store holds fewer. Restoring the same batch twice
    /// therefore leaves the store unchanged.
    pub fn upsert_all<I>(&mut self, rows: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut seen: HashMap<RowKey, usize> = HashMap::new();
        let mut applied = 0;
        for row in rows {
            let occurrence = if row.relation().has_primary_key() {
                0
            } else {
                let n = seen.entry(row.index_key()).or_insert(0);
                *n += 1;
                *n - 1
            };
            self.upsert_occurrence(row, occurrence)?;
            applied += 1;
        }
        Ok(applied)
    }

    fn upsert_occurrence(&mut self, row: Row, occurrence: usize) -> Result<Upserted, StoreError> {
        self.check_parent(&row)?;

        let key = row.index_key();
        let table = self.table_mut(row.relation());
        let existing = table
            .index
            .get(&key)
            .and_then(|positions| positions.get(occurrence))
            .copied();

        match existing {
            Some(pos) => {
                table.rows[pos] = row;
                Ok(Upserted::Replaced)
            }
            None => {
                table.push(key, row);
                Ok(Upserted::Inserted)
            }
        }
    }

    /// Point lookup by key
    pub fn get(&self, relation: Relation, key: &RowKey) -> Option<&Row> {
        let table = self.table(relation);
        let pos = *table.index.get(key)?.first()?;
        table.rows.get(pos)
    }

    /// Whether a row with this key exists
    pub fn contains(&self, relation: Relation, key: &RowKey) -> bool {
        self.table(relation).contains(key)
    }

    /// All rows of a relation in insertion order
    pub fn rows(&self, relation: Relation) -> &[Row] {
        &self.table(relation).rows
    }

    pub fn len(&self, relation: Relation) -> usize {
        self.table(relation).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(|t| t.rows.is_empty())
    }

    /// Delete every row of one relation
    pub fn clear(&mut self, relation: Relation) {
        self.table_mut(relation).clear();
    }

    /// Delete every row, dependents before parents
    pub fn clear_all(&mut self) {
        for relation in Relation::DELETE_ORDER {
            self.clear(relation);
        }
    }

    pub fn counts(&self) -> RelationCounts {
        let mut counts = RelationCounts::default();
        for relation in Relation::ALL {
            counts.set(relation, self.len(relation));
        }
        counts
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

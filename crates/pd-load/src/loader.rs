//! Staging loader
//!
//! Runs the records of one relation through validate, transform and insert
//! strictly in source order. A rejected record becomes an [`Issue`] and the
//! load moves on to the next record.

use crate::report::{Issue, IssueKind, LoadReport};
use crate::source::SourceRecord;
use pd_core::{missing_fields, RecordTransformer, Relation, Skip, Transformed};
use pd_db::{ReferentialStore, StoreError};

/// Loads raw records of one relation into a store
pub struct StagingLoader<'a> {
    store: &'a mut ReferentialStore,
}

impl<'a> StagingLoader<'a> {
    pub fn new(store: &'a mut ReferentialStore) -> Self {
        Self { store }
    }

    /// Load `records` through `transformer`, returning the report
    pub fn load(
        &mut self,
        transformer: &dyn RecordTransformer,
        source: &str,
        records: &[SourceRecord],
    ) -> LoadReport {
        let relation = transformer.relation();
        let mut report = LoadReport::new(relation, source);

        for record in records {
            match self.load_record(transformer, record) {
                Ok(true) => report.inserted += 1,
                Ok(false) => report.skipped += 1,
                Err(issue) => {
                    if issue.kind.is_warning() {
                        log::warn!("{} {}", issue, issue.record);
                    } else {
                        log::error!("{} {}", issue, issue.record);
                    }
                    report.issues.push(issue);
                }
            }
        }

        log::info!(
            "Loaded {} {} rows from {} ({} skipped, {} errors, {} warnings)",
            report.inserted,
            relation,
            source,
            report.skipped,
            report.errors().count(),
            report.warnings().count()
        );
        report
    }

    /// Returns whether the record was inserted, or the issue rejecting it
    fn load_record(
        &mut self,
        transformer: &dyn RecordTransformer,
        source_record: &SourceRecord,
    ) -> Result<bool, Issue> {
        let relation = transformer.relation();
        let SourceRecord {
            line,
            record,
            extra_cells,
        } = source_record;
        let line = *line;
        let issue = |kind: IssueKind, fields: Vec<String>, detail: String| Issue {
            kind,
            relation,
            line,
            fields,
            detail,
            record: record.clone(),
        };

        if !extra_cells.is_empty() {
            let detail = format!(
                "row has {} cells beyond the header: {:?}",
                extra_cells.len(),
                extra_cells
            );
            return Err(issue(IssueKind::InvalidValue, Vec::new(), detail));
        }

        let missing = missing_fields(record, transformer.required_fields());
        if !missing.is_empty() {
            let detail = format!("missing required fields: {}", missing.join(", "));
            return Err(issue(IssueKind::MissingFields, missing, detail));
        }

        let row = match transformer.transform(record, line) {
            Ok(Transformed::Row(row)) => row,
            Ok(Transformed::Skip(Skip::BlankName)) => {
                log::debug!("Skipping {} line {}: blank name", relation, line);
                return Ok(false);
            }
            Ok(Transformed::Skip(Skip::InvalidScore {
                home_score,
                away_score,
            })) => {
                return Err(issue(
                    IssueKind::InvalidValue,
                    vec!["home_score".to_string(), "away_score".to_string()],
                    format!(
                        "invalid score: home_score={:?}, away_score={:?}",
                        home_score, away_score
                    ),
                ));
            }
            Err(e) => {
                let fields = vec![e.field.clone()];
                return Err(issue(IssueKind::InvalidValue, fields, e.to_string()));
            }
        };

        match self.store.insert(row) {
            Ok(()) => Ok(true),
            Err(e @ StoreError::DuplicateKey { .. }) => {
                let fields = key_fields(transformer);
                Err(issue(IssueKind::DuplicateRecord, fields, e.to_string()))
            }
            Err(e @ StoreError::ForeignKeyViolation { .. }) => Err(issue(
                IssueKind::ReferentialError,
                match_key_fields(),
                e.to_string(),
            )),
        }
    }
}

/// Source columns forming the primary key of the transformer's relation
fn key_fields(transformer: &dyn RecordTransformer) -> Vec<String> {
    match transformer.relation() {
        Relation::FormerName => vec!["current".to_string(), "former".to_string()],
        _ => match_key_fields(),
    }
}

fn match_key_fields() -> Vec<String> {
    ["date", "home_team", "away_team"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;

//! Load reports
//!
//! Every record a load rejects becomes an [`Issue`] carrying the relation,
//! the source line, the offending fields, and the raw record, so the source
//! row can be located and fixed without re-running the load.

use pd_core::{RawRecord, Relation};
use pd_db::RelationCounts;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Classification of a rejected record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueKind {
    /// Required fields absent or blank
    MissingFields,
    /// A field is present but cannot be parsed
    InvalidValue,
    /// Primary key already present in the store
    DuplicateRecord,
    /// Referenced `results` row does not exist
    ReferentialError,
}

impl IssueKind {
    /// Duplicates are warnings; everything else is an error
    pub fn is_warning(&self) -> bool {
        matches!(self, IssueKind::DuplicateRecord)
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueKind::MissingFields => "MissingFields",
            IssueKind::InvalidValue => "InvalidValue",
            IssueKind::DuplicateRecord => "DuplicateRecord",
            IssueKind::ReferentialError => "ReferentialError",
        };
        f.write_str(name)
    }
}

/// One rejected record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub relation: Relation,
    /// 1-based source line, counting the header as line 1
    pub line: usize,
    /// Source fields involved in the rejection
    pub fields: Vec<String>,
    /// Diagnostic message
    pub detail: String,
    /// The record as read from the source
    pub record: RawRecord,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {} at line {}: {}",
            self.kind, self.relation, self.line, self.detail
        )
    }
}

/// Outcome of loading one relation from one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub relation: Relation,
    pub source: String,
    /// Rows inserted into the store
    pub inserted: usize,
    /// Records dropped without an issue (blank former names)
    pub skipped: usize,
    pub issues: Vec<Issue>,
}

impl LoadReport {
    pub fn new(relation: Relation, source: impl Into<String>) -> Self {
        Self {
            relation,
            source: source.into(),
            inserted: 0,
            skipped: 0,
            issues: Vec::new(),
        }
    }

    /// Records seen by the load
    pub fn processed(&self) -> usize {
        self.inserted + self.skipped + self.issues.len()
    }

    /// Issues that are errors
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| !i.kind.is_warning())
    }

    /// Issues that are warnings
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.kind.is_warning())
    }

    /// Number of issues of one kind
    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Reports of a multi-relation load, keyed by relation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadSummary {
    pub reports: BTreeMap<Relation, LoadReport>,
}

impl LoadSummary {
    pub fn get(&self, relation: Relation) -> Option<&LoadReport> {
        self.reports.get(&relation)
    }

    /// Inserted rows per relation
    pub fn counts(&self) -> RelationCounts {
        let mut counts = RelationCounts::default();
        for (relation, report) in &self.reports {
            counts.set(*relation, report.inserted);
        }
        counts
    }

    /// Issues across every relation
    pub fn issue_count(&self) -> usize {
        self.reports.values().map(|r| r.issues.len()).sum()
    }

    pub(crate) fn push(&mut self, report: LoadReport) {
        self.reports.insert(report.relation, report);
    }
}

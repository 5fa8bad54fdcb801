//! Typed rows and their keys
//!
//! Rows are plain owned values. Field names serialize in camelCase so the
//! portable snapshot document keeps the column names of the native tables.

use crate::schema::Relation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a match: `(date, homeTeam, awayTeam)`
///
/// Shared by `results` and `shootouts`, and the foreign key target of
/// `goalscorers` and `shootouts`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchKey {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
}

impl MatchKey {
    pub fn new(
        date: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
        }
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.date, self.home_team, self.away_team)
    }
}

/// Primary key of a former name: `(currentName, formerName)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameKey {
    pub current_name: String,
    pub former_name: String,
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.current_name, self.former_name)
    }
}

/// A match result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: i64,
    pub away_goals: i64,
    pub tournament: String,
    pub city: String,
    pub country: String,
    pub neutral: bool,
}

impl MatchResult {
    pub fn key(&self) -> MatchKey {
        MatchKey::new(&self.date, &self.home_team, &self.away_team)
    }
}

/// A goal scored in a match
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goalscorer {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub scorer: String,
    /// Minute of the goal; `None` when the source did not record it
    pub minute: Option<i64>,
    pub own_goal: bool,
    pub penalty: bool,
}

impl Goalscorer {
    pub fn match_key(&self) -> MatchKey {
        MatchKey::new(&self.date, &self.home_team, &self.away_team)
    }
}

/// A penalty shootout
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shootout {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub winner: String,
}

impl Shootout {
    pub fn match_key(&self) -> MatchKey {
        MatchKey::new(&self.date, &self.home_team, &self.away_team)
    }
}

/// A historical team name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormerName {
    pub current_name: String,
    pub former_name: String,
    pub start_date: String,
    pub end_date: String,
}

impl FormerName {
    pub fn key(&self) -> NameKey {
        NameKey {
            current_name: self.current_name.clone(),
            former_name: self.former_name.clone(),
        }
    }
}

/// A row of any relation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Row {
    Result(MatchResult),
    Goalscorer(Goalscorer),
    Shootout(Shootout),
    FormerName(FormerName),
}

/// Lookup key of a row within its relation
///
/// Keyed relations use their primary key. Goalscorer rows have none, so they
/// are identified by their full value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Match(MatchKey),
    Name(NameKey),
    Goal(Goalscorer),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Match(k) => k.fmt(f),
            RowKey::Name(k) => k.fmt(f),
            RowKey::Goal(g) => write!(
                f,
                "({}, {}, {}, {}, {:?})",
                g.date, g.home_team, g.away_team, g.scorer, g.minute
            ),
        }
    }
}

impl Row {
    /// Relation this row belongs to
    pub fn relation(&self) -> Relation {
        match self {
            Row::Result(_) => Relation::Result,
            Row::Goalscorer(_) => Relation::Goalscorer,
            Row::Shootout(_) => Relation::Shootout,
            Row::FormerName(_) => Relation::FormerName,
        }
    }

    /// Primary key, if the relation defines one
    pub fn primary_key(&self) -> Option<RowKey> {
        match self {
            Row::Result(r) => Some(RowKey::Match(r.key())),
            Row::Shootout(s) => Some(RowKey::Match(s.match_key())),
            Row::FormerName(n) => Some(RowKey::Name(n.key())),
            Row::Goalscorer(_) => None,
        }
    }

    /// Index key: the primary key, or the full row for keyless relations
    pub fn index_key(&self) -> RowKey {
        match self {
            Row::Result(r) => RowKey::Match(r.key()),
            Row::Shootout(s) => RowKey::Match(s.match_key()),
            Row::FormerName(n) => RowKey::Name(n.key()),
            Row::Goalscorer(g) => RowKey::Goal(g.clone()),
        }
    }

    /// Key of the referenced `results` row, if this relation has a foreign key
    pub fn parent_key(&self) -> Option<MatchKey> {
        match self {
            Row::Goalscorer(g) => Some(g.match_key()),
            Row::Shootout(s) => Some(s.match_key()),
            Row::Result(_) | Row::FormerName(_) => None,
        }
    }
}

impl From<MatchResult> for Row {
    fn from(r: MatchResult) -> Self {
        Row::Result(r)
    }
}

impl From<Goalscorer> for Row {
    fn from(g: Goalscorer) -> Self {
        Row::Goalscorer(g)
    }
}

impl From<Shootout> for Row {
    fn from(s: Shootout) -> Self {
        Row::Shootout(s)
    }
}

impl From<FormerName> for Row {
    fn from(n: FormerName) -> Self {
        Row::FormerName(n)
    }
}

#[cfg(test)]
#[path = "row_test.rs"]
mod tests;

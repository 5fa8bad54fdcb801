//! Per-relation record transformers
//!
//! A transformer turns a [`RawRecord`] that already passed required-field
//! validation into a typed [`Row`]. Expected rejections (a non-numeric score,
//! a blank former name) come back as [`Transformed::Skip`]; anything else
//! that fails to parse is a [`TransformError`].

use crate::record::RawRecord;
use crate::row::{FormerName, Goalscorer, MatchResult, Row, Shootout};
use crate::schema::Relation;
use thiserror::Error;

/// Outcome of transforming one record
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    Row(Row),
    Skip(Skip),
}

/// Reason a record was deliberately not turned into a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    /// A score field was present but not an integer
    InvalidScore { home_score: String, away_score: String },
    /// The resolved team name was blank; not reported as an error
    BlankName,
}

impl Skip {
    /// Whether this skip is reported as a data-quality issue
    pub fn is_silent(&self) -> bool {
        matches!(self, Skip::BlankName)
    }
}

/// A field value that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value for '{field}' at line {line}: {value:?} ({reason})")]
pub struct TransformError {
    pub field: String,
    pub value: String,
    pub line: usize,
    pub reason: String,
}

/// Converts validated raw records of one relation into typed rows
pub trait RecordTransformer: Send + Sync {
    /// Relation produced by this transformer
    fn relation(&self) -> Relation;

    /// Source fields that must be present and non-blank
    fn required_fields(&self) -> &'static [&'static str];

    /// Transform a validated record found at 1-based source `line`
    fn transform(&self, record: &RawRecord, line: usize) -> Result<Transformed, TransformError>;
}

/// Look up the transformer for a relation
pub fn transformer_for(relation: Relation) -> &'static dyn RecordTransformer {
    match relation {
        Relation::Result => &ResultTransformer,
        Relation::Goalscorer => &GoalscorerTransformer,
        Relation::Shootout => &ShootoutTransformer,
        Relation::FormerName => &FormerNameTransformer,
    }
}

/// Parse the leading integer of `value`.
///
/// Leading whitespace and a sign are accepted; parsing stops at the first
/// non-digit, so `"2.0"` yields 2. Returns `None` when no digit is found.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// `results.csv` → [`MatchResult`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultTransformer;

impl RecordTransformer for ResultTransformer {
    fn relation(&self) -> Relation {
        Relation::Result
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[
            "date",
            "home_team",
            "away_team",
            "home_score",
            "away_score",
            "tournament",
            "city",
            "country",
            "neutral",
        ]
    }

    fn transform(&self, record: &RawRecord, _line: usize) -> Result<Transformed, TransformError> {
        let home_score = record.text("home_score");
        let away_score = record.text("away_score");

        let (Some(home_goals), Some(away_goals)) = (
            parse_leading_int(&home_score),
            parse_leading_int(&away_score),
        ) else {
            return Ok(Transformed::Skip(Skip::InvalidScore {
                home_score,
                away_score,
            }));
        };

        Ok(Transformed::Row(Row::Result(MatchResult {
            date: record.text("date"),
            home_team: record.text("home_team"),
            away_team: record.text("away_team"),
            home_goals,
            away_goals,
            tournament: record.text("tournament"),
            city: record.text("city"),
            country: record.text("country"),
            neutral: record.flag("neutral"),
        })))
    }
}

/// `goalscorers.csv` → [`Goalscorer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalscorerTransformer;

impl RecordTransformer for GoalscorerTransformer {
    fn relation(&self) -> Relation {
        Relation::Goalscorer
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["date", "home_team", "away_team", "scorer"]
    }

    fn transform(&self, record: &RawRecord, line: usize) -> Result<Transformed, TransformError> {
        let minute = match record.non_blank("minute") {
            None => None,
            Some(raw) => Some(parse_leading_int(raw).ok_or_else(|| TransformError {
                field: "minute".to_string(),
                value: raw.to_string(),
                line,
                reason: "expected an integer minute".to_string(),
            })?),
        };

        Ok(Transformed::Row(Row::Goalscorer(Goalscorer {
            date: record.text("date"),
            home_team: record.text("home_team"),
            away_team: record.text("away_team"),
            scorer: record.text("scorer"),
            minute,
            own_goal: record.flag("own_goal"),
            penalty: record.flag("penalty"),
        })))
    }
}

/// `shootouts.csv` → [`Shootout`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ShootoutTransformer;

impl RecordTransformer for ShootoutTransformer {
    fn relation(&self) -> Relation {
        Relation::Shootout
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["date", "home_team", "away_team", "winner"]
    }

    fn transform(&self, record: &RawRecord, _line: usize) -> Result<Transformed, TransformError> {
        Ok(Transformed::Row(Row::Shootout(Shootout {
            date: record.text("date"),
            home_team: record.text("home_team"),
            away_team: record.text("away_team"),
            winner: record.text("winner"),
        })))
    }
}

/// `former_names.csv` → [`FormerName`]
///
/// Accepts the current `current`/`former` columns and falls back to the
/// older `name`/`formerName` headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormerNameTransformer;

impl RecordTransformer for FormerNameTransformer {
    fn relation(&self) -> Relation {
        Relation::FormerName
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &["start_date", "end_date"]
    }

    fn transform(&self, record: &RawRecord, _line: usize) -> Result<Transformed, TransformError> {
        let current = record
            .non_blank("current")
            .or_else(|| record.non_blank("name"));
        let former = record
            .non_blank("former")
            .or_else(|| record.non_blank("formerName"));

        let (Some(current_name), Some(former_name)) = (current, former) else {
            return Ok(Transformed::Skip(Skip::BlankName));
        };

        Ok(Transformed::Row(Row::FormerName(FormerName {
            current_name: current_name.to_string(),
            former_name: former_name.to_string(),
            start_date: record.text("start_date"),
            end_date: record.text("end_date"),
        })))
    }
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;

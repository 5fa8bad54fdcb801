//! Raw source records
//!
//! A [`RawRecord`] is one row of a source table as read from disk: a mapping
//! from header name to the cell's text, with `None` for empty or absent cells.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One untyped row of a source table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: BTreeMap<String, Option<String>>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(name, value)` pairs; empty strings are kept as-is
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Some(v.into())))
            .collect();
        Self { fields }
    }

    /// Set a field; `None` records an explicitly null cell
    pub fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        self.fields.insert(name.into(), value);
    }

    /// Raw cell text, `None` when the field is absent or null
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }

    /// Cell text trimmed, `None` when absent, null, or blank
    pub fn non_blank(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Whether the field is absent, null, or blank after trimming
    pub fn is_missing(&self, name: &str) -> bool {
        self.non_blank(name).is_none()
    }

    /// Cell text or an empty string
    pub fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    /// Whether the cell holds the literal `TRUE`
    pub fn flag(&self, name: &str) -> bool {
        self.get(name) == Some("TRUE")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self.fields),
        }
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;

//! Fixed relation schema
//!
//! The store holds exactly four relations. Each relation has a static
//! [`RelationDef`] describing its columns, primary key and optional foreign
//! key into `results`. The definitions drive the native DuckDB DDL as well as
//! the referential checks performed by the in-memory store.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four typed record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Relation {
    /// Match results, keyed by (date, homeTeam, awayTeam)
    #[serde(rename = "results")]
    Result,
    /// Goals scored in a match (append-only, no primary key)
    #[serde(rename = "goalscorers")]
    Goalscorer,
    /// Penalty shootout winners, one per match
    #[serde(rename = "shootouts")]
    Shootout,
    /// Historical team names
    #[serde(rename = "former_names")]
    FormerName,
}

impl Relation {
    /// All relations in foreign-key-safe load order (parents first)
    pub const ALL: [Relation; 4] = [
        Relation::Result,
        Relation::Goalscorer,
        Relation::Shootout,
        Relation::FormerName,
    ];

    /// All relations in foreign-key-safe delete order (dependents first)
    pub const DELETE_ORDER: [Relation; 4] = [
        Relation::Goalscorer,
        Relation::Shootout,
        Relation::Result,
        Relation::FormerName,
    ];

    /// Table name used by the native backend and the portable document
    pub fn table_name(self) -> &'static str {
        match self {
            Relation::Result => "results",
            Relation::Goalscorer => "goalscorers",
            Relation::Shootout => "shootouts",
            Relation::FormerName => "formerNames",
        }
    }

    /// Configuration key for this relation
    pub fn config_key(self) -> &'static str {
        match self {
            Relation::Result => "results",
            Relation::Goalscorer => "goalscorers",
            Relation::Shootout => "shootouts",
            Relation::FormerName => "former_names",
        }
    }

    /// Conventional source file name for this relation
    pub fn default_file_name(self) -> &'static str {
        match self {
            Relation::Result => "results.csv",
            Relation::Goalscorer => "goalscorers.csv",
            Relation::Shootout => "shootouts.csv",
            Relation::FormerName => "former_names.csv",
        }
    }

    /// The relation this one references through its foreign key, if any
    pub fn parent(self) -> Option<Relation> {
        self.def().foreign_key.as_ref().map(|fk| fk.references)
    }

    /// Whether rows of this relation are unique by primary key
    pub fn has_primary_key(self) -> bool {
        !self.def().primary_key.is_empty()
    }

    /// Static definition of this relation
    pub fn def(self) -> &'static RelationDef {
        match self {
            Relation::Result => &RESULTS,
            Relation::Goalscorer => &GOALSCORERS,
            Relation::Shootout => &SHOOTOUTS,
            Relation::FormerName => &FORMER_NAMES,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for Relation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "results" | "result" => Ok(Relation::Result),
            "goalscorers" | "goalscorer" => Ok(Relation::Goalscorer),
            "shootouts" | "shootout" => Ok(Relation::Shootout),
            "former_names" | "formernames" | "former_name" | "formername" => {
                Ok(Relation::FormerName)
            }
            _ => Err(CoreError::UnknownRelation {
                name: s.to_string(),
            }),
        }
    }
}

/// Column value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Boolean,
}

impl ColumnType {
    /// DuckDB type name
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Text => "VARCHAR",
            ColumnType::Integer => "BIGINT",
            ColumnType::Boolean => "BOOLEAN",
        }
    }
}

/// A single column of a relation
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub nullable: bool,
}

/// Foreign key from a relation's columns to a parent relation's primary key
#[derive(Debug, Clone, Copy)]
pub struct ForeignKeyDef {
    pub columns: &'static [&'static str],
    pub references: Relation,
}

/// Static definition of one relation
#[derive(Debug)]
pub struct RelationDef {
    pub relation: Relation,
    pub columns: &'static [ColumnDef],
    /// Primary key columns; empty for append-only relations
    pub primary_key: &'static [&'static str],
    pub foreign_key: Option<ForeignKeyDef>,
}

impl RelationDef {
    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// `CREATE TABLE` statement carrying the key constraints
    pub fn create_table_sql(&self) -> String {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let null = if c.nullable { "" } else { " NOT NULL" };
                format!("{} {}{}", c.name, c.column_type.sql_type(), null)
            })
            .collect();

        if !self.primary_key.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", self.primary_key.join(", ")));
        }
        if let Some(fk) = &self.foreign_key {
            let parent = fk.references.def();
            parts.push(format!(
                "FOREIGN KEY ({}) REFERENCES {}({})",
                fk.columns.join(", "),
                parent.relation.table_name(),
                parent.primary_key.join(", ")
            ));
        }

        format!(
            "CREATE TABLE {} ({})",
            self.relation.table_name(),
            parts.join(", ")
        )
    }
}

const fn text(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        column_type: ColumnType::Text,
        nullable: false,
    }
}

const fn integer(name: &'static str, nullable: bool) -> ColumnDef {
    ColumnDef {
        name,
        column_type: ColumnType::Integer,
        nullable,
    }
}

const fn boolean(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        column_type: ColumnType::Boolean,
        nullable: false,
    }
}

const MATCH_KEY: &[&str] = &["date", "homeTeam", "awayTeam"];

static RESULTS: RelationDef = RelationDef {
    relation: Relation::Result,
    columns: &[
        text("date"),
        text("homeTeam"),
        text("awayTeam"),
        integer("homeGoals", false),
        integer("awayGoals", false),
        text("tournament"),
        text("city"),
        text("country"),
        boolean("neutral"),
    ],
    primary_key: MATCH_KEY,
    foreign_key: None,
};

static GOALSCORERS: RelationDef = RelationDef {
    relation: Relation::Goalscorer,
    columns: &[
        text("date"),
        text("homeTeam"),
        text("awayTeam"),
        text("scorer"),
        integer("minute", true),
        boolean("ownGoal"),
        boolean("penalty"),
    ],
    primary_key: &[],
    foreign_key: Some(ForeignKeyDef {
        columns: MATCH_KEY,
        references: Relation::Result,
    }),
};

static SHOOTOUTS: RelationDef = RelationDef {
    relation: Relation::Shootout,
    columns: &[text("date"), text("homeTeam"), text("awayTeam"), text("winner")],
    primary_key: MATCH_KEY,
    foreign_key: Some(ForeignKeyDef {
        columns: MATCH_KEY,
        references: Relation::Result,
    }),
};

static FORMER_NAMES: RelationDef = RelationDef {
    relation: Relation::FormerName,
    columns: &[
        text("currentName"),
        text("formerName"),
        text("startDate"),
        text("endDate"),
    ],
    primary_key: &["currentName", "formerName"],
    foreign_key: None,
};

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;

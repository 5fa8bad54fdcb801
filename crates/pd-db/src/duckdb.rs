//! DuckDB database backend implementation
//!
//! DuckDB holds the native durable copy of a store: a database file whose
//! tables carry the same primary and foreign keys as the store.

use crate::error::{DbError, DbResult};
use crate::store::{ReferentialStore, RelationCounts};
use duckdb::{params, Connection};
use pd_core::{FormerName, Goalscorer, MatchResult, Relation, Row, Shootout};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new DuckDB connection from a file path, creating the file if needed
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", e, path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an existing database file; a missing file is an IO error
    pub fn open_existing(path: &Path) -> DbResult<Self> {
        std::fs::metadata(path).map_err(|e| DbError::io(path, e))?;
        Self::from_path(path)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Replace the database contents with the rows of `store`.
    ///
    /// Tables are dropped dependents first and recreated with their key
    /// constraints; rows are written parents first in one transaction.
    pub fn write_store(&self, store: &ReferentialStore) -> DbResult<RelationCounts> {
        let conn = self.lock()?;

        for relation in Relation::DELETE_ORDER {
            conn.execute_batch(&format!("DROP TABLE IF EXISTS {}", relation.table_name()))?;
        }
        for relation in Relation::ALL {
            conn.execute_batch(&relation.def().create_table_sql())?;
        }

        let counts = with_transaction(&conn, |conn| {
            let mut counts = RelationCounts::default();
            for relation in Relation::ALL {
                counts.set(relation, insert_rows(conn, relation, store.rows(relation))?);
            }
            Ok(counts)
        })?;

        conn.execute_batch("CHECKPOINT")?;
        Ok(counts)
    }

    /// Read every row of one relation's table
    pub fn read_rows(&self, relation: Relation) -> DbResult<Vec<Row>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM {}",
            relation.def().column_names().join(", "),
            relation.table_name()
        );
        let mut stmt = conn.prepare(&sql)?;

        let rows = match relation {
            Relation::Result => stmt
                .query_map([], |row| {
                    Ok(Row::Result(MatchResult {
                        date: row.get(0)?,
                        home_team: row.get(1)?,
                        away_team: row.get(2)?,
                        home_goals: row.get(3)?,
                        away_goals: row.get(4)?,
                        tournament: row.get(5)?,
                        city: row.get(6)?,
                        country: row.get(7)?,
                        neutral: row.get(8)?,
                    }))
                })?
                .collect::<Result<Vec<_>, _>>()?,
            Relation::Goalscorer => stmt
                .query_map([], |row| {
                    Ok(Row::Goalscorer(Goalscorer {
                        date: row.get(0)?,
                        home_team: row.get(1)?,
                        away_team: row.get(2)?,
                        scorer: row.get(3)?,
                        minute: row.get(4)?,
                        own_goal: row.get(5)?,
                        penalty: row.get(6)?,
                    }))
                })?
                .collect::<Result<Vec<_>, _>>()?,
            Relation::Shootout => stmt
                .query_map([], |row| {
                    Ok(Row::Shootout(Shootout {
                        date: row.get(0)?,
                        home_team: row.get(1)?,
                        away_team: row.get(2)?,
                        winner: row.get(3)?,
                    }))
                })?
                .collect::<Result<Vec<_>, _>>()?,
            Relation::FormerName => stmt
                .query_map([], |row| {
                    Ok(Row::FormerName(FormerName {
                        current_name: row.get(0)?,
                        former_name: row.get(1)?,
                        start_date: row.get(2)?,
                        end_date: row.get(3)?,
                    }))
                })?
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(rows)
    }
}

/// Run `body` inside `BEGIN` / `COMMIT`, rolling back on error
fn with_transaction<F, T>(conn: &Connection, body: F) -> DbResult<T>
where
    F: FnOnce(&Connection) -> DbResult<T>,
{
    conn.execute_batch("BEGIN TRANSACTION")
        .map_err(|e| DbError::ExecutionError(format!("BEGIN failed: {e}")))?;

    let result = body(conn);

    match &result {
        Ok(_) => {
            if let Err(commit_err) = conn.execute_batch("COMMIT") {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(DbError::ExecutionError(format!(
                    "COMMIT failed: {commit_err}"
                )));
            }
        }
        Err(_) => {
            let _ = conn.execute_batch("ROLLBACK");
        }
    }
    result
}

fn insert_rows(conn: &Connection, relation: Relation, rows: &[Row]) -> DbResult<usize> {
    let columns = relation.def().column_names();
    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        relation.table_name(),
        columns.join(", "),
        placeholders
    );
    let mut stmt = conn.prepare(&sql)?;

    for row in rows {
        match row {
            Row::Result(r) => stmt.execute(params![
                r.date,
                r.home_team,
                r.away_team,
                r.home_goals,
                r.away_goals,
                r.tournament,
                r.city,
                r.country,
                r.neutral,
            ])?,
            Row::Goalscorer(g) => stmt.execute(params![
                g.date,
                g.home_team,
                g.away_team,
                g.scorer,
                g.minute,
                g.own_goal,
                g.penalty,
            ])?,
            Row::Shootout(s) => {
                stmt.execute(params![s.date, s.home_team, s.away_team, s.winner])?
            }
            Row::FormerName(n) => stmt.execute(params![
                n.current_name,
                n.former_name,
                n.start_date,
                n.end_date,
            ])?,
        };
    }
    Ok(rows.len())
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;

use super::*;
use pd_core::RowKey;

impl DuckDbBackend {
    fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        Ok(self.lock()?.execute_batch(sql)?)
    }

    fn query_count(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'main' AND lower(table_name) = lower(?)",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn sample_store() -> ReferentialStore {
    let mut store = ReferentialStore::new();
    store
        .insert(Row::Result(MatchResult {
            date: "1872-03-30".to_string(),
            home_team: "Scotland".to_string(),
            away_team: "England".to_string(),
            home_goals: 0,
            away_goals: 0,
            tournament: "Friendly".to_string(),
            city: "Glasgow".to_string(),
            country: "Scotland".to_string(),
            neutral: false,
        }))
        .unwrap();
    store
        .insert(Row::Goalscorer(Goalscorer {
            date: "1872-03-30".to_string(),
            home_team: "Scotland".to_string(),
            away_team: "England".to_string(),
            scorer: "A. Rhind".to_string(),
            minute: None,
            own_goal: false,
            penalty: true,
        }))
        .unwrap();
    store
        .insert(Row::Shootout(Shootout {
            date: "1872-03-30".to_string(),
            home_team: "Scotland".to_string(),
            away_team: "England".to_string(),
            winner: "England".to_string(),
        }))
        .unwrap();
    store
        .insert(Row::FormerName(FormerName {
            current_name: "Myanmar".to_string(),
            former_name: "Burma".to_string(),
            start_date: "1948-01-04".to_string(),
            end_date: "1989-06-18".to_string(),
        }))
        .unwrap();
    store
}

#[test]
fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(!db.relation_exists("results").unwrap());
}

#[test]
fn test_query_missing_table() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.query_count("SELECT * FROM nope").unwrap_err();
    assert!(matches!(err, DbError::TableNotFound(_)));
}

#[test]
fn test_write_store_creates_keyed_tables() {
    let db = DuckDbBackend::in_memory().unwrap();
    let counts = db.write_store(&sample_store()).unwrap();

    assert_eq!(counts.total(), 4);
    for relation in Relation::ALL {
        assert!(db.relation_exists(relation.table_name()).unwrap());
    }
    assert_eq!(db.query_count("SELECT * FROM goalscorers").unwrap(), 1);

    // The native tables enforce the same foreign key as the store.
    let orphan = db.execute_batch(
        "INSERT INTO shootouts VALUES ('1900-01-01', 'Nowhere', 'Elsewhere', 'Nowhere')",
    );
    assert!(orphan.is_err());
}

#[test]
fn test_write_then_read_rows() {
    let store = sample_store();
    let db = DuckDbBackend::in_memory().unwrap();
    db.write_store(&store).unwrap();

    for relation in Relation::ALL {
        assert_eq!(db.read_rows(relation).unwrap(), store.rows(relation));
    }
}

#[test]
fn test_write_store_replaces_previous_contents() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.write_store(&sample_store()).unwrap();
    db.write_store(&ReferentialStore::new()).unwrap();

    for relation in Relation::ALL {
        assert!(db.read_rows(relation).unwrap().is_empty());
    }
}

#[test]
fn test_durable_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pitchdata.duckdb");

    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.write_store(&sample_store()).unwrap();
    }

    let db = DuckDbBackend::open_existing(&path).unwrap();
    let rows = db.read_rows(Relation::Result).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].primary_key(),
        Some(RowKey::Match(pd_core::MatchKey::new(
            "1872-03-30",
            "Scotland",
            "England"
        )))
    );
}

#[test]
fn test_open_existing_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = DuckDbBackend::open_existing(&dir.path().join("absent.duckdb"))
        .err()
        .unwrap();
    assert!(matches!(err, DbError::Io { .. }));
}

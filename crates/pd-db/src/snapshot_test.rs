use super::*;
use crate::error::DbError;

fn scotland_england() -> MatchResult {
    MatchResult {
        date: "1872-03-30".to_string(),
        home_team: "Scotland".to_string(),
        away_team: "England".to_string(),
        home_goals: 0,
        away_goals: 0,
        tournament: "Friendly".to_string(),
        city: "Glasgow".to_string(),
        country: "Scotland".to_string(),
        neutral: false,
    }
}

fn rhind() -> Goalscorer {
    Goalscorer {
        date: "1872-03-30".to_string(),
        home_team: "Scotland".to_string(),
        away_team: "England".to_string(),
        scorer: "A. Rhind".to_string(),
        minute: None,
        own_goal: false,
        penalty: false,
    }
}

fn populated_store() -> ReferentialStore {
    let mut store = ReferentialStore::new();
    store.insert(Row::Result(scotland_england())).unwrap();
    store.insert(Row::Goalscorer(rhind())).unwrap();
    store.insert(Row::Goalscorer(rhind())).unwrap();
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
fn test_store_snapshot_counts() {
    let snapshot = StoreSnapshot::capture(&populated_store());
    assert_eq!(snapshot.results_count, 1);
    assert_eq!(snapshot.goalscorers_count, 2);
    assert_eq!(snapshot.shootouts_count, 0);
    assert_eq!(snapshot.former_names_count, 1);
    assert_eq!(snapshot.counts().total(), 4);
}

#[test]
fn test_store_snapshot_json_names() {
    let snapshot = StoreSnapshot::capture(&ReferentialStore::new());
    let value = serde_json::to_value(&snapshot).unwrap();
    for key in [
        "resultsCount",
        "goalscorersCount",
        "shootoutsCount",
        "formerNamesCount",
        "lastUpdated",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn test_export_groups_rows_by_relation() {
    let doc = PortableSnapshot::export(&populated_store());
    assert_eq!(doc.results, vec![scotland_england()]);
    assert_eq!(doc.goalscorers.len(), 2);
    assert!(doc.shootouts.is_empty());
    assert_eq!(doc.former_names[0].former_name, "Burma");
    assert_eq!(doc.counts(), populated_store().counts());
}

#[test]
fn test_portable_document_keys() {
    let doc = PortableSnapshot::export(&populated_store());
    let value = serde_json::to_value(&doc).unwrap();

    assert!(value.get("formerNames").is_some());
    assert_eq!(value["results"][0]["homeTeam"], "Scotland");
    assert_eq!(value["results"][0]["homeGoals"], 0);
    assert!(value["goalscorers"][0]["minute"].is_null());
}

#[test]
fn test_portable_document_rejects_unknown_relation() {
    let json = r#"{"results": [], "goalscorers": [], "shootouts": [], "formerNames": [], "players": []}"#;
    assert!(serde_json::from_str::<PortableSnapshot>(json).is_err());
}

#[test]
fn test_import_into_empty_store() {
    let doc = PortableSnapshot::export(&populated_store());
    let mut store = ReferentialStore::new();

    let applied = doc.import_into(&mut store).unwrap();
    assert_eq!(applied, populated_store().counts());
    assert_eq!(store.counts(), populated_store().counts());
    assert_eq!(
        store.rows(Relation::Goalscorer),
        populated_store().rows(Relation::Goalscorer)
    );
}

#[test]
fn test_import_twice_is_idempotent() {
    let doc = PortableSnapshot::export(&populated_store());
    let mut store = ReferentialStore::new();

    doc.clone().import_into(&mut store).unwrap();
    doc.import_into(&mut store).unwrap();
    assert_eq!(store.counts(), populated_store().counts());
}

#[test]
fn test_import_orphan_is_rejected() {
    let doc = PortableSnapshot {
        goalscorers: vec![rhind()],
        ..Default::default()
    };
    let mut store = ReferentialStore::new();

    let err = doc.import_into(&mut store).unwrap_err();
    assert!(matches!(
        err,
        DbError::Integrity(crate::store::StoreError::ForeignKeyViolation { .. })
    ));
}

use super::*;

const REQUIRED: &[&str] = &["date", "home_team", "away_team", "tournament"];

#[test]
fn test_no_missing_fields() {
    let record = RawRecord::from_pairs([
        ("date", "1872-03-30"),
        ("home_team", "Scotland"),
        ("away_team", "England"),
        ("tournament", "Friendly"),
    ]);
    assert!(missing_fields(&record, REQUIRED).is_empty());
}

#[test]
fn test_absent_null_and_blank_are_missing() {
    let mut record = RawRecord::from_pairs([("date", "1872-03-30"), ("home_team", "   ")]);
    record.set("away_team", None);

    assert_eq!(
        missing_fields(&record, REQUIRED),
        vec!["home_team", "away_team", "tournament"]
    );
}

#[test]
fn test_values_are_not_trimmed_for_presence_only() {
    let record = RawRecord::from_pairs([
        ("date", " 1872-03-30 "),
        ("home_team", "Scotland"),
        ("away_team", "England"),
        ("tournament", "\tFriendly"),
    ]);
    assert!(missing_fields(&record, REQUIRED).is_empty());
    assert_eq!(record.get("date"), Some(" 1872-03-30 "));
}

#[test]
fn test_empty_requirement_list() {
    assert!(missing_fields(&RawRecord::new(), &[]).is_empty());
}

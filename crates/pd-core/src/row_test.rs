use super::*;

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

fn rhind(minute: Option<i64>) -> Goalscorer {
    Goalscorer {
        date: "1872-03-30".to_string(),
        home_team: "Scotland".to_string(),
        away_team: "England".to_string(),
        scorer: "A. Rhind".to_string(),
        minute,
        own_goal: false,
        penalty: false,
    }
}

#[test]
fn test_result_keys() {
    let row = Row::from(scotland_england());
    assert_eq!(row.relation(), Relation::Result);
    assert_eq!(
        row.primary_key(),
        Some(RowKey::Match(MatchKey::new("1872-03-30", "Scotland", "England")))
    );
    assert_eq!(row.parent_key(), None);
}

#[test]
fn test_goalscorer_has_parent_but_no_primary_key() {
    let row = Row::from(rhind(Some(23)));
    assert_eq!(row.primary_key(), None);
    assert_eq!(
        row.parent_key(),
        Some(MatchKey::new("1872-03-30", "Scotland", "England"))
    );
    assert_eq!(row.index_key(), RowKey::Goal(rhind(Some(23))));
}

#[test]
fn test_goalscorer_index_key_distinguishes_minute() {
    let a = Row::from(rhind(Some(23)));
    let b = Row::from(rhind(None));
    assert_ne!(a.index_key(), b.index_key());
}

#[test]
fn test_shootout_shares_match_key() {
    let shootout = Shootout {
        date: "2012-06-27".to_string(),
        home_team: "Portugal".to_string(),
        away_team: "Spain".to_string(),
        winner: "Spain".to_string(),
    };
    let row = Row::from(shootout);
    assert_eq!(row.primary_key(), row.parent_key().map(RowKey::Match));
}

#[test]
fn test_former_name_key() {
    let name = FormerName {
        current_name: "Myanmar".to_string(),
        former_name: "Burma".to_string(),
        start_date: "1948-01-04".to_string(),
        end_date: "1989-06-18".to_string(),
    };
    let key = Row::from(name).index_key();
    assert_eq!(key.to_string(), "(Myanmar, Burma)");
}

#[test]
fn test_rows_serialize_camel_case() {
    let json = serde_json::to_value(rhind(None)).unwrap();
    assert_eq!(json["homeTeam"], "Scotland");
    assert_eq!(json["ownGoal"], false);
    assert!(json["minute"].is_null());
}

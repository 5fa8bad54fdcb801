use super::*;

#[test]
fn test_get_and_null_cells() {
    let mut record = RawRecord::from_pairs([("scorer", "A. Rhind")]);
    record.set("minute", None);

    assert_eq!(record.get("scorer"), Some("A. Rhind"));
    assert_eq!(record.get("minute"), None);
    assert_eq!(record.get("penalty"), None);
    assert_eq!(record.len(), 2);
}

#[test]
fn test_non_blank_trims() {
    let record = RawRecord::from_pairs([("current", "  Myanmar "), ("former", "   ")]);
    assert_eq!(record.non_blank("current"), Some("Myanmar"));
    assert_eq!(record.non_blank("former"), None);
    assert!(record.is_missing("former"));
    assert!(record.is_missing("absent"));
}

#[test]
fn test_text_keeps_raw_value() {
    let record = RawRecord::from_pairs([("city", " Glasgow")]);
    assert_eq!(record.text("city"), " Glasgow");
    assert_eq!(record.text("country"), "");
}

#[test]
fn test_flag_is_literal_true() {
    let record = RawRecord::from_pairs([("a", "TRUE"), ("b", "true"), ("c", "FALSE")]);
    assert!(record.flag("a"));
    assert!(!record.flag("b"));
    assert!(!record.flag("c"));
    assert!(!record.flag("d"));
}

#[test]
fn test_display_is_json() {
    let mut record = RawRecord::from_pairs([("home_score", "abc")]);
    record.set("minute", None);
    assert_eq!(record.to_string(), r#"{"home_score":"abc","minute":null}"#);
}

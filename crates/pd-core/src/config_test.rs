use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_config() {
    let config: PipelineConfig = serde_yaml::from_str("data_dir: data").unwrap();
    assert_eq!(config.data_dir, "data");
    assert_eq!(config.sources, SourcesConfig::default());
    assert!(config.database.is_ephemeral());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
data_dir: /srv/football
sources:
  results: results_2024.csv
  goalscorers: scorers.csv
  shootouts: shootouts.csv
  former_names: names.csv
database:
  path: warehouse.duckdb
"#;
    let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.sources.file_name(Relation::Result), "results_2024.csv");
    assert_eq!(config.sources.file_name(Relation::Goalscorer), "scorers.csv");
    assert_eq!(config.sources.file_name(Relation::FormerName), "names.csv");
    assert!(!config.database.is_ephemeral());

    let root = PathBuf::from("/tmp/project");
    assert_eq!(
        config.database_path(&root),
        Some(root.join("warehouse.duckdb"))
    );
}

#[test]
fn test_unknown_key_rejected() {
    let result: Result<PipelineConfig, _> = serde_yaml::from_str("data_dir: data\nport: 3000");
    assert!(result.is_err());
}

#[test]
fn test_source_paths_in_load_order() {
    let config = PipelineConfig::default();
    let root = PathBuf::from("/tmp/project");
    let paths = config.source_paths(&root);

    let relations: Vec<Relation> = paths.iter().map(|(r, _)| *r).collect();
    assert_eq!(relations, Relation::ALL.to_vec());
    assert_eq!(paths[0].1, root.join("data").join("results.csv"));
    assert_eq!(paths[3].1, root.join("data").join("former_names.csv"));
}

#[test]
fn test_ephemeral_database_has_no_path() {
    let config = PipelineConfig::default();
    assert_eq!(config.database_path(Path::new("/tmp")), None);
}

#[test]
fn test_validate_rejects_empty_source_name() {
    let yaml = "sources:\n  shootouts: \"\"\n";
    let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("sources.shootouts"));
}

#[test]
fn test_validate_rejects_empty_database_path() {
    let yaml = "database:\n  path: \"\"\n";
    let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
    assert!(matches!(
        config.validate(),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_load_from_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("pitchdata.yml"),
        "data_dir: csv\ndatabase:\n  path: store.duckdb\n",
    )
    .unwrap();

    let config = PipelineConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.data_dir, "csv");
    assert_eq!(config.database.path, "store.duckdb");
}

#[test]
fn test_load_from_dir_yaml_extension() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("pitchdata.yaml"), "data_dir: other\n").unwrap();

    let config = PipelineConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.data_dir, "other");
}

#[test]
fn test_load_from_dir_prefers_yml() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("pitchdata.yml"), "data_dir: first\n").unwrap();
    std::fs::write(dir.path().join("pitchdata.yaml"), "data_dir: second\n").unwrap();

    let config = PipelineConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.data_dir, "first");
}

#[test]
fn test_load_missing_config() {
    let dir = TempDir::new().unwrap();
    let err = PipelineConfig::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

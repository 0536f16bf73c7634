use super::*;
use std::io::Write;

#[test]
fn test_defaults() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.lookback_days, 1);
    assert!(config.use_fqn);
    assert_eq!(config.namespace, "my-namespace");
    assert_eq!(config.producer, "azure-lineage");
    assert_eq!(config.openlineage_output, "openlineage.json");
    assert_eq!(config.lineage_output, "lineage.json");
    assert_eq!(config.edge_list_scope, EdgeListScope::Last);
    assert_eq!(config.sql_dialect, None);
    assert!(!config.only_triggered);
    assert!(!config.transitive);
    assert_eq!(config.export_dir, ".");
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
lookback_days: 7
use_fqn: false
namespace: analytics
producer: adfl
openlineage_output: out/events.json
lineage_output: out/edges.json
edge_list_scope: all
sql_dialect: tsql
only_triggered: true
transitive: true
export_dir: ./factory
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.lookback_days, 7);
    assert!(!config.use_fqn);
    assert_eq!(config.namespace, "analytics");
    assert_eq!(config.edge_list_scope, EdgeListScope::All);
    assert_eq!(config.sql_dialect.as_deref(), Some("tsql"));
    assert!(config.only_triggered);
    assert!(config.transitive);
    assert_eq!(config.export_dir, "./factory");
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config = Config::from_yaml("lookback_days: 0\n").unwrap();
    assert_eq!(config.lookback_days, 0);
    assert!(config.use_fqn);
    assert_eq!(config.namespace, "my-namespace");
}

#[test]
fn test_unknown_field_rejected() {
    let err = Config::from_yaml("days_search: 3\n").unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
    assert!(err.to_string().contains("[E002]"));
}

#[test]
fn test_unknown_dialect_rejected() {
    let err = Config::from_yaml("sql_dialect: cobol\n").unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_empty_namespace_rejected() {
    let err = Config::from_yaml("namespace: \"\"\n").unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_bad_edge_list_scope_rejected() {
    assert!(Config::from_yaml("edge_list_scope: some\n").is_err());
}

#[test]
fn test_load_missing_file() {
    let err = Config::load(Path::new("/nonexistent/adfl.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
    assert!(Config::load_or_default(Some(Path::new("/nonexistent/adfl.yml"))).is_err());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "namespace: from-file").unwrap();

    let config = Config::load_or_default(Some(file.path())).unwrap();
    assert_eq!(config.namespace, "from-file");
}

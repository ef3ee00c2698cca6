use super::*;

#[test]
fn test_nested_search_table() {
    let text = r#"
zobrist_seed = 7
log_filter = "clce=debug"

[search]
max_depth = 5
"#;
    let config = ClceConfig::from_toml(text, Path::new("test.toml")).unwrap();
    assert_eq!(config.zobrist_seed, 7);
    assert_eq!(config.log_filter, "clce=debug");
    assert_eq!(config.search.max_depth, 5);
    assert_eq!(config.search.cutoff_margin, SearchConfig::default().cutoff_margin);
}

#[test]
fn test_empty_file_is_default() {
    let config = ClceConfig::from_toml("", Path::new("empty.toml")).unwrap();
    assert_eq!(config, ClceConfig::default());
}

#[test]
fn test_parse_error_names_file() {
    let err = ClceConfig::from_toml("zobrist_seed = \"x\"", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let err = ClceConfig::load(Some(Path::new("/nonexistent/clce.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

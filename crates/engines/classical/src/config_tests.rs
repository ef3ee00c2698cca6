use super::*;

#[test]
fn test_partial_table_keeps_defaults() {
    let config: SearchConfig = toml::from_str("max_depth = 6").unwrap();
    assert_eq!(config.max_depth, 6);
    assert_eq!(config.cutoff_margin, SearchConfig::default().cutoff_margin);
    assert_eq!(config.poll_ply_threshold, SearchConfig::default().poll_ply_threshold);
}

#[test]
fn test_empty_table_is_default() {
    let config: SearchConfig = toml::from_str("").unwrap();
    assert_eq!(config, SearchConfig::default());
}

#[test]
fn test_unknown_types_are_rejected() {
    assert!(toml::from_str::<SearchConfig>("cutoff_margin = \"eight\"").is_err());
}

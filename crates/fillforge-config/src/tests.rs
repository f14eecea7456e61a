use fillforge_core::{CircularReferencePolicy, Setup};

use super::*;

#[test]
fn test_parse_toml() {
    let config = FillConfig::from_toml_str(
        r#"
        ignore_unknown_types = true
        circular_references = "substitute_default"
        max_depth = 32
        random_seed = 42

        [sequence_items]
        min = 1
        max = 4

        [map_keys]
        min = 2
        max = 3
    "#,
    )
    .unwrap();

    assert_eq!(config.sequence_items, Some(CountRange { min: 1, max: 4 }));
    assert_eq!(config.map_keys, Some(CountRange { min: 2, max: 3 }));
    assert_eq!(config.circular_references, Some(CyclePolicy::SubstituteDefault));
    assert_eq!(config.ignore_unknown_types, Some(true));
    assert_eq!(config.max_depth, Some(32));
    assert_eq!(config.random_seed, Some(42));
}

#[test]
fn test_parse_yaml() {
    let config = FillConfig::from_yaml_str(
        r#"
        circular_references: fail
        sequence_items:
          min: 3
          max: 6
    "#,
    )
    .unwrap();

    assert_eq!(config.circular_references, Some(CyclePolicy::Fail));
    assert_eq!(config.sequence_items, Some(CountRange { min: 3, max: 6 }));
    assert_eq!(config.map_keys, None);
}

#[test]
fn test_empty_config_leaves_setup_untouched() {
    let setup = FillConfig::new().apply(Setup::new()).unwrap();
    assert_eq!(setup.sequence_count_range(), 1..25);
    assert_eq!(setup.map_key_count_range(), 1..10);
    assert!(!setup.ignore_unknown_types());
}

#[test]
fn test_apply_overrides_setup() {
    let config = FillConfig::from_toml_str(
        r#"
        circular_references = "fail"
        ignore_unknown_types = true
        max_depth = 16

        [sequence_items]
        min = 2
        max = 5
    "#,
    )
    .unwrap();

    let setup = config.apply(Setup::new()).unwrap();
    assert_eq!(setup.sequence_count_range(), 2..5);
    assert_eq!(setup.map_key_count_range(), 1..10);
    assert_eq!(
        setup.circular_reference_policy(),
        CircularReferencePolicy::Fail
    );
    assert!(setup.ignore_unknown_types());
    assert_eq!(setup.max_depth(), 16);
}

#[test]
fn test_invalid_range_is_rejected() {
    let config = FillConfig {
        sequence_items: Some(CountRange { min: 5, max: 2 }),
        ..FillConfig::default()
    };
    let outcome = config.apply(Setup::new());
    assert!(matches!(outcome, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_zero_max_depth_is_rejected() {
    let config = FillConfig {
        max_depth: Some(0),
        ..FillConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_seeded_sources_from_config_agree() {
    let config = FillConfig {
        random_seed: Some(9),
        ..FillConfig::default()
    };
    let mut first = config.random_source();
    let mut second = config.random_source();
    for _ in 0..16 {
        assert_eq!(first.from_range(0..100), second.from_range(0..100));
    }
}

#[test]
fn test_missing_file_fails_with_io_error() {
    let outcome = FillConfig::load("does-not-exist.toml");
    assert!(matches!(outcome, Err(ConfigError::Io(_))));
}

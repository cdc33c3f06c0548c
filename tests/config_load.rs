use cellsample::config::{ConfigError, DEFAULT_SEED, SamplingConfig};
use cellsample::rng::Threshold;

#[test]
fn empty_config_uses_defaults() {
    let cfg = SamplingConfig::from_toml_str("").expect("parse");
    assert_eq!(cfg, SamplingConfig::default());
    assert_eq!(cfg.seed, DEFAULT_SEED);
    assert_eq!(cfg.xor.q, 0.5);
    assert_eq!(cfg.partition.initial_epsilon, 0.01);
    assert_eq!(cfg.partition.nu_max, 100.0);
    assert!(cfg.partition.max_epsilon.is_infinite());
}

#[test]
fn reads_sections() {
    let cfg = SamplingConfig::from_toml_str(
        r#"
        seed = 7
        iterations = 10

        [xor]
        q = 0.25
        threshold = "inclusive"

        [partition]
        max_rounds = 8
        max_epsilon = 2.0
        "#,
    )
    .expect("parse");
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.iterations, Some(10));
    assert_eq!(cfg.xor.q, 0.25);
    assert_eq!(cfg.xor.threshold, Threshold::Inclusive);
    assert_eq!(cfg.partition.max_rounds, 8);
    assert_eq!(cfg.partition.max_epsilon, 2.0);
    assert_eq!(cfg.partition.nu_max, 100.0);
}

#[test]
fn rejects_invalid_values() {
    let err = SamplingConfig::from_toml_str("[xor]\nq = 2.0\n").expect_err("q");
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = SamplingConfig::from_toml_str("[partition]\nmax_rounds = 0\n").expect_err("rounds");
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = SamplingConfig::from_toml_str("seed = \"x\"").expect_err("type");
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = SamplingConfig::load("/nonexistent/cellsample.toml").expect_err("missing");
    assert!(matches!(err, ConfigError::Io(_)));
}

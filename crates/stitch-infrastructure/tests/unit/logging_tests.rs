//! Logging Tests

use figment::Jail;
use stitch_infrastructure::constants::{DEFAULT_LOG_LEVEL, LOG_FILTER_ENV};
use stitch_infrastructure::logging::{LoggingConfig, init_logging, log_filter, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("ERROR").unwrap(), Level::ERROR);

    assert!(parse_log_level("invalid").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

#[test]
fn test_log_filter_prefers_the_environment() {
    Jail::expect_with(|jail| {
        jail.set_env(LOG_FILTER_ENV, "stitch_application=trace");

        let filter = log_filter("warn").to_string();

        assert!(filter.contains("stitch_application=trace"), "{filter}");
        Ok(())
    });
}

#[test]
fn test_log_filter_falls_back_to_the_configured_level() {
    Jail::expect_with(|_jail| {
        if std::env::var_os(LOG_FILTER_ENV).is_none() {
            assert_eq!(log_filter("debug").to_string(), "debug");
        }
        Ok(())
    });
}

#[test]
fn test_init_logging_rejects_invalid_level() {
    let config = LoggingConfig {
        level: "verbose".to_string(),
        ..LoggingConfig::default()
    };

    assert!(init_logging(&config).is_err());
}

#[test]
fn test_init_logging_installs_once() {
    let config = LoggingConfig {
        level: "warn".to_string(),
        json_format: true,
        file_output: None,
    };

    let _ = init_logging(&config);

    assert!(init_logging(&config).is_err(), "second install must fail");
}

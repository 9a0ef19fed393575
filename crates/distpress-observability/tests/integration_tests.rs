// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 distpress Contributors

//! Integration tests for logging setup
//!
//! Only the first initialization in a process can succeed, so a single test
//! covers both outcomes.

use distpress_observability::{
    init_tracing, init_tracing_with_config, LogConfig, LogError, LogFormat, LogOutput,
};

#[test]
fn test_config_builder_chaining() {
    let config = LogConfig::new()
        .with_format(LogFormat::Json)
        .with_level("debug")
        .with_timestamps(true)
        .with_color(false)
        .with_targets(true)
        .with_output(LogOutput::Stdout);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level.as_deref(), Some("debug"));
    assert!(config.use_timestamps);
    assert!(!config.use_color);
    assert!(config.include_targets);
    assert_eq!(config.output, LogOutput::Stdout);
}

#[test]
fn test_default_config() {
    let config = LogConfig::default();
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.output, LogOutput::Stderr);
    assert!(config.level.is_none());
}

#[test]
fn test_bad_filter_fails_before_install() {
    let err = init_tracing(LogFormat::Compact, Some("distpress=notalevel")).unwrap_err();
    assert!(matches!(err, LogError::InvalidFilter { .. }));
}

#[test]
fn test_second_initialization_is_an_error() {
    let config = LogConfig::new().with_level("warn").with_color(false);
    let first = init_tracing_with_config(config.clone());
    let second = init_tracing_with_config(config);

    assert!(first.is_ok());
    assert!(matches!(second, Err(LogError::AlreadyInitialized(_))));
}

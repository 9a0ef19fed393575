// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 distpress Contributors

//! Integration tests for algorithm resolution and execution

use distpress_compression::{
    resolve, run, Algorithm, AlgorithmRegistry, BuiltinAlgorithm, CompressionError,
    CompressionOptions, DefaultOptions, Payload, RoutineErrorKind, RoutineOutput,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_every_builtin_round_trips_with_defaults() {
    let registry = AlgorithmRegistry::new();
    let data = b"<html><body>compress me please</body></html>\n".repeat(40);

    for builtin in BuiltinAlgorithm::ALL {
        let algorithm = Algorithm::from(builtin);
        let routine = registry.resolve(&algorithm).unwrap();
        let options = registry.options_for(&algorithm, None).unwrap();

        let compressed = run(Payload::from(data.clone()), routine.as_ref(), options)
            .await
            .unwrap_or_else(|e| panic!("{builtin} failed: {e}"));

        assert!(compressed.len() < data.len(), "{builtin} did not shrink input");
        assert_eq!(builtin.decompress(&compressed).unwrap(), data, "{builtin} round trip");
    }
}

#[tokio::test]
async fn test_text_and_binary_payloads_compress_identically() {
    let routine = resolve(&Algorithm::from(BuiltinAlgorithm::Deflate)).unwrap();
    let text = "const answer = 42;\n".repeat(20);

    let from_text = run(Payload::from(text.as_str()), routine.as_ref(), CompressionOptions::new())
        .await
        .unwrap();
    let from_bytes = run(
        Payload::from(text.clone().into_bytes()),
        routine.as_ref(),
        CompressionOptions::new(),
    )
    .await
    .unwrap();

    assert_eq!(from_text, from_bytes);
}

#[tokio::test]
async fn test_invalid_payload_message_names_type_and_value() {
    let routine = resolve(&Algorithm::from("gzip")).unwrap();
    let err = run(Payload::from(json!(123)), routine.as_ref(), CompressionOptions::new())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "The \"chunk\" argument must be text or binary data. Received type number (123)"
    );
    assert_eq!(err.routine_error().unwrap().kind(), RoutineErrorKind::InvalidArgType);
}

#[test]
fn test_unknown_algorithm_fails_before_running() {
    let err = resolve(&Algorithm::from("lzma")).unwrap_err();
    assert!(matches!(err, CompressionError::UnknownAlgorithm(ref name) if name == "lzma"));
}

#[tokio::test]
async fn test_custom_routine_receives_supplied_options() {
    let seen_level = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&seen_level);
    let algorithm = Algorithm::from_fn("spy", move |payload, options, done| {
        let level = options.get("level").and_then(|v| v.as_u64()).unwrap_or(0);
        seen.store(level as usize, Ordering::SeqCst);
        done(Ok(RoutineOutput::from(payload.as_bytes().unwrap_or_default().to_vec())))
    });

    let registry = AlgorithmRegistry::new();
    let supplied = CompressionOptions::new().with("level", 3);
    let options = registry.options_for(&algorithm, Some(&supplied)).unwrap();
    let routine = registry.resolve(&algorithm).unwrap();

    run(Payload::from("abc"), routine.as_ref(), options).await.unwrap();
    assert_eq!(seen_level.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_injected_default_table() {
    let registry = AlgorithmRegistry::with_defaults(
        DefaultOptions::best_compression()
            .with(BuiltinAlgorithm::Gzip, CompressionOptions::new().with("level", 0)),
    );
    let algorithm = Algorithm::from(BuiltinAlgorithm::Gzip);
    let options = registry.options_for(&algorithm, None).unwrap();
    let routine = registry.resolve(&algorithm).unwrap();

    let data = vec![b'a'; 4096];
    let stored = run(Payload::from(data.clone()), routine.as_ref(), options).await.unwrap();

    // Level 0 stores without compressing
    assert!(stored.len() > data.len());
    assert_eq!(BuiltinAlgorithm::Gzip.decompress(&stored).unwrap(), data);
}

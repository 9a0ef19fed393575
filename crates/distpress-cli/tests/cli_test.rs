// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 distpress Contributors

//! End-to-end tests for the `distpress` binary

use distpress_compression::BuiltinAlgorithm;
use distpress_test_utils::*;
use predicates::prelude::*;

#[test]
fn test_default_run_gzips_every_file() {
    let dist = TestDist::with_sample_build();

    distpress()
        .arg(dist.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("app.js.gz"))
        .stdout(predicate::str::contains("Wrote 3 artifacts"));

    assert_suffix_count(&dist, ".gz", 3);
    let original = TestFixtures::sample_file("app.js").unwrap();
    assert_decompresses_to(&dist, "app.js.gz", BuiltinAlgorithm::Gzip, &original);
}

#[test]
fn test_threshold_skips_small_files() {
    let dist = TestDist::with_sample_build();

    distpress()
        .arg(dist.path())
        .args(["--threshold", &TestFixtures::SAMPLE_THRESHOLD.to_string()])
        .assert()
        .success();

    assert_suffix_count(&dist, ".gz", 2);
    assert_file_absent(&dist, "app.css.gz");
}

#[test]
fn test_brotli_algorithm() {
    let dist = TestDist::with_sample_build();

    distpress()
        .arg(dist.path())
        .args(["-a", "brotliCompress", "-i", r"\.html$"])
        .assert()
        .success();

    assert_eq!(dist.count_with_suffix(".br"), 1);
    let original = TestFixtures::sample_file("index.html").unwrap();
    assert_decompresses_to(&dist, "index.html.br", BuiltinAlgorithm::BrotliCompress, &original);
}

#[test]
fn test_delete_original_assets() {
    let dist = TestDist::with_sample_build();

    distpress()
        .arg(dist.path())
        .arg("--delete-original-assets")
        .assert()
        .success();

    assert_eq!(dist.files(), vec!["app.css.gz", "app.js.gz", "index.html.gz"]);
}

#[test]
fn test_filename_template() {
    let dist = TestDist::with_sample_build();

    distpress()
        .arg(dist.path())
        .args(["--filename", "fake/[base].gz", "-x", r"\.css$"])
        .assert()
        .success();

    assert_file_exists(&dist, "fake/app.js.gz");
    assert_file_exists(&dist, "fake/index.html.gz");
    assert_file_absent(&dist, "fake/app.css.gz");
}

#[test]
fn test_config_file_with_two_passes() {
    let dist = TestDist::with_sample_build();
    let config_dir = TestDist::new();
    config_dir.write_file(
        "distpress.toml",
        br#"
concurrency = 2

[[configs]]
algorithm = "gzip"
include = '\.js$'

[[configs]]
algorithm = "brotliCompress"
include = '\.css$'
"#,
    );

    distpress()
        .arg(dist.path())
        .arg("--config")
        .arg(config_dir.file_path("distpress.toml"))
        .assert()
        .success();

    assert_eq!(dist.count_with_suffix(".gz"), 1);
    assert_eq!(dist.count_with_suffix(".br"), 1);
    assert_file_exists(&dist, "app.js.gz");
    assert_file_exists(&dist, "app.css.br");
}

#[test]
fn test_config_conflicts_with_asset_flags() {
    let dist = TestDist::with_sample_build();

    distpress()
        .arg(dist.path())
        .args(["--config", "distpress.toml", "--algorithm", "gzip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_unknown_algorithm_fails_without_writing() {
    let dist = TestDist::with_sample_build();

    distpress()
        .arg(dist.path())
        .args(["--algorithm", "lzma"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown algorithm"));

    assert_eq!(dist.files().len(), 3);
}

#[test]
fn test_missing_directory_fails() {
    let dist = TestDist::new();

    distpress()
        .arg(dist.file_path("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_json_report() {
    let dist = TestDist::with_sample_build();

    let assert = distpress()
        .arg(dist.path())
        .args(["--json", "--threshold", "100"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["written"].as_array().unwrap().len(), 2);
    assert_eq!(report["written"][0]["algorithm"], "gzip");
    assert!(report["failures"].as_array().unwrap().is_empty());
}

#[test]
fn test_quiet_prints_nothing() {
    let dist = TestDist::with_sample_build();

    distpress()
        .arg(dist.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_suffix_count(&dist, ".gz", 3);
}

#[test]
fn test_skip_if_larger_keeps_noise_uncompressed() {
    let dist = TestDist::new();
    dist.write_file("noise.bin", &TestFixtures::incompressible_file(64));
    dist.write_file("page.html", &TestFixtures::repetitive_file(4096));

    distpress()
        .arg(dist.path())
        .args(["--skip-if-larger", "--delete-original-assets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped noise.bin.gz"));

    assert_eq!(dist.files(), vec!["noise.bin", "page.html.gz"]);
}

// distpress - Pre-compressed static build output
// Copyright (C) 2025 distpress Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Custom assertions for output directories.

use crate::dist::TestDist;
use distpress_compression::BuiltinAlgorithm;

/// Assert that a file exists in the output directory.
pub fn assert_file_exists(dist: &TestDist, name: &str) {
    assert!(
        dist.file_exists(name),
        "{} should exist, found {:?}",
        name,
        dist.files()
    );
}

/// Assert that a file does not exist in the output directory.
pub fn assert_file_absent(dist: &TestDist, name: &str) {
    assert!(
        !dist.file_exists(name),
        "{} should not exist, found {:?}",
        name,
        dist.files()
    );
}

/// Assert how many files end with `suffix`.
pub fn assert_suffix_count(dist: &TestDist, suffix: &str, expected: usize) {
    let files = dist.files();
    let actual = files.iter().filter(|f| f.ends_with(suffix)).count();
    assert_eq!(
        actual, expected,
        "expected {} files ending in {}, found {:?}",
        expected, suffix, files
    );
}

/// Assert that `artifact` decompresses to `original` with `algorithm`.
pub fn assert_decompresses_to(
    dist: &TestDist,
    artifact: &str,
    algorithm: BuiltinAlgorithm,
    original: &[u8],
) {
    let compressed = dist.read_file(artifact);
    let restored = algorithm
        .decompress(&compressed)
        .unwrap_or_else(|e| panic!("{} is not valid {}: {}", artifact, algorithm, e));
    assert_eq!(restored, original, "{} does not restore its source", artifact);
}

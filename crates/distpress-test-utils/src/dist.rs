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

//! Temporary build output directories.

use crate::fixtures::TestFixtures;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A temporary build output directory.
///
/// # Example
/// ```
/// use distpress_test_utils::TestDist;
///
/// let dist = TestDist::with_sample_build();
/// assert_eq!(dist.files(), vec!["app.css", "app.js", "index.html"]);
/// ```
pub struct TestDist {
    temp_dir: TempDir,
}

impl Default for TestDist {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDist {
    /// Create an empty output directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create an output directory holding the sample build.
    pub fn with_sample_build() -> Self {
        let dist = Self::new();
        for (name, content) in TestFixtures::sample_build() {
            dist.write_file(name, &content);
        }
        dist
    }

    /// Get the path to the output directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a file in the output directory.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write a file, creating parent directories.
    pub fn write_file(&self, name: &str, content: &[u8]) {
        let path = self.file_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Read a file.
    pub fn read_file(&self, name: &str) -> Vec<u8> {
        fs::read(self.file_path(name)).expect("Failed to read file")
    }

    /// Check if a file exists.
    pub fn file_exists(&self, name: &str) -> bool {
        self.file_path(name).is_file()
    }

    /// Every file under the directory as a sorted, `/`-separated relative path.
    pub fn files(&self) -> Vec<String> {
        let mut files: Vec<String> = WalkDir::new(self.path())
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path())
                    .ok()
                    .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            })
            .collect();
        files.sort();
        files
    }

    /// Number of files whose name ends with `suffix`.
    pub fn count_with_suffix(&self, suffix: &str) -> usize {
        self.files().iter().filter(|f| f.ends_with(suffix)).count()
    }
}

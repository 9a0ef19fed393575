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

//! Outcome of one pipeline run

use crate::error::PipelineError;
use distpress_compression::CompressionMetrics;
use serde::Serialize;

/// An artifact that was produced, written or not
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    /// Source asset path
    pub source_path: String,
    /// Derived artifact path
    pub path: String,
    /// Index of the config that produced it
    pub config_index: usize,
    /// Algorithm or routine name
    pub algorithm: String,
    /// Size figures
    pub metrics: CompressionMetrics,
}

/// A job that failed
#[derive(Debug)]
pub struct JobFailure {
    /// Source asset path
    pub source_path: String,
    /// Index of the config the job belonged to
    pub config_index: usize,
    /// What went wrong
    pub error: PipelineError,
}

/// Summary of a run
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Artifacts written to the output
    pub written: Vec<ArtifactRecord>,
    /// Artifacts dropped because they were not smaller than their source
    pub skipped: Vec<ArtifactRecord>,
    /// Originals removed after compression
    pub deleted: Vec<String>,
    /// Jobs that failed under the continue policy
    pub failures: Vec<JobFailure>,
}

impl PipelineReport {
    /// Whether every job succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total bytes of the sources behind written artifacts
    pub fn original_bytes(&self) -> usize {
        self.written.iter().map(|a| a.metrics.original_size).sum()
    }

    /// Total bytes of written artifacts
    pub fn compressed_bytes(&self) -> usize {
        self.written.iter().map(|a| a.metrics.compressed_size).sum()
    }

    /// Sort every list by path so reports are stable across runs
    pub(crate) fn sort(&mut self) {
        let key = |a: &ArtifactRecord| (a.config_index, a.path.clone());
        self.written.sort_by_key(key);
        self.skipped.sort_by_key(key);
        self.deleted.sort();
        self.failures.sort_by(|a, b| {
            (a.config_index, &a.source_path).cmp(&(b.config_index, &b.source_path))
        });
    }
}

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

//! Build assets and the artifacts derived from them

use bytes::Bytes;
use distpress_compression::{CompressionMetrics, Payload};

/// One file emitted by the build
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// Path relative to the output root, `/`-separated
    pub path: String,
    /// File content
    pub content: Payload,
    /// Size in bytes as reported by the host
    pub size: u64,
}

impl Asset {
    /// Asset whose size is the byte length of its content
    pub fn new(path: impl Into<String>, content: impl Into<Payload>) -> Self {
        let content = content.into();
        Asset {
            path: normalize_path(&path.into()),
            size: content.len() as u64,
            content,
        }
    }

    /// Override the reported size
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }
}

/// Compressed output for one (asset, config) pair
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedArtifact {
    /// Derived path relative to the output root
    pub path: String,
    /// Path of the asset it was derived from
    pub source_path: String,
    /// Compressed bytes
    pub content: Bytes,
}

impl CompressedArtifact {
    /// Size figures against the source asset
    pub fn metrics(&self, original_size: u64) -> CompressionMetrics {
        CompressionMetrics::from_sizes(original_size as usize, self.content.len())
    }
}

/// Use `/` separators and drop any leading `./` or `/`
pub(crate) fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut trimmed = path.as_str();
    loop {
        if let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            trimmed = rest;
        } else {
            break;
        }
    }
    trimmed.to_string()
}

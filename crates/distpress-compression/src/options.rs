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

//! Compression options and the per-algorithm default table

use crate::algorithm::BuiltinAlgorithm;
use crate::error::RoutineError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Highest deflate compression level
pub const Z_BEST_COMPRESSION: i64 = 9;

/// Highest brotli quality
pub const BROTLI_MAX_QUALITY: i64 = 11;

/// Algorithm-specific options, passed through to the routine untouched
///
/// The built-in zlib family reads `level`; brotli reads `params.quality` and
/// `params.lgwin`. Custom routines are free to read whatever they like.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompressionOptions(Map<String, Value>);

impl CompressionOptions {
    /// Empty option set; routines fall back to their own defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a top-level option
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up a top-level option
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up `section.key`, e.g. `params.quality`
    pub fn get_nested(&self, section: &str, key: &str) -> Option<&Value> {
        self.0.get(section)?.as_object()?.get(key)
    }

    /// Whether no option is set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Read an integer option, checking it against `min..=max`
///
/// `field` is the dotted name used in error messages, e.g. `options.level`.
pub(crate) fn int_option(
    value: Option<&Value>,
    field: &str,
    min: i64,
    max: i64,
    default: i64,
) -> Result<i64, RoutineError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let n = value.as_i64().ok_or_else(|| {
        RoutineError::invalid_arg_type(field, "an integer", &format!("{}", value))
    })?;
    if n < min || n > max {
        return Err(RoutineError::out_of_range(field, min, max, &n.to_string()));
    }
    Ok(n)
}

impl From<Map<String, Value>> for CompressionOptions {
    fn from(map: Map<String, Value>) -> Self {
        CompressionOptions(map)
    }
}

/// Baseline options per built-in algorithm
///
/// Consulted only when a configuration supplies no options at all. Supplied
/// options replace the preset wholesale, they are never merged field by field.
#[derive(Debug, Clone)]
pub struct DefaultOptions {
    table: HashMap<BuiltinAlgorithm, CompressionOptions>,
}

impl DefaultOptions {
    /// Maximal-compression presets for every built-in algorithm
    pub fn best_compression() -> Self {
        let level = CompressionOptions::new().with("level", Z_BEST_COMPRESSION);
        let quality =
            CompressionOptions::new().with("params", json!({ "quality": BROTLI_MAX_QUALITY }));

        let mut table = HashMap::new();
        table.insert(BuiltinAlgorithm::Gzip, level.clone());
        table.insert(BuiltinAlgorithm::Deflate, level.clone());
        table.insert(BuiltinAlgorithm::DeflateRaw, level);
        table.insert(BuiltinAlgorithm::BrotliCompress, quality);
        DefaultOptions { table }
    }

    /// A table with no presets; every algorithm runs with its routine defaults
    pub fn empty() -> Self {
        DefaultOptions {
            table: HashMap::new(),
        }
    }

    /// Replace the preset for one algorithm
    pub fn with(mut self, algorithm: BuiltinAlgorithm, options: CompressionOptions) -> Self {
        self.table.insert(algorithm, options);
        self
    }

    /// Preset for `algorithm`, or an empty option set if there is none
    pub fn defaults_for(&self, algorithm: BuiltinAlgorithm) -> CompressionOptions {
        self.table.get(&algorithm).cloned().unwrap_or_default()
    }
}

impl Default for DefaultOptions {
    fn default() -> Self {
        Self::best_compression()
    }
}

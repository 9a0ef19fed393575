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

use crate::pattern::PatternSet;
use distpress_compression::{Algorithm, CompressionOptions};
use serde::{Deserialize, Serialize};

/// Extension used when the algorithm has no conventional one of its own
const FALLBACK_EXTENSION: &str = "gz";

/// Root configuration: the compression configs active for one build plus
/// pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
    /// Independent compression configs, evaluated against the same asset set
    pub configs: Vec<AssetConfig>,

    /// Maximum number of compression jobs in flight
    pub concurrency: usize,

    /// What a failed compression does to the rest of the build
    pub failure_policy: FailurePolicy,
}

impl Default for PluginConfig {
    fn default() -> Self {
        PluginConfig {
            configs: vec![AssetConfig::default()],
            concurrency: default_concurrency(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl PluginConfig {
    /// Settings wrapped around the given configs
    pub fn from_configs(configs: Vec<AssetConfig>) -> Self {
        PluginConfig {
            configs,
            ..Self::default()
        }
    }

    /// Set the concurrency limit
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

fn default_concurrency() -> usize {
    num_cpus::get().max(1)
}

/// Handling of a failed compression job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop issuing jobs and fail the run with the first error
    #[default]
    Abort,
    /// Record the failure and keep going
    Continue,
}

/// One compression config
///
/// ```
/// use distpress_config::AssetConfig;
///
/// let config: AssetConfig = serde_json::from_str(r#"{
///     "algorithm": "brotliCompress",
///     "include": "\\.css$",
///     "threshold": 1024
/// }"#).unwrap();
/// assert_eq!(config.filename_template(), "[path][base].br");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetConfig {
    /// Algorithm name or custom routine
    pub algorithm: Algorithm,

    /// Options handed to the routine; replaces the algorithm defaults when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_options: Option<CompressionOptions>,

    /// Paths to consider; empty selects everything
    pub include: PatternSet,

    /// Paths to leave alone; wins over `include`
    pub exclude: PatternSet,

    /// Minimum size in bytes
    pub threshold: u64,

    /// Artifact path template, e.g. `[path][base].gz`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Remove originals once every config selecting them has written its artifact
    pub delete_original_assets: bool,

    /// Drop artifacts that are not smaller than their source
    pub skip_if_larger_or_equal: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            algorithm: Algorithm::default(),
            compression_options: None,
            include: PatternSet::new(),
            exclude: PatternSet::new(),
            threshold: 0,
            filename: None,
            delete_original_assets: false,
            skip_if_larger_or_equal: false,
        }
    }
}

impl AssetConfig {
    /// Default config using `algorithm`
    pub fn new(algorithm: impl Into<Algorithm>) -> Self {
        AssetConfig {
            algorithm: algorithm.into(),
            ..Self::default()
        }
    }

    /// Set the routine options
    pub fn with_options(mut self, options: CompressionOptions) -> Self {
        self.compression_options = Some(options);
        self
    }

    /// Set the include patterns
    pub fn with_include(mut self, include: PatternSet) -> Self {
        self.include = include;
        self
    }

    /// Set the exclude patterns
    pub fn with_exclude(mut self, exclude: PatternSet) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set the size threshold
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the artifact path template
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set whether originals are deleted
    pub fn with_delete_original_assets(mut self, delete: bool) -> Self {
        self.delete_original_assets = delete;
        self
    }

    /// Set whether non-shrinking artifacts are dropped
    pub fn with_skip_if_larger_or_equal(mut self, skip: bool) -> Self {
        self.skip_if_larger_or_equal = skip;
        self
    }

    /// Template in effect: the configured one, or `[path][base].<ext>` with
    /// the algorithm's conventional extension
    pub fn filename_template(&self) -> String {
        if let Some(filename) = &self.filename {
            return filename.clone();
        }
        let extension = match self.algorithm.builtin() {
            Ok(Some(builtin)) => builtin.extension(),
            _ => FALLBACK_EXTENSION,
        };
        format!("[path][base].{}", extension)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use distpress_compression::BuiltinAlgorithm;
    use serde_json::json;

    #[test]
    fn test_asset_config_defaults() {
        let config = AssetConfig::default();
        assert_eq!(config.algorithm, Algorithm::from(BuiltinAlgorithm::Gzip));
        assert!(config.compression_options.is_none());
        assert!(config.include.is_empty());
        assert!(config.exclude.is_empty());
        assert_eq!(config.threshold, 0);
        assert!(!config.delete_original_assets);
        assert!(!config.skip_if_larger_or_equal);
        assert_eq!(config.filename_template(), "[path][base].gz");
    }

    #[test]
    fn test_template_follows_algorithm() {
        assert_eq!(
            AssetConfig::new(BuiltinAlgorithm::BrotliCompress).filename_template(),
            "[path][base].br"
        );
        assert_eq!(
            AssetConfig::new(BuiltinAlgorithm::DeflateRaw).filename_template(),
            "[path][base].gz"
        );
        assert_eq!(
            AssetConfig::new(BuiltinAlgorithm::Gzip)
                .with_filename("fake/[base].gz")
                .filename_template(),
            "fake/[base].gz"
        );
    }

    #[test]
    fn test_custom_algorithm_falls_back_to_gz() {
        let config = AssetConfig::new(Algorithm::from_fn("noop", |_, _, _| {}));
        assert_eq!(config.filename_template(), "[path][base].gz");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: AssetConfig = serde_json::from_value(json!({
            "algorithm": "deflate",
            "compressionOptions": { "level": 3 },
            "include": ["\\.js$", "\\.mjs$"],
            "exclude": "\\.test\\.js$",
            "threshold": 10,
            "filename": "[path][base].z",
            "deleteOriginalAssets": true,
            "skipIfLargerOrEqual": true
        }))
        .unwrap();

        assert_eq!(config.algorithm.name(), "deflate");
        assert_eq!(
            config.compression_options,
            Some(CompressionOptions::new().with("level", 3))
        );
        assert_eq!(config.include.len(), 2);
        assert_eq!(config.exclude.len(), 1);
        assert_eq!(config.threshold, 10);
        assert!(config.delete_original_assets);
        assert!(config.skip_if_larger_or_equal);
    }

    #[test]
    fn test_unknown_algorithm_parses() {
        let config: AssetConfig = serde_json::from_value(json!({ "algorithm": "lzma" })).unwrap();
        assert!(config.algorithm.builtin().is_err());
        assert_eq!(config.filename_template(), "[path][base].gz");
    }

    #[test]
    fn test_plugin_config_defaults() {
        let config = PluginConfig::default();
        assert_eq!(config.configs.len(), 1);
        assert!(config.concurrency >= 1);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_failure_policy_lowercase() {
        let config: PluginConfig =
            serde_json::from_value(json!({ "failurePolicy": "continue", "configs": [] })).unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
        assert!(config.configs.is_empty());
    }
}

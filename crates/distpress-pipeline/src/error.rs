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

use distpress_compression::CompressionError;
use distpress_config::ConfigError;
use thiserror::Error;

/// Errors raised while running the compression pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The configuration failed validation
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A config could not be prepared, e.g. its algorithm name is unknown
    #[error("config {index}: {source}")]
    Prepare {
        /// Position of the config in the configured list
        index: usize,
        /// Why preparation failed
        #[source]
        source: CompressionError,
    },

    /// The routine failed on one asset; the routine's error is kept as-is
    #[error("failed to compress {path} with {algorithm}: {source}")]
    Compression {
        /// Source asset path
        path: String,
        /// Algorithm or routine name
        algorithm: String,
        /// The routine's failure
        #[source]
        source: CompressionError,
    },

    /// Two jobs, or a job and an existing asset, would write the same path
    #[error("artifact path {artifact} for {source_path} collides with {other}")]
    NamingCollision {
        /// The derived artifact path
        artifact: String,
        /// Asset the artifact is derived from
        source_path: String,
        /// What already claims that path
        other: String,
    },

    /// Writing an artifact or removing an original failed
    #[error("output error at {path}: {reason}")]
    Output {
        /// Path being written or removed
        path: String,
        /// Underlying failure
        reason: String,
    },
}

impl PipelineError {
    /// Create a naming collision error
    pub fn naming_collision(
        artifact: impl Into<String>,
        source_path: impl Into<String>,
        other: impl Into<String>,
    ) -> Self {
        PipelineError::NamingCollision {
            artifact: artifact.into(),
            source_path: source_path.into(),
            other: other.into(),
        }
    }

    /// Create an output error from a host failure
    pub fn output(path: impl Into<String>, error: &anyhow::Error) -> Self {
        PipelineError::Output {
            path: path.into(),
            reason: format!("{:#}", error),
        }
    }

    /// The routine error behind a compression failure, if any
    pub fn compression_error(&self) -> Option<&CompressionError> {
        match self {
            PipelineError::Prepare { source, .. } | PipelineError::Compression { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_error_display() {
        let err = PipelineError::Prepare {
            index: 1,
            source: CompressionError::unknown_algorithm("lzma"),
        };
        assert!(err.to_string().starts_with("config 1: unknown algorithm: lzma"));
        assert!(err.compression_error().unwrap().is_unknown_algorithm());
    }

    #[test]
    fn test_output_error_keeps_context() {
        let cause = anyhow::anyhow!("disk full").context("writing app.js.gz");
        let err = PipelineError::output("app.js.gz", &cause);
        assert_eq!(
            err.to_string(),
            "output error at app.js.gz: writing app.js.gz: disk full"
        );
        assert!(err.compression_error().is_none());
    }

    #[test]
    fn test_collision_display() {
        let err = PipelineError::naming_collision("fake/a.gz", "x/a.js", "y/a.js (config 0)");
        assert_eq!(
            err.to_string(),
            "artifact path fake/a.gz for x/a.js collides with y/a.js (config 0)"
        );
    }
}

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

//! Algorithm identifiers, the routine capability and the registry resolving one to the other

use crate::brotli_routine::{self, BrotliRoutine};
use crate::error::{CompressionError, CompressionResult, RoutineError};
use crate::options::{CompressionOptions, DefaultOptions};
use crate::payload::{Payload, RoutineOutput};
use crate::zlib_routine::{self, ZlibFormat, ZlibRoutine};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Completion callback handed to a routine
///
/// Being `FnOnce`, a routine can settle an invocation at most once.
pub type Completion = Box<dyn FnOnce(Result<RoutineOutput, RoutineError>) + Send + 'static>;

/// A compression routine in callback-completion shape
///
/// Built-in and user-supplied routines are interchangeable through this
/// trait. An implementation must eventually call `done` exactly once, either
/// synchronously or from another thread or task.
pub trait CompressionRoutine: Send + Sync + fmt::Debug {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Compress `payload` with `options`, reporting the outcome through `done`
    fn compress(&self, payload: Payload, options: CompressionOptions, done: Completion);
}

/// Adapter turning a closure into a [`CompressionRoutine`]
pub struct FnRoutine<F> {
    name: String,
    f: F,
}

impl<F> FnRoutine<F>
where
    F: Fn(Payload, CompressionOptions, Completion) + Send + Sync + 'static,
{
    /// Wrap `f` under the given name
    pub fn new(name: impl Into<String>, f: F) -> Self {
        FnRoutine {
            name: name.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnRoutine<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRoutine").field("name", &self.name).finish()
    }
}

impl<F> CompressionRoutine for FnRoutine<F>
where
    F: Fn(Payload, CompressionOptions, Completion) + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn compress(&self, payload: Payload, options: CompressionOptions, done: Completion) {
        (self.f)(payload, options, done)
    }
}

/// The fixed set of built-in algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinAlgorithm {
    /// gzip container around deflate
    Gzip,
    /// Brotli
    BrotliCompress,
    /// zlib container around deflate
    Deflate,
    /// Bare deflate stream
    DeflateRaw,
}

impl BuiltinAlgorithm {
    /// Every built-in algorithm
    pub const ALL: [BuiltinAlgorithm; 4] = [
        BuiltinAlgorithm::Gzip,
        BuiltinAlgorithm::BrotliCompress,
        BuiltinAlgorithm::Deflate,
        BuiltinAlgorithm::DeflateRaw,
    ];

    /// Symbolic name as written in configuration
    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinAlgorithm::Gzip => "gzip",
            BuiltinAlgorithm::BrotliCompress => "brotliCompress",
            BuiltinAlgorithm::Deflate => "deflate",
            BuiltinAlgorithm::DeflateRaw => "deflateRaw",
        }
    }

    /// File extension appended by the default filename template
    pub fn extension(self) -> &'static str {
        match self {
            BuiltinAlgorithm::BrotliCompress => "br",
            _ => "gz",
        }
    }

    /// Routine implementing this algorithm
    pub fn routine(self) -> Arc<dyn CompressionRoutine> {
        match self {
            BuiltinAlgorithm::Gzip => Arc::new(ZlibRoutine::new(ZlibFormat::Gzip)),
            BuiltinAlgorithm::Deflate => Arc::new(ZlibRoutine::new(ZlibFormat::Zlib)),
            BuiltinAlgorithm::DeflateRaw => Arc::new(ZlibRoutine::new(ZlibFormat::Raw)),
            BuiltinAlgorithm::BrotliCompress => Arc::new(BrotliRoutine::new()),
        }
    }

    /// Inverse of this algorithm, for verifying produced artifacts
    pub fn decompress(self, data: &[u8]) -> CompressionResult<Vec<u8>> {
        match self {
            BuiltinAlgorithm::Gzip => zlib_routine::decode(ZlibFormat::Gzip, data),
            BuiltinAlgorithm::Deflate => zlib_routine::decode(ZlibFormat::Zlib, data),
            BuiltinAlgorithm::DeflateRaw => zlib_routine::decode(ZlibFormat::Raw, data),
            BuiltinAlgorithm::BrotliCompress => brotli_routine::decode(data),
        }
    }
}

impl fmt::Display for BuiltinAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuiltinAlgorithm {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == s)
            .ok_or_else(|| CompressionError::unknown_algorithm(s))
    }
}

/// Algorithm requested by a configuration
///
/// Names are kept as written and only checked when resolved, so a bad name
/// fails when the pipeline prepares that configuration rather than at parse time.
#[derive(Clone)]
pub enum Algorithm {
    /// Symbolic name of a built-in algorithm
    Named(String),
    /// Caller-supplied routine
    Custom(Arc<dyn CompressionRoutine>),
}

impl Algorithm {
    /// Wrap a caller-supplied routine
    pub fn custom<R: CompressionRoutine + 'static>(routine: R) -> Self {
        Algorithm::Custom(Arc::new(routine))
    }

    /// Wrap a closure as a caller-supplied routine
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Payload, CompressionOptions, Completion) + Send + Sync + 'static,
    {
        Algorithm::custom(FnRoutine::new(name, f))
    }

    /// Name of the algorithm or custom routine
    pub fn name(&self) -> &str {
        match self {
            Algorithm::Named(name) => name,
            Algorithm::Custom(routine) => routine.name(),
        }
    }

    /// The built-in this refers to; `None` for custom routines
    pub fn builtin(&self) -> CompressionResult<Option<BuiltinAlgorithm>> {
        match self {
            Algorithm::Named(name) => name.parse().map(Some),
            Algorithm::Custom(_) => Ok(None),
        }
    }

    /// Whether this is a caller-supplied routine
    pub fn is_custom(&self) -> bool {
        matches!(self, Algorithm::Custom(_))
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::from(BuiltinAlgorithm::Gzip)
    }
}

impl From<BuiltinAlgorithm> for Algorithm {
    fn from(algorithm: BuiltinAlgorithm) -> Self {
        Algorithm::Named(algorithm.as_str().to_string())
    }
}

impl From<&str> for Algorithm {
    fn from(name: &str) -> Self {
        Algorithm::Named(name.to_string())
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Algorithm::Custom(routine) => f.debug_tuple("Custom").field(routine).finish(),
        }
    }
}

impl PartialEq for Algorithm {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Algorithm::Named(a), Algorithm::Named(b)) => a == b,
            (Algorithm::Custom(a), Algorithm::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Algorithm::Named)
    }
}

/// Resolves algorithms to routines and to their default options
#[derive(Debug, Clone, Default)]
pub struct AlgorithmRegistry {
    defaults: DefaultOptions,
}

impl AlgorithmRegistry {
    /// Registry with the maximal-compression default table
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a caller-supplied default table
    pub fn with_defaults(defaults: DefaultOptions) -> Self {
        AlgorithmRegistry { defaults }
    }

    /// Routine for `algorithm`
    ///
    /// # Errors
    ///
    /// Returns [`CompressionError::UnknownAlgorithm`] for names outside the built-in table.
    pub fn resolve(&self, algorithm: &Algorithm) -> CompressionResult<Arc<dyn CompressionRoutine>> {
        match algorithm {
            Algorithm::Named(name) => Ok(name.parse::<BuiltinAlgorithm>()?.routine()),
            Algorithm::Custom(routine) => Ok(Arc::clone(routine)),
        }
    }

    /// Default options for `algorithm`; custom routines get an empty set
    pub fn defaults_for(&self, algorithm: &Algorithm) -> CompressionResult<CompressionOptions> {
        Ok(algorithm
            .builtin()?
            .map(|builtin| self.defaults.defaults_for(builtin))
            .unwrap_or_default())
    }

    /// Options a routine runs with: `supplied` when present, otherwise the defaults
    pub fn options_for(
        &self,
        algorithm: &Algorithm,
        supplied: Option<&CompressionOptions>,
    ) -> CompressionResult<CompressionOptions> {
        match supplied {
            Some(options) => Ok(options.clone()),
            None => self.defaults_for(algorithm),
        }
    }
}

/// Resolve `algorithm` against the standard registry
pub fn resolve(algorithm: &Algorithm) -> CompressionResult<Arc<dyn CompressionRoutine>> {
    AlgorithmRegistry::new().resolve(algorithm)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_builtin_resolves() {
        for algorithm in BuiltinAlgorithm::ALL {
            let routine = resolve(&Algorithm::from(algorithm)).unwrap();
            assert!(!routine.name().is_empty());
        }
    }

    #[test]
    fn test_unknown_name_fails() {
        for name in ["zstd", "Gzip", "", "brotli"] {
            let err = resolve(&Algorithm::from(name)).unwrap_err();
            assert!(err.is_unknown_algorithm(), "{name} should be unknown");
        }
    }

    #[test]
    fn test_custom_routine_passes_through() {
        let algorithm = Algorithm::from_fn("identity", |payload, _options, done| {
            done(Ok(RoutineOutput::from(payload.as_bytes().unwrap_or_default().to_vec())))
        });
        let routine = resolve(&algorithm).unwrap();
        match &algorithm {
            Algorithm::Custom(original) => assert!(Arc::ptr_eq(original, &routine)),
            Algorithm::Named(_) => unreachable!(),
        }
        assert_eq!(routine.name(), "identity");
    }

    #[test]
    fn test_builtin_names_round_trip() {
        for algorithm in BuiltinAlgorithm::ALL {
            assert_eq!(algorithm.as_str().parse::<BuiltinAlgorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_extensions() {
        assert_eq!(BuiltinAlgorithm::Gzip.extension(), "gz");
        assert_eq!(BuiltinAlgorithm::BrotliCompress.extension(), "br");
        assert_eq!(BuiltinAlgorithm::DeflateRaw.extension(), "gz");
    }

    #[test]
    fn test_supplied_options_replace_defaults() {
        let registry = AlgorithmRegistry::new();
        let supplied = CompressionOptions::new().with("strategy", 1);
        let options = registry
            .options_for(&Algorithm::default(), Some(&supplied))
            .unwrap();
        assert_eq!(options, supplied);
        assert_eq!(options.get("level"), None);
    }

    #[test]
    fn test_missing_options_use_defaults() {
        let registry = AlgorithmRegistry::new();
        let options = registry.options_for(&Algorithm::default(), None).unwrap();
        assert_eq!(options.get("level"), Some(&json!(9)));
    }

    #[test]
    fn test_custom_routine_has_no_defaults() {
        let algorithm =
            Algorithm::from_fn("noop", |_, _, done| done(Ok(RoutineOutput::from(Vec::new()))));
        let options = AlgorithmRegistry::new().options_for(&algorithm, None).unwrap();
        assert!(options.is_empty());
    }

    #[test]
    fn test_algorithm_serde() {
        let algorithm: Algorithm = serde_json::from_value(json!("brotliCompress")).unwrap();
        assert_eq!(algorithm, Algorithm::from(BuiltinAlgorithm::BrotliCompress));
        assert_eq!(serde_json::to_value(&algorithm).unwrap(), json!("brotliCompress"));
    }
}

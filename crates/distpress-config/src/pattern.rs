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

//! Include/exclude patterns
//!
//! Patterns are regular expressions matched against an asset's path relative
//! to the output root, e.g. `\.(js|css)$`. A field accepts either a single
//! pattern or a list; a list matches when any of its patterns does.

use crate::error::{ConfigError, ConfigResult};
use regex_lite::Regex;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One compiled pattern
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if `source` is not a valid regular expression.
    pub fn new(source: &str) -> ConfigResult<Self> {
        let regex =
            Regex::new(source).map_err(|e| ConfigError::invalid_pattern(source, e.to_string()))?;
        Ok(Pattern {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `path` matches
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(de::Error::custom)
    }
}

/// Zero or more patterns combined with logical OR
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternSet(Vec<Pattern>);

impl PatternSet {
    /// An empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every pattern in `sources`
    ///
    /// # Errors
    ///
    /// Fails on the first source that does not compile.
    pub fn parse<I, S>(sources: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        sources
            .into_iter()
            .map(|source| Pattern::new(source.as_ref()))
            .collect::<ConfigResult<Vec<_>>>()
            .map(PatternSet)
    }

    /// Whether the set holds no pattern
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any pattern matches `path`; always false for an empty set
    pub fn matches_any(&self, path: &str) -> bool {
        self.0.iter().any(|pattern| pattern.is_match(path))
    }

    /// Iterate over the patterns
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.0.iter()
    }
}

impl From<Pattern> for PatternSet {
    fn from(pattern: Pattern) -> Self {
        PatternSet(vec![pattern])
    }
}

impl Serialize for PatternSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.0)
    }
}

impl<'de> Deserialize<'de> for PatternSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(Pattern),
            Many(Vec<Pattern>),
        }

        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(pattern) => PatternSet::from(pattern),
            OneOrMany::Many(patterns) => PatternSet(patterns),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pattern_matches_path() {
        let pattern = Pattern::new(r"\.(js)$").unwrap();
        assert!(pattern.is_match("assets/app.js"));
        assert!(!pattern.is_match("assets/app.json"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Pattern::new(r"\.(js$").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPattern { ref pattern, .. } if pattern == r"\.(js$"
        ));
    }

    #[test]
    fn test_set_is_logical_or() {
        let set = PatternSet::parse([r"\.js$", r"\.css$"]).unwrap();
        assert!(set.matches_any("a.js"));
        assert!(set.matches_any("b.css"));
        assert!(!set.matches_any("index.html"));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        assert!(!PatternSet::new().matches_any("anything"));
    }

    #[test]
    fn test_deserialize_single_or_list() {
        let one: PatternSet = serde_json::from_value(json!(r"\.html$")).unwrap();
        assert_eq!(one.len(), 1);

        let many: PatternSet = serde_json::from_value(json!([r"\.js$", r"\.css$"])).unwrap();
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn test_deserialize_rejects_bad_regex() {
        let result: Result<PatternSet, _> = serde_json::from_value(json!(["(unclosed"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_as_list() {
        let set = PatternSet::parse([r"\.js$"]).unwrap();
        assert_eq!(serde_json::to_value(&set).unwrap(), json!([r"\.js$"]));
    }
}

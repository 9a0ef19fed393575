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

//! Artifact naming
//!
//! Templates use four placeholders, taken from the asset's relative path
//! `assets/app.min.js`:
//!
//! | placeholder | value |
//! |---|---|
//! | `[path]` | `assets/` (directory with trailing slash, empty at the root) |
//! | `[base]` | `app.min.js` |
//! | `[name]` | `app.min` |
//! | `[ext]` | `.js` (empty when there is none) |
//!
//! Everything else in the template is copied literally, so `fake/[base].gz`
//! groups artifacts under `fake/`.

use crate::asset::{normalize_path, Asset};
use distpress_config::AssetConfig;

/// Components of an asset path used by templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathParts<'a> {
    /// Directory with trailing `/`, or empty
    pub dir: &'a str,
    /// File name with extension
    pub base: &'a str,
    /// File name without the last extension
    pub name: &'a str,
    /// Last extension including the dot, or empty
    pub ext: &'a str,
}

impl<'a> PathParts<'a> {
    /// Split a `/`-separated relative path
    pub fn split(path: &'a str) -> Self {
        let (dir, base) = match path.rfind('/') {
            Some(i) => (&path[..=i], &path[i + 1..]),
            None => ("", path),
        };
        // A leading dot marks a hidden file, not an extension
        let (name, ext) = match base.rfind('.') {
            Some(i) if i > 0 => (&base[..i], &base[i..]),
            _ => (base, ""),
        };
        PathParts {
            dir,
            base,
            name,
            ext,
        }
    }
}

/// Expand `template` for the asset at `path`
pub fn render(template: &str, path: &str) -> String {
    let parts = PathParts::split(path);
    let placeholders = [
        ("[path]", parts.dir),
        ("[base]", parts.base),
        ("[name]", parts.name),
        ("[ext]", parts.ext),
    ];

    // Single pass, so brackets inside substituted names are never expanded again
    let mut expanded = String::with_capacity(template.len() + path.len());
    let mut rest = template;
    while let Some(start) = rest.find('[') {
        expanded.push_str(&rest[..start]);
        let tail = &rest[start..];
        match placeholders
            .iter()
            .find(|(placeholder, _)| tail.starts_with(*placeholder))
        {
            Some((placeholder, value)) => {
                expanded.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                expanded.push('[');
                rest = &tail[1..];
            }
        }
    }
    expanded.push_str(rest);
    normalize_path(&expanded)
}

/// Artifact path for `asset` under `config`
pub fn name_for(asset: &Asset, config: &AssetConfig) -> String {
    render(&config.filename_template(), &asset.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use distpress_compression::BuiltinAlgorithm;

    #[test]
    fn test_split() {
        let parts = PathParts::split("assets/app.min.js");
        assert_eq!(parts.dir, "assets/");
        assert_eq!(parts.base, "app.min.js");
        assert_eq!(parts.name, "app.min");
        assert_eq!(parts.ext, ".js");
    }

    #[test]
    fn test_split_root_and_dotfiles() {
        assert_eq!(PathParts::split("index.html").dir, "");
        let hidden = PathParts::split(".htaccess");
        assert_eq!(hidden.name, ".htaccess");
        assert_eq!(hidden.ext, "");
        assert_eq!(PathParts::split("LICENSE").ext, "");
    }

    #[test]
    fn test_default_templates() {
        let asset = Asset::new("assets/app.js", "x");
        assert_eq!(name_for(&asset, &AssetConfig::default()), "assets/app.js.gz");
        assert_eq!(
            name_for(&asset, &AssetConfig::new(BuiltinAlgorithm::BrotliCompress)),
            "assets/app.js.br"
        );
    }

    #[test]
    fn test_subdirectory_template() {
        let config = AssetConfig::default().with_filename("fake/[base].gz");
        assert_eq!(
            name_for(&Asset::new("assets/app.js", "x"), &config),
            "fake/app.js.gz"
        );
    }

    #[test]
    fn test_name_and_ext_placeholders() {
        assert_eq!(render("[path][name].min[ext]", "js/app.js"), "js/app.min.js");
        assert_eq!(render("[path][name][ext].zz", "README"), "README.zz");
    }

    #[test]
    fn test_brackets_in_names_are_literal() {
        assert_eq!(render("[path][base].gz", "[id]/[name].js"), "[id]/[name].js.gz");
        assert_eq!(render("out[1]/[base]", "a.js"), "out[1]/a.js");
    }
}

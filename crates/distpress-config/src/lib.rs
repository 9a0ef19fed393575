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

//! Configuration for the distpress compression pipeline
//!
//! - [`AssetConfig`]: one compression config (algorithm, options, include/exclude
//!   patterns, size threshold, filename template, deletion and skip flags)
//! - [`PluginConfig`]: the configs active for one build plus pipeline settings
//! - [`ConfigLoader`]: TOML, YAML or JSON files, validated on load
//!
//! # Example
//!
//! ```
//! use distpress_config::{ConfigFormat, ConfigLoader};
//!
//! let config = ConfigLoader::new().load_from_string(
//!     r#"
//!     [[configs]]
//!     algorithm = "gzip"
//!     include = '\.(js|css|html)$'
//!     threshold = 1024
//!     "#,
//!     ConfigFormat::Toml,
//! )?;
//! assert_eq!(config.configs[0].filename_template(), "[path][base].gz");
//! # Ok::<(), distpress_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod pattern;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader};
pub use pattern::{Pattern, PatternSet};
pub use schema::{AssetConfig, FailurePolicy, PluginConfig};
pub use validation::Validator;

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

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{AssetConfig, PluginConfig};
use std::path::{Component, Path};

/// Validator for configuration settings
pub trait Validator {
    /// Check the settings, naming the first offending field
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for PluginConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.concurrency == 0 {
            return Err(ConfigError::invalid_value(
                "concurrency",
                "must be at least 1",
            ));
        }

        for (index, config) in self.configs.iter().enumerate() {
            config.validate().map_err(|e| prefix_field(e, index))?;
        }

        Ok(())
    }
}

impl Validator for AssetConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(filename) = &self.filename {
            validate_template(filename)?;
        }
        Ok(())
    }
}

/// A template must name the file and stay relative to the output root
fn validate_template(template: &str) -> ConfigResult<()> {
    if template.trim().is_empty() {
        return Err(ConfigError::invalid_value("filename", "must not be empty"));
    }

    // Without the file name every asset in a directory maps to one path,
    // and root assets to an empty one
    if !template.contains("[base]") && !template.contains("[name]") {
        return Err(ConfigError::invalid_value(
            "filename",
            format!("must contain [base] or [name], got {}", template),
        ));
    }

    let path = Path::new(template);
    if path.is_absolute() || template.starts_with('/') || template.starts_with('\\') {
        return Err(ConfigError::invalid_value(
            "filename",
            format!("must be relative to the output directory, got {}", template),
        ));
    }

    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ConfigError::invalid_value(
            "filename",
            format!("must not leave the output directory, got {}", template),
        ));
    }

    Ok(())
}

fn prefix_field(error: ConfigError, index: usize) -> ConfigError {
    match error {
        ConfigError::InvalidValue { field, reason } => {
            ConfigError::invalid_value(format!("configs[{}].{}", index, field), reason)
        }
        other => other,
    }
}

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

//! Command-line arguments

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use distpress_config::{
    AssetConfig, ConfigLoader, FailurePolicy, PatternSet, PluginConfig, Validator,
};
use distpress_observability::LogFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "distpress")]
#[command(version, about = "Pre-compress static build output")]
#[command(
    long_about = "distpress writes compressed siblings (gzip, brotli, deflate) next to the files
of a build directory so a static server can hand them out without compressing on the fly.

Asset options describe a single compression pass. Use --config for several passes."
)]
#[command(author = "distpress Contributors")]
pub struct Cli {
    /// Build output directory
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Load passes from a TOML, YAML or JSON file
    #[arg(
        short,
        long,
        value_name = "FILE",
        conflicts_with_all = [
            "algorithm",
            "include",
            "exclude",
            "threshold",
            "filename",
            "delete_original_assets",
            "skip_if_larger",
        ]
    )]
    pub config: Option<PathBuf>,

    /// Algorithm (gzip, brotliCompress, deflate, deflateRaw)
    #[arg(short, long, value_name = "NAME")]
    pub algorithm: Option<String>,

    /// Only compress paths matching this regex (repeatable)
    #[arg(short, long, value_name = "REGEX")]
    pub include: Vec<String>,

    /// Never compress paths matching this regex (repeatable)
    #[arg(short = 'x', long, value_name = "REGEX")]
    pub exclude: Vec<String>,

    /// Minimum file size in bytes
    #[arg(short, long, value_name = "BYTES")]
    pub threshold: Option<u64>,

    /// Artifact name template ([path], [base], [name], [ext])
    #[arg(short, long, value_name = "TEMPLATE")]
    pub filename: Option<String>,

    /// Remove originals once every pass has compressed them
    #[arg(long)]
    pub delete_original_assets: bool,

    /// Drop artifacts that are not smaller than their source
    #[arg(long)]
    pub skip_if_larger: bool,

    /// Maximum number of files compressed at once
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Keep going after a file fails instead of stopping the run
    #[arg(long)]
    pub continue_on_error: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log format (pretty|compact|json)
    #[arg(long, value_name = "FORMAT", default_value = "compact")]
    pub log_format: LogFormat,

    /// Colored output (always|auto|never)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,
}

impl Cli {
    /// Pipeline configuration from `--config` or the asset flags
    pub async fn plugin_config(&self) -> Result<PluginConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::new()
                .load_file(path)
                .await
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => PluginConfig::from_configs(vec![self.asset_config()?]),
        };

        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if self.continue_on_error {
            config.failure_policy = FailurePolicy::Continue;
        }
        config.validate()?;
        Ok(config)
    }

    fn asset_config(&self) -> Result<AssetConfig> {
        let mut config = AssetConfig::new(self.algorithm.as_deref().unwrap_or("gzip"))
            .with_include(PatternSet::parse(&self.include)?)
            .with_exclude(PatternSet::parse(&self.exclude)?)
            .with_delete_original_assets(self.delete_original_assets)
            .with_skip_if_larger_or_equal(self.skip_if_larger);
        if let Some(threshold) = self.threshold {
            config = config.with_threshold(threshold);
        }
        if let Some(filename) = &self.filename {
            config = config.with_filename(filename.clone());
        }
        Ok(config)
    }
}

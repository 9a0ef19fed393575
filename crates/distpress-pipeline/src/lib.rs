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

//! Compression pipeline for build output
//!
//! Given the files a build emitted and one or more [`AssetConfig`]s, the
//! pipeline decides which files each config selects ([`is_eligible`]), names
//! the artifacts ([`name_for`]), compresses them through the algorithm
//! registry and hands the results to an [`OutputTarget`]. Originals marked
//! for deletion are removed only after every config selecting them is done.
//!
//! # Example
//!
//! ```no_run
//! use distpress_config::{AssetConfig, PatternSet, PluginConfig};
//! use distpress_pipeline::{CompressionPipeline, DirectoryOutput};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let output = DirectoryOutput::new("dist");
//!     let assets = output.enumerate().await?;
//!
//!     let config = PluginConfig::from_configs(vec![
//!         AssetConfig::default().with_include(PatternSet::parse([r"\.(js|css|html)$"])?),
//!     ]);
//!     let report = CompressionPipeline::new(config)?.run(&assets, &output).await?;
//!
//!     println!("wrote {} artifacts", report.written.len());
//!     Ok(())
//! }
//! ```
//!
//! [`AssetConfig`]: distpress_config::AssetConfig

pub mod asset;
pub mod barrier;
pub mod error;
pub mod namer;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod selector;

pub use asset::{Asset, CompressedArtifact};
pub use barrier::{DeletionBarrier, JobOutcome};
pub use error::{PipelineError, PipelineResult};
pub use namer::{name_for, render, PathParts};
pub use output::{DirectoryOutput, MemoryOutput, OutputTarget};
pub use pipeline::CompressionPipeline;
pub use report::{ArtifactRecord, JobFailure, PipelineReport};
pub use selector::is_eligible;

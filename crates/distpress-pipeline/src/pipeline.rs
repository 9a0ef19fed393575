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

//! Pipeline orchestration
//!
//! A run has three phases:
//!
//! 1. **Prepare**: resolve every config's routine and options. An unknown
//!    algorithm fails the run before any asset is touched.
//! 2. **Plan**: match each config against the original asset list and name
//!    the artifacts. Configs never see each other's output, and a derived path
//!    claimed twice (or equal to an existing asset) fails the run.
//! 3. **Execute**: run up to `concurrency` jobs at once. Originals marked for
//!    deletion are removed only once every job reading them has written its
//!    artifact.

use crate::asset::{Asset, CompressedArtifact};
use crate::barrier::{DeletionBarrier, JobOutcome};
use crate::error::{PipelineError, PipelineResult};
use crate::namer::render;
use crate::output::OutputTarget;
use crate::report::{ArtifactRecord, JobFailure, PipelineReport};
use crate::selector::is_eligible;
use distpress_compression::{run, AlgorithmRegistry, CompressionOptions, CompressionRoutine};
use distpress_config::{AssetConfig, FailurePolicy, PluginConfig, Validator};
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

/// A config with its routine and options resolved
struct PreparedConfig<'a> {
    index: usize,
    config: &'a AssetConfig,
    routine: Arc<dyn CompressionRoutine>,
    options: CompressionOptions,
    template: String,
}

/// One (asset, config) pair
struct Job<'a> {
    asset: &'a Asset,
    prepared: &'a PreparedConfig<'a>,
    artifact_path: String,
}

enum JobEvent {
    Written(ArtifactRecord),
    Skipped(ArtifactRecord),
    Deleted(String),
    Failed(JobFailure),
}

/// Compresses build output according to a [`PluginConfig`]
///
/// ```
/// use distpress_config::{AssetConfig, PatternSet, PluginConfig};
/// use distpress_pipeline::{Asset, CompressionPipeline, MemoryOutput};
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let config = AssetConfig::default().with_include(PatternSet::parse([r"\.js$"])?);
/// let pipeline = CompressionPipeline::new(PluginConfig::from_configs(vec![config]))?;
///
/// let assets = vec![Asset::new("app.js", "console.log('hi')".repeat(20))];
/// let output = MemoryOutput::with_assets(&assets).await;
/// let report = pipeline.run(&assets, &output).await?;
///
/// assert_eq!(report.written.len(), 1);
/// assert!(output.contains("app.js.gz").await);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CompressionPipeline {
    config: PluginConfig,
    registry: AlgorithmRegistry,
}

impl CompressionPipeline {
    /// Pipeline for a validated configuration, using the maximal-compression defaults
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the configuration is invalid.
    pub fn new(config: PluginConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(CompressionPipeline {
            config,
            registry: AlgorithmRegistry::new(),
        })
    }

    /// Use a different registry, e.g. one with its own default table
    pub fn with_registry(mut self, registry: AlgorithmRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The configuration in effect
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Compress `assets`, writing artifacts to and removing originals from `target`
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Prepare`] for a config that cannot be resolved
    /// - [`PipelineError::NamingCollision`] when two jobs would write one path
    /// - under [`FailurePolicy::Abort`], the first job failure
    ///
    /// Under [`FailurePolicy::Continue`] job failures are returned in the report.
    pub async fn run(
        &self,
        assets: &[Asset],
        target: &dyn OutputTarget,
    ) -> PipelineResult<PipelineReport> {
        let prepared = self.prepare()?;
        let jobs = plan(&prepared, assets)?;

        let barrier = DeletionBarrier::new();
        for job in &jobs {
            barrier
                .register(&job.asset.path, job.prepared.config.delete_original_assets)
                .await;
        }

        info!(
            assets = assets.len(),
            configs = prepared.len(),
            jobs = jobs.len(),
            "compressing build output"
        );

        let abort = AtomicBool::new(false);
        let events: Vec<Vec<JobEvent>> = stream::iter(&jobs)
            .map(|job| self.execute(job, target, &barrier, &abort))
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut report = PipelineReport::default();
        for event in events.into_iter().flatten() {
            match event {
                JobEvent::Written(record) => report.written.push(record),
                JobEvent::Skipped(record) => report.skipped.push(record),
                JobEvent::Deleted(path) => report.deleted.push(path),
                JobEvent::Failed(failure) => report.failures.push(failure),
            }
        }

        if self.config.failure_policy == FailurePolicy::Abort && !report.failures.is_empty() {
            // Failures are in completion order, so the first one is the one that tripped the abort
            let failure = report.failures.swap_remove(0);
            return Err(failure.error);
        }

        report.sort();
        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            deleted = report.deleted.len(),
            failed = report.failures.len(),
            original_bytes = report.original_bytes(),
            compressed_bytes = report.compressed_bytes(),
            "compression finished"
        );
        Ok(report)
    }

    fn prepare(&self) -> PipelineResult<Vec<PreparedConfig<'_>>> {
        self.config
            .configs
            .iter()
            .enumerate()
            .map(|(index, config)| {
                let routine = self
                    .registry
                    .resolve(&config.algorithm)
                    .map_err(|source| PipelineError::Prepare { index, source })?;
                let options = self
                    .registry
                    .options_for(&config.algorithm, config.compression_options.as_ref())
                    .map_err(|source| PipelineError::Prepare { index, source })?;
                debug!(config = index, algorithm = routine.name(), "prepared config");
                Ok(PreparedConfig {
                    index,
                    config,
                    routine,
                    options,
                    template: config.filename_template(),
                })
            })
            .collect()
    }

    async fn execute(
        &self,
        job: &Job<'_>,
        target: &dyn OutputTarget,
        barrier: &DeletionBarrier,
        abort: &AtomicBool,
    ) -> Vec<JobEvent> {
        // An aborted run issues no new work; the job's original stays put
        // because its barrier entry never drains
        if abort.load(Ordering::SeqCst) {
            return Vec::new();
        }

        let span = info_span!(
            "compress",
            config = job.prepared.index,
            algorithm = job.prepared.routine.name(),
            asset = %job.asset.path
        );
        async move {
            let mut events = Vec::new();
            let outcome = match compress(job).await {
                Ok(artifact) => self.emit(job, artifact, target, abort, &mut events).await,
                Err(error) => {
                    events.push(self.fail(job, error, abort));
                    JobOutcome::Failed
                }
            };

            if barrier.complete(&job.asset.path, outcome).await {
                match target.remove(&job.asset.path).await {
                    Ok(()) => {
                        debug!("deleted original");
                        events.push(JobEvent::Deleted(job.asset.path.clone()));
                    }
                    Err(e) => {
                        let error = PipelineError::output(&job.asset.path, &e);
                        events.push(self.fail(job, error, abort));
                    }
                }
            }
            events
        }
        .instrument(span)
        .await
    }

    /// Write the artifact unless it is dropped for not shrinking
    async fn emit(
        &self,
        job: &Job<'_>,
        artifact: CompressedArtifact,
        target: &dyn OutputTarget,
        abort: &AtomicBool,
        events: &mut Vec<JobEvent>,
    ) -> JobOutcome {
        let metrics = artifact.metrics(job.asset.size);
        let record = ArtifactRecord {
            source_path: artifact.source_path.clone(),
            path: artifact.path.clone(),
            config_index: job.prepared.index,
            algorithm: job.prepared.routine.name().to_string(),
            metrics,
        };

        if job.prepared.config.skip_if_larger_or_equal && metrics.is_not_smaller() {
            debug!(
                original = metrics.original_size,
                compressed = metrics.compressed_size,
                "artifact not smaller than its source, skipped"
            );
            events.push(JobEvent::Skipped(record));
            return JobOutcome::Skipped;
        }

        match target.write(&artifact.path, artifact.content).await {
            Ok(()) => {
                debug!(
                    artifact = %record.path,
                    ratio = metrics.compression_ratio,
                    "wrote artifact"
                );
                events.push(JobEvent::Written(record));
                JobOutcome::Written
            }
            Err(e) => {
                let error = PipelineError::output(&record.path, &e);
                events.push(self.fail(job, error, abort));
                JobOutcome::Failed
            }
        }
    }

    fn fail(&self, job: &Job<'_>, error: PipelineError, abort: &AtomicBool) -> JobEvent {
        match self.config.failure_policy {
            FailurePolicy::Abort => abort.store(true, Ordering::SeqCst),
            FailurePolicy::Continue => warn!(error = %error, "job failed, continuing"),
        }
        JobEvent::Failed(JobFailure {
            source_path: job.asset.path.clone(),
            config_index: job.prepared.index,
            error,
        })
    }
}

async fn compress(job: &Job<'_>) -> PipelineResult<CompressedArtifact> {
    let routine = job.prepared.routine.as_ref();
    let content = run(job.asset.content.clone(), routine, job.prepared.options.clone())
        .await
        .map_err(|source| PipelineError::Compression {
            path: job.asset.path.clone(),
            algorithm: routine.name().to_string(),
            source,
        })?;
    Ok(CompressedArtifact {
        path: job.artifact_path.clone(),
        source_path: job.asset.path.clone(),
        content,
    })
}

/// Select and name every (asset, config) pair
fn plan<'a>(
    prepared: &'a [PreparedConfig<'a>],
    assets: &'a [Asset],
) -> PipelineResult<Vec<Job<'a>>> {
    let sources: HashSet<&str> = assets.iter().map(|asset| asset.path.as_str()).collect();
    let mut claimed: HashMap<String, (usize, &str)> = HashMap::new();
    let mut jobs = Vec::new();

    for config in prepared {
        let mut selected = 0usize;
        for asset in assets {
            if !is_eligible(asset, config.config) {
                continue;
            }

            let artifact_path = render(&config.template, &asset.path);
            if sources.contains(artifact_path.as_str()) {
                return Err(PipelineError::naming_collision(
                    artifact_path.as_str(),
                    asset.path.as_str(),
                    format!("existing asset {}", artifact_path),
                ));
            }
            if let Some((index, other)) = claimed.get(&artifact_path) {
                return Err(PipelineError::naming_collision(
                    artifact_path.as_str(),
                    asset.path.as_str(),
                    format!("{} (config {})", other, index),
                ));
            }

            claimed.insert(artifact_path.clone(), (config.index, asset.path.as_str()));
            jobs.push(Job {
                asset,
                prepared: config,
                artifact_path,
            });
            selected += 1;
        }
        debug!(config = config.index, selected, "selected assets");
    }

    Ok(jobs)
}

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

//! Compress a build directory in place

use crate::args::Cli;
use crate::output;
use anyhow::{Context, Result};
use distpress_pipeline::{CompressionPipeline, DirectoryOutput, PipelineReport};
use serde_json::json;
use tracing::info;

/// Run every configured pass over `cli.dir`
pub async fn execute(cli: &Cli) -> Result<()> {
    if !cli.dir.is_dir() {
        anyhow::bail!("{} is not a directory", cli.dir.display());
    }

    let config = cli.plugin_config().await?;
    let pipeline = CompressionPipeline::new(config)?;

    let target = DirectoryOutput::new(&cli.dir);
    let assets = target
        .enumerate()
        .await
        .with_context(|| format!("failed to read {}", cli.dir.display()))?;
    info!(dir = %cli.dir.display(), assets = assets.len(), "compressing build output");

    let report = pipeline.run(&assets, &target).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else if !cli.quiet {
        print_summary(cli, assets.len(), &report);
    }

    if !report.is_success() {
        anyhow::bail!("{} file(s) failed to compress", report.failures.len());
    }
    Ok(())
}

fn report_json(report: &PipelineReport) -> serde_json::Value {
    let failures: Vec<_> = report
        .failures
        .iter()
        .map(|f| {
            json!({
                "sourcePath": f.source_path,
                "configIndex": f.config_index,
                "error": f.error.to_string(),
            })
        })
        .collect();
    json!({
        "written": report.written,
        "skipped": report.skipped,
        "deleted": report.deleted,
        "failures": failures,
        "originalBytes": report.original_bytes(),
        "compressedBytes": report.compressed_bytes(),
    })
}

fn print_summary(cli: &Cli, scanned: usize, report: &PipelineReport) {
    output::header(&format!(
        "Compressed {} in {}",
        cli.dir.display(),
        format_count(scanned, "file")
    ));
    for record in &report.written {
        output::artifact(&record.path, &record.metrics);
    }
    for record in &report.skipped {
        output::warning(&format!(
            "Skipped {}: not smaller than {}",
            record.path, record.source_path
        ));
    }
    for failure in &report.failures {
        output::error(&format!("{}: {:#}", failure.source_path, failure.error));
    }

    println!();
    output::detail("Artifacts", &report.written.len().to_string());
    if !report.skipped.is_empty() {
        output::detail("Skipped", &report.skipped.len().to_string());
    }
    if !report.deleted.is_empty() {
        output::detail("Originals removed", &report.deleted.len().to_string());
    }
    output::detail(
        "Size",
        &format!(
            "{} → {}",
            output::format_bytes(report.original_bytes() as u64),
            output::format_bytes(report.compressed_bytes() as u64)
        ),
    );
    if report.is_success() {
        output::success(&format!(
            "Wrote {}",
            format_count(report.written.len(), "artifact")
        ));
    }
}

fn format_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use distpress_compression::CompressionMetrics;
    use distpress_pipeline::ArtifactRecord;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "file"), "1 file");
        assert_eq!(format_count(3, "file"), "3 files");
    }

    #[test]
    fn test_report_json_shape() {
        let report = PipelineReport {
            written: vec![ArtifactRecord {
                source_path: "app.js".into(),
                path: "app.js.gz".into(),
                config_index: 0,
                algorithm: "gzip".into(),
                metrics: CompressionMetrics::from_sizes(100, 40),
            }],
            deleted: vec!["app.js".into()],
            ..Default::default()
        };
        let value = report_json(&report);
        assert_eq!(value["written"][0]["path"], "app.js.gz");
        assert_eq!(value["written"][0]["sourcePath"], "app.js");
        assert_eq!(value["deleted"][0], "app.js");
        assert_eq!(value["originalBytes"], 100);
        assert_eq!(value["compressedBytes"], 40);
        assert!(value["failures"].as_array().unwrap().is_empty());
    }
}

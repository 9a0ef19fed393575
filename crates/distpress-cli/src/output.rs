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

//! Console output helpers
//!
//! Colored, emoji-prefixed lines shared by the run summary. Errors go to
//! stderr; everything else goes to stdout.

use console::style;
use distpress_compression::CompressionMetrics;

/// Print a success message with a green checkmark
pub fn success(msg: &str) {
    println!("{} {}", style("✅").green().bold(), msg);
}

/// Print an error message to stderr with a red X
pub fn error(msg: &str) {
    eprintln!("{} {}", style("❌").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠️").yellow(), msg);
}

/// Print a key-value detail line, value highlighted
pub fn detail(key: &str, value: &str) {
    println!("  {}: {}", key, style(value).cyan());
}

/// Print a header line
pub fn header(msg: &str) {
    println!("{} {}", style("📦").green().bold(), msg);
}

/// Print one written artifact with its size change
pub fn artifact(path: &str, metrics: &CompressionMetrics) {
    println!(
        "  {} {} → {} {}",
        style(path).cyan(),
        format_bytes(metrics.original_size as u64),
        format_bytes(metrics.compressed_size as u64),
        style(format!("(-{:.1}%)", metrics.space_saved_percent)).dim()
    );
}

/// Human-readable byte count
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

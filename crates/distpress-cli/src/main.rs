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

//! `distpress` binary: compress a build directory in place

mod args;
mod compress;
mod output;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use distpress_observability::{init_tracing_with_config, LogConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle color output
    let use_color = match cli.color.as_str() {
        "never" => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
            false
        }
        "always" => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
            true
        }
        "auto" => console::colors_enabled_stderr(),
        _ => {
            eprintln!("Invalid color option: {}", cli.color);
            std::process::exit(1);
        }
    };

    // Initialize structured logging
    let log_config = LogConfig::for_verbosity(cli.verbose, cli.quiet)
        .with_format(cli.log_format)
        .with_color(use_color);
    init_tracing_with_config(log_config).ok(); // Ignore errors if already initialized

    if let Err(e) = compress::execute(&cli).await {
        output::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

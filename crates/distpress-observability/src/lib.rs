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

//! Structured logging for distpress hosts
//!
//! The library crates log through `tracing` and never install a subscriber.
//! Hosts such as the `distpress` CLI call [`init_tracing_with_config`] once.
//!
//! # Example
//!
//! ```no_run
//! use distpress_observability::{init_tracing_with_config, LogConfig, LogFormat};
//!
//! let config = LogConfig::for_verbosity(1, false).with_format(LogFormat::Json);
//! init_tracing_with_config(config).unwrap();
//! tracing::info!("ready");
//! ```

pub mod config;
pub mod initialization;

pub use config::{LogConfig, LogError, LogFormat, LogOutput};
pub use initialization::{init_tracing, init_tracing_with_config};

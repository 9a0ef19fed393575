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

//! Compression routines for build output
//!
//! This crate resolves a requested algorithm to a routine and runs it:
//! - **Algorithm registry**: `gzip`, `brotliCompress`, `deflate` and `deflateRaw`
//!   built-ins, or any caller-supplied [`CompressionRoutine`]
//! - **Default options**: maximal-compression presets used when a
//!   configuration supplies no options
//! - **Execution adapter**: turns a routine's completion callback into a
//!   single awaitable result normalized to [`bytes::Bytes`]
//!
//! # Quick Start
//!
//! ```rust
//! use distpress_compression::{run, Algorithm, AlgorithmRegistry, BuiltinAlgorithm, Payload};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = AlgorithmRegistry::new();
//!     let algorithm = Algorithm::from(BuiltinAlgorithm::Gzip);
//!
//!     let routine = registry.resolve(&algorithm)?;
//!     let options = registry.options_for(&algorithm, None)?;
//!
//!     let original = b"Hello, World!".repeat(10);
//!     let compressed = run(Payload::from(original.clone()), routine.as_ref(), options).await?;
//!
//!     assert_eq!(BuiltinAlgorithm::Gzip.decompress(&compressed)?, original);
//!     Ok(())
//! }
//! ```
//!
//! # Custom routines
//!
//! A routine only has to call its completion exactly once:
//!
//! ```rust
//! use distpress_compression::{Algorithm, RoutineOutput};
//!
//! let identity = Algorithm::from_fn("identity", |payload, _options, done| {
//!     done(Ok(RoutineOutput::from(payload.as_bytes().unwrap_or_default().to_vec())))
//! });
//! assert!(identity.is_custom());
//! ```

pub mod adapter;
pub mod algorithm;
pub mod brotli_routine;
pub mod error;
pub mod metrics;
pub mod options;
pub mod payload;
pub mod zlib_routine;

pub use adapter::run;
pub use algorithm::{
    resolve, Algorithm, AlgorithmRegistry, BuiltinAlgorithm, Completion, CompressionRoutine,
    FnRoutine,
};
pub use brotli_routine::BrotliRoutine;
pub use error::{CompressionError, CompressionResult, RoutineError, RoutineErrorKind};
pub use metrics::CompressionMetrics;
pub use options::{CompressionOptions, DefaultOptions, BROTLI_MAX_QUALITY, Z_BEST_COMPRESSION};
pub use payload::{Payload, RoutineOutput};
pub use zlib_routine::{ZlibFormat, ZlibRoutine};

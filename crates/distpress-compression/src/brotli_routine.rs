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

//! Brotli routine
//!
//! Reads `params.quality` (0..=11) and `params.lgwin` (10..=24) from the options.

use crate::adapter::offload;
use crate::algorithm::{Completion, CompressionRoutine};
use crate::error::{CompressionError, CompressionResult, RoutineError};
use crate::options::{int_option, CompressionOptions, BROTLI_MAX_QUALITY};
use crate::payload::{Payload, RoutineOutput};
use std::fmt;
use std::io::{Read, Write};

const BROTLI_DEFAULT_WINDOW: i64 = 22;
const BROTLI_MIN_WINDOW: i64 = 10;
const BROTLI_MAX_WINDOW: i64 = 24;
const BUFFER_SIZE: usize = 4096;

/// Built-in brotli routine
#[derive(Clone, Default)]
pub struct BrotliRoutine;

impl BrotliRoutine {
    /// Create the routine
    pub fn new() -> Self {
        BrotliRoutine
    }
}

impl fmt::Debug for BrotliRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrotliRoutine").finish()
    }
}

impl CompressionRoutine for BrotliRoutine {
    fn name(&self) -> &str {
        "brotliCompress"
    }

    fn compress(&self, payload: Payload, options: CompressionOptions, done: Completion) {
        let data = match payload.into_bytes("chunk") {
            Ok(data) => data,
            Err(e) => return done(Err(e)),
        };
        let params = int_option(
            options.get_nested("params", "quality"),
            "options.params.quality",
            0,
            BROTLI_MAX_QUALITY,
            BROTLI_MAX_QUALITY,
        )
        .and_then(|quality| {
            int_option(
                options.get_nested("params", "lgwin"),
                "options.params.lgwin",
                BROTLI_MIN_WINDOW,
                BROTLI_MAX_WINDOW,
                BROTLI_DEFAULT_WINDOW,
            )
            .map(|lgwin| (quality, lgwin))
        });
        let (quality, lgwin) = match params {
            Ok(params) => params,
            Err(e) => return done(Err(e)),
        };

        offload(done, move || {
            encode(&data, quality as u32, lgwin as u32)
                .map(RoutineOutput::from)
                .map_err(|e| RoutineError::failed(format!("brotli compression failed: {}", e)))
        });
    }
}

fn encode(data: &[u8], quality: u32, lgwin: u32) -> std::io::Result<Vec<u8>> {
    let mut writer = brotli::CompressorWriter::new(
        Vec::with_capacity(data.len() / 2 + 64),
        BUFFER_SIZE,
        quality,
        lgwin,
    );
    writer.write_all(data)?;
    writer.flush()?;
    Ok(writer.into_inner())
}

/// Decompress a stream produced by [`BrotliRoutine`]
pub fn decode(data: &[u8]) -> CompressionResult<Vec<u8>> {
    let mut decompressed = Vec::with_capacity(data.len() * 2);
    brotli::Decompressor::new(data, BUFFER_SIZE)
        .read_to_end(&mut decompressed)
        .map_err(|e| {
            CompressionError::decompression_failed(format!("brotli decompression failed: {}", e))
        })?;
    Ok(decompressed)
}

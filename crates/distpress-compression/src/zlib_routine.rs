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

//! Deflate-family routines: gzip, zlib-wrapped deflate and raw deflate
//!
//! Reads `level` from the options (-1 for the library default, 0..=9 otherwise).

use crate::adapter::offload;
use crate::algorithm::{Completion, CompressionRoutine};
use crate::error::{CompressionError, CompressionResult, RoutineError};
use crate::options::{int_option, CompressionOptions};
use crate::payload::{Payload, RoutineOutput};
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::fmt;
use std::io::{Read, Write};

/// Level used when the options ask for the library default
const Z_DEFAULT_LEVEL: u32 = 6;

/// Container wrapped around the deflate stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZlibFormat {
    /// gzip header and CRC trailer
    Gzip,
    /// zlib header and Adler-32 trailer
    Zlib,
    /// No container
    Raw,
}

/// Built-in routine for the deflate family
#[derive(Clone)]
pub struct ZlibRoutine {
    format: ZlibFormat,
}

impl ZlibRoutine {
    /// Create a routine producing the given container format
    pub fn new(format: ZlibFormat) -> Self {
        ZlibRoutine { format }
    }

    /// Container format produced by this routine
    pub fn format(&self) -> ZlibFormat {
        self.format
    }
}

impl fmt::Debug for ZlibRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZlibRoutine")
            .field("format", &self.format)
            .finish()
    }
}

impl CompressionRoutine for ZlibRoutine {
    fn name(&self) -> &str {
        match self.format {
            ZlibFormat::Gzip => "gzip",
            ZlibFormat::Zlib => "deflate",
            ZlibFormat::Raw => "deflateRaw",
        }
    }

    fn compress(&self, payload: Payload, options: CompressionOptions, done: Completion) {
        let data = match payload.into_bytes("chunk") {
            Ok(data) => data,
            Err(e) => return done(Err(e)),
        };
        let level = match int_option(options.get("level"), "options.level", -1, 9, -1) {
            Ok(level) => level,
            Err(e) => return done(Err(e)),
        };
        // -1 maps to the default, the rest is range-checked above
        let level = u32::try_from(level).unwrap_or(Z_DEFAULT_LEVEL);
        let format = self.format;

        offload(done, move || {
            encode(format, &data, Compression::new(level))
                .map(RoutineOutput::from)
                .map_err(|e| {
                    RoutineError::failed(format!("{:?} compression failed: {}", format, e))
                })
        });
    }
}

/// Compress `data` into the given container
fn encode(format: ZlibFormat, data: &[u8], level: Compression) -> std::io::Result<Vec<u8>> {
    let capacity = data.len() / 2 + 64;
    match format {
        ZlibFormat::Gzip => {
            let mut encoder = GzEncoder::new(Vec::with_capacity(capacity), level);
            encoder.write_all(data)?;
            encoder.finish()
        }
        ZlibFormat::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::with_capacity(capacity), level);
            encoder.write_all(data)?;
            encoder.finish()
        }
        ZlibFormat::Raw => {
            let mut encoder = DeflateEncoder::new(Vec::with_capacity(capacity), level);
            encoder.write_all(data)?;
            encoder.finish()
        }
    }
}

/// Decompress a stream produced by [`ZlibRoutine`]
pub fn decode(format: ZlibFormat, data: &[u8]) -> CompressionResult<Vec<u8>> {
    let mut decompressed = Vec::with_capacity(data.len() * 2);
    let result = match format {
        ZlibFormat::Gzip => GzDecoder::new(data).read_to_end(&mut decompressed),
        ZlibFormat::Zlib => ZlibDecoder::new(data).read_to_end(&mut decompressed),
        ZlibFormat::Raw => DeflateDecoder::new(data).read_to_end(&mut decompressed),
    };
    result.map_err(|e| {
        CompressionError::decompression_failed(format!("{:?} decompression failed: {}", format, e))
    })?;
    Ok(decompressed)
}

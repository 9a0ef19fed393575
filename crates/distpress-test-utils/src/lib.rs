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

//! # distpress Test Utilities
//!
//! Shared test utilities for distpress crates providing:
//! - The sample three-file build used across pipeline and CLI tests
//! - Temporary output directories with listing helpers
//! - CLI command helpers for testing the `distpress` binary
//! - Assertions over output directories and compressed artifacts

pub mod assertions;
pub mod cli;
pub mod dist;
pub mod fixtures;

pub use assertions::*;
pub use cli::distpress;
pub use dist::TestDist;
pub use fixtures::TestFixtures;

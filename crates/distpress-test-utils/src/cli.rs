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

//! CLI command helpers.

use assert_cmd::Command;

/// Get a Command for the `distpress` binary.
///
/// # Example
/// ```ignore
/// use distpress_test_utils::{distpress, TestDist};
///
/// let dist = TestDist::with_sample_build();
/// distpress().arg(dist.path()).assert().success();
/// ```
#[allow(deprecated)] // cargo_bin is deprecated but still works for our use case
pub fn distpress() -> Command {
    Command::cargo_bin("distpress").expect("distpress binary not found")
}

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

//! Asset selection: include/exclude patterns and the size threshold

use crate::asset::Asset;
use distpress_config::AssetConfig;

/// Whether `config` selects `asset`
///
/// The asset must match an include pattern (an empty include list matches
/// everything), match no exclude pattern, and be at least `threshold` bytes.
pub fn is_eligible(asset: &Asset, config: &AssetConfig) -> bool {
    if asset.size < config.threshold {
        return false;
    }
    if config.exclude.matches_any(&asset.path) {
        return false;
    }
    config.include.is_empty() || config.include.matches_any(&asset.path)
}

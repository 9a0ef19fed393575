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

//! Test fixture management.
//!
//! The sample build mirrors what a bundler emits for a tiny app: one HTML
//! page, one script and one stylesheet. The page and script are over 100
//! bytes, the stylesheet is under, so a threshold of 100 selects two files.

/// Test fixture management utilities.
pub struct TestFixtures;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>distpress sample</title>
    <link rel="stylesheet" href="/app.css" />
  </head>
  <body>
    <div id="app"></div>
    <script type="module" src="/app.js"></script>
  </body>
</html>
"#;

const APP_JS: &str = r#"const app = document.getElementById('app');
const items = ['alpha', 'beta', 'gamma', 'delta', 'epsilon'];
for (const item of items) {
  const el = document.createElement('p');
  el.textContent = `item: ${item}`;
  app.appendChild(el);
}
console.log('rendered', items.length, 'items');
"#;

const APP_CSS: &str = "body{margin:0}\n#app{color:#333}\n";

impl TestFixtures {
    /// Size threshold that splits the sample build into two large files and one small one.
    pub const SAMPLE_THRESHOLD: u64 = 100;

    /// The sample build as `(relative path, content)` pairs.
    pub fn sample_build() -> Vec<(&'static str, Vec<u8>)> {
        vec![
            ("index.html", INDEX_HTML.as_bytes().to_vec()),
            ("app.js", APP_JS.as_bytes().to_vec()),
            ("app.css", APP_CSS.as_bytes().to_vec()),
        ]
    }

    /// Content of one sample build file.
    pub fn sample_file(name: &str) -> Option<Vec<u8>> {
        Self::sample_build()
            .into_iter()
            .find(|(path, _)| *path == name)
            .map(|(_, content)| content)
    }

    /// Create a highly compressible file of the target size.
    pub fn repetitive_file(target_size: usize) -> Vec<u8> {
        let pattern = b"distpress repetitive test pattern\n";
        let repeats = (target_size / pattern.len()) + 1;
        pattern.repeat(repeats).into_iter().take(target_size).collect()
    }

    /// Bytes that deflate cannot shrink: a xorshift stream.
    pub fn incompressible_file(size: usize) -> Vec<u8> {
        let mut state: u32 = 0x9E37_79B9;
        (0..size)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect()
    }
}

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

//! Host output boundary
//!
//! The pipeline never touches the filesystem itself: artifacts are written and
//! originals removed through an [`OutputTarget`]. [`DirectoryOutput`] works on a
//! build directory on disk; [`MemoryOutput`] keeps everything in memory for
//! tests and hosts that post-process output before it is written.

use crate::asset::{normalize_path, Asset};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;
use walkdir::WalkDir;

/// Where artifacts go and originals are removed from
///
/// Paths are relative to the output root and `/`-separated.
#[async_trait]
pub trait OutputTarget: Send + Sync + Debug {
    /// Store `data` at `path`, replacing anything already there
    async fn write(&self, path: &str, data: Bytes) -> anyhow::Result<()>;

    /// Remove the file at `path`; removing a missing file succeeds
    async fn remove(&self, path: &str) -> anyhow::Result<()>;
}

/// Build directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryOutput {
    root: PathBuf,
}

impl DirectoryOutput {
    /// Target rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryOutput { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> anyhow::Result<PathBuf> {
        if path.is_empty() {
            return Err(anyhow::anyhow!("path cannot be empty"));
        }
        if path.split('/').any(|segment| segment == "..") {
            return Err(anyhow::anyhow!("path {} leaves the output directory", path));
        }
        Ok(self.root.join(path))
    }

    /// Every file under the root as an [`Asset`], sorted by path
    pub async fn enumerate(&self) -> anyhow::Result<Vec<Asset>> {
        let root = self.root.clone();
        let mut assets = tokio::task::spawn_blocking(move || read_tree(&root)).await??;
        assets.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(root = %self.root.display(), assets = assets.len(), "enumerated build output");
        Ok(assets)
    }
}

fn read_tree(root: &Path) -> anyhow::Result<Vec<Asset>> {
    let mut assets = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root)?;
        let content = std::fs::read(entry.path())?;
        assets.push(Asset::new(
            normalize_path(&relative.to_string_lossy()),
            content,
        ));
    }
    Ok(assets)
}

fn write_atomic(dir: &Path, target: &Path, data: &[u8]) -> anyhow::Result<()> {
    // Created exclusively, so an existing file can never be mistaken for ours;
    // dropped on error, which removes only this temp file
    let mut temp = tempfile::Builder::new()
        .prefix(".distpress-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(target)?;
    Ok(())
}

#[async_trait]
impl OutputTarget for DirectoryOutput {
    /// Writes to a uniquely named temporary sibling and renames it into place,
    /// so a partially written artifact is never visible and no neighbouring
    /// file is ever touched.
    async fn write(&self, path: &str, data: Bytes) -> anyhow::Result<()> {
        let target = self.resolve(path)?;
        let parent = match target.parent() {
            Some(parent) => parent.to_path_buf(),
            None => self.root.clone(),
        };
        fs::create_dir_all(&parent).await?;

        let bytes = data.len();
        tokio::task::spawn_blocking(move || write_atomic(&parent, &target, &data)).await??;
        debug!(path, bytes, "wrote artifact");
        Ok(())
    }

    async fn remove(&self, path: &str) -> anyhow::Result<()> {
        let target = self.resolve(path)?;
        match fs::remove_file(&target).await {
            Ok(()) => {
                debug!(path, "removed original");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory output
///
/// Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    files: Arc<RwLock<BTreeMap<String, Bytes>>>,
}

impl MemoryOutput {
    /// Empty output
    pub fn new() -> Self {
        Self::default()
    }

    /// Output pre-filled with the binary content of `assets`
    pub async fn with_assets(assets: &[Asset]) -> Self {
        let output = Self::new();
        for asset in assets {
            let content = asset.content.as_bytes().unwrap_or_default();
            output.insert(&asset.path, Bytes::copy_from_slice(content)).await;
        }
        output
    }

    /// Store a file directly
    pub async fn insert(&self, path: &str, data: Bytes) {
        self.files.write().await.insert(path.to_string(), data);
    }

    /// Content at `path`
    pub async fn get(&self, path: &str) -> Option<Bytes> {
        self.files.read().await.get(path).cloned()
    }

    /// Whether `path` exists
    pub async fn contains(&self, path: &str) -> bool {
        self.files.read().await.contains_key(path)
    }

    /// Every stored path, sorted
    pub async fn paths(&self) -> Vec<String> {
        self.files.read().await.keys().cloned().collect()
    }
}

#[async_trait]
impl OutputTarget for MemoryOutput {
    async fn write(&self, path: &str, data: Bytes) -> anyhow::Result<()> {
        if path.is_empty() {
            return Err(anyhow::anyhow!("path cannot be empty"));
        }
        self.insert(path, data).await;
        Ok(())
    }

    async fn remove(&self, path: &str) -> anyhow::Result<()> {
        self.files.write().await.remove(path);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_directory_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let output = DirectoryOutput::new(dir.path());

        output
            .write("fake/app.js.gz", Bytes::from_static(b"data"))
            .await
            .unwrap();

        let written = dir.path().join("fake").join("app.js.gz");
        assert_eq!(std::fs::read(&written).unwrap(), b"data");
        let leftovers = std::fs::read_dir(dir.path().join("fake")).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[tokio::test]
    async fn test_directory_write_leaves_neighbours_alone() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("app.js.gz.tmp"), b"keep me").unwrap();
        let output = DirectoryOutput::new(dir.path());

        output
            .write("app.js.gz", Bytes::from_static(b"data"))
            .await
            .unwrap();

        assert_eq!(std::fs::read(dir.path().join("app.js.gz")).unwrap(), b"data");
        assert_eq!(
            std::fs::read(dir.path().join("app.js.gz.tmp")).unwrap(),
            b"keep me"
        );
    }

    #[tokio::test]
    async fn test_directory_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.js"), b"x").unwrap();
        let output = DirectoryOutput::new(dir.path());

        output.remove("a.js").await.unwrap();
        output.remove("a.js").await.unwrap();
        assert!(!dir.path().join("a.js").exists());
    }

    #[tokio::test]
    async fn test_directory_rejects_escaping_paths() {
        let dir = TempDir::new().unwrap();
        let output = DirectoryOutput::new(dir.path());
        assert!(output.write("../evil", Bytes::new()).await.is_err());
        assert!(output.write("", Bytes::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_enumerate_is_recursive_and_relative() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("index.html"), b"<html>").unwrap();
        std::fs::write(dir.path().join("assets").join("app.js"), b"js").unwrap();

        let assets = DirectoryOutput::new(dir.path()).enumerate().await.unwrap();
        let paths: Vec<_> = assets.iter().map(|a| a.path.as_str()).collect();
        assert_eq!(paths, vec!["assets/app.js", "index.html"]);
        assert_eq!(assets[1].size, 6);
    }

    #[tokio::test]
    async fn test_memory_output_shares_store() {
        let output = MemoryOutput::with_assets(&[Asset::new("a.js", "x")]).await;
        let clone = output.clone();

        clone.write("a.js.gz", Bytes::from_static(b"gz")).await.unwrap();
        clone.remove("a.js").await.unwrap();

        assert_eq!(output.paths().await, vec!["a.js.gz"]);
        assert_eq!(output.get("a.js.gz").await.unwrap(), Bytes::from_static(b"gz"));
        assert!(!output.contains("a.js").await);
    }
}

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

//! Deferred deletion of originals
//!
//! An original may only be removed after every config that selected it has
//! finished with it. Each asset carries a count of outstanding jobs; the job
//! that brings the count to zero learns whether the original should go.

use std::collections::HashMap;
use tokio::sync::Mutex;

/// How a job ended, as far as deletion is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The artifact was written
    Written,
    /// The artifact was dropped because it did not shrink
    Skipped,
    /// Compression or the write failed
    Failed,
}

#[derive(Debug, Default)]
struct Entry {
    pending: usize,
    delete_requested: bool,
    vetoed: bool,
}

/// Reference counts keyed by asset path
#[derive(Debug, Default)]
pub struct DeletionBarrier {
    entries: Mutex<HashMap<String, Entry>>,
}

impl DeletionBarrier {
    /// Empty barrier
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more job reading `path`; `delete` marks the original for removal
    pub async fn register(&self, path: &str, delete: bool) {
        let mut entries = self.entries.lock().await;
        let entry = entries.entry(path.to_string()).or_default();
        entry.pending += 1;
        entry.delete_requested |= delete;
    }

    /// Record a finished job
    ///
    /// Returns true exactly once per asset: for the last job, when deletion
    /// was requested and every job wrote its artifact.
    pub async fn complete(&self, path: &str, outcome: JobOutcome) -> bool {
        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.get_mut(path) else {
            return false;
        };
        if outcome != JobOutcome::Written {
            entry.vetoed = true;
        }
        entry.pending = entry.pending.saturating_sub(1);
        if entry.pending > 0 {
            return false;
        }
        let delete = entry.delete_requested && !entry.vetoed;
        entries.remove(path);
        delete
    }

    /// Number of assets with jobs still outstanding
    pub async fn outstanding(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deletes_after_last_job() {
        let barrier = DeletionBarrier::new();
        barrier.register("app.js", true).await;
        barrier.register("app.js", false).await;

        assert!(!barrier.complete("app.js", JobOutcome::Written).await);
        assert!(barrier.complete("app.js", JobOutcome::Written).await);
        assert_eq!(barrier.outstanding().await, 0);
    }

    #[tokio::test]
    async fn test_no_delete_unless_requested() {
        let barrier = DeletionBarrier::new();
        barrier.register("app.js", false).await;
        assert!(!barrier.complete("app.js", JobOutcome::Written).await);
    }

    #[tokio::test]
    async fn test_failure_or_skip_vetoes_deletion() {
        let barrier = DeletionBarrier::new();
        barrier.register("a", true).await;
        barrier.register("a", true).await;
        assert!(!barrier.complete("a", JobOutcome::Failed).await);
        assert!(!barrier.complete("a", JobOutcome::Written).await);

        barrier.register("b", true).await;
        assert!(!barrier.complete("b", JobOutcome::Skipped).await);
    }

    #[tokio::test]
    async fn test_unfinished_jobs_hold_the_original() {
        let barrier = DeletionBarrier::new();
        barrier.register("a", true).await;
        barrier.register("a", true).await;
        assert!(!barrier.complete("a", JobOutcome::Written).await);
        assert_eq!(barrier.outstanding().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_path_is_ignored() {
        assert!(!DeletionBarrier::new().complete("nope", JobOutcome::Written).await);
    }
}

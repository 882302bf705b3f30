//! In-process submission store with an optional JSON snapshot file.
//!
//! Without a snapshot path the store lives and dies with the process. With a
//! path, the collection is loaded once at [`MemorySubmissionStore::open`] and
//! rewritten after every change. A snapshot that exists but cannot be read or
//! parsed makes [`MemorySubmissionStore::open`] fail and is left untouched on
//! disk. Writes go to a sibling temp file that is renamed over the snapshot,
//! so a crash mid-write never truncates it. A failed write is logged and the
//! in-memory collection stays authoritative.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use jualputus_core::submission::Submission;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::repository::SubmissionRepo;

/// Submission store backed by a `Vec` behind a lock.
#[derive(Debug, Default)]
pub struct MemorySubmissionStore {
    submissions: RwLock<Vec<Submission>>,
    snapshot: Option<PathBuf>,
}

impl MemorySubmissionStore {
    /// Empty store without a snapshot file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store mirrored to `path`, seeded from it if the file exists.
    ///
    /// Fails when the file exists but is not a readable JSON array of
    /// submissions; the file is not modified in that case.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let submissions = load_snapshot(&path).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Refusing to open unreadable submission snapshot");
            e
        })?;
        tracing::info!(path = %path.display(), count = submissions.len(), "Loaded submission snapshot");

        Ok(Self {
            submissions: RwLock::new(submissions),
            snapshot: Some(path),
        })
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.submissions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.submissions.read().await.is_empty()
    }

    async fn persist(&self, submissions: &[Submission]) {
        let Some(path) = &self.snapshot else {
            return;
        };
        if let Err(e) = write_snapshot(path, submissions).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to write submission snapshot");
        }
    }
}

async fn load_snapshot(path: &Path) -> Result<Vec<Submission>, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(serde_json::from_str(&text)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

async fn write_snapshot(path: &Path, submissions: &[Submission]) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(submissions)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp = temp_path(path);
    tokio::fs::write(&tmp, json).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

/// `<dir>/<name>.tmp`, next to the snapshot so the rename stays on one
/// filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl SubmissionRepo for MemorySubmissionStore {
    async fn save(&self, submission: &Submission) -> Result<(), StoreError> {
        let mut list = self.submissions.write().await;
        match list.iter_mut().find(|s| s.id == submission.id) {
            Some(existing) => *existing = submission.clone(),
            None => list.push(submission.clone()),
        }
        self.persist(&list).await;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Submission>, StoreError> {
        let list = self.submissions.read().await;
        Ok(list.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_ticket(&self, ticket_number: &str) -> Result<Option<Submission>, StoreError> {
        let list = self.submissions.read().await;
        Ok(list
            .iter()
            .filter(|s| s.ticket_number == ticket_number)
            .max_by_key(|s| s.created_at)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StoreError> {
        let mut all = self.submissions.read().await.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Option<Submission>, StoreError> {
        let mut list = self.submissions.write().await;
        let Some(existing) = list.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        existing.status = status.to_string();
        existing.updated_at = chrono::Utc::now();
        let updated = existing.clone();
        self.persist(&list).await;
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut list = self.submissions.write().await;
        let before = list.len();
        list.retain(|s| s.id != id);
        let removed = list.len() < before;
        if removed {
            self.persist(&list).await;
        }
        Ok(removed)
    }

    async fn replace_all(&self, submissions: Vec<Submission>) -> Result<(), StoreError> {
        let mut list = self.submissions.write().await;
        *list = submissions;
        self.persist(&list).await;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

//! The submission repository interface.
//!
//! Handlers receive an `Arc<dyn SubmissionRepo>` from application state, so
//! the backing store is chosen once at startup.

use std::collections::HashSet;

use async_trait::async_trait;
use jualputus_core::submission::{validate_status, Submission};

use crate::error::StoreError;

/// Persistence for submission records.
#[async_trait]
pub trait SubmissionRepo: Send + Sync {
    /// Insert a record, replacing any existing record with the same id.
    async fn save(&self, submission: &Submission) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Submission>, StoreError>;

    /// Find by ticket number. Tickets are not guaranteed unique; the newest
    /// matching record wins.
    async fn find_by_ticket(&self, ticket_number: &str) -> Result<Option<Submission>, StoreError>;

    /// All records, newest first.
    async fn list_all(&self) -> Result<Vec<Submission>, StoreError>;

    /// Set the status and bump `updated_at`. Returns `None` if the id is unknown.
    async fn update_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Option<Submission>, StoreError>;

    /// Remove a record. Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Replace the whole collection.
    async fn replace_all(&self, submissions: Vec<Submission>) -> Result<(), StoreError>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Serialize every record as a pretty-printed JSON array.
pub async fn export_json(repo: &dyn SubmissionRepo) -> Result<String, StoreError> {
    let all = repo.list_all().await?;
    Ok(serde_json::to_string_pretty(&all)?)
}

/// Replace the collection with the records in a JSON array.
///
/// Returns the number of imported records. Anything other than an array, or
/// an array holding a record [`check_import`] rejects, leaves the store
/// untouched.
pub async fn import_json(repo: &dyn SubmissionRepo, json: &str) -> Result<usize, StoreError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(StoreError::Import("expected a JSON array of submissions".into()));
    }
    let submissions: Vec<Submission> = serde_json::from_value(value)?;
    check_import(&submissions)?;
    let count = submissions.len();
    repo.replace_all(submissions).await?;
    Ok(count)
}

/// Every record needs a non-empty id and ticket number and a known status,
/// and ids must be unique within the batch.
fn check_import(submissions: &[Submission]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(submissions.len());
    for (index, submission) in submissions.iter().enumerate() {
        if submission.id.trim().is_empty() {
            return Err(StoreError::Import(format!("record {index} has an empty id")));
        }
        if submission.ticket_number.trim().is_empty() {
            return Err(StoreError::Import(format!(
                "record '{}' has an empty ticket number",
                submission.id
            )));
        }
        validate_status(&submission.status)
            .map_err(|e| StoreError::Import(format!("record '{}': {e}", submission.id)))?;
        if !seen.insert(submission.id.as_str()) {
            return Err(StoreError::Import(format!("duplicate id '{}'", submission.id)));
        }
    }
    Ok(())
}

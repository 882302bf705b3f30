/// Error type for submission store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A query against the Postgres store failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Reading or writing the JSON snapshot file failed.
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// An import payload was valid JSON but not a list of valid submissions.
    #[error("Import rejected: {0}")]
    Import(String),
}

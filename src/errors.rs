#[derive(Debug, thiserror::Error)]
pub enum ConsentError {
    /// The persistence layer could not be read or written (disabled storage,
    /// quota, I/O failure). Treated as "no decision", never surfaced.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The persisted preference blob exists but could not be parsed. Treated
    /// identically to [`ConsentError::StorageUnavailable`].
    #[error("Stored preferences could not be parsed: {0}")]
    ParseFailure(String),
}

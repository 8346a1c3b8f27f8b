/// Errors that can occur within the storage layer.
///
/// # Examples
///
/// ```rust
/// use caseflow_storage::error::StorageError;
///
/// let err = StorageError::InvalidValue {
///     column: "workflow_status",
///     value: "bogus".to_string(),
/// };
/// assert!(err.to_string().contains("workflow_status"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An underlying database error.
    #[error("storage: database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON serialization or deserialization failure (metadata columns).
    #[error("storage: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored column held a value outside its expected domain.
    #[error("storage: invalid value in column '{column}': {value}")]
    InvalidValue {
        column: &'static str,
        value: String,
    },
}

/// Convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

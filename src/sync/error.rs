//! Sync error types.

use crate::models::MissingField;

/// Errors that can occur while writing or reading a snapshot.
#[derive(Debug)]
pub enum SyncError {
    /// The write payload is not a valid snapshot
    InvalidPayload(serde_json::Error),
    /// A record lacks a field its row needs
    MissingField(MissingField),
    /// Sheet store failure
    Storage(sqlx::Error),
}

impl SyncError {
    /// Whether the caller, rather than the store, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SyncError::InvalidPayload(_) | SyncError::MissingField(_))
    }
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::InvalidPayload(e) => write!(f, "Invalid sync payload: {}", e),
            SyncError::MissingField(e) => write!(f, "Invalid record: {}", e),
            SyncError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::InvalidPayload(e) => Some(e),
            SyncError::MissingField(e) => Some(e),
            SyncError::Storage(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for SyncError {
    fn from(e: sqlx::Error) -> Self {
        SyncError::Storage(e)
    }
}

impl From<MissingField> for SyncError {
    fn from(e: MissingField) -> Self {
        SyncError::MissingField(e)
    }
}

//! JSON envelopes returned by the write and read operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{iso_timestamp, SyncError};

pub const SYNC_MESSAGE: &str = "Data synced successfully";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSuccess {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

impl SyncSuccess {
    pub fn new(synced_at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            message: SYNC_MESSAGE.to_string(),
            timestamp: iso_timestamp(synced_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncFailure {
    pub success: bool,
    pub error: String,
}

impl SyncFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

impl From<&SyncError> for SyncFailure {
    fn from(e: &SyncError) -> Self {
        Self::new(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let json = serde_json::to_value(SyncSuccess::new(at)).unwrap();
        assert_eq!(
            json,
            json!({
                "success": true,
                "message": "Data synced successfully",
                "timestamp": "2025-03-01T10:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_failure_from_error() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let failure = SyncFailure::from(&SyncError::InvalidPayload(err));
        assert!(!failure.success);
        assert!(failure.error.starts_with("Invalid sync payload"));
    }
}

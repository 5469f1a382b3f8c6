use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{AdminCredential, Batch, Course, Payment, Student, StudentCredential};

/// A record read back from a sheet, keyed by header text.
pub type Record = Map<String, Value>;

/// Absent and `null` collections both read as empty.
fn nullable<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Full client state submitted by a write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, deserialize_with = "nullable")]
    pub students: Vec<Student>,
    #[serde(default, deserialize_with = "nullable")]
    pub payments: Vec<Payment>,
    #[serde(default, deserialize_with = "nullable")]
    pub courses: Vec<Course>,
    #[serde(default, deserialize_with = "nullable")]
    pub batches: Vec<Batch>,
    #[serde(default, deserialize_with = "nullable")]
    pub admin_credentials: Vec<AdminCredential>,
    #[serde(default, deserialize_with = "nullable")]
    pub student_credentials: Vec<StudentCredential>,
}

/// Stored state returned by a read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotView {
    pub students: Vec<Record>,
    pub payments: Vec<Record>,
    pub courses: Vec<Record>,
    pub batches: Vec<Record>,
    pub admin_credentials: Vec<Record>,
    pub student_credentials: Vec<Record>,
    pub last_sync: String,
}

//! Login records kept in plain text on the two management sheets.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Annotation, MissingField, SheetRecord};
use crate::sheet::cell::{self, Cell};
use crate::sheet::SheetName;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

impl AdminCredential {
    /// The account seeded whenever a sync carries no admin credentials.
    pub fn default_admin(now: DateTime<Utc>) -> Self {
        Self {
            id: Some("admin".into()),
            password: Some("admin123".into()),
            name: Some("System Administrator".into()),
            email: Some("admin@feemanager.com".into()),
            role: Some("Super Admin".into()),
            last_login: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true).into()),
            status: Some("Active".into()),
        }
    }
}

impl SheetRecord for AdminCredential {
    const SHEET: SheetName = SheetName::AdminManage;

    fn to_cells(&self) -> Result<Vec<Cell>, MissingField> {
        Ok(vec![
            cell::raw(self.id.as_ref()),
            cell::raw(self.password.as_ref()),
            cell::or_default(self.name.as_ref(), "Admin"),
            cell::or_default(self.email.as_ref(), ""),
            cell::or_default(self.role.as_ref(), "Admin"),
            cell::or_default(self.last_login.as_ref(), ""),
            cell::or_default(self.status.as_ref(), "Active"),
        ])
    }

    fn annotation() -> Option<Annotation> {
        Some(Annotation {
            text: "⚠️ IMPORTANT: Keep this sheet secure. These are login credentials for admin panel.",
            background: "#FEF3C7",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// The student's phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

impl SheetRecord for StudentCredential {
    const SHEET: SheetName = SheetName::StudentManage;

    fn to_cells(&self) -> Result<Vec<Cell>, MissingField> {
        Ok(vec![
            cell::raw(self.id.as_ref()),
            cell::raw(self.password.as_ref()),
            cell::raw(self.name.as_ref()),
            cell::or_default(self.email.as_ref(), ""),
            cell::or_default(self.course.as_ref(), ""),
            cell::or_default(self.batch.as_ref(), ""),
            cell::or_default(self.status.as_ref(), "Active"),
        ])
    }

    fn annotation() -> Option<Annotation> {
        Some(Annotation {
            text: "ℹ️ Students use their Student ID and Phone Number to login",
            background: "#DBEAFE",
        })
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use super::{MissingField, SheetRecord};
use crate::sheet::cell::{self, Cell};
use crate::sheet::SheetName;

/// Fee standing of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Partial,
    Unpaid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "Paid"),
            PaymentStatus::Partial => write!(f, "Partial"),
            PaymentStatus::Unpaid => write!(f, "Unpaid"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fee: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub pending: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enroll_date: Option<Value>,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent field
/// becomes `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Student {
    /// Derives the fee standing from `pending` and `totalFee` as sent.
    ///
    /// An explicit `null` reads as zero and counts as paid. Without a
    /// `pending` field, or with an unreadable one, neither comparison holds
    /// and the student is unpaid.
    pub fn status(&self) -> PaymentStatus {
        let pending = self.pending.as_ref().and_then(cell::to_number);
        let total_fee = self.total_fee.as_ref().and_then(cell::to_number);

        match pending {
            Some(p) if p <= 0.0 => PaymentStatus::Paid,
            Some(p) if total_fee.is_some_and(|t| p < t) => PaymentStatus::Partial,
            _ => PaymentStatus::Unpaid,
        }
    }
}

impl SheetRecord for Student {
    const SHEET: SheetName = SheetName::Students;

    fn to_cells(&self) -> Result<Vec<Cell>, MissingField> {
        Ok(vec![
            cell::raw(self.id.as_ref()),
            cell::raw(self.name.as_ref()),
            cell::or_default(self.email.as_ref(), ""),
            cell::raw(self.phone.as_ref()),
            cell::or_default(self.course.as_ref(), ""),
            cell::or_default(self.batch.as_ref(), ""),
            cell::or_default(self.total_fee.as_ref(), 0),
            cell::or_default(self.paid_amount.as_ref(), 0),
            cell::or_default(self.pending.as_ref(), 0),
            cell::or_default(self.enroll_date.as_ref(), ""),
            Cell::from(self.status().to_string()),
        ])
    }

    fn centered_column() -> Option<usize> {
        Some(Self::SHEET.headers().len())
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MissingField, SheetRecord};
use crate::sheet::cell::{self, Cell};
use crate::sheet::SheetName;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Value>,
}

impl Payment {
    /// "RCP" followed by the last six characters of the id's text.
    pub fn receipt_no(&self) -> Option<String> {
        let id = match self.id.as_ref()? {
            Value::Bool(b) => b.to_string(),
            other => cell::text(other),
        };
        let chars: Vec<char> = id.chars().collect();
        let tail: String = chars[chars.len().saturating_sub(6)..].iter().collect();
        Some(format!("RCP{}", tail))
    }
}

impl SheetRecord for Payment {
    const SHEET: SheetName = SheetName::Payments;

    fn to_cells(&self) -> Result<Vec<Cell>, MissingField> {
        let receipt_no = self.receipt_no().ok_or(MissingField {
            sheet: Self::SHEET,
            field: "id",
        })?;

        Ok(vec![
            cell::raw(self.id.as_ref()),
            cell::raw(self.date.as_ref()),
            cell::raw(self.student_id.as_ref()),
            cell::or_default(self.student_name.as_ref(), ""),
            cell::raw(self.amount.as_ref()),
            cell::raw(self.method.as_ref()),
            Cell::from(receipt_no),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payment(value: Value) -> Payment {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_receipt_from_numeric_id() {
        let p = payment(json!({"id": 123456789}));
        assert_eq!(p.receipt_no().as_deref(), Some("RCP456789"));
    }

    #[test]
    fn test_receipt_from_short_string_id() {
        let p = payment(json!({"id": "P12"}));
        assert_eq!(p.receipt_no().as_deref(), Some("RCPP12"));
    }

    #[test]
    fn test_receipt_from_boolean_id() {
        let p = payment(json!({"id": true}));
        assert_eq!(p.receipt_no().as_deref(), Some("RCPtrue"));
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let p = payment(json!({"amount": 500}));
        let err = p.to_cells().unwrap_err();
        assert_eq!(err.field, "id");
        assert!(err.to_string().contains("Payments"));
    }

    #[test]
    fn test_to_cells() {
        let p = payment(json!({
            "id": 1736000000123u64,
            "date": "2025-01-04",
            "studentId": "S1",
            "amount": 2500,
            "method": "UPI"
        }));
        let cells = p.to_cells().unwrap();
        assert_eq!(cells[3], json!(""));
        assert_eq!(cells[4], json!(2500));
        assert_eq!(cells[6], json!("RCP000123"));
    }
}

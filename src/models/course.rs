use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MissingField, SheetRecord};
use crate::sheet::cell::{self, Cell};
use crate::sheet::SheetName;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    /// Length in months.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_fee: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl Course {
    /// Course fee plus registration fee, each zero when absent.
    pub fn total_fee(&self) -> f64 {
        cell::number_or_zero(self.fee.as_ref()) + cell::number_or_zero(self.reg_fee.as_ref())
    }
}

impl SheetRecord for Course {
    const SHEET: SheetName = SheetName::Courses;

    fn to_cells(&self) -> Result<Vec<Cell>, MissingField> {
        Ok(vec![
            cell::raw(self.id.as_ref()),
            cell::raw(self.name.as_ref()),
            cell::raw(self.duration.as_ref()),
            cell::raw(self.fee.as_ref()),
            cell::or_default(self.reg_fee.as_ref(), 0),
            cell::number(self.total_fee()),
            cell::or_default(self.description.as_ref(), ""),
        ])
    }
}

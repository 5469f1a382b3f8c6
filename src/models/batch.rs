use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MissingField, SheetRecord};
use crate::sheet::cell::{self, Cell};
use crate::sheet::SheetName;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students_count: Option<Value>,
}

impl SheetRecord for Batch {
    const SHEET: SheetName = SheetName::Batches;

    fn to_cells(&self) -> Result<Vec<Cell>, MissingField> {
        Ok(vec![
            cell::raw(self.id.as_ref()),
            cell::raw(self.name.as_ref()),
            cell::raw(self.course_id.as_ref()),
            cell::raw(self.start_date.as_ref()),
            cell::or_default(self.timing.as_ref(), ""),
            cell::or_default(self.students_count.as_ref(), 0),
        ])
    }
}

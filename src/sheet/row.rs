use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::cell::{self, Cell};

/// Role a row plays within its sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Header,
    Data,
    Annotation,
    Title,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::Header => write!(f, "header"),
            RowKind::Data => write!(f, "data"),
            RowKind::Annotation => write!(f, "annotation"),
            RowKind::Title => write!(f, "title"),
        }
    }
}

impl FromStr for RowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "header" => Ok(RowKind::Header),
            "data" => Ok(RowKind::Data),
            "annotation" => Ok(RowKind::Annotation),
            "title" => Ok(RowKind::Title),
            _ => Err(format!(
                "Invalid row kind '{}'. Valid options: header, data, annotation, title",
                s
            )),
        }
    }
}

/// Presentation attributes of a single row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    pub bold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    pub centered: bool,
    /// Number of columns the first cell is merged across.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_columns: Option<usize>,
}

impl RowStyle {
    /// White bold text on `background`, as used for header rows.
    pub fn header(background: &str) -> Self {
        Self {
            background: Some(background.to_string()),
            font_color: Some("#FFFFFF".to_string()),
            bold: true,
            ..Self::default()
        }
    }

    /// Bold notice merged across `columns`.
    pub fn notice(background: &str, columns: usize) -> Self {
        Self {
            background: Some(background.to_string()),
            bold: true,
            merge_columns: Some(columns),
            ..Self::default()
        }
    }
}

/// A stored row at an absolute 1-based position.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    pub kind: RowKind,
    pub cells: Vec<Cell>,
    pub style: RowStyle,
}

impl Row {
    pub fn new(index: usize, kind: RowKind, cells: Vec<Cell>) -> Self {
        Self {
            index,
            kind,
            cells,
            style: RowStyle::default(),
        }
    }

    /// Header row at position 1.
    pub fn header(headers: &[&str], background: &str) -> Self {
        Self::new(
            1,
            RowKind::Header,
            headers.iter().map(|h| Cell::from(*h)).collect(),
        )
        .with_style(RowStyle::header(background))
    }

    pub fn with_style(mut self, style: RowStyle) -> Self {
        self.style = style;
        self
    }

    /// Columns the row occupies, counting a merge span.
    pub fn width(&self) -> usize {
        self.style
            .merge_columns
            .unwrap_or(0)
            .max(self.cells.len())
    }

    /// Text of the cell at 0-based `column`, empty when out of range.
    pub fn text_at(&self, column: usize) -> String {
        self.cells.get(column).map(cell::text).unwrap_or_default()
    }
}

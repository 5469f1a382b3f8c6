//! Derived dashboard: aggregate fee statistics recomputed on every sync.
//!
//! Figures come from the submitted snapshot, never from the stored sheets.
//! Money is shown in rupees with Indian digit grouping.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::models::Snapshot;
use crate::sheet::cell::{self, Cell};
use crate::sheet::{Row, RowKind, RowStyle, SheetName};

pub const DASHBOARD_TITLE: &str = "📊 FEE MANAGEMENT SYSTEM DASHBOARD";
pub const LAST_SYNCED_PREFIX: &str = "Last Synced: ";

const TITLE_COLUMNS: usize = 4;
const TITLE_BACKGROUND: &str = "#4F46E5";
const SYNCED_BACKGROUND: &str = "#E0E7FF";
const STATS_HEADER_ROW: usize = 4;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_courses: usize,
    pub total_batches: usize,
    pub total_fee: f64,
    pub total_paid: f64,
    pub total_transactions: usize,
}

impl DashboardStats {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let total_fee = snapshot
            .students
            .iter()
            .map(|s| cell::number_or_zero(s.total_fee.as_ref()))
            .sum();
        let total_paid = snapshot
            .students
            .iter()
            .map(|s| cell::number_or_zero(s.paid_amount.as_ref()))
            .sum();

        Self {
            total_students: snapshot.students.len(),
            total_courses: snapshot.courses.len(),
            total_batches: snapshot.batches.len(),
            total_fee,
            total_paid,
            total_transactions: snapshot.payments.len(),
        }
    }

    /// Expected minus collected, not the sum of per-student pending.
    pub fn total_pending(&self) -> f64 {
        self.total_fee - self.total_paid
    }

    pub fn collection_rate(&self) -> String {
        if self.total_fee > 0.0 {
            format!("{:.2}%", self.total_paid / self.total_fee * 100.0)
        } else {
            "0%".to_string()
        }
    }

    /// Metric rows in display order.
    pub fn metrics(&self) -> Vec<(&'static str, Cell)> {
        vec![
            ("Total Students", Cell::from(self.total_students)),
            ("Total Courses", Cell::from(self.total_courses)),
            ("Total Batches", Cell::from(self.total_batches)),
            ("Total Fee Expected", Cell::from(rupees(self.total_fee))),
            ("Total Collected", Cell::from(rupees(self.total_paid))),
            ("Total Pending", Cell::from(rupees(self.total_pending()))),
            ("Total Transactions", Cell::from(self.total_transactions)),
            ("Collection Rate", Cell::from(self.collection_rate())),
        ]
    }

    /// Lays the dashboard out as sheet rows.
    pub fn rows<Tz: TimeZone>(&self, synced_at: &DateTime<Tz>) -> Vec<Row>
    where
        Tz::Offset: fmt::Display,
    {
        let title = Row::new(1, RowKind::Title, vec![Cell::from(DASHBOARD_TITLE)]).with_style(
            RowStyle {
                font_color: Some("#FFFFFF".to_string()),
                font_size: Some(16),
                centered: true,
                ..RowStyle::notice(TITLE_BACKGROUND, TITLE_COLUMNS)
            },
        );

        let synced = Row::new(
            2,
            RowKind::Title,
            vec![Cell::from(format!(
                "{}{}",
                LAST_SYNCED_PREFIX,
                en_in_datetime(synced_at)
            ))],
        )
        .with_style(RowStyle {
            background: Some(SYNCED_BACKGROUND.to_string()),
            centered: true,
            merge_columns: Some(TITLE_COLUMNS),
            ..RowStyle::default()
        });

        let header = Row::new(
            STATS_HEADER_ROW,
            RowKind::Header,
            SheetName::Dashboard
                .headers()
                .iter()
                .map(|h| Cell::from(*h))
                .collect(),
        )
        .with_style(RowStyle::header(SheetName::Dashboard.header_color()));

        let mut rows = vec![title, synced, header];
        for (offset, (metric, value)) in self.metrics().into_iter().enumerate() {
            rows.push(Row::new(
                STATS_HEADER_ROW + 1 + offset,
                RowKind::Data,
                vec![Cell::from(metric), value],
            ));
        }
        rows
    }
}

/// One metric as read back from the stored dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub metric: String,
    pub value: Value,
}

/// Stored dashboard contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub last_synced: Option<String>,
    pub metrics: Vec<Metric>,
}

impl DashboardView {
    pub fn from_rows(rows: &[Row]) -> Self {
        let last_synced = rows
            .iter()
            .filter(|r| r.kind == RowKind::Title)
            .find_map(|r| {
                r.text_at(0)
                    .strip_prefix(LAST_SYNCED_PREFIX)
                    .map(str::to_string)
            });

        let metrics = rows
            .iter()
            .filter(|r| r.kind == RowKind::Data)
            .map(|r| Metric {
                metric: r.text_at(0),
                value: r.cells.get(1).cloned().unwrap_or_else(cell::blank),
            })
            .collect();

        Self {
            last_synced,
            metrics,
        }
    }
}

/// Amount in rupees, e.g. `₹1,00,000`.
pub fn rupees(amount: f64) -> String {
    format!("₹{}", en_in_number(amount))
}

/// Formats a number the way the en-IN locale does.
///
/// The last three integer digits form one group and the rest go in pairs
/// (`12,34,567`). At most three fraction digits are kept, trailing zeros
/// dropped.
pub fn en_in_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let scaled = (n.abs() * 1000.0).round() as u128;
    let whole = scaled / 1000;
    let fraction = scaled % 1000;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    if digits.len() > 3 {
        let (head, tail) = digits.split_at(digits.len() - 3);
        for (i, c) in head.chars().enumerate() {
            if i > 0 && (head.len() - i) % 2 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped.push(',');
        grouped.push_str(tail);
    } else {
        grouped.push_str(&digits);
    }

    if fraction > 0 {
        let fraction = format!("{:03}", fraction);
        grouped.push('.');
        grouped.push_str(fraction.trim_end_matches('0'));
    }

    if n < 0.0 && scaled > 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Date and time in en-IN style, e.g. `01/03/2025, 3:04:05 pm`.
pub fn en_in_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format("%d/%m/%Y, %-I:%M:%S %P").to_string()
}

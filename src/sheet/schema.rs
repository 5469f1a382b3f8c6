use std::fmt;

/// Named sheets held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetName {
    Students,
    Payments,
    Courses,
    Batches,
    AdminManage,
    StudentManage,
    Dashboard,
}

impl SheetName {
    /// Every sheet, in spreadsheet tab order.
    pub const ALL: [SheetName; 7] = [
        SheetName::Students,
        SheetName::Payments,
        SheetName::Courses,
        SheetName::Batches,
        SheetName::AdminManage,
        SheetName::StudentManage,
        SheetName::Dashboard,
    ];

    /// Sheets that hold client-supplied records (everything but the dashboard).
    pub const SOURCES: [SheetName; 6] = [
        SheetName::Students,
        SheetName::Payments,
        SheetName::Courses,
        SheetName::Batches,
        SheetName::AdminManage,
        SheetName::StudentManage,
    ];

    /// Stored sheet title.
    pub fn title(&self) -> &'static str {
        match self {
            SheetName::Students => "Students",
            SheetName::Payments => "Payments",
            SheetName::Courses => "Courses",
            SheetName::Batches => "Batches",
            SheetName::AdminManage => "Admin Manage",
            SheetName::StudentManage => "Student Manage",
            SheetName::Dashboard => "Dashboard",
        }
    }

    /// Tab position, used to keep sheet listings stable.
    pub fn position(&self) -> i64 {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .map(|p| p as i64)
            .unwrap_or_default()
    }

    /// Fixed header row. The dashboard has no record header.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            SheetName::Students => &[
                "Student ID",
                "Name",
                "Email",
                "Phone",
                "Course",
                "Batch",
                "Total Fee",
                "Paid Amount",
                "Pending",
                "Enroll Date",
                "Status",
            ],
            SheetName::Payments => &[
                "Payment ID",
                "Date",
                "Student ID",
                "Student Name",
                "Amount",
                "Payment Method",
                "Receipt No",
            ],
            SheetName::Courses => &[
                "Course ID",
                "Course Name",
                "Duration (months)",
                "Course Fee",
                "Registration Fee",
                "Total Fee",
                "Description",
            ],
            SheetName::Batches => &[
                "Batch ID",
                "Batch Name",
                "Course ID",
                "Start Date",
                "Timing",
                "Students Count",
            ],
            SheetName::AdminManage => &[
                "Admin ID",
                "Password",
                "Name",
                "Email",
                "Role",
                "Last Login",
                "Status",
            ],
            SheetName::StudentManage => &[
                "Student ID",
                "Password (Phone)",
                "Name",
                "Email",
                "Course",
                "Batch",
                "Status",
            ],
            SheetName::Dashboard => &["Metric", "Value"],
        }
    }

    /// Background colour of the header row.
    pub fn header_color(&self) -> &'static str {
        match self {
            SheetName::Students => "#4F46E5",
            SheetName::Payments => "#10B981",
            SheetName::Courses => "#F59E0B",
            SheetName::Batches => "#8B5CF6",
            SheetName::AdminManage => "#DC2626",
            SheetName::StudentManage => "#06B6D4",
            SheetName::Dashboard => "#10B981",
        }
    }

    /// Snapshot key the sheet's records travel under.
    pub fn snapshot_key(&self) -> &'static str {
        match self {
            SheetName::Students => "students",
            SheetName::Payments => "payments",
            SheetName::Courses => "courses",
            SheetName::Batches => "batches",
            SheetName::AdminManage => "adminCredentials",
            SheetName::StudentManage => "studentCredentials",
            SheetName::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for SheetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_exclude_dashboard() {
        assert_eq!(SheetName::SOURCES.len(), 6);
        assert!(!SheetName::SOURCES.contains(&SheetName::Dashboard));
    }

    #[test]
    fn test_positions_follow_tab_order() {
        assert_eq!(SheetName::Students.position(), 0);
        assert_eq!(SheetName::Dashboard.position(), 6);
    }

    #[test]
    fn test_header_counts() {
        assert_eq!(SheetName::Students.headers().len(), 11);
        assert_eq!(SheetName::Payments.headers().len(), 7);
        assert_eq!(SheetName::Batches.headers().len(), 6);
        assert_eq!(SheetName::StudentManage.headers()[1], "Password (Phone)");
    }
}

use chrono::{DateTime, FixedOffset, NaiveDate};

pub const UNASSIGNED: &str = "Unassigned";
pub const UNKNOWN: &str = "Unknown";
pub const DEFAULT_PRIORITY: &str = "Normal";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issue {
    pub id: u64,
    pub subject: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub tracker: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub created_on: Option<DateTime<FixedOffset>>,
}

impl Issue {
    pub fn new(id: u64, subject: &str) -> Self {
        Self {
            id,
            subject: subject.to_string(),
            ..Self::default()
        }
    }

    pub fn status_name(&self) -> &str {
        non_empty(self.status.as_deref()).unwrap_or(UNKNOWN)
    }

    pub fn priority_name(&self) -> &str {
        non_empty(self.priority.as_deref()).unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn tracker_name(&self) -> &str {
        non_empty(self.tracker.as_deref()).unwrap_or(UNKNOWN)
    }

    pub fn assignee_name(&self) -> &str {
        non_empty(self.assignee.as_deref()).unwrap_or(UNASSIGNED)
    }

    /// Creation timestamp truncated to the calendar date it was recorded on.
    pub fn created_date(&self) -> Option<NaiveDate> {
        self.created_on.map(|created| created.date_naive())
    }

    /// An issue without a due date is never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due < today)
    }
}

/// Priorities above `Normal` in the default tracker scheme.
pub fn is_high_priority_name(name: &str) -> bool {
    let priority = name.trim().to_ascii_lowercase();
    matches!(priority.as_str(), "high" | "urgent" | "immediate")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

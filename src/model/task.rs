use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow category of a task. Drives the bar color and the category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskCategory {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Review")]
    Review,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskCategory {
    /// All categories in display order.
    pub fn all() -> &'static [TaskCategory] {
        &[
            TaskCategory::ToDo,
            TaskCategory::InProgress,
            TaskCategory::Review,
            TaskCategory::Completed,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::ToDo => "To Do",
            TaskCategory::InProgress => "In Progress",
            TaskCategory::Review => "Review",
            TaskCategory::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single task occupying an inclusive range of calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub category: TaskCategory,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task. An inverted range is swapped so `start <= end` holds.
    pub fn new(
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        category: TaskCategory,
    ) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start,
            end,
            category,
            created_at: Utc::now(),
        }
    }

    /// True when the two inclusive date ranges share at least one day.
    pub fn overlaps(&self, other: &Task) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Number of calendar days covered, counting both ends.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

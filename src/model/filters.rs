use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::task::{Task, TaskCategory};

/// How far ahead of today a task may start and still be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    OneWeek,
    TwoWeeks,
    ThreeWeeks,
}

impl TimeRange {
    pub fn all() -> &'static [TimeRange] {
        &[TimeRange::OneWeek, TimeRange::TwoWeeks, TimeRange::ThreeWeeks]
    }

    pub fn weeks(&self) -> i64 {
        match self {
            TimeRange::OneWeek => 1,
            TimeRange::TwoWeeks => 2,
            TimeRange::ThreeWeeks => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::OneWeek => "Tasks within 1 week",
            TimeRange::TwoWeeks => "Tasks within 2 weeks",
            TimeRange::ThreeWeeks => "Tasks within 3 weeks",
        }
    }

    /// Latest start date that still passes the filter.
    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::days(self.weeks() * 7)
    }
}

/// Independent task filters, combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    /// Empty means every category passes.
    pub categories: Vec<TaskCategory>,
    pub time_range: Option<TimeRange>,
    /// Case-insensitive substring of the task name.
    pub search_query: String,
}

impl Filters {
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&task.category) {
            return false;
        }
        if let Some(range) = self.time_range {
            if task.start > range.cutoff(today) {
                return false;
            }
        }
        if !self.search_query.is_empty() {
            return task
                .name
                .to_lowercase()
                .contains(&self.search_query.to_lowercase());
        }
        true
    }

    pub fn is_active(&self) -> bool {
        !self.categories.is_empty() || self.time_range.is_some() || !self.search_query.is_empty()
    }

    pub fn toggle_category(&mut self, category: TaskCategory) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    /// Selecting the active range again clears it.
    pub fn toggle_time_range(&mut self, range: TimeRange) {
        self.time_range = if self.time_range == Some(range) {
            None
        } else {
            Some(range)
        };
    }

    /// Merge a partial update; unset fields keep their current value.
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(time_range) = patch.time_range {
            self.time_range = time_range;
        }
        if let Some(query) = patch.search_query {
            self.search_query = query;
        }
    }
}

/// Partial filter update. `time_range: Some(None)` clears the range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub categories: Option<Vec<TaskCategory>>,
    pub time_range: Option<Option<TimeRange>>,
    pub search_query: Option<String>,
}

impl FilterPatch {
    pub fn is_empty(&self) -> bool {
        self.categories.is_none() && self.time_range.is_none() && self.search_query.is_none()
    }
}

/// Tasks passing `filters`, in their original order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filters: &Filters, today: NaiveDate) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filters.matches(t, today)).collect()
}

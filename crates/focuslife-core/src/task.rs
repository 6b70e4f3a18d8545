//! Task domain types.
//!
//! Tasks are an independent resource with no shared logic with the habit
//! analytics: plain records plus a simple filter predicate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new pending task with a fresh id.
    ///
    /// # Errors
    /// Returns a validation error if the title is blank.
    pub fn new(
        title: impl Into<String>,
        priority: TaskPriority,
        due_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::invalid_value(
                "title",
                "task title must not be blank",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            status: TaskStatus::Pending,
            priority,
            due_date,
            created_at: Utc::now(),
        })
    }
}

/// Filter predicate for task listings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_before: Option<NaiveDate>,
    pub due_after: Option<NaiveDate>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(before) = self.due_before {
            match task.due_date {
                Some(due) if due <= before => {}
                _ => return false,
            }
        }
        if let Some(after) = self.due_after {
            match task.due_date {
                Some(due) if due >= after => {}
                _ => return false,
            }
        }
        true
    }
}

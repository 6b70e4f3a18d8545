//! Shared argument parsing helpers.

use chrono::{Local, NaiveDate};
use focuslife_core::{TaskPriority, TaskStatus, TransactionKind};

/// Today as a local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a YYYY-MM-DD argument.
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{input}', expected YYYY-MM-DD"))
}

pub fn parse_status(input: &str) -> Result<TaskStatus, String> {
    match input {
        "pending" => Ok(TaskStatus::Pending),
        "in_progress" => Ok(TaskStatus::InProgress),
        "done" => Ok(TaskStatus::Done),
        other => Err(format!(
            "invalid status '{other}', expected pending, in_progress, or done"
        )),
    }
}

pub fn parse_priority(input: &str) -> Result<TaskPriority, String> {
    match input {
        "low" => Ok(TaskPriority::Low),
        "medium" => Ok(TaskPriority::Medium),
        "high" => Ok(TaskPriority::High),
        other => Err(format!(
            "invalid priority '{other}', expected low, medium, or high"
        )),
    }
}

pub fn parse_kind(input: &str) -> Result<TransactionKind, String> {
    match input {
        "income" => Ok(TransactionKind::Income),
        "expense" => Ok(TransactionKind::Expense),
        other => Err(format!(
            "invalid kind '{other}', expected income or expense"
        )),
    }
}

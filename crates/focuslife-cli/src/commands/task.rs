//! Task management commands for CLI.

use clap::Subcommand;
use focuslife_core::{Database, Task, TaskFilter, TaskStatus};

use crate::common::{parse_date, parse_priority, parse_status};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Priority: low, medium, or high
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// List tasks
    List {
        /// Filter by status (pending, in_progress, done)
        #[arg(long)]
        status: Option<String>,
        /// Filter by priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,
        /// Only tasks due on or before this date
        #[arg(long)]
        due_before: Option<String>,
        /// Only tasks due on or after this date
        #[arg(long)]
        due_after: Option<String>,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New status
        #[arg(long)]
        status: Option<String>,
        /// New priority
        #[arg(long)]
        priority: Option<String>,
        /// New due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// Mark a task done
    Complete {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TaskAction::Add {
            title,
            priority,
            due,
        } => {
            let due_date = due.as_deref().map(parse_date).transpose()?;
            let task = Task::new(title, parse_priority(&priority)?, due_date)?;
            db.create_task(&task)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List {
            status,
            priority,
            due_before,
            due_after,
        } => {
            let filter = TaskFilter {
                status: status.as_deref().map(parse_status).transpose()?,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                due_before: due_before.as_deref().map(parse_date).transpose()?,
                due_after: due_after.as_deref().map(parse_date).transpose()?,
            };
            let tasks = db.list_tasks(&filter)?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Update {
            id,
            title,
            status,
            priority,
            due,
        } => {
            let mut task = db.get_task(&id)?.ok_or(format!("Task not found: {id}"))?;

            if let Some(t) = title {
                task.title = t;
            }
            if let Some(s) = status {
                task.status = parse_status(&s)?;
            }
            if let Some(p) = priority {
                task.priority = parse_priority(&p)?;
            }
            if let Some(d) = due {
                task.due_date = Some(parse_date(&d)?);
            }

            db.update_task(&task)?;
            println!("Task updated:");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Complete { id } => {
            let mut task = db.get_task(&id)?.ok_or(format!("Task not found: {id}"))?;
            task.status = TaskStatus::Done;
            db.update_task(&task)?;
            println!("Task completed: {id}");
        }
        TaskAction::Delete { id } => {
            db.delete_task(&id)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}

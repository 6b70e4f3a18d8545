//! Dashboard command: the full derived report as JSON.

use focuslife_core::analytics::build_dashboard;
use focuslife_core::Database;

use crate::common::today;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    // One immutable snapshot feeds the whole computation
    let habits = db.list_habits(true)?;
    let entries = db.all_entries()?;
    let report = build_dashboard(&habits, &entries, today());

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

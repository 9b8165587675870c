//! The `civprep done` command.

use std::path::Path;

use anyhow::Result;

use crate::commands::load_ledger;
use crate::config::load_config_from;

pub fn execute(day: u32, task: usize, undo: bool, config_path: Option<&Path>) -> Result<()> {
    anyhow::ensure!(task >= 1, "task numbers start at 1");

    let config = load_config_from(config_path)?;
    let mut ledger = load_ledger(&config.ledger)?;

    ledger.set_task_done(day, task - 1, !undo)?;
    ledger.save_json(&config.ledger)?;

    let plan_day = ledger.plan.iter().find(|d| d.day == day);
    if let Some(t) = plan_day.and_then(|d| d.tasks.get(task - 1)) {
        println!(
            "Day {day} task {task} ({} {}) marked {}.",
            t.kind,
            t.topic.name,
            if undo { "not done" } else { "done" }
        );
    }
    if let Some(d) = plan_day.filter(|d| d.is_complete() && !undo) {
        println!("Day {} complete!", d.day);
    }

    Ok(())
}

//! The `civprep progress` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use civprep_core::parser::load_content;
use civprep_core::statistics::{plan_progress, recommend_focus, topic_stats};
use civprep_core::traits::ContentRepository;

use crate::commands::load_ledger;
use crate::config::load_config_from;

pub fn execute(limit: usize, config_path: Option<&Path>) -> Result<()> {
    let config = load_config_from(config_path)?;
    let ledger = load_ledger(&config.ledger)?;
    let bank = load_content(&config.content)?;

    let progress = plan_progress(&ledger.plan);
    println!(
        "Goal: {} | {}% done ({}/{} tasks, {}/{} minutes) | {} of {} day(s) complete",
        ledger.configuration.goal,
        progress.completion_percent(),
        progress.done_tasks,
        progress.total_tasks,
        progress.done_minutes,
        progress.scheduled_minutes,
        progress.days_complete,
        ledger.plan.len(),
    );

    if !progress.per_kind.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Kind", "Done", "Scheduled"]);
        for (kind, (done, total)) in &progress.per_kind {
            table.add_row(vec![Cell::new(kind), Cell::new(done), Cell::new(total)]);
        }
        println!("{table}");
    }

    let stats = topic_stats(&ledger.history);
    if stats.is_empty() {
        println!("No mock tests recorded yet.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            "Topic",
            "Attempts",
            "Best",
            "Latest",
            "Avg accuracy",
            "Latest level",
        ]);
        for s in &stats {
            let name = bank
                .topic(&s.topic)
                .map(|t| t.name.as_str())
                .unwrap_or(s.topic.as_str());
            table.add_row(vec![
                Cell::new(name),
                Cell::new(s.attempts),
                Cell::new(format!("{:.2}", s.best_score)),
                Cell::new(format!("{:.2}", s.latest_score)),
                Cell::new(format!("{:.0}%", s.avg_accuracy)),
                Cell::new(s.latest_level),
            ]);
        }
        println!("{table}");
    }

    let recs = recommend_focus(bank.topics(), &ledger.history, limit);
    if !recs.is_empty() {
        println!("Focus next:");
        for (i, rec) in recs.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, rec.topic.name, rec.reason);
        }
    }

    Ok(())
}

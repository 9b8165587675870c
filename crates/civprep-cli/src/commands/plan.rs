//! The `civprep plan` command.

use std::path::Path;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use comfy_table::{Cell, Table};

use civprep_core::ledger::StudyLedger;
use civprep_core::model::{PlanDay, StudyConfiguration};
use civprep_core::parser::load_content;
use civprep_core::planner::PlanGenerator;
use civprep_core::traits::ContentRepository;

use crate::config::load_config_from;

pub struct PlanArgs {
    pub goal: String,
    pub start: Option<NaiveDate>,
    pub days: Option<i32>,
    pub hours: Option<f64>,
    pub format: String,
    pub dry_run: bool,
}

pub fn execute(args: PlanArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config_from(config_path)?;
    let bank = load_content(&config.content)?;

    let study = StudyConfiguration {
        goal: args.goal,
        start_date: args.start.unwrap_or_else(|| Local::now().date_naive()),
        duration_days: args.days.unwrap_or(config.default_duration_days),
        hours_per_day: args.hours.unwrap_or(config.default_hours_per_day),
    };

    let generator = PlanGenerator::new(config.durations);
    let plan = generator.generate(&study, bank.topics())?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&plan)?),
        _ => print_plan(&study, &plan),
    }

    if args.dry_run {
        return Ok(());
    }

    let mut ledger = StudyLedger::new(study, plan);
    if config.ledger.exists() {
        // A new plan replaces the old one but keeps the test history.
        match StudyLedger::load_json(&config.ledger) {
            Ok(previous) => {
                if !previous.history.is_empty() {
                    eprintln!(
                        "Keeping {} mock-test result(s) from the previous ledger.",
                        previous.history.len()
                    );
                }
                ledger.history = previous.history;
            }
            Err(e) => tracing::warn!("replacing unreadable ledger: {e:#}"),
        }
    }
    ledger.save_json(&config.ledger)?;
    eprintln!("Ledger saved to: {}", config.ledger.display());

    Ok(())
}

fn print_plan(study: &StudyConfiguration, plan: &[PlanDay]) {
    let mut table = Table::new();
    table.set_header(vec!["Day", "Date", "Tasks", "Minutes"]);

    for day in plan {
        let tasks = if day.tasks.is_empty() {
            "(no task fits the daily budget)".to_string()
        } else {
            day.tasks
                .iter()
                .enumerate()
                .map(|(i, t)| format!("{}. {} {} ({}m)", i + 1, t.kind, t.topic.name, t.duration_mins))
                .collect::<Vec<_>>()
                .join("\n")
        };
        table.add_row(vec![
            Cell::new(day.day),
            Cell::new(day.date.format("%Y-%m-%d")),
            Cell::new(tasks),
            Cell::new(day.total_minutes()),
        ]);
    }

    println!(
        "Plan: {} — {} day(s) from {}, {:.1} h/day",
        study.goal,
        plan.len(),
        study.start_date.format("%Y-%m-%d"),
        study.hours_per_day
    );
    println!("{table}");
}

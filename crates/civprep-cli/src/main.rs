//! civprep CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "civprep", version, about = "UPSC study planner and mock-test scorer")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and content bank
    Init,

    /// Validate content bank TOML files
    Validate {
        /// Path to a content bank file or directory (default: from config)
        #[arg(long)]
        content: Option<PathBuf>,
    },

    /// Generate a study plan and start a new ledger
    Plan {
        /// Goal label, e.g. "Prelims 2025"
        #[arg(long)]
        goal: String,

        /// First day of the plan (YYYY-MM-DD, default: today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Number of days to plan
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i32>,

        /// Study hours per day
        #[arg(long)]
        hours: Option<f64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Print the plan without saving the ledger
        #[arg(long)]
        dry_run: bool,
    },

    /// Score a mock test and record it in the ledger
    Score {
        /// Topic identifier whose questions form the test
        #[arg(long)]
        topic: String,

        /// Answers as "0=2,1=0,..." or a path to a JSON answer map
        #[arg(long)]
        answers: String,

        /// Penalise wrong answers by a third of a mark
        #[arg(long, conflicts_with = "no_negative_marking")]
        negative_marking: bool,

        /// Do not penalise wrong answers
        #[arg(long)]
        no_negative_marking: bool,

        /// Minutes spent on the test
        #[arg(long, default_value = "0")]
        time_taken: u32,

        /// Date the test was taken (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Show the explanation for each question
        #[arg(long)]
        explain: bool,
    },

    /// Mark a plan task as done
    Done {
        /// Plan day number (1-based)
        #[arg(long)]
        day: u32,

        /// Task number within the day (1-based)
        #[arg(long)]
        task: usize,

        /// Clear the done flag instead
        #[arg(long)]
        undo: bool,
    },

    /// Show plan completion, topic statistics, and recommendations
    Progress {
        /// Number of topics to recommend
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Write an HTML progress report
    Report {
        /// Output file
        #[arg(long, default_value = "civprep-report.html")]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("civprep=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { content } => commands::validate::execute(content, config_path),
        Commands::Plan {
            goal,
            start,
            days,
            hours,
            format,
            dry_run,
        } => commands::plan::execute(
            commands::plan::PlanArgs {
                goal,
                start,
                days,
                hours,
                format,
                dry_run,
            },
            config_path,
        ),
        Commands::Score {
            topic,
            answers,
            negative_marking,
            no_negative_marking,
            time_taken,
            date,
            explain,
        } => {
            let negative_marking = if negative_marking {
                Some(true)
            } else if no_negative_marking {
                Some(false)
            } else {
                None
            };
            commands::score::execute(
                commands::score::ScoreArgs {
                    topic,
                    answers,
                    negative_marking,
                    time_taken,
                    date,
                    explain,
                },
                config_path,
            )
        }
        Commands::Done { day, task, undo } => commands::done::execute(day, task, undo, config_path),
        Commands::Progress { limit } => commands::progress::execute(limit, config_path),
        Commands::Report { output } => commands::report::execute(output, config_path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

//! civprep-core — study planning, mock-test scoring, and progress analytics.
//!
//! The planner and score calculator are pure functions over plain data.
//! Curricula and question banks are loaded from TOML and handed to them as
//! slices; results are kept in a [`ledger::StudyLedger`].

pub mod error;
pub mod ledger;
pub mod model;
pub mod parser;
pub mod planner;
pub mod scoring;
pub mod statistics;
pub mod traits;

pub use error::{LedgerError, PlanError, ScoreError};
pub use planner::{generate_plan, PlanGenerator};
pub use scoring::{calculate_accuracy, calculate_mock_score, get_performance_level};

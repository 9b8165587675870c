//! Typed errors for the study core.
//!
//! Plan generation and ledger mutation fail synchronously with these types;
//! file and parse boundaries wrap them in `anyhow` with context.

use thiserror::Error;

/// Errors raised while generating a study plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The study configuration cannot produce a plan.
    #[error("invalid study configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors raised by the score calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Accuracy was requested for a test with zero questions.
    #[error("accuracy is undefined for zero questions")]
    DivisionUndefined,
}

/// Errors raised when mutating a stored study ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No plan day carries this sequence number.
    #[error("plan has no day {0}")]
    DayNotFound(u32),

    /// The day exists but has no task at this slot.
    #[error("day {day} has no task {slot} ({available} task(s) scheduled)")]
    TaskNotFound {
        day: u32,
        slot: usize,
        available: usize,
    },
}

impl PlanError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        PlanError::InvalidConfiguration(message.into())
    }
}

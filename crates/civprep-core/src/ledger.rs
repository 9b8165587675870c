//! The learner's study ledger: configuration, generated plan, and mock-test
//! history, with JSON persistence.
//!
//! All mutation goes through methods on [`StudyLedger`]. Task completion
//! flags are the only part of the plan that changes after generation, and
//! the history only grows.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LedgerError;
use crate::model::{MockTestResult, PlanDay, StudyConfiguration};

/// Persistent state for one learner's preparation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyLedger {
    /// Unique ledger identifier.
    pub id: Uuid,
    /// When the plan was generated.
    pub created_at: DateTime<Utc>,
    /// The configuration the plan was generated from.
    pub configuration: StudyConfiguration,
    /// Generated plan days.
    pub plan: Vec<PlanDay>,
    /// Scored mock tests, oldest first.
    #[serde(default)]
    pub history: Vec<MockTestResult>,
}

impl StudyLedger {
    /// Start a ledger for a freshly generated plan.
    pub fn new(configuration: StudyConfiguration, plan: Vec<PlanDay>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            configuration,
            plan,
            history: Vec::new(),
        }
    }

    /// Save the ledger as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize ledger")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write ledger to {}", path.display()))?;
        Ok(())
    }

    /// Load a ledger from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ledger from {}", path.display()))?;
        let ledger: StudyLedger =
            serde_json::from_str(&content).context("failed to parse ledger JSON")?;
        Ok(ledger)
    }

    /// Set the completion flag of task `slot` (0-based) on plan day `day`.
    pub fn set_task_done(&mut self, day: u32, slot: usize, done: bool) -> Result<(), LedgerError> {
        let plan_day = self
            .plan
            .iter_mut()
            .find(|d| d.day == day)
            .ok_or(LedgerError::DayNotFound(day))?;
        let available = plan_day.tasks.len();
        let task = plan_day
            .tasks
            .get_mut(slot)
            .ok_or(LedgerError::TaskNotFound {
                day,
                slot,
                available,
            })?;
        task.is_done = done;
        Ok(())
    }

    /// Append a scored mock test to the history.
    pub fn record_result(&mut self, result: MockTestResult) {
        self.history.push(result);
    }

    /// The plan day scheduled on `date`, if any.
    pub fn day_on(&self, date: NaiveDate) -> Option<&PlanDay> {
        self.plan.iter().find(|d| d.date == date)
    }

    /// Results recorded for `topic`, oldest first.
    pub fn results_for<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a MockTestResult> {
        self.history.iter().filter(move |r| r.topic == topic)
    }
}

pub mod done;
pub mod init;
pub mod plan;
pub mod progress;
pub mod report;
pub mod score;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use civprep_core::ledger::StudyLedger;

/// Load the ledger named in the config, with a hint when none exists yet.
pub(crate) fn load_ledger(path: &Path) -> Result<StudyLedger> {
    if !path.exists() {
        anyhow::bail!(
            "no study ledger at {}. Run `civprep plan` first.",
            path.display()
        );
    }
    StudyLedger::load_json(path).with_context(|| format!("ledger {}", path.display()))
}

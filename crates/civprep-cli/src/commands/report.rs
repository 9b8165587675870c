//! The `civprep report` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use civprep_core::parser::load_content;
use civprep_core::traits::ContentRepository;
use civprep_report::write_html_report;

use crate::commands::load_ledger;
use crate::config::load_config_from;

pub fn execute(output: PathBuf, config_path: Option<&Path>) -> Result<()> {
    let config = load_config_from(config_path)?;
    let ledger = load_ledger(&config.ledger)?;
    let bank = load_content(&config.content)?;

    write_html_report(&ledger, bank.topics(), &output)?;
    println!("HTML report: {}", output.display());

    Ok(())
}

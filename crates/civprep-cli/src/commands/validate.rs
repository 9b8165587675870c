//! The `civprep validate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use civprep_core::parser::{load_content_directory, parse_content_bank, validate_content_bank};

use crate::config::load_config_from;

pub fn execute(content: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let content_path = match content {
        Some(path) => path,
        None => load_config_from(config_path)?.content,
    };

    let banks = if content_path.is_dir() {
        load_content_directory(&content_path)?
    } else {
        vec![parse_content_bank(&content_path)?]
    };
    anyhow::ensure!(
        !banks.is_empty(),
        "no content banks found in {}",
        content_path.display()
    );

    let mut total_warnings = 0;

    for bank in &banks {
        println!(
            "Content bank: {} ({} topics, {} questions)",
            bank.name,
            bank.topics.len(),
            bank.questions.len()
        );

        let warnings = validate_content_bank(bank);
        for w in &warnings {
            let prefix = match (&w.topic_id, w.question) {
                (_, Some(q)) => format!("  [question {q}]"),
                (Some(id), None) => format!("  [{id}]"),
                (None, None) => "  ".to_string(),
            };
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All content banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

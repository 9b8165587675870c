//! TOML content bank parser.
//!
//! Loads curricula and question banks from TOML files and directories, and
//! validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{ContentBank, Question, Topic};

/// Intermediate TOML structure for parsing content bank files.
#[derive(Debug, Deserialize)]
struct TomlContentFile {
    bank: TomlBankHeader,
    #[serde(default)]
    topics: Vec<TomlTopic>,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlTopic {
    id: String,
    name: String,
    #[serde(default)]
    subject: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    topic: String,
    stem: String,
    options: Vec<String>,
    #[serde(alias = "answer")]
    correct_index: usize,
    #[serde(default)]
    explanation: String,
}

/// Parse a single TOML file into a `ContentBank`.
pub fn parse_content_bank(path: &Path) -> Result<ContentBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content bank: {}", path.display()))?;

    parse_content_bank_str(&content, path)
}

/// Parse a TOML string into a `ContentBank` (useful for testing).
pub fn parse_content_bank_str(content: &str, source_path: &Path) -> Result<ContentBank> {
    let parsed: TomlContentFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let topics = parsed
        .topics
        .into_iter()
        .map(|t| Topic {
            id: t.id,
            name: t.name,
            subject: t.subject,
        })
        .collect();

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            stem: q.stem.trim().to_string(),
            options: q.options,
            correct_index: q.correct_index,
            topic: q.topic,
            explanation: q.explanation.trim().to_string(),
        })
        .collect();

    Ok(ContentBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        topics,
        questions,
    })
}

/// Recursively load all `.toml` content banks from a directory.
pub fn load_content_directory(dir: &Path) -> Result<Vec<ContentBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    // Directory order is platform-dependent; curriculum order must not be.
    entries.sort();

    for path in entries {
        if path.is_dir() {
            banks.extend(load_content_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_content_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a bank from a file, or merge every bank found under a directory.
pub fn load_content(path: &Path) -> Result<ContentBank> {
    if !path.is_dir() {
        return parse_content_bank(path);
    }

    let mut banks = load_content_directory(path)?.into_iter();
    let mut merged = banks
        .next()
        .with_context(|| format!("no content banks found in {}", path.display()))?;
    for bank in banks {
        merged.merge(bank);
    }
    Ok(merged)
}

/// A warning from content bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The topic the warning concerns (if applicable).
    pub topic_id: Option<String>,
    /// Index into the bank's question list (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a content bank for common authoring mistakes.
pub fn validate_content_bank(bank: &ContentBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.topics.is_empty() {
        warnings.push(ValidationWarning {
            topic_id: None,
            question: None,
            message: "bank defines no topics; plans cannot be generated from it".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for topic in &bank.topics {
        if !seen_ids.insert(topic.id.as_str()) {
            warnings.push(ValidationWarning {
                topic_id: Some(topic.id.clone()),
                question: None,
                message: format!("duplicate topic ID: {}", topic.id),
            });
        }
    }

    for (i, q) in bank.questions.iter().enumerate() {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                topic_id: Some(q.topic.clone()),
                question: Some(i),
                message,
            })
        };

        if !seen_ids.contains(q.topic.as_str()) {
            warn(format!("question references unknown topic: {}", q.topic));
        }
        if q.stem.is_empty() {
            warn("question stem is empty".into());
        }
        if q.options.len() < 2 {
            warn(format!(
                "question has {} option(s), expected at least 2",
                q.options.len()
            ));
        }
        if q.correct_index >= q.options.len() {
            warn(format!(
                "correct_index {} is out of range for {} option(s)",
                q.correct_index,
                q.options.len()
            ));
        }
    }

    for topic in &bank.topics {
        if !bank.questions.iter().any(|q| q.topic == topic.id) {
            warnings.push(ValidationWarning {
                topic_id: Some(topic.id.clone()),
                question: None,
                message: "topic has no questions; mock tests will be empty".into(),
            });
        }
    }

    warnings
}

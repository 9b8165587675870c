//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use civprep_core::model::TaskDurations;

/// Top-level civprep configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CivprepConfig {
    /// Content bank file or directory.
    #[serde(default = "default_content")]
    pub content: PathBuf,
    /// Where the study ledger is stored.
    #[serde(default = "default_ledger")]
    pub ledger: PathBuf,
    /// Hours per day used when `plan --hours` is omitted.
    #[serde(default = "default_hours")]
    pub default_hours_per_day: f64,
    /// Days used when `plan --days` is omitted.
    #[serde(default = "default_days")]
    pub default_duration_days: i32,
    /// Whether `score` penalises wrong answers unless told otherwise.
    #[serde(default = "default_true")]
    pub negative_marking: bool,
    /// Minutes per task kind.
    #[serde(default)]
    pub durations: TaskDurations,
}

fn default_content() -> PathBuf {
    PathBuf::from("content")
}
fn default_ledger() -> PathBuf {
    PathBuf::from(".civprep/ledger.json")
}
fn default_hours() -> f64 {
    3.0
}
fn default_days() -> i32 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for CivprepConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            ledger: default_ledger(),
            default_hours_per_day: default_hours(),
            default_duration_days: default_days(),
            negative_marking: true,
            durations: TaskDurations::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied through verbatim, never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `civprep.toml` in the current directory
/// 2. `~/.config/civprep/config.toml`
///
/// Environment variable overrides: `CIVPREP_CONTENT`, `CIVPREP_LEDGER`.
pub fn load_config_from(path: Option<&Path>) -> Result<CivprepConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("civprep.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CivprepConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CivprepConfig::default(),
    };

    if let Ok(content) = std::env::var("CIVPREP_CONTENT") {
        config.content = PathBuf::from(content);
    }
    if let Ok(ledger) = std::env::var("CIVPREP_LEDGER") {
        config.ledger = PathBuf::from(ledger);
    }

    config.content = resolve_path(&config.content);
    config.ledger = resolve_path(&config.ledger);

    anyhow::ensure!(
        config.default_hours_per_day.is_finite() && config.default_hours_per_day >= 0.0,
        "default_hours_per_day must be a non-negative number"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("civprep"))
}

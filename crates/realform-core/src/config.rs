//! Survey configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::plan::{default_sections, SectionSpec};

/// Top-level realform configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealformConfig {
    /// Directory holding the category question files.
    #[serde(default = "default_questions_dir")]
    pub questions_dir: PathBuf,
    /// Responses file rewritten after every answer.
    #[serde(default = "default_responses_file")]
    pub responses_file: PathBuf,
    /// Output directory for rendered reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Add the integer score column to report tables.
    #[serde(default)]
    pub show_scores: bool,
    /// Sections in the order they are asked.
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionSpec>,
}

fn default_questions_dir() -> PathBuf {
    PathBuf::from("./questions")
}
fn default_responses_file() -> PathBuf {
    PathBuf::from("./responses.csv")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./realform-results")
}

impl Default for RealformConfig {
    fn default() -> Self {
        Self {
            questions_dir: default_questions_dir(),
            responses_file: default_responses_file(),
            output_dir: default_output_dir(),
            show_scores: false,
            sections: default_sections(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `realform.toml` in the current directory
/// 2. `~/.config/realform/config.toml`
///
/// Environment variable overrides: `REALFORM_QUESTIONS_DIR`, `REALFORM_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<RealformConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("realform.toml");
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
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<RealformConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => RealformConfig::default(),
    };

    if let Ok(dir) = std::env::var("REALFORM_QUESTIONS_DIR") {
        config.questions_dir = PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("REALFORM_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    config.questions_dir = resolve_path(&config.questions_dir);
    config.responses_file = resolve_path(&config.responses_file);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("realform"))
}

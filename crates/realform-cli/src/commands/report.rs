//! The `realform report` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use realform_core::model::UserDetails;
use realform_core::parser::load_responses;
use realform_core::report::build_report;

pub fn execute(
    responses_path: PathBuf,
    details_path: PathBuf,
    format: String,
    output: Option<PathBuf>,
    show_scores: bool,
) -> Result<()> {
    let responses = load_responses(&responses_path)?;
    let details = load_details(&details_path)?;
    tracing::info!(
        responses = responses.len(),
        child = %details.child_full_name(),
        "building report"
    );

    let report = build_report(&responses, &details)?;
    for unassigned in report.unassigned_categories() {
        eprintln!(
            "WARNING: category {} is not part of either domain",
            unassigned.category
        );
    }

    super::emit_report(&report, &format, output.as_deref(), show_scores)
}

fn load_details(path: &Path) -> Result<UserDetails> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read details file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse details file: {}", path.display()))
}

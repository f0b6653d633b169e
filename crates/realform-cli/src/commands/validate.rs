//! The `realform validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};

use realform_core::config::load_config_from;
use realform_core::plan::{validate_plan, SurveyPlan};
use realform_core::scoring::category_maximum;

pub fn execute(config_path: Option<PathBuf>, questions_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let questions_dir = questions_dir.unwrap_or(config.questions_dir);

    let plan = SurveyPlan::load(&questions_dir, &config.sections);
    println!(
        "Questions: {} ({} categories, {} questions)",
        questions_dir.display(),
        plan.sections.len(),
        plan.question_count()
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Category", "Domain", "Questions", "Maximum"]);
    for section in &plan.sections {
        let maximum = category_maximum(&section.category)
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&section.category),
            Cell::new(section.domain),
            Cell::new(section.questions.len()).set_alignment(CellAlignment::Right),
            Cell::new(maximum).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");

    let warnings = validate_plan(&plan);
    for w in &warnings {
        let prefix = w
            .category
            .as_ref()
            .map(|c| format!("  [{c}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All question files valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

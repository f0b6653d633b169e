//! Plain-text report with one table per domain.

use std::path::Path;

use anyhow::Result;
use comfy_table::{presets::ASCII_FULL, Cell, CellAlignment, Table};

use realform_core::report::{DomainSummary, SurveyReport};

fn domain_table(domain: &DomainSummary, show_scores: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut header = vec!["Category", "Raw Score"];
    if show_scores {
        header.push("Score");
    }
    table.set_header(header);

    for c in &domain.categories {
        let mut row = vec![
            Cell::new(&c.category),
            Cell::new(&c.raw_score).set_alignment(CellAlignment::Right),
        ];
        if show_scores {
            row.push(Cell::new(c.score).set_alignment(CellAlignment::Right));
        }
        table.add_row(row);
    }
    table
}

/// Render the report as plain text.
pub fn render_text(report: &SurveyReport, show_scores: bool) -> String {
    let mut out = String::new();

    out.push_str(&report.title);
    out.push('\n');
    out.push_str(&"=".repeat(report.title.len()));
    out.push_str("\n\n");

    out.push_str(&format!("Child: {}\n", report.details.child_full_name()));
    out.push_str(&format!(
        "Completed by: {} ({})\n\n",
        report.details.completed_by, report.details.relationship
    ));

    for domain in report.domains() {
        out.push_str(&domain.heading);
        out.push('\n');
        out.push_str(&domain_table(domain, show_scores).to_string());
        out.push('\n');
        out.push_str(&domain.total_line());
        out.push_str("\n\n");
    }

    out.push_str(&report.narrative);
    out.push_str("\n\n");
    out.push_str(&report.sign_off);
    out.push('\n');
    out
}

/// Write a text report to a file.
pub fn write_text_report(report: &SurveyReport, show_scores: bool, path: &Path) -> Result<()> {
    let text = render_text(report, show_scores);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    Ok(())
}

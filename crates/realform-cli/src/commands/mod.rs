pub mod init;
pub mod report;
pub mod survey;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use realform_core::report::SurveyReport;
use realform_report::html::{generate_html, write_html_report};
use realform_report::text::{render_text, write_text_report};

/// Print the report and, when an output directory is given, save each format.
pub(crate) fn emit_report(
    report: &SurveyReport,
    format: &str,
    output: Option<&Path>,
    show_scores: bool,
) -> Result<()> {
    let formats: Vec<&str> = if format == "all" {
        vec!["text", "markdown", "json", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    let Some(output) = output else {
        for fmt in &formats {
            match *fmt {
                "text" => print!("{}", render_text(report, show_scores)),
                "markdown" | "md" => print!("{}", report.to_markdown(show_scores)),
                "json" => println!("{}", serde_json::to_string_pretty(report)?),
                "html" => println!("{}", generate_html(report, show_scores)),
                _ => eprintln!("Unknown format: {fmt}"),
            }
        }
        return Ok(());
    };

    print!("{}", render_text(report, show_scores));

    std::fs::create_dir_all(output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    for fmt in &formats {
        match *fmt {
            "text" => {
                let path = output.join(format!("report-{timestamp}.txt"));
                write_text_report(report, show_scores, &path)?;
                eprintln!("Text report: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("report-{timestamp}.md"));
                std::fs::write(&path, report.to_markdown(show_scores))?;
                eprintln!("Markdown report: {}", path.display());
            }
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(report, show_scores, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use realform_core::report::{DomainSummary, SurveyReport};
use realform_core::scoring::INDEPENDENCE_THRESHOLD;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn domain_section(domain: &DomainSummary, show_scores: bool) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"domain\">\n");
    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&domain.heading)));
    html.push_str("<table>\n<thead><tr><th>Category</th><th>Raw Score</th>");
    if show_scores {
        html.push_str("<th>Score</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for c in &domain.categories {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td>",
            html_escape(&c.category),
            html_escape(&c.raw_score)
        ));
        if show_scores {
            html.push_str(&format!("<td>{}</td>", c.score));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody></table>\n");
    html.push_str(&format!(
        "<p class=\"total\">{}</p>\n",
        html_escape(&domain.total_line())
    ));
    html.push_str("</section>\n");
    html
}

/// Generate an HTML report from a survey report.
pub fn generate_html(report: &SurveyReport, show_scores: bool) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>REAL report: {}</title>\n",
        html_escape(&report.details.child_full_name())
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.title)));
    html.push_str(&format!(
        "<p class=\"meta\">Child: <strong>{}</strong> | Completed by: {} ({})</p>\n",
        html_escape(&report.details.child_full_name()),
        html_escape(&report.details.completed_by),
        html_escape(&report.details.relationship),
    ));
    html.push_str("</header>\n");

    for domain in report.domains() {
        html.push_str(&domain_section(domain, show_scores));
    }

    html.push_str(&generate_bar_chart(&report.domains()));

    html.push_str("<section class=\"narrative\">\n");
    html.push_str(&format!("<p>{}</p>\n", html_escape(&report.narrative)));
    html.push_str(&format!(
        "<p class=\"sign-off\">{}</p>\n",
        html_escape(&report.sign_off)
    ));
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &SurveyReport, show_scores: bool, path: &Path) -> Result<()> {
    let html = generate_html(report, show_scores);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(domains: &[&DomainSummary]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 80;

    let total_height = domains.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, domain) in domains.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let score = domain.percentage.clamp(0.0, 1.0);
        let width = (score * max_width as f64) as usize;

        let color = if score >= INDEPENDENCE_THRESHOLD {
            "#22c55e"
        } else if score >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            domain.domain
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); max-width: 60rem; }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.total { font-weight: bold; }
.sign-off { margin-top: 2rem; font-style: italic; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use realform_core::model::{AnswerKey, Domain, Responses, Sex, UserDetails};
    use realform_core::report::build_report;

    fn make_test_report() -> SurveyReport {
        let mut responses = Responses::new();
        responses.insert(
            AnswerKey::new(Domain::Adl, "Toileting", 1),
            "3: Frequently (75%)".into(),
        );
        responses.insert(
            AnswerKey::new(Domain::Iadl, "Housework/Chores", 1),
            "1: Seldom (25%)".into(),
        );
        let details = UserDetails {
            child_first_name: "Noah".into(),
            child_last_name: "O'Brien".into(),
            completed_by: "Erin O'Brien".into(),
            relationship: "Parent".into(),
            therapist: "Dr. Ada <OT>".into(),
            sex: Sex::Male,
        };
        build_report(&responses, &details).unwrap()
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report, false);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("<td>Toileting</td><td>3/33</td>"));
        assert!(html.contains("Housework/Chores"));
        assert!(html.contains("IADL Total: 1/42"));
        assert!(html.contains("<svg"));
        assert!(html.contains("Raw JSON Data"));
        assert!(!html.contains("<th>Score</th>"));
    }

    #[test]
    fn html_escapes_user_text() {
        let report = make_test_report();
        let html = generate_html(&report, true);
        assert!(html.contains("O&#x27;Brien"));
        assert!(html.contains("Dr. Ada &lt;OT&gt;"));
        assert!(html.contains("<th>Score</th>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        write_html_report(&report, false, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}

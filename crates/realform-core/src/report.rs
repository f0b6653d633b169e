//! Report aggregation with JSON persistence and Markdown rendering.
//!
//! The report is a pure projection of the accumulated responses. It is never
//! stored as the source of truth; callers rebuild it whenever they need it.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SurveyError;
use crate::model::{Domain, Responses, UserDetails};
use crate::scoring::{
    category_maximum_or_zero, domain_categories, score_response, INDEPENDENCE_THRESHOLD,
};

/// Title shown at the top of every report.
pub const REPORT_TITLE: &str = "Activities of Daily Living (ADL) and Instrumental Activities of Daily Living (IADL) Report";

/// A complete survey report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyReport {
    pub title: String,
    pub details: UserDetails,
    /// Every category that received at least one response, alphabetical.
    pub categories: Vec<CategoryScore>,
    pub adl: DomainSummary,
    pub iadl: DomainSummary,
    pub narrative: String,
    pub sign_off: String,
}

/// Summed score for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: u32,
    pub total_possible: u32,
    /// `"{score}/{total_possible}"`.
    pub raw_score: String,
    /// Responses whose text matched no answer option.
    #[serde(default)]
    pub unscored: usize,
}

/// Totals for one domain over the categories that were answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub domain: Domain,
    pub heading: String,
    pub categories: Vec<CategoryScore>,
    pub total: u32,
    pub maximum: u32,
    /// `total / maximum`, in `[0, 1]` for well-formed input.
    pub percentage: f64,
}

impl DomainSummary {
    pub fn raw_score(&self) -> String {
        format!("{}/{}", self.total, self.maximum)
    }

    pub fn is_independent(&self) -> bool {
        self.percentage >= INDEPENDENCE_THRESHOLD
    }

    /// Line printed under the domain table, e.g. `"ADL Total: 45/60 (75.0%)"`.
    pub fn total_line(&self) -> String {
        format!(
            "{} Total: {} ({:.1}%)",
            self.domain,
            self.raw_score(),
            self.percentage * 100.0
        )
    }
}

/// Score every response and sum per category.
pub fn score_categories(responses: &Responses) -> Vec<CategoryScore> {
    let mut sums: BTreeMap<&str, (u32, usize)> = BTreeMap::new();
    for (key, text) in responses {
        let entry = sums.entry(key.category.as_str()).or_insert((0, 0));
        match score_response(text) {
            Some(score) => entry.0 += u32::from(score),
            None => {
                tracing::warn!(
                    category = %key.category,
                    question = key.question_no,
                    response = %text,
                    "response matches no answer option, counting as 0"
                );
                entry.1 += 1;
            }
        }
    }

    sums.into_iter()
        .map(|(category, (score, unscored))| {
            let total_possible = category_maximum_or_zero(category);
            CategoryScore {
                category: category.to_string(),
                score,
                total_possible,
                raw_score: format!("{score}/{total_possible}"),
                unscored,
            }
        })
        .collect()
}

/// Total a domain over the scored categories that belong to it.
pub fn summarize_domain(
    domain: Domain,
    categories: &[CategoryScore],
) -> Result<DomainSummary, SurveyError> {
    let members = domain_categories(domain);
    let selected: Vec<CategoryScore> = categories
        .iter()
        .filter(|c| members.contains(&c.category.as_str()))
        .cloned()
        .collect();

    let total: u32 = selected.iter().map(|c| c.score).sum();
    let maximum: u32 = selected.iter().map(|c| c.total_possible).sum();
    if selected.is_empty() || maximum == 0 {
        return Err(SurveyError::EmptyDomain(domain));
    }

    Ok(DomainSummary {
        domain,
        heading: domain.heading().to_string(),
        categories: selected,
        total,
        maximum,
        percentage: f64::from(total) / f64::from(maximum),
    })
}

/// Pick the narrative paragraph for the two domain outcomes.
pub fn narrative(details: &UserDetails, adl: &DomainSummary, iadl: &DomainSummary) -> String {
    let name = &details.child_first_name;
    let pronouns = details.sex.pronouns();
    let subject = capitalize(pronouns.subject);
    let possessive = pronouns.possessive;

    match (adl.is_independent(), iadl.is_independent()) {
        (true, true) => format!(
            "{name} is already independent in both {} and {}. \
             {subject} should keep practising these skills in everyday routines.",
            Domain::Adl.description(),
            Domain::Iadl.description(),
        ),
        (true, false) => format!(
            "{name} is already independent in {}. \
             {subject} would benefit from support to build {possessive} skills in {}.",
            Domain::Adl.description(),
            Domain::Iadl.description(),
        ),
        (false, true) => format!(
            "{name} is already independent in {}. \
             {subject} would benefit from support to build {possessive} skills in {}.",
            Domain::Iadl.description(),
            Domain::Adl.description(),
        ),
        (false, false) => format!(
            "{name} would benefit from support to build {possessive} skills in both {} and {}. \
             Targeted practice at home and at school will help {} move towards independence.",
            Domain::Adl.description(),
            Domain::Iadl.description(),
            pronouns.object,
        ),
    }
}

/// Escape characters that Markdown treats as table or inline syntax.
fn md_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '|' | '*' | '_' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the full report from the accumulated responses.
pub fn build_report(
    responses: &Responses,
    details: &UserDetails,
) -> Result<SurveyReport, SurveyError> {
    let categories = score_categories(responses);
    let adl = summarize_domain(Domain::Adl, &categories)?;
    let iadl = summarize_domain(Domain::Iadl, &categories)?;
    let narrative = narrative(details, &adl, &iadl);
    let sign_off = format!("Evaluating therapist: {}", details.therapist);

    tracing::debug!(
        responses = responses.len(),
        categories = ?categories,
        adl = %adl.raw_score(),
        iadl = %iadl.raw_score(),
        "built survey report"
    );

    Ok(SurveyReport {
        title: REPORT_TITLE.to_string(),
        details: details.clone(),
        categories,
        adl,
        iadl,
        narrative,
        sign_off,
    })
}

impl SurveyReport {
    pub fn domains(&self) -> [&DomainSummary; 2] {
        [&self.adl, &self.iadl]
    }

    /// Categories that appear in neither domain table.
    pub fn unassigned_categories(&self) -> Vec<&CategoryScore> {
        self.categories
            .iter()
            .filter(|c| {
                !self
                    .domains()
                    .iter()
                    .any(|d| d.categories.iter().any(|m| m.category == c.category))
            })
            .collect()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SurveyReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown. User text is escaped so it cannot
    /// open or close table cells.
    pub fn to_markdown(&self, show_scores: bool) -> String {
        let mut md = String::new();

        md.push_str(&format!("# {}\n\n", self.title));
        md.push_str(&format!(
            "**Child:** {}  \n**Completed by:** {} ({})\n\n",
            md_escape(&self.details.child_full_name()),
            md_escape(&self.details.completed_by),
            md_escape(&self.details.relationship)
        ));

        for domain in self.domains() {
            md.push_str(&format!("## {}\n\n", domain.heading));
            if show_scores {
                md.push_str("| Category | Raw Score | Score |\n");
                md.push_str("|----------|-----------|-------|\n");
            } else {
                md.push_str("| Category | Raw Score |\n");
                md.push_str("|----------|-----------|\n");
            }
            for c in &domain.categories {
                if show_scores {
                    md.push_str(&format!(
                        "| {} | {} | {} |\n",
                        md_escape(&c.category),
                        c.raw_score,
                        c.score
                    ));
                } else {
                    md.push_str(&format!("| {} | {} |\n", md_escape(&c.category), c.raw_score));
                }
            }
            md.push_str(&format!("\n**{}**\n\n", domain.total_line()));
        }

        md.push_str(&self.narrative);
        md.push_str("\n\n");
        md.push_str(&self.sign_off);
        md.push('\n');
        md
    }
}

//! The ordered list of survey sections and its consistency checks.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{Domain, Question};
use crate::parser::load_questions_lenient;
use crate::scoring::{category_maximum, domain_of, MAX_QUESTION_SCORE};

/// Where one category's questions come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub domain: Domain,
    pub category: String,
    /// Question file, relative to the questions directory.
    pub file: String,
}

impl SectionSpec {
    pub fn new(domain: Domain, category: &str, file: &str) -> Self {
        Self {
            domain,
            category: category.to_string(),
            file: file.to_string(),
        }
    }
}

/// The eleven sections of the REAL form, in the order they are asked.
pub fn default_sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec::new(Domain::Adl, "Dressing", "Dressing.csv"),
        SectionSpec::new(Domain::Adl, "Hygiene and Grooming", "Hygiene_and_Grooming.csv"),
        SectionSpec::new(Domain::Adl, "Feeding", "Feeding.csv"),
        SectionSpec::new(Domain::Adl, "Toileting", "Toileting.csv"),
        SectionSpec::new(
            Domain::Adl,
            "Other Functional Mobility",
            "Other_Functional_Mobility.csv",
        ),
        SectionSpec::new(Domain::Iadl, "Housework/Chores", "Housework_Chores.csv"),
        SectionSpec::new(
            Domain::Iadl,
            "Managing Money and Shopping",
            "Managing_Money_and_Shopping.csv",
        ),
        SectionSpec::new(Domain::Iadl, "Meal Preparation", "Meal_Preparation.csv"),
        SectionSpec::new(Domain::Iadl, "Personal Safety", "Personal_Safety.csv"),
        SectionSpec::new(Domain::Iadl, "Travelling", "Travelling.csv"),
        SectionSpec::new(
            Domain::Iadl,
            "School-Related Skills",
            "School-Related_Skills.csv",
        ),
    ]
}

/// A section with its questions loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub domain: Domain,
    pub category: String,
    pub questions: Vec<Question>,
}

/// The loaded survey, in asking order.
#[derive(Debug, Clone, Default)]
pub struct SurveyPlan {
    pub sections: Vec<Section>,
    /// Messages for question files that failed to load.
    pub load_warnings: Vec<String>,
}

impl SurveyPlan {
    /// Load every section's question file from `questions_dir`.
    ///
    /// A file that fails to load yields an empty section and a warning
    /// instead of an error.
    pub fn load(questions_dir: &Path, specs: &[SectionSpec]) -> Self {
        let mut plan = SurveyPlan::default();
        for spec in specs {
            let path = questions_dir.join(&spec.file);
            let loaded = load_questions_lenient(&path);
            if let Some(message) = loaded.warning {
                plan.load_warnings
                    .push(format!("{}: {}", spec.category, message));
            }
            plan.sections.push(Section {
                domain: spec.domain,
                category: spec.category.clone(),
                questions: loaded.questions,
            });
        }
        tracing::debug!(
            sections = plan.sections.len(),
            questions = plan.question_count(),
            "loaded survey plan"
        );
        plan
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

/// A warning from plan validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The category (if applicable).
    pub category: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a loaded plan against the fixed category tables.
pub fn validate_plan(plan: &SurveyPlan) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for message in &plan.load_warnings {
        warnings.push(ValidationWarning {
            category: None,
            message: message.clone(),
        });
    }

    let mut seen = HashSet::new();
    for section in &plan.sections {
        let warn = |message: String| ValidationWarning {
            category: Some(section.category.clone()),
            message,
        };

        if !seen.insert(section.category.as_str()) {
            warnings.push(warn(format!("duplicate category: {}", section.category)));
        }

        match category_maximum(&section.category) {
            None => warnings.push(warn(
                "category has no maximum score and will total 0 possible points".into(),
            )),
            Some(max) => {
                let expected = max / MAX_QUESTION_SCORE;
                if section.questions.len() as u32 != expected {
                    warnings.push(warn(format!(
                        "{} questions but the maximum score {max} implies {expected}",
                        section.questions.len()
                    )));
                }
            }
        }

        match domain_of(&section.category) {
            Some(domain) if domain != section.domain => warnings.push(warn(format!(
                "listed under {} but reported under {domain}",
                section.domain
            ))),
            None => warnings.push(warn(
                "category belongs to neither domain and will not appear in the report tables"
                    .into(),
            )),
            _ => {}
        }

        let mut numbers = HashSet::new();
        for q in &section.questions {
            if !numbers.insert(q.no) {
                warnings.push(warn(format!("duplicate question number: {}", q.no)));
            }
            if q.prompt.trim().is_empty() {
                warnings.push(warn(format!("question {} has an empty prompt", q.no)));
            }
        }
    }

    warnings
}

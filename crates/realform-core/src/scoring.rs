//! Answer scoring and the fixed category tables.
//!
//! Scores come from substring matches on the stored answer text, so option
//! strings like `"3: Frequently (75%)"` score the same as the bare label.

use crate::model::{Domain, Response};

/// Maximum achievable score per category (question count x 3).
pub const CATEGORY_MAXIMUMS: &[(&str, u32)] = &[
    ("Dressing", 60),
    ("Hygiene and Grooming", 60),
    ("Feeding", 39),
    ("Toileting", 33),
    ("Other Functional Mobility", 30),
    ("Housework/Chores", 42),
    ("Managing Money and Shopping", 24),
    ("Meal Preparation", 24),
    ("Personal Safety", 39),
    ("Travelling", 21),
    ("School-Related Skills", 24),
];

/// ADL categories in display order.
pub const ADL_CATEGORIES: &[&str] = &[
    "Dressing",
    "Hygiene and Grooming",
    "Feeding",
    "Toileting",
    "Other Functional Mobility",
];

/// IADL categories in display order.
pub const IADL_CATEGORIES: &[&str] = &[
    "Housework/Chores",
    "Managing Money and Shopping",
    "Meal Preparation",
    "Personal Safety",
    "Travelling",
    "School-Related Skills",
];

/// Highest score a single question can contribute.
pub const MAX_QUESTION_SCORE: u32 = 3;

/// Percentage at or above which a domain counts as independent.
pub const INDEPENDENCE_THRESHOLD: f64 = 0.8;

/// Read a stored answer back as an option. Labels are checked in
/// [`Response::ALL`] order and the first contained label wins.
pub fn stored_response(text: &str) -> Option<Response> {
    Response::ALL
        .into_iter()
        .find(|r| text.contains(r.label()))
}

/// Score a stored answer. Returns `None` when the text contains no known label.
pub fn score_response(text: &str) -> Option<u8> {
    stored_response(text).map(|r| r.score())
}

/// Look up the fixed maximum for a category.
pub fn category_maximum(category: &str) -> Option<u32> {
    CATEGORY_MAXIMUMS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, max)| *max)
}

/// Maximum for a category, defaulting unknown categories to 0.
pub fn category_maximum_or_zero(category: &str) -> u32 {
    match category_maximum(category) {
        Some(max) => max,
        None => {
            tracing::warn!(category, "category has no maximum score, defaulting to 0");
            0
        }
    }
}

/// Categories belonging to a domain, in display order.
pub fn domain_categories(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::Adl => ADL_CATEGORIES,
        Domain::Iadl => IADL_CATEGORIES,
    }
}

/// The domain whose membership list contains `category`, if any.
pub fn domain_of(category: &str) -> Option<Domain> {
    [Domain::Adl, Domain::Iadl]
        .into_iter()
        .find(|d| domain_categories(*d).contains(&category))
}

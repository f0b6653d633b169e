//! Core data model types for the REAL rating form.
//!
//! These are the types shared by the scorer, the aggregator, the session
//! state machine and the renderers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::SurveyError;

/// Top-level grouping of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// Activities of Daily Living, the self-care domain.
    #[serde(rename = "ADL")]
    Adl,
    /// Instrumental Activities of Daily Living, the home and community domain.
    #[serde(rename = "IADL")]
    Iadl,
}

impl Domain {
    /// Section heading used above the domain's table.
    pub fn heading(&self) -> &'static str {
        match self {
            Domain::Adl => "Activities of Daily Living (ADL) Self-Care Domain",
            Domain::Iadl => {
                "Instrumental Activities of Daily Living (IADL) Home and Community Domain"
            }
        }
    }

    /// Short description used in narrative text.
    pub fn description(&self) -> &'static str {
        match self {
            Domain::Adl => "the ADL self-care domain",
            Domain::Iadl => "the IADL home and community domain",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Adl => write!(f, "ADL"),
            Domain::Iadl => write!(f, "IADL"),
        }
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADL" => Ok(Domain::Adl),
            "IADL" => Ok(Domain::Iadl),
            other => Err(format!("unknown domain: {other}")),
        }
    }
}

/// Identifies one questionnaire item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnswerKey {
    pub domain: Domain,
    pub category: String,
    pub question_no: u32,
}

impl AnswerKey {
    pub fn new(domain: Domain, category: impl Into<String>, question_no: u32) -> Self {
        Self {
            domain,
            category: category.into(),
            question_no,
        }
    }
}

/// Accumulated answers, keyed by item. Values are the stored answer text.
pub type Responses = BTreeMap<AnswerKey, String>;

/// The four answer options offered for every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Response {
    Unable,
    Seldom,
    Occasionally,
    Frequently,
}

impl Response {
    pub const ALL: [Response; 4] = [
        Response::Unable,
        Response::Seldom,
        Response::Occasionally,
        Response::Frequently,
    ];

    /// The canonical label stored in the responses file.
    pub fn label(&self) -> &'static str {
        match self {
            Response::Unable => "Unable",
            Response::Seldom => "Seldom (25%)",
            Response::Occasionally => "Occasionally (50%)",
            Response::Frequently => "Frequently (75%)",
        }
    }

    /// The option text shown to the respondent, e.g. `"2: Occasionally (50%)"`.
    pub fn option_text(&self) -> String {
        format!("{}: {}", self.score(), self.label())
    }

    pub fn score(&self) -> u8 {
        match self {
            Response::Unable => 0,
            Response::Seldom => 1,
            Response::Occasionally => 2,
            Response::Frequently => 3,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Response {
    type Err = SurveyError;

    /// Accepts a bare option digit (`"0"`..`"3"`) or any text containing a
    /// canonical label, such as `"3: Frequently (75%)"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "0" => return Ok(Response::Unable),
            "1" => return Ok(Response::Seldom),
            "2" => return Ok(Response::Occasionally),
            "3" => return Ok(Response::Frequently),
            _ => {}
        }
        Response::ALL
            .into_iter()
            .find(|r| trimmed.contains(r.label()))
            .ok_or_else(|| SurveyError::UnknownResponse(trimmed.to_string()))
    }
}

/// Sex of the child, used only to pick pronouns for the narrative.
///
/// Deserialization goes through [`FromStr`], so details files accept the
/// same spellings as typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl TryFrom<String> for Sex {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "boy" => Ok(Sex::Male),
            "f" | "female" | "girl" => Ok(Sex::Female),
            "" | "other" | "unspecified" | "x" => Ok(Sex::Unspecified),
            other => Err(format!("unknown sex: {other}")),
        }
    }
}

/// Subject, object and possessive pronouns for narrative text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pronouns {
    pub subject: &'static str,
    pub object: &'static str,
    pub possessive: &'static str,
}

impl Sex {
    pub fn pronouns(&self) -> Pronouns {
        match self {
            Sex::Male => Pronouns {
                subject: "he",
                object: "him",
                possessive: "his",
            },
            Sex::Female => Pronouns {
                subject: "she",
                object: "her",
                possessive: "her",
            },
            Sex::Unspecified => Pronouns {
                subject: "they",
                object: "them",
                possessive: "their",
            },
        }
    }
}

/// Identifying fields carried through to the report text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub child_first_name: String,
    #[serde(default)]
    pub child_last_name: String,
    /// Person completing the form.
    #[serde(default)]
    pub completed_by: String,
    /// Relationship of the person completing the form to the child.
    #[serde(default)]
    pub relationship: String,
    /// Evaluating therapist named in the sign-off.
    #[serde(default)]
    pub therapist: String,
    #[serde(default)]
    pub sex: Sex,
}

impl UserDetails {
    pub fn child_full_name(&self) -> String {
        format!("{} {}", self.child_first_name, self.child_last_name)
            .trim()
            .to_string()
    }
}

/// One prompt from a category question file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub no: u32,
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_display_and_parse() {
        assert_eq!(Domain::Adl.to_string(), "ADL");
        assert_eq!(Domain::Iadl.to_string(), "IADL");
        assert_eq!("adl".parse::<Domain>().unwrap(), Domain::Adl);
        assert_eq!(" IADL ".parse::<Domain>().unwrap(), Domain::Iadl);
        assert!("social".parse::<Domain>().is_err());
    }

    #[test]
    fn response_parses_digits_and_labels() {
        assert_eq!("0".parse::<Response>().unwrap(), Response::Unable);
        assert_eq!("3".parse::<Response>().unwrap(), Response::Frequently);
        assert_eq!(
            "2: Occasionally (50%)".parse::<Response>().unwrap(),
            Response::Occasionally
        );
        assert_eq!("Seldom (25%)".parse::<Response>().unwrap(), Response::Seldom);
        assert!("4".parse::<Response>().is_err());
        assert!("Always".parse::<Response>().is_err());
    }

    #[test]
    fn response_option_text() {
        assert_eq!(Response::Frequently.option_text(), "3: Frequently (75%)");
        assert_eq!(Response::Unable.option_text(), "0: Unable");
    }

    #[test]
    fn pronouns_follow_sex() {
        assert_eq!(Sex::Male.pronouns().possessive, "his");
        assert_eq!(Sex::Female.pronouns().object, "her");
        assert_eq!(Sex::Unspecified.pronouns().subject, "they");
        assert_eq!("F".parse::<Sex>().unwrap(), Sex::Female);
    }

    #[test]
    fn user_details_serde_defaults() {
        let details: UserDetails = toml::from_str("child_first_name = \"Sam\"\n").unwrap();
        assert_eq!(details.child_full_name(), "Sam");
        assert_eq!(details.sex, Sex::Unspecified);
        assert!(details.therapist.is_empty());
    }

    #[test]
    fn details_file_sex_matches_typed_input() {
        for (value, expected) in [
            ("Female", Sex::Female),
            ("F", Sex::Female),
            ("girl", Sex::Female),
            ("MALE", Sex::Male),
            ("other", Sex::Unspecified),
        ] {
            let details: UserDetails =
                toml::from_str(&format!("child_first_name = \"Sam\"\nsex = \"{value}\"\n"))
                    .unwrap();
            assert_eq!(details.sex, expected, "sex = {value:?}");
            assert_eq!(value.parse::<Sex>().unwrap(), expected);
        }
    }

    #[test]
    fn unknown_sex_in_details_is_rejected() {
        let err = toml::from_str::<UserDetails>("child_first_name = \"Sam\"\nsex = \"nonbinary\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("unknown sex: nonbinary"));
    }

    #[test]
    fn sex_serializes_in_lowercase_and_reads_back() {
        let details = UserDetails {
            child_first_name: "Sam".into(),
            sex: Sex::Female,
            ..Default::default()
        };
        let text = toml::to_string(&details).unwrap();
        assert!(text.contains("sex = \"female\""));
        let back: UserDetails = toml::from_str(&text).unwrap();
        assert_eq!(back, details);
    }

    #[test]
    fn answer_keys_order_by_domain_then_category() {
        let mut keys = vec![
            AnswerKey::new(Domain::Iadl, "Travelling", 1),
            AnswerKey::new(Domain::Adl, "Feeding", 2),
            AnswerKey::new(Domain::Adl, "Dressing", 10),
            AnswerKey::new(Domain::Adl, "Dressing", 2),
        ];
        keys.sort();
        assert_eq!(keys[0], AnswerKey::new(Domain::Adl, "Dressing", 2));
        assert_eq!(keys[3].domain, Domain::Iadl);
    }
}

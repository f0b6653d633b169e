//! CSV question file parser and responses file store.
//!
//! Question files hold one category each, with at least `no` and
//! `question_prompt` columns. The responses file is rewritten in full on
//! every save.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SurveyError;
use crate::model::{AnswerKey, Domain, Question, Responses};

#[derive(Debug, Deserialize)]
struct QuestionRow {
    no: String,
    question_prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ResponseRow {
    #[serde(rename = "Domain")]
    domain: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Question No")]
    question_no: u32,
    #[serde(rename = "Response")]
    response: String,
}

/// Decode file bytes as UTF-8, falling back to Latin-1.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!("input is not valid UTF-8, decoding as Latin-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Parse a single question file.
pub fn parse_questions(path: &Path) -> Result<Vec<Question>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read question file: {}", path.display()))?;

    parse_questions_str(&decode_text(bytes), path)
}

/// Parse question CSV text (useful for testing).
pub fn parse_questions_str(content: &str, source_path: &Path) -> Result<Vec<Question>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut questions = Vec::new();
    for (line, record) in reader.deserialize::<QuestionRow>().enumerate() {
        let row = record
            .with_context(|| format!("failed to parse CSV: {}", source_path.display()))?;
        let no = row
            .no
            .trim_end_matches('.')
            .parse::<u32>()
            .with_context(|| {
                format!(
                    "{}: row {} has invalid question number {:?}",
                    source_path.display(),
                    line + 1,
                    row.no
                )
            })?;
        questions.push(Question {
            no,
            prompt: row.question_prompt,
        });
    }

    Ok(questions)
}

/// Questions loaded leniently, with the failure message if loading failed.
#[derive(Debug, Clone, Default)]
pub struct LoadedQuestions {
    pub questions: Vec<Question>,
    pub warning: Option<String>,
}

/// Load a question file, substituting an empty list when it cannot be parsed.
pub fn load_questions_lenient(path: &Path) -> LoadedQuestions {
    match parse_questions(path) {
        Ok(questions) => LoadedQuestions {
            questions,
            warning: None,
        },
        Err(e) => {
            let error = SurveyError::QuestionFile {
                path: path.display().to_string(),
                message: format!("{e:#}"),
            };
            tracing::warn!("{error}, skipping");
            LoadedQuestions {
                questions: Vec::new(),
                warning: Some(error.to_string()),
            }
        }
    }
}

/// Write every response to `path`, replacing the previous contents.
pub fn save_responses(path: &Path, responses: &Responses) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open responses file: {}", path.display()))?;
    for (key, response) in responses {
        writer.serialize(ResponseRow {
            domain: key.domain.to_string(),
            category: key.category.clone(),
            question_no: key.question_no,
            response: response.clone(),
        })?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write responses to {}", path.display()))?;
    Ok(())
}

/// Load a responses file written by [`save_responses`].
pub fn load_responses(path: &Path) -> Result<Responses> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read responses file: {}", path.display()))?;
    let content = decode_text(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut responses = Responses::new();
    for record in reader.deserialize::<ResponseRow>() {
        let row =
            record.with_context(|| format!("failed to parse CSV: {}", path.display()))?;
        let domain: Domain = row
            .domain
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{}: {}", path.display(), e))?;
        responses.insert(
            AnswerKey::new(domain, row.category, row.question_no),
            row.response,
        );
    }

    Ok(responses)
}

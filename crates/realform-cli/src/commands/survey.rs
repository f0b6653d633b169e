//! The `realform survey` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use realform_core::config::load_config_from;
use realform_core::model::{AnswerKey, Response, Responses, Sex, UserDetails};
use realform_core::parser::{load_responses, save_responses};
use realform_core::plan::SurveyPlan;
use realform_core::report::SurveyReport;
use realform_core::scoring::stored_response;
use realform_core::session::{ResponseSink, SessionState, SurveySession};

/// Rewrites the responses file after every answer.
struct CsvSink {
    path: PathBuf,
}

impl ResponseSink for CsvSink {
    fn on_response(&mut self, responses: &Responses) -> Result<()> {
        save_responses(&self.path, responses)
    }
}

pub fn execute(
    config_path: Option<PathBuf>,
    questions_dir: Option<PathBuf>,
    responses_path: Option<PathBuf>,
    resume: bool,
    format: String,
    output: Option<PathBuf>,
    show_scores: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let questions_dir = questions_dir.unwrap_or(config.questions_dir);
    let responses_path = responses_path.unwrap_or(config.responses_file);
    let output = output.unwrap_or(config.output_dir);
    let show_scores = show_scores || config.show_scores;

    let plan = SurveyPlan::load(&questions_dir, &config.sections);
    for warning in &plan.load_warnings {
        eprintln!("WARNING: {warning}");
    }
    anyhow::ensure!(
        plan.question_count() > 0,
        "no questions found in {}",
        questions_dir.display()
    );

    let earlier = if resume && responses_path.exists() {
        let loaded = load_responses(&responses_path)?;
        eprintln!(
            "Resuming with {} earlier answer(s) from {}",
            loaded.len(),
            responses_path.display()
        );
        loaded
    } else {
        Responses::new()
    };

    let mut session = SurveySession::new(plan).with_responses(earlier.clone());
    tracing::info!(
        session = %session.id(),
        questions = session.plan().question_count(),
        "starting survey"
    );
    let mut sink = CsvSink {
        path: responses_path,
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let report = run_survey(
        &mut session,
        &earlier,
        &mut sink,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;

    println!();
    super::emit_report(&report, &format, Some(&output), show_scores)
}

/// Drive a session from line-oriented input to a finished report.
///
/// Questions already present in `earlier` are answered from it without
/// prompting, read the same way the report scores them. Stored text that
/// scores as nothing is asked again.
pub(crate) fn run_survey<R: BufRead, W: Write>(
    session: &mut SurveySession,
    earlier: &Responses,
    sink: &mut dyn ResponseSink,
    input: &mut R,
    out: &mut W,
) -> Result<SurveyReport> {
    let details = collect_details(input, out)?;
    session.submit_details(details)?;

    loop {
        match session.state() {
            SessionState::AnsweringQuestion { .. } => {
                let Some(prompt) = session.current_prompt() else {
                    anyhow::bail!("no question to answer");
                };
                let key = AnswerKey::new(
                    prompt.section.domain,
                    prompt.section.category.clone(),
                    prompt.question.no,
                );
                let stored = earlier.get(&key).and_then(|s| stored_response(s));
                let response = match stored {
                    Some(r) => r,
                    None => {
                        if prompt.position == 1 {
                            writeln!(out, "\nCategory: {}", prompt.section.category)?;
                        }
                        writeln!(out, "{}", prompt.progress())?;
                        writeln!(out, "{}. {}", prompt.question.no, prompt.question.prompt)?;
                        for option in Response::ALL {
                            writeln!(out, "  {}", option.option_text())?;
                        }
                        ask_response(input, out)?
                    }
                };
                session.answer(response, sink)?;
            }
            SessionState::CategoryComplete { .. } => {
                if let Some(section) = session.completed_category() {
                    writeln!(out, "You have completed the {} category!", section.category)?;
                }
                session.next_category()?;
            }
            SessionState::SurveyComplete => {
                writeln!(out, "\nYou have completed the entire survey!")?;
                return Ok(session.view_report()?);
            }
            SessionState::CollectingDetails | SessionState::ViewingReport => {
                anyhow::bail!("survey left in unexpected state: {}", session.state());
            }
        }
    }
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<String> {
    write!(out, "{label}: ")?;
    out.flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    anyhow::ensure!(read > 0, "input ended before the survey was complete");
    Ok(line.trim().to_string())
}

fn collect_details<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<UserDetails> {
    writeln!(out, "Please enter the child's details.")?;

    let child_first_name = loop {
        let name = read_answer(input, out, "Child's first name")?;
        if !name.is_empty() {
            break name;
        }
        writeln!(out, "A first name is required.")?;
    };
    let child_last_name = read_answer(input, out, "Child's last name")?;
    let completed_by = read_answer(input, out, "Completed by")?;
    let relationship = read_answer(input, out, "Relationship to child")?;
    let therapist = read_answer(input, out, "Evaluating therapist")?;
    let sex = loop {
        let answer = read_answer(input, out, "Sex (male/female/other)")?;
        match answer.parse::<Sex>() {
            Ok(sex) => break sex,
            Err(_) => writeln!(out, "Please enter male, female or other.")?,
        }
    };

    Ok(UserDetails {
        child_first_name,
        child_last_name,
        completed_by,
        relationship,
        therapist,
        sex,
    })
}

fn ask_response<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Response> {
    loop {
        let answer = read_answer(input, out, "Answer")?;
        match answer.parse::<Response>() {
            Ok(response) => return Ok(response),
            Err(_) => writeln!(out, "Please enter 0, 1, 2 or 3.")?,
        }
    }
}

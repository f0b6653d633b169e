//! Survey session state machine.
//!
//! A session owns its plan, the respondent's details, and the accumulated
//! responses. Every step is an explicit transition; calling an action from a
//! state that does not allow it returns [`SurveyError::InvalidTransition`]
//! and leaves the session untouched.

use std::fmt;

use uuid::Uuid;

use crate::error::SurveyError;
use crate::model::{AnswerKey, Question, Response, Responses, UserDetails};
use crate::plan::{Section, SurveyPlan};
use crate::report::{build_report, SurveyReport};

/// Where the session is in the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    CollectingDetails,
    AnsweringQuestion { section: usize, index: usize },
    CategoryComplete { section: usize },
    SurveyComplete,
    ViewingReport,
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::CollectingDetails => "collecting details",
            SessionState::AnsweringQuestion { .. } => "answering a question",
            SessionState::CategoryComplete { .. } => "a category is complete",
            SessionState::SurveyComplete => "the survey is complete",
            SessionState::ViewingReport => "viewing the report",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The question currently awaiting an answer.
#[derive(Debug, Clone, Copy)]
pub struct Prompt<'a> {
    pub section: &'a Section,
    pub question: &'a Question,
    /// 1-based position within the category.
    pub position: usize,
    pub total: usize,
}

impl Prompt<'_> {
    /// e.g. `"Question 3 of 20"`.
    pub fn progress(&self) -> String {
        format!("Question {} of {}", self.position, self.total)
    }
}

/// Receives the full response set after every recorded answer.
pub trait ResponseSink {
    fn on_response(&mut self, responses: &Responses) -> anyhow::Result<()>;
}

/// Sink that discards updates.
pub struct NoopSink;

impl ResponseSink for NoopSink {
    fn on_response(&mut self, _: &Responses) -> anyhow::Result<()> {
        Ok(())
    }
}

/// One respondent's pass through the survey.
pub struct SurveySession {
    id: Uuid,
    plan: SurveyPlan,
    state: SessionState,
    details: Option<UserDetails>,
    responses: Responses,
}

impl SurveySession {
    pub fn new(plan: SurveyPlan) -> Self {
        Self {
            id: Uuid::new_v4(),
            plan,
            state: SessionState::CollectingDetails,
            details: None,
            responses: Responses::new(),
        }
    }

    /// Start a session with previously saved responses. Re-answering a
    /// question overwrites its stored response.
    pub fn with_responses(mut self, responses: Responses) -> Self {
        self.responses = responses;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn plan(&self) -> &SurveyPlan {
        &self.plan
    }

    pub fn details(&self) -> Option<&UserDetails> {
        self.details.as_ref()
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    fn invalid(&self, action: &'static str) -> SurveyError {
        SurveyError::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }

    /// State reached when entering section `section` (or past the end).
    fn enter_section(&self, section: usize) -> SessionState {
        match self.plan.sections.get(section) {
            None => SessionState::SurveyComplete,
            Some(s) if s.questions.is_empty() => SessionState::CategoryComplete { section },
            Some(_) => SessionState::AnsweringQuestion { section, index: 0 },
        }
    }

    /// Record the respondent's details and move to the first question.
    pub fn submit_details(&mut self, details: UserDetails) -> Result<SessionState, SurveyError> {
        if self.state != SessionState::CollectingDetails {
            return Err(self.invalid("submit details"));
        }
        self.details = Some(details);
        self.state = self.enter_section(0);
        tracing::info!(session = %self.id, "details recorded, survey started");
        Ok(self.state)
    }

    /// The question awaiting an answer, if any.
    pub fn current_prompt(&self) -> Option<Prompt<'_>> {
        let SessionState::AnsweringQuestion { section, index } = self.state else {
            return None;
        };
        let s = &self.plan.sections[section];
        Some(Prompt {
            section: s,
            question: &s.questions[index],
            position: index + 1,
            total: s.questions.len(),
        })
    }

    /// Record an answer to the current question and advance.
    ///
    /// A sink failure is returned as [`SurveyError::Persistence`] after the
    /// answer has been recorded in memory.
    pub fn answer(
        &mut self,
        response: Response,
        sink: &mut dyn ResponseSink,
    ) -> Result<SessionState, SurveyError> {
        let SessionState::AnsweringQuestion { section, index } = self.state else {
            return Err(self.invalid("answer a question"));
        };
        let s = &self.plan.sections[section];
        let key = AnswerKey::new(s.domain, s.category.clone(), s.questions[index].no);
        let next = if index + 1 < s.questions.len() {
            SessionState::AnsweringQuestion {
                section,
                index: index + 1,
            }
        } else {
            SessionState::CategoryComplete { section }
        };

        tracing::debug!(
            session = %self.id,
            category = %key.category,
            question = key.question_no,
            response = response.label(),
            "answer recorded"
        );
        self.responses.insert(key, response.option_text());
        self.state = next;

        sink.on_response(&self.responses).map_err(|e| {
            tracing::error!(session = %self.id, "failed to persist responses: {e:#}");
            SurveyError::Persistence(format!("{e:#}"))
        })?;
        Ok(self.state)
    }

    /// The category just finished, when in `CategoryComplete`.
    pub fn completed_category(&self) -> Option<&Section> {
        match self.state {
            SessionState::CategoryComplete { section } => self.plan.sections.get(section),
            _ => None,
        }
    }

    /// Whether another category follows the one just completed.
    pub fn has_next_category(&self) -> bool {
        match self.state {
            SessionState::CategoryComplete { section } => section + 1 < self.plan.sections.len(),
            _ => false,
        }
    }

    /// Leave a completed category for the next one, or finish the survey.
    pub fn next_category(&mut self) -> Result<SessionState, SurveyError> {
        let SessionState::CategoryComplete { section } = self.state else {
            return Err(self.invalid("move to the next category"));
        };
        self.state = self.enter_section(section + 1);
        if self.state == SessionState::SurveyComplete {
            tracing::info!(
                session = %self.id,
                responses = self.responses.len(),
                "survey complete"
            );
        }
        Ok(self.state)
    }

    /// Build the report for a completed survey.
    ///
    /// On error the state is unchanged so the caller can surface the message.
    pub fn view_report(&mut self) -> Result<SurveyReport, SurveyError> {
        if !matches!(
            self.state,
            SessionState::SurveyComplete | SessionState::ViewingReport
        ) {
            return Err(self.invalid("view the report"));
        }
        let details = self.details.clone().unwrap_or_default();
        let report = build_report(&self.responses, &details)?;
        self.state = SessionState::ViewingReport;
        Ok(report)
    }
}

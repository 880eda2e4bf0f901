//! Session state machine — the single owner and sole mutator of the
//! screening session.
//!
//! The workflow is an explicit transition function over discrete user
//! events: `Unauthenticated -> Intake -> Generating -> Answering(0..N) ->
//! Scoring -> Results`. The host adapter delivers one event at a time and
//! never touches session fields directly, so the machine is testable
//! without any HTTP harness. All I/O happens in the collaborators it
//! invokes (generative backend via the screening engine); the machine
//! itself only sequences.

pub mod handlers;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::auth::CredentialCheck;
use crate::errors::AppError;
use crate::screening::ScreeningEngine;

/// Position of the session in the fixed workflow sequence.
///
/// `Generating` and `Scoring` are passed through inside a single
/// synchronous transition; they are never the resting stage between
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Unauthenticated,
    Intake,
    Generating,
    Answering,
    Scoring,
    Results,
}

/// One discrete user action delivered into the state machine.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Authenticate {
        password: String,
    },
    SubmitIntake {
        job_description: String,
        resume_text: String,
    },
    /// Navigate to the previous question, persisting the current draft first.
    Previous {
        draft_answer: String,
    },
    /// Navigate to the next question, persisting the current draft first.
    Next {
        draft_answer: String,
    },
    /// Persist the final draft, score every question, enter Results.
    Finish {
        draft_answer: String,
    },
}

/// The single in-memory record of one end-to-end screening interview.
///
/// Invariants, upheld exclusively by `apply`:
/// - `questions` is never mutated after generation;
/// - `answers`, `scores`, `explanations` keys stay within
///   `0..questions.len()`;
/// - `scores`/`explanations` are populated for all indices or none;
/// - every score value lies in `1..=10`.
#[derive(Debug, Clone)]
pub struct Session {
    pub stage: Stage,
    pub job_description: String,
    pub resume_text: String,
    pub questions: Vec<String>,
    pub answers: BTreeMap<usize, String>,
    pub current_index: usize,
    pub scores: BTreeMap<usize, u8>,
    pub explanations: BTreeMap<usize, String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            stage: Stage::Unauthenticated,
            job_description: String::new(),
            resume_text: String::new(),
            questions: Vec::new(),
            answers: BTreeMap::new(),
            current_index: 0,
            scores: BTreeMap::new(),
            explanations: BTreeMap::new(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies one event to the session. Illegal events are rejected with an
/// error and leave the session unchanged; legal events advance it per the
/// fixed stage sequence. Results is terminal: persistence is a separate
/// user action handled outside the machine.
pub async fn apply(
    session: &mut Session,
    event: SessionEvent,
    engine: &ScreeningEngine,
    credentials: &dyn CredentialCheck,
) -> Result<(), AppError> {
    match (session.stage, event) {
        (Stage::Unauthenticated, SessionEvent::Authenticate { password }) => {
            if !credentials.verify(&password) {
                return Err(AppError::Unauthorized);
            }
            session.stage = Stage::Intake;
            info!("Session authenticated");
            Ok(())
        }

        (Stage::Intake, SessionEvent::SubmitIntake { job_description, resume_text }) => {
            if job_description.trim().is_empty() || resume_text.trim().is_empty() {
                return Err(AppError::Validation(
                    "Both a job description and a resume are required".to_string(),
                ));
            }

            session.stage = Stage::Generating;
            let questions = engine.generate_questions(&job_description, &resume_text).await;

            if questions.is_empty() {
                session.stage = Stage::Intake;
                return Err(AppError::Validation(
                    "No interview questions could be generated from these inputs".to_string(),
                ));
            }

            info!("Generated {} interview questions", questions.len());
            session.job_description = job_description;
            session.resume_text = resume_text;
            session.questions = questions;
            session.answers.clear();
            session.scores.clear();
            session.explanations.clear();
            session.current_index = 0;
            session.stage = Stage::Answering;
            Ok(())
        }

        (Stage::Answering, SessionEvent::Previous { draft_answer }) => {
            if session.current_index == 0 {
                return Err(AppError::Validation(
                    "Already at the first question".to_string(),
                ));
            }
            session.answers.insert(session.current_index, draft_answer);
            session.current_index -= 1;
            Ok(())
        }

        (Stage::Answering, SessionEvent::Next { draft_answer }) => {
            if session.current_index + 1 >= session.questions.len() {
                return Err(AppError::Validation(
                    "Already at the last question; finish the interview instead".to_string(),
                ));
            }
            session.answers.insert(session.current_index, draft_answer);
            session.current_index += 1;
            Ok(())
        }

        (Stage::Answering, SessionEvent::Finish { draft_answer }) => {
            session.answers.insert(session.current_index, draft_answer);

            session.stage = Stage::Scoring;
            let (scores, explanations) =
                engine.score_all(&session.questions, &session.answers).await;

            session.scores = scores;
            session.explanations = explanations;
            session.stage = Stage::Results;
            info!("Scoring complete for {} questions", session.questions.len());
            Ok(())
        }

        (stage, event) => Err(AppError::Validation(format!(
            "Event {} is not valid in the {stage:?} stage",
            event_name(&event)
        ))),
    }
}

fn event_name(event: &SessionEvent) -> &'static str {
    match event {
        SessionEvent::Authenticate { .. } => "authenticate",
        SessionEvent::SubmitIntake { .. } => "intake",
        SessionEvent::Previous { .. } => "previous",
        SessionEvent::Next { .. } => "next",
        SessionEvent::Finish { .. } => "finish",
    }
}

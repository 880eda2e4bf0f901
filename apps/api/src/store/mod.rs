//! Persistence gateway — two independent sinks for a completed session:
//! a JSON snapshot file and a relational row. Either can fail without
//! touching the in-memory session; a failed save is retryable by
//! repeating the user action.

pub mod snapshot;
pub mod sql;

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Self-contained record of one completed session, shared by both sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub job_description: String,
    pub resume_text: String,
    pub questions: Vec<String>,
    pub answers: BTreeMap<usize, String>,
    pub scores: BTreeMap<usize, u8>,
    pub explanations: BTreeMap<usize, String>,
    /// ISO-8601, captured at record creation.
    pub timestamp: String,
}

impl SessionRecord {
    pub fn from_session(session: &Session) -> Self {
        Self {
            job_description: session.job_description.clone(),
            resume_text: session.resume_text.clone(),
            questions: session.questions.clone(),
            answers: session.answers.clone(),
            scores: session.scores.clone(),
            explanations: session.explanations.clone(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

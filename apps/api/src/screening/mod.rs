//! Screening engine — question generation and answer scoring over the
//! generative backend. The session state machine calls only this facade;
//! the per-concern logic (and its pure, testable parts) lives in the
//! submodules.

pub mod questions;
pub mod results;
pub mod scoring;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::llm_client::GenerativeBackend;

/// Facade over the generative backend, carried in `AppState`.
#[derive(Clone)]
pub struct ScreeningEngine {
    backend: Arc<dyn GenerativeBackend>,
}

impl ScreeningEngine {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    /// Generates at most 3 tailored interview questions.
    /// Returns an empty list when the backend fails or produces nothing usable.
    pub async fn generate_questions(&self, job_description: &str, resume_text: &str) -> Vec<String> {
        questions::generate(self.backend.as_ref(), job_description, resume_text).await
    }

    /// Scores every question index in ascending order. Unanswered questions
    /// are scored with an empty answer; a failed call records its fallback
    /// and the pass continues.
    pub async fn score_all(
        &self,
        questions: &[String],
        answers: &BTreeMap<usize, String>,
    ) -> (BTreeMap<usize, u8>, BTreeMap<usize, String>) {
        scoring::score_all(self.backend.as_ref(), questions, answers).await
    }
}

//! Result aggregation — summary statistics and per-question display rows
//! for a completed session.

use serde::Serialize;

use crate::session::Session;

/// Defaults substituted when a row entry is unexpectedly missing. The
/// all-or-nothing scoring pass should make these unreachable.
pub const MISSING_SCORE: u8 = 6;
pub const MISSING_EXPLANATION: &str = "The system had trouble evaluating this one.";

#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    pub index: usize,
    pub question: String,
    pub answer: String,
    pub score: u8,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsSummary {
    /// Average of all recorded scores, rounded to one decimal place.
    /// `None` means no score is available.
    pub average_score: Option<f64>,
    pub rows: Vec<ResultRow>,
}

/// Builds the results summary from a session.
pub fn summarize(session: &Session) -> ResultsSummary {
    ResultsSummary {
        average_score: average(session.scores.values().copied()),
        rows: rows(session),
    }
}

/// Average rounded to one decimal place; `None` for an empty score set
/// (no division is performed).
fn average(scores: impl ExactSizeIterator<Item = u8>) -> Option<f64> {
    let count = scores.len();
    if count == 0 {
        return None;
    }
    let total: u32 = scores.map(u32::from).sum();
    Some((total as f64 / count as f64 * 10.0).round() / 10.0)
}

fn rows(session: &Session) -> Vec<ResultRow> {
    session
        .questions
        .iter()
        .enumerate()
        .map(|(idx, question)| ResultRow {
            index: idx,
            question: question.clone(),
            answer: session.answers.get(&idx).cloned().unwrap_or_default(),
            score: session.scores.get(&idx).copied().unwrap_or(MISSING_SCORE),
            explanation: session
                .explanations
                .get(&idx)
                .cloned()
                .unwrap_or_else(|| MISSING_EXPLANATION.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Stage;
    use std::collections::BTreeMap;

    fn completed_session() -> Session {
        Session {
            stage: Stage::Results,
            job_description: "jd".to_string(),
            resume_text: "resume".to_string(),
            questions: vec!["q0".to_string(), "q1".to_string(), "q2".to_string()],
            answers: BTreeMap::from([(0, "a0".to_string()), (1, "a1".to_string())]),
            current_index: 2,
            scores: BTreeMap::from([(0, 8), (1, 6), (2, 10)]),
            explanations: BTreeMap::from([
                (0, "good".to_string()),
                (1, "ok".to_string()),
                (2, "excellent".to_string()),
            ]),
        }
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let summary = summarize(&completed_session());
        assert_eq!(summary.average_score, Some(8.0));
    }

    #[test]
    fn test_average_uneven_division() {
        let mut session = completed_session();
        session.scores = BTreeMap::from([(0, 8), (1, 6), (2, 5)]);
        // 19 / 3 = 6.333... -> 6.3
        assert_eq!(summarize(&session).average_score, Some(6.3));
    }

    #[test]
    fn test_empty_scores_yield_no_average() {
        let mut session = completed_session();
        session.scores.clear();
        session.explanations.clear();
        assert_eq!(summarize(&session).average_score, None);
    }

    #[test]
    fn test_rows_pair_question_answer_score_explanation() {
        let summary = summarize(&completed_session());
        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.rows[0].question, "q0");
        assert_eq!(summary.rows[0].answer, "a0");
        assert_eq!(summary.rows[0].score, 8);
        assert_eq!(summary.rows[0].explanation, "good");
    }

    #[test]
    fn test_rows_default_missing_answer_to_empty() {
        let summary = summarize(&completed_session());
        assert_eq!(summary.rows[2].answer, "");
    }

    #[test]
    fn test_rows_defensive_defaults_for_missing_entries() {
        let mut session = completed_session();
        session.scores.remove(&1);
        session.explanations.remove(&1);
        let summary = summarize(&session);
        assert_eq!(summary.rows[1].score, MISSING_SCORE);
        assert_eq!(summary.rows[1].explanation, MISSING_EXPLANATION);
    }
}

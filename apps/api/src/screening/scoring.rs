//! Answer scoring — converts one (question, answer) pair into a bounded
//! integer score plus explanation, with deterministic fallbacks.
//!
//! The parse rule is deliberately narrow: a single leading digit plus the
//! remainder of the reply. It lives in a pure function so the fallback and
//! clamping behavior is unit-testable without any generative call.

use std::collections::BTreeMap;

use tracing::warn;

use crate::llm_client::prompts::render_score_answer;
use crate::llm_client::GenerativeBackend;

/// Fixed score substituted when the reply cannot be parsed or the call fails.
pub const FALLBACK_SCORE: u8 = 6;

/// Explanation used when the reply did not match the expected shape.
pub const UNPARSEABLE_EXPLANATION: &str =
    "Good attempt! The answer was somewhat clear and relevant.";

/// Explanation used when the generative call itself failed. Same numeric
/// fallback, distinct text: a transport failure is diagnostically different
/// from a reply the parser rejected.
pub const CALL_FAILED_EXPLANATION: &str = "The AI had trouble evaluating this one.";

/// Parses a raw scoring reply into `(score, explanation)`.
///
/// A trimmed reply of at least 2 characters whose first character is a
/// decimal digit parses that digit as the raw score and the remainder
/// (from the third character, trimmed) as the explanation. Anything else
/// takes the fixed fallback. The clamp into `[1, 10]` runs unconditionally
/// as the final step.
///
/// Known quirk, preserved from the original evaluator: only the first
/// character is read, so a reply starting with "10" parses as score 1.
pub fn parse_score_reply(content: &str) -> (u8, String) {
    let content = content.trim();
    let first = content.chars().next();

    let (raw, explanation) = match first {
        Some(c) if c.is_ascii_digit() && content.chars().count() >= 2 => {
            let rest: String = content.chars().skip(2).collect();
            (c as u8 - b'0', rest.trim().to_string())
        }
        _ => (FALLBACK_SCORE, UNPARSEABLE_EXPLANATION.to_string()),
    };

    (raw.clamp(1, 10), explanation)
}

/// Scores a single answer. Never fails: call-level errors take the fixed
/// fallback with the evaluation-trouble explanation.
pub async fn score(backend: &dyn GenerativeBackend, question: &str, answer: &str) -> (u8, String) {
    let prompt = render_score_answer(question, answer);

    match backend.complete(&prompt).await {
        Ok(content) => parse_score_reply(&content),
        Err(e) => {
            warn!("Error scoring answer: {e}");
            (FALLBACK_SCORE, CALL_FAILED_EXPLANATION.to_string())
        }
    }
}

/// Scores every question index in ascending order. An unanswered index is
/// scored with an empty answer. There is no early-termination path: a failed
/// call records its fallback and the pass continues, so both maps come back
/// populated for every index.
pub async fn score_all(
    backend: &dyn GenerativeBackend,
    questions: &[String],
    answers: &BTreeMap<usize, String>,
) -> (BTreeMap<usize, u8>, BTreeMap<usize, String>) {
    let mut scores = BTreeMap::new();
    let mut explanations = BTreeMap::new();

    for (idx, question) in questions.iter().enumerate() {
        let answer = answers.get(&idx).map(String::as_str).unwrap_or("");
        let (score_value, explanation) = score(backend, question, answer).await;
        scores.insert(idx, score_value);
        explanations.insert(idx, explanation);
    }

    (scores, explanations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedBackend {
        replies: Mutex<Vec<Result<String, LlmError>>>,
    }

    impl ScriptedBackend {
        fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
            }
        }
    }

    #[async_trait]
    impl GenerativeBackend for ScriptedBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            self.replies
                .lock()
                .unwrap()
                .remove(0)
        }
    }

    #[test]
    fn test_parse_well_formed_reply() {
        let (score, explanation) = parse_score_reply("8 - clear and concise");
        assert_eq!(score, 8);
        assert_eq!(explanation, "- clear and concise");
    }

    #[test]
    fn test_parse_digit_space_explanation() {
        let (score, explanation) = parse_score_reply("8 clear and concise");
        assert_eq!(score, 8);
        assert_eq!(explanation, "clear and concise");
    }

    #[test]
    fn test_parse_no_leading_digit_takes_fallback() {
        let (score, explanation) = parse_score_reply("Great job answering");
        assert_eq!(score, FALLBACK_SCORE);
        assert_eq!(explanation, UNPARSEABLE_EXPLANATION);
    }

    #[test]
    fn test_parse_too_short_takes_fallback() {
        let (score, explanation) = parse_score_reply("8");
        assert_eq!(score, FALLBACK_SCORE);
        assert_eq!(explanation, UNPARSEABLE_EXPLANATION);

        let (score, _) = parse_score_reply("");
        assert_eq!(score, FALLBACK_SCORE);
    }

    #[test]
    fn test_parse_ten_reads_only_first_digit() {
        // The documented quirk: "10" is read as digit 1, not ten.
        let (score, explanation) = parse_score_reply("10 - excellent");
        assert_eq!(score, 1);
        assert_eq!(explanation, "- excellent");
    }

    #[test]
    fn test_parse_zero_clamps_to_one() {
        let (score, _) = parse_score_reply("0 no relevant content");
        assert_eq!(score, 1);
    }

    #[test]
    fn test_parse_nine_stays_nine() {
        let (score, _) = parse_score_reply("9 thorough");
        assert_eq!(score, 9);
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let (score, explanation) = parse_score_reply("  7 solid reasoning  \n");
        assert_eq!(score, 7);
        assert_eq!(explanation, "solid reasoning");
    }

    #[test]
    fn test_parse_multibyte_explanation() {
        let (score, explanation) = parse_score_reply("7 très bien");
        assert_eq!(score, 7);
        assert_eq!(explanation, "très bien");
    }

    #[test]
    fn test_score_always_in_range() {
        for content in ["", "x", "0 a", "5 b", "9 c", "10 d", "no digit here", "??"] {
            let (score, _) = parse_score_reply(content);
            assert!(
                (1..=10).contains(&score),
                "score {score} out of range for {content:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_score_call_failure_uses_distinct_explanation() {
        let backend = ScriptedBackend::new(vec![Err(LlmError::EmptyContent)]);
        let (score, explanation) = score(&backend, "q", "a").await;
        assert_eq!(score, FALLBACK_SCORE);
        assert_eq!(explanation, CALL_FAILED_EXPLANATION);
    }

    #[tokio::test]
    async fn test_score_all_is_all_or_nothing_under_failure() {
        // Middle call fails; the pass continues and every index gets values.
        let backend = ScriptedBackend::new(vec![
            Ok("8 good".to_string()),
            Err(LlmError::EmptyContent),
            Ok("4 thin".to_string()),
        ]);
        let questions = vec!["q0".to_string(), "q1".to_string(), "q2".to_string()];
        let answers = BTreeMap::from([(0, "a0".to_string()), (2, "a2".to_string())]);

        let (scores, explanations) = score_all(&backend, &questions, &answers).await;

        assert_eq!(scores.len(), questions.len());
        assert_eq!(explanations.len(), questions.len());
        assert_eq!(scores[&0], 8);
        assert_eq!(scores[&1], FALLBACK_SCORE);
        assert_eq!(explanations[&1], CALL_FAILED_EXPLANATION);
        assert_eq!(scores[&2], 4);
    }

    #[tokio::test]
    async fn test_score_all_scores_unanswered_as_empty() {
        struct AssertEmptyAnswer;

        #[async_trait]
        impl GenerativeBackend for AssertEmptyAnswer {
            async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
                assert!(prompt.contains("Candidate answer:\n\n"));
                Ok("3 no answer given".to_string())
            }
        }

        let questions = vec!["q0".to_string()];
        let (scores, _) = score_all(&AssertEmptyAnswer, &questions, &BTreeMap::new()).await;
        assert_eq!(scores[&0], 3);
    }
}

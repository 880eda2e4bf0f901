//! Question generation — turns a job description and a resume into at most
//! 3 tailored interview questions.

use tracing::warn;

use crate::llm_client::prompts::render_generate_questions;
use crate::llm_client::GenerativeBackend;

/// Inputs are truncated (not summarized) before prompt rendering to bound
/// the request size.
pub const JD_CHAR_LIMIT: usize = 3000;
pub const RESUME_CHAR_LIMIT: usize = 1500;

/// Upper bound on the question set; excess model output is dropped silently.
pub const MAX_QUESTIONS: usize = 3;

/// Generates the question set for one screening session.
///
/// Any failure of the underlying call yields an empty list; the caller
/// treats that as "no questions available", not an error.
pub async fn generate(
    backend: &dyn GenerativeBackend,
    job_description: &str,
    resume_text: &str,
) -> Vec<String> {
    let prompt = render_generate_questions(
        truncate_chars(job_description, JD_CHAR_LIMIT),
        truncate_chars(resume_text, RESUME_CHAR_LIMIT),
    );

    match backend.complete(&prompt).await {
        Ok(content) => split_questions(&content),
        Err(e) => {
            warn!("Error generating questions: {e}");
            Vec::new()
        }
    }
}

/// Truncates to at most `max` characters, never splitting a character.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Splits a completion into trimmed non-blank lines, keeping the first
/// `MAX_QUESTIONS`.
fn split_questions(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_QUESTIONS)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    struct FixedReply(&'static str);

    #[async_trait]
    impl GenerativeBackend for FixedReply {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl GenerativeBackend for AlwaysFails {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    #[test]
    fn test_split_questions_trims_and_drops_blanks() {
        let content = "  What is ownership?  \n\n   \nExplain lifetimes.\n";
        let questions = split_questions(content);
        assert_eq!(questions, vec!["What is ownership?", "Explain lifetimes."]);
    }

    #[test]
    fn test_split_questions_caps_at_three() {
        let content = "q1\nq2\nq3\nq4\nq5";
        let questions = split_questions(content);
        assert_eq!(questions, vec!["q1", "q2", "q3"]);
    }

    #[test]
    fn test_split_questions_empty_content() {
        assert!(split_questions("").is_empty());
        assert!(split_questions("   \n \n").is_empty());
    }

    #[test]
    fn test_truncate_chars_is_char_boundary_safe() {
        let s = "héllo wörld";
        assert_eq!(truncate_chars(s, 3), "hél");
        assert_eq!(truncate_chars(s, 100), s);
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_truncate_chars_counts_chars_not_bytes() {
        let s = "ééééé"; // 5 chars, 10 bytes
        assert_eq!(truncate_chars(s, 4).chars().count(), 4);
    }

    #[tokio::test]
    async fn test_generate_truncates_inputs_before_rendering() {
        struct CapturePromptLen;

        #[async_trait]
        impl GenerativeBackend for CapturePromptLen {
            async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
                // The rendered prompt must not contain the untruncated tail.
                assert!(!prompt.contains("TAIL_MARKER"));
                Ok("q1".to_string())
            }
        }

        let jd = format!("{}TAIL_MARKER", "j".repeat(JD_CHAR_LIMIT));
        let resume = format!("{}TAIL_MARKER", "r".repeat(RESUME_CHAR_LIMIT));
        let questions = generate(&CapturePromptLen, &jd, &resume).await;
        assert_eq!(questions, vec!["q1"]);
    }

    #[tokio::test]
    async fn test_generate_returns_empty_on_backend_failure() {
        let questions = generate(&AlwaysFails, "jd", "resume").await;
        assert!(questions.is_empty());
    }

    #[tokio::test]
    async fn test_generate_never_returns_more_than_three() {
        let questions = generate(&FixedReply("a\nb\nc\nd\ne\nf"), "jd", "resume").await;
        assert_eq!(questions.len(), MAX_QUESTIONS);
    }
}

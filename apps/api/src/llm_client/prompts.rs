// Prompt templates for the two generative calls the screening flow makes.
// Templates are embedded; placeholders are filled by plain string replacement.

/// Template for the question-generation call.
/// Placeholders: `{job_description}`, `{resume_text}`.
pub const GENERATE_QUESTIONS_TEMPLATE: &str = "\
You are an experienced technical recruiter preparing a screening interview.

Job description:
{job_description}

Candidate resume:
{resume_text}

Write exactly 3 interview questions tailored to this candidate and role. \
Each question must probe a specific overlap or gap between the resume and the job description. \
Output one question per line with no numbering, no preamble, and no commentary.";

/// Template for the answer-scoring call.
/// Placeholders: `{question}`, `{answer}`.
pub const SCORE_ANSWER_TEMPLATE: &str = "\
You are evaluating one answer from a candidate screening interview.

Question:
{question}

Candidate answer:
{answer}

Rate the answer from 1 to 10. Reply with the single digit first, then a space, \
then one short sentence explaining the rating. Example: \"8 clear and specific answer\". \
Output nothing else.";

/// Renders the question-generation prompt.
pub fn render_generate_questions(job_description: &str, resume_text: &str) -> String {
    GENERATE_QUESTIONS_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{resume_text}", resume_text)
}

/// Renders the answer-scoring prompt.
pub fn render_score_answer(question: &str, answer: &str) -> String {
    SCORE_ANSWER_TEMPLATE
        .replace("{question}", question)
        .replace("{answer}", answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_generate_questions_fills_both_placeholders() {
        let prompt = render_generate_questions("Rust engineer", "10 years of C");
        assert!(prompt.contains("Rust engineer"));
        assert!(prompt.contains("10 years of C"));
        assert!(!prompt.contains("{job_description}"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_render_score_answer_fills_both_placeholders() {
        let prompt = render_score_answer("Why Rust?", "Because of the borrow checker.");
        assert!(prompt.contains("Why Rust?"));
        assert!(prompt.contains("Because of the borrow checker."));
        assert!(!prompt.contains("{question}"));
        assert!(!prompt.contains("{answer}"));
    }

    #[test]
    fn test_render_handles_empty_answer() {
        let prompt = render_score_answer("Why Rust?", "");
        assert!(!prompt.contains("{answer}"));
    }
}

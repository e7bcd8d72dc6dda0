//! Prompt templating for the answer service.

/// Template for every answer request: fixed instruction, the configured
/// question, then the cleaned page text.
pub const ANSWER_PROMPT: &str = "Your role is to answer questions based on the provided HTML. Your answers are concise. WE COUNT ON YOU!\n\n# Question\n{question}\n\n# HTML:\n{content}";

/// Format the answer prompt with the user question and cleaned page text.
pub fn format_answer_prompt(question: &str, content: &str) -> String {
    ANSWER_PROMPT
        .replace("{question}", question)
        .replace("{content}", content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_answer_prompt() {
        let prompt = format_answer_prompt("What is the price?", "Plans start at $10.");

        assert!(prompt.starts_with("Your role is to answer questions"));
        assert!(prompt.contains("# Question\nWhat is the price?"));
        assert!(prompt.contains("# HTML:\nPlans start at $10."));
    }

    #[test]
    fn test_format_answer_prompt_leaves_no_placeholders() {
        let prompt = format_answer_prompt("q", "c");
        assert!(!prompt.contains("{question}"));
        assert!(!prompt.contains("{content}"));
    }
}

//! Prompt text sent to the model.

use promptvault_core::AssetKind;

/// Characters of content sent for auto-categorization.
pub const CATEGORIZE_EXCERPT_CHARS: usize = 500;

/// Request for a suggestion on `content`.
///
/// Ideas get a proposed prompt direction; prompts get a critique.
#[must_use]
pub fn suggestion_prompt(content: &str, kind: AssetKind) -> String {
    match kind {
        AssetKind::Idea => format!(
            "Role: Prompt Lifecycle Architect.\n\
             Task: Analyze the following idea and suggest a structured prompt direction.\n\
             Output: A short paragraph suggesting how to convert this idea into a robust prompt, \
             including suggested category and tags.\n\
             \n\
             Idea: \"{content}\""
        ),
        AssetKind::Prompt => format!(
            "Role: Prompt Lifecycle Architect.\n\
             Task: Analyze the following prompt for logic loopholes or improvements.\n\
             Output: Bullet points of concise critique and optimization suggestions.\n\
             \n\
             Prompt: \"{content}\""
        ),
    }
}

/// Request for a category from `categories` and up to three hashtags, as
/// JSON. Only the first [`CATEGORIZE_EXCERPT_CHARS`] characters are sent.
#[must_use]
pub fn categorize_prompt(content: &str, categories: &[&str]) -> String {
    format!(
        "Analyze this text and select the best matching category from the list: [{}].\n\
         Also generate up to 3 relevant hashtags.\n\
         Output JSON format: {{ \"category\": \"string\", \"tags\": [\"string\"] }}\n\
         \n\
         Text: \"{}\"",
        categories.join(", "),
        excerpt(content, CATEGORIZE_EXCERPT_CHARS)
    )
}

fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_depends_on_kind() {
        let idea = suggestion_prompt("a todo app", AssetKind::Idea);
        assert!(idea.contains("suggest a structured prompt direction"));
        assert!(idea.ends_with("Idea: \"a todo app\""));

        let prompt = suggestion_prompt("You are a bot", AssetKind::Prompt);
        assert!(prompt.contains("logic loopholes"));
        assert!(prompt.ends_with("Prompt: \"You are a bot\""));
    }

    #[test]
    fn categorize_lists_categories_and_truncates() {
        let long = "é".repeat(600);
        let prompt = categorize_prompt(&long, &["Coding", "Business"]);

        assert!(prompt.contains("[Coding, Business]"));
        assert!(prompt.contains(r#"{ "category": "string", "tags": ["string"] }"#));
        assert_eq!(prompt.matches('é').count(), 500);
    }

    #[test]
    fn short_content_is_sent_whole() {
        assert_eq!(excerpt("short", 500), "short");
        assert_eq!(excerpt("abcdef", 3), "abc");
    }
}

//! Prompt assembly
//!
//! Owns the enhancement prompt template and the codebase-context section.
//! The template has two slots: `{codebase_context}` (empty or the labeled
//! relevant-files section) and `{text}` (the developer's raw notes).

/// Default enhancement prompt template.
const ENHANCEMENT_TEMPLATE: &str = r#"You are an elite AI assistant for a software development team. Your role is to take a developer's raw, often stream-of-consciousness, notes and transform them into perfectly structured, actionable tasks suitable for a project management system like Jira or GitHub Issues. Your most important job is to identify distinct, separate topics or tasks within the user's text and break them down into a numbered list. For each task, create a bolded, descriptive title and use bullet points for the details. **Do not suggest code or implementation details.** Focus only on describing the problem and the context.
--- EXAMPLE OF PERFECT TRANSFORMATION ---
[BEGIN EXAMPLE]
**Developer's Raw Input:**
The user page is busted, it wont load their data. the endpoint seems slow. and the save button is just stuck on 'saving...' it never finishes. oh and also the search filter doesn't work for names with spaces in them.
**Your Perfectly Formatted Output:**
I've identified several issues that require attention:
**Task 1: User Profile Data Fails to Load**
-   The main profile page is not displaying user data upon loading.
-   Initial investigation suggests a performance issue or a failure in the backend data endpoint.
**Task 2: Save Action Does Not Complete on Profile Page**
-   When clicking the "Save" button, the button's state becomes stuck on "Saving..."
-   The operation never completes, and no success or error feedback is provided to the user.
**Task 3: Search Filter Fails with Multi-Word Input**
-   The search functionality does not correctly handle inputs that contain spaces.
-   For example, searching for "John Doe" fails, while searching for "John" may work as expected.
[END EXAMPLE]
---
{codebase_context}Now, using the exact same professional format and quality, process the developer's actual text provided below.
**Developer's Actual Text to Process:**
---
{text}
---
**Your Enhanced Output:**
"#;

/// Wrap a non-empty relevance block into the labeled codebase section.
///
/// An empty block produces no section at all; the prompt then proceeds
/// without any codebase framing.
pub fn format_context_section(relevance_block: &str) -> String {
    if relevance_block.is_empty() {
        return String::new();
    }

    format!(
        "The user has provided a codebase. The following files seem most relevant to their request. \
         Use them to make the task breakdown more specific.\n\
         **Relevant Files:**\n---\n{}\n---\n\n",
        relevance_block
    )
}

/// Assemble the full enhancement prompt.
pub fn build_prompt(text: &str, relevance_block: &str) -> String {
    ENHANCEMENT_TEMPLATE
        .replace("{codebase_context}", &format_context_section(relevance_block))
        .replace("{text}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_block_produces_no_section() {
        assert_eq!(format_context_section(""), "");

        let prompt = build_prompt("fix the login bug", "");
        assert!(!prompt.contains("Relevant Files"));
        assert!(prompt.contains("fix the login bug"));
    }

    #[test]
    fn test_non_empty_block_is_labeled() {
        let section = format_context_section("Relevant files found (from index):\n- auth/login.py");
        assert!(section.contains("The user has provided a codebase"));
        assert!(section.contains("**Relevant Files:**"));
        assert!(section.contains("auth/login.py"));
    }

    #[test]
    fn test_prompt_contains_single_context_section() {
        let prompt = build_prompt("login bug", "Relevant files found (from index):\n- auth/login.py");
        assert_eq!(prompt.matches("**Relevant Files:**").count(), 1);
    }

    #[test]
    fn test_template_keeps_example() {
        let prompt = build_prompt("anything", "");
        assert!(prompt.contains("[BEGIN EXAMPLE]"));
        assert!(prompt.contains("[END EXAMPLE]"));
    }
}

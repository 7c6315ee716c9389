use tracing::info;

use crate::entry::Entry;
use crate::error::ModelInvocationError;
use crate::llm::{ModelOutput, ModelRunner};
use crate::prompt::theme_prompt;
use crate::selector::format_label;
use crate::TARGET_LLM_REQUEST;

/// A single theme extraction request: the entry and the prompt built for it.
#[derive(Debug, Clone)]
pub struct ThemeQuery<'a> {
    pub entry: &'a Entry,
    pub prompt: String,
}

impl<'a> ThemeQuery<'a> {
    pub fn new(entry: &'a Entry) -> Self {
        Self {
            entry,
            prompt: theme_prompt(entry),
        }
    }

    /// Sends the prompt to the model and returns everything it captured.
    pub fn run(&self, runner: &dyn ModelRunner) -> Result<ModelOutput, ModelInvocationError> {
        info!(target: TARGET_LLM_REQUEST, "Extracting themes for {}", format_label(self.entry));
        runner.run(&self.prompt)
    }
}

/// Asks the model for the health themes of `entry`.
///
/// Returns the model's stdout exactly as produced; callers trim it for display.
pub fn extract_themes(
    entry: &Entry,
    runner: &dyn ModelRunner,
) -> Result<String, ModelInvocationError> {
    ThemeQuery::new(entry)
        .run(runner)
        .map(|output| output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Link;
    use crate::llm::ModelCommand;

    #[cfg(unix)]
    use crate::testing::FixedRunner;

    #[cfg(unix)]
    #[test]
    fn test_extract_themes_returns_output_unmodified() {
        let content = "Hearing loss affects... tinnitus... hearing aids...";
        let entry = Entry::article("Hearing Basics", "https://example.org/hearing", content);
        let response = "  - Hearing Loss\n- Tinnitus\n- Hearing Aids\n\n";
        let runner = FixedRunner::new(response);

        let themes = extract_themes(&entry, &runner).unwrap();

        assert_eq!(themes, response);
        let prompts = runner.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(content));
        assert!(prompts[0].contains("**5 key health-related themes**"));
    }

    #[cfg(unix)]
    #[test]
    fn test_landing_page_query() {
        let links = ["Diabetes Tips", "Heart Health", "Sleep", "Vision", "Memory", "Skin Care"]
            .iter()
            .enumerate()
            .map(|(i, text)| Link::new(*text, format!("u{}", i + 1)))
            .collect();
        let entry = Entry::landing_page("Health Hub", "https://example.org/hub", Some(String::new()), links);

        let query = ThemeQuery::new(&entry);
        assert!(query.prompt.contains("- Memory"));
        assert!(!query.prompt.contains("Skin Care"));

        let output = query.run(&FixedRunner::new("- Diabetes")).unwrap();
        assert_eq!(output.stdout, "- Diabetes");
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_themes_through_subprocess() {
        let entry = Entry::article("Hearing Basics", "https://example.org/hearing", "Tinnitus.");
        let runner = ModelCommand::new("cat", Vec::<String>::new());

        let themes = extract_themes(&entry, &runner).unwrap();
        assert_eq!(themes, ThemeQuery::new(&entry).prompt);
    }

    #[test]
    fn test_missing_model_executable() {
        let entry = Entry::article("Hearing Basics", "https://example.org/hearing", "Tinnitus.");
        let runner = ModelCommand::new("theme-explorer-no-such-model-binary", ["run", "mistral"]);

        let result = extract_themes(&entry, &runner);
        assert!(matches!(result, Err(ModelInvocationError::Spawn { .. })));
    }
}

// Text blocks shared by the theme prompts.

/// Closing header that primes the model to continue with a bulleted list.
pub const KEY_THEMES_HEADER: &str = "Key Themes:\n-";

/// Stands in for a landing page intro when the page has none.
pub const NO_INTRO_PLACEHOLDER: &str = "No intro text available.";

/// Landing pages are described to the model by at most this many link titles.
pub const MAX_PROMPT_LINKS: usize = 5;

/// Articles are summarized into exactly this many themes.
pub const ARTICLE_THEME_COUNT: usize = 5;

/// Wraps source text in triple quotes so the model can tell it apart from the
/// instructions around it.
pub fn quoted_block(text: &str) -> String {
    format!("\"\"\"\n{}\n\"\"\"", text)
}

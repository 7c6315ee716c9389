use crate::entry::{Entry, EntryKind, Link};
use crate::prompt::common::{
    quoted_block, ARTICLE_THEME_COUNT, KEY_THEMES_HEADER, MAX_PROMPT_LINKS, NO_INTRO_PLACEHOLDER,
};

/// Picks the theme prompt that matches the kind of entry.
pub fn theme_prompt(entry: &Entry) -> String {
    match &entry.kind {
        EntryKind::Article => article_themes_prompt(entry.content().unwrap_or_default()),
        EntryKind::LandingPage { links } => landing_page_themes_prompt(entry.content(), links),
    }
}

/// Generate a prompt asking for exactly five health themes found in an article.
pub fn article_themes_prompt(article_text: &str) -> String {
    format!(
        r#"
You are a health-focused AI assistant.

Given the article below, identify **{count} key health-related themes** strictly based on the article's actual content.

- Each theme should be a **short phrase**, not a sentence.
- **Not a generic label** (like "health tips") unless directly stated in the article.
- Do **not** include any information that is not explicitly stated in the article.
- Each theme should reflect a central idea or recurring topic in the text.

Article:
{article}

{header}
"#,
        count = ARTICLE_THEME_COUNT,
        article = quoted_block(article_text),
        header = KEY_THEMES_HEADER,
    )
}

/// Generate a prompt asking for three to five health themes of a landing page,
/// judged from its intro and the titles of its first few links.
pub fn landing_page_themes_prompt(intro: Option<&str>, links: &[Link]) -> String {
    let intro = intro
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_INTRO_PLACEHOLDER);

    format!(
        r#"
You are a health content summarizer.

Below is a health landing page. It contains an introductory paragraph followed by links to other health-related articles.

Your task is to extract **3 to 5 specific health-related themes** based strictly on the **intro text** and the **titles of the linked articles**.

✅ Each theme should be a clear and meaningful phrase like "Digestive Health", "Exercise for Seniors", or "Hearing Loss".

🚫 Do **not** make assumptions or generalizations (e.g., "Health Education", "Awareness").
🚫 Do **not** copy full article titles or include vague labels.
🚫 Avoid repeating similar ideas or including UI text.

Intro Text:
{intro}

Top Linked Articles:
{links}

{header}
"#,
        intro = quoted_block(intro),
        links = link_titles(links),
        header = KEY_THEMES_HEADER,
    )
}

/// One bullet per link title. URLs are left out.
fn link_titles(links: &[Link]) -> String {
    links
        .iter()
        .take(MAX_PROMPT_LINKS)
        .map(|link| format!("- {}", link.text))
        .collect::<Vec<_>>()
        .join("\n")
}

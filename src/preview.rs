use serde::Serialize;

use crate::entry::{Entry, Link};

/// Longest content excerpt shown in a preview, in characters.
pub const PREVIEW_CHARS: usize = 3000;

/// Number of links listed in a landing page preview.
pub const PREVIEW_LINKS: usize = 5;

pub const NO_CONTENT_NOTICE: &str =
    "No intro content found. This appears to be a catalog-style landing page.";

/// What a viewer shows for an entry before any themes are extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    /// Truncated content, or `None` when the entry has none.
    pub content: Option<String>,
    pub links: Vec<Link>,
}

impl Preview {
    pub fn new(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            url: entry.url.clone(),
            entry_type: entry.kind.as_str(),
            content: entry.content().map(truncate_content),
            links: entry.links().iter().take(PREVIEW_LINKS).cloned().collect(),
        }
    }

    /// Markdown rendering used by the command line viewer.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("## {}\n**URL:** [{}]({})\n\n### Content\n", self.title, self.url, self.url);
        match &self.content {
            Some(content) => out.push_str(content),
            None => out.push_str(NO_CONTENT_NOTICE),
        }
        out.push('\n');

        if !self.links.is_empty() {
            out.push_str("\n### Linked Articles\n");
            for link in &self.links {
                out.push_str(&format!("- [{}]({})\n", link.text, link.url));
            }
        }
        out
    }
}

/// Cuts `content` to [`PREVIEW_CHARS`] characters, marking the cut with `...`.
pub fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

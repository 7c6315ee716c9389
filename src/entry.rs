use serde::{Deserialize, Serialize};
use std::fmt;

/// A titled link found on a landing page.
///
/// Stored in the dataset as a two element array: `["Heart Health", "https://..."]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Link {
    pub text: String,
    pub url: String,
}

impl Link {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

impl From<(String, String)> for Link {
    fn from((text, url): (String, String)) -> Self {
        Self { text, url }
    }
}

impl From<Link> for (String, String) {
    fn from(link: Link) -> Self {
        (link.text, link.url)
    }
}

/// The two kinds of page the scraper produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Article,
    LandingPage { links: Vec<Link> },
}

impl EntryKind {
    /// The `type` discriminator as written in the dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Article => "article",
            EntryKind::LandingPage { .. } => "landing_page",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scraped page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry", into = "RawEntry")]
pub struct Entry {
    pub title: String,
    pub url: String,
    pub content: Option<String>,
    pub kind: EntryKind,
}

impl Entry {
    pub fn article(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: Some(content.into()),
            kind: EntryKind::Article,
        }
    }

    pub fn landing_page(
        title: impl Into<String>,
        url: impl Into<String>,
        content: Option<String>,
        links: Vec<Link>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content,
            kind: EntryKind::LandingPage { links },
        }
    }

    /// Content, treating an empty string the same as a missing one.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// Links of a landing page; articles have none.
    pub fn links(&self) -> &[Link] {
        match &self.kind {
            EntryKind::Article => &[],
            EntryKind::LandingPage { links } => links,
        }
    }

    /// An entry can be shown and analyzed when it has some content, or when it
    /// is a landing page with at least one link.
    pub fn is_selectable(&self) -> bool {
        if self.content().is_some() {
            return true;
        }
        match &self.kind {
            EntryKind::Article => false,
            EntryKind::LandingPage { links } => !links.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EntryType {
    Article,
    LandingPage,
}

/// On-disk layout of an entry.
#[derive(Serialize, Deserialize)]
struct RawEntry {
    title: String,
    url: String,
    #[serde(rename = "type")]
    entry_type: EntryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    links: Option<Vec<Link>>,
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        let kind = match raw.entry_type {
            EntryType::Article => EntryKind::Article,
            EntryType::LandingPage => EntryKind::LandingPage {
                links: raw.links.unwrap_or_default(),
            },
        };
        Self {
            title: raw.title,
            url: raw.url,
            content: raw.content,
            kind,
        }
    }
}

impl From<Entry> for RawEntry {
    fn from(entry: Entry) -> Self {
        let (entry_type, links) = match entry.kind {
            EntryKind::Article => (EntryType::Article, None),
            EntryKind::LandingPage { links } => (EntryType::LandingPage, Some(links)),
        };
        Self {
            title: entry.title,
            url: entry.url,
            entry_type,
            content: entry.content,
            links,
        }
    }
}

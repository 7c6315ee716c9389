use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::entry::Entry;

/// Position of an entry in the loaded dataset.
///
/// Ids stay valid for the lifetime of the process because the dataset never
/// changes after it is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(usize);

impl EntryId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EntryId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A selectable entry together with its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selected<'a> {
    pub id: EntryId,
    pub entry: &'a Entry,
}

impl Selected<'_> {
    pub fn label(&self) -> String {
        format_label(self.entry)
    }
}

/// Keeps the selectable entries, in dataset order.
pub fn select_entries(entries: &[Entry]) -> Vec<Selected<'_>> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.is_selectable())
        .map(|(index, entry)| Selected {
            id: EntryId(index),
            entry,
        })
        .collect()
}

/// Display label, e.g. `Hearing Basics (article)`.
pub fn format_label(entry: &Entry) -> String {
    format!("{} ({})", entry.title, entry.kind)
}

/// Resolves a display label back to an entry. Labels are not guaranteed to be
/// unique; the first match in dataset order wins.
pub fn find_by_label<'a>(selection: &[Selected<'a>], label: &str) -> Option<Selected<'a>> {
    selection
        .iter()
        .find(|selected| selected.label() == label)
        .copied()
}

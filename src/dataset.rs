use once_cell::sync::OnceCell;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::entry::Entry;
use crate::error::DatasetLoadError;
use crate::selector::{select_entries, EntryId, Selected};
use crate::TARGET_DATASET;

/// Process-wide dataset, loaded on first access.
static DATASET: OnceCell<Dataset> = OnceCell::new();

/// The scraped entries, in file order. Never modified after loading.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entries: Vec<Entry>,
}

impl Dataset {
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Reads a JSON array of entries from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetLoadError> {
        let path = path.as_ref();
        debug!(target: TARGET_DATASET, "Reading dataset from {}", path.display());

        let json = fs::read_to_string(path).map_err(|source| DatasetLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<Entry> =
            serde_json::from_str(&json).map_err(|source| DatasetLoadError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        info!(target: TARGET_DATASET, "Loaded {} entries from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.index())
    }

    /// Entries eligible for display and analysis.
    pub fn selectable(&self) -> Vec<Selected<'_>> {
        select_entries(&self.entries)
    }

    /// Like [`Dataset::get`], but only for selectable entries.
    pub fn get_selectable(&self, id: EntryId) -> Option<&Entry> {
        self.get(id).filter(|entry| entry.is_selectable())
    }
}

/// Returns the process-wide dataset, loading it from `path` on the first call.
///
/// Later calls return the already loaded dataset and ignore `path`. A failed
/// load is not cached, so a later call may try again.
pub fn shared_dataset(path: impl AsRef<Path>) -> Result<&'static Dataset, DatasetLoadError> {
    DATASET.get_or_try_init(|| Dataset::load(path))
}

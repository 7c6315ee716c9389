pub mod dataset;
pub mod entry;
pub mod environment;
pub mod error;
pub mod extraction;
pub mod llm;
pub mod logging;
pub mod preview;
pub mod prompt;
pub mod selector;
pub mod web;

#[cfg(all(test, unix))]
mod testing;

pub use dataset::{shared_dataset, Dataset};
pub use entry::{Entry, EntryKind, Link};
pub use error::{DatasetLoadError, Error, ModelInvocationError, Result};
pub use extraction::{extract_themes, ThemeQuery};
pub use llm::{ExitPolicy, ModelCommand, ModelOutput, ModelRunner};
pub use selector::{find_by_label, format_label, select_entries, EntryId, Selected};

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_LLM_REQUEST: &str = "llm_request";
pub const TARGET_DATASET: &str = "dataset";

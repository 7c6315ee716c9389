use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// The dataset file could not be read or parsed.
#[derive(Error, Debug)]
pub enum DatasetLoadError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse dataset {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The model process could not be run to completion.
#[derive(Error, Debug)]
pub enum ModelInvocationError {
    #[error("failed to start model process `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to send prompt to model process: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to wait for model process: {0}")]
    Wait(#[source] io::Error),

    #[error("model process was terminated abnormally ({status})")]
    Terminated { status: ExitStatus },

    #[error("model process exited with status {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("model process produced invalid UTF-8 output: {0}")]
    InvalidOutput(#[from] std::string::FromUtf8Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    DatasetLoad(#[from] DatasetLoadError),

    #[error("dataset contains no selectable entries")]
    NoSelectableEntries,

    #[error("no selectable entry matches {0}")]
    EntryNotFound(String),

    #[error(transparent)]
    ModelInvocation(#[from] ModelInvocationError),
}

pub type Result<T> = std::result::Result<T, Error>;

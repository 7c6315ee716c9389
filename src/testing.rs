//! Model runners for unit tests.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::Mutex;

use crate::error::ModelInvocationError;
use crate::llm::{ModelOutput, ModelRunner};

/// Records every prompt and answers with a fixed text.
pub struct FixedRunner {
    pub response: String,
    pub prompts: Mutex<Vec<String>>,
}

impl FixedRunner {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl ModelRunner for FixedRunner {
    fn run(&self, prompt: &str) -> Result<ModelOutput, ModelInvocationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(ModelOutput {
            stdout: self.response.clone(),
            stderr: String::new(),
            status: ExitStatus::from_raw(0),
        })
    }
}

/// Behaves like a model executable that is not installed.
pub struct MissingRunner;

impl ModelRunner for MissingRunner {
    fn run(&self, _prompt: &str) -> Result<ModelOutput, ModelInvocationError> {
        Err(ModelInvocationError::Spawn {
            program: "ollama".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    }
}

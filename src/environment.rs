use std::env;
use std::path::PathBuf;

use crate::llm::{ExitPolicy, ModelCommand, DEFAULT_MODEL_NAME, DEFAULT_MODEL_PROGRAM};

pub const DEFAULT_DATASET_PATH: &str = "scraped_articles.json";
pub const DEFAULT_PORT: u16 = 8080;

/// Retrieves an environment variable and splits it into a vector of strings based on a delimiter.
///
/// Empty items are dropped, so an unset variable yields an empty vector.
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    env::var(var)
        .unwrap_or_default()
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Interprets `1`, `true`, `yes` and `on` (any case) as true.
pub fn get_env_var_as_bool(var: &str) -> bool {
    env::var(var)
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

/// Runtime settings, read from the environment.
///
/// | Variable            | Default                 |
/// |---------------------|-------------------------|
/// | `DATASET_PATH`      | `scraped_articles.json` |
/// | `MODEL_PROGRAM`     | `ollama`                |
/// | `MODEL_NAME`        | `mistral`               |
/// | `MODEL_ARGS`        | `run <MODEL_NAME>`      |
/// | `MODEL_STRICT_EXIT` | `false`                 |
/// | `PORT`              | `8080`                  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dataset_path: PathBuf,
    pub model_program: String,
    pub model_name: String,
    /// Overrides the default `run <model_name>` arguments when non-empty.
    pub model_args: Vec<String>,
    pub strict_exit: bool,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            model_program: DEFAULT_MODEL_PROGRAM.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            model_args: Vec::new(),
            strict_exit: false,
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dataset_path: env::var("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            model_program: env::var("MODEL_PROGRAM").unwrap_or(defaults.model_program),
            model_name: env::var("MODEL_NAME").unwrap_or(defaults.model_name),
            model_args: get_env_var_as_vec("MODEL_ARGS", ' '),
            strict_exit: get_env_var_as_bool("MODEL_STRICT_EXIT"),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(defaults.port),
        }
    }

    /// The model command described by these settings.
    pub fn model_command(&self) -> ModelCommand {
        let args = if self.model_args.is_empty() {
            vec!["run".to_string(), self.model_name.clone()]
        } else {
            self.model_args.clone()
        };
        let exit_policy = if self.strict_exit {
            ExitPolicy::Strict
        } else {
            ExitPolicy::Lenient
        };
        ModelCommand::new(self.model_program.clone(), args).with_exit_policy(exit_policy)
    }
}

use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use tracing::{debug, warn};

use crate::error::ModelInvocationError;
use crate::TARGET_LLM_REQUEST;

pub const DEFAULT_MODEL_PROGRAM: &str = "ollama";
pub const DEFAULT_MODEL_NAME: &str = "mistral";

/// Captured result of one model process run.
#[derive(Debug, Clone)]
pub struct ModelOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

/// How a non-zero exit code of the model process is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Return whatever was written to stdout, whatever the exit code.
    #[default]
    Lenient,
    /// Report a non-zero exit code as [`ModelInvocationError::NonZeroExit`].
    Strict,
}

/// Something that turns a prompt into model output.
pub trait ModelRunner: Send + Sync {
    fn run(&self, prompt: &str) -> Result<ModelOutput, ModelInvocationError>;
}

/// An external model executable, run once per prompt.
///
/// The prompt is written to stdin in full and stdin is closed; the call then
/// blocks until the process exits. There is no timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCommand {
    program: String,
    args: Vec<String>,
    exit_policy: ExitPolicy,
}

impl Default for ModelCommand {
    fn default() -> Self {
        Self::ollama(DEFAULT_MODEL_NAME)
    }
}

impl ModelCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            exit_policy: ExitPolicy::default(),
        }
    }

    /// `ollama run <model>`
    pub fn ollama(model: &str) -> Self {
        Self::new(DEFAULT_MODEL_PROGRAM, ["run", model])
    }

    pub fn with_exit_policy(mut self, exit_policy: ExitPolicy) -> Self {
        self.exit_policy = exit_policy;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn exit_policy(&self) -> ExitPolicy {
        self.exit_policy
    }
}

impl ModelRunner for ModelCommand {
    fn run(&self, prompt: &str) -> Result<ModelOutput, ModelInvocationError> {
        debug!(target: TARGET_LLM_REQUEST, "Running {} {:?} with a {} byte prompt", self.program, self.args, prompt.len());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ModelInvocationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // stdin is fed while stdout and stderr are being drained.
        let stdin = child.stdin.take();
        let input = prompt.as_bytes().to_vec();
        let writer = thread::spawn(move || -> io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&input)?;
            }
            Ok(())
        });

        let output = child
            .wait_with_output()
            .map_err(ModelInvocationError::Wait)?;

        match writer.join() {
            Ok(Ok(())) => {}
            // Exited without reading all of its input.
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!(target: TARGET_LLM_REQUEST, "Model process closed stdin early");
            }
            Ok(Err(e)) => return Err(ModelInvocationError::Stdin(e)),
            Err(_) => {
                return Err(ModelInvocationError::Stdin(io::Error::new(
                    io::ErrorKind::Other,
                    "stdin writer thread panicked",
                )))
            }
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stderr.trim().is_empty() {
            debug!(target: TARGET_LLM_REQUEST, "Model process stderr: {}", stderr.trim());
        }

        let Some(code) = output.status.code() else {
            warn!(target: TARGET_LLM_REQUEST, "Model process {} terminated abnormally: {}", self.program, output.status);
            return Err(ModelInvocationError::Terminated {
                status: output.status,
            });
        };

        if code != 0 {
            match self.exit_policy {
                ExitPolicy::Lenient => {
                    warn!(target: TARGET_LLM_REQUEST, "Model process {} exited with status {}, keeping its output", self.program, code);
                }
                ExitPolicy::Strict => {
                    return Err(ModelInvocationError::NonZeroExit { code, stderr });
                }
            }
        }

        let stdout = String::from_utf8(output.stdout)?;
        debug!(target: TARGET_LLM_REQUEST, "Model response received: {}", stdout);

        Ok(ModelOutput {
            stdout,
            stderr,
            status: output.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let command = ModelCommand::default();
        assert_eq!(command.program(), "ollama");
        assert_eq!(command.args(), &["run".to_string(), "mistral".to_string()]);
        assert_eq!(command.exit_policy(), ExitPolicy::Lenient);
    }

    #[test]
    fn test_missing_program() {
        let command = ModelCommand::new("theme-explorer-no-such-model-binary", ["run", "mistral"]);
        let result = command.run("prompt");
        assert!(matches!(result, Err(ModelInvocationError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_prompt_round_trips_through_stdin() {
        let command = ModelCommand::new("cat", Vec::<String>::new());
        let prompt = "Key Themes:\n- ünïcode\n";
        let output = command.run(prompt).unwrap();

        assert_eq!(output.stdout, prompt);
        assert!(output.status.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_large_prompt_does_not_deadlock() {
        let command = ModelCommand::new("cat", Vec::<String>::new());
        let prompt = "hearing aids ".repeat(100_000);
        let output = command.run(&prompt).unwrap();
        assert_eq!(output.stdout.len(), prompt.len());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_lenient_by_default() {
        let command = ModelCommand::new("sh", ["-c", "echo '- Hearing Loss'; echo oops >&2; exit 3"]);
        let output = command.run("ignored").unwrap();

        assert_eq!(output.stdout, "- Hearing Loss\n");
        assert_eq!(output.stderr, "oops\n");
        assert_eq!(output.status.code(), Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_strict() {
        let command = ModelCommand::new("sh", ["-c", "echo oops >&2; exit 3"])
            .with_exit_policy(ExitPolicy::Strict);

        match command.run("ignored") {
            Err(ModelInvocationError::NonZeroExit { code, stderr }) => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "oops\n");
            }
            other => panic!("expected NonZeroExit, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_killed_process() {
        let command = ModelCommand::new("sh", ["-c", "kill -9 $$"]);
        let result = command.run("ignored");
        assert!(matches!(result, Err(ModelInvocationError::Terminated { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_utf8_output() {
        let command = ModelCommand::new("printf", ["\\377\\376"]);
        let result = command.run("ignored");
        assert!(matches!(result, Err(ModelInvocationError::InvalidOutput(_))));
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds of the evaluation pipeline. All of these abort the run;
/// the distinction exists so callers can match on cause instead of string
/// contents.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("missing {label}: {}", .path.display())]
    MissingInput { label: String, path: PathBuf },

    #[error("required command '{tool}' not found in PATH. Please install it and try again")]
    ToolNotFound { tool: String },

    /// A child process exited non-zero. `code` is -1 when the child was
    /// killed by a signal and never produced an exit code.
    #[error("command `{command}` exited with status {code}: {stderr}")]
    InvocationFailure {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },
}

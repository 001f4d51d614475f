use crate::error::PipelineError;
use log::{debug, info};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// An external tool command line, fixed before execution. The first
/// element names the program, the rest are its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation(Vec<String>);

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        ToolInvocation(vec![program.into()])
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.0.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.0[0]
    }

    pub fn as_args(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Captured output of a completed invocation.
#[derive(Debug)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

/// Locate `name` on the search path, mirroring what the shell would
/// execute. Names containing a path separator are taken as-is.
pub fn resolve_tool(name: &str) -> Result<PathBuf, PipelineError> {
    let direct = Path::new(name);
    if direct.components().count() > 1 {
        if is_executable(direct) {
            return Ok(direct.to_path_buf());
        }
        return Err(PipelineError::ToolNotFound {
            tool: name.to_string(),
        });
    }

    let path_var = env::var_os("PATH").unwrap_or_default();
    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if is_executable(&candidate) {
            return Ok(candidate);
        }
    }

    Err(PipelineError::ToolNotFound {
        tool: name.to_string(),
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Run an external tool to completion, capturing its output.
///
/// The program must resolve on PATH before anything is spawned, so a
/// missing tool surfaces as [`PipelineError::ToolNotFound`] rather than a
/// cryptic OS error. A non-zero exit is fatal and carries the command,
/// exit code, and captured stderr.
pub fn run(invocation: &ToolInvocation) -> Result<ExecutionResult, PipelineError> {
    info!("[run] {invocation}");
    resolve_tool(invocation.program())?;

    let output = Command::new(invocation.program())
        .args(&invocation.as_args()[1..])
        .output()
        .map_err(|source| PipelineError::Launch {
            command: invocation.to_string(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !stdout.is_empty() {
        debug!("{}", stdout.trim_end());
    }

    if !output.status.success() {
        return Err(PipelineError::InvocationFailure {
            command: invocation.to_string(),
            code: output.status.code().unwrap_or(-1),
            stderr: stderr.trim_end().to_string(),
        });
    }

    Ok(ExecutionResult {
        stdout,
        stderr,
        status: output.status,
    })
}

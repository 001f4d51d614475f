use crate::error::PipelineError;
use crate::utils::external_tools::resolve_tool;
use std::path::Path;

/// Checks that a required input file exists before any tool is invoked.
/// # Arguments
/// * `path` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_file(path: &Path, label: &str) -> Result<(), PipelineError> {
    if !path.exists() {
        return Err(PipelineError::MissingInput {
            label: label.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Checks every (path, label) pair eagerly, so a missing truth file is
/// reported before an expensive caller invocation runs.
pub fn check_required_files<'a, I>(pairs: I) -> Result<(), PipelineError>
where
    I: IntoIterator<Item = (&'a Path, &'a str)>,
{
    for (path, label) in pairs {
        check_required_file(path, label)?;
    }
    Ok(())
}

/// Checks that every named executable resolves on PATH.
pub fn check_required_tools(tools: &[&str]) -> Result<(), PipelineError> {
    for tool in tools {
        resolve_tool(tool)?;
    }
    Ok(())
}

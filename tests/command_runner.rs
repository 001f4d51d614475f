use varbench_tools::error::PipelineError;
use varbench_tools::utils::external_tools::{resolve_tool, run, ToolInvocation};
use varbench_tools::utils::preflight::{check_required_file, check_required_files};

// These tests rely only on POSIX-standard executables (sh, echo, false)
// being on PATH.

#[test]
fn run_captures_stdout_of_a_clean_exit() {
    let result = run(&ToolInvocation::new("echo").arg("hello")).expect("echo should succeed");
    assert_eq!(result.stdout, "hello\n");
    assert!(result.status.success());
}

#[test]
fn run_raises_on_bad_command() {
    let err = run(&ToolInvocation::new("false")).unwrap_err();
    match err {
        PipelineError::InvocationFailure { code, command, .. } => {
            assert_eq!(code, 1);
            assert_eq!(command, "false");
        }
        other => panic!("expected InvocationFailure, got: {other}"),
    }
}

#[test]
fn run_surfaces_stderr_on_failure() {
    let invocation = ToolInvocation::new("sh")
        .arg("-c")
        .arg("echo boom >&2; exit 3");
    let err = run(&invocation).unwrap_err();
    match err {
        PipelineError::InvocationFailure { code, stderr, .. } => {
            assert_eq!(code, 3);
            assert_eq!(stderr, "boom");
        }
        other => panic!("expected InvocationFailure, got: {other}"),
    }
}

#[test]
fn run_rejects_unresolvable_tool_before_spawning() {
    let err = run(&ToolInvocation::new("this-tool-does-not-exist-anywhere")).unwrap_err();
    match err {
        PipelineError::ToolNotFound { tool } => {
            assert_eq!(tool, "this-tool-does-not-exist-anywhere");
        }
        other => panic!("expected ToolNotFound, got: {other}"),
    }
}

#[test]
fn resolve_tool_finds_a_standard_shell() {
    let path = resolve_tool("sh").expect("sh should be on PATH");
    assert!(path.is_file());
}

#[test]
fn missing_precondition_names_the_exact_path() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("present.txt");
    std::fs::write(&present, "x").unwrap();
    let absent = dir.path().join("absent.txt");

    check_required_file(&present, "present file").expect("existing file should pass");

    let err = check_required_files([
        (present.as_path(), "present file"),
        (absent.as_path(), "absent file"),
    ])
    .unwrap_err();
    match err {
        PipelineError::MissingInput { label, path } => {
            assert_eq!(label, "absent file");
            assert_eq!(path, absent);
        }
        other => panic!("expected MissingInput, got: {other}"),
    }
}

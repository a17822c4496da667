//! Process execution primitives with consistent error handling.
//!
//! Commands are always spawned with a structured argument list, never a
//! shell string, so arguments need no quoting and are independently
//! testable.

use std::path::Path;
use std::process::Command;

use serde::Serialize;

use crate::error::{Error, Result};

/// Captured output and exit status from one external process run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutput {
    #[serde(flatten)]
    pub output: CapturedOutput,
    pub exit_code: i32,
    pub success: bool,
}

/// Run a program to completion, capturing stdout and stderr as text.
///
/// The call blocks until the process exits. A non-zero exit status is not
/// an error at this layer; callers decide how to react to it.
pub fn capture(program: &str, args: &[&str], cwd: &Path, context: &str) -> Result<ProcessOutput> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to run {context}: {e}"),
            ))
        })?;

    Ok(ProcessOutput {
        output: CapturedOutput::new(
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        ),
        exit_code: output.status.code().unwrap_or(-1),
        success: output.status.success(),
    })
}

/// Captured output from command execution.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CapturedOutput {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

impl CapturedOutput {
    pub fn new(stdout: String, stderr: String) -> Self {
        Self { stdout, stderr }
    }

    /// Error text for a failed run: stderr, falling back to stdout when
    /// the process wrote its diagnostics there.
    pub fn error_text(&self) -> String {
        if !self.stderr.trim().is_empty() {
            self.stderr.trim().to_string()
        } else {
            self.stdout.trim().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cwd() -> PathBuf {
        std::env::temp_dir()
    }

    #[test]
    fn capture_returns_stdout_on_success() {
        let out = capture("echo", &["hello"], &cwd(), "echo test").unwrap();
        assert!(out.success);
        assert_eq!(out.exit_code, 0);
        assert_eq!(out.output.stdout.trim(), "hello");
    }

    #[test]
    fn capture_reports_nonzero_exit_without_erroring() {
        let out = capture("sh", &["-c", "exit 3"], &cwd(), "exit test").unwrap();
        assert!(!out.success);
        assert_eq!(out.exit_code, 3);
    }

    #[test]
    fn capture_fails_for_missing_program() {
        let result = capture("nonexistent_command_xyz", &[], &cwd(), "test");
        assert!(result.is_err());
    }

    #[test]
    fn error_text_prefers_stderr() {
        let out = CapturedOutput::new("stdout content".into(), "stderr content".into());
        assert_eq!(out.error_text(), "stderr content");
    }

    #[test]
    fn error_text_falls_back_to_stdout() {
        let out = CapturedOutput::new("stdout content".into(), String::new());
        assert_eq!(out.error_text(), "stdout content");
    }
}

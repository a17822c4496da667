//! External build toolchain invocation.
//!
//! The toolchain is an opaque external process. Exactly one build is in
//! flight at a time: the toolchain parallelizes internally and re-entrant
//! invocation would corrupt its shared build state, so the call blocks with
//! no timeout. A non-zero exit is fatal and never retried; recompiling
//! without source changes cannot succeed where the first attempt failed.

use serde::Serialize;

use crate::env::Environment;
use crate::error::{Error, Result};
use crate::profile::BuildProfile;
use crate::utils::command::{self, CapturedOutput};

/// Program and base arguments for the external compiler, extended with
/// profile-specific flags per invocation. Injectable so tests can
/// substitute a scripted process for the real toolchain.
#[derive(Debug, Clone)]
pub struct ToolchainInvoker {
    pub program: String,
    pub base_args: Vec<String>,
}

impl Default for ToolchainInvoker {
    fn default() -> Self {
        Self {
            program: "cargo".to_string(),
            base_args: vec!["build".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildOutput {
    pub profile: BuildProfile,
    #[serde(flatten)]
    pub output: CapturedOutput,
}

impl ToolchainInvoker {
    /// Run the toolchain for the given build profile, blocking until it
    /// exits. Non-zero exit maps to `ToolchainFailure` carrying the
    /// captured stderr.
    pub fn build(&self, env: &Environment, profile: BuildProfile) -> Result<BuildOutput> {
        let mut args: Vec<&str> = self.base_args.iter().map(String::as_str).collect();
        args.extend(profile.toolchain_flags());

        log_status!("toolchain", "Running {} {} ...", self.program, args.join(" "));
        let result = command::capture(&self.program, &args, &env.root, "toolchain build")?;

        if !result.success {
            return Err(Error::ToolchainFailure {
                exit_code: result.exit_code,
                stderr: result.output.error_text(),
            });
        }

        log_status!("toolchain", "Build ({}) completed successfully", profile);
        Ok(BuildOutput {
            profile,
            output: result.output,
        })
    }
}

//! The build pipeline: a strictly linear stage machine.
//!
//! `Idle → DirectoryReset → ExternalBuild → ArtifactDeployment → Done`,
//! or `Idle → DirectoryReset → Done` for the clean-only command. The first
//! failing stage moves the pipeline to a terminal `Failed` state and the
//! error propagates immediately; later stages have hard data dependencies
//! on earlier ones, so nothing runs past a failure and nothing is retried.

use serde::Serialize;

use crate::deploy::{self, DeploySummary};
use crate::env::Environment;
use crate::error::Result;
use crate::folders;
use crate::profile::{target_profiles, BuildProfile, TargetProfile};
use crate::toolchain::{BuildOutput, ToolchainInvoker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    DirectoryReset,
    ExternalBuild,
    ArtifactDeployment,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::DirectoryReset => "directory-reset",
            Stage::ExternalBuild => "external-build",
            Stage::ArtifactDeployment => "artifact-deployment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running(Stage),
    Done,
    Failed(Stage),
}

/// Summary of one completed pipeline run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    pub profile: BuildProfile,
    pub build: BuildOutput,
    pub deploy: DeploySummary,
}

pub struct Pipeline {
    env: Environment,
    toolchain: ToolchainInvoker,
    targets: Vec<TargetProfile>,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(env: Environment) -> Self {
        let targets = target_profiles(&env.product);
        Self {
            env,
            toolchain: ToolchainInvoker::default(),
            targets,
            state: PipelineState::Idle,
        }
    }

    pub fn with_toolchain(mut self, toolchain: ToolchainInvoker) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Full pipeline: reset → scaffold → build → deploy.
    pub fn run_build(&mut self, profile: BuildProfile) -> Result<PipelineRun> {
        log_status!("pipeline", "Starting build process ({})...", profile);

        self.enter(Stage::DirectoryReset);
        self.checked(Stage::DirectoryReset, folders::reset(&self.env, &self.targets))?;
        self.checked(
            Stage::DirectoryReset,
            folders::scaffold(&self.env, &self.targets),
        )?;

        self.enter(Stage::ExternalBuild);
        let build = self.checked(
            Stage::ExternalBuild,
            self.toolchain.build(&self.env, profile),
        )?;

        self.enter(Stage::ArtifactDeployment);
        let deploy = self.checked(
            Stage::ArtifactDeployment,
            deploy::deploy(&self.env, profile, &self.targets),
        )?;

        self.state = PipelineState::Done;
        log_status!("pipeline", "Build process ({}) completed successfully", profile);
        Ok(PipelineRun {
            profile,
            build,
            deploy,
        })
    }

    /// Clean-only pipeline: reset, then done.
    pub fn run_clean(&mut self) -> Result<()> {
        log_status!("pipeline", "Cleaning game folders...");
        self.enter(Stage::DirectoryReset);
        self.checked(Stage::DirectoryReset, folders::reset(&self.env, &self.targets))?;
        self.state = PipelineState::Done;
        Ok(())
    }

    fn enter(&mut self, stage: Stage) {
        self.state = PipelineState::Running(stage);
    }

    fn checked<T>(&mut self, stage: Stage, result: Result<T>) -> Result<T> {
        result.map_err(|e| {
            self.state = PipelineState::Failed(stage);
            log_status!("pipeline", "Stage {} failed: {}", stage.as_str(), e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Platform;
    use std::fs;
    use tempfile::TempDir;

    fn test_env(dir: &TempDir) -> Environment {
        Environment::new(dir.path(), "cubegame", Platform::LinuxX8664)
    }

    fn scripted(script: &str) -> ToolchainInvoker {
        ToolchainInvoker {
            program: "sh".to_string(),
            base_args: vec!["-c".to_string(), script.to_string()],
        }
    }

    fn write_compiled(env: &Environment, name: &str) {
        let out = env.root.join("target/debug");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join(name), "elf").unwrap();
    }

    #[test]
    fn full_run_scaffolds_and_deploys() {
        let dir = TempDir::new().unwrap();
        let env = test_env(&dir);
        write_compiled(&env, "client");
        write_compiled(&env, "server");

        let mut pipeline = Pipeline::new(env).with_toolchain(scripted("true"));
        let run = pipeline.run_build(BuildProfile::Debug).unwrap();

        assert_eq!(pipeline.state(), PipelineState::Done);
        assert_eq!(run.deploy.deployed.len(), 3);
        assert!(dir.path().join("cubegame-client-1/bin/cubegame").exists());
        assert!(dir.path().join("cubegame-client-1/servers.ron").exists());
        assert!(dir.path().join("cubegame-server/saves").is_dir());
    }

    #[test]
    fn toolchain_failure_halts_before_deployment() {
        let dir = TempDir::new().unwrap();
        let env = test_env(&dir);
        // Binaries exist, so deployment would succeed if it ever ran
        write_compiled(&env, "client");
        write_compiled(&env, "server");

        let mut pipeline =
            Pipeline::new(env).with_toolchain(scripted("echo 'link error' >&2; exit 1"));
        let err = pipeline.run_build(BuildProfile::Debug).unwrap_err();

        assert_eq!(pipeline.state(), PipelineState::Failed(Stage::ExternalBuild));
        assert!(err.to_string().contains("link error"));
        assert!(!dir.path().join("cubegame-client-1/bin/cubegame").exists());
    }

    #[test]
    fn rerun_replaces_stale_target_trees() {
        let dir = TempDir::new().unwrap();
        let env = test_env(&dir);
        write_compiled(&env, "client");
        write_compiled(&env, "server");

        // Leftover from a previous layout; must not survive the rerun
        let stale = dir.path().join("cubegame-client-1/bin/old-binary");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "stale").unwrap();

        let mut pipeline = Pipeline::new(env).with_toolchain(scripted("true"));
        pipeline.run_build(BuildProfile::Debug).unwrap();

        assert!(!stale.exists());
        assert!(dir.path().join("cubegame-client-1/bin/cubegame").exists());
    }

    #[test]
    fn clean_removes_targets_and_finishes() {
        let dir = TempDir::new().unwrap();
        let env = test_env(&dir);
        write_compiled(&env, "client");
        write_compiled(&env, "server");

        let mut pipeline = Pipeline::new(env).with_toolchain(scripted("true"));
        pipeline.run_build(BuildProfile::Debug).unwrap();
        assert!(dir.path().join("cubegame-client-1").exists());

        pipeline.run_clean().unwrap();
        assert_eq!(pipeline.state(), PipelineState::Done);
        assert!(!dir.path().join("cubegame-client-1").exists());
        assert!(!dir.path().join("cubegame-client-2").exists());
        assert!(!dir.path().join("cubegame-server").exists());
    }
}

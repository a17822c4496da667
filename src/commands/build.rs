use serde_json::{json, Value};
use shipkit::pipeline::PipelineRun;
use shipkit::{BuildProfile, Environment, Pipeline};

use crate::commands::CmdResult;

/// Run the full pipeline (reset → scaffold → build → deploy) for a profile.
pub fn run(profile: BuildProfile) -> CmdResult<PipelineRun> {
    let env = Environment::detect(std::env::current_dir()?)?;
    let mut pipeline = Pipeline::new(env);
    let run = pipeline.run_build(profile)?;
    Ok((run, 0))
}

/// Reset only: remove the target profile directories.
pub fn clean() -> CmdResult<Value> {
    let env = Environment::detect(std::env::current_dir()?)?;
    let mut pipeline = Pipeline::new(env);
    pipeline.run_clean()?;
    Ok((json!({ "command": "clean", "success": true }), 0))
}

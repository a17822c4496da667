use clap::Args;
use shipkit::package::{self, ReleaseArtifact};
use shipkit::profile::target_profiles;
use shipkit::{BuildProfile, Environment, Pipeline};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct PackageArgs {
    /// Release version string (free-form, non-empty)
    pub version: String,

    /// Leave the versioned directory uncompressed
    #[arg(long)]
    pub no_compress: bool,

    /// Package the existing trees without running the release pipeline first
    #[arg(long)]
    pub skip_build: bool,
}

/// Package a release: optionally rebuild, assemble the staging tree from
/// the first client profile when absent, then stamp/rename/compress.
pub fn run(args: PackageArgs) -> CmdResult<ReleaseArtifact> {
    let env = Environment::detect(std::env::current_dir()?)?;

    if !args.skip_build {
        let mut pipeline = Pipeline::new(env.clone());
        pipeline.run_build(BuildProfile::Release)?;
    }

    let staging = env.staging_dir();
    if !staging.exists() {
        let targets = target_profiles(&env.product);
        package::assemble(&env, &targets[0].root_dir(&env))?;
    }

    let artifact = package::package(&env, &staging, &args.version, !args.no_compress)?;
    Ok((artifact, 0))
}

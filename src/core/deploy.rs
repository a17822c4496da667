//! Compiled-binary deployment into target profile trees.

use std::path::PathBuf;

use serde::Serialize;

use crate::env::Environment;
use crate::error::Result;
use crate::profile::{BuildProfile, TargetProfile};
use crate::utils::fsx;

/// Outcome for a single target profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedBinary {
    pub target: String,
    pub source: PathBuf,
    pub dest: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploySummary {
    pub profile: BuildProfile,
    pub deployed: Vec<DeployedBinary>,
    /// Targets whose compiled binary was absent. Skipped, not failed:
    /// a workspace that builds only a subset of binaries must not block
    /// deployment of the ones that did build.
    pub skipped: Vec<String>,
}

/// Copy each target's compiled binary from the toolchain output into the
/// target's `bin/`, applying platform-specific naming. Missing binaries
/// are logged and skipped; filesystem errors on a present binary abort.
pub fn deploy(
    env: &Environment,
    profile: BuildProfile,
    targets: &[TargetProfile],
) -> Result<DeploySummary> {
    let ext = env.platform.binary_extension();
    let output_root = env.root.join("target").join(profile.dir_name());

    let mut summary = DeploySummary {
        profile,
        deployed: Vec::new(),
        skipped: Vec::new(),
    };

    for target in targets {
        let source = output_root.join(format!("{}{}", target.binary_source, ext));
        let dest = target
            .bin_dir(env)
            .join(format!("{}{}", target.binary_dest, ext));

        if !source.exists() {
            log_status!(
                "deploy",
                "Source binary does not exist: {}",
                source.display()
            );
            summary.skipped.push(target.dir_name.clone());
            continue;
        }

        fsx::copy_file(&source, &dest)?;
        log_status!("deploy", "Copied {} to {}", source.display(), dest.display());
        summary.deployed.push(DeployedBinary {
            target: target.dir_name.clone(),
            source,
            dest,
        });
    }

    Ok(summary)
}

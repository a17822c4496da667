//! Target directory lifecycle: reset and scaffold.
//!
//! Reset-then-scaffold rather than incremental sync: a previous build can
//! never leak orphaned files into the new layout, which matters when binary
//! names or subdirectory layouts change between versions.

use std::fs;

use crate::env::Environment;
use crate::error::Result;
use crate::profile::{TargetProfile, PROFILE_SUBDIRS};
use crate::utils::fsx;

/// Remove every existing target profile directory. A directory that is
/// already absent is success, not an error.
pub fn reset(env: &Environment, profiles: &[TargetProfile]) -> Result<()> {
    for profile in profiles {
        let dir = profile.root_dir(env);
        if dir.exists() {
            log_status!("folders", "Removing folder: {}", dir.display());
            fs::remove_dir_all(&dir)?;
        } else {
            log_status!("folders", "Folder does not exist: {}", dir.display());
        }
    }
    Ok(())
}

/// Create the full subdirectory tree for every profile, fan the shared data
/// tree out to each profile's `data/`, and create client placeholder files.
///
/// A missing shared-data source is skipped with a log message; not every
/// deployment bundles data.
pub fn scaffold(env: &Environment, profiles: &[TargetProfile]) -> Result<()> {
    for profile in profiles {
        for subdir in PROFILE_SUBDIRS {
            let dir = profile.root_dir(env).join(subdir);
            fs::create_dir_all(&dir)?;
            log_status!("folders", "Created folder: {}", dir.display());
        }
    }

    let shared_data = env.shared_data_dir();
    if shared_data.exists() {
        for profile in profiles {
            let dest = profile.data_dir(env);
            log_status!(
                "folders",
                "Copying '{}' to {}",
                shared_data.display(),
                dest.display()
            );
            fsx::copy_dir_all(&shared_data, &dest)?;
        }
    } else {
        log_status!(
            "folders",
            "No shared data directory at {}, skipping",
            shared_data.display()
        );
    }

    for profile in profiles {
        if let Some(placeholder) = profile.placeholder_file(env) {
            fs::write(&placeholder, "")?;
            log_status!("folders", "Created empty file: {}", placeholder.display());
        }
    }

    Ok(())
}

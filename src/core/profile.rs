//! Build and deployment target profiles.
//!
//! The target set is fixed configuration: two client instances and one
//! server instance sharing the same runtime layout. Profiles are never
//! mutated at run time.

use std::path::PathBuf;

use serde::Serialize;

use crate::env::Environment;

/// Subdirectories scaffolded for every target profile.
pub const PROFILE_SUBDIRS: &[&str] = &["bin", "saves"];

/// Empty placeholder created for client profiles only.
pub const CLIENT_PLACEHOLDER: &str = "servers.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    /// Subdirectory of the toolchain output root holding compiled binaries.
    pub fn dir_name(&self) -> &'static str {
        match self {
            BuildProfile::Debug => "debug",
            BuildProfile::Release => "release",
        }
    }

    /// Extra flags appended to the toolchain invocation.
    pub fn toolchain_flags(&self) -> &'static [&'static str] {
        match self {
            BuildProfile::Debug => &[],
            BuildProfile::Release => &["--release"],
        }
    }
}

impl std::fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Client,
    Server,
}

/// One deployment target: directory name plus binary naming for that target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetProfile {
    pub kind: ProfileKind,
    pub dir_name: String,
    /// Name of the compiled artifact produced by the toolchain.
    pub binary_source: String,
    /// Destination binary name inside the target's `bin/`.
    pub binary_dest: String,
}

impl TargetProfile {
    pub fn root_dir(&self, env: &Environment) -> PathBuf {
        env.root.join(&self.dir_name)
    }

    pub fn bin_dir(&self, env: &Environment) -> PathBuf {
        self.root_dir(env).join("bin")
    }

    pub fn data_dir(&self, env: &Environment) -> PathBuf {
        self.root_dir(env).join("data")
    }

    pub fn placeholder_file(&self, env: &Environment) -> Option<PathBuf> {
        match self.kind {
            ProfileKind::Client => Some(self.root_dir(env).join(CLIENT_PLACEHOLDER)),
            ProfileKind::Server => None,
        }
    }
}

/// The fixed target set for a product: `{product}-client-1`,
/// `{product}-client-2`, `{product}-server`.
pub fn target_profiles(product: &str) -> Vec<TargetProfile> {
    vec![
        TargetProfile {
            kind: ProfileKind::Client,
            dir_name: format!("{product}-client-1"),
            binary_source: "client".to_string(),
            binary_dest: product.to_string(),
        },
        TargetProfile {
            kind: ProfileKind::Client,
            dir_name: format!("{product}-client-2"),
            binary_source: "client".to_string(),
            binary_dest: product.to_string(),
        },
        TargetProfile {
            kind: ProfileKind::Server,
            dir_name: format!("{product}-server"),
            binary_source: "server".to_string(),
            binary_dest: format!("{product}-server"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Platform;

    #[test]
    fn build_profile_flags_and_dirs() {
        assert_eq!(BuildProfile::Debug.dir_name(), "debug");
        assert!(BuildProfile::Debug.toolchain_flags().is_empty());
        assert_eq!(BuildProfile::Release.toolchain_flags(), &["--release"]);
    }

    #[test]
    fn target_set_is_two_clients_and_one_server() {
        let targets = target_profiles("cubegame");
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].dir_name, "cubegame-client-1");
        assert_eq!(targets[1].dir_name, "cubegame-client-2");
        assert_eq!(targets[2].dir_name, "cubegame-server");
        assert_eq!(targets[0].binary_dest, "cubegame");
        assert_eq!(targets[2].binary_dest, "cubegame-server");
        assert_eq!(targets[2].binary_source, "server");
    }

    #[test]
    fn only_clients_get_a_placeholder() {
        let env = Environment::new("/work", "cubegame", Platform::LinuxX8664);
        let targets = target_profiles("cubegame");
        assert!(targets[0].placeholder_file(&env).is_some());
        assert!(targets[2].placeholder_file(&env).is_none());
        assert!(targets[0]
            .placeholder_file(&env)
            .unwrap()
            .ends_with("cubegame-client-1/servers.ron"));
    }
}

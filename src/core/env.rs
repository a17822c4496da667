//! Explicit execution environment threaded into every pipeline component.
//!
//! Nothing in the library reads the platform or working directory ad hoc;
//! the CLI constructs one `Environment` up front and passes it down.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};

/// Default product name; prefixes every target directory and archive.
pub const DEFAULT_PRODUCT: &str = "cubegame";

/// Name of the shared data tree copied into every target profile.
pub const SHARED_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    LinuxX8664,
    WindowsX8664,
}

impl Platform {
    /// Detect the host platform. Anything other than Linux or Windows is a
    /// hard error, raised before any pipeline stage runs.
    pub fn detect() -> Result<Platform> {
        Platform::from_os_name(std::env::consts::OS)
    }

    pub fn from_os_name(os: &str) -> Result<Platform> {
        match os {
            "linux" => Ok(Platform::LinuxX8664),
            "windows" => Ok(Platform::WindowsX8664),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Tag used in versioned directory and archive names.
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::LinuxX8664 => "linux-x86_64",
            Platform::WindowsX8664 => "windows-x86_64",
        }
    }

    pub fn binary_extension(&self) -> &'static str {
        match self {
            Platform::LinuxX8664 => "",
            Platform::WindowsX8664 => ".exe",
        }
    }

    pub fn archive_extension(&self) -> &'static str {
        match self {
            Platform::LinuxX8664 => "tar.gz",
            Platform::WindowsX8664 => "zip",
        }
    }
}

/// Working root, product name, and host platform for one orchestrator run.
#[derive(Debug, Clone)]
pub struct Environment {
    pub root: PathBuf,
    pub product: String,
    pub platform: Platform,
}

impl Environment {
    pub fn new(root: impl Into<PathBuf>, product: impl Into<String>, platform: Platform) -> Self {
        Self {
            root: root.into(),
            product: product.into(),
            platform,
        }
    }

    /// Environment for the current process: detected platform, given root,
    /// default product name.
    pub fn detect(root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(root, DEFAULT_PRODUCT, Platform::detect()?))
    }

    pub fn shared_data_dir(&self) -> PathBuf {
        self.root.join(SHARED_DATA_DIR)
    }

    /// Staging directory consumed by the packager rename.
    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(&self.product)
    }

    pub fn path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root.join(name)
    }
}

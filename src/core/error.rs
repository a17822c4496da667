use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported platform '{0}': only linux and windows are supported")]
    UnsupportedPlatform(String),

    #[error("Toolchain build failed (exit code {exit_code}): {stderr}")]
    ToolchainFailure { exit_code: i32, stderr: String },

    #[error("Release tree not found: {0}")]
    MissingReleaseTree(String),

    #[error("Missing distribution file: {0}")]
    MissingAuxFile(String),

    #[error("Invalid {field}: {problem}")]
    InvalidArgument { field: String, problem: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument(field: impl Into<String>, problem: impl Into<String>) -> Self {
        Error::InvalidArgument {
            field: field.into(),
            problem: problem.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::UnsupportedPlatform(_) => "platform.unsupported",
            Error::ToolchainFailure { .. } => "toolchain.build_failed",
            Error::MissingReleaseTree(_) => "package.missing_release_tree",
            Error::MissingAuxFile(_) => "package.missing_aux_file",
            Error::InvalidArgument { .. } => "validation.invalid_argument",
            Error::Io(_) => "internal.io_error",
        }
    }
}

// Public modules
pub mod deploy;
pub mod env;
pub mod error;
pub mod folders;
pub mod package;
pub mod pipeline;
pub mod profile;
pub mod toolchain;

// Re-export common types for convenience
pub use env::{Environment, Platform};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineState, Stage};
pub use profile::{BuildProfile, TargetProfile};

pub type CmdResult<T> = shipkit::Result<(T, i32)>;

pub mod build;
pub mod package;

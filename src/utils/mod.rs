pub mod command;
pub mod fsx;

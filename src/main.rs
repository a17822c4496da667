use clap::{Parser, Subcommand};
use serde_json::json;
use shipkit::BuildProfile;

mod commands;

use commands::{build, package};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "shipkit")]
#[command(version = VERSION)]
#[command(about = "Release-build orchestrator: versioned, platform-specific game distributions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline (reset, scaffold, build, deploy) with a debug build
    Debug,
    /// Run the full pipeline with a release build
    Release,
    /// Remove the target profile directories
    Clean,
    /// Alias for clean
    #[command(name = "remove-game-folders", hide = true)]
    RemoveGameFolders,
    /// Stamp, rename, and compress a release tree into a versioned archive
    Package(package::PackageArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Debug => to_json(build::run(BuildProfile::Debug)),
        Commands::Release => to_json(build::run(BuildProfile::Release)),
        Commands::Clean | Commands::RemoveGameFolders => to_json(build::clean()),
        Commands::Package(args) => to_json(package::run(args)),
    };

    let exit_code = match result {
        Ok((value, code)) => {
            println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
            code
        }
        Err(err) => {
            let body = json!({
                "error": {
                    "code": err.code(),
                    "message": err.to_string(),
                }
            });
            println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
            eprintln!("Error: {}", err);
            1
        }
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn to_json<T: serde::Serialize>(
    result: commands::CmdResult<T>,
) -> shipkit::Result<(serde_json::Value, i32)> {
    let (value, code) = result?;
    let value = serde_json::to_value(value)
        .map_err(|e| shipkit::Error::invalid_argument("output", e.to_string()))?;
    Ok((value, code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

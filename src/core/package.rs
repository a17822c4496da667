//! Release tree packaging: version stamping, distribution files, the
//! versioned rename, and platform-canonical compression.
//!
//! Ordering is load-bearing. The rename is a true `fs::rename`, so a crash
//! mid-packaging leaves exactly one of the two directory names on disk. A
//! compression failure after the rename leaves the versioned directory
//! behind as a recoverable artifact instead of discarding the work.
//!
//! Packaging validates only its own preconditions. A target profile that
//! received zero binaries during deployment does not invalidate packaging;
//! the deploy stage already surfaced every skip in its summary.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;

use crate::env::Environment;
use crate::error::{Error, Result};
use crate::utils::fsx;

/// Distribution files copied into every release tree from the working root.
pub const AUX_FILES: &[&str] = &["CHANGELOG.txt", "LICENSE.txt"];

pub const VERSION_FILE: &str = "version.txt";

/// One completed packaging run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseArtifact {
    pub version: String,
    pub versioned_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<PathBuf>,
}

/// Copy the first client profile tree into the staging directory, the tree
/// the packager consumes. Fails with `MissingReleaseTree` when the profile
/// was never built.
pub fn assemble(env: &Environment, from_dir: &Path) -> Result<PathBuf> {
    if !from_dir.exists() {
        return Err(Error::MissingReleaseTree(from_dir.display().to_string()));
    }
    let staging = env.staging_dir();
    log_status!(
        "package",
        "Copying '{}' to '{}'",
        from_dir.display(),
        staging.display()
    );
    fsx::copy_dir_all(from_dir, &staging)?;
    Ok(staging)
}

/// Package a release tree: stamp `version.txt`, copy distribution files,
/// rename to `{product}-{version}-{platform}`, and (optionally) compress
/// in the platform's canonical format.
pub fn package(
    env: &Environment,
    source_dir: &Path,
    version: &str,
    compress: bool,
) -> Result<ReleaseArtifact> {
    if version.trim().is_empty() {
        return Err(Error::invalid_argument("version", "must not be empty"));
    }
    if !source_dir.is_dir() {
        return Err(Error::MissingReleaseTree(source_dir.display().to_string()));
    }

    fs::write(source_dir.join(VERSION_FILE), version)?;
    log_status!("package", "Created {} with version: {}", VERSION_FILE, version);

    for name in AUX_FILES {
        let src = env.path(name);
        if !src.is_file() {
            return Err(Error::MissingAuxFile(src.display().to_string()));
        }
        fsx::copy_file(&src, &source_dir.join(name))?;
        log_status!("package", "Copied {} into release tree", name);
    }

    let versioned_name = format!("{}-{}-{}", env.product, version, env.platform.tag());
    let versioned_dir = env.path(&versioned_name);
    fs::rename(source_dir, &versioned_dir)?;
    log_status!(
        "package",
        "Renamed {} to {}",
        source_dir.display(),
        versioned_dir.display()
    );

    let archive = if compress {
        let path = compress_dir(env, &versioned_dir, &versioned_name)?;
        log_status!(
            "package",
            "Compressed {} into {}",
            versioned_dir.display(),
            path.display()
        );
        Some(path)
    } else {
        None
    };

    Ok(ReleaseArtifact {
        version: version.to_string(),
        versioned_dir,
        archive,
    })
}

/// Produce `{dir}.{tar.gz|zip}` next to `dir`. The archive's root entry is
/// the versioned directory itself, so extraction reproduces it by name.
fn compress_dir(env: &Environment, dir: &Path, root_name: &str) -> Result<PathBuf> {
    let archive_path = dir.with_file_name(format!(
        "{}.{}",
        root_name,
        env.platform.archive_extension()
    ));

    match env.platform.archive_extension() {
        "tar.gz" => write_tar_gz(dir, root_name, &archive_path)?,
        _ => write_zip(dir, root_name, &archive_path)?,
    }

    Ok(archive_path)
}

fn write_tar_gz(dir: &Path, root_name: &str, archive_path: &Path) -> Result<()> {
    let file = File::create(archive_path)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.append_dir_all(root_name, dir)?;
    let encoder = builder.into_inner()?;
    encoder.finish()?;
    Ok(())
}

fn write_zip(dir: &Path, root_name: &str, archive_path: &Path) -> Result<()> {
    let file = File::create(archive_path)?;
    let mut zip = zip::ZipWriter::new(file);
    zip.add_directory(format!("{root_name}/"), zip_options(dir)?)
        .map_err(zip_error)?;
    add_zip_dir(&mut zip, dir, root_name)?;
    zip.finish().map_err(zip_error)?;
    Ok(())
}

fn add_zip_dir(zip: &mut zip::ZipWriter<File>, dir: &Path, prefix: &str) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = format!("{}/{}", prefix, entry.file_name().to_string_lossy());

        if entry.file_type()?.is_dir() {
            zip.add_directory(format!("{name}/"), zip_options(&path)?)
                .map_err(zip_error)?;
            add_zip_dir(zip, &path, &name)?;
        } else {
            zip.start_file(name.as_str(), zip_options(&path)?)
                .map_err(zip_error)?;
            let mut buf = Vec::new();
            File::open(&path)?.read_to_end(&mut buf)?;
            zip.write_all(&buf)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn zip_options(path: &Path) -> Result<zip::write::FileOptions> {
    use std::os::unix::fs::PermissionsExt;
    let mode = fs::metadata(path)?.permissions().mode();
    Ok(zip::write::FileOptions::default().unix_permissions(mode))
}

#[cfg(not(unix))]
fn zip_options(_path: &Path) -> Result<zip::write::FileOptions> {
    Ok(zip::write::FileOptions::default())
}

fn zip_error(e: zip::result::ZipError) -> Error {
    Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

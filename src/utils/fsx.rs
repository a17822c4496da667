//! Filesystem primitives shared by the pipeline stages.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Recursively copy the contents of `src` into `dst`, overwriting
/// conflicting paths. `dst` is created if absent.
///
/// `fs::copy` carries permission bits, so executable files stay executable
/// on platforms where that matters.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Copy a single file, creating the destination's parent directory first.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_dir_all_copies_nested_trees() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.txt"), "a").unwrap();
        fs::write(src.join("nested/b.txt"), "b").unwrap();

        let dst = dir.path().join("dst");
        copy_dir_all(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dst.join("nested/b.txt")).unwrap(), "b");
    }

    #[test]
    fn copy_dir_all_overwrites_conflicting_files() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("config.dat"), "new").unwrap();
        fs::write(dst.join("config.dat"), "old").unwrap();

        copy_dir_all(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("config.dat")).unwrap(), "new");
    }

    #[test]
    fn copy_file_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("bin.dat");
        fs::write(&src, "payload").unwrap();

        let dst = dir.path().join("deep/nested/bin.dat");
        copy_file(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(&dst).unwrap(), "payload");
    }
}

//! File and directory tree copying
//!
//! Files are copied with their permissions and modification time. Trees are
//! merged into any existing destination; `replace_tree` removes the
//! destination first.

use std::fs::{self, File};
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{SafekeepError, SafekeepResult};

/// Copy a single file, preserving permissions and modification time
///
/// Parent directories of `dst` are created as needed.
pub fn copy_file_with_metadata(src: &Path, dst: &Path) -> SafekeepResult<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| SafekeepError::copy_failure(dst, e))?;
    }

    // A read-only destination cannot be opened for writing; replace it instead
    if fs::symlink_metadata(dst).is_ok_and(|m| m.is_file() && m.permissions().readonly()) {
        fs::remove_file(dst).map_err(|e| SafekeepError::copy_failure(dst, e))?;
    }

    // fs::copy carries the permission bits over
    fs::copy(src, dst).map_err(|e| SafekeepError::copy_failure(src, e))?;

    let modified = fs::metadata(src)
        .and_then(|m| m.modified())
        .map_err(|e| SafekeepError::copy_failure(src, e))?;

    // Setting times only needs ownership, so a read-only handle is enough
    File::open(dst)
        .and_then(|f| f.set_modified(modified))
        .map_err(|e| SafekeepError::copy_failure(dst, e))?;

    Ok(())
}

/// Recursively copy `src` into `dst`, merging with existing content
///
/// Existing files at the destination are overwritten; files present only at
/// the destination are left alone. Symlinks are followed.
pub fn copy_tree(src: &Path, dst: &Path) -> SafekeepResult<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| SafekeepError::copy_failure(src, e))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| SafekeepError::copy_failure(entry.path(), e))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| SafekeepError::copy_failure(&target, e))?;
        } else {
            copy_file_with_metadata(entry.path(), &target)?;
        }
    }

    Ok(())
}

/// Replace `dst` with a fresh copy of `src`
pub fn replace_tree(src: &Path, dst: &Path) -> SafekeepResult<()> {
    if dst.is_dir() {
        fs::remove_dir_all(dst).map_err(|e| SafekeepError::copy_failure(dst, e))?;
    } else if dst.exists() {
        fs::remove_file(dst).map_err(|e| SafekeepError::copy_failure(dst, e))?;
    }

    copy_tree(src, dst)
}

/// Copy whatever lives at `src` (file or tree) to `dst`, merging trees
///
/// Returns `SourceMissing` if `src` does not exist.
pub fn copy_entry(src: &Path, dst: &Path) -> SafekeepResult<()> {
    if src.is_file() {
        copy_file_with_metadata(src, dst)
    } else if src.is_dir() {
        copy_tree(src, dst)
    } else {
        Err(SafekeepError::SourceMissing(src.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_copy_file_preserves_mtime() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.txt");
        let dst = temp.path().join("out").join("a.txt");
        fs::write(&src, "hello").unwrap();

        let past = SystemTime::now() - Duration::from_secs(3600);
        File::options()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(past)
            .unwrap();

        copy_file_with_metadata(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(&dst).unwrap(), "hello");
        let src_mtime = fs::metadata(&src).unwrap().modified().unwrap();
        let dst_mtime = fs::metadata(&dst).unwrap().modified().unwrap();
        assert_eq!(src_mtime, dst_mtime);
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_read_only_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let src = temp.path().join("build.sh");
        let dst = temp.path().join("out").join("build.sh");
        fs::write(&src, "#!/bin/sh").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o555)).unwrap();

        copy_file_with_metadata(&src, &dst).unwrap();
        // Copying again over the now read-only destination also works
        copy_file_with_metadata(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(&dst).unwrap(), "#!/bin/sh");
        let mode = fs::metadata(&dst).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o555);
        assert_eq!(
            fs::metadata(&src).unwrap().modified().unwrap(),
            fs::metadata(&dst).unwrap().modified().unwrap()
        );
    }

    #[test]
    fn test_copy_tree_merges() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.cpp"), "a").unwrap();
        fs::write(src.join("nested").join("b.cpp"), "b").unwrap();

        fs::create_dir_all(&dst).unwrap();
        fs::write(dst.join("existing.txt"), "keep").unwrap();
        fs::write(dst.join("a.cpp"), "old").unwrap();

        copy_tree(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("a.cpp")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dst.join("nested").join("b.cpp")).unwrap(), "b");
        assert_eq!(fs::read_to_string(dst.join("existing.txt")).unwrap(), "keep");
    }

    #[test]
    fn test_replace_tree_drops_stale_files() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.cpp"), "a").unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(dst.join("stale.cpp"), "stale").unwrap();

        replace_tree(&src, &dst).unwrap();

        assert!(dst.join("a.cpp").exists());
        assert!(!dst.join("stale.cpp").exists());
    }

    #[test]
    fn test_copy_entry_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = copy_entry(&temp.path().join("nope"), &temp.path().join("out")).unwrap_err();
        assert!(matches!(err, SafekeepError::SourceMissing(_)));
    }
}

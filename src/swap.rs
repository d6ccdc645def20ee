//! Replaces the source directory with the staged output.
//!
//! The old source is renamed aside first and only deleted once the staged
//! directory sits at the source path, so there is no moment where neither
//! copy exists on disk.

use crate::batch::is_jpeg_file_name;
use crate::constants::SWAP_ASIDE_SUFFIX;
use crate::error::{Result, SqueezeError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Counts regular `.jpg` files directly inside `dir`. A missing directory counts as zero.
pub fn count_staged_images(dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() && is_jpeg_file_name(&entry.file_name()) {
            count += 1;
        }
    }
    Ok(count)
}

/// First free sibling name of the form `<name>.replaced`, `<name>.replaced-1`, ...
pub fn aside_path(source: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut candidate = source.with_file_name(format!("{}{}", name, SWAP_ASIDE_SUFFIX));
    let mut n = 1;
    while candidate.exists() {
        candidate = source.with_file_name(format!("{}{}-{}", name, SWAP_ASIDE_SUFFIX, n));
        n += 1;
    }
    candidate
}

/// Moves `staging` into place at `source` after checking it holds `expected` images.
///
/// On a count mismatch the source is left untouched. If the final rename
/// fails, the old source is moved back.
pub fn swap_directories(source: &Path, staging: &Path, expected: usize) -> Result<()> {
    swap_with(source, staging, expected, |from, to| fs::rename(from, to))
}

fn swap_with<R>(source: &Path, staging: &Path, expected: usize, mut rename: R) -> Result<()>
where
    R: FnMut(&Path, &Path) -> io::Result<()>,
{
    let found = count_staged_images(staging)?;
    if found != expected {
        return Err(SqueezeError::StagingIncomplete { expected, found });
    }

    let aside = aside_path(source);
    crate::verbose!("Moving {:?} aside to {:?}", source, aside);
    rename(source, &aside).map_err(|e| SqueezeError::Swap {
        step: "moving the source directory aside",
        source: e,
    })?;

    if let Err(e) = rename(staging, source) {
        if let Err(rollback) = rename(&aside, source) {
            crate::error!(
                "Rollback failed, original files remain at {:?}: {}",
                aside,
                rollback
            );
        }
        return Err(SqueezeError::Swap {
            step: "moving the staging directory into place",
            source: e,
        });
    }

    crate::verbose!("Removing replaced directory {:?}", aside);
    fs::remove_dir_all(&aside).map_err(|e| SqueezeError::Swap {
        step: "removing the replaced source directory",
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populate(dir: &Path, names: &[&str]) {
        fs::create_dir_all(dir).unwrap();
        for name in names {
            fs::write(dir.join(name), name.as_bytes()).unwrap();
        }
    }

    #[test]
    fn test_count_staged_images() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("stage");
        populate(&dir, &["a.jpg", "b.jpg", "c.JPG", "notes.txt"]);

        assert_eq!(count_staged_images(&dir).unwrap(), 2);
        assert_eq!(count_staged_images(&temp_dir.path().join("nope")).unwrap(), 0);
    }

    #[test]
    fn test_swap_replaces_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("screenshots");
        let staging = temp_dir.path().join("_screenshots");
        populate(&source, &["a.jpg", "readme.txt"]);
        populate(&staging, &["a.jpg"]);
        fs::write(staging.join("a.jpg"), b"compressed").unwrap();

        swap_directories(&source, &staging, 1).unwrap();

        assert!(!staging.exists());
        assert_eq!(fs::read(source.join("a.jpg")).unwrap(), b"compressed");
        assert!(!source.join("readme.txt").exists());
        assert!(!aside_path(&source).exists());
        assert!(!temp_dir.path().join("screenshots.replaced").exists());
    }

    #[test]
    fn test_swap_count_mismatch_leaves_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("screenshots");
        let staging = temp_dir.path().join("_screenshots");
        populate(&source, &["a.jpg", "b.jpg"]);
        populate(&staging, &["a.jpg"]);

        let result = swap_directories(&source, &staging, 2);
        assert!(matches!(
            result,
            Err(SqueezeError::StagingIncomplete {
                expected: 2,
                found: 1
            })
        ));
        assert!(source.join("b.jpg").exists());
        assert!(staging.join("a.jpg").exists());
    }

    #[test]
    fn test_swap_missing_staging() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("screenshots");
        populate(&source, &["a.jpg"]);

        let result = swap_directories(&source, &temp_dir.path().join("_screenshots"), 1);
        assert!(matches!(
            result,
            Err(SqueezeError::StagingIncomplete { found: 0, .. })
        ));
        assert!(source.join("a.jpg").exists());
    }

    #[test]
    fn test_failed_staging_rename_restores_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("screenshots");
        let staging = temp_dir.path().join("_screenshots");
        populate(&source, &["a.jpg", "readme.txt"]);
        populate(&staging, &["a.jpg"]);
        fs::write(staging.join("a.jpg"), b"compressed").unwrap();

        let mut calls = 0;
        let result = swap_with(&source, &staging, 1, |from, to| {
            calls += 1;
            if calls == 2 {
                return Err(io::Error::new(io::ErrorKind::Other, "cross-device link"));
            }
            fs::rename(from, to)
        });

        assert!(matches!(
            result,
            Err(SqueezeError::Swap {
                step: "moving the staging directory into place",
                ..
            })
        ));
        assert_eq!(calls, 3);
        assert_eq!(fs::read(source.join("a.jpg")).unwrap(), b"a.jpg");
        assert!(source.join("readme.txt").exists());
        assert_eq!(fs::read(staging.join("a.jpg")).unwrap(), b"compressed");
        assert!(!temp_dir.path().join("screenshots.replaced").exists());
    }

    #[test]
    fn test_aside_path_skips_taken_names() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("shots");
        fs::create_dir(temp_dir.path().join("shots.replaced")).unwrap();

        assert_eq!(aside_path(&source), temp_dir.path().join("shots.replaced-1"));
    }
}

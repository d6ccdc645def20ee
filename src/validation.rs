use crate::config::PipelineConfig;
use crate::error::{Result, SqueezeError};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Checks that the source exists and is a directory.
pub fn validate_source_dir(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(SqueezeError::SourceNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(SqueezeError::NotADirectory(path.to_path_buf()));
    }

    path.canonicalize()
        .map_err(|_| SqueezeError::SourceNotFound(path.to_path_buf()))
}

/// Validate the three directories of a run before anything is written.
///
/// Staging and thumbnails must not live inside the source, since the source
/// tree is deleted once the staged copies take its place. A pre-existing
/// staging directory must be empty so the post-run image count is exact.
pub fn validate_layout(config: &PipelineConfig) -> Result<()> {
    let source = validate_source_dir(&config.source_dir)?;
    let staging = resolve_path(&config.staging_dir)?;
    let thumbnails = resolve_path(&config.thumbnails_dir)?;

    if staging == source || thumbnails == source || staging == thumbnails {
        return Err(SqueezeError::InvalidLayout(format!(
            "source {:?}, staging {:?} and thumbnails {:?} must be three different directories",
            config.source_dir, config.staging_dir, config.thumbnails_dir
        )));
    }

    for (label, dir) in [("staging", &staging), ("thumbnails", &thumbnails)] {
        if dir.starts_with(&source) {
            return Err(SqueezeError::InvalidLayout(format!(
                "{} directory {:?} is inside the source directory {:?}",
                label, dir, source
            )));
        }
        if dir.exists() && !dir.is_dir() {
            return Err(SqueezeError::InvalidLayout(format!(
                "{} path {:?} exists and is not a directory",
                label, dir
            )));
        }
    }

    if thumbnails.starts_with(&staging) || staging.starts_with(&thumbnails) {
        return Err(SqueezeError::InvalidLayout(format!(
            "staging {:?} and thumbnails {:?} must not be nested in each other",
            config.staging_dir, config.thumbnails_dir
        )));
    }

    if staging.is_dir() && fs::read_dir(&staging)?.next().is_some() {
        return Err(SqueezeError::StagingNotEmpty(config.staging_dir.clone()));
    }

    Ok(())
}

/// Absolute form of `path` with its existing prefix canonicalized, so paths
/// that do not exist yet can still be compared against real ones.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut existing = absolute.as_path();
    let mut missing: Vec<OsString> = Vec::new();
    loop {
        if existing.exists() {
            let mut resolved = existing.canonicalize()?;
            resolved.extend(missing.iter().rev());
            return Ok(resolved);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
}

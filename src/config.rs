use crate::constants::{DEFAULT_THUMBNAILS_DIR_NAME, STAGING_DIR_PREFIX};
use crate::processing::CompressionOptions;
use std::path::{Path, PathBuf};

/// What to do when the source directory holds no `.jpg` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySourcePolicy {
    /// Return `SqueezeError::NoImagesFound` without touching anything.
    #[default]
    Fail,
    /// Succeed without changes; the source directory is left as is.
    Skip,
}

/// Everything one batch run needs. Paths are always passed in, never global.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source_dir: PathBuf,
    pub staging_dir: PathBuf,
    pub thumbnails_dir: PathBuf,
    pub options: CompressionOptions,
    pub empty_source: EmptySourcePolicy,
}

impl PipelineConfig {
    /// Builds a config with the staging and thumbnail directories placed next
    /// to `source_dir`: `<parent>/_<name>` and `<parent>/thumbs`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let staging_dir = default_staging_dir(&source_dir);
        let thumbnails_dir = sibling(&source_dir, DEFAULT_THUMBNAILS_DIR_NAME);

        Self {
            source_dir,
            staging_dir,
            thumbnails_dir,
            options: CompressionOptions::default(),
            empty_source: EmptySourcePolicy::default(),
        }
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    pub fn with_thumbnails_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.thumbnails_dir = dir.into();
        self
    }

    pub fn with_options(mut self, options: CompressionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_empty_source(mut self, policy: EmptySourcePolicy) -> Self {
        self.empty_source = policy;
        self
    }
}

fn default_staging_dir(source_dir: &Path) -> PathBuf {
    let name = source_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "source".to_string());
    sibling(source_dir, &format!("{}{}", STAGING_DIR_PREFIX, name))
}

fn sibling(path: &Path, name: &str) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqueezeError {
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Source path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: jpeg_encoder::EncodingError,
    },

    #[error("Image {path} is {width}x{height}, JPEG sides are limited to 65535 pixels")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid thumbnail scale: {0}. Must be greater than 0 and at most 1")]
    InvalidThumbnailScale(f64),

    #[error("Thumbnail for {path} would be {width}x{height} pixels")]
    ThumbnailTooSmall {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    #[error("Invalid directory layout: {0}")]
    InvalidLayout(String),

    #[error("Staging directory already exists and is not empty: {0}")]
    StagingNotEmpty(PathBuf),

    #[error("No .jpg files found in source directory: {0}")]
    NoImagesFound(PathBuf),

    #[error("Staging directory holds {found} images, expected {expected}")]
    StagingIncomplete { expected: usize, found: usize },

    #[error("Directory swap failed while {step}: {source}")]
    Swap {
        step: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SqueezeError {
    /// True when the failure belongs to one image rather than to the batch layout.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            SqueezeError::Decode { .. }
                | SqueezeError::Encode { .. }
                | SqueezeError::ImageTooLarge { .. }
                | SqueezeError::Write { .. }
                | SqueezeError::ThumbnailTooSmall { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SqueezeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_file_classification() {
        let err = SqueezeError::ThumbnailTooSmall {
            path: PathBuf::from("a.jpg"),
            width: 0,
            height: 3,
        };
        assert!(err.is_per_file());

        assert!(!SqueezeError::NoImagesFound(PathBuf::from("shots")).is_per_file());
        assert!(!SqueezeError::StagingIncomplete {
            expected: 2,
            found: 1
        }
        .is_per_file());
    }

    #[test]
    fn test_error_messages() {
        let err = SqueezeError::InvalidQuality(0);
        assert_eq!(
            err.to_string(),
            "Invalid quality value: 0. Must be between 1 and 100"
        );

        let err = SqueezeError::StagingIncomplete {
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Staging directory holds 2 images, expected 3"
        );
    }
}

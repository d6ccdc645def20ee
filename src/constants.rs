pub const DEFAULT_QUALITY: u8 = 60;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_THUMBNAIL_SCALE: f64 = 0.3;

/// Only entries whose name ends with this exact, case-sensitive suffix are processed.
pub const JPEG_SUFFIX: &str = ".jpg";

/// Default staging dir is the source's sibling `_<source-name>`.
pub const STAGING_DIR_PREFIX: &str = "_";
pub const DEFAULT_THUMBNAILS_DIR_NAME: &str = "thumbs";

/// Suffix for the old source directory while the swap is in flight.
pub const SWAP_ASIDE_SUFFIX: &str = ".replaced";

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

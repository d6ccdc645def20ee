use crate::config::{EmptySourcePolicy, PipelineConfig};
use crate::constants::JPEG_SUFFIX;
use crate::error::{Result, SqueezeError};
use crate::processing::{encode_jpeg, load_rgb_image, make_thumbnail, CompressionOptions};
use crate::swap::swap_directories;
use crate::utils::{calculate_compression_ratio, create_progress_bar, format_file_size};
use crate::validation::validate_layout;
use crate::{info, verbose, warn};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Entries found directly inside the source directory, in filesystem order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceScan {
    /// Regular files whose name ends in `.jpg`.
    pub images: Vec<PathBuf>,
    /// Everything else. These are removed along with the source directory.
    pub others: Vec<PathBuf>,
}

/// What a run would do, computed without writing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub source_dir: PathBuf,
    pub staging_dir: PathBuf,
    pub thumbnails_dir: PathBuf,
    pub scan: SourceScan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImage {
    pub source_path: PathBuf,
    pub staged_path: PathBuf,
    pub thumbnail_path: PathBuf,
    pub dimensions: (u32, u32),
    pub thumbnail_dimensions: (u32, u32),
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub thumbnail_bytes: u64,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub processed: Vec<ProcessedImage>,
    pub discarded: Vec<PathBuf>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn original_bytes(&self) -> u64 {
        self.processed.iter().map(|p| p.original_bytes).sum()
    }

    pub fn compressed_bytes(&self) -> u64 {
        self.processed.iter().map(|p| p.compressed_bytes).sum()
    }

    pub fn thumbnail_bytes(&self) -> u64 {
        self.processed.iter().map(|p| p.thumbnail_bytes).sum()
    }

    pub fn print_summary(&self) {
        let before = self.original_bytes();
        let after = self.compressed_bytes();

        info!("\n📊 Batch Compression Summary:");
        info!("  📁 Images processed: {}", self.processed.len());
        info!("  🗑️  Entries discarded: {}", self.discarded.len());
        info!("  📊 Total original size: {}", format_file_size(before));
        info!("  📊 Total compressed size: {}", format_file_size(after));
        info!(
            "  🖼️  Total thumbnail size: {}",
            format_file_size(self.thumbnail_bytes())
        );
        info!(
            "  🎯 Overall compression ratio: {:.1}%",
            calculate_compression_ratio(before, after)
        );
        info!("  ⏱️  Total time: {:.2?}", self.elapsed);
    }
}

/// Exact, case-sensitive `.jpg` suffix check on an entry name.
pub fn is_jpeg_file_name(name: &OsStr) -> bool {
    name.to_string_lossy().ends_with(JPEG_SUFFIX)
}

/// Lists the direct children of `source_dir`, splitting them into images and the rest.
pub fn scan_source(source_dir: &Path) -> Result<SourceScan> {
    let mut scan = SourceScan::default();

    for entry in WalkDir::new(source_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() && is_jpeg_file_name(entry.file_name()) {
            scan.images.push(entry.into_path());
        } else {
            scan.others.push(entry.into_path());
        }
    }

    Ok(scan)
}

pub fn plan_batch(config: &PipelineConfig) -> Result<BatchPlan> {
    validate_layout(config)?;
    let scan = scan_source(&config.source_dir)?;

    Ok(BatchPlan {
        source_dir: config.source_dir.clone(),
        staging_dir: config.staging_dir.clone(),
        thumbnails_dir: config.thumbnails_dir.clone(),
        scan,
    })
}

/// Recompresses every `.jpg` in the source directory, writes thumbnails, and
/// replaces the source directory with the recompressed copies.
///
/// Runs sequentially and stops at the first error. The source directory is
/// not modified until every image has been staged and the staged count has
/// been checked. Running it again on its own output recompresses the already
/// lossy images and loses more quality each time.
///
/// # Errors
/// * `SourceNotFound` / `NotADirectory` - bad source path
/// * `InvalidLayout` / `StagingNotEmpty` - the three directories conflict
/// * `NoImagesFound` - no `.jpg` files and `EmptySourcePolicy::Fail`
/// * `Decode` / `Encode` / `ImageTooLarge` / `Write` / `ThumbnailTooSmall` - a
///   single image failed; the partial staging directory is removed
/// * `StagingIncomplete` / `Swap` - the final directory swap failed
pub fn compress_screenshots(config: &PipelineConfig) -> Result<BatchReport> {
    let start_time = Instant::now();
    let plan = plan_batch(config)?;
    let scan = plan.scan;

    info!("🚀 Starting batch compression...");
    info!("📁 Source: {:?}", config.source_dir);
    info!("📁 Staging: {:?}", config.staging_dir);
    info!("📁 Thumbnails: {:?}", config.thumbnails_dir);

    if scan.images.is_empty() {
        return match config.empty_source {
            EmptySourcePolicy::Fail => Err(SqueezeError::NoImagesFound(config.source_dir.clone())),
            EmptySourcePolicy::Skip => {
                warn!("No .jpg files found, leaving {:?} unchanged", config.source_dir);
                Ok(BatchReport {
                    elapsed: start_time.elapsed(),
                    ..BatchReport::default()
                })
            }
        };
    }

    for other in &scan.others {
        warn!("Not a .jpg file, will be removed with the source directory: {:?}", other);
    }

    info!("📊 Found {} images to process", scan.images.len());

    create_dir(&config.staging_dir)?;
    let staged = create_dir(&config.thumbnails_dir).and_then(|()| stage_images(&scan.images, config));
    let processed = match staged {
        Ok(processed) => processed,
        Err(e) => {
            // Validation saw staging absent or empty, so everything in it is ours.
            discard_staging(&config.staging_dir);
            return Err(e);
        }
    };

    info!("🔁 Replacing {:?} with staged images", config.source_dir);
    swap_directories(&config.source_dir, &config.staging_dir, processed.len())?;

    let report = BatchReport {
        processed,
        discarded: scan.others,
        elapsed: start_time.elapsed(),
    };
    report.print_summary();
    Ok(report)
}

/// Runs `process_single_image` over `images` in order, stopping at the first failure.
fn stage_images(images: &[PathBuf], config: &PipelineConfig) -> Result<Vec<ProcessedImage>> {
    let progress = create_progress_bar(images.len() as u64);
    let mut processed = Vec::with_capacity(images.len());
    for image_path in images {
        let name = image_path.file_name().unwrap_or_default().to_string_lossy();
        progress.set_message(name.to_string());

        let image = match process_single_image(image_path, config) {
            Ok(image) => image,
            Err(e) => {
                progress.abandon_with_message(format!("failed on {}", name));
                return Err(e);
            }
        };

        progress.suspend(|| info!("✅ processed {}, {:?} saved", name, image.staged_path));
        processed.push(image);
        progress.inc(1);
    }
    progress.finish_with_message("all images staged");
    Ok(processed)
}

fn discard_staging(dir: &Path) {
    verbose!("Removing partial staging directory {:?}", dir);
    if let Err(e) = fs::remove_dir_all(dir) {
        warn!("Could not remove staging directory {:?}: {}", dir, e);
    }
}

/// Decode, stage a full-size copy, and write a thumbnail for one image.
///
/// The thumbnail is sized before anything is written, so an image too small
/// to thumbnail leaves nothing behind. Both outputs take the source file's
/// permissions.
pub fn process_single_image(image_path: &Path, config: &PipelineConfig) -> Result<ProcessedImage> {
    let file_name = image_path
        .file_name()
        .ok_or_else(|| SqueezeError::InvalidLayout(format!("no file name in {:?}", image_path)))?;
    let staged_path = config.staging_dir.join(file_name);
    let thumbnail_path = config.thumbnails_dir.join(file_name);
    let CompressionOptions {
        quality,
        thumbnail_scale,
    } = config.options;

    verbose!("processing {:?}", file_name);
    let permissions = fs::metadata(image_path)?.permissions();
    let (img, original_bytes) = load_rgb_image(image_path)?;
    let thumbnail = make_thumbnail(&img, thumbnail_scale, image_path)?;

    let compressed_bytes = encode_jpeg(&img, &staged_path, quality, &permissions)?;
    let thumbnail_bytes = encode_jpeg(&thumbnail, &thumbnail_path, quality, &permissions)?;
    verbose!(
        "{}x{} -> thumbnail {}x{}",
        img.width(),
        img.height(),
        thumbnail.width(),
        thumbnail.height()
    );

    Ok(ProcessedImage {
        source_path: image_path.to_path_buf(),
        staged_path,
        thumbnail_path,
        dimensions: img.dimensions(),
        thumbnail_dimensions: thumbnail.dimensions(),
        original_bytes,
        compressed_bytes,
        thumbnail_bytes,
    })
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| SqueezeError::DirectoryCreationFailed {
        path: dir.to_path_buf(),
        source,
    })
}

pub fn print_plan(plan: &BatchPlan) {
    info!("📋 Plan for {:?}", plan.source_dir);
    info!("  📁 Staging: {:?}", plan.staging_dir);
    info!("  📁 Thumbnails: {:?}", plan.thumbnails_dir);
    info!("  🖼️  Images to compress: {}", plan.scan.images.len());
    for image in &plan.scan.images {
        info!("    {}", image.display());
    }
    info!("  🗑️  Entries that will be removed: {}", plan.scan.others.len());
    for other in &plan.scan.others {
        info!("    {}", other.display());
    }
}

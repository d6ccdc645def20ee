use crate::batch::is_jpeg_file_name;
use crate::error::{Result, SqueezeError};
use crate::processing::{thumbnail_dimensions, CompressionOptions};
use crate::utils::format_file_size;
use image::{ColorType, ImageReader};
use std::fs;
use std::path::Path;

/// What the batch would see for a single file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub color: ColorType,
    pub file_size: u64,
    pub format: Option<image::ImageFormat>,
    pub thumbnail: (u32, u32),
    pub selected: bool,
}

/// Inspect a single file the way a batch run would see it
///
/// # Arguments
/// * `input_path` - The image file to inspect
/// * `options` - Supplies the thumbnail scale used for the predicted thumbnail size
///
/// # Returns
/// * `Ok(ImageInfo)` - Decoded dimensions, color type, format and size
/// * `Err(SqueezeError::SourceNotFound)` - If the file does not exist
/// * `Err(SqueezeError::Decode)` - If the file is not a decodable image
pub fn inspect_image(input_path: &Path, options: &CompressionOptions) -> Result<ImageInfo> {
    if !input_path.exists() {
        return Err(SqueezeError::SourceNotFound(input_path.to_path_buf()));
    }

    let file_size = fs::metadata(input_path)?.len();
    let reader = ImageReader::open(input_path)?.with_guessed_format()?;
    let format = reader.format();
    let img = reader.decode().map_err(|source| SqueezeError::Decode {
        path: input_path.to_path_buf(),
        source,
    })?;

    let selected = input_path
        .file_name()
        .map(is_jpeg_file_name)
        .unwrap_or(false);

    Ok(ImageInfo {
        width: img.width(),
        height: img.height(),
        color: img.color(),
        file_size,
        format,
        thumbnail: thumbnail_dimensions(img.width(), img.height(), options.thumbnail_scale),
        selected,
    })
}

/// Print a report for one image and return what was found
///
/// Same as `inspect_image`, plus a console report of the predicted thumbnail
/// and whether a run would pick the file up.
pub fn get_image_info(input_path: &Path, options: &CompressionOptions) -> Result<ImageInfo> {
    println!("📊 Analyzing image: {:?}", input_path);
    let info = inspect_image(input_path, options)?;

    println!("📋 Basic Information:");
    println!("  📏 Dimensions: {}x{} pixels", info.width, info.height);
    println!("  📦 File size: {}", format_file_size(info.file_size));
    println!("  🎨 Color type: {:?}", info.color);
    println!("  🎭 Image format: {:?}", info.format);
    if info.color != ColorType::Rgb8 {
        println!("  🔄 Will be converted to Rgb8 before encoding");
    }

    let (tw, th) = info.thumbnail;
    println!(
        "  🖼️  Thumbnail at scale {}: {}x{} pixels",
        options.thumbnail_scale, tw, th
    );
    if tw == 0 || th == 0 {
        println!("  ⚠️  Thumbnail would be empty; a batch run fails on this image");
    }
    if !info.selected {
        println!("  ⚠️  Name does not end in .jpg; a batch run would skip and delete it");
    }

    Ok(info)
}

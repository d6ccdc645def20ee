use crate::constants::{DEFAULT_QUALITY, DEFAULT_THUMBNAIL_SCALE, MAX_QUALITY, MIN_QUALITY};
use crate::error::{Result, SqueezeError};
use image::imageops::{self, FilterType};
use image::{ImageReader, RgbImage};
use jpeg_encoder::{ColorType, Encoder};
use std::fs::{self, Permissions};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionOptions {
    pub quality: u8,
    pub thumbnail_scale: f64,
}

impl CompressionOptions {
    pub fn new(quality: Option<u8>, thumbnail_scale: Option<f64>) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(SqueezeError::InvalidQuality(quality));
        }

        let thumbnail_scale = thumbnail_scale.unwrap_or(DEFAULT_THUMBNAIL_SCALE);
        if !thumbnail_scale.is_finite() || thumbnail_scale <= 0.0 || thumbnail_scale > 1.0 {
            return Err(SqueezeError::InvalidThumbnailScale(thumbnail_scale));
        }

        Ok(Self {
            quality,
            thumbnail_scale,
        })
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            thumbnail_scale: DEFAULT_THUMBNAIL_SCALE,
        }
    }
}

/// Decodes an image and normalizes it to 8-bit RGB.
///
/// The format is sniffed from the file contents, so a `.jpg` that is really
/// a PNG still loads. Grayscale, indexed and alpha images all come back as
/// three-channel RGB, which is what the JPEG encoder is fed.
///
/// # Returns
/// * `Ok((image, file_size))` - The decoded RGB image and the source size in bytes
/// * `Err(SqueezeError::Decode)` - If the file is not a decodable image
pub fn load_rgb_image(input_path: &Path) -> Result<(RgbImage, u64)> {
    let file_size = fs::metadata(input_path)?.len();

    let decode_err = |source: image::ImageError| SqueezeError::Decode {
        path: input_path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()
        .map_err(decode_err)?;

    Ok((img.to_rgb8(), file_size))
}

/// Scales both sides by `scale`, truncating toward zero.
pub fn thumbnail_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let scaled = |side: u32| (side as f64 * scale).floor() as u32;
    (scaled(width), scaled(height))
}

pub fn make_thumbnail(img: &RgbImage, scale: f64, source_path: &Path) -> Result<RgbImage> {
    let (width, height) = thumbnail_dimensions(img.width(), img.height(), scale);
    if width == 0 || height == 0 {
        return Err(SqueezeError::ThumbnailTooSmall {
            path: source_path.to_path_buf(),
            width,
            height,
        });
    }

    Ok(imageops::resize(img, width, height, FilterType::CatmullRom))
}

/// Encodes `img` as a baseline JPEG with optimized Huffman tables.
///
/// # Arguments
/// * `img` - RGB pixels to encode
/// * `quality` - JPEG quality, 1-100
/// * `optimize` - Build per-image Huffman tables instead of the standard ones
/// * `output_path` - Only used to label errors
///
/// # Returns
/// * `Ok(bytes)` - The complete JPEG file
/// * `Err(SqueezeError::ImageTooLarge)` - If a side exceeds 65535 pixels
/// * `Err(SqueezeError::Encode)` - If the encoder rejects the image
pub fn encode_jpeg_data(
    img: &RgbImage,
    quality: u8,
    optimize: bool,
    output_path: &Path,
) -> Result<Vec<u8>> {
    let too_large = || SqueezeError::ImageTooLarge {
        path: output_path.to_path_buf(),
        width: img.width(),
        height: img.height(),
    };
    let width = u16::try_from(img.width()).map_err(|_| too_large())?;
    let height = u16::try_from(img.height()).map_err(|_| too_large())?;

    let mut data = Vec::new();
    let mut encoder = Encoder::new(&mut data, quality);
    encoder.set_optimized_huffman_tables(optimize);
    encoder
        .encode(img.as_raw(), width, height, ColorType::Rgb)
        .map_err(|source| SqueezeError::Encode {
            path: output_path.to_path_buf(),
            source,
        })?;

    Ok(data)
}

/// Encodes `img` as an optimized JPEG at `output_path` and returns the written size.
///
/// The bytes go to a temp file next to the destination first and are then
/// persisted over the final name, so an interrupted write never leaves a
/// truncated JPEG under `output_path`. The temp file is created owner-only,
/// so `permissions` is applied to it before it takes the final name.
pub fn encode_jpeg(
    img: &RgbImage,
    output_path: &Path,
    quality: u8,
    permissions: &Permissions,
) -> Result<u64> {
    let write_err = |source: std::io::Error| SqueezeError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    let data = encode_jpeg_data(img, quality, true, output_path)?;

    let parent = match output_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
    temp.write_all(&data).map_err(write_err)?;
    temp.as_file()
        .set_permissions(permissions.clone())
        .map_err(write_err)?;

    temp.persist(output_path).map_err(|e| write_err(e.error))?;

    Ok(data.len() as u64)
}

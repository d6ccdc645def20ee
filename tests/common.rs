#![allow(dead_code)]

use image::{GrayImage, Luma, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    img.save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
}

pub fn write_gray_jpeg(path: &Path, width: u32, height: u32) {
    GrayImage::from_pixel(width, height, Luma([90]))
        .save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
}

/// `<tmp>/screenshots` holding `a.jpg` (100x200) and `readme.txt`.
pub fn create_screenshot_dir(temp_dir: &Path) -> PathBuf {
    let source = temp_dir.join("screenshots");
    fs::create_dir(&source).unwrap();
    write_test_jpeg(&source.join("a.jpg"), 100, 200);
    fs::write(source.join("readme.txt"), b"not an image").unwrap();
    source
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

pub fn dir_entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

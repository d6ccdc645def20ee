pub mod logger;

pub mod batch;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod info;
pub mod processing;
pub mod swap;
pub mod utils;
pub mod validation;

pub use batch::{
    compress_screenshots, is_jpeg_file_name, plan_batch, print_plan, process_single_image,
    scan_source, BatchPlan, BatchReport, ProcessedImage, SourceScan,
};
pub use config::{EmptySourcePolicy, PipelineConfig};
pub use error::{Result, SqueezeError};
pub use info::{get_image_info, inspect_image, ImageInfo};
pub use processing::{
    encode_jpeg, encode_jpeg_data, load_rgb_image, make_thumbnail, thumbnail_dimensions, CompressionOptions,
};
pub use swap::swap_directories;

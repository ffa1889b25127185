//! Raster rendering of frequency results.
//!
//! Two renderers over the `image` crate: bar charts ([`render_bar_chart`],
//! [`render_horizontal_bar_chart`]) and a word cloud
//! ([`render_word_cloud`]). Both take a [`wf_freq::FrequencyTable`] and a
//! config struct and return an [`image::RgbImage`]; [`save_png`] writes the
//! result to disk, creating parent directories on demand.
//!
//! Rendering is fully deterministic: ranking comes from the table's total
//! order, word-cloud placement walks a fixed spiral, and colors are derived
//! from the word bytes rather than a RNG.

mod bars;
mod cloud;
mod text;

pub use bars::{render_bar_chart, render_horizontal_bar_chart, BarChartConfig};
pub use cloud::{render_word_cloud, WordCloudConfig};

use std::fs;
use std::path::Path;

use image::RgbImage;
use thiserror::Error;
use tracing::info;

/// Shared color definitions.
pub mod colors {
    use image::Rgb;

    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const SKY_BLUE: Rgb<u8> = Rgb([135, 206, 235]);
    pub const DARK_GRAY: Rgb<u8> = Rgb([60, 60, 60]);
    pub const LIGHT_GRAY: Rgb<u8> = Rgb([200, 200, 200]);

    /// Default word-cloud palette, dark-to-bright.
    pub const CLOUD_PALETTE: [Rgb<u8>; 6] = [
        Rgb([68, 1, 84]),
        Rgb([59, 82, 139]),
        Rgb([33, 145, 140]),
        Rgb([94, 201, 98]),
        Rgb([253, 231, 37]),
        Rgb([221, 81, 58]),
    ];
}

/// Errors produced by the renderers.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("frequency table is empty; nothing to render")]
    EmptyInput,
    #[error("invalid chart configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Write an image as PNG, creating parent directories as needed.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<(), VizError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    img.save(path)?;
    info!(path = %path.display(), width = img.width(), height = img.height(), "image_saved");
    Ok(())
}

/// Fill an axis-aligned rectangle, clipped to the image bounds.
pub(crate) fn draw_filled_rect(
    img: &mut RgbImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    color: image::Rgb<u8>,
) {
    let img_width = img.width();
    let img_height = img.height();

    for dy in 0..height {
        for dx in 0..width {
            let px = x + dx;
            let py = y + dy;
            if px < img_width && py < img_height {
                img.put_pixel(px, py, color);
            }
        }
    }
}

/// Horizontal line, clipped to the image bounds.
pub(crate) fn draw_horizontal_line(
    img: &mut RgbImage,
    x1: u32,
    x2: u32,
    y: u32,
    color: image::Rgb<u8>,
) {
    let (start, end) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    if y >= img.height() {
        return;
    }
    for x in start..=end.min(img.width().saturating_sub(1)) {
        img.put_pixel(x, y, color);
    }
}

/// Vertical line, clipped to the image bounds.
pub(crate) fn draw_vertical_line(
    img: &mut RgbImage,
    x: u32,
    y1: u32,
    y2: u32,
    color: image::Rgb<u8>,
) {
    let (start, end) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    if x >= img.width() {
        return;
    }
    for y in start..=end.min(img.height().saturating_sub(1)) {
        img.put_pixel(x, y, color);
    }
}

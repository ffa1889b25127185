//! Word cloud renderer.
//!
//! Words are placed in descending frequency order. Each word's glyph scale
//! follows the square root of its share of the maximum count, and candidate
//! positions walk an archimedean spiral out from the canvas center until a
//! spot clears every previously placed rectangle. Words that find no room
//! before the spiral runs out are dropped; the most frequent words always
//! land first, near the center.

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wf_freq::FrequencyTable;

use crate::text::{draw_text, text_height, text_width};
use crate::{colors, VizError};

/// Geometry and styling for the word cloud.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCloudConfig {
    pub width: u32,
    pub height: u32,
    /// Upper bound on the number of words placed.
    pub max_words: usize,
    /// Glyph scale given to the least frequent words.
    pub min_scale: u32,
    /// Glyph scale given to the most frequent word.
    pub max_scale: u32,
    #[serde(skip, default = "default_background")]
    pub background: Rgb<u8>,
    #[serde(skip, default = "default_palette")]
    pub palette: Vec<Rgb<u8>>,
}

fn default_background() -> Rgb<u8> {
    colors::WHITE
}

fn default_palette() -> Vec<Rgb<u8>> {
    colors::CLOUD_PALETTE.to_vec()
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            max_words: 100,
            min_scale: 1,
            max_scale: 6,
            background: colors::WHITE,
            palette: default_palette(),
        }
    }
}

impl WordCloudConfig {
    fn validate(&self) -> Result<(), VizError> {
        if self.max_words == 0 {
            return Err(VizError::InvalidConfig("max_words must be >= 1".into()));
        }
        if self.min_scale == 0 || self.max_scale < self.min_scale {
            return Err(VizError::InvalidConfig(
                "scales must satisfy 1 <= min_scale <= max_scale".into(),
            ));
        }
        if self.palette.is_empty() {
            return Err(VizError::InvalidConfig("palette must not be empty".into()));
        }
        if self.width < 64 || self.height < 64 {
            return Err(VizError::InvalidConfig("canvas too small".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Placed {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

impl Placed {
    fn overlaps(&self, other: &Placed) -> bool {
        // 2 px breathing room between words.
        let pad = 2;
        self.x < other.x + other.w + pad
            && other.x < self.x + self.w + pad
            && self.y < other.y + other.h + pad
            && other.y < self.y + self.h + pad
    }
}

/// Render a word cloud for the most frequent words.
pub fn render_word_cloud(
    table: &FrequencyTable,
    cfg: &WordCloudConfig,
) -> Result<RgbImage, VizError> {
    cfg.validate()?;
    let entries = table.top_n(cfg.max_words);
    if entries.is_empty() {
        return Err(VizError::EmptyInput);
    }

    let mut img = RgbImage::from_pixel(cfg.width, cfg.height, cfg.background);
    let max_count = entries[0].1.max(1);
    let mut placed: Vec<Placed> = Vec::with_capacity(entries.len());
    let mut dropped = 0usize;

    for (word, count) in &entries {
        let scale = scale_for(*count, max_count, cfg);
        let rect_w = text_width(word, scale) as i64;
        let rect_h = text_height(scale) as i64;

        match find_spot(rect_w, rect_h, &placed, cfg) {
            Some(spot) => {
                let color = pick_color(word, &cfg.palette);
                draw_text(&mut img, word, spot.x, spot.y, scale, color);
                placed.push(spot);
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, placed = placed.len(), "word_cloud_overflow");
    }
    Ok(img)
}

/// Relative scaling: square root of the count share, mapped onto the
/// configured scale range.
fn scale_for(count: u64, max_count: u64, cfg: &WordCloudConfig) -> u32 {
    let share = (count as f64 / max_count as f64).sqrt();
    let span = (cfg.max_scale - cfg.min_scale) as f64;
    cfg.min_scale + (share * span).round() as u32
}

fn find_spot(w: i64, h: i64, placed: &[Placed], cfg: &WordCloudConfig) -> Option<Placed> {
    let cx = cfg.width as i64 / 2;
    let cy = cfg.height as i64 / 2;

    let mut t = 0.0f64;
    for _ in 0..4000 {
        let radius = 1.8 * t;
        let x = cx + (radius * t.cos()) as i64 - w / 2;
        let y = cy + (radius * t.sin()) as i64 - h / 2;
        t += 0.35;

        let candidate = Placed { x, y, w, h };
        let in_bounds = x >= 0
            && y >= 0
            && x + w <= cfg.width as i64
            && y + h <= cfg.height as i64;
        if !in_bounds {
            continue;
        }
        if placed.iter().all(|p| !candidate.overlaps(p)) {
            return Some(candidate);
        }
    }
    None
}

fn pick_color(word: &str, palette: &[Rgb<u8>]) -> Rgb<u8> {
    let sum: usize = word.bytes().map(|b| b as usize).sum();
    palette[sum % palette.len()]
}

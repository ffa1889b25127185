//! Bar chart renderers.

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use wf_freq::FrequencyTable;

use crate::text::{draw_text, text_height, text_width, GLYPH_SIZE};
use crate::{colors, draw_horizontal_line, draw_vertical_line, draw_filled_rect, VizError};

/// Geometry and styling for the bar charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartConfig {
    pub width: u32,
    pub height: u32,
    /// How many of the most frequent words to draw.
    pub top_n: usize,
    /// Integer scaling factor for label glyphs (8 px base size).
    pub label_scale: u32,
    pub margin: u32,
    #[serde(skip, default = "default_background")]
    pub background: Rgb<u8>,
    #[serde(skip, default = "default_bar_color")]
    pub bar_color: Rgb<u8>,
    #[serde(skip, default = "default_text_color")]
    pub text_color: Rgb<u8>,
}

fn default_background() -> Rgb<u8> {
    colors::WHITE
}

fn default_bar_color() -> Rgb<u8> {
    colors::SKY_BLUE
}

fn default_text_color() -> Rgb<u8> {
    colors::DARK_GRAY
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            top_n: 20,
            label_scale: 2,
            margin: 40,
            background: colors::WHITE,
            bar_color: colors::SKY_BLUE,
            text_color: colors::DARK_GRAY,
        }
    }
}

impl BarChartConfig {
    /// Preset matching the horizontal chart's usual shape.
    pub fn horizontal_default() -> Self {
        Self {
            width: 1000,
            height: 700,
            top_n: 15,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), VizError> {
        if self.top_n == 0 {
            return Err(VizError::InvalidConfig("top_n must be >= 1".into()));
        }
        if self.label_scale == 0 {
            return Err(VizError::InvalidConfig("label_scale must be >= 1".into()));
        }
        if self.width < self.margin * 2 + 100 || self.height < self.margin * 2 + 100 {
            return Err(VizError::InvalidConfig(
                "canvas too small for the configured margin".into(),
            ));
        }
        Ok(())
    }
}

/// Vertical bars for the top-N words: tallest on the left, word labels
/// under the baseline, counts above each bar.
pub fn render_bar_chart(
    table: &FrequencyTable,
    cfg: &BarChartConfig,
) -> Result<RgbImage, VizError> {
    cfg.validate()?;
    let entries = table.top_n(cfg.top_n);
    if entries.is_empty() {
        return Err(VizError::EmptyInput);
    }

    let mut img = RgbImage::from_pixel(cfg.width, cfg.height, cfg.background);
    let label_h = text_height(cfg.label_scale);

    let plot_left = cfg.margin;
    let plot_right = cfg.width - cfg.margin;
    let plot_top = cfg.margin + label_h + 4;
    let plot_bottom = cfg.height - cfg.margin - label_h - 4;

    draw_horizontal_line(&mut img, plot_left, plot_right, plot_bottom, cfg.text_color);
    draw_vertical_line(&mut img, plot_left, plot_top, plot_bottom, cfg.text_color);

    let max_count = entries[0].1.max(1);
    let n = entries.len() as u32;
    let slot = (plot_right - plot_left) / n;
    if slot < 2 {
        return Err(VizError::InvalidConfig(
            "top_n too large for the canvas width".into(),
        ));
    }
    let bar_w = (slot * 7 / 10).max(1);
    let avail_h = plot_bottom - plot_top;

    for (i, (word, count)) in entries.iter().enumerate() {
        let i = i as u32;
        let bar_h = ((*count as f32 / max_count as f32) * avail_h as f32).round() as u32;
        let bar_h = bar_h.max(1);
        let bar_x = plot_left + i * slot + (slot - bar_w) / 2;
        let bar_y = plot_bottom - bar_h;

        draw_filled_rect(&mut img, bar_x, bar_y, bar_w, bar_h, cfg.bar_color);

        // Count above the bar, centered on it.
        let value = count.to_string();
        let value_x =
            bar_x as i64 + (bar_w as i64 - text_width(&value, cfg.label_scale) as i64) / 2;
        let value_y = bar_y as i64 - label_h as i64 - 2;
        draw_text(&mut img, &value, value_x, value_y, cfg.label_scale, cfg.text_color);

        // Word under the baseline, truncated to its slot.
        let label = truncate_to(word, slot, cfg.label_scale);
        let label_x =
            bar_x as i64 + (bar_w as i64 - text_width(&label, cfg.label_scale) as i64) / 2;
        let label_y = plot_bottom as i64 + 4;
        draw_text(&mut img, &label, label_x, label_y, cfg.label_scale, cfg.text_color);
    }

    Ok(img)
}

/// Horizontal bars for the top-N words, most frequent at the top, counts at
/// the bar ends.
pub fn render_horizontal_bar_chart(
    table: &FrequencyTable,
    cfg: &BarChartConfig,
) -> Result<RgbImage, VizError> {
    cfg.validate()?;
    let entries = table.top_n(cfg.top_n);
    if entries.is_empty() {
        return Err(VizError::EmptyInput);
    }

    let mut img = RgbImage::from_pixel(cfg.width, cfg.height, cfg.background);
    let label_h = text_height(cfg.label_scale);

    // Left column sized to the longest word, capped at a third of the canvas.
    let label_col = entries
        .iter()
        .map(|(word, _)| text_width(word, cfg.label_scale))
        .max()
        .unwrap_or(0)
        .min(cfg.width / 3);

    let plot_left = cfg.margin + label_col + 8;
    let plot_top = cfg.margin;
    let plot_bottom = cfg.height - cfg.margin;
    // Room for the count label on the right.
    let value_space = text_width("00000", cfg.label_scale) + 8;
    let avail_w = cfg.width.saturating_sub(cfg.margin + value_space + plot_left);

    draw_vertical_line(&mut img, plot_left, plot_top, plot_bottom, cfg.text_color);

    let max_count = entries[0].1.max(1);
    let n = entries.len() as u32;
    let slot = (plot_bottom - plot_top) / n;
    if slot < 2 {
        return Err(VizError::InvalidConfig(
            "top_n too large for the canvas height".into(),
        ));
    }
    let bar_h = (slot * 7 / 10).max(1);

    for (i, (word, count)) in entries.iter().enumerate() {
        let i = i as u32;
        let bar_len = ((*count as f32 / max_count as f32) * avail_w as f32).round() as u32;
        let bar_len = bar_len.max(1);
        let bar_y = plot_top + i * slot + (slot - bar_h) / 2;

        draw_filled_rect(&mut img, plot_left + 1, bar_y, bar_len, bar_h, cfg.bar_color);

        let text_y = bar_y as i64 + (bar_h as i64 - label_h as i64) / 2;

        let label = truncate_to(word, label_col, cfg.label_scale);
        let label_x = plot_left as i64 - 8 - text_width(&label, cfg.label_scale) as i64;
        draw_text(&mut img, &label, label_x, text_y, cfg.label_scale, cfg.text_color);

        let value = count.to_string();
        let value_x = (plot_left + 1 + bar_len + 4) as i64;
        draw_text(&mut img, &value, value_x, text_y, cfg.label_scale, cfg.text_color);
    }

    Ok(img)
}

fn truncate_to(word: &str, max_px: u32, scale: u32) -> String {
    let max_chars = (max_px / (GLYPH_SIZE * scale)).max(1) as usize;
    word.chars().take(max_chars).collect()
}

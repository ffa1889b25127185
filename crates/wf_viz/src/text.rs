//! Bitmap text rasterization.
//!
//! Labels are drawn from the 8x8 `font8x8` glyphs scaled by integer
//! factors. Non-ASCII characters render as `?`; callers normalize words to
//! lowercase ASCII before charting, so this only shows up for exotic input.

use font8x8::legacy::BASIC_LEGACY;
use image::{Rgb, RgbImage};

/// Unscaled glyph cell size in pixels.
pub const GLYPH_SIZE: u32 = 8;

/// Pixel width of `text` at the given scale.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE * scale
}

/// Pixel height of a text line at the given scale.
pub fn text_height(scale: u32) -> u32 {
    GLYPH_SIZE * scale
}

/// Draw `text` with its top-left corner at `(x, y)`. Pixels outside the
/// image are clipped; negative origins are allowed.
pub fn draw_text(img: &mut RgbImage, text: &str, x: i64, y: i64, scale: u32, color: Rgb<u8>) {
    let mut pen_x = x;
    for ch in text.chars() {
        draw_glyph(img, ch, pen_x, y, scale, color);
        pen_x += (GLYPH_SIZE * scale) as i64;
    }
}

fn draw_glyph(img: &mut RgbImage, ch: char, x: i64, y: i64, scale: u32, color: Rgb<u8>) {
    let index = if ch.is_ascii() { ch as usize } else { b'?' as usize };
    let glyph = BASIC_LEGACY[index];

    for (row_idx, row) in glyph.iter().enumerate() {
        for bit in 0..8u32 {
            if row >> bit & 1 == 0 {
                continue;
            }
            // One glyph bit becomes a scale x scale block.
            for sy in 0..scale {
                for sx in 0..scale {
                    let px = x + (bit * scale + sx) as i64;
                    let py = y + (row_idx as u32 * scale + sy) as i64;
                    if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height()
                    {
                        img.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
    }
}

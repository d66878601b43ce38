use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use super::font::{self, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::error::Result;

pub type Color = Rgb<u8>;

pub const WHITE: Color = Rgb([255, 255, 255]);
pub const BLACK: Color = Rgb([0, 0, 0]);

/// An RGB raster that charts are drawn onto.
///
/// Coordinates are signed and every draw call clips to the image, so
/// callers can draw partially off-canvas without checks. The canvas is
/// consumed by `into_png`, which frees the pixel buffer.
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        *self.img.get_pixel(x, y)
    }

    /// Opaque fill of the half-open box `[x0, x1) × [y0, y1)`.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        self.blend_rect(x0, y0, x1, y1, color, 1.0);
    }

    /// Alpha-blend `color` over the box `[x0, x1) × [y0, y1)`.
    pub fn blend_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, alpha: f32) {
        let (xs, xe) = clip(x0.min(x1), x0.max(x1), self.width());
        let (ys, ye) = clip(y0.min(y1), y0.max(y1), self.height());
        let alpha = alpha.clamp(0.0, 1.0);

        for y in ys..ye {
            for x in xs..xe {
                let px = self.img.get_pixel_mut(x, y);
                *px = blend(*px, color, alpha);
            }
        }
    }

    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, color: Color) {
        self.fill_rect(x0, y, x1 + 1, y + 1, color);
    }

    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Color) {
        self.fill_rect(x, y0, x + 1, y1 + 1, color);
    }

    /// Draw `text` left-to-right with its top-left corner at `(x, y)`.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Color) {
        let s = scale as i32;
        for (i, c) in text.chars().enumerate() {
            let cx = x + (i as u32 * ADVANCE) as i32 * s;
            for (gy, row) in font::glyph(c).iter().enumerate() {
                for gx in 0..GLYPH_WIDTH {
                    if row & (0x10u8 >> gx) != 0 {
                        let px = cx + gx as i32 * s;
                        let py = y + gy as i32 * s;
                        self.fill_rect(px, py, px + s, py + s, color);
                    }
                }
            }
        }
    }

    /// Draw `text` rotated a quarter turn counter-clockwise, reading
    /// bottom-to-top, with its bottom-left corner at `(x, y)`.
    pub fn draw_text_vertical(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Color) {
        let s = scale as i32;
        for (i, c) in text.chars().enumerate() {
            let base = (i as u32 * ADVANCE) as i32;
            for (gy, row) in font::glyph(c).iter().enumerate() {
                for gx in 0..GLYPH_WIDTH {
                    if row & (0x10u8 >> gx) != 0 {
                        let px = x + gy as i32 * s;
                        let py = y - (base + gx as i32 + 1) * s;
                        self.fill_rect(px, py, px + s, py + s, color);
                    }
                }
            }
        }
    }

    /// Height of one text line at `scale`.
    pub fn line_height(scale: u32) -> i32 {
        (GLYPH_HEIGHT * scale) as i32
    }

    /// Encode as PNG, consuming the canvas.
    pub fn into_png(self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.img.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}

fn clip(lo: i32, hi: i32, limit: u32) -> (u32, u32) {
    let limit = limit as i64;
    let lo = (lo as i64).clamp(0, limit) as u32;
    let hi = (hi as i64).clamp(0, limit) as u32;
    (lo, hi)
}

fn blend(under: Color, over: Color, alpha: f32) -> Color {
    let mix = |u: u8, o: u8| (o as f32 * alpha + u as f32 * (1.0 - alpha)).round() as u8;
    Rgb([
        mix(under[0], over[0]),
        mix(under[1], over[1]),
        mix(under[2], over[2]),
    ])
}

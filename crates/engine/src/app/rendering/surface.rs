use crate::assets::ImageAsset;

use super::super::geometry::{Extent, Position};
use super::font::{self, GLYPH_WIDTH};

pub const CLEAR_COLOR: [u8; 4] = [255, 255, 255, 255];
pub const INK_COLOR: [u8; 4] = [220, 32, 32, 255];

/// Immediate-mode drawing target used by erase and draw passes.
pub trait Surface {
    fn size(&self) -> Extent;

    fn clear_rect(&mut self, location: Position, extent: Extent);

    fn draw_image(&mut self, image: &ImageAsset, location: Position);

    /// `location` is the top-left corner of the first glyph.
    fn draw_text(&mut self, text: &str, location: Position, font_size: u32);

    fn fill_circle(&mut self, center: Position, radius: f32);

    fn measure_text(&self, text: &str, font_size: u32) -> Extent {
        Extent::new(font::text_width(text, font_size), font::text_height(font_size))
    }

    fn clear_all(&mut self) {
        let size = self.size();
        self.clear_rect(Position::ORIGIN, size);
    }
}

/// Surface over a packed RGBA8 frame, as handed out by `pixels`.
pub struct PixelSurface<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelSurface<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    fn clip_span(start: f32, length: f32, limit: u32) -> Option<(usize, usize)> {
        let lo = start.floor().max(0.0);
        let hi = (start + length).ceil().min(limit as f32);
        if lo >= hi {
            return None;
        }
        Some((lo as usize, hi as usize))
    }

    fn fill_rect_color(&mut self, location: Position, extent: Extent, color: [u8; 4]) {
        let Some((left, right)) = Self::clip_span(location.x, extent.width, self.width) else {
            return;
        };
        let Some((top, bottom)) = Self::clip_span(location.y, extent.height, self.height) else {
            return;
        };
        let row_bytes = self.width as usize * 4;
        for y in top..bottom {
            let row = y * row_bytes;
            for pixel in self.frame[row + left * 4..row + right * 4].chunks_exact_mut(4) {
                pixel.copy_from_slice(&color);
            }
        }
    }

    fn write_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        if let Some(pixel) = self.frame.get_mut(offset..offset + 4) {
            pixel.copy_from_slice(&color);
        }
    }
}

impl Surface for PixelSurface<'_> {
    fn size(&self) -> Extent {
        Extent::new(self.width as f32, self.height as f32)
    }

    fn clear_rect(&mut self, location: Position, extent: Extent) {
        self.fill_rect_color(location, extent, CLEAR_COLOR);
    }

    fn draw_image(&mut self, image: &ImageAsset, location: Position) {
        if image.width == 0 || image.height == 0 {
            return;
        }
        let expected_len = image.width as usize * image.height as usize * 4;
        if image.rgba.len() < expected_len {
            return;
        }

        let left = location.x.round() as i32;
        let top = location.y.round() as i32;
        let draw_left = left.max(0);
        let draw_top = top.max(0);
        let draw_right = (left + image.width as i32).min(self.width as i32);
        let draw_bottom = (top + image.height as i32).min(self.height as i32);
        if draw_left >= draw_right || draw_top >= draw_bottom {
            return;
        }

        let frame_width = self.width as usize;
        let image_width = image.width as usize;
        for out_y in draw_top..draw_bottom {
            let src_row = (out_y - top) as usize * image_width * 4;
            let dst_row = out_y as usize * frame_width * 4;
            for out_x in draw_left..draw_right {
                let src = src_row + (out_x - left) as usize * 4;
                let alpha = image.rgba[src + 3];
                if alpha == 0 {
                    continue;
                }
                let dst = dst_row + out_x as usize * 4;
                self.frame[dst..dst + 4].copy_from_slice(&image.rgba[src..src + 4]);
            }
        }
    }

    fn draw_text(&mut self, text: &str, location: Position, font_size: u32) {
        let scale = font::scale_for(font_size);
        let mut x = location.x.round() as i32;
        let y = location.y.round() as i32;
        for ch in text.chars() {
            let glyph = font::glyph(ch);
            for (row, bits) in glyph.rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let px = x + col * scale;
                    let py = y + row as i32 * scale;
                    for sy in 0..scale {
                        for sx in 0..scale {
                            self.write_pixel(px + sx, py + sy, INK_COLOR);
                        }
                    }
                }
            }
            x += font::advance(scale);
        }
    }

    fn fill_circle(&mut self, center: Position, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let r_squared = radius * radius;
        let top = (center.y - radius).floor() as i32;
        let bottom = (center.y + radius).ceil() as i32;
        let left = (center.x - radius).floor() as i32;
        let right = (center.x + radius).ceil() as i32;
        for y in top..=bottom {
            for x in left..=right {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= r_squared {
                    self.write_pixel(x, y, INK_COLOR);
                }
            }
        }
    }
}

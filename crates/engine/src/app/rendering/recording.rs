use crate::assets::ImageAsset;

use super::super::geometry::{Extent, Position};
use super::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Clear { location: Position, extent: Extent },
    Image { name: String, location: Position },
    Text { text: String, location: Position },
    Circle { center: Position, radius: f32 },
}

/// Headless surface that logs every call, for driving a stage without a window.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Extent,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Extent::new(width as f32, height as f32),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Extent {
        self.size
    }

    fn clear_rect(&mut self, location: Position, extent: Extent) {
        self.ops.push(SurfaceOp::Clear { location, extent });
    }

    fn draw_image(&mut self, image: &ImageAsset, location: Position) {
        self.ops.push(SurfaceOp::Image {
            name: image.name.clone(),
            location,
        });
    }

    fn draw_text(&mut self, text: &str, location: Position, _font_size: u32) {
        self.ops.push(SurfaceOp::Text {
            text: text.to_string(),
            location,
        });
    }

    fn fill_circle(&mut self, center: Position, radius: f32) {
        self.ops.push(SurfaceOp::Circle { center, radius });
    }
}

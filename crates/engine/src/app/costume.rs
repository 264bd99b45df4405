use std::sync::Arc;

use crate::assets::ImageAsset;

use super::context::FrameContext;
use super::geometry::{Extent, Position};
use super::sprite::Sprite;

/// Appearances drawn by code rather than backed by a single resource.
#[derive(Debug, Clone)]
pub enum Procedural {
    /// Filled circle whose bounding square starts at the sprite position.
    Ball { radius: f32 },
    /// Vertically tiling image, drawn at the sprite position and one image
    /// height above it.
    Backdrop { image: Option<Arc<ImageAsset>> },
    /// Resource-gate progress text. Starts the loader on first draw and asks
    /// for the next scene once every declared asset has finished.
    LoadingGauge,
}

#[derive(Debug, Clone)]
pub enum Costume {
    Image {
        name: String,
        image: Option<Arc<ImageAsset>>,
    },
    Text {
        text: String,
    },
    Procedural(Procedural),
}

pub(crate) fn loading_label(percent: u32) -> String {
    format!("LOADING {percent}% ...")
}

impl Costume {
    /// `image` is `None` when the asset was never declared or failed to load;
    /// such a costume draws nothing.
    pub fn image(name: impl Into<String>, image: Option<Arc<ImageAsset>>) -> Self {
        Self::Image {
            name: name.into(),
            image,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn ball(radius: f32) -> Self {
        Self::Procedural(Procedural::Ball { radius })
    }

    pub fn backdrop(image: Option<Arc<ImageAsset>>) -> Self {
        Self::Procedural(Procedural::Backdrop { image })
    }

    pub fn loading_gauge() -> Self {
        Self::Procedural(Procedural::LoadingGauge)
    }

    pub fn natural_extent(&self) -> Option<Extent> {
        match self {
            Self::Image { image, .. }
            | Self::Procedural(Procedural::Backdrop { image }) => image
                .as_deref()
                .map(|image| Extent::new(image.width as f32, image.height as f32)),
            Self::Procedural(Procedural::Ball { radius }) => {
                Some(Extent::new(radius * 2.0, radius * 2.0))
            }
            Self::Text { .. } | Self::Procedural(Procedural::LoadingGauge) => None,
        }
    }

    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn image_name(&self) -> Option<&str> {
        match self {
            Self::Image { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn draw(&self, sprite: &Sprite, frame: &mut FrameContext<'_>) {
        let at = sprite.position;
        match self {
            Self::Image { image, .. } => {
                if let Some(image) = image {
                    frame.surface.draw_image(image, at);
                }
            }
            Self::Text { text } => frame.surface.draw_text(text, at, frame.font_size),
            Self::Procedural(Procedural::Ball { radius }) => {
                let center = Position::new(at.x + radius, at.y + radius);
                frame.surface.fill_circle(center, *radius);
            }
            Self::Procedural(Procedural::Backdrop { image }) => {
                if let Some(image) = image {
                    frame.surface.draw_image(image, at);
                    frame
                        .surface
                        .draw_image(image, at.offset(0.0, -(image.height as f32)));
                }
            }
            Self::Procedural(Procedural::LoadingGauge) => {
                if !frame.loader.has_begun() {
                    frame.loader.begin();
                }
                let progress = frame.loader.progress();
                let label = loading_label(progress.percent());
                let complete = progress.is_complete();
                frame.surface.draw_text(&label, at, frame.font_size);
                if complete {
                    frame.request_next_scene();
                }
            }
        }
    }

    /// Costumes share decoded images and hold no other resources.
    pub fn dispose(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> Arc<ImageAsset> {
        Arc::new(ImageAsset {
            name: "tile.png".to_string(),
            width,
            height,
            rgba: vec![0; (width * height * 4) as usize],
        })
    }

    #[test]
    fn natural_extent_follows_backing_resource() {
        assert_eq!(
            Costume::image("tile.png", Some(image(6, 4))).natural_extent(),
            Some(Extent::new(6.0, 4.0))
        );
        assert_eq!(Costume::image("missing.png", None).natural_extent(), None);
        assert_eq!(Costume::text("GAME OVER!").natural_extent(), None);
        assert_eq!(
            Costume::backdrop(Some(image(8, 16))).natural_extent(),
            Some(Extent::new(8.0, 16.0))
        );
    }

    #[test]
    fn accessors_match_variant() {
        let text = Costume::text("A");
        assert_eq!(text.text_content(), Some("A"));
        assert_eq!(text.image_name(), None);
        assert_eq!(
            Costume::image("hero1.png", None).image_name(),
            Some("hero1.png")
        );
    }

    #[test]
    fn loading_label_format() {
        assert_eq!(loading_label(40), "LOADING 40% ...");
    }
}

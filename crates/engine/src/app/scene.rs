use tracing::info;

use super::action::{shared, Action, NextSceneOnPress};
use super::context::FrameContext;
use super::costume::{loading_label, Costume};
use super::geometry::{BoundingBox, Position};
use super::sprite::{Sprite, SpriteId};
use super::world::SpriteWorld;

/// One phase of a game.
///
/// `start` fills the world with the phase's initial sprites through
/// [`SpriteWorld::spawn`]; the stage applies them right after. Scenes that
/// keep category indices hook `track`/`forget`, which the world calls on
/// every join and removal.
pub trait Scene {
    fn name(&self) -> &str;

    fn start(&mut self, world: &mut SpriteWorld, frame: &mut FrameContext<'_>);

    fn destroy(&mut self, world: &mut SpriteWorld, frame: &mut FrameContext<'_>) {
        teardown_world(self, world, frame);
    }

    fn track(&mut self, _sprite: &Sprite) {}

    fn forget(&mut self, _sprite: &Sprite) {}

    fn members(&self, _category: &str) -> &[SpriteId] {
        &[]
    }
}

/// Clears the whole surface and disposes every sprite the world holds.
pub fn teardown_world<S: Scene + ?Sized>(
    scene: &mut S,
    world: &mut SpriteWorld,
    frame: &mut FrameContext<'_>,
) {
    frame.surface.clear_all();
    let sprites = world.drain();
    let disposed = sprites.len();
    for sprite in sprites {
        scene.forget(&sprite);
        sprite.dispose();
    }
    info!(scene = scene.name(), disposed, "scene_destroyed");
}

/// Shows resource loading progress and hands over once everything is loaded.
#[derive(Debug, Default)]
pub struct LoadingScene;

impl Scene for LoadingScene {
    fn name(&self) -> &str {
        "loading"
    }

    fn start(&mut self, world: &mut SpriteWorld, frame: &mut FrameContext<'_>) {
        let extent = frame
            .surface
            .measure_text(&loading_label(100), frame.font_size);
        let bounds = frame.bounds;
        let position = Position::new(
            bounds.x_of_middle(extent.width),
            bounds.y_of_middle(extent.height),
        );
        let mut gauge = Sprite::new("loading").at(position).with_extent(extent);
        gauge.add_costume(Costume::loading_gauge());
        gauge.set_previous(BoundingBox::new(position, extent));
        world.spawn(gauge);
    }
}

/// A single image, centred horizontally; a pointer press moves on.
#[derive(Debug)]
pub struct WelcomeScene {
    image: String,
}

impl WelcomeScene {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
        }
    }
}

impl Scene for WelcomeScene {
    fn name(&self) -> &str {
        "welcome"
    }

    fn start(&mut self, world: &mut SpriteWorld, frame: &mut FrameContext<'_>) {
        let mut sprite = Sprite::new("welcome");
        sprite.add_costume(Costume::image(&self.image, frame.image(&self.image)));
        sprite.position = Position::new(frame.bounds.x_of_middle(sprite.extent.width), 0.0);
        sprite.add_shared_action(advance_on_press());
        world.spawn(sprite);
    }
}

/// Centred text; a pointer press moves on.
#[derive(Debug)]
pub struct GameOverScene {
    text: String,
}

impl GameOverScene {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for GameOverScene {
    fn default() -> Self {
        Self::new("GAME OVER!")
    }
}

impl Scene for GameOverScene {
    fn name(&self) -> &str {
        "game_over"
    }

    fn start(&mut self, world: &mut SpriteWorld, frame: &mut FrameContext<'_>) {
        let extent = frame.surface.measure_text(&self.text, frame.font_size);
        let position = Position::new(
            frame.bounds.x_of_middle(extent.width),
            frame.bounds.y_of_middle(extent.height),
        );
        let mut sprite = Sprite::new("game_over").at(position).with_extent(extent);
        sprite.add_costume(Costume::text(&self.text));
        sprite.add_shared_action(advance_on_press());
        world.spawn(sprite);
    }
}

fn advance_on_press() -> std::rc::Rc<dyn Action> {
    shared(NextSceneOnPress)
}

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use super::audio::Playback;
use super::context::TickContext;
use super::geometry::{BoundingBox, Position};
use super::sprite::Sprite;

/// One behavior unit, run once per tick for every sprite that holds it.
///
/// An instance may be shared by many sprites, so per-sprite progress lives on
/// the sprite (`elapsed_frames`, `stats`), never on the action.
pub trait Action {
    fn execute(&self, sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>);

    fn dispose(&self) {}
}

pub fn shared(action: impl Action + 'static) -> Rc<dyn Action> {
    Rc::new(action)
}

/// Ticks needed per costume for an animation of `seconds` per frame.
pub fn frames_per_costume(seconds: f32, tick_interval: Duration) -> f32 {
    let tick_ms = (tick_interval.as_micros() as f32 / 1000.0).max(1.0);
    seconds * 1000.0 / tick_ms
}

/// Bumps the sprite's frame counter and reports whether the current costume
/// has been shown long enough.
pub fn animation_step_due(sprite: &mut Sprite, seconds: f32, tick_interval: Duration) -> bool {
    sprite.elapsed_frames = sprite.elapsed_frames.saturating_add(1);
    sprite.elapsed_frames as f32 >= frames_per_costume(seconds, tick_interval)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub dy: f32,
    pub dx: f32,
}

impl Move {
    pub fn new(dy: f32) -> Self {
        Self { dy, dx: 0.0 }
    }

    pub fn with_dx(mut self, dx: f32) -> Self {
        self.dx = dx;
        self
    }
}

impl Default for Move {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl Action for Move {
    fn execute(&self, sprite: &mut Sprite, _ctx: &mut TickContext<'_, '_>) {
        sprite.remember_footprint();
        sprite.position = sprite.position.offset(self.dx, self.dy);
    }
}

/// Centres the sprite on the pointer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FollowPointer;

impl Action for FollowPointer {
    fn execute(&self, sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        sprite.remember_footprint();
        let pointer = ctx.input().pointer();
        sprite.position = Position::new(
            pointer.x - sprite.extent.width / 2.0,
            pointer.y - sprite.extent.height / 2.0,
        );
    }
}

/// Loops through the sprite's costumes, `seconds` per costume.
#[derive(Debug, Clone, Copy)]
pub struct CycleCostume {
    seconds: f32,
}

impl CycleCostume {
    pub fn new(seconds: f32) -> Self {
        Self { seconds }
    }
}

impl Action for CycleCostume {
    fn execute(&self, sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        if animation_step_due(sprite, self.seconds, ctx.tick_interval()) {
            sprite.elapsed_frames = 0;
            sprite.next_costume();
        }
    }
}

/// Plays the costumes once; on the last one the sprite leaves the stage.
#[derive(Debug, Clone, Copy)]
pub struct CycleCostumeOnce {
    seconds: f32,
}

impl CycleCostumeOnce {
    pub fn new(seconds: f32) -> Self {
        Self { seconds }
    }
}

impl Action for CycleCostumeOnce {
    fn execute(&self, sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        if !animation_step_due(sprite, self.seconds, ctx.tick_interval()) {
            return;
        }
        if sprite.is_on_last_costume() {
            ctx.remove(sprite.id());
        } else {
            sprite.elapsed_frames = 0;
            sprite.next_costume();
        }
    }
}

/// Scene-level delete once the sprite has left the visible area.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveWhenOutOfRange;

impl Action for RemoveWhenOutOfRange {
    fn execute(&self, sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        if ctx.bounds().is_out_of_range(sprite.position, sprite.extent) {
            ctx.destroy(sprite);
        }
    }
}

/// Consumes a pointer press and moves the stage to its next scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct NextSceneOnPress;

impl Action for NextSceneOnPress {
    fn execute(&self, _sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        if ctx.input().take_pointer_press().is_some() {
            ctx.next_scene();
        }
    }
}

/// Starts a looping clip on first run and stops it on dispose. Holds its
/// playback handle, so every owner needs its own instance.
pub struct LoopAudio {
    clip: String,
    playback: RefCell<Option<Playback>>,
    started: Cell<bool>,
}

impl LoopAudio {
    pub fn new(clip: impl Into<String>) -> Self {
        Self {
            clip: clip.into(),
            playback: RefCell::new(None),
            started: Cell::new(false),
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.get()
    }
}

impl Action for LoopAudio {
    fn execute(&self, _sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        if self.started.replace(true) {
            return;
        }
        *self.playback.borrow_mut() = ctx.frame.play_looped(&self.clip);
    }

    fn dispose(&self) {
        if let Some(playback) = self.playback.borrow_mut().take() {
            playback.stop();
        }
    }
}

/// Scrolls a backdrop down by `step` per tick, wrapping by its own height.
/// Its footprint is the whole surface.
#[derive(Debug, Clone, Copy)]
pub struct ScrollBackdrop {
    step: f32,
}

impl ScrollBackdrop {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl Action for ScrollBackdrop {
    fn execute(&self, sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        let bounds = ctx.bounds();
        sprite.set_previous(BoundingBox::new(Position::ORIGIN, bounds.size));
        sprite.position.y += self.step;
        if sprite.position.y > bounds.size.height && sprite.extent.height > 0.0 {
            sprite.position.y -= sprite.extent.height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_per_costume_uses_tick_interval() {
        assert_eq!(frames_per_costume(0.2, Duration::from_millis(50)), 4.0);
        assert_eq!(frames_per_costume(1.0, Duration::from_millis(50)), 20.0);
        assert_eq!(frames_per_costume(0.2, Duration::ZERO), 200.0);
    }

    #[test]
    fn animation_step_fires_on_fourth_tick() {
        let mut sprite = Sprite::new("hero");
        let tick = Duration::from_millis(50);

        let fired: Vec<bool> = (0..4)
            .map(|_| animation_step_due(&mut sprite, 0.2, tick))
            .collect();

        assert_eq!(fired, vec![false, false, false, true]);
    }

    #[test]
    fn move_defaults_to_three_pixels_down() {
        let action = Move::default();
        assert_eq!(action, Move { dy: 3.0, dx: 0.0 });
        assert_eq!(Move::new(-8.0).with_dx(1.0), Move { dy: -8.0, dx: 1.0 });
    }
}

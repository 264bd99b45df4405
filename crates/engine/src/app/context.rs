use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;

use crate::assets::{ImageAsset, ResourceLoader};

use super::audio::{AudioEngine, Playback};
use super::input::FrameInput;
use super::rendering::Surface;
use super::scene::Scene;
use super::sprite::{DestroyOutcome, Sprite, SpriteId};
use super::stage::StageBounds;
use super::world::SpriteWorld;

/// Per-tick state owned by the stage and lent to scenes, costumes and actions.
pub struct FrameContext<'a> {
    pub input: &'a mut FrameInput,
    pub surface: &'a mut dyn Surface,
    pub loader: &'a mut ResourceLoader,
    pub audio: Option<&'a AudioEngine>,
    pub rng: &'a mut StdRng,
    pub bounds: StageBounds,
    pub tick_interval: Duration,
    pub font_size: u32,
    next_scene: &'a mut bool,
}

impl<'a> FrameContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        input: &'a mut FrameInput,
        surface: &'a mut dyn Surface,
        loader: &'a mut ResourceLoader,
        audio: Option<&'a AudioEngine>,
        rng: &'a mut StdRng,
        bounds: StageBounds,
        tick_interval: Duration,
        font_size: u32,
        next_scene: &'a mut bool,
    ) -> Self {
        Self {
            input,
            surface,
            loader,
            audio,
            rng,
            bounds,
            tick_interval,
            font_size,
            next_scene,
        }
    }

    /// Applied by the stage once the current tick has finished.
    pub fn request_next_scene(&mut self) {
        *self.next_scene = true;
    }

    pub fn next_scene_requested(&self) -> bool {
        *self.next_scene
    }

    pub fn image(&self, name: &str) -> Option<Arc<ImageAsset>> {
        self.loader.image(name)
    }

    pub fn play_once(&self, clip_name: &str) {
        let (Some(audio), Some(clip)) = (self.audio, self.loader.audio(clip_name)) else {
            return;
        };
        audio.play_once(&clip);
    }

    pub fn play_looped(&self, clip_name: &str) -> Option<Playback> {
        let audio = self.audio?;
        let clip = self.loader.audio(clip_name)?;
        audio.play_looped(&clip)
    }

    pub fn random_x(&mut self, offset_left: f32, offset_right: f32) -> f32 {
        self.bounds.random_x(&mut *self.rng, offset_left, offset_right)
    }
}

/// What an action sees while it runs: the frame plus the active scene and its sprites.
///
/// The executing sprite is lent out separately and is not reachable through
/// `sprite`/`sprite_mut` while its actions run.
pub struct TickContext<'t, 'f> {
    pub frame: &'t mut FrameContext<'f>,
    world: &'t mut SpriteWorld,
    scene: &'t mut dyn Scene,
}

impl<'t, 'f> TickContext<'t, 'f> {
    pub(crate) fn new(
        frame: &'t mut FrameContext<'f>,
        world: &'t mut SpriteWorld,
        scene: &'t mut dyn Scene,
    ) -> Self {
        Self {
            frame,
            world,
            scene,
        }
    }

    pub fn input(&mut self) -> &mut FrameInput {
        &mut *self.frame.input
    }

    pub fn bounds(&self) -> StageBounds {
        self.frame.bounds
    }

    pub fn tick_interval(&self) -> Duration {
        self.frame.tick_interval
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.world.get(id)
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.world.get_mut(id)
    }

    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.world.iter()
    }

    /// Snapshot of a scene category, safe to hold while mutating sprites.
    pub fn members(&self, category: &str) -> Vec<SpriteId> {
        self.scene.members(category).to_vec()
    }

    /// Queues a sprite; it joins the scene after the current tick.
    pub fn spawn(&mut self, sprite: Sprite) -> SpriteId {
        self.world.spawn(sprite)
    }

    /// Stage removal path. Deferred to the end of the tick; `false` when the
    /// sprite is not active or already queued for removal.
    pub fn remove(&mut self, id: SpriteId) -> bool {
        self.world.request_removal(id)
    }

    pub fn is_removal_pending(&self, id: SpriteId) -> bool {
        self.world.is_removal_pending(id)
    }

    /// Scene-level delete of the executing sprite: leave every category index,
    /// then begin destruction.
    pub fn destroy(&mut self, sprite: &mut Sprite) {
        self.scene.forget(sprite);
        if sprite.destroy() == DestroyOutcome::RemoveNow {
            self.world.request_removal(sprite.id());
        }
    }

    /// Scene-level delete of another sprite. `false` when it is not active.
    ///
    /// The executing sprite is lent out of the world while it runs, so its
    /// own id also yields `false`; use [`TickContext::destroy`] for it.
    pub fn destroy_by_id(&mut self, id: SpriteId) -> bool {
        let Some(sprite) = self.world.get_mut(id) else {
            return false;
        };
        self.scene.forget(sprite);
        if sprite.destroy() == DestroyOutcome::RemoveNow {
            self.world.request_removal(id);
        }
        true
    }

    pub fn next_scene(&mut self) {
        self.frame.request_next_scene();
    }
}

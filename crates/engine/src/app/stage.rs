use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{info, warn};

use crate::assets::{AssetManifest, ResourceLoader};

use super::audio::AudioEngine;
use super::context::{FrameContext, TickContext};
use super::geometry::{Extent, Position};
use super::input::FrameInput;
use super::rendering::Surface;
use super::scene::Scene;
use super::sprite::SpriteId;
use super::world::{retire, SpriteWorld};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub width: u32,
    pub height: u32,
    pub tick_interval_ms: u64,
    pub font_size: u32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 852,
            tick_interval_ms: 50,
            font_size: 20,
        }
    }
}

impl StageConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn bounds(&self) -> StageBounds {
        StageBounds::new(self.width as f32, self.height as f32)
    }
}

/// The visible rectangle. Spawn, centring and range checks are relative to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageBounds {
    pub size: Extent,
}

impl StageBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Extent::new(width, height),
        }
    }

    /// Uniform x in `[offset_left, width - offset_right)`, floored.
    pub fn random_x<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        offset_left: f32,
        offset_right: f32,
    ) -> f32 {
        let span = self.size.width - offset_left - offset_right;
        if span <= 0.0 {
            return offset_left;
        }
        offset_left + (rng.gen::<f32>() * span).floor()
    }

    pub fn x_of_middle(&self, width: f32) -> f32 {
        ((self.size.width - width) / 2.0).ceil()
    }

    pub fn y_of_middle(&self, height: f32) -> f32 {
        ((self.size.height - height) / 2.0).ceil()
    }

    /// Four-quadrant test: past the right or bottom edge by the near corner,
    /// or past the left or top edge by the far corner. A sprite straddling an
    /// edge is still in range.
    pub fn is_out_of_range(&self, position: Position, extent: Extent) -> bool {
        position.x > self.size.width
            || position.y > self.size.height
            || position.y + extent.height < 0.0
            || position.x + extent.width < 0.0
    }
}

struct SceneSlot {
    scene: Box<dyn Scene>,
    world: SpriteWorld,
}

/// Frame scheduler and scene manager.
///
/// Owns the ordered scenes and their sprites, the frame input, the resource
/// loader and the audio engine. [`Stage::tick`] runs one erase, draw and
/// execute cycle; whoever owns the stage decides when ticks happen.
pub struct Stage {
    config: StageConfig,
    scenes: Vec<SceneSlot>,
    current: usize,
    input: FrameInput,
    loader: ResourceLoader,
    audio: Option<AudioEngine>,
    rng: StdRng,
    started: bool,
    next_scene_requested: bool,
    frame_count: u64,
}

impl Stage {
    pub fn new(config: StageConfig, manifest: AssetManifest) -> Self {
        Self {
            config,
            scenes: Vec::new(),
            current: 0,
            input: FrameInput::default(),
            loader: ResourceLoader::new(manifest),
            audio: None,
            rng: StdRng::from_entropy(),
            started: false,
            next_scene_requested: false,
            frame_count: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_audio(mut self, audio: AudioEngine) -> Self {
        self.audio = Some(audio);
        self
    }

    /// The first scene added is the current one.
    pub fn add_scene(&mut self, scene: Box<dyn Scene>) {
        self.scenes.push(SceneSlot {
            scene,
            world: SpriteWorld::default(),
        });
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn bounds(&self) -> StageBounds {
        self.config.bounds()
    }

    pub fn input_mut(&mut self) -> &mut FrameInput {
        &mut self.input
    }

    pub fn loader(&self) -> &ResourceLoader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut ResourceLoader {
        &mut self.loader
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_scene_name(&self) -> Option<&str> {
        self.scenes.get(self.current).map(|slot| slot.scene.name())
    }

    pub fn world(&self) -> Option<&SpriteWorld> {
        self.scenes.get(self.current).map(|slot| &slot.world)
    }

    pub fn world_mut(&mut self) -> Option<&mut SpriteWorld> {
        self.scenes.get_mut(self.current).map(|slot| &mut slot.world)
    }

    pub fn sprite_count(&self) -> usize {
        self.world().map_or(0, SpriteWorld::len)
    }

    fn parts<'s>(
        &'s mut self,
        surface: &'s mut dyn Surface,
    ) -> (Option<&'s mut SceneSlot>, FrameContext<'s>) {
        let Stage {
            config,
            scenes,
            current,
            input,
            loader,
            audio,
            rng,
            next_scene_requested,
            ..
        } = self;
        let frame = FrameContext::new(
            input,
            surface,
            loader,
            audio.as_ref(),
            rng,
            config.bounds(),
            config.tick_interval(),
            config.font_size,
            next_scene_requested,
        );
        (scenes.get_mut(*current), frame)
    }

    fn start_current(&mut self, surface: &mut dyn Surface) {
        let (slot, mut frame) = self.parts(surface);
        let Some(SceneSlot { scene, world }) = slot else {
            return;
        };
        scene.start(world, &mut frame);
        world.apply_pending(scene.as_mut(), frame.surface);
        info!(
            scene = scene.name(),
            sprite_count = world.len(),
            "scene_started"
        );
    }

    /// Marks the stage active and starts the current scene. Call once.
    pub fn start(&mut self, surface: &mut dyn Surface) {
        if self.scenes.is_empty() {
            warn!("stage_start_without_scenes");
            return;
        }
        self.started = true;
        info!(
            scenes = self.scenes.len(),
            tick_interval_ms = self.config.tick_interval().as_millis() as u64,
            "stage_started"
        );
        self.start_current(surface);
    }

    /// Halts ticking. Sprites stay where they are.
    pub fn stop(&mut self) {
        if self.started {
            info!(frame_count = self.frame_count, "stage_stopped");
        }
        self.started = false;
    }

    /// Destroys the current scene and starts the next one, wrapping after the last.
    pub fn next_scene(&mut self, surface: &mut dyn Surface) {
        if self.scenes.is_empty() {
            return;
        }
        self.next_scene_requested = false;
        {
            let (slot, mut frame) = self.parts(&mut *surface);
            if let Some(SceneSlot { scene, world }) = slot {
                scene.destroy(world, &mut frame);
            }
        }
        self.current = (self.current + 1) % self.scenes.len();
        self.start_current(surface);
    }

    /// Removes a sprite from the current scene right away: leaves the scene's
    /// indices, erases its last footprint, disposes it. `false` when absent.
    pub fn delete(&mut self, id: SpriteId, surface: &mut dyn Surface) -> bool {
        let Some(SceneSlot { scene, world }) = self.scenes.get_mut(self.current) else {
            return false;
        };
        match world.remove_now(id) {
            Some(sprite) => {
                retire(scene.as_mut(), surface, sprite);
                true
            }
            None => false,
        }
    }

    /// One fixed-interval frame: erase every sprite, then draw every sprite,
    /// then run every sprite's actions, over the sprite list as it stood when
    /// the tick began. Spawns, removals and scene changes requested during the
    /// tick are applied afterwards.
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        if !self.started {
            return;
        }
        {
            let (slot, mut frame) = self.parts(&mut *surface);
            let Some(SceneSlot { scene, world }) = slot else {
                return;
            };
            let snapshot = world.ids();

            for id in &snapshot {
                if let Some(sprite) = world.get(*id) {
                    sprite.erase(frame.surface);
                }
            }
            for id in &snapshot {
                if let Some(sprite) = world.get(*id) {
                    sprite.draw(&mut frame);
                }
            }
            for id in &snapshot {
                if world.is_removal_pending(*id) {
                    continue;
                }
                let Some((index, mut sprite)) = world.lend(*id) else {
                    continue;
                };
                {
                    let mut ctx = TickContext::new(&mut frame, world, scene.as_mut());
                    sprite.execute(&mut ctx);
                }
                world.restore(index, sprite);
            }

            world.apply_pending(scene.as_mut(), frame.surface);
        }
        self.frame_count = self.frame_count.saturating_add(1);

        if self.next_scene_requested {
            self.next_scene(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::app::action::{Action, CycleCostumeOnce, Move, NextSceneOnPress};
    use crate::app::costume::Costume;
    use crate::app::geometry::BoundingBox;
    use crate::app::rendering::{RecordingSurface, SurfaceOp};
    use crate::app::scene::{GameOverScene, LoadingScene};
    use crate::app::sprite::{Sprite, SpriteStatus, TerminalAnimation};

    type Journal = Rc<RefCell<Vec<String>>>;

    /// Scene whose start runs a caller-supplied setup.
    struct ScriptedScene {
        name: &'static str,
        setup: Box<dyn Fn(&mut SpriteWorld)>,
        started: Rc<Cell<u32>>,
    }

    impl ScriptedScene {
        fn new(name: &'static str, setup: impl Fn(&mut SpriteWorld) + 'static) -> Self {
            Self {
                name,
                setup: Box::new(setup),
                started: Rc::new(Cell::new(0)),
            }
        }

        fn empty(name: &'static str) -> Self {
            Self::new(name, |_| {})
        }
    }

    impl Scene for ScriptedScene {
        fn name(&self) -> &str {
            self.name
        }

        fn start(&mut self, world: &mut SpriteWorld, _frame: &mut FrameContext<'_>) {
            self.started.set(self.started.get() + 1);
            (self.setup)(world);
        }
    }

    struct Log {
        label: &'static str,
        journal: Journal,
    }

    impl Action for Log {
        fn execute(&self, _sprite: &mut Sprite, _ctx: &mut TickContext<'_, '_>) {
            self.journal.borrow_mut().push(format!("exec:{}", self.label));
        }
    }

    struct CountDispose(Rc<Cell<u32>>);

    impl Action for CountDispose {
        fn execute(&self, _sprite: &mut Sprite, _ctx: &mut TickContext<'_, '_>) {}

        fn dispose(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    struct SpawnOnce(Cell<bool>);

    impl Action for SpawnOnce {
        fn execute(&self, _sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
            if !self.0.replace(true) {
                ctx.spawn(Sprite::new("child"));
            }
        }
    }

    struct RemoveOther(SpriteId);

    impl Action for RemoveOther {
        fn execute(&self, _sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
            ctx.remove(self.0);
        }
    }

    struct DestroyOwnId(Rc<Cell<Option<bool>>>);

    impl Action for DestroyOwnId {
        fn execute(&self, sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
            self.0.set(Some(ctx.destroy_by_id(sprite.id())));
        }
    }

    fn stage() -> Stage {
        Stage::new(
            StageConfig {
                width: 100,
                height: 100,
                ..StageConfig::default()
            },
            AssetManifest::default(),
        )
        .with_seed(7)
    }

    fn moving_sprite(label: &'static str, x: f32, journal: &Journal) -> Sprite {
        let mut sprite = Sprite::new("ball")
            .at(Position::new(x, 10.0))
            .with_extent(Extent::new(4.0, 4.0));
        sprite.add_costume(Costume::text(label));
        sprite.add_action(Move::new(1.0));
        sprite.add_action(Log {
            label,
            journal: Rc::clone(journal),
        });
        sprite
    }

    #[test]
    fn bounds_flag_each_quadrant() {
        let bounds = StageBounds::new(100.0, 50.0);
        let size = Extent::new(10.0, 10.0);

        assert!(bounds.is_out_of_range(Position::new(101.0, 10.0), size));
        assert!(bounds.is_out_of_range(Position::new(10.0, 51.0), size));
        assert!(bounds.is_out_of_range(Position::new(-11.0, 10.0), size));
        assert!(bounds.is_out_of_range(Position::new(10.0, -11.0), size));
        assert!(!bounds.is_out_of_range(Position::new(10.0, 10.0), size));
        assert!(!bounds.is_out_of_range(Position::new(-5.0, 45.0), size));
    }

    #[test]
    fn config_fields_default_individually() {
        let config: StageConfig =
            serde_json::from_str(r#"{ "tick_interval_ms": 20 }"#).expect("config json");

        assert_eq!(config.tick_interval(), Duration::from_millis(20));
        assert_eq!(config.width, 480);
        assert_eq!(config.bounds(), StageBounds::new(480.0, 852.0));
    }

    #[test]
    fn centring_rounds_up() {
        let bounds = StageBounds::new(101.0, 50.0);
        assert_eq!(bounds.x_of_middle(20.0), 41.0);
        assert_eq!(bounds.y_of_middle(10.0), 20.0);
    }

    #[test]
    fn random_x_stays_inside_margins() {
        let bounds = StageBounds::new(100.0, 50.0);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let x = bounds.random_x(&mut rng, 10.0, 30.0);
            assert!((10.0..70.0).contains(&x), "x={x}");
            assert_eq!(x, x.floor());
        }
        assert_eq!(bounds.random_x(&mut rng, 60.0, 60.0), 60.0);
    }

    #[test]
    fn next_scene_wraps_to_first() {
        let mut stage = stage();
        let mut surface = RecordingSurface::new(100, 100);
        let first = ScriptedScene::empty("a");
        let first_starts = Rc::clone(&first.started);
        stage.add_scene(Box::new(first));
        stage.add_scene(Box::new(ScriptedScene::empty("b")));
        stage.add_scene(Box::new(ScriptedScene::empty("c")));
        stage.start(&mut surface);

        stage.next_scene(&mut surface);
        stage.next_scene(&mut surface);
        assert_eq!(stage.current_scene_name(), Some("c"));

        stage.next_scene(&mut surface);
        assert_eq!(stage.current_scene_name(), Some("a"));
        assert_eq!(stage.current_index(), 0);
        assert_eq!(first_starts.get(), 2);
    }

    #[test]
    fn tick_erases_all_then_draws_all_then_executes() {
        let journal: Journal = Rc::default();
        let mut stage = stage();
        let mut surface = RecordingSurface::new(100, 100);
        let setup_journal = Rc::clone(&journal);
        stage.add_scene(Box::new(ScriptedScene::new("play", move |world| {
            world.spawn(moving_sprite("A", 0.0, &setup_journal));
            world.spawn(moving_sprite("B", 20.0, &setup_journal));
        })));
        stage.start(&mut surface);

        stage.tick(&mut surface);
        assert_eq!(
            surface.take_ops(),
            vec![
                SurfaceOp::Text {
                    text: "A".into(),
                    location: Position::new(0.0, 10.0)
                },
                SurfaceOp::Text {
                    text: "B".into(),
                    location: Position::new(20.0, 10.0)
                },
            ]
        );
        assert_eq!(*journal.borrow(), vec!["exec:A", "exec:B"]);

        stage.tick(&mut surface);
        let ops = surface.take_ops();
        let kinds: Vec<&str> = ops
            .iter()
            .map(|op| match op {
                SurfaceOp::Clear { .. } => "clear",
                SurfaceOp::Text { .. } => "text",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["clear", "clear", "text", "text"]);
        assert_eq!(
            ops[0],
            SurfaceOp::Clear {
                location: Position::new(0.0, 10.0),
                extent: Extent::new(4.0, 4.0)
            }
        );
        assert_eq!(
            ops[2],
            SurfaceOp::Text {
                text: "A".into(),
                location: Position::new(0.0, 11.0)
            }
        );
    }

    #[test]
    fn spawns_during_tick_join_after_it() {
        let mut stage = stage();
        let mut surface = RecordingSurface::new(100, 100);
        stage.add_scene(Box::new(ScriptedScene::new("play", |world| {
            let mut parent = Sprite::new("parent");
            parent.add_action(SpawnOnce(Cell::new(false)));
            world.spawn(parent);
        })));
        stage.start(&mut surface);
        assert_eq!(stage.sprite_count(), 1);

        stage.tick(&mut surface);

        assert_eq!(stage.sprite_count(), 2);
        let tags: Vec<_> = stage
            .world()
            .map(|world| world.iter().map(Sprite::tag).collect())
            .unwrap_or_default();
        assert_eq!(tags, vec!["parent", "child"]);
    }

    #[test]
    fn sprite_removed_mid_tick_is_skipped_and_disposed_once() {
        let journal: Journal = Rc::default();
        let disposed = Rc::new(Cell::new(0));
        let mut stage = stage();
        let mut surface = RecordingSurface::new(100, 100);
        let setup_journal = Rc::clone(&journal);
        let setup_disposed = Rc::clone(&disposed);
        stage.add_scene(Box::new(ScriptedScene::new("play", move |world| {
            // Ids are allocated in spawn order, so the victim will be SpriteId(2).
            let mut killer = Sprite::new("killer");
            killer.add_action(RemoveOther(SpriteId(2)));
            killer.add_action(RemoveOther(SpriteId(2)));
            world.spawn(killer);
            let mut victim = moving_sprite("V", 0.0, &setup_journal);
            victim.add_action(CountDispose(Rc::clone(&setup_disposed)));
            world.spawn(victim);
        })));
        stage.start(&mut surface);

        stage.tick(&mut surface);

        assert!(journal.borrow().is_empty());
        assert_eq!(stage.sprite_count(), 1);
        assert_eq!(disposed.get(), 1);
    }

    #[test]
    fn destroy_by_id_skips_the_executing_sprite() {
        let outcome = Rc::new(Cell::new(None));
        let mut stage = stage();
        let mut surface = RecordingSurface::new(100, 100);
        let setup_outcome = Rc::clone(&outcome);
        stage.add_scene(Box::new(ScriptedScene::new("play", move |world| {
            let mut sprite = Sprite::new("ball");
            sprite.add_action(DestroyOwnId(Rc::clone(&setup_outcome)));
            world.spawn(sprite);
        })));
        stage.start(&mut surface);

        stage.tick(&mut surface);

        assert_eq!(outcome.get(), Some(false));
        assert_eq!(stage.sprite_count(), 1);
        let world = stage.world().expect("world");
        assert!(world.iter().all(|sprite| sprite.status() == SpriteStatus::Alive));
    }

    #[test]
    fn stage_delete_reports_success_once() {
        let disposed = Rc::new(Cell::new(0));
        let mut stage = stage();
        let mut surface = RecordingSurface::new(100, 100);
        let setup_disposed = Rc::clone(&disposed);
        stage.add_scene(Box::new(ScriptedScene::new("play", move |world| {
            let mut sprite = Sprite::new("ball");
            sprite.add_action(CountDispose(Rc::clone(&setup_disposed)));
            sprite.set_previous(BoundingBox::new(
                Position::new(1.0, 2.0),
                Extent::new(3.0, 4.0),
            ));
            world.spawn(sprite);
        })));
        stage.start(&mut surface);
        let id = stage.world().and_then(|world| world.ids().first().copied());
        let id = id.expect("sprite spawned");
        surface.take_ops();

        assert!(stage.delete(id, &mut surface));
        assert!(!stage.delete(id, &mut surface));

        assert_eq!(disposed.get(), 1);
        assert_eq!(
            surface.ops(),
            &[SurfaceOp::Clear {
                location: Position::new(1.0, 2.0),
                extent: Extent::new(3.0, 4.0)
            }]
        );
    }

    #[test]
    fn terminal_animation_runs_before_removal() {
        let mut stage = stage();
        let mut surface = RecordingSurface::new(100, 100);
        stage.add_scene(Box::new(ScriptedScene::new("play", |world| {
            let terminal = Rc::new(TerminalAnimation::new(
                vec![Costume::text("x1"), Costume::text("x2")],
                Rc::new(CycleCostumeOnce::new(0.1)),
            ));
            let mut enemy = Sprite::new("enemy").with_terminal(terminal);
            enemy.add_costume(Costume::text("alive"));
            world.spawn(enemy);
        })));
        stage.start(&mut surface);
        let id = stage
            .world()
            .and_then(|world| world.ids().first().copied())
            .expect("enemy");

        let outcome = stage
            .world_mut()
            .and_then(|world| world.get_mut(id))
            .map(|enemy| enemy.destroy());
        assert_eq!(outcome, Some(crate::app::sprite::DestroyOutcome::Animating));

        // 0.1s at 50ms per tick: two ticks per costume.
        for _ in 0..3 {
            stage.tick(&mut surface);
            assert_eq!(stage.sprite_count(), 1);
        }
        stage.tick(&mut surface);
        assert_eq!(stage.sprite_count(), 0);
        let drawn = surface.texts();
        assert!(drawn.contains(&"x1"));
        assert!(drawn.contains(&"x2"));
        assert!(!drawn.contains(&"alive"));
    }

    #[test]
    fn pointer_press_advances_game_over_scene() {
        let mut stage = stage();
        let mut surface = RecordingSurface::new(100, 100);
        stage.add_scene(Box::new(GameOverScene::default()));
        stage.add_scene(Box::new(ScriptedScene::empty("next")));
        stage.start(&mut surface);

        stage.tick(&mut surface);
        assert_eq!(stage.current_scene_name(), Some("game_over"));

        stage
            .input_mut()
            .push_pointer_press(Position::new(5.0, 5.0));
        stage.tick(&mut surface);

        assert_eq!(stage.current_scene_name(), Some("next"));
        assert!(!stage.input_mut().has_pointer_press());
    }

    #[test]
    fn unread_press_waits_for_a_reader() {
        let mut stage = stage();
        let mut surface = RecordingSurface::new(100, 100);
        stage.add_scene(Box::new(ScriptedScene::empty("quiet")));
        stage.add_scene(Box::new(ScriptedScene::new("reader", |world| {
            let mut sprite = Sprite::new("reader");
            sprite.add_action(NextSceneOnPress);
            world.spawn(sprite);
        })));
        stage.start(&mut surface);
        stage.input_mut().push_pointer_press(Position::ORIGIN);

        stage.tick(&mut surface);
        stage.next_scene(&mut surface);
        assert_eq!(stage.current_scene_name(), Some("reader"));
        stage.tick(&mut surface);

        assert_eq!(stage.current_scene_name(), Some("quiet"));
    }

    #[test]
    fn loading_scene_hands_over_when_nothing_is_declared() {
        let mut stage = stage();
        let mut surface = RecordingSurface::new(400, 100);
        stage.add_scene(Box::new(LoadingScene));
        stage.add_scene(Box::new(ScriptedScene::empty("menu")));
        stage.start(&mut surface);

        stage.tick(&mut surface);

        assert_eq!(surface.texts(), vec!["LOADING 100% ..."]);
        assert_eq!(stage.current_scene_name(), Some("menu"));
        assert!(stage.loader().has_begun());
    }

    #[test]
    fn failed_assets_still_open_the_gate() {
        let temp = tempfile::tempdir().expect("tempdir");
        let manifest = AssetManifest::new(temp.path()).with_images(["a.png", "b.png"]);
        let mut stage = Stage::new(StageConfig::default(), manifest).with_seed(1);
        let mut surface = RecordingSurface::new(480, 852);
        stage.add_scene(Box::new(LoadingScene));
        stage.add_scene(Box::new(ScriptedScene::empty("menu")));
        stage.start(&mut surface);
        stage.loader_mut().begin();
        stage.loader_mut().wait();

        stage.tick(&mut surface);

        assert_eq!(surface.texts(), vec!["LOADING 100% ..."]);
        assert_eq!(stage.current_scene_name(), Some("menu"));
        assert!(stage.loader().image("a.png").is_none());
    }

    #[test]
    fn stopped_stage_produces_no_frames() {
        let journal: Journal = Rc::default();
        let mut stage = stage();
        let mut surface = RecordingSurface::new(100, 100);
        let setup_journal = Rc::clone(&journal);
        stage.add_scene(Box::new(ScriptedScene::new("play", move |world| {
            world.spawn(moving_sprite("A", 0.0, &setup_journal));
        })));
        stage.start(&mut surface);
        stage.stop();

        stage.tick(&mut surface);

        assert!(journal.borrow().is_empty());
        assert_eq!(stage.frame_count(), 0);
        assert_eq!(stage.sprite_count(), 1);
    }
}

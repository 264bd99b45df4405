//! Typing drill: letters fall from the top, typing one knocks it out.

use std::cell::Cell;
use std::rc::Rc;

use rand::Rng;
use serde::Deserialize;
use sprite_stage::app::{
    shared, Action, Costume, Extent, FrameContext, LoadingScene, Move, Position, Scene, Sprite,
    SpriteStatus, SpriteWorld, TickContext,
};
use sprite_stage::AssetManifest;
use tracing::{debug, info};

const LETTER: &str = "letter";
const TYPIST: &str = "typist";

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TypingConfig {
    pub(crate) assets: AssetManifest,
    #[serde(default = "default_spawn_every_frames")]
    pub(crate) spawn_every_frames: u32,
    #[serde(default = "default_fall_speed")]
    pub(crate) fall_speed: f32,
    #[serde(default = "default_alphabet")]
    pub(crate) alphabet: String,
    #[serde(default)]
    pub(crate) sounds: TypingSounds,
}

/// Clip names, looked up in the typing manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct TypingSounds {
    pub(crate) hit: String,
    pub(crate) miss: String,
    pub(crate) fall: String,
}

impl Default for TypingSounds {
    fn default() -> Self {
        Self {
            hit: "hit.wav".to_string(),
            miss: "miss.wav".to_string(),
            fall: "fall.wav".to_string(),
        }
    }
}

fn default_spawn_every_frames() -> u32 {
    20
}

fn default_fall_speed() -> f32 {
    3.0
}

fn default_alphabet() -> String {
    ('A'..='Z').collect()
}

/// Drops a random letter every `every` frames of the owner.
struct SpawnLetters {
    every: u32,
    alphabet: Vec<char>,
    fall: Rc<dyn Action>,
    fall_out: Rc<dyn Action>,
    frames: Cell<u32>,
}

impl Action for SpawnLetters {
    fn execute(&self, _sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        let frame = self.frames.get().wrapping_add(1);
        self.frames.set(frame);
        if self.every == 0 || frame % self.every != 0 || self.alphabet.is_empty() {
            return;
        }

        let letter = self.alphabet[ctx.frame.rng.gen_range(0..self.alphabet.len())];
        let size = ctx.frame.font_size as f32;
        let x = ctx.frame.random_x(0.0, size);
        let mut sprite = Sprite::new(LETTER)
            .at(Position::new(x, -size))
            .with_extent(Extent::new(size, size));
        sprite.add_costume(Costume::text(letter.to_string()));
        sprite.add_shared_action(Rc::clone(&self.fall));
        sprite.add_shared_action(Rc::clone(&self.fall_out));
        let id = ctx.spawn(sprite);
        debug!(%letter, id = id.0, x, "letter_spawned");
    }
}

/// Consumes a key press and knocks out the first falling letter it names.
struct TypeLetter {
    hit: String,
    miss: String,
}

impl Action for TypeLetter {
    fn execute(&self, _sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        let Some(key) = ctx.input().take_key_press() else {
            return;
        };
        let mut buf = [0u8; 4];
        let typed: &str = key.encode_utf8(&mut buf);

        let target = ctx
            .sprites()
            .filter(|sprite| sprite.tag() == LETTER && sprite.status() == SpriteStatus::Alive)
            .filter(|sprite| !ctx.is_removal_pending(sprite.id()))
            .find(|sprite| {
                sprite
                    .current_costume()
                    .and_then(Costume::text_content)
                    .is_some_and(|text| text.eq_ignore_ascii_case(typed))
            })
            .map(Sprite::id);

        match target {
            Some(id) => {
                // It was drawn at its current box this tick; that is what removal clears.
                if let Some(letter) = ctx.sprite_mut(id) {
                    letter.remember_footprint();
                }
                ctx.destroy_by_id(id);
                ctx.frame.play_once(&self.hit);
                debug!(%key, id = id.0, "letter_hit");
            }
            None => {
                ctx.frame.play_once(&self.miss);
                debug!(%key, "letter_missed");
            }
        }
    }
}

/// Stage removal once the letter has fallen past the bottom edge.
struct FallOut {
    sound: String,
}

impl Action for FallOut {
    fn execute(&self, sprite: &mut Sprite, ctx: &mut TickContext<'_, '_>) {
        if sprite.position.y > ctx.bounds().size.height && ctx.remove(sprite.id()) {
            ctx.frame.play_once(&self.sound);
        }
    }
}

pub(crate) struct TypingScene {
    config: TypingConfig,
}

impl TypingScene {
    pub(crate) fn new(config: TypingConfig) -> Self {
        Self { config }
    }
}

impl Scene for TypingScene {
    fn name(&self) -> &str {
        "typing"
    }

    fn start(&mut self, world: &mut SpriteWorld, _frame: &mut FrameContext<'_>) {
        let config = &self.config;
        let mut typist = Sprite::new(TYPIST);
        typist.add_action(SpawnLetters {
            every: config.spawn_every_frames,
            alphabet: config.alphabet.chars().collect(),
            fall: shared(Move::new(config.fall_speed)),
            fall_out: shared(FallOut {
                sound: config.sounds.fall.clone(),
            }),
            frames: Cell::new(0),
        });
        typist.add_action(TypeLetter {
            hit: config.sounds.hit.clone(),
            miss: config.sounds.miss.clone(),
        });
        world.spawn(typist);

        info!(
            every = config.spawn_every_frames,
            letters = config.alphabet.chars().count(),
            "typing_started"
        );
    }
}

pub(crate) fn typing_scenes(config: &TypingConfig) -> Vec<Box<dyn Scene>> {
    vec![
        Box::new(LoadingScene),
        Box::new(TypingScene::new(config.clone())),
    ]
}

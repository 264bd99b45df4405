//! Vertical shooter: a pointer-steered hero fires at enemies dropping from the top.

use std::cell::Cell;
use std::rc::Rc;

use serde::Deserialize;
use sprite_stage::app::{
    animation_step_due, hit, shared, teardown_world, Action, CategoryIndex, Costume,
    CycleCostume, CycleCostumeOnce, Extent, FollowPointer, FrameContext, GameOverScene,
    LoadingScene, LoopAudio, Move, Position, RemoveWhenOutOfRange, Scene, ScrollBackdrop, Sprite,
    SpriteId, SpriteWorld, Stats, TerminalAnimation, TickContext, WelcomeScene,
};
use sprite_stage::AssetManifest;
use tracing::{debug, info};

const HERO: &str = "hero";
const ENEMY: &str = "enemy";
const BULLET: &str = "bullet";
const BACKDROP: &str = "backdrop";

include!("types.rs");
include!("actions.rs");
include!("scene.rs");

#[cfg(test)]
mod tests {
    include!("tests.rs");
}

mod action;
mod audio;
mod collision;
mod context;
mod costume;
mod geometry;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;
mod sprite;
mod stage;
mod world;

pub use action::{
    animation_step_due, frames_per_costume, shared, Action, CycleCostume, CycleCostumeOnce,
    FollowPointer, LoopAudio, Move, NextSceneOnPress, RemoveWhenOutOfRange, ScrollBackdrop,
};
pub use audio::{AudioEngine, AudioError, Playback};
pub use collision::{contains, hit, hit_boxes};
pub use context::{FrameContext, TickContext};
pub use costume::{Costume, Procedural};
pub use geometry::{BoundingBox, Extent, Position};
pub use input::FrameInput;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{PixelSurface, RecordingSurface, Surface, SurfaceOp, CLEAR_COLOR, INK_COLOR};
pub use scene::{teardown_world, GameOverScene, LoadingScene, Scene, WelcomeScene};
pub use sprite::{DestroyOutcome, Sprite, SpriteId, SpriteStatus, Stats, TerminalAnimation};
pub use stage::{Stage, StageBounds, StageConfig};
pub use world::{CategoryIndex, SpriteIdAllocator, SpriteWorld};

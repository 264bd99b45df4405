use std::path::Path;

use sprite_stage::app::AudioEngine;
use sprite_stage::{resolve_app_paths, AssetManifest, LoopConfig, Stage, StartupError};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::config::{load_game_config, ConfigError, GameConfig, GameMode};
use super::plane::plane_scenes;
use super::typing::typing_scenes;

#[derive(Debug, Error)]
pub(crate) enum BootError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub(crate) struct AppWiring {
    pub(crate) loop_config: LoopConfig,
    pub(crate) stage: Stage,
}

pub(crate) fn build_app() -> Result<AppWiring, BootError> {
    info!("=== Plane Raid Startup ===");
    let paths = resolve_app_paths()?;
    info!(
        root = %paths.root.display(),
        assets_dir = %paths.assets_dir.display(),
        "startup"
    );

    let config = load_game_config(&paths.assets_dir)?;
    info!(
        mode = ?config.mode,
        width = config.stage.width,
        height = config.stage.height,
        tick_interval_ms = config.stage.tick_interval_ms,
        "game_config"
    );

    let mut stage = build_stage(&config, &paths.assets_dir);
    match AudioEngine::try_new() {
        Ok(audio) => stage = stage.with_audio(audio),
        Err(err) => warn!(error = %err, "audio_unavailable"),
    }

    Ok(AppWiring {
        loop_config: config.window.clone(),
        stage,
    })
}

/// Stage with the selected game's manifest and scene order. Asset base paths
/// in the config are relative to `assets_dir`.
pub(crate) fn build_stage(config: &GameConfig, assets_dir: &Path) -> Stage {
    let (manifest, scenes) = match config.mode {
        GameMode::Plane => (&config.plane.assets, plane_scenes(&config.plane)),
        GameMode::Typing => (&config.typing.assets, typing_scenes(&config.typing)),
    };
    let manifest: AssetManifest = manifest.clone().rooted_at(assets_dir);
    info!(
        base_path = %manifest.base_path.display(),
        assets = manifest.total(),
        "asset_manifest"
    );

    let mut stage = Stage::new(config.stage.clone(), manifest);
    for scene in scenes {
        stage.add_scene(scene);
    }
    stage
}

pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

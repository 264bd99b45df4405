use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::{Error as PixelsError, Pixels, SurfaceTexture};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, KeyCode, PhysicalKey};
use winit::window::{Window, WindowBuilder};

use crate::StartupError;

use super::geometry::Position;
use super::input::FrameInput;
use super::metrics::MetricsAccumulator;
use super::rendering::{PixelSurface, Surface};
use super::stage::Stage;

/// Window and pacing knobs for [`run_app`]. The stage's own config decides
/// the canvas size and the tick interval.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    pub window_title: String,
    pub max_frame_delta_ms: u64,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval_ms: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Sprite Stage".to_string(),
            max_frame_delta_ms: 250,
            max_ticks_per_frame: 5,
            metrics_log_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize pixel buffer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Opens a window sized to the stage and drives it until the window closes
/// or Escape is pressed.
///
/// Wall-clock time is accumulated and spent in whole stage ticks, so the
/// game advances at the stage's tick interval whatever the display rate.
pub fn run_app(config: LoopConfig, mut stage: Stage) -> Result<(), AppError> {
    let stage_config = stage.config().clone();
    let (width, height) = (stage_config.width.max(1), stage_config.height.max(1));

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(width as f64, height as f64))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut pixels = build_pixels(Arc::clone(&window), width, height)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let fixed_dt = stage_config.tick_interval();
    let max_frame_delta = normalize_non_zero_duration(
        Duration::from_millis(config.max_frame_delta_ms),
        Duration::from_millis(250),
    );
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let metrics_log_interval = normalize_non_zero_duration(
        Duration::from_millis(config.metrics_log_interval_ms),
        Duration::from_secs(1),
    );
    info!(
        width,
        height,
        tick_interval_ms = fixed_dt.as_millis() as u64,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        "loop_config"
    );

    {
        let mut surface = PixelSurface::new(pixels.frame_mut(), width, height);
        surface.clear_all();
        stage.start(&mut surface);
    }

    let mut input_collector = InputCollector::default();
    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut metrics = MetricsAccumulator::new(metrics_log_interval, last_frame_instant);

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(size) => {
                    if size.width == 0 || size.height == 0 {
                        return;
                    }
                    if let Err(error) = pixels.resize_surface(size.width, size.height) {
                        warn!(error = %error, "surface_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let pointer = window_to_canvas(&pixels, position);
                    input_collector.set_pointer(pointer);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input_collector.handle_mouse_input(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                    if input_collector.quit_requested {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;
                    accumulator = accumulator.saturating_add(clamp_frame_delta(
                        raw_frame_dt,
                        max_frame_delta,
                    ));

                    let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                    for _ in 0..step_plan.ticks_to_run {
                        input_collector.drain_into(stage.input_mut());
                        let mut surface = PixelSurface::new(pixels.frame_mut(), width, height);
                        stage.tick(&mut surface);
                    }
                    accumulator = step_plan.remaining_accumulator;
                    metrics.record_ticks(step_plan.ticks_to_run);

                    if step_plan.dropped_backlog > Duration::ZERO {
                        let dropped = ticks_in(step_plan.dropped_backlog, fixed_dt);
                        metrics.record_dropped(dropped);
                        warn!(
                            dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                            max_ticks_per_frame,
                            "sim_clamp_triggered"
                        );
                    }

                    if step_plan.ticks_to_run > 0 {
                        if let Err(error) = pixels.render() {
                            warn!(error = %error, "present_failed");
                            window_target.exit();
                        }
                    }
                    metrics.record_frame(raw_frame_dt);

                    if let Some(snapshot) = metrics.maybe_snapshot(now, stage.sprite_count()) {
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.ticks_per_second,
                            frame_time_ms = snapshot.frame_time_ms,
                            dropped_ticks = snapshot.dropped_ticks,
                            sprite_count = snapshot.sprite_count,
                            scene = stage.current_scene_name().unwrap_or("none"),
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                stage.stop();
                info!(frame_count = stage.frame_count(), "shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

fn build_pixels(
    window: Arc<Window>,
    width: u32,
    height: u32,
) -> Result<Pixels<'static>, AppError> {
    let size = window.inner_size();
    let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
    Pixels::new(width, height, surface).map_err(AppError::CreateRenderer)
}

fn window_to_canvas(pixels: &Pixels<'_>, position: PhysicalPosition<f64>) -> Position {
    let (x, y) = pixels
        .window_pos_to_pixel((position.x as f32, position.y as f32))
        .unwrap_or_else(|outside| pixels.clamp_pixel_pos(outside));
    Position::new(x as f32, y as f32)
}

/// Window events gathered between ticks. Presses are edge-triggered: holding
/// a button or key produces one press until it is released.
#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    pointer: Option<Position>,
    left_mouse_is_down: bool,
    pointer_pressed_edge: bool,
    pending_key: Option<char>,
}

impl InputCollector {
    fn set_pointer(&mut self, position: Position) {
        self.pointer = Some(position);
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => {
                if !self.left_mouse_is_down {
                    self.pointer_pressed_edge = true;
                }
                self.left_mouse_is_down = true;
            }
            ElementState::Released => self.left_mouse_is_down = false,
        }
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        if key_event.state != ElementState::Pressed || key_event.repeat {
            return;
        }
        if key_event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
            self.quit_requested = true;
            return;
        }
        if let Some(key) = key_char(key_event) {
            self.pending_key = Some(key);
        }
    }

    /// Hands the gathered state to the stage input. Presses already handed over
    /// are not repeated on later ticks.
    fn drain_into(&mut self, input: &mut FrameInput) {
        if let Some(pointer) = self.pointer {
            input.set_pointer(pointer);
        }
        if std::mem::take(&mut self.pointer_pressed_edge) {
            input.push_pointer_press(self.pointer.unwrap_or(input.pointer()));
        }
        if let Some(key) = self.pending_key.take() {
            input.push_key_press(key);
        }
    }
}

fn key_char(key_event: &KeyEvent) -> Option<char> {
    match &key_event.logical_key {
        Key::Character(text) => text.chars().next().filter(char::is_ascii_alphanumeric),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

/// Whole ticks owed for the accumulated time, capped per frame. Time beyond
/// the cap is dropped rather than carried into the next frame.
fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;
    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    let dropped_backlog = if accumulator >= fixed_dt {
        std::mem::take(&mut accumulator)
    } else {
        Duration::ZERO
    };
    StepPlan {
        ticks_to_run,
        remaining_accumulator: accumulator,
        dropped_backlog,
    }
}

fn ticks_in(backlog: Duration, fixed_dt: Duration) -> u32 {
    if fixed_dt.is_zero() {
        return 0;
    }
    (backlog.as_nanos() / fixed_dt.as_nanos()).min(u32::MAX as u128) as u32
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

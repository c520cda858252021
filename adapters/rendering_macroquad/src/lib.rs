#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Escape.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment, so
//! the crate depends on macroquad without its default `audio` feature.
//!
//! The maze is drawn as solid cubes through a perspective [`Camera3D`] that
//! mirrors the scene camera. The start/win overlay uses Macroquad's
//! immediate-mode UI module; those calls live in the local `ui` module.

mod ui;

use self::ui::{draw_overlay_ui, OverlayUiContext};
use anyhow::Result;
use macroquad::{
    camera::{set_camera, set_default_camera, Camera3D},
    input::{is_key_down, is_key_pressed, KeyCode},
    math::{vec3, Vec2 as MacroquadVec2, Vec3 as MacroquadVec3},
    models::{draw_cube, draw_cube_wires},
};
use maze_escape_rendering::{
    Color, FrameInput, OverlayAction, Presentation, RenderingBackend, Scene, Shape,
};
use std::time::Duration;

/// Key codes forwarded to the simulation and the identifiers they map to.
const MOVEMENT_KEYS: [(KeyCode, &str); 8] = [
    (KeyCode::Up, "ArrowUp"),
    (KeyCode::Down, "ArrowDown"),
    (KeyCode::Left, "ArrowLeft"),
    (KeyCode::Right, "ArrowRight"),
    (KeyCode::W, "w"),
    (KeyCode::A, "a"),
    (KeyCode::S, "s"),
    (KeyCode::D, "d"),
];

const OVERLAY_SIZE: (f32, f32) = (360.0, 160.0);

/// Time a movement key must stay held before it starts repeating.
const KEY_REPEAT_DELAY: Duration = Duration::from_millis(250);

/// Time between repeats of a held movement key.
const KEY_REPEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Upper bound on repeats emitted for one key in a single frame, so a stalled
/// frame does not release a burst of steps.
const MAX_REPEATS_PER_FRAME: u32 = 4;

/// Tracks overlay button presses so they can be merged with keyboard input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlayInputState {
    start_latched: bool,
    restart_latched: bool,
}

impl OverlayInputState {
    /// Records that the overlay button offering `action` was pressed this frame.
    pub fn register(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::Start => self.start_latched = true,
            OverlayAction::Restart => self.restart_latched = true,
        }
    }

    /// Returns whether a start was requested and clears the latch so it fires once.
    pub fn take_start(&mut self) -> bool {
        std::mem::take(&mut self.start_latched)
    }

    /// Returns whether a restart was requested and clears the latch so it fires once.
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_latched)
    }
}

/// Turns held movement keys into a stream of key identifiers with auto-repeat.
///
/// A key emits once on the frame it goes down, again after
/// [`KeyRepeatState::delay`] and then every [`KeyRepeatState::interval`]
/// until it is released.
#[doc(hidden)]
#[derive(Clone, Debug)]
pub struct KeyRepeatState {
    delay: Duration,
    interval: Duration,
    held: Vec<(&'static str, Duration)>,
}

impl Default for KeyRepeatState {
    fn default() -> Self {
        Self::new(KEY_REPEAT_DELAY, KEY_REPEAT_INTERVAL)
    }
}

impl KeyRepeatState {
    /// Creates a repeat tracker with the provided initial delay and repeat interval.
    #[must_use]
    pub fn new(delay: Duration, interval: Duration) -> Self {
        Self {
            delay,
            interval: interval.max(Duration::from_millis(1)),
            held: Vec::new(),
        }
    }

    /// Delay before a held key starts repeating.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Interval between consecutive repeats.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Advances the tracker by `dt` with the keys currently held down.
    ///
    /// Returns one identifier per press or repeat, in the order the keys are
    /// provided.
    pub fn update<I>(&mut self, held: I, dt: Duration) -> Vec<String>
    where
        I: IntoIterator<Item = &'static str>,
    {
        let mut emitted = Vec::new();
        let mut next_held = Vec::new();

        for key in held {
            let previous = self
                .held
                .iter()
                .find(|(identifier, _)| *identifier == key)
                .map(|(_, remaining)| *remaining);

            let remaining = match previous {
                None => {
                    emitted.push(key.to_owned());
                    self.delay
                }
                Some(remaining) => {
                    let (repeats, remaining) = self.elapse(remaining, dt);
                    emitted.extend((0..repeats).map(|_| key.to_owned()));
                    remaining
                }
            };
            next_held.push((key, remaining));
        }

        self.held = next_held;
        emitted
    }

    fn elapse(&self, remaining: Duration, dt: Duration) -> (u32, Duration) {
        if dt < remaining {
            return (0, remaining - dt);
        }

        let mut budget = dt - remaining;
        let mut repeats = 1;
        while budget >= self.interval && repeats < MAX_REPEATS_PER_FRAME {
            budget -= self.interval;
            repeats += 1;
        }
        let remaining = self.interval.saturating_sub(budget).max(Duration::from_nanos(1));
        (repeats, remaining)
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Escape` quits the game loop.
    quit_requested: bool,
    /// `Enter` activates the start affordance.
    start_pressed: bool,
    /// `R` activates the restart affordance.
    restart_pressed: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape),
            start_pressed: is_key_pressed(KeyCode::Enter),
            restart_pressed: is_key_pressed(KeyCode::R),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self { swap_interval } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 960,
            window_height: 720,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut overlay_input = OverlayInputState::default();
            let mut key_repeat = KeyRepeatState::default();

            loop {
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let keyboard = KeyboardShortcuts::poll();
                let keys = key_repeat.update(held_keys(is_key_down), frame_dt);
                let frame_input = gather_frame_input(keys, keyboard, &mut overlay_input);
                let quit_requested = frame_input.quit_requested;

                update_scene(frame_dt, frame_input, &mut scene);

                if quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                set_camera(&scene_camera(&scene));
                draw_renderables(&scene);
                set_default_camera();

                if scene.overlay.visible {
                    let context = overlay_context(
                        &scene,
                        macroquad::window::screen_width(),
                        macroquad::window::screen_height(),
                    );
                    let mut root_ui = macroquad::ui::root_ui();
                    if draw_overlay_ui(&mut root_ui, context) {
                        overlay_input.register(scene.overlay.action);
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn held_keys<P>(is_down: P) -> Vec<&'static str>
where
    P: Fn(KeyCode) -> bool,
{
    MOVEMENT_KEYS
        .iter()
        .filter(|(code, _)| is_down(*code))
        .map(|(_, identifier)| *identifier)
        .collect()
}

fn gather_frame_input(
    keys: Vec<String>,
    keyboard: KeyboardShortcuts,
    overlay_input: &mut OverlayInputState,
) -> FrameInput {
    let start_latched = overlay_input.take_start();
    let restart_latched = overlay_input.take_restart();

    FrameInput {
        keys,
        start_requested: keyboard.start_pressed || start_latched,
        restart_requested: keyboard.restart_pressed || restart_latched,
        quit_requested: keyboard.quit_requested,
    }
}

fn scene_camera(scene: &Scene) -> Camera3D {
    let camera = scene.camera();
    Camera3D {
        position: to_macroquad_vec3(camera.position),
        target: to_macroquad_vec3(camera.target),
        // North (-z) points to the top of the screen when looking straight down.
        up: vec3(0.0, 0.0, -1.0),
        ..Camera3D::default()
    }
}

fn draw_renderables(scene: &Scene) {
    for renderable in scene.renderables() {
        match renderable.shape {
            Shape::Cube { size } => {
                let position = to_macroquad_vec3(renderable.position);
                let extent = vec3(size, size, size);
                draw_cube(position, extent, None, to_macroquad_color(renderable.color));
                draw_cube_wires(
                    position,
                    extent,
                    to_macroquad_color(renderable.color.lighten(0.5)),
                );
            }
        }
    }
}

fn overlay_context(scene: &Scene, screen_width: f32, screen_height: f32) -> OverlayUiContext<'_> {
    let (width, height) = OVERLAY_SIZE;
    let width = width.min(screen_width);
    let height = height.min(screen_height);

    OverlayUiContext {
        origin: MacroquadVec2::new(
            ((screen_width - width) * 0.5).max(0.0),
            ((screen_height - height) * 0.5).max(0.0),
        ),
        size: MacroquadVec2::new(width, height),
        background: macroquad::color::Color::from_rgba(32, 32, 32, 230),
        message: &scene.overlay.message,
        button_label: scene.overlay.action.label(),
    }
}

fn to_macroquad_vec3(position: glam::Vec3) -> MacroquadVec3 {
    vec3(position.x, position.y, position.z)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

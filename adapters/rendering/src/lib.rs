#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Escape adapters.
//!
//! Adapters describe what should be on screen through a retained [`Scene`]
//! display list, a follow [`Camera`] and the start/win [`Overlay`]. Backends
//! implementing [`RenderingBackend`] own the frame loop and only read the
//! scene; all mutation happens inside the update closure they call once per
//! frame.

use anyhow::Result as AnyResult;
use glam::Vec3;
use maze_escape_core::{WELCOME_BANNER, WIN_MESSAGE};
use maze_escape_world::SessionListener;
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Creates an opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(rgb: u32) -> Self {
        Self::from_rgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors used for the maze inhabitants.
pub mod palette {
    use super::Color;

    /// Wall cubes.
    pub const WALL: Color = Color::from_hex(0x00ff00);
    /// Player cube.
    pub const PLAYER: Color = Color::from_hex(0xff0000);
    /// Exit gate cube.
    pub const GATE: Color = Color::from_hex(0x0000ff);
    /// Background cleared before each frame.
    pub const CLEAR: Color = Color::from_hex(0xffffff);
}

/// Geometry of a renderable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned cube.
    Cube {
        /// Edge length in world units.
        size: f32,
    },
}

impl Shape {
    /// Creates a cube shape, rejecting non-positive or non-finite edge lengths.
    pub fn cube(size: f32) -> Result<Self, RenderingError> {
        if size.is_finite() && size > 0.0 {
            Ok(Self::Cube { size })
        } else {
            Err(RenderingError::InvalidShapeSize { size })
        }
    }
}

/// Handle identifying a renderable spawned into a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderableId(u32);

impl RenderableId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Single drawable entry of the display list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Renderable {
    /// Handle returned when the renderable was spawned.
    pub id: RenderableId,
    /// Geometry to draw.
    pub shape: Shape,
    /// Fill color.
    pub color: Color,
    /// Centre of the shape in world space.
    pub position: Vec3,
}

/// Perspective camera described by its eye position and look-at target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
}

impl Camera {
    /// Offset of the follow camera from the player it tracks.
    pub const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 5.0, 0.0);

    /// Creates a camera placed above `subject` and looking at it.
    #[must_use]
    pub fn following(subject: Vec3) -> Self {
        Self {
            position: subject + Self::FOLLOW_OFFSET,
            target: subject,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::following(Vec3::ZERO)
    }
}

/// Affordance offered by the overlay button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayAction {
    /// Starts the first session.
    Start,
    /// Discards the finished session and generates a new maze.
    Restart,
}

impl OverlayAction {
    /// Caption shown on the overlay button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Restart => "Restart",
        }
    }
}

/// Modal overlay covering the maze before the first start and after a win.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    /// Whether the overlay is currently shown.
    pub visible: bool,
    /// Message displayed above the button.
    pub message: String,
    /// Affordance offered by the button.
    pub action: OverlayAction,
}

impl Overlay {
    /// Overlay shown when the game is first opened.
    #[must_use]
    pub fn welcome() -> Self {
        Self {
            visible: true,
            message: WELCOME_BANNER.to_owned(),
            action: OverlayAction::Start,
        }
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::welcome()
    }
}

impl SessionListener for Overlay {
    fn on_start(&mut self) {
        self.visible = false;
    }

    fn on_win(&mut self) {
        self.visible = true;
        self.message = WIN_MESSAGE.to_owned();
        self.action = OverlayAction::Restart;
    }

    fn on_restart(&mut self) {
        self.visible = false;
    }
}

/// Retained display list mirrored from the session by adapters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    renderables: Vec<Renderable>,
    camera: Camera,
    /// Start and win overlay.
    pub overlay: Overlay,
    next_id: u32,
}

impl Scene {
    /// Creates an empty scene showing the welcome overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a renderable to the display list and returns its handle.
    ///
    /// Handles are never reused, including across [`Scene::clear`].
    pub fn spawn(&mut self, shape: Shape, color: Color, position: Vec3) -> RenderableId {
        let id = RenderableId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.renderables.push(Renderable {
            id,
            shape,
            color,
            position,
        });
        id
    }

    /// Removes every renderable; the camera and overlay are left untouched.
    pub fn clear(&mut self) {
        self.renderables.clear();
    }

    /// Moves an existing renderable to a new position.
    pub fn set_position(&mut self, id: RenderableId, position: Vec3) -> Result<(), RenderingError> {
        let renderable = self
            .renderables
            .iter_mut()
            .find(|renderable| renderable.id == id)
            .ok_or(RenderingError::UnknownRenderable { id })?;
        renderable.position = position;
        Ok(())
    }

    /// Replaces the active camera.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Active camera.
    #[must_use]
    pub const fn camera(&self) -> Camera {
        self.camera
    }

    /// Renderables in spawn order.
    #[must_use]
    pub fn renderables(&self) -> &[Renderable] {
        &self.renderables
    }

    /// Looks up a renderable by handle.
    #[must_use]
    pub fn renderable(&self, id: RenderableId) -> Option<&Renderable> {
        self.renderables.iter().find(|renderable| renderable.id == id)
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Key identifiers pressed this frame, in arrival order (`"ArrowUp"`, `"w"`, ...).
    pub keys: Vec<String>,
    /// Whether the overlay's start affordance was activated on this frame.
    pub start_requested: bool,
    /// Whether the overlay's restart affordance was activated on this frame.
    pub restart_requested: bool,
    /// Whether the adapter detected a request to close the game.
    pub quit_requested: bool,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Escape scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is drawn. Backends never mutate the scene themselves.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing or updating rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Shapes must have a positive, finite size.
    #[error("shape size must be positive and finite (received {size})")]
    InvalidShapeSize {
        /// Provided size that failed validation.
        size: f32,
    },
    /// The handle does not refer to a renderable in the scene.
    #[error("renderable {} is not part of the scene", .id.get())]
    UnknownRenderable {
        /// Handle that failed to resolve.
        id: RenderableId,
    },
}

//! Frame driver that feeds adapter input into the session and mirrors it into the scene.

use log::debug;
use maze_escape_core::{Command, Event, CELL_SIZE, GATE_SIZE, PLAYER_SIZE};
use maze_escape_rendering::{
    palette, Camera, FrameInput, RenderableId, RenderingError, Scene, Shape,
};
use maze_escape_system_input::{Controls, SessionRequests};
use maze_escape_world::{self as world, notify, query, GameSession};

/// Owns the session and the systems that drive it between frames.
#[derive(Debug)]
pub(crate) struct Simulation {
    session: GameSession,
    controls: Controls,
    events: Vec<Event>,
    commands: Vec<Command>,
    player: Option<RenderableId>,
}

impl Simulation {
    /// Wraps an idle session.
    pub(crate) fn new(session: GameSession) -> Self {
        Self {
            session,
            controls: Controls::new(),
            events: Vec::new(),
            commands: Vec::new(),
            player: None,
        }
    }

    /// Processes one frame of input and updates the scene to match the session.
    ///
    /// Commands run one at a time, so every movement step, including its win
    /// check, completes before the next key is considered.
    pub(crate) fn advance(
        &mut self,
        input: &FrameInput,
        scene: &mut Scene,
    ) -> Result<(), RenderingError> {
        let previous_events = std::mem::take(&mut self.events);
        let requests = SessionRequests::new(input.start_requested, input.restart_requested);
        self.controls
            .handle(&previous_events, &input.keys, requests, &mut self.commands);

        for command in self.commands.drain(..) {
            world::apply(&mut self.session, command, &mut self.events);
        }

        notify(&self.events, &mut scene.overlay);
        self.mirror(scene)
    }

    fn mirror(&mut self, scene: &mut Scene) -> Result<(), RenderingError> {
        let happened = |wanted: fn(&Event) -> bool| self.events.iter().any(wanted);
        let restarted = happened(|event| matches!(event, Event::SessionRestarted));
        let started = happened(|event| matches!(event, Event::SessionStarted { .. }));
        let moved = happened(|event| matches!(event, Event::PlayerMoved { .. }));

        if restarted {
            scene.clear();
            self.player = None;
        }
        if started {
            return self.populate(scene);
        }

        if moved {
            if let (Some(player), Some(position)) =
                (self.player, query::player_position(&self.session))
            {
                scene.set_position(player, position)?;
                scene.set_camera(Camera::following(position));
            }
        }
        Ok(())
    }

    fn populate(&mut self, scene: &mut Scene) -> Result<(), RenderingError> {
        scene.clear();
        let Some(layout) = query::layout(&self.session) else {
            self.player = None;
            return Ok(());
        };

        let wall_shape = Shape::cube(CELL_SIZE)?;
        for wall in layout.walls() {
            let _ = scene.spawn(wall_shape, palette::WALL, wall.position());
        }
        let _ = scene.spawn(
            Shape::cube(GATE_SIZE)?,
            palette::GATE,
            layout.exit().position(),
        );

        let spawn = layout.player_spawn();
        self.player = Some(scene.spawn(Shape::cube(PLAYER_SIZE)?, palette::PLAYER, spawn));
        scene.set_camera(Camera::following(spawn));
        debug!(
            "scene populated with {} renderables",
            scene.renderables().len()
        );
        Ok(())
    }
}

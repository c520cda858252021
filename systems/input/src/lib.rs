#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system translating key identifiers and overlay requests into session commands.

use maze_escape_core::{Command, Direction, Event, SessionStatus};

/// Key identifiers bound to each movement direction.
const BINDINGS: [(&str, Direction); 8] = [
    ("ArrowUp", Direction::North),
    ("w", Direction::North),
    ("ArrowDown", Direction::South),
    ("s", Direction::South),
    ("ArrowLeft", Direction::West),
    ("a", Direction::West),
    ("ArrowRight", Direction::East),
    ("d", Direction::East),
];

/// Resolves a key identifier to a movement direction.
///
/// Matching ignores ASCII case, so `"W"` and `"arrowup"` both map north.
/// Unrecognised identifiers resolve to `None`.
#[must_use]
pub fn direction_for_key(key: &str) -> Option<Direction> {
    BINDINGS
        .iter()
        .find(|(binding, _)| binding.eq_ignore_ascii_case(key))
        .map(|(_, direction)| *direction)
}

/// Session lifecycle requests raised by the overlay for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionRequests {
    /// Indicates whether the player pressed the start affordance.
    pub start: bool,
    /// Indicates whether the player pressed the restart affordance.
    pub restart: bool,
}

impl SessionRequests {
    /// Creates a new request descriptor with explicit field values.
    #[must_use]
    pub const fn new(start: bool, restart: bool) -> Self {
        Self { start, restart }
    }
}

/// Keyboard controls that track the session status and emit world commands.
#[derive(Clone, Debug, Default)]
pub struct Controls {
    status: SessionStatus,
}

impl Controls {
    /// Creates a controls system for a session that has not started yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: SessionStatus::Idle,
        }
    }

    /// Last session status observed through world events.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Consumes world events and this frame's input to emit session commands.
    ///
    /// Each recognised key yields one [`Command::MovePlayer`], in order, but
    /// only while a session is being played. A start request is honoured while
    /// idle; a restart request once a session exists.
    pub fn handle<K>(
        &mut self,
        events: &[Event],
        keys: &[K],
        requests: SessionRequests,
        out: &mut Vec<Command>,
    ) where
        K: AsRef<str>,
    {
        for event in events {
            match event {
                Event::SessionStarted { .. } => self.status = SessionStatus::Playing,
                Event::GateReached => self.status = SessionStatus::Won,
                Event::SessionRestarted => self.status = SessionStatus::Idle,
                _ => {}
            }
        }

        if requests.restart && self.status != SessionStatus::Idle {
            out.push(Command::RestartSession);
            return;
        }

        if requests.start && self.status == SessionStatus::Idle {
            out.push(Command::StartSession);
            return;
        }

        if self.status != SessionStatus::Playing {
            return;
        }

        out.extend(
            keys.iter()
                .filter_map(|key| direction_for_key(key.as_ref()))
                .map(|direction| Command::MovePlayer { direction }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_and_letter_keys_share_directions() {
        assert_eq!(direction_for_key("ArrowUp"), Some(Direction::North));
        assert_eq!(direction_for_key("w"), Some(Direction::North));
        assert_eq!(direction_for_key("ArrowDown"), Some(Direction::South));
        assert_eq!(direction_for_key("s"), Some(Direction::South));
        assert_eq!(direction_for_key("ArrowLeft"), Some(Direction::West));
        assert_eq!(direction_for_key("a"), Some(Direction::West));
        assert_eq!(direction_for_key("ArrowRight"), Some(Direction::East));
        assert_eq!(direction_for_key("d"), Some(Direction::East));
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(direction_for_key("W"), Some(Direction::North));
        assert_eq!(direction_for_key("arrowright"), Some(Direction::East));
        assert_eq!(direction_for_key("ARROWLEFT"), Some(Direction::West));
    }

    #[test]
    fn unknown_keys_resolve_to_nothing() {
        for key in ["", "q", "Enter", "ArrowUpp", " w"] {
            assert_eq!(direction_for_key(key), None, "{key:?}");
        }
    }
}

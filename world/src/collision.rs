//! Movement gating against maze walls and win detection against the exit gate.

use glam::Vec3;
use maze_escape_core::{Direction, STEP_DISTANCE};

use crate::{
    layout::{Player, WallInstance},
    spatial::Aabb,
};

/// Result of evaluating a single proposed movement step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveOutcome {
    /// Whether the step was free of wall intersections.
    pub accepted: bool,
    /// Player position after the step; unchanged when the step was rejected.
    pub position: Vec3,
}

/// World-space displacement produced by one step in the provided direction.
#[must_use]
pub fn step_delta(direction: Direction) -> Vec3 {
    match direction {
        Direction::North => Vec3::new(0.0, 0.0, -STEP_DISTANCE),
        Direction::South => Vec3::new(0.0, 0.0, STEP_DISTANCE),
        Direction::West => Vec3::new(-STEP_DISTANCE, 0.0, 0.0),
        Direction::East => Vec3::new(STEP_DISTANCE, 0.0, 0.0),
    }
}

/// Tests a step of `delta` from the player's position against every wall.
///
/// The candidate box is the player's current box translated by `delta`, and
/// the scan stops at the first intersecting wall.
#[must_use]
pub fn attempt_move(player: &Player, delta: Vec3, walls: &[WallInstance]) -> MoveOutcome {
    let current = player.position();
    let candidate_box = player.bounding_box().translate(delta);
    let blocked = walls
        .iter()
        .any(|wall| candidate_box.intersects(&wall.bounding_box()));

    if blocked {
        MoveOutcome {
            accepted: false,
            position: current,
        }
    } else {
        MoveOutcome {
            accepted: true,
            position: current + delta,
        }
    }
}

/// Reports whether the player's box touches the exit gate's box.
#[must_use]
pub fn check_win(player_box: &Aabb, gate_box: &Aabb) -> bool {
    player_box.intersects(gate_box)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::GATE_SIZE;

    fn reaches(player_position: Vec3, gate_position: Vec3) -> bool {
        let gate_box = Aabb::cube(gate_position, GATE_SIZE);
        check_win(&Player::at(player_position).bounding_box(), &gate_box)
    }

    #[test]
    fn step_delta_maps_directions_onto_the_floor_plane() {
        assert_eq!(step_delta(Direction::North), Vec3::new(0.0, 0.0, -0.2));
        assert_eq!(step_delta(Direction::South), Vec3::new(0.0, 0.0, 0.2));
        assert_eq!(step_delta(Direction::West), Vec3::new(-0.2, 0.0, 0.0));
        assert_eq!(step_delta(Direction::East), Vec3::new(0.2, 0.0, 0.0));
    }

    #[test]
    fn moves_without_walls_are_always_accepted() {
        let current = Vec3::new(0.3, 0.25, -1.7);
        let delta = step_delta(Direction::West);

        let outcome = attempt_move(&Player::at(current), delta, &[]);

        assert!(outcome.accepted);
        assert_eq!(outcome.position, current + delta);
    }

    #[test]
    fn coincident_player_and_gate_win() {
        let gate = Vec3::new(9.0, 0.5, 6.0);

        assert!(reaches(gate, gate));
    }

    #[test]
    fn player_one_cell_away_from_gate_does_not_win() {
        let gate = Vec3::new(9.0, 0.5, 6.0);

        for axis in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_X, Vec3::NEG_Y, Vec3::NEG_Z] {
            assert!(
                !reaches(gate + axis, gate),
                "offset {axis:?} should not reach the gate"
            );
        }
    }
}

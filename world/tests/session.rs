use glam::Vec3;
use maze_escape_core::{
    CellCoord, CellState, Command, Direction, Event, SessionConfig, SessionStatus,
};
use maze_escape_world::{self as world, notify, query, GameSession, SessionListener};

fn session(width: u32, height: u32, seed: u64) -> GameSession {
    GameSession::new(SessionConfig {
        width,
        height,
        seed,
    })
    .expect("valid configuration")
}

fn step(session: &mut GameSession, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(session, Command::MovePlayer { direction }, &mut events);
    events
}

fn start(session: &mut GameSession) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(session, Command::StartSession, &mut events);
    events
}

#[derive(Default)]
struct Overlay {
    wins: usize,
    starts: usize,
    restarts: usize,
}

impl SessionListener for Overlay {
    fn on_start(&mut self) {
        self.starts += 1;
    }

    fn on_win(&mut self) {
        self.wins += 1;
    }

    fn on_restart(&mut self) {
        self.restarts += 1;
    }
}

#[test]
fn default_maze_starts_with_player_on_the_open_start_cell() {
    let mut session = session(21, 15, 7);

    let events = start(&mut session);

    let walls = query::walls(&session).len();
    assert_eq!(
        events,
        vec![Event::SessionStarted {
            width: 21,
            height: 15,
            walls,
        }]
    );
    assert_eq!(query::status(&session), SessionStatus::Playing);

    let grid = query::grid(&session).expect("maze in play");
    assert_eq!(grid.cell(CellCoord::new(1, 1)), Ok(CellState::Path));
    for column in 0..21 {
        assert_eq!(grid.cell(CellCoord::new(column, 0)), Ok(CellState::Wall));
    }
    for row in 0..15 {
        assert_eq!(grid.cell(CellCoord::new(0, row)), Ok(CellState::Wall));
    }

    let position = query::player_position(&session).expect("player spawned");
    assert_eq!(position, Vec3::new(-9.0, 0.25, -6.0));
    assert_eq!(query::player_cell(&session), Some(CellCoord::new(1, 1)));
    assert_eq!(
        query::exit_gate(&session).map(|gate| gate.position()),
        Some(Vec3::new(9.0, 0.5, 6.0))
    );
}

#[test]
fn first_north_step_from_the_start_cell_is_accepted() {
    let mut session = session(21, 15, 7);
    let _ = start(&mut session);
    let before = query::player_position(&session).expect("player spawned");

    let events = step(&mut session, Direction::North);

    assert_eq!(
        events,
        vec![Event::PlayerMoved {
            direction: Direction::North
        }]
    );
    assert_eq!(
        query::player_position(&session),
        Some(before + Vec3::new(0.0, 0.0, -0.2))
    );
}

#[test]
fn blocked_step_reports_and_keeps_position() {
    let mut session = session(5, 3, 1);
    let _ = start(&mut session);

    let _ = step(&mut session, Direction::North);
    let before = query::player_position(&session).expect("player spawned");
    let events = step(&mut session, Direction::North);

    assert_eq!(
        events,
        vec![Event::MoveBlocked {
            direction: Direction::North
        }]
    );
    assert_eq!(query::player_position(&session), Some(before));
    assert_eq!(query::status(&session), SessionStatus::Playing);
}

#[test]
fn walking_the_corridor_wins_once_and_freezes_input() {
    // A 5x3 maze is always the single corridor (1,1) -> (3,1).
    let mut session = session(5, 3, 42);
    let mut overlay = Overlay::default();
    notify(&start(&mut session), &mut overlay);

    for _ in 0..6 {
        let events = step(&mut session, Direction::East);
        assert_eq!(
            events,
            vec![Event::PlayerMoved {
                direction: Direction::East
            }]
        );
        notify(&events, &mut overlay);
    }
    assert_eq!(query::status(&session), SessionStatus::Playing);

    let events = step(&mut session, Direction::East);
    assert_eq!(
        events,
        vec![
            Event::PlayerMoved {
                direction: Direction::East
            },
            Event::GateReached,
        ]
    );
    notify(&events, &mut overlay);
    assert_eq!(query::status(&session), SessionStatus::Won);

    let frozen = query::player_position(&session);
    for direction in [Direction::East, Direction::West, Direction::North] {
        let events = step(&mut session, direction);
        assert!(events.is_empty());
        notify(&events, &mut overlay);
    }
    assert_eq!(query::player_position(&session), frozen);
    assert_eq!(overlay.wins, 1);
    assert_eq!(overlay.starts, 1);
}

#[test]
fn restart_twice_yields_two_fresh_valid_sessions() {
    let mut session = session(21, 15, 99);
    let mut overlay = Overlay::default();
    notify(&start(&mut session), &mut overlay);
    let _ = step(&mut session, Direction::North);

    for _ in 0..2 {
        let mut events = Vec::new();
        world::apply(&mut session, Command::RestartSession, &mut events);
        notify(&events, &mut overlay);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], Event::SessionRestarted);
        assert!(matches!(
            events[1],
            Event::SessionStarted {
                width: 21,
                height: 15,
                ..
            }
        ));
        assert_eq!(query::status(&session), SessionStatus::Playing);

        let layout = query::layout(&session).expect("maze in play");
        assert!(layout.grid().is_path(CellCoord::new(1, 1)));
        assert_eq!(
            query::player_position(&session),
            Some(layout.player_spawn())
        );
        assert_eq!(layout.walls().len(), layout.grid().wall_cells().count());
    }

    assert_eq!(overlay.starts, 3);
    assert_eq!(overlay.restarts, 2);
    assert_eq!(overlay.wins, 0);
}

#[test]
fn restart_after_win_resumes_play() {
    let mut session = session(5, 3, 3);
    let _ = start(&mut session);
    for _ in 0..7 {
        let _ = step(&mut session, Direction::East);
    }
    assert_eq!(query::status(&session), SessionStatus::Won);

    let mut events = Vec::new();
    world::apply(&mut session, Command::RestartSession, &mut events);

    assert_eq!(query::status(&session), SessionStatus::Playing);
    assert_eq!(
        step(&mut session, Direction::East),
        vec![Event::PlayerMoved {
            direction: Direction::East
        }]
    );
}

#[test]
fn equal_seeds_replay_identical_mazes() {
    let mut first = session(31, 21, 2024);
    let mut second = session(31, 21, 2024);
    let _ = start(&mut first);
    let _ = start(&mut second);

    assert_eq!(query::grid(&first), query::grid(&second));

    let mut events = Vec::new();
    world::apply(&mut first, Command::RestartSession, &mut events);
    world::apply(&mut second, Command::RestartSession, &mut events);
    assert_eq!(query::grid(&first), query::grid(&second));
}

#[test]
fn restart_draws_a_new_maze_from_the_continuing_stream() {
    let mut session = session(31, 21, 5);
    let _ = start(&mut session);
    let before = query::grid(&session).cloned();

    let mut events = Vec::new();
    world::apply(&mut session, Command::RestartSession, &mut events);

    assert_ne!(query::grid(&session).cloned(), before);
}

#[test]
fn configure_rejects_invalid_dimensions_and_keeps_previous() {
    let mut session = GameSession::default();
    let mut events = Vec::new();

    world::apply(
        &mut session,
        Command::ConfigureMaze {
            width: 20,
            height: 15,
        },
        &mut events,
    );
    world::apply(
        &mut session,
        Command::ConfigureMaze {
            width: 9,
            height: 1,
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![
            Event::ConfigurationRejected {
                width: 20,
                height: 15
            },
            Event::ConfigurationRejected {
                width: 9,
                height: 1
            },
        ]
    );
    let config = query::config(&session);
    assert_eq!((config.width, config.height), (21, 15));
}

#[test]
fn configured_dimensions_apply_to_the_next_start() {
    let mut session = GameSession::default();
    let mut events = Vec::new();

    world::apply(
        &mut session,
        Command::ConfigureMaze {
            width: 11,
            height: 7,
        },
        &mut events,
    );
    world::apply(&mut session, Command::StartSession, &mut events);

    assert_eq!(
        events[0],
        Event::MazeConfigured {
            width: 11,
            height: 7
        }
    );
    let grid = query::grid(&session).expect("maze in play");
    assert_eq!((grid.width(), grid.height()), (11, 7));
}

//! Headless rendering backend that prints a top-down ASCII view and reads keys from a line stream.
//!
//! Every input line is one frame. Words `start`, `restart` and `quit` activate
//! the overlay and exit affordances; `up`, `down`, `left` and `right` map to
//! the arrow keys; runs of `w`/`a`/`s`/`d` expand to one key event per letter.
//! Any other word is forwarded verbatim and ignored by the controls.

use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use anyhow::{Context, Result};
use maze_escape_core::CELL_SIZE;
use maze_escape_rendering::{palette, Color, FrameInput, Presentation, RenderingBackend, Scene};

/// Rendering backend writing frames to `output` and reading input lines from `input`.
#[derive(Debug)]
pub(crate) struct TerminalBackend<R, W> {
    input: R,
    output: W,
}

impl TerminalBackend<io::StdinLock<'static>, io::Stdout> {
    /// Creates a backend bound to the process's standard streams.
    pub(crate) fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R, W> TerminalBackend<R, W> {
    /// Creates a backend over arbitrary streams.
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R, W> RenderingBackend for TerminalBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self { input, mut output } = self;
        let Presentation {
            window_title,
            scene,
            ..
        } = presentation;
        let mut scene = scene;

        writeln!(output, "{window_title}").context("failed to write frame")?;
        draw(&mut output, &scene)?;

        for line in input.lines() {
            let line = line.context("failed to read input line")?;
            let frame_input = parse_line(&line);
            let quit_requested = frame_input.quit_requested;

            update_scene(Duration::ZERO, frame_input, &mut scene);
            if quit_requested {
                break;
            }
            draw(&mut output, &scene)?;
        }

        output.flush().context("failed to flush output")
    }
}

fn draw<W: Write>(output: &mut W, scene: &Scene) -> Result<()> {
    for row in render_ascii(scene) {
        writeln!(output, "{row}").context("failed to write frame")?;
    }
    if scene.overlay.visible {
        writeln!(
            output,
            "{} [{}]",
            scene.overlay.message,
            scene.overlay.action.label().to_lowercase()
        )
        .context("failed to write overlay")?;
    }
    output.flush().context("failed to flush output")
}

/// Translates one line of text into the input of a single frame.
pub(crate) fn parse_line(line: &str) -> FrameInput {
    let mut input = FrameInput::default();
    for word in line.split_whitespace() {
        match word.to_ascii_lowercase().as_str() {
            "start" => input.start_requested = true,
            "restart" => input.restart_requested = true,
            "quit" | "exit" => input.quit_requested = true,
            "up" => input.keys.push("ArrowUp".to_owned()),
            "down" => input.keys.push("ArrowDown".to_owned()),
            "left" => input.keys.push("ArrowLeft".to_owned()),
            "right" => input.keys.push("ArrowRight".to_owned()),
            letters if letters.chars().all(|key| "wasd".contains(key)) => {
                input.keys.extend(letters.chars().map(String::from));
            }
            _ => input.keys.push(word.to_owned()),
        }
    }
    input
}

/// Renders the scene's cubes as a top-down character grid, north at the top.
///
/// Each renderable is snapped to the cell containing its centre. The player is
/// drawn last so it stays visible while crossing the gate.
pub(crate) fn render_ascii(scene: &Scene) -> Vec<String> {
    let renderables = scene.renderables();
    if renderables.is_empty() {
        return Vec::new();
    }

    let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
    let (mut min_z, mut max_z) = (f32::INFINITY, f32::NEG_INFINITY);
    for renderable in renderables {
        min_x = min_x.min(renderable.position.x);
        max_x = max_x.max(renderable.position.x);
        min_z = min_z.min(renderable.position.z);
        max_z = max_z.max(renderable.position.z);
    }

    let to_index = |value: f32, min: f32| ((value - min) / CELL_SIZE).round().max(0.0) as usize;
    let columns = to_index(max_x, min_x) + 1;
    let rows = to_index(max_z, min_z) + 1;
    let mut canvas = vec![vec![' '; columns]; rows];

    let mut ordered: Vec<_> = renderables.iter().collect();
    ordered.sort_by_key(|renderable| glyph_priority(renderable.color));
    for renderable in ordered {
        let column = to_index(renderable.position.x, min_x).min(columns - 1);
        let row = to_index(renderable.position.z, min_z).min(rows - 1);
        canvas[row][column] = glyph(renderable.color);
    }

    canvas
        .into_iter()
        .map(|row| row.into_iter().collect())
        .collect()
}

fn glyph(color: Color) -> char {
    if color == palette::WALL {
        '#'
    } else if color == palette::GATE {
        'E'
    } else if color == palette::PLAYER {
        '@'
    } else {
        '?'
    }
}

fn glyph_priority(color: Color) -> u8 {
    if color == palette::PLAYER {
        1
    } else {
        0
    }
}

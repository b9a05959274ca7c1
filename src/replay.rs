//! Pointer scripts for driving the workspace without a window
//!
//! One step per line:
//!
//! ```text
//! # drag the first tab to the right edge and hold it there
//! viewport 1200 800
//! down 20 10
//! move 1190 400
//! wait 60
//! up 1190 400
//! ```
//!
//! Time only moves on `wait`, so debounced indicator updates are delivered
//! deterministically.

use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};

use crate::app::Workspace;
use crate::messages::{Msg, PointerMsg};
use crate::model::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Viewport { width: f32, height: f32 },
    Down(Point),
    Move(Point),
    Up(Point),
    Wait(Duration),
    Leave,
    Cancel,
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or_else(|| anyhow!("empty step"))?;
        let args: Vec<&str> = words.collect();

        let step = match command {
            "viewport" => {
                let [width, height] = numbers(command, &args)?;
                if width <= 0.0 || height <= 0.0 {
                    bail!("viewport must have a positive size");
                }
                Step::Viewport { width, height }
            }
            "down" => Step::Down(point(command, &args)?),
            "move" => Step::Move(point(command, &args)?),
            "up" => Step::Up(point(command, &args)?),
            "wait" => {
                let [ms] = args.as_slice() else {
                    bail!("wait takes one argument (milliseconds)");
                };
                let ms: u64 = ms
                    .parse()
                    .with_context(|| format!("invalid duration '{}'", ms))?;
                Step::Wait(Duration::from_millis(ms))
            }
            "leave" | "cancel" if !args.is_empty() => bail!("{} takes no arguments", command),
            "leave" => Step::Leave,
            "cancel" => Step::Cancel,
            other => bail!("unknown step '{}'", other),
        };
        Ok(step)
    }
}

fn numbers<const N: usize>(command: &str, args: &[&str]) -> Result<[f32; N]> {
    if args.len() != N {
        bail!("{} takes {} arguments, got {}", command, N, args.len());
    }
    let mut out = [0.0f32; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .with_context(|| format!("invalid number '{}'", arg))?;
        if !slot.is_finite() {
            bail!("invalid number '{}'", arg);
        }
    }
    Ok(out)
}

fn point(command: &str, args: &[&str]) -> Result<Point> {
    let [x, y] = numbers(command, args)?;
    Ok(Point::new(x, y))
}

/// Parse a whole script, skipping blank lines and `#` comments
pub fn parse_script(source: &str) -> Result<Vec<Step>> {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            line.parse()
                .with_context(|| format!("line {}: '{}'", number, line))
        })
        .collect()
}

/// Feed steps to the workspace on a virtual clock starting at `start`.
///
/// Returns the clock after the last step.
pub fn run(workspace: &mut Workspace, steps: &[Step], start: Instant) -> Instant {
    let mut now = start;
    for step in steps {
        let msg = match *step {
            Step::Viewport { width, height } => Msg::viewport(width, height),
            Step::Down(pos) => Msg::Pointer(PointerMsg::Down { pos, at: now }),
            Step::Move(pos) => Msg::Pointer(PointerMsg::Move { pos, at: now }),
            Step::Up(pos) => Msg::Pointer(PointerMsg::Up { pos, at: now }),
            Step::Leave => Msg::Pointer(PointerMsg::Leave),
            Step::Cancel => Msg::Pointer(PointerMsg::Cancel),
            Step::Wait(duration) => {
                now += duration;
                workspace.advance_to(now);
                continue;
            }
        };
        tracing::trace!(?step, "replay");
        workspace.dispatch(msg);
    }
    now
}

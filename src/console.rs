//! Line commands read from stdin while a simulation runs.
//!
//! ```text
//! n | next                 next page
//! p | prev                 previous page
//! space                    the play/pause key, from the page body
//! toggle                   the play/pause button
//! key <combo> [in <focus>] any key, e.g. `key ctrl+KeyN` or `key Space in input`
//! resize <w> <h>           document container resized
//! press <x> <y> <window-width> <size> [<flex-basis>]
//! move <x> <y> <size>      divider dragged
//! release <w> <h>          divider let go, new container size
//! q | quit
//! ```

use crate::runtime::{DriverEvent, FocusTarget, KeyInput, Modifiers, SessionHandle};
use anyhow::{Context, Result, anyhow, bail};
use std::io::BufRead;
use std::thread;
use syncdeck_core::NavDirection;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum Command {
    Navigate(NavDirection),
    Key(KeyInput),
    Event(DriverEvent),
}

impl Command {
    /// Forward to the driver. Returns false once the driver is gone or the
    /// command asked it to stop.
    pub fn send(self, handle: &SessionHandle) -> bool {
        match self {
            Command::Navigate(direction) => handle.navigate(direction),
            Command::Key(input) => handle.key(input),
            Command::Event(DriverEvent::Shutdown) => {
                handle.shutdown();
                false
            }
            Command::Event(event) => handle.send(event),
        }
    }
}

/// Parse one line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "n" | "next" => Command::Navigate(NavDirection::Next),
        "p" | "prev" | "previous" => Command::Navigate(NavDirection::Previous),
        "space" => Command::Key(KeyInput::new("Space")),
        "toggle" => Command::Event(DriverEvent::TogglePlayback),
        "key" => Command::Key(parse_key(&rest)?),
        "resize" => Command::Event(DriverEvent::WindowResized {
            container_width: number(&rest, 0, "width")?,
            container_height: number(&rest, 1, "height")?,
        }),
        "press" => Command::Event(DriverEvent::DividerPressed {
            pointer: (number(&rest, 0, "x")?, number(&rest, 1, "y")?),
            window_width: number(&rest, 2, "window width")?,
            container_size: number(&rest, 3, "container size")?,
            video_flex_basis: rest.get(4).copied().unwrap_or("auto").to_string(),
        }),
        "move" => Command::Event(DriverEvent::DividerMoved {
            pointer: (number(&rest, 0, "x")?, number(&rest, 1, "y")?),
            container_size: number(&rest, 2, "container size")?,
        }),
        "release" => Command::Event(DriverEvent::DividerReleased {
            container_width: number(&rest, 0, "width")?,
            container_height: number(&rest, 1, "height")?,
        }),
        "q" | "quit" => Command::Event(DriverEvent::Shutdown),
        other => bail!("Unknown command: {other}"),
    };
    Ok(Some(command))
}

fn number(args: &[&str], index: usize, name: &str) -> Result<f32> {
    let raw = args
        .get(index)
        .ok_or_else(|| anyhow!("Missing {name}"))?;
    let value: f32 = raw
        .parse()
        .with_context(|| format!("Invalid {name}: {raw}"))?;
    if !value.is_finite() {
        bail!("Invalid {name}: {raw}");
    }
    Ok(value)
}

fn parse_key(args: &[&str]) -> Result<KeyInput> {
    let combo = args.first().ok_or_else(|| anyhow!("Missing key"))?;
    let mut modifiers = Modifiers::NONE;
    let mut code = None;
    for token in combo.split('+').filter(|t| !t.is_empty()) {
        match token.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.ctrl = true,
            "alt" | "option" => modifiers.alt = true,
            "shift" => modifiers.shift = true,
            "meta" | "cmd" | "super" => modifiers.meta = true,
            _ => code = Some(token),
        }
    }
    let code = code.ok_or_else(|| anyhow!("Missing key in {combo}"))?;

    let focus = match args.get(1..) {
        None | Some([]) => FocusTarget::Body,
        Some(["in", target]) => match target.to_ascii_lowercase().as_str() {
            "body" => FocusTarget::Body,
            "input" | "text" => FocusTarget::TextInput,
            "other" => FocusTarget::Other,
            other => bail!("Unknown focus target: {other}"),
        },
        Some(extra) => bail!("Unexpected arguments: {}", extra.join(" ")),
    };

    Ok(KeyInput::new(code)
        .with_modifiers(modifiers)
        .with_focus(focus))
}

/// Read commands from stdin on a background thread until EOF or `quit`.
pub fn spawn_stdin_reader(handle: SessionHandle) -> Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!("Failed to read command: {err}");
                        break;
                    }
                };
                match parse_command(&line) {
                    Ok(Some(command)) => {
                        debug!(?command, "Console command");
                        if !command.send(&handle) {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => warn!("{err:#}"),
                }
            }
            info!("Command input closed");
        })
        .context("Failed to start the command reader")
}

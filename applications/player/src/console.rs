//! Console UI
//!
//! Line commands typed on stdin become [`ConsoleInput`] values; session
//! updates are rendered to a writer by [`ConsoleUi`], either as readable
//! text or as one JSON object per line.

use lumen_playback::{Command, PlaybackState, SessionObserver, UiUpdate};
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

/// Usage text printed by `help`
pub const HELP: &str = "\
commands:
  play | pause | stop      transport
  seek N                   jump to N percent (0-100)
  vol N                    set volume (0-100)
  next | prev              step through the playlist
  select N                 load playlist entry N
  fav                      add/remove the current item from favorites
  fs                       toggle fullscreen
  resize W H               report a new window size
  list | favs              show the playlist or favorites
  help | quit";

/// One parsed console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Forward to the playback session
    Session(Command),

    /// Print the playlist
    List,

    /// Print the favorites
    Favorites,

    Help,

    /// End the session
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseInputError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("Invalid number '{value}' for '{command}'")]
    InvalidNumber {
        command: &'static str,
        value: String,
    },

    #[error("Too many arguments for '{0}'")]
    TooManyArguments(&'static str),
}

impl FromStr for ConsoleInput {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseInputError::Empty);
        };

        let input = match verb.to_ascii_lowercase().as_str() {
            "play" => ConsoleInput::Session(Command::Play),
            "pause" => ConsoleInput::Session(Command::Pause),
            "stop" => ConsoleInput::Session(Command::Stop),
            "next" => ConsoleInput::Session(Command::Next),
            "prev" => ConsoleInput::Session(Command::Prev),
            "fav" => ConsoleInput::Session(Command::ToggleFavorite),
            "fs" => ConsoleInput::Session(Command::ToggleFullscreen),
            "seek" => ConsoleInput::Session(Command::Seek(number(&mut words, "seek")?)),
            "vol" => ConsoleInput::Session(Command::Volume(number(&mut words, "vol")?)),
            "select" => ConsoleInput::Session(Command::Select(number(&mut words, "select")?)),
            "resize" => {
                let width = number(&mut words, "resize")?;
                let height = number(&mut words, "resize")?;
                ConsoleInput::Session(Command::Resize { width, height })
            }
            "list" => ConsoleInput::List,
            "favs" => ConsoleInput::Favorites,
            "help" => ConsoleInput::Help,
            "quit" | "exit" => ConsoleInput::Quit,
            other => return Err(ParseInputError::Unknown(other.to_string())),
        };

        if words.next().is_some() {
            return Err(ParseInputError::TooManyArguments(verb_name(&input)));
        }
        Ok(input)
    }
}

fn number<'a, T: FromStr>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<T, ParseInputError> {
    let value = words
        .next()
        .ok_or(ParseInputError::MissingArgument(command))?;
    value.parse().map_err(|_| ParseInputError::InvalidNumber {
        command,
        value: value.to_string(),
    })
}

fn verb_name(input: &ConsoleInput) -> &'static str {
    match input {
        ConsoleInput::Session(command) => match command {
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Stop => "stop",
            Command::Seek(_) => "seek",
            Command::Volume(_) => "vol",
            Command::Next => "next",
            Command::Prev => "prev",
            Command::Select(_) => "select",
            Command::ToggleFavorite => "fav",
            Command::ToggleFullscreen => "fs",
            Command::Resize { .. } => "resize",
        },
        ConsoleInput::List => "list",
        ConsoleInput::Favorites => "favs",
        ConsoleInput::Help => "help",
        ConsoleInput::Quit => "quit",
    }
}

/// How [`ConsoleUi`] renders updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One serialized [`UiUpdate`] per line
    Json,
}

/// Session observer that writes every update as a line
#[derive(Debug)]
pub struct ConsoleUi<W> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> ConsoleUi<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self, update: &UiUpdate) -> Result<String, serde_json::Error> {
        match self.format {
            OutputFormat::Text => Ok(describe(update)),
            OutputFormat::Json => serde_json::to_string(update),
        }
    }
}

impl<W: Write> SessionObserver for ConsoleUi<W> {
    fn publish(&mut self, update: UiUpdate) {
        let line = match self.render(&update) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to serialize {:?}: {}", update, e);
                return;
            }
        };

        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!("Failed to write UI update: {}", e);
        }
    }
}

/// Human-readable rendering of one update
pub fn describe(update: &UiUpdate) -> String {
    match update {
        UiUpdate::StateChanged(state) => format!("state: {}", state_name(*state)),
        UiUpdate::TimeLabel(label) => format!("time: {label}"),
        UiUpdate::SliderValue(value) => format!("position: {value}%"),
        UiUpdate::Title(title) => format!("title: {title}"),
        UiUpdate::Selection(index) => format!("selected: {index}"),
        UiUpdate::FavoriteAdded(name) => format!("favorites +{name}"),
        UiUpdate::FavoriteRemoved(name) => format!("favorites -{name}"),
        UiUpdate::WindowMode {
            fullscreen,
            side_panel_visible,
        } => format!(
            "window: {}, side panel {}",
            if *fullscreen { "fullscreen" } else { "normal" },
            if *side_panel_visible { "shown" } else { "hidden" }
        ),
        UiUpdate::SurfaceGeometry(geometry) => format!(
            "surface: {}x{} at ({}, {})",
            geometry.width, geometry.height, geometry.x, geometry.y
        ),
        UiUpdate::Notice(message) => format!("notice: {message}"),
    }
}

fn state_name(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "idle",
        PlaybackState::Loaded => "loaded",
        PlaybackState::Playing => "playing",
        PlaybackState::Paused => "paused",
        PlaybackState::Stopped => "stopped",
    }
}

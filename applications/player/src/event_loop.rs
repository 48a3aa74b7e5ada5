//! Single-threaded session event loop
//!
//! Multiplexes console input and the position poll on one task, so the
//! session is only ever touched from here. The poll interval lives inside
//! [`run`] and is dropped before the engine is stopped.

use crate::console::{ConsoleInput, ParseInputError, HELP};
use lumen_playback::{MediaBackend, PlaybackSession, SessionObserver};
use std::io::{self, Write};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Drive `session` until `quit` or the input channel closes
///
/// Returns the engine after the session has been shut down. Console write
/// failures are logged and do not end the session.
pub async fn run<B, O, W>(
    mut session: PlaybackSession<B, O>,
    mut input: mpsc::Receiver<String>,
    out: &mut W,
) -> B
where
    B: MediaBackend,
    O: SessionObserver,
    W: Write,
{
    let period = session.poll_period();
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!("Session running, polling every {:?}", period);

    loop {
        tokio::select! {
            line = input.recv() => {
                let Some(line) = line else {
                    tracing::info!("Input closed");
                    break;
                };

                match line.parse::<ConsoleInput>() {
                    Ok(ConsoleInput::Quit) => break,
                    Ok(ConsoleInput::Session(command)) => {
                        tracing::debug!(?command, "Dispatching");
                        session.dispatch(command);
                    }
                    Ok(ConsoleInput::List) => report_write(write_playlist(&session, out)),
                    Ok(ConsoleInput::Favorites) => report_write(write_favorites(&session, out)),
                    Ok(ConsoleInput::Help) => report_write(writeln!(out, "{HELP}")),
                    Err(ParseInputError::Empty) => {}
                    Err(e) => report_write(writeln!(out, "{e}")),
                }
            }
            _ = ticker.tick() => {
                session.on_tick();
            }
        }
    }

    drop(ticker);
    session.shutdown()
}

fn report_write(result: io::Result<()>) {
    if let Err(e) = result {
        tracing::warn!("Failed to write console output: {}", e);
    }
}

fn write_playlist<B, O, W>(session: &PlaybackSession<B, O>, out: &mut W) -> io::Result<()>
where
    B: MediaBackend,
    O: SessionObserver,
    W: Write,
{
    let playlist = session.playlist();
    if playlist.is_empty() {
        writeln!(out, "playlist is empty")?;
        return Ok(());
    }

    for (index, item) in playlist.items().iter().enumerate() {
        let marker = if playlist.current_index() == Some(index) {
            '>'
        } else {
            ' '
        };
        let star = if session.favorites().contains(&item.path) {
            " *"
        } else {
            ""
        };
        writeln!(out, "{marker} [{index}] {}{star}", item.display_name)?;
    }
    Ok(())
}

fn write_favorites<B, O, W>(session: &PlaybackSession<B, O>, out: &mut W) -> io::Result<()>
where
    B: MediaBackend,
    O: SessionObserver,
    W: Write,
{
    if session.favorites().is_empty() {
        writeln!(out, "no favorites yet")?;
        return Ok(());
    }

    for item in session.favorites().iter() {
        writeln!(out, "  {}", item.display_name)?;
    }
    Ok(())
}

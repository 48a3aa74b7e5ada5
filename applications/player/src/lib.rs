//! Lumen Player Library
//!
//! Headless shell around `lumen-playback`: configuration, a software-clock
//! backend, a line-oriented console UI and the single-threaded event loop
//! that drives a playback session.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod console;
pub mod error;
pub mod event_loop;
pub mod simulated;

// Re-export commonly used types for convenience
pub use config::PlayerConfig;
pub use console::{ConsoleInput, ConsoleUi, OutputFormat, ParseInputError};
pub use error::{PlayerError, Result};
pub use event_loop::run;
pub use simulated::SimulatedBackend;

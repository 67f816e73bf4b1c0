//! # Connect Four
//!
//! Rules engine for two-player Connect Four on a 6x7 grid, with a terminal
//! front end built on Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, engine state machine
//! - [`ui`]: Terminal UI projecting engine snapshots
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;

pub use error::{ConfigError, MoveError, ReplayError};
pub use game::{GameOutcome, GameState, Player};

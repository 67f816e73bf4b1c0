//! Core Connect Four rules: board representation, player types, and the game
//! engine state machine (gravity drops, win/draw detection, turn order).

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Position, WinningLine, COLS, ROWS, WIN_LENGTH};
pub use player::Player;
pub use state::{DropResult, GameOutcome, GameState, Move, Snapshot};

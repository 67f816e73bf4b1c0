use serde::Serialize;
use tracing::{debug, info};

use super::board::{Board, Cell, Position, WinningLine, COLS, ROWS};
use super::player::Player;
use crate::error::{MoveError, ReplayError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameOutcome {
    InProgress,
    Winner { player: Player, line: WinningLine },
    Draw,
}

impl GameOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Winner { player, .. } => Some(*player),
            _ => None,
        }
    }

    pub fn winning_line(&self) -> Option<&WinningLine> {
        match self {
            GameOutcome::Winner { line, .. } => Some(line),
            _ => None,
        }
    }
}

/// A placed token. Recorded once and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub position: Position,
    pub player: Player,
}

/// What an accepted drop did: where the token landed, who placed it, and the
/// outcome afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    pub position: Position,
    pub player: Player,
    pub outcome: GameOutcome,
}

/// Owned, read-only projection of a game for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub cells: [[Cell; COLS]; ROWS],
    pub current_player: Player,
    pub outcome: GameOutcome,
    pub last_move: Option<Move>,
    pub move_count: usize,
}

/// The game engine: board, side to move, outcome and move history. All
/// mutation goes through [`GameState::drop_token`] and [`GameState::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: GameOutcome,
    history: Vec<Move>,
}

impl GameState {
    /// Create initial game state
    pub fn new() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::STARTING,
            outcome: GameOutcome::InProgress,
            history: Vec::with_capacity(ROWS * COLS),
        }
    }

    /// Replay `columns` from the initial position.
    pub fn from_moves(columns: &[usize]) -> Result<Self, ReplayError> {
        let mut state = GameState::new();
        for (index, &column) in columns.iter().enumerate() {
            state.drop_token(column).map_err(|source| ReplayError {
                index,
                column,
                source,
            })?;
        }
        Ok(state)
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> &GameOutcome {
        &self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Columns that can still take a token. Empty once the game is over.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Drop the current player's token into `column`.
    ///
    /// On success the token is placed on the lowest empty cell, the move is
    /// recorded, and either the game ends or the turn passes. On error
    /// nothing changes.
    pub fn drop_token(&mut self, column: usize) -> Result<DropResult, MoveError> {
        if self.is_terminal() {
            debug!(column, "drop rejected: game over");
            return Err(MoveError::GameAlreadyOver);
        }

        let player = self.current_player;
        let row = self
            .board
            .drop_piece(column, player.to_cell())
            .inspect_err(|err| debug!(column, %err, "drop rejected"))?;
        let position = Position::new(row, column);
        self.history.push(Move { position, player });
        debug!(row, column, player = player.name(), "token dropped");

        if let Some(line) = self.board.winning_line(position) {
            info!(player = player.name(), len = line.len(), moves = self.history.len(), "game won");
            self.outcome = GameOutcome::Winner { player, line };
        } else if self.board.is_full() {
            info!(moves = self.history.len(), "game drawn");
            self.outcome = GameOutcome::Draw;
        } else {
            self.current_player = player.other();
        }

        Ok(DropResult {
            position,
            player,
            outcome: self.outcome.clone(),
        })
    }

    /// Return to the initial position.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_player = Player::STARTING;
        self.outcome = GameOutcome::InProgress;
        self.history.clear();
        info!("game reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: *self.board.rows(),
            current_player: self.current_player,
            outcome: self.outcome.clone(),
            last_move: self.last_move(),
            move_count: self.history.len(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

use std::fmt;

use serde::Serialize;

use super::player::Player;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
/// Number of aligned tokens needed to win.
pub const WIN_LENGTH: usize = 4;

/// Axis directions checked for a win, in order: horizontal, vertical,
/// diagonal (\) and anti-diagonal (/).
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The player owning this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Zero-based board coordinates. Row 0 is the top, row `ROWS - 1` the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Step `(dr, dc)` away from this position, or `None` past a board edge.
    fn offset(self, dr: isize, dc: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < ROWS && col < COLS).then_some(Position { row, col })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

/// Contiguous, collinear run of one player's tokens, at least `WIN_LENGTH`
/// long. Cells are ordered along the axis; the full run is kept even when it
/// is longer than `WIN_LENGTH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinningLine {
    cells: Vec<Position>,
}

impl WinningLine {
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position, `None` off the board.
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Cell at `pos`, `None` off the board.
    pub fn at(&self, pos: Position) -> Option<Cell> {
        self.get(pos.row, pos.col)
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Row a token dropped into `col` would land on: the lowest empty cell.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Drop a piece in a column, returns the row where it landed.
    /// The board is untouched when the drop is rejected.
    pub(crate) fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.landing_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of non-empty cells.
    pub fn token_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Find a winning line through `pos`, the cell that was just filled.
    /// Walks the four axes out from `pos`; never scans the whole board.
    /// Empty or off-board positions never win.
    pub fn winning_line(&self, pos: Position) -> Option<WinningLine> {
        let cell = self.at(pos).filter(|cell| !cell.is_empty())?;

        for (dr, dc) in DIRECTIONS {
            let forward = self.run_from(pos, dr, dc, cell);
            let backward = self.run_from(pos, -dr, -dc, cell);

            if 1 + forward.len() + backward.len() >= WIN_LENGTH {
                let mut cells: Vec<Position> = forward.into_iter().rev().collect();
                cells.push(pos);
                cells.extend(backward);
                return Some(WinningLine { cells });
            }
        }

        None
    }

    /// Consecutive cells holding `cell`, walking away from `from` (exclusive).
    fn run_from(&self, from: Position, dr: isize, dc: isize, cell: Cell) -> Vec<Position> {
        let mut run = Vec::new();
        let mut next = from.offset(dr, dc);
        while let Some(pos) = next {
            if self.at(pos) != Some(cell) {
                break;
            }
            run.push(pos);
            next = pos.offset(dr, dc);
        }
        run
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let symbol = cell.player().map_or('.', Player::symbol);
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

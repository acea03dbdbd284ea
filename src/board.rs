//! Authoritative game state and rules for Connect 4

use anyhow::{anyhow, Result};
use thiserror::Error;

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::{HEIGHT, WIDTH};

/// One of the two players
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

impl Side {
    /// The other side
    pub fn opponent(self) -> Self {
        match self {
            Side::PlayerOne => Side::PlayerTwo,
            Side::PlayerTwo => Side::PlayerOne,
        }
    }

    /// Parses a one-character side token, `'R'` for player one and
    /// `'B'` for player two
    pub fn from_char(token: char) -> Result<Self, BoardError> {
        match token.to_ascii_uppercase() {
            'R' => Ok(Side::PlayerOne),
            'B' => Ok(Side::PlayerTwo),
            _ => Err(BoardError::InvalidSide(token)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::PlayerOne => write!(f, "Player 1"),
            Side::PlayerTwo => write!(f, "Player 2"),
        }
    }
}

/// One tile of the board grid
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    /// The side occupying this cell, if any
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::PlayerOne => Some(Side::PlayerOne),
            Cell::PlayerTwo => Some(Side::PlayerTwo),
            Cell::Empty => None,
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::PlayerOne => Cell::PlayerOne,
            Side::PlayerTwo => Cell::PlayerTwo,
        }
    }
}

/// Rejected board operations; state is unchanged whenever one of these
/// is returned
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum BoardError {
    #[error("column {0} is out of bounds")]
    InvalidColumn(usize),
    #[error("column {0} is already full")]
    ColumnFull(usize),
    #[error("column {0} is already empty")]
    RetractEmptyColumn(usize),
    #[error("'{0}' is not a valid side")]
    InvalidSide(char),
}

/// The game seen from the controller's side: keep playing, or stop with
/// a result
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameStatus {
    InProgress,
    Won(Side),
    Draw,
}

/// An immutable copy of the grid for read-only consumers
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Snapshot {
    cells: [Cell; WIDTH * HEIGHT],
}

impl Snapshot {
    /// The cell at `column`, `row`, with row 0 at the bottom
    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.cells[column + WIDTH * row]
    }
}

/// The full game state: grid, per-column fill cursors and move counter
///
/// The board is created once per game, mutated in place by every move
/// and search probe, and cleared with [`reset`] on a new game.
///
/// [`reset`]: #method.reset
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [Cell; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
    num_moves: usize,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
            heights: [0; WIDTH],
            num_moves: 0,
        }
    }

    /// Builds a board from a string of 1-indexed columns, sides
    /// alternating from player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut side = Side::PlayerOne;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    board.apply_move(column - 1, side)?;
                    side = side.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Clears the grid back to the starting position
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; WIDTH * HEIGHT];
        self.heights = [0; WIDTH];
        self.num_moves = 0;
    }

    /// The cell at `column`, `row`, with row 0 at the bottom
    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.cells[column + WIDTH * row]
    }

    /// The number of discs placed so far
    pub fn move_count(&self) -> usize {
        self.num_moves
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        self.heights[column] == HEIGHT
    }

    pub fn column_available(&self, column: usize) -> bool {
        !self.is_column_full(column)
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == WIDTH * HEIGHT
    }

    /// Drops a disc for `side` into `column`
    ///
    /// The disc lands on the lowest empty row of the column. Nothing is
    /// mutated if the column is out of range or full.
    pub fn apply_move(&mut self, column: usize, side: Side) -> Result<(), BoardError> {
        if column >= WIDTH {
            return Err(BoardError::InvalidColumn(column));
        }
        if self.heights[column] == HEIGHT {
            return Err(BoardError::ColumnFull(column));
        }

        self.cells[column + WIDTH * self.heights[column]] = Cell::from(side);
        self.heights[column] += 1;
        self.num_moves += 1;
        Ok(())
    }

    /// Removes the most recently placed disc in `column`
    ///
    /// Apply and retract on a column form a strict LIFO pair. Nothing
    /// is mutated if the column is out of range or empty.
    pub fn retract_move(&mut self, column: usize) -> Result<(), BoardError> {
        if column >= WIDTH {
            return Err(BoardError::InvalidColumn(column));
        }
        if self.heights[column] == 0 {
            return Err(BoardError::RetractEmptyColumn(column));
        }

        self.unplace(column);
        Ok(())
    }

    /// Drops a disc and returns a guard that retracts it when dropped
    ///
    /// The search uses this to guarantee the retract on every exit
    /// path, including pruning breaks.
    pub fn place(&mut self, column: usize, side: Side) -> Result<PlacedMove<'_>, BoardError> {
        self.apply_move(column, side)?;
        Ok(PlacedMove {
            board: self,
            column,
        })
    }

    // retract half of an already-validated apply, shared by
    // `retract_move` and the guard
    fn unplace(&mut self, column: usize) {
        debug_assert!(self.heights[column] > 0);
        self.heights[column] -= 1;
        self.cells[column + WIDTH * self.heights[column]] = Cell::Empty;
        self.num_moves -= 1;
    }

    /// The first completed four-in-a-row line found, scanning all
    /// horizontal windows row-major, then vertical, then both diagonal
    /// families
    ///
    /// The scan order is the tie-break when several lines complete at
    /// once; only one winner is ever reported.
    pub fn winner(&self) -> Option<Side> {
        // horizontal
        for row in 0..HEIGHT {
            for column in 0..=WIDTH - 4 {
                if let Some(side) = self.line_owner(column, row, 1, 0) {
                    return Some(side);
                }
            }
        }

        // vertical
        for column in 0..WIDTH {
            for row in 0..=HEIGHT - 4 {
                if let Some(side) = self.line_owner(column, row, 0, 1) {
                    return Some(side);
                }
            }
        }

        // falling diagonal
        for row in 3..HEIGHT {
            for column in 0..=WIDTH - 4 {
                if let Some(side) = self.line_owner(column, row, 1, -1) {
                    return Some(side);
                }
            }
        }

        // rising diagonal
        for row in 0..=HEIGHT - 4 {
            for column in 0..=WIDTH - 4 {
                if let Some(side) = self.line_owner(column, row, 1, 1) {
                    return Some(side);
                }
            }
        }

        None
    }

    // the side holding all four cells of the window starting at
    // `column`, `row` and stepping by `dx`, `dy`
    fn line_owner(&self, column: usize, row: usize, dx: i32, dy: i32) -> Option<Side> {
        let first = self.cell(column, row);
        let side = first.side()?;

        for i in 1..4 {
            let c = (column as i32 + i * dx) as usize;
            let r = (row as i32 + i * dy) as usize;
            if self.cell(c, r) != first {
                return None;
            }
        }
        Some(side)
    }

    /// Win, draw or keep playing; the caller interprets the result
    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(side) => GameStatus::Won(side),
            None if self.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// An immutable copy of the grid for rendering or evaluation
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { cells: self.cells }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A disc placed on loan: retracts itself from the board when dropped
pub struct PlacedMove<'a> {
    board: &'a mut Board,
    column: usize,
}

impl Deref for PlacedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl DerefMut for PlacedMove<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.board
    }
}

impl Drop for PlacedMove<'_> {
    fn drop(&mut self) {
        self.board.unplace(self.column);
    }
}

//! Depth-bounded minimax search for choosing the computer's moves

use anyhow::{anyhow, ensure, Result};

use crate::board::{Board, Cell, Side};
use crate::{HEIGHT, WIDTH};

/// Heuristic value of a 4-cell window indexed by its same-color run
/// length; a window holding both colors scores zero. The length-4 entry
/// is normally shadowed by the terminal win check.
const RUN_SCORES: [i32; 6] = [0, 1, 4, 32, 128, 512];

/// Bonus per disc in the center column
const CENTER_BONUS: i32 = 2;

/// The result of one search: the recommended column, its minimax score
/// and the number of nodes visited finding it
#[derive(Copy, Clone, Debug)]
pub struct SearchOutcome {
    pub column: usize,
    pub score: i32,
    pub nodes_visited: usize,
}

/// A minimax agent with alpha-beta pruning
///
/// The engine holds no game state of its own: it borrows a [`Board`]
/// for the duration of a search and explores the tree by applying and
/// retracting moves in place. Player one maximizes, player two
/// minimizes; a won position scores `i32::MAX` or `i32::MIN` and a
/// position at the search horizon scores via [`evaluate`].
///
/// [`Board`]: ../board/struct.Board.html
/// [`evaluate`]: fn.evaluate.html
pub struct Engine {
    node_count: usize,
}

impl Engine {
    pub fn new() -> Self {
        Self { node_count: 0 }
    }

    /// Picks the best column for `side`, searching `max_depth` plies
    ///
    /// Columns are probed in increasing index order and only a strictly
    /// better score replaces the current pick, so the first column
    /// achieving the best score wins ties. Fails on a full board or a
    /// zero depth.
    pub fn choose_move(
        &mut self,
        board: &mut Board,
        side: Side,
        max_depth: u32,
    ) -> Result<SearchOutcome> {
        ensure!(max_depth > 0, "search depth must be at least 1");
        self.node_count = 0;

        let mut best: Option<(usize, i32)> = None;

        for column in 0..WIDTH {
            if board.is_column_full(column) {
                continue;
            }

            let mut probe = board.place(column, side)?;
            let score =
                self.minimax(&mut probe, max_depth - 1, side.opponent(), i32::MIN, i32::MAX);
            drop(probe);

            let improved = match best {
                None => true,
                Some((_, best_score)) => match side {
                    Side::PlayerOne => score > best_score,
                    Side::PlayerTwo => score < best_score,
                },
            };
            if improved {
                best = Some((column, score));
            }
        }

        let (column, score) = best.ok_or_else(|| anyhow!("no playable column"))?;
        Ok(SearchOutcome {
            column,
            score,
            nodes_visited: self.node_count,
        })
    }

    /// Recursive tree search
    ///
    /// A decided position returns its sentinel immediately, regardless
    /// of remaining depth; the horizon and a full board fall back to
    /// the heuristic. Pruning only cuts nodes visited, never changes
    /// the returned score.
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        side: Side,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.node_count += 1;

        if let Some(winner) = board.winner() {
            return match winner {
                Side::PlayerOne => i32::MAX,
                Side::PlayerTwo => i32::MIN,
            };
        }

        if depth == 0 || board.is_full() {
            return evaluate(board);
        }

        match side {
            Side::PlayerOne => {
                let mut max_score = i32::MIN;
                for column in 0..WIDTH {
                    if board.is_column_full(column) {
                        continue;
                    }
                    // a full column slipping through means the search and
                    // the board have desynchronized
                    let mut probe = board
                        .place(column, side)
                        .expect("playable column rejected by the board");
                    let score = self.minimax(&mut probe, depth - 1, side.opponent(), alpha, beta);
                    drop(probe);

                    max_score = max_score.max(score);
                    alpha = alpha.max(score);
                    if beta <= alpha {
                        break;
                    }
                }
                max_score
            }
            Side::PlayerTwo => {
                let mut min_score = i32::MAX;
                for column in 0..WIDTH {
                    if board.is_column_full(column) {
                        continue;
                    }
                    let mut probe = board
                        .place(column, side)
                        .expect("playable column rejected by the board");
                    let score = self.minimax(&mut probe, depth - 1, side.opponent(), alpha, beta);
                    drop(probe);

                    min_score = min_score.min(score);
                    beta = beta.min(score);
                    if beta <= alpha {
                        break;
                    }
                }
                min_score
            }
        }
    }

    /// The number of minimax nodes visited by the last `choose_move`
    /// (diagnostics only)
    pub fn nodes_visited(&self) -> usize {
        self.node_count
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores a position for the search horizon
///
/// Every 4-cell window in the four line directions contributes its
/// run-length score, positive for player one and negative for player
/// two, plus a small bonus per disc held in the center column. The
/// window enumeration matches [`Board::winner`].
///
/// [`Board::winner`]: ../board/struct.Board.html#method.winner
pub fn evaluate(board: &Board) -> i32 {
    let mut score = 0;

    // horizontal
    for row in 0..HEIGHT {
        for column in 0..=WIDTH - 4 {
            score += window_score(board, column, row, 1, 0);
        }
    }

    // vertical
    for column in 0..WIDTH {
        for row in 0..=HEIGHT - 4 {
            score += window_score(board, column, row, 0, 1);
        }
    }

    // falling diagonal
    for row in 3..HEIGHT {
        for column in 0..=WIDTH - 4 {
            score += window_score(board, column, row, 1, -1);
        }
    }

    // rising diagonal
    for row in 0..=HEIGHT - 4 {
        for column in 0..=WIDTH - 4 {
            score += window_score(board, column, row, 1, 1);
        }
    }

    // center column control
    let center = WIDTH / 2;
    for row in 0..HEIGHT {
        score += match board.cell(center, row) {
            Cell::PlayerOne => CENTER_BONUS,
            Cell::PlayerTwo => -CENTER_BONUS,
            Cell::Empty => 0,
        };
    }

    score
}

// run-length score of the window starting at `column`, `row` and
// stepping by `dx`, `dy`
fn window_score(board: &Board, column: usize, row: usize, dx: i32, dy: i32) -> i32 {
    let mut ones = 0usize;
    let mut twos = 0usize;

    for i in 0..4 {
        let c = (column as i32 + i * dx) as usize;
        let r = (row as i32 + i * dy) as usize;
        match board.cell(c, r) {
            Cell::PlayerOne => ones += 1,
            Cell::PlayerTwo => twos += 1,
            Cell::Empty => {}
        }
    }

    if ones > 0 && twos > 0 {
        // blocked line
        0
    } else if ones > 0 {
        RUN_SCORES[ones]
    } else {
        -RUN_SCORES[twos]
    }
}

//! Game mode and difficulty policy
//!
//! The core never interprets these itself: the controller uses them to
//! decide, per turn, whether to ask the engine for a move and how deep
//! it may search.

use crate::board::Side;

/// Who controls each seat
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameMode {
    HumanHuman,
    HumanComputer,
    ComputerHuman,
    ComputerComputer,
}

impl GameMode {
    /// Whether the engine plays the given side in this mode
    pub fn computer_controls(self, side: Side) -> bool {
        match self {
            GameMode::HumanHuman => false,
            GameMode::HumanComputer => side == Side::PlayerTwo,
            GameMode::ComputerHuman => side == Side::PlayerOne,
            GameMode::ComputerComputer => true,
        }
    }
}

/// Difficulty of the computer opponent
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    /// Search depth for this difficulty
    ///
    /// An explicit table rather than a formula, so extending the scale
    /// stays a deliberate decision per level.
    pub fn max_depth(self) -> u32 {
        match self {
            Difficulty::Beginner => 2,
            Difficulty::Intermediate => 4,
            Difficulty::Advanced => 6,
            Difficulty::Expert => 8,
        }
    }
}

/// A full pre-game selection: seats and search depth
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
}

impl GameConfig {
    pub fn max_depth(&self) -> u32 {
        self.difficulty.max_depth()
    }
}

//! Position evaluation
//!
//! A position is scored from the perspective of a given player. Terminal
//! wins score `WIN_BASE` minus the winner's committed move count, so that
//! faster wins score higher; losses are the symmetric negative. Non-terminal
//! positions fall back to a connectivity heuristic that is disabled by
//! default and, when enabled, is clamped strictly below 1.0 so the search's
//! `|score| >= 1` terminal shortcut can never fire on a heuristic value.

use crate::board::{BoardState, Cell, Player};
use crate::win::is_winner;
use crate::{HEIGHT, WIDTH};

/// Base value of a won position, exceeding any possible move count
pub const WIN_BASE: f64 = (WIDTH * HEIGHT + 1) as f64;

/// Upper bound on the connectivity heuristic's magnitude
const HEURISTIC_CAP: f64 = 0.99;

/// Scores a board for a given player
#[derive(Copy, Clone, Debug)]
pub struct Evaluator {
    /// Contribution of each connected same-player piece found by the
    /// connectivity scan. Zero disables the heuristic entirely.
    pub heuristic_weight: f64,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            heuristic_weight: 0.0,
        }
    }

    /// Scores `board` from `player`'s perspective
    ///
    /// Pure and deterministic for a given board, player and depth.
    pub fn score(&self, board: &BoardState, player: Player, _depth: usize) -> f64 {
        let opponent = player.opponent();
        if is_winner(board, player) {
            WIN_BASE - board.moves_made(player) as f64
        } else if is_winner(board, opponent) {
            -(WIN_BASE - board.moves_made(opponent) as f64)
        } else {
            self.connectivity(board, player)
        }
    }

    /// Counts same-player pieces within 3 cells of each of `player`'s
    /// pieces along the four axial and diagonal directions, stopping at
    /// the first mismatch along each direction
    fn connectivity(&self, board: &BoardState, player: Player) -> f64 {
        if self.heuristic_weight == 0.0 {
            return 0.0;
        }

        let target = Cell::from(player);
        let directions: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

        let mut connected = 0usize;
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                if board.cell(column, row) != target {
                    continue;
                }
                for &(dr, dc) in directions.iter() {
                    for dist in 1..=3isize {
                        let r = row as isize + dr * dist;
                        let c = column as isize + dc * dist;
                        if r >= 0
                            && r < HEIGHT as isize
                            && c >= 0
                            && c < WIDTH as isize
                            && board.cell(c as usize, r as usize) == target
                        {
                            connected += 1;
                        } else {
                            break;
                        }
                    }
                }
            }
        }

        (connected as f64 * self.heuristic_weight).min(HEURISTIC_CAP)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

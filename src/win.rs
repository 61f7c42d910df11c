//! Terminal-state detection: four-in-a-row scans and draw checks
//!
//! These are plain window scans over the whole board. At 42 cells the
//! quadratic cost is irrelevant, so the scans favour being obviously
//! correct over being clever.

use crate::board::{BoardState, Cell, Player};
use crate::{HEIGHT, WIDTH};

/// Returns true iff `player` has four consecutive pieces in any row,
/// column or diagonal
pub fn is_winner(board: &BoardState, player: Player) -> bool {
    let target = Cell::from(player);

    // horizontal
    for row in 0..HEIGHT {
        for column in 0..=WIDTH - 4 {
            if (0..4).all(|k| board.cell(column + k, row) == target) {
                return true;
            }
        }
    }

    // vertical
    for column in 0..WIDTH {
        for row in 0..=HEIGHT - 4 {
            if (0..4).all(|k| board.cell(column, row + k) == target) {
                return true;
            }
        }
    }

    // diagonal, rising to the right
    for column in 0..=WIDTH - 4 {
        for row in 0..=HEIGHT - 4 {
            if (0..4).all(|k| board.cell(column + k, row + k) == target) {
                return true;
            }
        }
    }

    // diagonal, rising to the left
    for column in 3..WIDTH {
        for row in 0..=HEIGHT - 4 {
            if (0..4).all(|k| board.cell(column - k, row + k) == target) {
                return true;
            }
        }
    }

    false
}

/// Returns true iff the board is full and neither player has won
pub fn is_draw(board: &BoardState) -> bool {
    if is_winner(board, Player::One) || is_winner(board, Player::Two) {
        return false;
    }
    board.is_full()
}

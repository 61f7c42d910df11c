//! The mutable board representation with apply/undo semantics

use anyhow::{anyhow, Result};

use crate::{HEIGHT, WIDTH};

/// One side of the game. `One` always moves first from an empty board.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(&self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    fn index(&self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// The game board plus the turn and history state needed to drive both
/// real play and a depth-first search.
///
/// Search mutates the board in place through [`apply`]/[`undo`] pairs and
/// must restore it exactly; committed game moves go through [`commit`],
/// which is the only operation that advances the turn and move counters.
///
/// [`apply`]: BoardState::apply
/// [`undo`]: BoardState::undo
/// [`commit`]: BoardState::commit
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BoardState {
    cells: [Cell; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
    current_player: Player,
    move_history: Vec<usize>,
    move_counter: [usize; 2],
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
            heights: [0; WIDTH],
            current_player: Player::One,
            move_history: Vec::new(),
            move_counter: [0; 2],
        }
    }

    /// Replays a move string onto a fresh board, each character a 1-based
    /// column digit, players alternating starting with player one.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => board.commit(column - 1)?,
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Drops `player`'s piece into the lowest empty row of `column` without
    /// advancing the turn or the move counters. This is the search-time
    /// placement; every call must eventually be reversed by [`undo`].
    ///
    /// [`undo`]: BoardState::undo
    pub fn apply(&mut self, column: usize, player: Player) -> Result<()> {
        if column >= WIDTH {
            return Err(anyhow!("invalid move: column {} out of range", column));
        }
        if self.heights[column] == HEIGHT {
            return Err(anyhow!("invalid move: column {} is full", column));
        }

        self.cells[column + WIDTH * self.heights[column]] = player.into();
        self.heights[column] += 1;
        self.move_history.push(column);
        Ok(())
    }

    /// Removes the topmost piece of `column` and pops the move history.
    ///
    /// The caller must pass the column of the most recently applied move;
    /// the search keeps this LIFO discipline by bracketing every recursion
    /// with a matching apply/undo pair.
    pub fn undo(&mut self, column: usize) -> Result<()> {
        match self.move_history.last() {
            None => Err(anyhow!("no moves to undo")),
            Some(&last) => {
                debug_assert_eq!(last, column);
                self.move_history.pop();
                self.heights[column] -= 1;
                self.cells[column + WIDTH * self.heights[column]] = Cell::Empty;
                Ok(())
            }
        }
    }

    /// Plays a real game move: as [`apply`] for the current player, then
    /// counts the move and passes the turn to the opponent.
    ///
    /// [`apply`]: BoardState::apply
    pub fn commit(&mut self, column: usize) -> Result<()> {
        let player = self.current_player;
        self.apply(column, player)?;
        self.move_counter[player.index()] += 1;
        self.current_player = player.opponent();
        Ok(())
    }

    /// Columns with at least one empty cell, in ascending order
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&c| self.heights[c] < HEIGHT).collect()
    }

    pub fn is_valid(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h == HEIGHT)
    }

    /// Clears the board, the history and the counters, with player one to move
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The cell at `column`, `row`, with row 0 at the bottom
    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.cells[column + WIDTH * row]
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The number of committed moves made by `player`
    pub fn moves_made(&self, player: Player) -> usize {
        self.move_counter[player.index()]
    }

    pub fn num_moves(&self) -> usize {
        self.move_history.len()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

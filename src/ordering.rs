//! History-heuristic move ordering
//!
//! Each iterative-deepening pass records the score observed for every root
//! move at every depth. The next pass sorts candidate moves by the scores
//! recorded one depth shallower, so likely-best moves are searched first
//! and alpha-beta cutoffs land earlier. Ordering never changes which move
//! is chosen, only how much of the tree gets pruned.

use std::collections::HashMap;

/// Per-depth table of the scores last observed for each column
#[derive(Clone, Debug, Default)]
pub struct MoveOrderer {
    scores: HashMap<usize, HashMap<usize, f64>>,
}

impl MoveOrderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts `moves` descending by the scores recorded at `depth - 1`,
    /// defaulting unseen columns to 0. Without a table for `depth - 1` the
    /// moves come back unchanged, in natural left-to-right order.
    pub fn order(&self, mut moves: Vec<usize>, depth: usize) -> Vec<usize> {
        if let Some(previous) = depth.checked_sub(1).and_then(|d| self.scores.get(&d)) {
            let score_of = |column: &usize| previous.get(column).copied().unwrap_or(0.0);
            // stable sort keeps the ascending column order between equal scores
            moves.sort_by(|a, b| score_of(b).total_cmp(&score_of(a)));
        }
        moves
    }

    /// Records the score observed for `column` at `depth`, overwriting any
    /// value from an earlier pass
    pub fn record(&mut self, depth: usize, column: usize, score: f64) {
        self.scores.entry(depth).or_default().insert(column, score);
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }
}

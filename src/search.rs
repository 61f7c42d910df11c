//! Depth-limited minimax search with alpha-beta pruning, move ordering and
//! iterative deepening under a wall-clock time budget
//!
//! The game tree is never materialised: search state is the recursion stack
//! plus a single [`BoardState`] that is mutated in place and restored by a
//! matching undo on every exit path, including pruning breaks. The board's
//! `current_player` is only advanced by committed moves, so throughout a
//! search it stays the player the engine is choosing a move for; maximizing
//! plies apply that player's piece and minimizing plies the opponent's.

use anyhow::{anyhow, Result};

use std::time::{Duration, Instant};

use crate::board::{BoardState, Player};
use crate::eval::Evaluator;
use crate::ordering::MoveOrderer;
use crate::win::{is_draw, is_winner};

/// Node counters owned by a single engine, so concurrent engines (for
/// example parallel benchmark runs) never interfere with each other.
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    /// Nodes visited by the pruning search
    pub nodes_searched: usize,
    /// Branches cut off by an alpha-beta bound
    pub nodes_pruned: usize,
    /// Nodes visited by the unpruned reference search
    pub full_search_nodes: usize,
    /// Deepest fully completed iterative-deepening depth
    pub reached_depth: usize,
}

impl SearchStats {
    /// Fraction of nodes the pruning search visited compared to the
    /// unpruned reference search, if both have run
    pub fn pruning_ratio(&self) -> Option<f64> {
        if self.full_search_nodes == 0 {
            None
        } else {
            Some(self.nodes_searched as f64 / self.full_search_nodes as f64)
        }
    }

    /// Cutoffs per node visited by the pruning search
    pub fn cutoff_ratio(&self) -> Option<f64> {
        if self.nodes_searched == 0 {
            None
        } else {
            Some(self.nodes_pruned as f64 / self.nodes_searched as f64)
        }
    }
}

/// An agent that chooses Connect 4 moves by game tree search
///
/// # Position Scoring
/// Positions are scored from the perspective of the player to move when the
/// search started (see [`Evaluator`]): a forced win scores `WIN_BASE` minus
/// the winner's committed move count, a forced loss the symmetric negative,
/// and anything undecided within the search horizon stays in `(-1, 1)`.
pub struct SearchEngine {
    calculation_depth: usize,
    time_limit: Duration,
    evaluator: Evaluator,
    orderer: MoveOrderer,

    /// Diagnostics for the most recent searches (see [`SearchStats`])
    pub stats: SearchStats,
}

impl SearchEngine {
    /// Creates an engine searching at most `calculation_depth` plies ahead,
    /// with iterative deepening stopping once `time_limit` has elapsed
    pub fn new(calculation_depth: usize, time_limit: Duration) -> Self {
        Self {
            calculation_depth: calculation_depth.max(1),
            time_limit,
            evaluator: Evaluator::new(),
            orderer: MoveOrderer::new(),
            stats: SearchStats::default(),
        }
    }

    /// Replaces the default evaluator, e.g. to enable the connectivity
    /// heuristic
    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Chooses a column for the current player of `board`, returning the
    /// move and its score
    ///
    /// With `iterative` set, the pruning search runs at increasing depth up
    /// to the calculation depth, checking the elapsed wall-clock time after
    /// each completed depth and falling back to the last fully completed
    /// depth's result once the budget is exceeded. Without it, a single
    /// pruning (or, with `pruning` unset, unpruned reference) search runs at
    /// the full calculation depth.
    ///
    /// The board is mutated during the search and restored exactly before
    /// returning.
    pub fn choose_move(
        &mut self,
        board: &mut BoardState,
        pruning: bool,
        iterative: bool,
    ) -> Result<(usize, f64)> {
        self.orderer.clear();
        self.stats.nodes_searched = 0;
        self.stats.nodes_pruned = 0;

        if iterative {
            let start_time = Instant::now();

            let mut best = None;
            for depth in 1..=self.calculation_depth {
                best = Some(self.search_with_pruning(board, depth)?);
                self.stats.reached_depth = depth;

                // cancellation is whole-depth only: a completed depth is
                // adopted, a depth never starts after the deadline
                if start_time.elapsed() > self.time_limit {
                    break;
                }
            }
            best.ok_or_else(|| anyhow!("no move chosen"))
        } else if pruning {
            self.search_with_pruning(board, self.calculation_depth)
        } else {
            self.full_search(board)
        }
    }

    /// One pruning search pass: searches every depth from 1 up to
    /// `max_depth`, recording root move scores in the ordering table at each
    /// depth, and returns the best move of the final depth
    fn search_with_pruning(
        &mut self,
        board: &mut BoardState,
        max_depth: usize,
    ) -> Result<(usize, f64)> {
        if board.valid_moves().is_empty() {
            return Err(anyhow!("no valid moves to search"));
        }
        let mover = board.current_player();

        let mut best = None;
        for depth in 1..=max_depth {
            let mut best_score = f64::NEG_INFINITY;
            let mut best_move = None;

            for column in self.orderer.order(board.valid_moves(), depth) {
                board.apply(column, mover)?;
                let score =
                    self.minimax(board, depth - 1, f64::NEG_INFINITY, f64::INFINITY, false)?;
                board.undo(column)?;

                self.orderer.record(depth, column, score);
                // strictly greater, so ties go to the first move in
                // traversal order
                if score > best_score {
                    best_score = score;
                    best_move = Some(column);
                }
            }

            best = best_move.map(|column| (column, best_score));
        }
        best.ok_or_else(|| anyhow!("no move chosen"))
    }

    /// Evaluates every valid move once with the unpruned reference search;
    /// used for benchmarking pruning efficiency, not for fast play
    fn full_search(&mut self, board: &mut BoardState) -> Result<(usize, f64)> {
        let mover = board.current_player();

        let mut best_score = f64::NEG_INFINITY;
        let mut best_move = None;
        for column in board.valid_moves() {
            board.apply(column, mover)?;
            let score = self.minimax_without_pruning(board, self.calculation_depth - 1, false)?;
            board.undo(column)?;

            if score > best_score {
                best_score = score;
                best_move = Some(column);
            }
        }
        best_move
            .map(|column| (column, best_score))
            .ok_or_else(|| anyhow!("no valid moves to search"))
    }

    /// Fail-hard alpha-beta minimax
    ///
    /// Returns the position's score from the perspective of the board's
    /// current player. The recursion stops at depth 0, at any won or drawn
    /// board, and as soon as the evaluator reports a decisive score
    /// (`|score| >= 1`), which only terminal-win scoring can produce.
    pub fn minimax(
        &mut self,
        board: &mut BoardState,
        depth: usize,
        alpha: f64,
        beta: f64,
        maximizing: bool,
    ) -> Result<f64> {
        self.stats.nodes_searched += 1;

        let leaf_score = self.evaluator.score(board, board.current_player(), depth);
        if depth == 0
            || is_winner(board, Player::One)
            || is_winner(board, Player::Two)
            || is_draw(board)
            || leaf_score.abs() >= 1.0
        {
            return Ok(leaf_score);
        }

        // current_player never changes inside a search, so it is the
        // maximizing side's piece
        let mover = if maximizing {
            board.current_player()
        } else {
            board.current_player().opponent()
        };

        let moves = self.orderer.order(board.valid_moves(), depth);
        if maximizing {
            let mut alpha = alpha;
            let mut max_score = f64::NEG_INFINITY;
            for column in moves {
                board.apply(column, mover)?;
                let score = self.minimax(board, depth - 1, alpha, beta, false)?;
                board.undo(column)?;

                max_score = max_score.max(score);
                alpha = alpha.max(max_score);
                if alpha >= beta {
                    self.stats.nodes_pruned += 1;
                    break;
                }
            }
            Ok(max_score)
        } else {
            let mut beta = beta;
            let mut min_score = f64::INFINITY;
            for column in moves {
                board.apply(column, mover)?;
                let score = self.minimax(board, depth - 1, alpha, beta, true)?;
                board.undo(column)?;

                min_score = min_score.min(score);
                beta = beta.min(min_score);
                if beta <= alpha {
                    self.stats.nodes_pruned += 1;
                    break;
                }
            }
            Ok(min_score)
        }
    }

    /// Reference search without alpha-beta: the same terminal test and
    /// recursion as [`minimax`], always exploring every valid move
    ///
    /// For any board and depth this returns the same score as [`minimax`]
    /// with an infinite window; pruning changes node counts, never values.
    ///
    /// [`minimax`]: SearchEngine::minimax
    pub fn minimax_without_pruning(
        &mut self,
        board: &mut BoardState,
        depth: usize,
        maximizing: bool,
    ) -> Result<f64> {
        self.stats.full_search_nodes += 1;

        let leaf_score = self.evaluator.score(board, board.current_player(), depth);
        if depth == 0
            || is_winner(board, Player::One)
            || is_winner(board, Player::Two)
            || is_draw(board)
            || leaf_score.abs() >= 1.0
        {
            return Ok(leaf_score);
        }

        let mover = if maximizing {
            board.current_player()
        } else {
            board.current_player().opponent()
        };

        if maximizing {
            let mut max_score = f64::NEG_INFINITY;
            for column in board.valid_moves() {
                board.apply(column, mover)?;
                max_score = max_score.max(self.minimax_without_pruning(board, depth - 1, false)?);
                board.undo(column)?;
            }
            Ok(max_score)
        } else {
            let mut min_score = f64::INFINITY;
            for column in board.valid_moves() {
                board.apply(column, mover)?;
                min_score = min_score.min(self.minimax_without_pruning(board, depth - 1, true)?);
                board.undo(column)?;
            }
            Ok(min_score)
        }
    }
}

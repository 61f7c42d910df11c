#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use std::time::Duration;

    use crate::benchmark::read_benchmarks;
    use crate::board::{BoardState, Player};
    use crate::eval::{Evaluator, WIN_BASE};
    use crate::ordering::MoveOrderer;
    use crate::search::SearchEngine;
    use crate::win::{is_draw, is_winner};
    use crate::{HEIGHT, WIDTH};

    /// A full board with no four-in-a-row anywhere: rows follow the pattern
    /// 1-1-2-2-1-1 from the bottom, flipped in every other column
    fn drawn_board() -> Result<BoardState> {
        let mut board = BoardState::new();
        let base = [
            Player::One,
            Player::One,
            Player::Two,
            Player::Two,
            Player::One,
            Player::One,
        ];
        for column in 0..WIDTH {
            for row in 0..HEIGHT {
                let player = if column % 2 == 0 {
                    base[row]
                } else {
                    base[row].opponent()
                };
                board.apply(column, player)?;
            }
        }
        Ok(board)
    }

    #[test]
    pub fn apply_undo_round_trip() -> Result<()> {
        let mut board = BoardState::from_moves("4425")?;
        let snapshot = board.clone();

        for &column in [0, 3, 6, 3].iter() {
            board.apply(column, Player::One)?;
            board.undo(column)?;
            assert_eq!(board, snapshot);
        }

        // nested pairs restore in LIFO order
        board.apply(2, Player::One)?;
        board.apply(2, Player::Two)?;
        board.undo(2)?;
        board.undo(2)?;
        assert_eq!(board, snapshot);
        Ok(())
    }

    #[test]
    pub fn undo_with_no_history_fails() {
        let mut board = BoardState::new();
        assert!(board.undo(0).is_err());
    }

    #[test]
    pub fn commit_advances_turn_and_counters() -> Result<()> {
        let board = BoardState::from_moves("444")?;

        assert_eq!(board.current_player(), Player::Two);
        assert_eq!(board.moves_made(Player::One), 2);
        assert_eq!(board.moves_made(Player::Two), 1);
        assert_eq!(board.num_moves(), 3);
        Ok(())
    }

    #[test]
    pub fn malformed_move_strings_fail() {
        assert!(BoardState::from_moves("4x").is_err());
        assert!(BoardState::from_moves("408").is_err());
        // seventh piece into a six-high column
        assert!(BoardState::from_moves("4444444").is_err());
    }

    #[test]
    pub fn full_column_is_rejected() -> Result<()> {
        let mut board = BoardState::from_moves("444444")?;
        let snapshot = board.clone();

        assert!(!board.is_valid(3));
        assert!(board.apply(3, Player::One).is_err());
        assert!(board.commit(3).is_err());
        assert_eq!(board, snapshot);

        assert_eq!(board.valid_moves(), vec![0, 1, 2, 4, 5, 6]);
        Ok(())
    }

    #[test]
    pub fn vertical_win_is_detected() -> Result<()> {
        let mut board = BoardState::new();
        for _ in 0..4 {
            board.apply(0, Player::One)?;
        }

        assert!(is_winner(&board, Player::One));
        assert!(!is_winner(&board, Player::Two));
        Ok(())
    }

    #[test]
    pub fn horizontal_win_is_detected() -> Result<()> {
        let mut board = BoardState::new();
        for column in 0..4 {
            board.apply(column, Player::One)?;
        }

        assert!(is_winner(&board, Player::One));
        assert!(!is_winner(&board, Player::Two));
        Ok(())
    }

    #[test]
    pub fn diagonal_win_is_detected() -> Result<()> {
        // rising staircase for player one with two filler pieces per step
        let mut board = BoardState::new();
        for (column, height) in (0..4).zip(1..=4usize) {
            for _ in 0..height - 1 {
                board.apply(column, Player::Two)?;
            }
            board.apply(column, Player::One)?;
        }

        assert!(is_winner(&board, Player::One));
        assert!(!is_winner(&board, Player::Two));
        Ok(())
    }

    #[test]
    pub fn draw_means_full_and_winnerless() -> Result<()> {
        let board = drawn_board()?;

        assert!(board.is_full());
        assert!(!is_winner(&board, Player::One));
        assert!(!is_winner(&board, Player::Two));
        assert!(is_draw(&board));
        assert!(board.valid_moves().is_empty());
        Ok(())
    }

    #[test]
    pub fn evaluator_is_deterministic() -> Result<()> {
        let board = BoardState::from_moves("44512")?;
        let evaluator = Evaluator::new();

        let first = evaluator.score(&board, Player::One, 3);
        for _ in 0..5 {
            assert_eq!(evaluator.score(&board, Player::One, 3), first);
        }
        Ok(())
    }

    #[test]
    pub fn terminal_scores_are_symmetric() -> Result<()> {
        let board = BoardState::from_moves("1212121")?;
        assert!(is_winner(&board, Player::One));

        let evaluator = Evaluator::new();
        let won = evaluator.score(&board, Player::One, 0);
        let lost = evaluator.score(&board, Player::Two, 0);

        assert_eq!(won, WIN_BASE - board.moves_made(Player::One) as f64);
        assert_eq!(lost, -won);
        Ok(())
    }

    #[test]
    pub fn heuristic_stays_below_one() -> Result<()> {
        let board = BoardState::from_moves("1324")?;
        let evaluator = Evaluator {
            heuristic_weight: 0.1,
        };

        let score = evaluator.score(&board, Player::One, 2);
        assert!(score > 0.0);
        assert!(score < 1.0);

        // a heuristic leaf value must never trip the decisive-score cutoff
        let mut board = board;
        let mut engine = SearchEngine::new(1, Duration::from_secs(8)).with_evaluator(evaluator);
        let leaf = engine.minimax(&mut board, 0, f64::NEG_INFINITY, f64::INFINITY, true)?;
        assert_eq!(leaf, score);
        Ok(())
    }

    #[test]
    pub fn ordering_uses_previous_pass_scores() {
        let mut orderer = MoveOrderer::new();
        orderer.record(1, 2, 5.0);
        orderer.record(1, 5, 3.0);
        orderer.record(1, 6, -1.0);

        // scored columns first, unseen columns keep their relative order at 0
        assert_eq!(
            orderer.order((0..WIDTH).collect(), 2),
            vec![2, 5, 0, 1, 3, 4, 6]
        );

        // no table one depth down: natural order
        let natural: Vec<usize> = (0..WIDTH).collect();
        assert_eq!(orderer.order(natural.clone(), 1), natural);
    }

    #[test]
    pub fn immediate_win_found_at_depth_one() -> Result<()> {
        // player one has three in a row with both ends open
        let mut board = BoardState::from_moves("223344")?;
        let snapshot = board.clone();

        let mut engine = SearchEngine::new(1, Duration::from_secs(8));
        let (best_move, score) = engine.choose_move(&mut board, true, true)?;

        assert!(best_move == 0 || best_move == 4);
        assert!(score >= WIN_BASE - board.moves_made(Player::One) as f64 - 1.0);
        assert_eq!(board, snapshot);
        Ok(())
    }

    #[test]
    pub fn pruning_never_changes_the_score() -> Result<()> {
        let positions = ["", "444", "123", "223344", "4455", "111222"];

        for moves in positions.iter() {
            let mut board = BoardState::from_moves(moves)?;
            let mut engine = SearchEngine::new(4, Duration::from_secs(8));

            for depth in 1..=4 {
                let pruned = engine.minimax(
                    &mut board,
                    depth,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                    true,
                )?;
                let full = engine.minimax_without_pruning(&mut board, depth, true)?;
                assert_eq!(
                    pruned, full,
                    "search disagreement for '{}' at depth {}",
                    moves, depth
                );
            }
        }
        Ok(())
    }

    #[test]
    pub fn search_restores_the_board() -> Result<()> {
        let mut board = BoardState::from_moves("4455123")?;
        let snapshot = board.clone();

        let mut engine = SearchEngine::new(4, Duration::from_secs(8));
        engine.choose_move(&mut board, true, true)?;
        assert_eq!(board, snapshot);

        engine.choose_move(&mut board, true, false)?;
        assert_eq!(board, snapshot);

        engine.choose_move(&mut board, false, false)?;
        assert_eq!(board, snapshot);
        Ok(())
    }

    #[test]
    pub fn zero_time_budget_keeps_depth_one_result() -> Result<()> {
        let mut board = BoardState::from_moves("223344")?;

        let mut engine = SearchEngine::new(6, Duration::from_secs(0));
        let (best_move, score) = engine.choose_move(&mut board, true, true)?;

        // deepening stops after the first completed depth
        assert_eq!(engine.stats.reached_depth, 1);
        assert_eq!(best_move, 0);
        assert_eq!(score, WIN_BASE - 3.0);
        Ok(())
    }

    #[test]
    pub fn pruning_reduces_node_count() -> Result<()> {
        let mut board = BoardState::from_moves("444")?;
        let mut engine = SearchEngine::new(4, Duration::from_secs(8));

        let (without, full_score) = engine.choose_move(&mut board, false, false)?;
        let (with_pruning, pruned_score) = engine.choose_move(&mut board, true, false)?;

        assert_eq!(with_pruning, without);
        assert_eq!(pruned_score, full_score);
        assert!(engine.stats.nodes_searched < engine.stats.full_search_nodes);
        assert!(engine.stats.pruning_ratio().unwrap() < 1.0);
        Ok(())
    }

    #[test]
    pub fn benchmark_fixture_replay() -> Result<()> {
        let cases = read_benchmarks("test_data/quiet_positions")?;
        assert!(cases.iter().any(|c| c.moves == "444" && c.expected == 0));

        for case in cases {
            let mut board = BoardState::from_moves(&case.moves)?;
            let mut engine = SearchEngine::new(3, Duration::from_secs(8));
            let (_best_move, score) = engine.choose_move(&mut board, true, true)?;

            assert_eq!(
                score, case.expected as f64,
                "for moves {}, expected {}, got {}",
                case.moves, case.expected, score
            );
            board.reset();
            assert_eq!(board, BoardState::new());
        }
        Ok(())
    }

    #[test]
    pub fn reset_clears_everything() -> Result<()> {
        let mut board = BoardState::from_moves("443322")?;
        board.reset();

        assert_eq!(board, BoardState::new());
        assert_eq!(board.current_player(), Player::One);
        assert_eq!(board.moves_made(Player::One), 0);
        assert_eq!(board.num_moves(), 0);
        assert_eq!(board.valid_moves().len(), WIDTH);
        assert!((0..WIDTH).all(|c| (0..HEIGHT).all(|r| board.cell(c, r).is_empty())));
        Ok(())
    }
}

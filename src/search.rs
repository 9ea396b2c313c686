use std::str::FromStr;

use crate::board::GameBoard;
use crate::cell::Cell;
use crate::errors::GameError;
use crate::player::Player;

/// The two interchangeable search algorithms. Alpha-beta visits fewer nodes
/// but returns the identical move and score for every position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
}

impl FromStr for Algorithm {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alphabeta" | "alpha-beta" => Ok(Algorithm::AlphaBeta),
            _ => Err(GameError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Best discovered move and its score. `cell` is `None` when the search had
/// nothing to decide: the board was already terminal, or `depth` was zero
/// and only a heuristic estimate was produced. Callers must check the game
/// state before trusting the coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub cell: Option<Cell>,
    pub score: i64,
}

/// Depth-bounded adversarial search for the best move `player` can make.
///
/// Plies where `Player::One` moves maximize the score, `Player::Two` plies
/// minimize it; scores are absolute (positive favors `One`). Each candidate
/// scores as `empty cells remaining after the move * child score`. The
/// factor is the same for every candidate of one node, so within-node
/// ordering is unaffected; across plies the factors compound, weighting
/// decided lines by how much of the board was still open along the way.
///
/// The board is mutated and restored in place through the strict
/// `make_move`/`undo_last_move` pairing; on return the board is exactly as
/// it was passed in. Ties break to the first candidate in `empty_cells`
/// order, for both algorithms.
#[cfg_attr(feature = "hotpath", hotpath::measure)]
pub fn search(
    board: &mut GameBoard,
    algorithm: Algorithm,
    depth: u32,
    player: Player,
) -> SearchResult {
    if depth == 0 || board.status().is_over() {
        return SearchResult {
            cell: None,
            score: i64::from(board.heuristic()),
        };
    }

    let empties = board.empty_cells();
    let scale = empties.len() as i64 - 1;
    let maximizing = player == Player::One;

    let mut best_cell = None;
    let mut best_score = 0;
    let mut alpha = i64::MIN;
    let mut beta = i64::MAX;

    for cell in empties {
        board.make_move(cell, player.index());
        let child = match algorithm {
            Algorithm::Minimax => minimax_value(board, depth - 1, player.opposite()),
            Algorithm::AlphaBeta => alpha_beta_value(
                board,
                depth - 1,
                player.opposite(),
                child_lower_bound(alpha, scale),
                child_upper_bound(beta, scale),
            ),
        };
        board.undo_last_move();

        let score = scale * child;
        let improved = match best_cell {
            None => true,
            Some(_) if maximizing => score > best_score,
            Some(_) => score < best_score,
        };
        if improved {
            best_score = score;
            best_cell = Some(cell);
        }

        // The root window never prunes (one bound stays unbounded), but the
        // tightened side speeds up child cutoffs.
        if maximizing {
            alpha = alpha.max(best_score);
        } else {
            beta = beta.min(best_score);
        }
    }

    SearchResult {
        cell: best_cell,
        score: best_score,
    }
}

// Plain minimax ply value. Terminal or depth-exhausted positions evaluate to
// the heuristic; otherwise the extremal scaled candidate score.
fn minimax_value(board: &mut GameBoard, depth: u32, to_move: Player) -> i64 {
    if depth == 0 || board.status().is_over() {
        return i64::from(board.heuristic());
    }

    let empties = board.empty_cells();
    let scale = empties.len() as i64 - 1;
    let maximizing = to_move == Player::One;
    let mut best = if maximizing { i64::MIN } else { i64::MAX };

    for cell in empties {
        board.make_move(cell, to_move.index());
        let child = minimax_value(board, depth - 1, to_move.opposite());
        board.undo_last_move();

        let score = scale * child;
        if maximizing {
            best = best.max(score);
        } else {
            best = best.min(score);
        }
    }
    best
}

// Alpha-beta ply value. Identical result to `minimax_value`; the bounds only
// decide which branches get visited.
fn alpha_beta_value(
    board: &mut GameBoard,
    depth: u32,
    to_move: Player,
    mut alpha: i64,
    mut beta: i64,
) -> i64 {
    if depth == 0 || board.status().is_over() {
        return i64::from(board.heuristic());
    }

    let empties = board.empty_cells();
    let scale = empties.len() as i64 - 1;
    let maximizing = to_move == Player::One;
    let mut best = if maximizing { i64::MIN } else { i64::MAX };

    for cell in empties {
        board.make_move(cell, to_move.index());
        let child = alpha_beta_value(
            board,
            depth - 1,
            to_move.opposite(),
            child_lower_bound(alpha, scale),
            child_upper_bound(beta, scale),
        );
        board.undo_last_move();

        let score = scale * child;
        if maximizing {
            best = best.max(score);
            if best > beta {
                break;
            }
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            if best < alpha {
                break;
            }
            beta = beta.min(best);
        }
    }
    best
}

// Candidate scores at a node are the child values times the node's constant
// scale factor, so bounds cross the recursion boundary divided by that
// factor. Rounding is outward (floor below, ceil above): a wider child
// window can only visit more nodes, never change a value.

fn child_lower_bound(alpha: i64, scale: i64) -> i64 {
    if alpha == i64::MIN || scale == 0 {
        i64::MIN
    } else {
        alpha.div_euclid(scale)
    }
}

fn child_upper_bound(beta: i64, scale: i64) -> i64 {
    if beta == i64::MAX || scale == 0 {
        i64::MAX
    } else {
        -(-beta).div_euclid(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::GameKind;
    use crate::outcome::BoardStatus;
    use rand::prelude::IndexedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALGORITHMS: [Algorithm; 2] = [Algorithm::Minimax, Algorithm::AlphaBeta];

    #[test]
    fn test_terminal_board_returns_no_cell() {
        let mut board = GameKind::TicTacToe.board();
        for x in 0..3 {
            board.make_move(Cell::new(x, 0), 0);
        }
        assert_eq!(board.status(), BoardStatus::Win(0));

        for algorithm in ALGORITHMS {
            let result = search(&mut board, algorithm, 5, Player::Two);
            assert_eq!(result.cell, None);
            assert_eq!(result.score, 1);
        }
    }

    #[test]
    fn test_depth_zero_returns_heuristic_estimate() {
        let mut board = GameKind::TicTacToe.board();
        board.make_move(Cell::new(0, 0), 0);

        for algorithm in ALGORITHMS {
            let result = search(&mut board, algorithm, 0, Player::Two);
            assert_eq!(result.cell, None);
            assert_eq!(result.score, 0);
        }
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut board = GameKind::TicTacToe.board();
        board.make_move(Cell::new(1, 1), 0);
        let before = board.empty_cells();

        search(&mut board, Algorithm::AlphaBeta, 6, Player::Two);
        assert_eq!(board.empty_cells(), before);
        assert_eq!(board.move_count(), 1);
    }

    #[test]
    fn test_takes_immediate_win() {
        // X X .      X completes the top row.
        // O O .
        // . . .
        let mut board = GameKind::TicTacToe.board();
        board.make_move(Cell::new(0, 0), 0);
        board.make_move(Cell::new(1, 0), 0);
        board.make_move(Cell::new(0, 1), 1);
        board.make_move(Cell::new(1, 1), 1);

        for algorithm in ALGORITHMS {
            let result = search(&mut board, algorithm, 4, Player::One);
            assert_eq!(result.cell, Some(Cell::new(2, 0)), "{:?}", algorithm);
            assert!(result.score > 0);
        }
    }

    #[test]
    fn test_blocks_opponent_threat() {
        // X X .      O to move must block at (2, 0).
        // . O .
        // . . .
        let mut board = GameKind::TicTacToe.board();
        board.make_move(Cell::new(0, 0), 0);
        board.make_move(Cell::new(1, 0), 0);
        board.make_move(Cell::new(1, 1), 1);

        for algorithm in ALGORITHMS {
            let result = search(&mut board, algorithm, 4, Player::Two);
            assert_eq!(result.cell, Some(Cell::new(2, 0)), "{:?}", algorithm);
        }
    }

    #[test]
    fn test_scaled_scores_compound_with_depth() {
        // X . .      X to move, 4 empties. Winning on the spot at (0, 2)
        // X O .      scores 3 * 1. Playing (1, 0) instead blocks O's middle
        // . O X      column and forks the top row and left column, forcing
        //            a win two plies later worth 3 * 2 * 1 = 6 under the
        // empty-cells scaling, so the fork beats the immediate win.
        let mut board = GameKind::TicTacToe.board();
        board.make_move(Cell::new(0, 0), 0);
        board.make_move(Cell::new(0, 1), 0);
        board.make_move(Cell::new(2, 2), 0);
        board.make_move(Cell::new(1, 1), 1);
        board.make_move(Cell::new(1, 2), 1);

        for algorithm in ALGORITHMS {
            let result = search(&mut board, algorithm, 4, Player::One);
            assert_eq!(result.cell, Some(Cell::new(1, 0)), "{:?}", algorithm);
            assert_eq!(result.score, 6, "{:?}", algorithm);
        }
    }

    #[test]
    fn test_tie_breaks_to_first_candidate() {
        // Depth 1 from an empty board: no candidate can decide anything, so
        // every score ties and the first cell in row-major order is kept.
        let mut board = GameKind::TicTacToe.board();
        for algorithm in ALGORITHMS {
            let result = search(&mut board, algorithm, 1, Player::One);
            assert_eq!(result.cell, Some(Cell::new(0, 0)), "{:?}", algorithm);
        }
    }

    #[test]
    fn test_perfect_tic_tac_toe_is_draw() {
        let mut board = GameKind::TicTacToe.board();
        let result = search(&mut board, Algorithm::AlphaBeta, 9, Player::One);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_full_game_of_optimal_moves_draws() {
        let mut board = GameKind::TicTacToe.board();
        let mut player = Player::One;
        while board.status() == BoardStatus::InProgress {
            let depth = board.empty_cell_count() as u32;
            let result = search(&mut board, Algorithm::AlphaBeta, depth, player);
            let cell = result.cell.expect("in-progress board yields a move");
            board.make_move(cell, player.index());
            player = player.opposite();
        }
        assert_eq!(board.status(), BoardStatus::Draw);
    }

    #[test]
    fn test_minimax_and_alpha_beta_agree_on_random_positions() {
        let mut rng = StdRng::seed_from_u64(7);

        for game_num in 0..30 {
            let mut board = GameKind::TicTacToe.board();
            let mut player = Player::One;

            // Play a few random plies to reach a mid-game position.
            for _ in 0..(game_num % 5) {
                let empties = board.empty_cells();
                if board.status().is_over() {
                    break;
                }
                let cell = empties.choose(&mut rng).copied().expect("cells left");
                board.make_move(cell, player.index());
                player = player.opposite();
            }

            for depth in 1..=4 {
                let plain = search(&mut board, Algorithm::Minimax, depth, player);
                let pruned = search(&mut board, Algorithm::AlphaBeta, depth, player);
                assert_eq!(
                    plain, pruned,
                    "divergence at depth {} in game {}",
                    depth, game_num
                );
            }
        }
    }

    #[test]
    fn test_connect_four_blocks_immediate_threat() {
        // X stacks three on the bottom row; O must take (3, 5).
        let mut board = GameKind::ConnectFour.board();
        board.make_move(Cell::new(0, 5), 0);
        board.make_move(Cell::new(1, 5), 0);
        board.make_move(Cell::new(2, 5), 0);
        board.make_move(Cell::new(0, 4), 1);
        board.make_move(Cell::new(1, 4), 1);

        let result = search(&mut board, Algorithm::AlphaBeta, 2, Player::Two);
        assert_eq!(result.cell, Some(Cell::new(3, 5)));
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("minimax".parse::<Algorithm>(), Ok(Algorithm::Minimax));
        assert_eq!("Alpha-Beta".parse::<Algorithm>(), Ok(Algorithm::AlphaBeta));
        assert_eq!(
            "montecarlo".parse::<Algorithm>(),
            Err(GameError::UnknownAlgorithm("montecarlo".to_string()))
        );
    }
}

use bitgrid::controller::{Difficulty, MatchController};
use bitgrid::games::GameKind;
use bitgrid::player::Player;
use bitgrid::search::{search, Algorithm};

/// Profiling workload: a full expert tic-tac-toe match plus a handful of
/// connect-4 searches from a fixed midgame. Run with
/// `cargo run --release --bin profile --features hotpath` to collect
/// per-function timings.
#[cfg_attr(feature = "hotpath", hotpath::main)]
fn main() {
    let mut controller = MatchController::new(GameKind::TicTacToe);
    match controller.play_cpu_match(Difficulty::Expert, Difficulty::Expert) {
        Ok(outcome) => println!("tic-tac-toe expert match: {}", outcome),
        Err(err) => println!("tic-tac-toe expert match failed: {}", err),
    }

    let mut board = GameKind::ConnectFour.board();
    // A fixed opening: pieces in the middle columns, bottom rows.
    for (x, y, owner) in [
        (3u8, 5u8, 0usize),
        (3, 4, 1),
        (4, 5, 0),
        (2, 5, 1),
        (4, 4, 0),
        (5, 5, 1),
    ] {
        board.make_move(bitgrid::cell::Cell::new(x, y), owner);
    }

    for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
        let result = search(&mut board, algorithm, 3, Player::One);
        println!(
            "connect-4 {:?}: move {:?}, score {}",
            algorithm, result.cell, result.score
        );
    }
}

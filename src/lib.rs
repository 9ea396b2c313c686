pub mod bitboard;
pub mod board;
pub mod cell;
pub mod controller;
pub mod errors;
pub mod games;
pub mod outcome;
pub mod player;
pub mod search;
pub mod widevec;

pub use bitboard::BitBoard;
pub use board::{BoardConfig, GameBoard};
pub use cell::Cell;
pub use controller::{Difficulty, MatchController};
pub use errors::GameError;
pub use games::GameKind;
pub use outcome::BoardStatus;
pub use player::Player;
pub use search::{search, Algorithm, SearchResult};
pub use widevec::WideVec;

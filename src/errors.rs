use crate::cell::Cell;

/// Rejected inputs at the controller boundary. The core layers below the
/// controller never produce these: moves reaching `GameBoard::make_move` are
/// pre-validated, and contract violations there panic instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The cell is out of bounds or already occupied.
    IllegalMove(Cell),
    /// The column is out of bounds or has no free cell left.
    IllegalColumn(u8),
    /// A difficulty selector that names no known tier.
    UnknownDifficulty(String),
    /// An algorithm selector that names no known search algorithm.
    UnknownAlgorithm(String),
    /// The game already reached a terminal state.
    GameOver,
    /// Undo was requested with no moves played.
    NothingToUndo,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::IllegalMove(cell) => write!(f, "illegal move at {}", cell),
            GameError::IllegalColumn(column) => write!(f, "no room in column {}", column),
            GameError::UnknownDifficulty(name) => write!(f, "unknown difficulty '{}'", name),
            GameError::UnknownAlgorithm(name) => write!(f, "unknown algorithm '{}'", name),
            GameError::GameOver => write!(f, "the game is already over"),
            GameError::NothingToUndo => write!(f, "no moves to undo"),
        }
    }
}

impl std::error::Error for GameError {}

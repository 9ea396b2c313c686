/// Result of the winner query. `InProgress` is a real variant, not an error
/// or a null: a board with no winner and empty cells left is simply still
/// being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardStatus {
    InProgress,
    Draw,
    /// The sub-board index of the winning player.
    Win(usize),
}

impl BoardStatus {
    pub fn winner(&self) -> Option<usize> {
        match self {
            BoardStatus::Win(player) => Some(*player),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, BoardStatus::Draw)
    }

    pub fn is_over(&self) -> bool {
        !matches!(self, BoardStatus::InProgress)
    }
}

impl std::fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardStatus::InProgress => write!(f, "In progress"),
            BoardStatus::Draw => write!(f, "Draw"),
            BoardStatus::Win(player) => write!(f, "Player {} wins", player + 1),
        }
    }
}

use std::str::FromStr;

use rand::prelude::IndexedRandom;

use crate::board::GameBoard;
use crate::cell::Cell;
use crate::errors::GameError;
use crate::games::{drop_cell, GameKind};
use crate::outcome::BoardStatus;
use crate::player::Player;
use crate::search::{search, Algorithm, SearchResult};

/// CPU strength tiers. The weakest tier does not search at all, it picks a
/// uniformly random empty cell; the others map to search depths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    // Search depth for the searching tiers. Expert plays out small boards
    // completely; on larger boards the unpruned branching factor makes full
    // depth intractable, so it settles for a fixed look-ahead.
    fn search_depth(&self, remaining: usize, total_cells: usize) -> u32 {
        match self {
            Difficulty::Beginner => 0,
            Difficulty::Intermediate => 2,
            Difficulty::Expert => {
                if total_cells <= 9 {
                    remaining as u32
                } else {
                    4
                }
            }
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" | "easy" => Ok(Difficulty::Beginner),
            "intermediate" | "medium" => Ok(Difficulty::Intermediate),
            "expert" | "hard" => Ok(Difficulty::Expert),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Owns one game in progress: the board, whose turn it is, and the search
/// algorithm CPU turns use. All validation happens here, synchronously:
/// apply a move, read back the resulting status. The layers above (prompt
/// loops, renderers) only ever call in and read out.
pub struct MatchController {
    kind: GameKind,
    board: GameBoard,
    current: Player,
    algorithm: Algorithm,
}

impl MatchController {
    pub fn new(kind: GameKind) -> Self {
        Self::with_algorithm(kind, Algorithm::AlphaBeta)
    }

    pub fn with_algorithm(kind: GameKind, algorithm: Algorithm) -> Self {
        MatchController {
            kind,
            board: kind.board(),
            current: Player::One,
            algorithm,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn status(&self) -> BoardStatus {
        self.board.status()
    }

    /// Validate and apply a move for the player to move, then hand the turn
    /// over. Returns the status after the move.
    pub fn apply(&mut self, cell: Cell) -> Result<BoardStatus, GameError> {
        if self.board.status().is_over() {
            return Err(GameError::GameOver);
        }
        if !self.board.move_is_valid(cell) {
            return Err(GameError::IllegalMove(cell));
        }
        self.board.make_move(cell, self.current.index());
        self.current = self.current.opposite();
        Ok(self.board.status())
    }

    /// Apply a gravity move: the piece lands on the lowest open cell of
    /// `column`.
    pub fn apply_drop(&mut self, column: u8) -> Result<BoardStatus, GameError> {
        let cell = drop_cell(&self.board, column).ok_or(GameError::IllegalColumn(column))?;
        self.apply(cell)
    }

    /// Take one CPU turn at the given difficulty. Returns the chosen cell
    /// and the status after it was applied.
    pub fn cpu_turn(&mut self, difficulty: Difficulty) -> Result<(Cell, BoardStatus), GameError> {
        if self.board.status().is_over() {
            return Err(GameError::GameOver);
        }

        let cell = match difficulty {
            Difficulty::Beginner => {
                let empties = self.board.empty_cells();
                empties
                    .choose(&mut rand::rng())
                    .copied()
                    .ok_or(GameError::GameOver)?
            }
            tier => {
                let total = self.board.width() as usize * self.board.height() as usize;
                let depth = tier.search_depth(self.board.empty_cell_count(), total);
                self.find_optimal_move(depth)
                    .cell
                    .ok_or(GameError::GameOver)?
            }
        };

        let status = self.apply(cell)?;
        Ok((cell, status))
    }

    /// Thin wrapper over the search engine for the player to move.
    pub fn find_optimal_move(&mut self, depth: u32) -> SearchResult {
        search(&mut self.board, self.algorithm, depth, self.current)
    }

    /// Take back the most recent move and return the turn to its player.
    pub fn undo(&mut self) -> Result<(), GameError> {
        if self.board.move_count() == 0 {
            return Err(GameError::NothingToUndo);
        }
        self.board.undo_last_move();
        self.current = self.current.opposite();
        Ok(())
    }

    /// Run a full CPU-vs-CPU game to completion and return the final status.
    pub fn play_cpu_match(
        &mut self,
        first: Difficulty,
        second: Difficulty,
    ) -> Result<BoardStatus, GameError> {
        loop {
            let difficulty = match self.current {
                Player::One => first,
                Player::Two => second,
            };
            let (_, status) = self.cpu_turn(difficulty)?;
            if status.is_over() {
                return Ok(status);
            }
        }
    }
}

use std::fmt;

use crate::bitboard::BitBoard;
use crate::cell::Cell;
use crate::outcome::BoardStatus;

/// Everything a concrete game supplies at construction: geometry, how many
/// sub-boards to pack, the winning patterns, and the static evaluation.
///
/// This replaces per-game subclassing: a game is a configuration, not a type.
#[derive(Clone)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    /// Number of player sub-boards. Occupancy and win queries scan these.
    pub players: usize,
    /// Additional metadata sub-boards packed after the player boards. Not
    /// consulted by occupancy or win queries.
    pub extra_boards: usize,
    /// Per-player-sized winning patterns; a sub-board wins when it fully
    /// contains any one of them.
    pub winning_masks: Vec<BitBoard>,
    /// Static evaluation. Positive favors the first player; must be symmetric
    /// in magnitude under player swap.
    pub heuristic: fn(&GameBoard) -> i32,
}

/// A game position packed into one [`BitBoard`]: one `width * height`
/// sub-board per player (plus any extra boards), contiguous and
/// non-overlapping, with a LIFO move history for undo.
///
/// Mutations are deliberately unchecked: `make_move` trusts that the caller
/// validated the move with `move_is_valid` / `cell_occupier` first. This
/// keeps the search hot loop branch-free; the controller layer owns
/// validation.
#[derive(Clone)]
pub struct GameBoard {
    width: u8,
    height: u8,
    players: usize,
    board_count: usize,
    cells: usize,
    bits: BitBoard,
    moves: Vec<usize>,
    winning_masks: Vec<BitBoard>,
    heuristic_fn: fn(&GameBoard) -> i32,
}

impl GameBoard {
    pub fn new(config: BoardConfig) -> Self {
        let cells = config.width as usize * config.height as usize;
        let board_count = config.players + config.extra_boards;
        debug_assert!(config.players >= 1);
        debug_assert!(cells > 0);
        debug_assert!(config
            .winning_masks
            .iter()
            .all(|m| m.total_bits() == cells));

        GameBoard {
            width: config.width,
            height: config.height,
            players: config.players,
            board_count,
            cells,
            bits: BitBoard::empty(cells * board_count),
            moves: Vec::with_capacity(cells),
            winning_masks: config.winning_masks,
            heuristic_fn: config.heuristic,
        }
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub fn players(&self) -> usize {
        self.players
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    // Absolute bit index of `cell` inside sub-board `board_index`.
    #[inline]
    fn bit_index(&self, cell: Cell, board_index: usize) -> usize {
        debug_assert!(cell.is_valid(self.width, self.height));
        debug_assert!(board_index < self.board_count);
        board_index * self.cells + cell.to_index(self.width)
    }

    /// Apply a move for the given sub-board. No legality check: the caller
    /// must already have established bounds and vacancy.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    #[inline]
    pub fn make_move(&mut self, cell: Cell, board_index: usize) {
        let index = self.bit_index(cell, board_index);
        self.moves.push(index);
        self.bits.set(index);
    }

    /// Reverse the most recently applied move. Calling this with no move
    /// history is a caller bug and panics.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    #[inline]
    pub fn undo_last_move(&mut self) {
        match self.moves.pop() {
            Some(index) => self.bits.clear(index),
            None => panic!("undo_last_move called with empty move history"),
        }
    }

    /// In bounds and unoccupied.
    pub fn move_is_valid(&self, cell: Cell) -> bool {
        cell.is_valid(self.width, self.height) && self.cell_occupier(cell).is_none()
    }

    /// The player sub-board occupying `cell`, scanned in index order.
    /// Sub-boards are mutually exclusive per cell, so the first hit is the
    /// only hit.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn cell_occupier(&self, cell: Cell) -> Option<usize> {
        let offset = cell.to_index(self.width);
        (0..self.players).find(|p| self.bits.get(p * self.cells + offset))
    }

    /// Win/draw/in-progress, computed on demand. Players are scanned in
    /// construction order; the first whose sub-board fully contains any
    /// winning mask takes the win.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn status(&self) -> BoardStatus {
        for player in 0..self.players {
            let sub = self.player_board(player);
            if self.winning_masks.iter().any(|mask| sub.contains(mask)) {
                return BoardStatus::Win(player);
            }
        }
        if self.is_full() {
            BoardStatus::Draw
        } else {
            BoardStatus::InProgress
        }
    }

    /// Unoccupied cells in row-major order (y outer, x inner). Search
    /// iterates moves in exactly this order, so the ordering determines
    /// tie-break behavior.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn empty_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.cells - self.moves.len().min(self.cells));
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = Cell::new(x, y);
                if self.cell_occupier(cell).is_none() {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    #[inline]
    pub fn empty_cell_count(&self) -> usize {
        self.cells - self.occupied_mask().count() as usize
    }

    /// The winning patterns this board was configured with.
    #[inline]
    pub fn winning_masks(&self) -> &[BitBoard] {
        &self.winning_masks
    }

    /// Pure extraction of sub-board `i`, sized `width * height`. The result
    /// shares no storage with the packed board.
    pub fn player_board(&self, board_index: usize) -> BitBoard {
        debug_assert!(board_index < self.board_count);
        self.bits.extract(board_index * self.cells, self.cells)
    }

    // OR of all player sub-boards (extra boards excluded).
    fn occupied_mask(&self) -> BitBoard {
        let mut occupied = self.player_board(0);
        for p in 1..self.players {
            occupied = occupied.or(&self.player_board(p));
        }
        occupied
    }

    pub fn is_full(&self) -> bool {
        self.occupied_mask() == BitBoard::all_ones(self.cells)
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_mask().is_zero()
    }

    /// Static evaluation via the configured function.
    #[inline]
    pub fn heuristic(&self) -> i32 {
        (self.heuristic_fn)(self)
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            write!(f, "|")?;
            for x in 0..self.width {
                let c = match self.cell_occupier(Cell::new(x, y)) {
                    Some(0) => 'X',
                    Some(1) => 'O',
                    Some(p) => char::from_digit(p as u32, 10).unwrap_or('?'),
                    None => '.',
                };
                write!(f, "{}|", c)?;
            }
            writeln!(f)?;
        }

        write!(f, " ")?;
        for x in 0..self.width {
            write!(f, "{} ", x)?;
        }
        writeln!(f)?;

        Ok(())
    }
}

//! Raw piece-occupancy observations.
//!
//! An observation is a pure snapshot of every piece currently visible:
//! an unordered set of (square, piece) pairs with no knowledge of
//! history (side to move, castling rights, en-passant eligibility).

use crate::board::piece::Piece;
use crate::board::square::{all_squares, Square, SQUARE_COUNT};
use crate::board::state::BoardState;
use crate::protocol::fen::{parse_placement, FenError};

/// A snapshot of the visible board occupancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    grid: [Option<Piece>; SQUARE_COUNT],
}

/// Errors from assembling an observation.
#[derive(Debug, thiserror::Error)]
pub enum ObservationError {
    #[error("square {0} reported twice in one observation")]
    DuplicateSquare(Square),

    #[error("unreadable placement field: {0}")]
    BadPlacement(#[from] FenError),
}

impl Observation {
    /// Builds an observation from visible (square, piece) pairs. A square
    /// reported twice is a scraping fault, not something to resolve here.
    pub fn from_pieces(
        pieces: impl IntoIterator<Item = (Square, Piece)>,
    ) -> Result<Observation, ObservationError> {
        let mut grid = [None; SQUARE_COUNT];
        for (square, piece) in pieces {
            if grid[square.index()].is_some() {
                return Err(ObservationError::DuplicateSquare(square));
            }
            grid[square.index()] = Some(piece);
        }
        Ok(Observation { grid })
    }

    /// Builds an observation from a FEN placement field like
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn from_placement(s: &str) -> Result<Observation, ObservationError> {
        Observation::from_pieces(parse_placement(s)?)
    }

    /// Snapshots the occupancy of a board state.
    pub fn from_state(state: &BoardState) -> Observation {
        let mut grid = [None; SQUARE_COUNT];
        for (square, piece) in state.occupied() {
            grid[square.index()] = Some(piece);
        }
        Observation { grid }
    }

    /// Returns the observed piece on a square, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.index()]
    }

    /// Returns the squares whose observed content differs from the
    /// given board state, in storage order.
    pub fn diff(&self, state: &BoardState) -> Vec<Square> {
        all_squares()
            .filter(|&sq| self.piece_at(sq) != state.piece_at(sq))
            .collect()
    }

    /// True when the observation matches the state's occupancy exactly.
    pub fn matches(&self, state: &BoardState) -> bool {
        all_squares().all(|sq| self.piece_at(sq) == state.piece_at(sq))
    }
}

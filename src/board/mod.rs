//! Board representation and game-state types.
//!
//! Contains the core data structures for squares, pieces, moves, and the
//! authoritative board state.

pub mod moves;
pub mod piece;
pub mod square;
pub mod state;

pub use moves::Move;
pub use piece::{Colour, Piece, PieceType};
pub use square::{all_squares, Square, SQUARE_COUNT};
pub use state::{ApplyError, BoardState, CastlingRights};

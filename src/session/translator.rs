//! Move translation for actuation.
//!
//! Converts a move into the display addresses the actuation collaborator
//! clicks, applying the move to the local board first so the local model
//! and the external board stay in lockstep as long as actuation
//! succeeds. Performs no I/O.

use crate::board::moves::Move;
use crate::board::piece::{Colour, PieceType};
use crate::board::state::{ApplyError, BoardState};
use crate::vision::mapper::{to_address, BoardAddress};

/// The display-coordinate legs of a move. Castling carries the rook's
/// leg alongside the king's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actuation {
    pub origin: BoardAddress,
    pub dest: BoardAddress,
    pub rook_leg: Option<(BoardAddress, BoardAddress)>,
}

impl Actuation {
    /// Returns every (origin, destination) pair to perform, king first.
    pub fn legs(&self) -> impl Iterator<Item = (BoardAddress, BoardAddress)> {
        std::iter::once((self.origin, self.dest)).chain(self.rook_leg)
    }
}

/// Applies the move to the board and returns its display addresses for
/// the given session colour.
pub fn translate(
    board: &mut BoardState,
    mv: Move,
    colour: Colour,
) -> Result<Actuation, ApplyError> {
    let is_king_move = board
        .piece_at(mv.origin)
        .is_some_and(|p| p.kind == PieceType::King);
    let rook_leg = if is_king_move {
        mv.castling_rook_leg()
    } else {
        None
    };

    board.apply(mv)?;

    Ok(Actuation {
        origin: to_address(mv.origin, colour),
        dest: to_address(mv.dest, colour),
        rook_leg: rook_leg
            .map(|(from, to)| (to_address(from, colour), to_address(to, colour))),
    })
}

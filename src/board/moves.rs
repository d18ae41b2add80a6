//! Move representation.
//!
//! A move is an origin/destination square pair with an optional
//! promotion piece type. Castling is represented as the king's
//! two-square move; the rook's relocation is derived from it.

use super::piece::PieceType;
use super::square::Square;

/// A single move on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Square,
    pub dest: Square,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub const fn new(origin: Square, dest: Square) -> Move {
        Move {
            origin,
            dest,
            promotion: None,
        }
    }

    pub const fn with_promotion(origin: Square, dest: Square, kind: PieceType) -> Move {
        Move {
            origin,
            dest,
            promotion: Some(kind),
        }
    }

    /// Returns the rook's (origin, destination) if this move has castling
    /// geometry: a two-file slide along a back rank from the e-file. The
    /// caller must already know the moving piece is the king.
    pub fn castling_rook_leg(&self) -> Option<(Square, Square)> {
        let rank = self.origin.rank();
        if rank != self.dest.rank() || (rank != 0 && rank != 7) {
            return None;
        }
        if self.origin.file() != 4 {
            return None;
        }
        match self.dest.file() {
            // King side: rook h-file -> f-file.
            6 => Some((Square::new(7, rank)?, Square::new(5, rank)?)),
            // Queen side: rook a-file -> d-file.
            2 => Some((Square::new(0, rank)?, Square::new(3, rank)?)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn king_side_castling_rook_leg() {
        let mv = Move::new(sq("e1"), sq("g1"));
        assert_eq!(mv.castling_rook_leg(), Some((sq("h1"), sq("f1"))));
        let mv = Move::new(sq("e8"), sq("g8"));
        assert_eq!(mv.castling_rook_leg(), Some((sq("h8"), sq("f8"))));
    }

    #[test]
    fn queen_side_castling_rook_leg() {
        let mv = Move::new(sq("e1"), sq("c1"));
        assert_eq!(mv.castling_rook_leg(), Some((sq("a1"), sq("d1"))));
        let mv = Move::new(sq("e8"), sq("c8"));
        assert_eq!(mv.castling_rook_leg(), Some((sq("a8"), sq("d8"))));
    }

    #[test]
    fn ordinary_moves_have_no_rook_leg() {
        assert_eq!(Move::new(sq("e2"), sq("e4")).castling_rook_leg(), None);
        // One-square king step.
        assert_eq!(Move::new(sq("e1"), sq("f1")).castling_rook_leg(), None);
        // Two-file slide on a middle rank.
        assert_eq!(Move::new(sq("e4"), sq("g4")).castling_rook_leg(), None);
    }
}

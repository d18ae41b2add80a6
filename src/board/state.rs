//! Authoritative board state.
//!
//! Holds the complete snapshot of a game at a given point in time:
//! occupancy grid, side to move, castling rights, en-passant target, and
//! move counters. `apply` is the single mutation point; all castling,
//! en-passant, and counter bookkeeping lives here so callers never touch
//! those fields directly.

use super::moves::Move;
use super::piece::{Colour, Piece, PieceType};
use super::square::{all_squares, Square, SQUARE_COUNT};

/// The four independent castling-availability flags. Flags can only be
/// lost, never regained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    /// All four flags available, as at the start of a game.
    pub const fn all() -> CastlingRights {
        CastlingRights {
            white_king_side: true,
            white_queen_side: true,
            black_king_side: true,
            black_queen_side: true,
        }
    }

    /// No flags available.
    pub const fn none() -> CastlingRights {
        CastlingRights {
            white_king_side: false,
            white_queen_side: false,
            black_king_side: false,
            black_queen_side: false,
        }
    }

    /// Clears both of a colour's flags.
    pub fn clear_colour(&mut self, colour: Colour) {
        match colour {
            Colour::White => {
                self.white_king_side = false;
                self.white_queen_side = false;
            }
            Colour::Black => {
                self.black_king_side = false;
                self.black_queen_side = false;
            }
        }
    }

    /// Clears the flag tied to a rook home square, if the square is one.
    fn clear_for_rook_home(&mut self, square: Square) {
        match (square.file(), square.rank()) {
            (0, 0) => self.white_queen_side = false,
            (7, 0) => self.white_king_side = false,
            (0, 7) => self.black_queen_side = false,
            (7, 7) => self.black_king_side = false,
            _ => {}
        }
    }
}

/// Errors from applying a move to a board state.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("no piece on origin square {0}")]
    EmptyOrigin(Square),

    #[error("piece on {square} belongs to {actual:?}, but {expected:?} is to move")]
    WrongColour {
        square: Square,
        expected: Colour,
        actual: Colour,
    },
}

/// Complete board state at a point in time.
///
/// The occupancy grid is a fixed-size array indexed by `Square::index()`
/// for O(1) lookup; the whole state is cheap to clone for snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    squares: [Option<Piece>; SQUARE_COUNT],
    pub side_to_move: Colour,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Back-rank piece order from the a-file to the h-file.
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl BoardState {
    /// Creates an empty board with White to move and no castling rights.
    pub fn empty() -> Self {
        BoardState {
            squares: [None; SQUARE_COUNT],
            side_to_move: Colour::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the canonical starting position.
    pub fn starting() -> Self {
        let mut state = BoardState::empty();
        state.castling = CastlingRights::all();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            let place = |state: &mut BoardState, rank, piece| {
                if let Some(sq) = Square::new(file, rank) {
                    state.set_piece(sq, Some(piece));
                }
            };
            place(&mut state, 0, Piece::new(Colour::White, kind));
            place(&mut state, 1, Piece::new(Colour::White, PieceType::Pawn));
            place(&mut state, 6, Piece::new(Colour::Black, PieceType::Pawn));
            place(&mut state, 7, Piece::new(Colour::Black, kind));
        }
        state
    }

    /// Returns the piece on a square, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Sets or clears the piece on a square.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    /// Returns every occupied square with its piece, in storage order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        all_squares().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Applies a move in place.
    ///
    /// Exactly the squares logically touched by the move change: origin,
    /// destination, the rook's origin/destination for castling, and the
    /// captured pawn's square for en passant. All bookkeeping (castling
    /// rights, en-passant target, clocks, side to move) is evaluated on
    /// every call regardless of move type.
    pub fn apply(&mut self, mv: Move) -> Result<(), ApplyError> {
        let piece = self
            .piece_at(mv.origin)
            .ok_or(ApplyError::EmptyOrigin(mv.origin))?;
        if piece.colour != self.side_to_move {
            return Err(ApplyError::WrongColour {
                square: mv.origin,
                expected: self.side_to_move,
                actual: piece.colour,
            });
        }

        let mut captured = self.piece_at(mv.dest).is_some();

        // En passant: a pawn landing diagonally on the recorded target
        // square captures the pawn directly behind the destination.
        if piece.kind == PieceType::Pawn
            && Some(mv.dest) == self.en_passant
            && mv.origin.file() != mv.dest.file()
            && !captured
        {
            if let Some(behind) = Square::new(mv.dest.file(), mv.origin.rank()) {
                self.set_piece(behind, None);
                captured = true;
            }
        }

        // Castling rights bookkeeping.
        match piece.kind {
            PieceType::King => self.castling.clear_colour(piece.colour),
            PieceType::Rook => self.castling.clear_for_rook_home(mv.origin),
            _ => {}
        }
        // A rook captured on its home square loses its flag too.
        self.castling.clear_for_rook_home(mv.dest);

        // Castling relocates the rook alongside the king.
        if piece.kind == PieceType::King {
            if let Some((rook_from, rook_to)) = mv.castling_rook_leg() {
                let rook = self.piece_at(rook_from);
                self.set_piece(rook_from, None);
                self.set_piece(rook_to, rook);
            }
        }

        let placed = match mv.promotion {
            Some(kind) => Piece::new(piece.colour, kind),
            None => piece,
        };
        self.set_piece(mv.origin, None);
        self.set_piece(mv.dest, Some(placed));

        // A two-square pawn advance arms the en-passant target for exactly
        // one reply; every other move disarms it.
        let two_square_advance = piece.kind == PieceType::Pawn
            && mv.origin.file() == mv.dest.file()
            && mv.origin.rank().abs_diff(mv.dest.rank()) == 2;
        self.en_passant = if two_square_advance {
            Square::new(mv.origin.file(), (mv.origin.rank() + mv.dest.rank()) / 2)
        } else {
            None
        };

        if piece.kind == PieceType::Pawn || captured {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move == Colour::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.opponent();

        Ok(())
    }
}

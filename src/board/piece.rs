//! Piece types and colours.
//!
//! Pieces are identified by colour and type, and convert to and from the
//! single FEN letter used by the position codec (uppercase = White,
//! lowercase = Black).

/// The colour of a side. White moves first and renders nearest the
/// viewer in the default orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    /// Returns the opposing colour.
    pub const fn opponent(self) -> Colour {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }

    /// Returns the single-character FEN side-to-move abbreviation.
    pub const fn fen_char(self) -> char {
        match self {
            Colour::White => 'w',
            Colour::Black => 'b',
        }
    }

    /// Parses a colour from its FEN side-to-move abbreviation.
    pub fn from_fen_char(c: char) -> Option<Colour> {
        match c {
            'w' => Some(Colour::White),
            'b' => Some(Colour::Black),
            _ => None,
        }
    }
}

/// The type of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Returns the lowercase FEN letter for this piece type.
    pub const fn fen_letter(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// Parses a piece type from a lowercase FEN letter.
    pub fn from_fen_letter(c: char) -> Option<PieceType> {
        match c {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub colour: Colour,
    pub kind: PieceType,
}

impl Piece {
    pub const fn new(colour: Colour, kind: PieceType) -> Piece {
        Piece { colour, kind }
    }

    /// Returns the FEN character: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        let c = self.kind.fen_letter();
        match self.colour {
            Colour::White => c.to_ascii_uppercase(),
            Colour::Black => c,
        }
    }

    /// Parses a piece from its FEN character.
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let colour = if c.is_ascii_uppercase() {
            Colour::White
        } else {
            Colour::Black
        };
        let kind = PieceType::from_fen_letter(c.to_ascii_lowercase())?;
        Some(Piece { colour, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_fen_roundtrip() {
        for c in [Colour::White, Colour::Black] {
            assert_eq!(Colour::from_fen_char(c.fen_char()), Some(c));
        }
        assert_eq!(Colour::from_fen_char('x'), None);
    }

    #[test]
    fn opponent_is_involutive() {
        assert_eq!(Colour::White.opponent(), Colour::Black);
        assert_eq!(Colour::Black.opponent().opponent(), Colour::Black);
    }

    #[test]
    fn piece_type_fen_roundtrip() {
        for k in [
            PieceType::Pawn,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
            PieceType::King,
        ] {
            assert_eq!(PieceType::from_fen_letter(k.fen_letter()), Some(k));
        }
        assert_eq!(PieceType::from_fen_letter('x'), None);
    }

    #[test]
    fn piece_fen_case_carries_colour() {
        let wq = Piece::new(Colour::White, PieceType::Queen);
        let bq = Piece::new(Colour::Black, PieceType::Queen);
        assert_eq!(wq.fen_char(), 'Q');
        assert_eq!(bq.fen_char(), 'q');
        assert_eq!(Piece::from_fen_char('Q'), Some(wq));
        assert_eq!(Piece::from_fen_char('q'), Some(bq));
        assert_eq!(Piece::from_fen_char('1'), None);
    }
}

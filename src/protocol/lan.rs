//! Long algebraic coordinate notation.
//!
//! The move oracle speaks bare coordinate notation: origin square,
//! destination square, and an optional promotion letter, e.g. `e2e4` or
//! `e7e8q`. The session validates oracle text through `parse_lan` before
//! ever constructing a `Move` from it.

use crate::board::moves::Move;
use crate::board::piece::PieceType;
use crate::board::square::Square;

/// Errors from parsing coordinate move notation.
#[derive(Debug, thiserror::Error)]
pub enum LanError {
    #[error("move text has length {0}, expected 4 or 5")]
    WrongLength(usize),

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid promotion letter '{0}'")]
    InvalidPromotion(char),
}

/// Parses a coordinate-notation move like "e2e4" or "e7e8q".
pub fn parse_lan(s: &str) -> Result<Move, LanError> {
    let s = s.trim();
    if !s.is_ascii() {
        return Err(LanError::InvalidSquare(s.to_string()));
    }
    if s.len() != 4 && s.len() != 5 {
        return Err(LanError::WrongLength(s.len()));
    }

    let origin = Square::from_algebraic(&s[0..2])
        .ok_or_else(|| LanError::InvalidSquare(s[0..2].to_string()))?;
    let dest = Square::from_algebraic(&s[2..4])
        .ok_or_else(|| LanError::InvalidSquare(s[2..4].to_string()))?;

    let promotion = match s.chars().nth(4) {
        None => None,
        Some(c) => {
            let kind = PieceType::from_fen_letter(c.to_ascii_lowercase())
                .ok_or(LanError::InvalidPromotion(c))?;
            // Pawns and kings are not promotion targets.
            if matches!(kind, PieceType::Pawn | PieceType::King) {
                return Err(LanError::InvalidPromotion(c));
            }
            Some(kind)
        }
    };

    Ok(Move {
        origin,
        dest,
        promotion,
    })
}

/// Formats a move in coordinate notation.
pub fn format_lan(mv: &Move) -> String {
    match mv.promotion {
        Some(kind) => format!("{}{}{}", mv.origin, mv.dest, kind.fen_letter()),
        None => format!("{}{}", mv.origin, mv.dest),
    }
}

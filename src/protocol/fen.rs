//! FEN encoding and decoding.
//!
//! FEN (Forsyth-Edwards Notation) is the canonical one-line text form of
//! a chess position: eight ranks of piece placement from rank 8 down to
//! rank 1, then side to move, castling rights, en-passant target,
//! half-move clock, and full-move number, space-separated.
//!
//! `parse_fen` is the exact inverse of `encode_fen`; no partial
//! `BoardState` is ever produced on failure.

use crate::board::piece::{Colour, Piece};
use crate::board::square::Square;
use crate::board::state::{BoardState, CastlingRights};

/// Errors that can occur during FEN parsing.
#[derive(Debug, thiserror::Error)]
pub enum FenError {
    #[error("expected 8 ranks separated by '/', got {0}")]
    WrongRankCount(usize),

    #[error("rank {rank} covers {count} squares, expected 8")]
    BadRankWidth { rank: u8, count: u8 },

    #[error("unrecognized character '{0}' in piece placement")]
    UnknownPiece(char),

    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("invalid side-to-move field: '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling-rights field: '{0}'")]
    InvalidCastling(String),

    #[error("invalid en-passant field: '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid {field} counter: '{value}'")]
    InvalidCounter { field: &'static str, value: String },

    #[error("unexpected trailing field: '{0}'")]
    TrailingField(String),
}

/// Encodes the piece-placement field alone (the first FEN field).
pub fn encode_placement(state: &BoardState) -> String {
    let mut out = String::with_capacity(72);
    for rank in (0..8).rev() {
        let mut empty_run = 0;
        for file in 0..8 {
            let piece = Square::new(file, rank).and_then(|sq| state.piece_at(sq));
            match piece {
                Some(p) => {
                    if empty_run > 0 {
                        out.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    out.push(p.fen_char());
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            out.push(char::from(b'0' + empty_run));
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}

/// Encodes a BoardState into a canonical FEN string.
pub fn encode_fen(state: &BoardState) -> String {
    let castling = {
        let mut s = String::new();
        if state.castling.white_king_side {
            s.push('K');
        }
        if state.castling.white_queen_side {
            s.push('Q');
        }
        if state.castling.black_king_side {
            s.push('k');
        }
        if state.castling.black_queen_side {
            s.push('q');
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    };

    let en_passant = match state.en_passant {
        Some(sq) => sq.to_string(),
        None => "-".to_string(),
    };

    format!(
        "{} {} {} {} {} {}",
        encode_placement(state),
        state.side_to_move.fen_char(),
        castling,
        en_passant,
        state.halfmove_clock,
        state.fullmove_number
    )
}

/// Parses the piece-placement field into (square, piece) pairs.
pub fn parse_placement(s: &str) -> Result<Vec<(Square, Piece)>, FenError> {
    let ranks: Vec<&str> = s.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount(ranks.len()));
    }

    let mut pieces = Vec::with_capacity(32);
    for (i, rank_str) in ranks.iter().enumerate() {
        // Ranks appear highest first.
        let rank = 7 - i as u8;
        let mut file: u8 = 0;
        for c in rank_str.chars() {
            if let Some(d) = c.to_digit(10) {
                if d == 0 || d > 8 {
                    return Err(FenError::UnknownPiece(c));
                }
                file = file.saturating_add(d as u8);
                if file > 8 {
                    return Err(FenError::BadRankWidth {
                        rank: rank + 1,
                        count: file,
                    });
                }
            } else {
                let piece = Piece::from_fen_char(c).ok_or(FenError::UnknownPiece(c))?;
                let square = Square::new(file, rank).ok_or(FenError::BadRankWidth {
                    rank: rank + 1,
                    count: file.saturating_add(1),
                })?;
                pieces.push((square, piece));
                file += 1;
            }
        }
        if file != 8 {
            return Err(FenError::BadRankWidth {
                rank: rank + 1,
                count: file,
            });
        }
    }
    Ok(pieces)
}

/// Parses the castling-rights field.
fn parse_castling(s: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if s == "-" {
        return Ok(rights);
    }
    if s.is_empty() {
        return Err(FenError::InvalidCastling(s.to_string()));
    }
    for c in s.chars() {
        match c {
            'K' => rights.white_king_side = true,
            'Q' => rights.white_queen_side = true,
            'k' => rights.black_king_side = true,
            'q' => rights.black_queen_side = true,
            _ => return Err(FenError::InvalidCastling(s.to_string())),
        }
    }
    Ok(rights)
}

/// Parses a FEN string into a BoardState.
pub fn parse_fen(s: &str) -> Result<BoardState, FenError> {
    let mut fields = s.split_whitespace();

    let placement = fields.next().ok_or(FenError::MissingField("placement"))?;
    let side = fields.next().ok_or(FenError::MissingField("side-to-move"))?;
    let castling = fields.next().ok_or(FenError::MissingField("castling"))?;
    let en_passant = fields.next().ok_or(FenError::MissingField("en-passant"))?;
    let halfmove = fields.next().ok_or(FenError::MissingField("halfmove"))?;
    let fullmove = fields.next().ok_or(FenError::MissingField("fullmove"))?;
    if let Some(extra) = fields.next() {
        return Err(FenError::TrailingField(extra.to_string()));
    }

    let pieces = parse_placement(placement)?;

    let side_to_move = match side.chars().next() {
        Some(c) if side.len() == 1 => {
            Colour::from_fen_char(c).ok_or_else(|| FenError::InvalidSideToMove(side.to_string()))?
        }
        _ => return Err(FenError::InvalidSideToMove(side.to_string())),
    };

    let castling = parse_castling(castling)?;

    let en_passant = if en_passant == "-" {
        None
    } else {
        Some(
            Square::from_algebraic(en_passant)
                .ok_or_else(|| FenError::InvalidEnPassant(en_passant.to_string()))?,
        )
    };

    let halfmove_clock: u32 = halfmove.parse().map_err(|_| FenError::InvalidCounter {
        field: "halfmove",
        value: halfmove.to_string(),
    })?;
    let fullmove_number: u32 = fullmove.parse().map_err(|_| FenError::InvalidCounter {
        field: "fullmove",
        value: fullmove.to_string(),
    })?;

    let mut state = BoardState::empty();
    for (square, piece) in pieces {
        state.set_piece(square, Some(piece));
    }
    state.side_to_move = side_to_move;
    state.castling = castling;
    state.en_passant = en_passant;
    state.halfmove_clock = halfmove_clock;
    state.fullmove_number = fullmove_number;
    Ok(state)
}

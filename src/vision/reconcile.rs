//! Observation reconciliation.
//!
//! Recovers the single move that occurred between the previous board
//! state and a fresh occupancy observation by classifying the set of
//! changed squares. An ordinary move or capture changes exactly two
//! squares; en passant changes three; castling changes four. Whenever
//! zero or more than one origin/destination assignment is consistent
//! with the observed delta, reconciliation fails rather than guessing.

use crate::board::moves::Move;
use crate::board::piece::{Colour, PieceType};
use crate::board::square::Square;
use crate::board::state::BoardState;

use super::observation::Observation;

/// Errors from reconciling an observation against the previous state.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("observation shows no change from the previous position")]
    NoChange,

    #[error("ambiguous observation: {candidates} candidate moves explain {changed} changed squares")]
    Ambiguous { changed: usize, candidates: usize },
}

/// Recovers the move the side to move just made.
pub fn reconcile(prev: &BoardState, obs: &Observation) -> Result<Move, ReconcileError> {
    let changed = obs.diff(prev);
    if changed.is_empty() {
        return Err(ReconcileError::NoChange);
    }

    let mover = prev.side_to_move;
    match changed.len() {
        2 => reconcile_simple(prev, obs, mover, &changed),
        3 => reconcile_en_passant(prev, obs, mover, &changed),
        4 => reconcile_castling(prev, obs, mover, &changed),
        n => Err(ReconcileError::Ambiguous {
            changed: n,
            candidates: 0,
        }),
    }
}

/// An ordinary move, capture, or promotion: one square the mover
/// vacated, one square now holding the mover's piece.
fn reconcile_simple(
    prev: &BoardState,
    obs: &Observation,
    mover: Colour,
    changed: &[Square],
) -> Result<Move, ReconcileError> {
    let vacated: Vec<Square> = changed
        .iter()
        .copied()
        .filter(|&sq| {
            obs.piece_at(sq).is_none()
                && prev.piece_at(sq).is_some_and(|p| p.colour == mover)
        })
        .collect();
    let landed: Vec<Square> = changed
        .iter()
        .copied()
        .filter(|&sq| obs.piece_at(sq).is_some_and(|p| p.colour == mover))
        .collect();

    let mut candidates: Vec<Move> = Vec::new();
    for &origin in &vacated {
        for &dest in &landed {
            // vacated and landed are disjoint by construction
            let Some(left) = prev.piece_at(origin) else {
                continue;
            };
            let Some(arrived) = obs.piece_at(dest) else {
                continue;
            };
            if left.kind == arrived.kind {
                candidates.push(Move::new(origin, dest));
            } else if is_promotion(mover, origin, dest, left.kind, arrived.kind) {
                candidates.push(Move::with_promotion(origin, dest, arrived.kind));
            }
        }
    }

    match candidates.as_slice() {
        [mv] => Ok(*mv),
        _ => Err(ReconcileError::Ambiguous {
            changed: changed.len(),
            candidates: candidates.len(),
        }),
    }
}

/// A pawn reaching the farthest rank as a different piece type.
fn is_promotion(
    mover: Colour,
    origin: Square,
    dest: Square,
    left: PieceType,
    arrived: PieceType,
) -> bool {
    let (last_rank, seventh_rank) = match mover {
        Colour::White => (7, 6),
        Colour::Black => (0, 1),
    };
    left == PieceType::Pawn
        && !matches!(arrived, PieceType::Pawn | PieceType::King)
        && origin.rank() == seventh_rank
        && dest.rank() == last_rank
}

/// En passant: the pawn's destination is the recorded target square and
/// the square directly behind it (the bypassed pawn) became empty.
fn reconcile_en_passant(
    prev: &BoardState,
    obs: &Observation,
    mover: Colour,
    changed: &[Square],
) -> Result<Move, ReconcileError> {
    let ambiguous = |candidates| ReconcileError::Ambiguous {
        changed: changed.len(),
        candidates,
    };

    let Some(target) = prev.en_passant else {
        return Err(ambiguous(0));
    };
    if !changed.contains(&target)
        || !obs
            .piece_at(target)
            .is_some_and(|p| p.colour == mover && p.kind == PieceType::Pawn)
    {
        return Err(ambiguous(0));
    }

    let origins: Vec<Square> = changed
        .iter()
        .copied()
        .filter(|&sq| {
            sq != target
                && obs.piece_at(sq).is_none()
                && prev
                    .piece_at(sq)
                    .is_some_and(|p| p.colour == mover && p.kind == PieceType::Pawn)
                && sq.file().abs_diff(target.file()) == 1
        })
        .collect();
    let [origin] = origins.as_slice() else {
        return Err(ambiguous(origins.len()));
    };

    // The bypassed pawn sat directly behind the destination, on the
    // mover's origin rank.
    let captured = Square::new(target.file(), origin.rank());
    let captured_ok = captured.is_some_and(|sq| {
        changed.contains(&sq)
            && obs.piece_at(sq).is_none()
            && prev
                .piece_at(sq)
                .is_some_and(|p| p.colour == mover.opponent() && p.kind == PieceType::Pawn)
    });
    if !captured_ok {
        return Err(ambiguous(0));
    }

    Ok(Move::new(*origin, target))
}

/// Castling: the king and one same-colour rook relocate along the back
/// rank simultaneously.
fn reconcile_castling(
    prev: &BoardState,
    obs: &Observation,
    mover: Colour,
    changed: &[Square],
) -> Result<Move, ReconcileError> {
    let ambiguous = |candidates| ReconcileError::Ambiguous {
        changed: changed.len(),
        candidates,
    };

    let back_rank = match mover {
        Colour::White => 0,
        Colour::Black => 7,
    };
    if changed.iter().any(|sq| sq.rank() != back_rank) {
        return Err(ambiguous(0));
    }

    let find_one = |kind: PieceType, vacated: bool| -> Option<Square> {
        let matches: Vec<Square> = changed
            .iter()
            .copied()
            .filter(|&sq| {
                let piece = if vacated {
                    prev.piece_at(sq).filter(|_| obs.piece_at(sq).is_none())
                } else {
                    obs.piece_at(sq)
                };
                piece.is_some_and(|p| p.colour == mover && p.kind == kind)
            })
            .collect();
        match matches.as_slice() {
            [sq] => Some(*sq),
            _ => None,
        }
    };

    let (Some(king_from), Some(king_to), Some(rook_from), Some(rook_to)) = (
        find_one(PieceType::King, true),
        find_one(PieceType::King, false),
        find_one(PieceType::Rook, true),
        find_one(PieceType::Rook, false),
    ) else {
        return Err(ambiguous(0));
    };

    let mv = Move::new(king_from, king_to);
    if mv.castling_rook_leg() != Some((rook_from, rook_to)) {
        return Err(ambiguous(0));
    }
    Ok(mv)
}

//! Square coordinates.
//!
//! A square is an orientation-independent (file, rank) pair with both
//! indices in 0..8. File 0 is the a-file, rank 0 is White's back rank,
//! regardless of which side of the board the session renders nearest.

use std::fmt;

/// The number of squares on the board.
pub const SQUARE_COUNT: usize = 64;

/// A board square in canonical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Creates a square from file and rank indices. Returns `None` if
    /// either index is out of range.
    pub const fn new(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Returns the file index (0 = a-file).
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the rank index (0 = rank 1).
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the storage index in 0..64 (rank-major).
    pub const fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// Reconstructs a square from its storage index.
    pub const fn from_index(idx: usize) -> Option<Square> {
        if idx < SQUARE_COUNT {
            Some(Square {
                file: (idx % 8) as u8,
                rank: (idx / 8) as u8,
            })
        } else {
            None
        }
    }

    /// Parses algebraic notation like "e4".
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'a')?;
        let rank = bytes[1].checked_sub(b'1')?;
        Square::new(file, rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file) as char,
            (b'1' + self.rank) as char
        )
    }
}

/// Iterates every square in storage order (a1, b1, ..., h8).
pub fn all_squares() -> impl Iterator<Item = Square> {
    (0..SQUARE_COUNT).filter_map(Square::from_index)
}

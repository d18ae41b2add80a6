//! Coordinate/orientation mapping.
//!
//! The display renders the session's own colour nearest the viewer, so a
//! session playing Black sees the board mirrored in both axes. This
//! module is the single place where that flip happens: canonical
//! (file, rank) squares map to display (row, col) addresses and back,
//! and the pair of functions is a true inverse for both colours.

use crate::board::piece::Colour;
use crate::board::square::Square;

/// A display-grid cell the actuation collaborator can click: row 0 is
/// the far edge of the display, column 0 the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardAddress {
    pub row: u8,
    pub col: u8,
}

/// Maps a canonical square to its display address for the given
/// session colour.
pub const fn to_address(square: Square, colour: Colour) -> BoardAddress {
    match colour {
        Colour::White => BoardAddress {
            row: 7 - square.rank(),
            col: square.file(),
        },
        // Black sees both axes mirrored.
        Colour::Black => BoardAddress {
            row: square.rank(),
            col: 7 - square.file(),
        },
    }
}

/// Maps a display address back to its canonical square for the given
/// session colour. Returns `None` if either index is out of range.
pub const fn to_square(address: BoardAddress, colour: Colour) -> Option<Square> {
    if address.row > 7 || address.col > 7 {
        return None;
    }
    match colour {
        Colour::White => Square::new(address.col, 7 - address.row),
        Colour::Black => Square::new(7 - address.col, address.row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::all_squares;

    #[test]
    fn map_unmap_is_the_identity_for_both_colours() {
        for colour in [Colour::White, Colour::Black] {
            for sq in all_squares() {
                let addr = to_address(sq, colour);
                assert_eq!(to_square(addr, colour), Some(sq), "{sq} as {colour:?}");
            }
        }
    }

    #[test]
    fn white_orientation_matches_display() {
        // a1 sits at the bottom-left of White's display.
        let a1 = Square::from_algebraic("a1").unwrap();
        assert_eq!(to_address(a1, Colour::White), BoardAddress { row: 7, col: 0 });
        // h8 at the top-right.
        let h8 = Square::from_algebraic("h8").unwrap();
        assert_eq!(to_address(h8, Colour::White), BoardAddress { row: 0, col: 7 });
    }

    #[test]
    fn black_orientation_mirrors_both_axes() {
        // From Black's side a1 sits at the top-right.
        let a1 = Square::from_algebraic("a1").unwrap();
        assert_eq!(to_address(a1, Colour::Black), BoardAddress { row: 0, col: 7 });
        let h8 = Square::from_algebraic("h8").unwrap();
        assert_eq!(to_address(h8, Colour::Black), BoardAddress { row: 7, col: 0 });
    }

    #[test]
    fn unmap_rejects_out_of_range() {
        assert_eq!(to_square(BoardAddress { row: 8, col: 0 }, Colour::White), None);
        assert_eq!(to_square(BoardAddress { row: 0, col: 8 }, Colour::Black), None);
    }
}

use thiserror::Error;

use crate::core::Colour;

/******************************************\
|==========================================|
|                  Piece                   |
|==========================================|
\******************************************/

/// # Piece representation
///
/// - Represents the twelve (colour, piece type) pairs, interleaved so that
///   `piece >> 1` is the piece type and `piece & 1` the colour

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    WhitePawn, BlackPawn, WhiteKnight, BlackKnight, WhiteBishop, BlackBishop, WhiteRook, BlackRook, WhiteQueen, BlackQueen, WhiteKing, BlackKing
}

impl Piece {
    /// Number of elements in the Piece enum
    pub const NUM: usize = 12;
}

crate::impl_from_to_primitive!(Piece);
crate::impl_enum_iter!(Piece);

/******************************************\
|==========================================|
|                Piece Type                |
|==========================================|
\******************************************/

/// # Piece Type representation
///
/// - Represents the different chess piece types

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
   Pawn, Knight, Bishop, Rook, Queen, King,
}

impl PieceType {
    /// Number of elements in the PieceType enum
    pub const NUM: usize = 6;

    /// Promotion targets, strongest first
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];
}

crate::impl_from_to_primitive!(PieceType);
crate::impl_enum_iter!(PieceType);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

/// Piece codes indexed by `Piece` discriminant
const PIECE_STR: &[u8; Piece::NUM] = b"PpNnBbRrQqKk";

impl Piece {
    /// Returns the piece type of the piece
    #[inline]
    pub const fn pt(self) -> PieceType {
        unsafe { PieceType::from_unchecked(self as u8 >> 1) }
    }

    /// Returns the colour of the piece
    #[inline]
    pub const fn colour(self) -> Colour {
        unsafe { Colour::from_unchecked(self as u8 & 1) }
    }

    /// Combines a colour and piece type pair to create a piece
    ///
    /// ## Examples
    ///
    /// ```
    /// use bitchess::core::{Piece, Colour, PieceType};
    ///
    /// assert_eq!(Piece::from_parts(Colour::White, PieceType::Pawn), Piece::WhitePawn);
    /// assert_eq!(Piece::from_parts(Colour::Black, PieceType::King), Piece::BlackKing);
    /// ```
    #[inline]
    pub const fn from_parts(colour: Colour, piece_type: PieceType) -> Self {
        unsafe { Piece::from_unchecked(colour as u8 | (piece_type as u8) << 1) }
    }

    /// The single-letter code of the piece, uppercase for white
    #[inline]
    pub const fn to_char(self) -> char {
        PIECE_STR[self as usize] as char
    }

    /// Parses a single-letter piece code (`KQRBNP` white, `kqrbnp` black)
    pub fn from_char(c: char) -> Result<Self, ParsePieceError> {
        let index = PIECE_STR
            .iter()
            .position(|&b| b as char == c)
            .ok_or(ParsePieceError::InvalidChar(c))?;

        Ok(unsafe { Piece::from_unchecked(index as u8) })
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let piece = Piece::from_parts(Colour::Black, *self);
        write!(f, "{}", piece.to_char())
    }
}

/******************************************\
|==========================================|
|                Parse Piece               |
|==========================================|
\******************************************/

impl std::str::FromStr for Piece {
    type Err = ParsePieceError;

    /// Parse the piece character into a piece, with error checkings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_char(c),
            _ => Err(ParsePieceError::InvalidLength(s.len())),
        }
    }
}

/******************************************\
|==========================================|
|            Piece Parse Error             |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePieceError {
    #[error("Invalid length for piece string: {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid character for piece string: '{0}', expected one of \"PNBRQKpnbrqk\"")]
    InvalidChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_type_extraction() {
        assert_eq!(Piece::WhitePawn.pt(), PieceType::Pawn);
        assert_eq!(Piece::BlackKnight.pt(), PieceType::Knight);
        assert_eq!(Piece::WhiteBishop.pt(), PieceType::Bishop);
        assert_eq!(Piece::BlackRook.pt(), PieceType::Rook);
        assert_eq!(Piece::WhiteQueen.pt(), PieceType::Queen);
        assert_eq!(Piece::BlackKing.pt(), PieceType::King);
    }

    #[test]
    fn test_piece_colour_extraction() {
        for piece in Piece::iter() {
            let expected = if piece.to_char().is_ascii_uppercase() {
                Colour::White
            } else {
                Colour::Black
            };
            assert_eq!(piece.colour(), expected);
        }
    }

    #[test]
    fn test_piece_conversion_roundtrip() {
        for piece in Piece::iter() {
            assert_eq!(Piece::from_parts(piece.colour(), piece.pt()), piece);
            assert_eq!(Piece::from_char(piece.to_char()), Ok(piece));
        }
    }

    #[test]
    fn test_piece_from_str_valid() {
        assert_eq!("P".parse::<Piece>(), Ok(Piece::WhitePawn));
        assert_eq!("N".parse::<Piece>(), Ok(Piece::WhiteKnight));
        assert_eq!("q".parse::<Piece>(), Ok(Piece::BlackQueen));
        assert_eq!("k".parse::<Piece>(), Ok(Piece::BlackKing));
    }

    #[test]
    fn test_piece_from_str_invalid() {
        assert_eq!("".parse::<Piece>(), Err(ParsePieceError::InvalidLength(0)));
        assert_eq!("Pn".parse::<Piece>(), Err(ParsePieceError::InvalidLength(2)));
        assert_eq!("X".parse::<Piece>(), Err(ParsePieceError::InvalidChar('X')));
        assert_eq!("x".parse::<Piece>(), Err(ParsePieceError::InvalidChar('x')));
        assert_eq!("1".parse::<Piece>(), Err(ParsePieceError::InvalidChar('1')));
    }

    #[test]
    fn test_piece_type_display() {
        assert_eq!(PieceType::Queen.to_string(), "q");
        assert_eq!(PieceType::Knight.to_string(), "n");
        assert_eq!(Piece::WhiteRook.to_string(), "R");
    }
}

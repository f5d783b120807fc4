use super::types::Colour;
use thiserror::Error;

/******************************************\
|==========================================|
|                 Squares                  |
|==========================================|
\******************************************/

/// # Square representation
///
/// - Represents the squares of a chess board as bit indices into a [`Bitboard`](super::Bitboard)
/// - Bit 0 is h1 and bit 7 is a1, so files run from h to a inside each rank byte.
///   Every mask constant in the crate is derived from this ordering.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Square {
    H1, G1, F1, E1, D1, C1, B1, A1,
    H2, G2, F2, E2, D2, C2, B2, A2,
    H3, G3, F3, E3, D3, C3, B3, A3,
    H4, G4, F4, E4, D4, C4, B4, A4,
    H5, G5, F5, E5, D5, C5, B5, A5,
    H6, G6, F6, E6, D6, C6, B6, A6,
    H7, G7, F7, E7, D7, C7, B7, A7,
    H8, G8, F8, E8, D8, C8, B8, A8,
}

impl Square {
    /// Number of elements in the Square enum
    pub const NUM: usize = 64;
}

crate::impl_from_to_primitive!(Square);
crate::impl_enum_iter!(Square);

/******************************************\
|==========================================|
|                  Ranks                   |
|==========================================|
\******************************************/

/// # Ranks representation
///
/// - Represents the ranks of a chess board

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum Rank {
    Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8,
}

impl Rank {
    /// Number of elements in the Rank enum
    pub const NUM: usize = 8;
}

crate::impl_from_to_primitive!(Rank);
crate::impl_enum_iter!(Rank);

/******************************************\
|==========================================|
|                  Files                   |
|==========================================|
\******************************************/

/// # Files representation
///
/// - Represents the files of a chess board, `FileA` first.
/// - Note the bit position of a file inside its rank byte is `7 - file`.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

impl File {
    /// Number of elements in the File enum
    pub const NUM: usize = 8;
}

crate::impl_from_to_primitive!(File);
crate::impl_enum_iter!(File);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Square {
    /// Converts a raw bit index into a square, `None` when outside `0..64`
    ///
    /// ## Examples
    ///
    /// ```
    /// use bitchess::core::Square;
    ///
    /// assert_eq!(Square::new(0), Some(Square::H1));
    /// assert_eq!(Square::new(63), Some(Square::A8));
    /// assert_eq!(Square::new(64), None);
    /// ```
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < Self::NUM {
            Some(unsafe { Self::from_unchecked(index) })
        } else {
            None
        }
    }

    /// Returns the rank of a square
    ///
    /// ## Examples
    ///
    /// ```
    /// use bitchess::core::{Square, Rank};
    ///
    /// assert_eq!(Square::A1.rank(), Rank::Rank1);
    /// assert_eq!(Square::E4.rank(), Rank::Rank4);
    /// assert_eq!(Square::H8.rank(), Rank::Rank8);
    /// ```
    #[inline]
    pub const fn rank(&self) -> Rank {
        unsafe { Rank::from_unchecked((*self as u8) >> 3) }
    }

    /// Returns the file of a square
    ///
    /// ## Examples
    ///
    /// ```
    /// use bitchess::core::{Square, File};
    ///
    /// assert_eq!(Square::A1.file(), File::FileA);
    /// assert_eq!(Square::E4.file(), File::FileE);
    /// assert_eq!(Square::H8.file(), File::FileH);
    /// ```
    #[inline]
    pub const fn file(&self) -> File {
        unsafe { File::from_unchecked(7 - ((*self as u8) & 0b111)) }
    }

    /// Combines a pair of file and rank to create a square
    ///
    /// ## Examples
    ///
    /// ```
    /// use bitchess::core::{Square, File, Rank};
    ///
    /// assert_eq!(Square::from_parts(File::FileA, Rank::Rank1), Square::A1);
    /// assert_eq!(Square::from_parts(File::FileH, Rank::Rank1), Square::H1);
    /// ```
    #[inline]
    pub const fn from_parts(file: File, rank: Rank) -> Self {
        let index = ((rank as u8) << 3) + (7 - file as u8);
        unsafe { Self::from_unchecked(index) }
    }
}

impl Rank {
    /// Flips rank along the middle of the board
    pub const fn flip(&self) -> Self {
        unsafe { Self::from_unchecked(7 - (*self as u8)) }
    }

    /// Returns the rank relative to the perspective of `col`
    pub const fn relative(&self, col: Colour) -> Self {
        match col {
            Colour::White => *self,
            Colour::Black => self.flip(),
        }
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for File {
    /// Displays the file in the form of its chess board representation (FileA => 'a')
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'a' + (*self as u8)) as char)
    }
}

impl std::fmt::Display for Rank {
    /// Displays the rank in the form of its chess board representation (Rank1 => '1')
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'1' + (*self as u8)) as char)
    }
}

impl std::fmt::Display for Square {
    /// Displays the square in coordinate form (Square::A1 => "a1")
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/******************************************\
|==========================================|
|              Parsing Strings             |
|==========================================|
\******************************************/

impl std::str::FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file_char), None) = (chars.next(), chars.next()) else {
            return Err(ParseFileError::InvalidLength(s.len()));
        };

        match file_char {
            'a'..='h' => unsafe { Ok(File::from_unchecked(file_char as u8 - b'a')) },
            _ => Err(ParseFileError::InvalidChar(file_char)),
        }
    }
}

impl std::str::FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank_char), None) = (chars.next(), chars.next()) else {
            return Err(ParseRankError::InvalidLength(s.len()));
        };

        match rank_char {
            '1'..='8' => unsafe { Ok(Rank::from_unchecked(rank_char as u8 - b'1')) },
            _ => Err(ParseRankError::InvalidChar(rank_char)),
        }
    }
}

impl std::str::FromStr for Square {
    type Err = ParseSquareError;

    /// Parses a coordinate such as `"e4"` into a square
    ///
    /// ## Examples
    ///
    /// ```
    /// use bitchess::core::{Square, ParseSquareError};
    ///
    /// assert_eq!("e4".parse::<Square>(), Ok(Square::E4));
    /// assert_eq!("e9".parse::<Square>(), Err(ParseSquareError::InvalidRankChar('9')));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(ParseSquareError::InvalidLength(s.len()));
        };

        let file = file_char
            .to_string()
            .parse::<File>()
            .map_err(|_| ParseSquareError::InvalidFileChar(file_char))?;
        let rank = rank_char
            .to_string()
            .parse::<Rank>()
            .map_err(|_| ParseSquareError::InvalidRankChar(rank_char))?;

        Ok(Square::from_parts(file, rank))
    }
}

/******************************************\
|==========================================|
|            Square Parse Errors           |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFileError {
    #[error("Invalid length for file string: {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid character for file string: '{0}', expected 'a'-'h'")]
    InvalidChar(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRankError {
    #[error("Invalid length for rank string: {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid character for rank string: '{0}', expected '1'-'8'")]
    InvalidChar(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSquareError {
    #[error("Invalid length for square string: {0}, expected 2")]
    InvalidLength(usize),
    #[error("Invalid character for file string: '{0}', expected 'a'-'h'")]
    InvalidFileChar(char),
    #[error("Invalid character for rank string: '{0}', expected '1'-'8'")]
    InvalidRankChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

use thiserror::Error;

use super::Position;
use crate::core::*;

/******************************************\
|==========================================|
|           Position Description           |
|==========================================|
\******************************************/

/// Code used for an empty square in [`PositionDescription::squares`]
pub const EMPTY_SQUARE: char = 'x';

/// # Position Description
///
/// The external, array-based form of a position: one piece code per square indexed by bit
/// (`0` is h1, `7` is a1, `63` is a8), using `PNBRQK` for white, `pnbrqk` for black and
/// [`EMPTY_SQUARE`] for nothing, together with the side to move, the four castling flags
/// and the en-passant target index.
///
/// Nothing is checked until the description is turned into a [`Position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionDescription {
    pub squares: [char; Square::NUM],

    pub side_to_move: Colour,

    pub white_king_side: bool,

    pub white_queen_side: bool,

    pub black_king_side: bool,

    pub black_queen_side: bool,

    pub en_passant: Option<u8>,
}

impl Default for PositionDescription {
    /// An empty board, white to move, no rights
    fn default() -> Self {
        Self {
            squares: [EMPTY_SQUARE; Square::NUM],
            side_to_move: Colour::White,
            white_king_side: false,
            white_queen_side: false,
            black_king_side: false,
            black_queen_side: false,
            en_passant: None,
        }
    }
}

impl PositionDescription {
    /// The standard starting position
    pub fn start() -> Self {
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

        let mut desc = Self::default();

        for (file, pt) in File::iter().zip(BACK_RANK) {
            let white = Square::from_parts(file, Rank::Rank1);
            let black = Square::from_parts(file, Rank::Rank8);

            desc.squares[white.index()] = Piece::from_parts(Colour::White, pt).to_char();
            desc.squares[black.index()] = Piece::from_parts(Colour::Black, pt).to_char();
            desc.squares[white.index() + 8] = Piece::WhitePawn.to_char();
            desc.squares[black.index() - 8] = Piece::BlackPawn.to_char();
        }

        desc.set_castling(Castling::ALL);
        desc
    }

    /// The four flags packed into a [`Castling`]
    pub fn castling(&self) -> Castling {
        let flags = [
            self.white_king_side,
            self.white_queen_side,
            self.black_king_side,
            self.black_queen_side,
        ];

        Castling::RIGHTS
            .into_iter()
            .zip(flags)
            .filter(|&(_, held)| held)
            .fold(Castling::NONE, |acc, (right, _)| acc | right)
    }

    pub fn set_castling(&mut self, castling: Castling) {
        self.white_king_side = castling.has(Castling::WK);
        self.white_queen_side = castling.has(Castling::WQ);
        self.black_king_side = castling.has(Castling::BK);
        self.black_queen_side = castling.has(Castling::BQ);
    }
}

/******************************************\
|==========================================|
|                Ingestion                 |
|==========================================|
\******************************************/

impl Position {
    /// Builds a position from its description, rejecting anything that is not a legal
    /// chess position the move generator can rely on.
    ///
    /// ## Errors
    ///
    /// - an unknown piece code
    /// - a side without exactly one king
    /// - a pawn on the first or eighth rank
    /// - a castling flag whose king or rook is not on its home square
    /// - an en-passant index outside `0..64`, on the wrong rank for the side to move, on an
    ///   occupied square, or without the pushed pawn in front of it
    /// - the side not to move being in check
    pub fn from_description(desc: &PositionDescription) -> Result<Position, PositionError> {
        let mut pos = Position::empty();

        for sq in Square::iter() {
            let code = desc.squares[sq.index()];
            if code == EMPTY_SQUARE {
                continue;
            }

            let piece = Piece::from_char(code)
                .map_err(|_| PositionError::InvalidPieceCode { square: sq, code })?;
            pos.add_piece(piece, sq);
        }

        pos.stm = desc.side_to_move;

        pos.validate_kings()?;
        pos.validate_pawns()?;

        pos.castling = desc.castling();
        pos.validate_castling()?;

        pos.enpassant = desc.en_passant.map(|index| pos.validate_en_passant(index)).transpose()?;

        if pos.is_square_attacked(pos.ksq(!pos.stm), pos.stm) {
            return Err(PositionError::OpponentInCheck);
        }

        Ok(pos)
    }

    /// One piece code per square, [`EMPTY_SQUARE`] where nothing stands
    pub fn to_squares(&self) -> [char; Square::NUM] {
        let mut squares = [EMPTY_SQUARE; Square::NUM];

        for sq in Square::iter() {
            if let Some(piece) = self.on(sq) {
                squares[sq.index()] = piece.to_char();
            }
        }

        squares
    }

    pub fn to_description(&self) -> PositionDescription {
        let mut desc = PositionDescription {
            squares: self.to_squares(),
            side_to_move: self.stm,
            en_passant: self.enpassant.map(|sq| sq as u8),
            ..PositionDescription::default()
        };
        desc.set_castling(self.castling);
        desc
    }

    fn validate_kings(&self) -> Result<(), PositionError> {
        for colour in Colour::iter() {
            match self.piece_bb(colour, PieceType::King).count_bits() {
                0 => return Err(PositionError::MissingKing(colour)),
                1 => {}
                count => return Err(PositionError::TooManyKings { colour, count }),
            }
        }
        Ok(())
    }

    fn validate_pawns(&self) -> Result<(), PositionError> {
        let pawns = self.piece_bb(Colour::White, PieceType::Pawn)
            | self.piece_bb(Colour::Black, PieceType::Pawn);

        match (pawns & (Bitboard::RANK_1 | Bitboard::RANK_8)).lsb() {
            Some(sq) => Err(PositionError::PawnOnBackRank(sq)),
            None => Ok(()),
        }
    }

    fn validate_castling(&self) -> Result<(), PositionError> {
        for right in Castling::RIGHTS {
            if !self.castling.has(right) {
                continue;
            }

            let colour = if Castling::WHITE_CASTLING.has(right) {
                Colour::White
            } else {
                Colour::Black
            };

            let king = Piece::from_parts(colour, PieceType::King);
            let rook = Piece::from_parts(colour, PieceType::Rook);

            let king_home = self.on(right.king_home()) == Some(king);
            let rook_home = self.on(right.rook_home()) == Some(rook);

            if !(king_home && rook_home) {
                return Err(PositionError::InconsistentCastlingRight(right));
            }
        }
        Ok(())
    }

    /// The target must be the square a pawn of the side not to move just passed over
    fn validate_en_passant(&self, index: u8) -> Result<Square, PositionError> {
        let sq = Square::new(index).ok_or(PositionError::EnPassantOutOfRange(index))?;
        let them = !self.stm;

        let expected_rank = Rank::Rank6.relative(self.stm);
        let pawn_sq = match self.stm {
            Colour::White => sq.bb() >> 8,
            Colour::Black => sq.bb() << 8,
        };

        let valid = sq.rank() == expected_rank
            && self.on(sq).is_none()
            && (pawn_sq & self.piece_bb(them, PieceType::Pawn)).is_occupied();

        if valid { Ok(sq) } else { Err(PositionError::InvalidEnPassant(sq)) }
    }
}

impl TryFrom<PositionDescription> for Position {
    type Error = PositionError;

    fn try_from(desc: PositionDescription) -> Result<Self, Self::Error> {
        Position::from_description(&desc)
    }
}

/******************************************\
|==========================================|
|              Position Error              |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    #[error("Invalid piece code '{code}' on square {square}")]
    InvalidPieceCode { square: Square, code: char },
    #[error("No {0:?} king on the board")]
    MissingKing(Colour),
    #[error("Found {count} {colour:?} kings, expected exactly one")]
    TooManyKings { colour: Colour, count: u32 },
    #[error("Pawn on back rank square {0}")]
    PawnOnBackRank(Square),
    #[error("Castling right '{0}' requires the king and rook on their home squares")]
    InconsistentCastlingRight(Castling),
    #[error("En passant index {0} is outside 0..64")]
    EnPassantOutOfRange(u8),
    #[error("{0} is not a valid en passant target for the side to move")]
    InvalidEnPassant(Square),
    #[error("The side not to move is in check")]
    OpponentInCheck,
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

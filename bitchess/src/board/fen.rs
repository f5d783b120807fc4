use thiserror::Error;

use super::{Position, PositionDescription, PositionError};
use crate::core::*;

/******************************************\
|==========================================|
|            Useful fen strings            |
|==========================================|
\******************************************/

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const TRICKY_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/******************************************\
|==========================================|
|               Parse Fen                  |
|==========================================|
\******************************************/

impl PositionDescription {
    /// Converts a FEN string into a description.
    ///
    /// Four fields are required. The halfmove clock and fullmove number may follow and are
    /// checked for well-formedness only. Only the syntax is checked here: whether the
    /// result is a legal position is decided by [`Position::from_description`].
    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let mut desc = PositionDescription::default();
        let mut parts = fen.split_whitespace();

        let piece_placement = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        desc.parse_piece_placement(piece_placement)?;

        let side_to_move = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        desc.side_to_move = parse_side_to_move(side_to_move)?;

        let castling = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        desc.set_castling(parse_castling(castling)?);

        let enpassant = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        desc.en_passant = parse_enpassant(enpassant)?.map(|sq| sq as u8);

        if let Some(fifty_move_token) = parts.next() {
            parse_fifty_move(fifty_move_token)?;

            let full_move_token = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
            parse_full_move(full_move_token)?;
        }

        if parts.next().is_some() {
            return Err(FenParseError::InvalidNumberOfFields);
        }

        Ok(desc)
    }

    fn parse_piece_placement(&mut self, piece_placement: &str) -> Result<(), FenParseError> {
        let mut rank_iter = Rank::iter().rev();
        let mut rank = rank_iter
            .next()
            .ok_or_else(|| FenParseError::InvalidRankFormat("Board has no ranks?".to_string()))?;
        let mut file: u8 = 0;

        for (i, char) in piece_placement.chars().enumerate() {
            match char {
                '/' => {
                    (rank, file) = parse_separator(&mut rank_iter, rank, file)?;
                }
                skip if skip.is_ascii_digit() => {
                    file += parse_skip(skip, i, rank, file)?;
                }
                piece_char => {
                    self.parse_piece(piece_char, rank, file)?;
                    file += 1;
                }
            }
        }

        if file != 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Final rank {:?} ended prematurely at file index {} (expected 8)",
                rank, file
            )));
        }

        if rank_iter.next().is_some() {
            return Err(FenParseError::InvalidRankFormat(
                "Not enough ranks specified in FEN string (expected 8)".to_string(),
            ));
        }

        Ok(())
    }

    fn parse_piece(&mut self, piece: char, rank: Rank, file: u8) -> Result<(), FenParseError> {
        if file >= 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Piece placement '{}' attempted beyond file H (index >= 8) on rank {:?}",
                piece, rank
            )));
        }

        let piece = Piece::from_char(piece).map_err(|_| FenParseError::InvalidPiecePlacementChar(piece))?;

        // Safety: file < 8 was checked above
        let sq = Square::from_parts(unsafe { File::from_unchecked(file) }, rank);
        self.squares[sq.index()] = piece.to_char();

        Ok(())
    }
}

fn parse_separator(
    rank_iter: &mut impl DoubleEndedIterator<Item = Rank>,
    rank: Rank,
    file: u8,
) -> Result<(Rank, u8), FenParseError> {
    if file != 8 {
        return Err(FenParseError::InvalidRankFormat(format!(
            "Rank {:?} ended prematurely at file index {} (expected 8) before '/'",
            rank, file
        )));
    }

    let next_rank = rank_iter.next().ok_or_else(|| {
        FenParseError::InvalidRankFormat(format!(
            "Too many rank separators ('/') found after completing rank {:?}",
            rank
        ))
    })?;

    Ok((next_rank, 0))
}

fn parse_skip(skip: char, idx: usize, rank: Rank, file: u8) -> Result<u8, FenParseError> {
    let skip_val = skip.to_digit(10).unwrap_or(0);

    if !(1..=8).contains(&skip_val) {
        return Err(FenParseError::InvalidRankFormat(format!(
            "Invalid skip digit '{}' (must be 1-8) at char index {}",
            skip, idx
        )));
    }

    let skip_u8 = skip_val as u8;
    if file + skip_u8 > 8 {
        return Err(FenParseError::InvalidRankFormat(format!(
            "Skip value {} exceeds rank length at file index {} on rank {:?}",
            skip_u8, file, rank
        )));
    }

    Ok(skip_u8)
}

fn parse_side_to_move(side_to_move: &str) -> Result<Colour, FenParseError> {
    match side_to_move {
        "w" => Ok(Colour::White),
        "b" => Ok(Colour::Black),
        _ => Err(FenParseError::InvalidSideToMove(side_to_move.to_string())),
    }
}

fn parse_castling(castling: &str) -> Result<Castling, FenParseError> {
    let mut rights = Castling::NONE;

    if castling == "-" {
        return Ok(rights);
    }

    for c in castling.chars() {
        match c {
            'K' => rights.set(Castling::WK),
            'Q' => rights.set(Castling::WQ),
            'k' => rights.set(Castling::BK),
            'q' => rights.set(Castling::BQ),
            _ => return Err(FenParseError::InvalidCastlingChar(c)),
        }
    }

    Ok(rights)
}

fn parse_enpassant(enpassant: &str) -> Result<Option<Square>, FenParseError> {
    if enpassant == "-" {
        return Ok(None);
    }

    let square = enpassant
        .parse::<Square>()
        .map_err(|_| FenParseError::InvalidEnPassantSquare(enpassant.to_string()))?;

    if ![Rank::Rank3, Rank::Rank6].contains(&square.rank()) {
        return Err(FenParseError::InvalidEnPassantSquare(format!(
            "{square} is not a valid enpassant square"
        )));
    }

    Ok(Some(square))
}

fn parse_fifty_move(fifty_move_token: &str) -> Result<u8, FenParseError> {
    fifty_move_token
        .parse::<u8>()
        .map_err(|_| FenParseError::InvalidHalfmoveClock(fifty_move_token.to_string()))
}

fn parse_full_move(full_move_token: &str) -> Result<u16, FenParseError> {
    let full_move_number = full_move_token
        .parse::<u16>()
        .map_err(|_| FenParseError::InvalidFullmoveNumber(full_move_token.to_string()))?;

    if full_move_number == 0 {
        return Err(FenParseError::InvalidFullmoveNumber(format!(
            "Fullmove number cannot be 0, found: {}",
            full_move_token
        )));
    }

    Ok(full_move_number)
}

/******************************************\
|==========================================|
|              Position Fen                |
|==========================================|
\******************************************/

impl Position {
    /// Parses and validates a FEN string
    pub fn from_fen(fen: &str) -> Result<Position, FenParseError> {
        let desc = PositionDescription::from_fen(fen)?;
        Ok(Position::from_description(&desc)?)
    }

    /// The FEN string of the position. Move clocks are not tracked, so the last two
    /// fields are always `0 1`.
    pub fn fen(&self) -> String {
        let mut fen = String::new();

        for rank in Rank::iter().rev() {
            let mut empty_count = 0;

            for file in File::iter() {
                match self.on(Square::from_parts(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }

            if rank != Rank::Rank1 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.stm {
            Colour::White => 'w',
            Colour::Black => 'b',
        });

        fen.push(' ');
        fen.push_str(&self.castling.to_string());

        fen.push(' ');
        match self.enpassant {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(" 0 1");
        fen
    }
}

impl std::str::FromStr for Position {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

/******************************************\
|==========================================|
|             Fen Parse Errors             |
|==========================================|
\******************************************/

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum FenParseError {
    #[error("FEN string must have 4 or 6 fields separated by spaces")]
    InvalidNumberOfFields,
    #[error("Invalid character in FEN piece placement: '{0}'")]
    InvalidPiecePlacementChar(char),
    #[error("Invalid rank format in FEN piece placement: {0}")]
    InvalidRankFormat(String),
    #[error("Invalid side to move in FEN: '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),
    #[error("Invalid character in FEN castling availability: '{0}'")]
    InvalidCastlingChar(char),
    #[error("Invalid en passant target square in FEN: '{0}'")]
    InvalidEnPassantSquare(String),
    #[error("Invalid halfmove clock value in FEN: '{0}'")]
    InvalidHalfmoveClock(String),
    #[error("Invalid fullmove number value in FEN: '{0}'")]
    InvalidFullmoveNumber(String),
    #[error("Illegal position: {0}")]
    Position(#[from] PositionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::EMPTY_SQUARE;

    #[test]
    fn test_parse_start_fen() {
        let pos = Position::from_fen(START_FEN).unwrap();
        assert_eq!(pos.on(Square::A1), Some(Piece::WhiteRook));
        assert_eq!(pos.on(Square::E1), Some(Piece::WhiteKing));
        assert_eq!(pos.on(Square::H8), Some(Piece::BlackRook));
        assert_eq!(pos.on(Square::D8), Some(Piece::BlackQueen));
        assert_eq!(pos.on(Square::E4), None);
        assert_eq!(pos.stm(), Colour::White);
        assert_eq!(pos.castling(), Castling::ALL);
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.fen(), START_FEN);
        assert_eq!(PositionDescription::from_fen(START_FEN).unwrap(), PositionDescription::start());
    }

    #[test]
    fn test_parse_tricky_fen() {
        let pos = Position::from_fen(TRICKY_FEN).unwrap();
        assert_eq!(pos.on(Square::A8), Some(Piece::BlackRook));
        assert_eq!(pos.on(Square::E8), Some(Piece::BlackKing));
        assert_eq!(pos.on(Square::F3), Some(Piece::WhiteQueen));
        assert_eq!(pos.on(Square::C3), Some(Piece::WhiteKnight));
        assert_eq!(pos.on(Square::H3), Some(Piece::BlackPawn));
        assert_eq!(pos.fen(), TRICKY_FEN);
    }

    #[test]
    fn test_four_field_fen() {
        let desc = PositionDescription::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6").unwrap();
        assert_eq!(desc.en_passant, Some(Square::D6 as u8));
        assert_eq!(desc.squares[Square::D5.index()], 'p');
        assert_eq!(desc.squares[Square::A1.index()], EMPTY_SQUARE);
        assert_eq!(desc.castling(), Castling::NONE);

        let pos = Position::from_description(&desc).unwrap();
        assert_eq!(pos.fen(), "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    }

    #[test]
    fn test_fen_invalid_piece() {
        let fen = "rnbqkbnr/ppppzppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(
            PositionDescription::from_fen(fen),
            Err(FenParseError::InvalidPiecePlacementChar('z'))
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_short() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = PositionDescription::from_fen(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("ended prematurely at file index 7")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_long() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = PositionDescription::from_fen(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(result.unwrap_err().to_string().contains("attempted beyond file H"));

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/P6P1/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            PositionDescription::from_fen(fen),
            Err(FenParseError::InvalidRankFormat(_))
        ));
    }

    #[test]
    fn test_fen_fields() {
        assert_eq!(
            PositionDescription::from_fen("8/8/8/8/8/8/8/8"),
            Err(FenParseError::InvalidNumberOfFields)
        );
        assert_eq!(
            PositionDescription::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenParseError::InvalidSideToMove("x".to_string()))
        );
        assert_eq!(
            PositionDescription::from_fen("4k3/8/8/8/8/8/8/4K3 w KX - 0 1"),
            Err(FenParseError::InvalidCastlingChar('X'))
        );
        assert!(matches!(
            PositionDescription::from_fen("4k3/8/8/8/8/8/8/4K3 w - e4 0 1"),
            Err(FenParseError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            PositionDescription::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            Err(FenParseError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            PositionDescription::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 0"),
            Err(FenParseError::InvalidFullmoveNumber(_))
        ));
        assert_eq!(
            PositionDescription::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra"),
            Err(FenParseError::InvalidNumberOfFields)
        );
    }

    #[test]
    fn test_fen_illegal_position() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenParseError::Position(PositionError::MissingKing(Colour::Black)))
        );
        assert!("4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Position>().is_ok());
    }
}

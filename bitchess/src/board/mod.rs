pub mod description;
pub mod fen;
pub mod mask;
pub mod movegen;
pub mod movement;

pub use description::{EMPTY_SQUARE, PositionDescription, PositionError};
pub use fen::{FenParseError, START_FEN, TRICKY_FEN};
pub use movegen::{
    MoveList, bishop_attacks, king_attack, knight_attack, pawn_attack, pawn_attacks,
    queen_attacks, rook_attacks,
};
pub use movement::MoveError;

use crate::core::*;

/******************************************\
|==========================================|
|                Constants                 |
|==========================================|
\******************************************/

pub const MAX_MOVES: usize = 256;

/******************************************\
|==========================================|
|                 Position                 |
|==========================================|
\******************************************/

/// # Position State
///
/// Twelve disjoint piece bitboards (one per colour and piece type), a per-square piece table
/// kept in step with them, the side to move, castling rights and the en-passant target.
///
/// A position is only ever built from a validated [`PositionDescription`] and is then
/// advanced in place with [`Position::apply_move`]. It is `Copy`, so callers exploring
/// several lines (perft, search) work on independent copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; Square::NUM],

    pieces: [Bitboard; Piece::NUM],

    occupied: [Bitboard; Colour::NUM],

    stm: Colour,

    castling: Castling,

    enpassant: Option<Square>,
}

/******************************************\
|==========================================|
|           Basic Implementation           |
|==========================================|
\******************************************/

impl Default for Position {
    /// The standard starting position
    fn default() -> Position {
        Position::from_description(&PositionDescription::start())
            .unwrap_or_else(|_| unreachable!("the starting position is valid"))
    }
}

impl Position {
    /// An empty board with white to move and no rights, only used while ingesting a description
    pub(crate) const fn empty() -> Position {
        Position {
            board: [None; Square::NUM],
            pieces: [Bitboard::EMPTY; Piece::NUM],
            occupied: [Bitboard::EMPTY; Colour::NUM],
            stm: Colour::White,
            castling: Castling::NONE,
            enpassant: None,
        }
    }

    #[inline]
    pub fn on(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    #[inline]
    pub fn pieces_bb(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    #[inline]
    pub fn piece_bb(&self, col: Colour, pt: PieceType) -> Bitboard {
        self.pieces_bb(Piece::from_parts(col, pt))
    }

    #[inline]
    pub fn occupied_bb(&self, colour: Colour) -> Bitboard {
        self.occupied[colour.index()]
    }

    #[inline]
    pub fn all_occupied_bb(&self) -> Bitboard {
        self.occupied_bb(Colour::White) | self.occupied_bb(Colour::Black)
    }

    /// Bishops and queens of `col`
    #[inline]
    pub fn diagonal_sliders(&self, col: Colour) -> Bitboard {
        self.piece_bb(col, PieceType::Bishop) | self.piece_bb(col, PieceType::Queen)
    }

    /// Rooks and queens of `col`
    #[inline]
    pub fn orthogonal_sliders(&self, col: Colour) -> Bitboard {
        self.piece_bb(col, PieceType::Rook) | self.piece_bb(col, PieceType::Queen)
    }

    #[inline]
    pub fn stm(&self) -> Colour {
        self.stm
    }

    #[inline]
    pub fn castling(&self) -> Castling {
        self.castling
    }

    /// The square passed over by the double pawn push made on the previous ply
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.enpassant
    }

    /// Square of the king of `col`
    #[inline]
    pub fn ksq(&self, col: Colour) -> Square {
        debug_assert!(
            self.piece_bb(col, PieceType::King).is_singleton(),
            "King must exist for colour {:?}",
            col
        );

        self.piece_bb(col, PieceType::King).lsb_unchecked()
    }

    /// Pieces of colour `by` attacking `to`, with sliders blocked by `occ`
    pub fn attackers_to(&self, to: Square, by: Colour, occ: Bitboard) -> Bitboard {
        use PieceType::*;
        pawn_attack(!by, to) & self.piece_bb(by, Pawn)
            | knight_attack(to) & self.piece_bb(by, Knight)
            | bishop_attacks(to, occ) & self.diagonal_sliders(by)
            | rook_attacks(to, occ) & self.orthogonal_sliders(by)
            | king_attack(to) & self.piece_bb(by, King)
    }

    #[inline]
    pub fn is_square_attacked(&self, sq: Square, by: Colour) -> bool {
        self.attackers_to(sq, by, self.all_occupied_bb()).is_occupied()
    }

    /// Opponent pieces giving check to the side to move
    #[inline]
    pub fn checkers(&self) -> Bitboard {
        self.attackers_to(self.ksq(self.stm), !self.stm, self.all_occupied_bb())
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.checkers().is_occupied()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SEPARATOR: &str = "\n     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{}", SEPARATOR)?;

        for rank in Rank::iter().rev() {
            write!(f, " {}   |", rank)?;

            for file in File::iter() {
                let cell = match self.on(Square::from_parts(file, rank)) {
                    Some(piece) => piece.to_char(),
                    None => ' ',
                };
                write!(f, " {} |", cell)?;
            }

            writeln!(f, "{}", SEPARATOR)?;
        }

        writeln!(f)?;
        writeln!(f, "       A   B   C   D   E   F   G   H")?;
        writeln!(f)?;
        writeln!(f, "Current Side: {:?}", self.stm())?;
        writeln!(f, "Castling: {}", self.castling)?;
        writeln!(
            f,
            "En Passant Square: {}",
            match self.enpassant {
                Some(square) => square.to_string(),
                None => "None".to_string(),
            }
        )?;
        writeln!(f, "Fen: {}", self.fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_start_position() {
        let pos = Position::default();

        assert_eq!(pos.on(Square::E1), Some(Piece::WhiteKing));
        assert_eq!(pos.on(Square::D8), Some(Piece::BlackQueen));
        assert_eq!(pos.on(Square::E4), None);
        assert_eq!(pos.stm(), Colour::White);
        assert_eq!(pos.castling(), Castling::ALL);
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.ksq(Colour::White), Square::E1);
        assert_eq!(pos.ksq(Colour::Black), Square::E8);
        assert_eq!(pos.all_occupied_bb().count_bits(), 32);
        assert_eq!(pos.piece_bb(Colour::White, PieceType::Pawn), Rank::Rank2.bb());
    }

    #[test]
    fn test_piece_sets_are_disjoint() {
        let pos = Position::from_fen(TRICKY_FEN).unwrap();

        let mut seen = Bitboard::EMPTY;
        for piece in Piece::iter() {
            let bb = pos.pieces_bb(piece);
            assert!((seen & bb).is_empty());
            seen |= bb;
            bb.for_each(|sq| assert_eq!(pos.on(sq), Some(piece)));
        }
        assert_eq!(seen, pos.all_occupied_bb());
    }

    #[test]
    fn test_attackers_to() {
        let pos = Position::from_fen("4k3/8/8/3q4/8/5N2/8/R3K3 w - - 0 1").unwrap();
        let occ = pos.all_occupied_bb();

        assert_eq!(
            pos.attackers_to(Square::D4, Colour::White, occ),
            Square::F3.bb()
        );
        assert_eq!(
            pos.attackers_to(Square::D1, Colour::White, occ),
            Square::A1.bb() | Square::E1.bb()
        );
        assert_eq!(
            pos.attackers_to(Square::A2, Colour::Black, occ),
            Square::D5.bb()
        );
        assert!(pos.is_square_attacked(Square::A2, Colour::Black));
        // the knight on f3 shields h1 from the queen
        assert!(!pos.is_square_attacked(Square::H1, Colour::Black));
        assert!(!pos.in_check());
    }

    #[test]
    fn test_checkers() {
        let pos = Position::from_fen("4k3/8/8/8/1b6/8/8/4K2r w - - 0 1").unwrap();
        assert_eq!(pos.checkers(), Square::B4.bb() | Square::H1.bb());
        assert!(pos.in_check());
    }

    #[test]
    fn test_display_contains_fen() {
        let pos = Position::default();
        let shown = pos.to_string();
        assert!(shown.contains(START_FEN));
        assert!(shown.contains("Castling: KQkq"));
    }
}

use thiserror::Error;

use super::Position;
use super::mask::{CASTLING_MASK, CastleLane};
use crate::core::*;

/******************************************\
|==========================================|
|              Piece Placement             |
|==========================================|
\******************************************/

impl Position {
    /// Adds a piece to the board at the specified square.
    ///
    /// Updates the piece table, the piece bitboard and the colour occupancy. Does not touch
    /// side to move, castling rights or the en-passant target.
    #[inline]
    pub(crate) fn add_piece(&mut self, piece: Piece, square: Square) {
        debug_assert!(self.on(square).is_none(), "add_piece: '{square}' is occupied");

        self.board[square.index()] = Some(piece);
        self.pieces[piece.index()].set(square);
        self.occupied[piece.colour().index()].set(square);
    }

    /// Removes whatever piece stands on `square`, clearing it from every set it was in.
    #[inline]
    pub(crate) fn remove_piece(&mut self, square: Square) {
        let Some(piece) = self.board[square.index()].take() else {
            return;
        };

        self.pieces[piece.index()].clear(square);
        self.occupied[piece.colour().index()].clear(square);
    }

    /// Moves the piece on `from` to the empty square `to`.
    #[inline]
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        debug_assert!(self.on(to).is_none(), "move_piece: '{to}' is occupied");

        let Some(piece) = self.board[from.index()].take() else {
            unreachable!("move_piece: '{from}' is empty");
        };

        self.board[to.index()] = Some(piece);

        let from_to = from.bb() | to.bb();
        self.pieces[piece.index()] ^= from_to;
        self.occupied[piece.colour().index()] ^= from_to;
    }
}

/******************************************\
|==========================================|
|              Make Move                   |
|==========================================|
\******************************************/

impl Position {
    /// Applies `mv` if it is one of the current legal moves.
    ///
    /// An illegal move is rejected with [`MoveError::Illegal`] and leaves the position
    /// exactly as it was.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if !self.generate_moves().contains(mv) {
            return Err(MoveError::Illegal(mv));
        }

        self.make_move(mv);
        Ok(())
    }

    /// Applies a move known to be legal.
    ///
    /// Relocates the pieces the move kind names, sets the en-passant target after a double
    /// push and clears it otherwise, revokes castling rights tied to either square the move
    /// touches, re-checks the remaining rights against the home squares and passes the turn.
    pub(crate) fn make_move(&mut self, mv: Move) {
        let from = mv.from();
        let to = mv.to();
        let us = self.stm;

        debug_assert!(
            self.on(from).is_some_and(|piece| piece.colour() == us),
            "make_move: {mv} does not move a piece of the side to move"
        );

        self.enpassant = None;

        match mv.kind() {
            MoveKind::Quiet => self.move_piece(from, to),
            MoveKind::Capture => {
                self.remove_piece(to);
                self.move_piece(from, to);
            }
            MoveKind::DoublePawnPush => {
                self.move_piece(from, to);
                // Safety: origin and destination are two ranks apart on one file
                let passed = unsafe { Square::from_unchecked((from as u8 + to as u8) / 2) };
                self.enpassant = Some(passed);
            }
            MoveKind::EnPassantCapture => {
                // The captured pawn stands beside the origin, on the destination's file
                let captured = Square::from_parts(to.file(), from.rank());
                self.remove_piece(captured);
                self.move_piece(from, to);
            }
            MoveKind::KnightPromotion
            | MoveKind::BishopPromotion
            | MoveKind::RookPromotion
            | MoveKind::QueenPromotion
            | MoveKind::KnightPromotionCapture
            | MoveKind::BishopPromotionCapture
            | MoveKind::RookPromotionCapture
            | MoveKind::QueenPromotionCapture => {
                let Some(pt) = mv.promotion_pt() else {
                    unreachable!("promotion kind without a piece type");
                };
                self.remove_piece(to);
                self.remove_piece(from);
                self.add_piece(Piece::from_parts(us, pt), to);
            }
            MoveKind::WhiteKingCastle
            | MoveKind::WhiteQueenCastle
            | MoveKind::BlackKingCastle
            | MoveKind::BlackQueenCastle => {
                let Some(right) = mv.kind().castling_right() else {
                    unreachable!("castle kind without a castling right");
                };
                let lane = CastleLane::of(right);
                self.move_piece(lane.king_from, lane.king_to);
                self.move_piece(lane.rook_from, lane.rook_to);
            }
        }

        self.castling &= CASTLING_MASK[from.index()] & CASTLING_MASK[to.index()];
        self.verify_castling_rights();

        self.stm = !us;
    }

    /// Drops every right whose king or rook is no longer on its home square
    fn verify_castling_rights(&mut self) {
        for right in Castling::RIGHTS {
            if !self.castling.has(right) {
                continue;
            }

            let colour = if Castling::WHITE_CASTLING.has(right) {
                Colour::White
            } else {
                Colour::Black
            };

            let king_home = self.piece_bb(colour, PieceType::King).contains(right.king_home());
            let rook_home = self.piece_bb(colour, PieceType::Rook).contains(right.rook_home());

            if !(king_home && rook_home) {
                self.castling.remove(right);
            }
        }
    }

    /// The successor position after a legal move, leaving `self` untouched
    pub fn after(&self, mv: Move) -> Result<Position, MoveError> {
        let mut next = *self;
        next.apply_move(mv)?;
        Ok(next)
    }
}

/******************************************\
|==========================================|
|              Move Lookup                 |
|==========================================|
\******************************************/

impl Position {
    /// Finds the legal move from `from` to `to`.
    ///
    /// A pawn reaching the last rank needs `promotion` to pick the piece. For every other
    /// move `promotion` must be `None`.
    pub fn find_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<Move, MoveError> {
        self.generate_moves()
            .iter()
            .copied()
            .find(|m| m.from() == from && m.to() == to && m.promotion_pt() == promotion)
            .ok_or(MoveError::NoSuchMove { from, to })
    }

    /// Finds the legal move written in coordinate notation, e.g. `e2e4` or `e7e8q`
    pub fn parse_move(&self, notation: &str) -> Result<Move, MoveError> {
        let invalid = || MoveError::InvalidNotation(notation.to_string());

        let square = |range: std::ops::Range<usize>| {
            notation
                .get(range)
                .and_then(|s| s.parse::<Square>().ok())
                .ok_or_else(invalid)
        };

        let from = square(0..2)?;
        let to = square(2..4)?;

        let promotion = match notation.get(4..).ok_or_else(invalid)? {
            "" => None,
            "n" => Some(PieceType::Knight),
            "b" => Some(PieceType::Bishop),
            "r" => Some(PieceType::Rook),
            "q" => Some(PieceType::Queen),
            _ => return Err(invalid()),
        };

        self.find_move(from, to, promotion)
    }
}

/******************************************\
|==========================================|
|               Move Error                 |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Illegal move {0} in the current position")]
    Illegal(Move),
    #[error("No legal move from {from} to {to}")]
    NoSuchMove { from: Square, to: Square },
    #[error("Invalid move notation: '{0}'")]
    InvalidNotation(String),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

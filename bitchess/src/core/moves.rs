use crate::core::*;

/******************************************\
|==========================================|
|                Move Kind                 |
|==========================================|
\******************************************/

/// The closed set of move kinds. The discriminant fits in four bits: bit 3 marks a
/// promotion, and within promotions bit 2 marks a capture and bits 0-1 select the piece.
#[repr(u16)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Quiet = 0b0000,

    DoublePawnPush = 0b0001,

    WhiteKingCastle = 0b0010,

    WhiteQueenCastle = 0b0011,

    Capture = 0b0100,

    EnPassantCapture = 0b0101,

    BlackKingCastle = 0b0110,

    BlackQueenCastle = 0b0111,

    KnightPromotion = 0b1000,

    BishopPromotion = 0b1001,

    RookPromotion = 0b1010,

    QueenPromotion = 0b1011,

    KnightPromotionCapture = 0b1100,

    BishopPromotionCapture = 0b1101,

    RookPromotionCapture = 0b1110,

    QueenPromotionCapture = 0b1111,
}

impl MoveKind {
    pub const NUM: usize = 16;

    const PROMOTION_FLAG_MASK: u16 = 0x8;

    const PROMOTION_CAPTURE_MASK: u16 = 0x4;

    const PROMOTION_PIECE_MASK: u16 = 0x3;
}

crate::impl_from_to_primitive!(MoveKind, u16);

impl MoveKind {
    /// Whether the move removes an opponent piece (including en passant)
    #[inline(always)]
    pub const fn is_capture(self) -> bool {
        match self {
            MoveKind::Capture | MoveKind::EnPassantCapture => true,
            _ => {
                let raw = self as u16;
                raw & Self::PROMOTION_FLAG_MASK != 0 && raw & Self::PROMOTION_CAPTURE_MASK != 0
            }
        }
    }

    #[inline(always)]
    pub const fn is_promotion(self) -> bool {
        (self as u16 & Self::PROMOTION_FLAG_MASK) != 0
    }

    #[inline(always)]
    pub const fn is_castle(self) -> bool {
        matches!(
            self,
            MoveKind::WhiteKingCastle
                | MoveKind::WhiteQueenCastle
                | MoveKind::BlackKingCastle
                | MoveKind::BlackQueenCastle
        )
    }

    /// The piece a promotion produces, `None` for every other kind
    #[inline(always)]
    pub const fn promotion_piece_type(self) -> Option<PieceType> {
        if !self.is_promotion() {
            return None;
        }

        match self as u16 & Self::PROMOTION_PIECE_MASK {
            0 => Some(PieceType::Knight),
            1 => Some(PieceType::Bishop),
            2 => Some(PieceType::Rook),
            _ => Some(PieceType::Queen),
        }
    }

    /// The promotion kind for `piece_type`, `None` if the piece cannot be promoted to
    pub const fn promotion(piece_type: PieceType, is_capture: bool) -> Option<MoveKind> {
        let kind = match (piece_type, is_capture) {
            (PieceType::Knight, false) => MoveKind::KnightPromotion,
            (PieceType::Bishop, false) => MoveKind::BishopPromotion,
            (PieceType::Rook, false) => MoveKind::RookPromotion,
            (PieceType::Queen, false) => MoveKind::QueenPromotion,
            (PieceType::Knight, true) => MoveKind::KnightPromotionCapture,
            (PieceType::Bishop, true) => MoveKind::BishopPromotionCapture,
            (PieceType::Rook, true) => MoveKind::RookPromotionCapture,
            (PieceType::Queen, true) => MoveKind::QueenPromotionCapture,
            (PieceType::Pawn | PieceType::King, _) => return None,
        };
        Some(kind)
    }

    /// The castle kind for an atomic castling right
    #[inline]
    pub const fn castle(right: Castling) -> MoveKind {
        debug_assert!(right.0.count_ones() == 1, "expected an atomic castling right");
        match right {
            Castling::WK => MoveKind::WhiteKingCastle,
            Castling::WQ => MoveKind::WhiteQueenCastle,
            Castling::BK => MoveKind::BlackKingCastle,
            _ => MoveKind::BlackQueenCastle,
        }
    }

    /// The castling right a castle kind exercises, `None` for every other kind
    #[inline]
    pub const fn castling_right(self) -> Option<Castling> {
        match self {
            MoveKind::WhiteKingCastle => Some(Castling::WK),
            MoveKind::WhiteQueenCastle => Some(Castling::WQ),
            MoveKind::BlackKingCastle => Some(Castling::BK),
            MoveKind::BlackQueenCastle => Some(Castling::BQ),
            _ => None,
        }
    }
}

/******************************************\
|==========================================|
|                   Move                   |
|==========================================|
\******************************************/

/// An immutable move value: origin, destination and kind packed into 16 bits
/// (6 + 6 + 4). Two moves are equal when all three parts are equal.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub struct Move {
    data: u16,
}

impl Move {
    const FROM_SHIFT: u16 = 0;

    const TO_SHIFT: u16 = 6;

    const KIND_SHIFT: u16 = 12;

    const SQUARE_MASK: u16 = 0x3F;

    const KIND_MASK: u16 = 0xF;

    #[inline(always)]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        let data = ((from as u16) << Self::FROM_SHIFT)
            | ((to as u16) << Self::TO_SHIFT)
            | ((kind as u16) << Self::KIND_SHIFT);

        Self { data }
    }

    #[inline(always)]
    pub const fn from(&self) -> Square {
        unsafe { Square::from_unchecked(((self.data >> Self::FROM_SHIFT) & Self::SQUARE_MASK) as u8) }
    }

    #[inline(always)]
    pub const fn to(&self) -> Square {
        unsafe { Square::from_unchecked(((self.data >> Self::TO_SHIFT) & Self::SQUARE_MASK) as u8) }
    }

    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        unsafe { MoveKind::from_unchecked((self.data >> Self::KIND_SHIFT) & Self::KIND_MASK) }
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.kind().is_capture()
    }

    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        self.kind().is_promotion()
    }

    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        self.kind().is_castle()
    }

    #[inline(always)]
    pub const fn promotion_pt(&self) -> Option<PieceType> {
        self.kind().promotion_piece_type()
    }
}

impl std::fmt::Display for Move {
    /// Coordinate notation: `e2e4`, `e1g1`, `e7e8q`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(pt) = self.promotion_pt() {
            write!(f, "{pt}")?;
        }
        Ok(())
    }
}

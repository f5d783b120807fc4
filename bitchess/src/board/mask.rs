use crate::core::*;

/******************************************\
|==========================================|
|              Castling Mask               |
|==========================================|
\******************************************/

/// Rights that survive a move touching each square, as origin or destination.
///
/// Anything leaving or landing on a king or rook home square revokes the rights tied to
/// that square, so a rook capture on h8 removes `k` for black as well.
pub(crate) const CASTLING_MASK: [Castling; Square::NUM] = {
    let mut mask = [Castling::ALL; Square::NUM];

    mask[Square::E1 as usize] = Castling(Castling::ALL.0 & !Castling::WHITE_CASTLING.0);
    mask[Square::H1 as usize] = Castling(Castling::ALL.0 & !Castling::WK.0);
    mask[Square::A1 as usize] = Castling(Castling::ALL.0 & !Castling::WQ.0);
    mask[Square::E8 as usize] = Castling(Castling::ALL.0 & !Castling::BLACK_CASTLING.0);
    mask[Square::H8 as usize] = Castling(Castling::ALL.0 & !Castling::BK.0);
    mask[Square::A8 as usize] = Castling(Castling::ALL.0 & !Castling::BQ.0);

    mask
};

/******************************************\
|==========================================|
|              Castling Lanes              |
|==========================================|
\******************************************/

/// Fixed geometry of one castle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CastleLane {
    pub king_from: Square,

    pub king_to: Square,

    pub rook_from: Square,

    pub rook_to: Square,

    /// Squares between king and rook, which must be empty and not attacked
    pub lane: Bitboard,
}

/// Indexed by the bit position of the atomic right (`WK`, `WQ`, `BK`, `BQ`)
const CASTLE_LANES: [CastleLane; 4] = [
    CastleLane {
        king_from: Square::E1,
        king_to: Square::G1,
        rook_from: Square::H1,
        rook_to: Square::F1,
        lane: Bitboard(0x0000_0000_0000_0006),
    },
    CastleLane {
        king_from: Square::E1,
        king_to: Square::C1,
        rook_from: Square::A1,
        rook_to: Square::D1,
        lane: Bitboard(0x0000_0000_0000_0070),
    },
    CastleLane {
        king_from: Square::E8,
        king_to: Square::G8,
        rook_from: Square::H8,
        rook_to: Square::F8,
        lane: Bitboard(0x0600_0000_0000_0000),
    },
    CastleLane {
        king_from: Square::E8,
        king_to: Square::C8,
        rook_from: Square::A8,
        rook_to: Square::D8,
        lane: Bitboard(0x7000_0000_0000_0000),
    },
];

impl CastleLane {
    /// The lane exercised by an atomic castling right
    #[inline]
    pub const fn of(right: Castling) -> &'static CastleLane {
        debug_assert!(right.0.count_ones() == 1, "expected an atomic castling right");
        &CASTLE_LANES[right.0.trailing_zeros() as usize & 3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn test_castling_mask() {
        assert_eq!(CASTLING_MASK[E1 as usize], Castling::BLACK_CASTLING);
        assert_eq!(CASTLING_MASK[H8 as usize], Castling::WHITE_CASTLING | Castling::BQ);
        assert_eq!(CASTLING_MASK[A1 as usize], Castling::ALL ^ Castling::WQ);
        assert_eq!(CASTLING_MASK[E4 as usize], Castling::ALL);
        assert_eq!(CASTLING_MASK[B1 as usize], Castling::ALL);
    }

    #[test]
    fn test_lanes_match_rights() {
        for right in Castling::RIGHTS {
            let lane = CastleLane::of(right);
            assert_eq!(lane.king_from, right.king_home());
            assert_eq!(lane.rook_from, right.rook_home());
            assert!(lane.lane.contains(lane.king_to));
            assert!(lane.lane.contains(lane.rook_to));
            assert_eq!(lane.lane & (lane.king_from.bb() | lane.rook_from.bb()), Bitboard::EMPTY);
        }

        assert_eq!(CastleLane::of(Castling::WK).lane, Bitboard::from([F1, G1]));
        assert_eq!(CastleLane::of(Castling::WQ).lane, Bitboard::from([B1, C1, D1]));
        assert_eq!(CastleLane::of(Castling::BK).lane, Bitboard::from([F8, G8]));
        assert_eq!(CastleLane::of(Castling::BQ).lane, Bitboard::from([B8, C8, D8]));
    }
}

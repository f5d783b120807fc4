use super::attacks::*;
use crate::board::Position;
use crate::core::*;

/******************************************\
|==========================================|
|           Move Generation Context        |
|==========================================|
\******************************************/

/// Everything move generation derives from a position before enumerating moves.
///
/// Built once per call to [`Position::generate_moves`] and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MoveGenContext {
    pub us: Colour,

    pub them: Colour,

    pub own: Bitboard,

    pub opponent: Bitboard,

    pub occupied: Bitboard,

    pub empty: Bitboard,

    pub ksq: Square,

    /// Squares the opponent attacks, computed with our king lifted off the board so that
    /// stepping back along a checking line is not mistaken for safe
    pub opponent_attacks: Bitboard,

    pub checkers: Bitboard,

    /// Where a non-king move may capture: the lone checker, everything when not in check
    pub capture_mask: Bitboard,

    /// Where a non-king move may go to block: the squares between king and a sliding checker
    pub push_mask: Bitboard,

    pub pinned: Bitboard,

    pub ep: Option<Square>,
}

impl MoveGenContext {
    pub fn new(pos: &Position) -> MoveGenContext {
        let us = pos.stm();
        let them = !us;
        let own = pos.occupied_bb(us);
        let opponent = pos.occupied_bb(them);
        let occupied = own | opponent;
        let ksq = pos.ksq(us);

        let checkers = pos.attackers_to(ksq, them, occupied);

        let (capture_mask, push_mask) = match checkers.count_bits() {
            0 => (Bitboard::FULL, Bitboard::FULL),
            1 => {
                let checker = checkers.lsb_unchecked();
                let is_slider = pos.on(checker).is_some_and(|piece| {
                    matches!(piece.pt(), PieceType::Bishop | PieceType::Rook | PieceType::Queen)
                });

                let push_mask = if is_slider {
                    between(ksq, checker)
                } else {
                    Bitboard::EMPTY
                };
                (checkers, push_mask)
            }
            _ => (Bitboard::EMPTY, Bitboard::EMPTY),
        };

        MoveGenContext {
            us,
            them,
            own,
            opponent,
            occupied,
            empty: !occupied,
            ksq,
            opponent_attacks: calc_attacked_bb(pos, them, occupied ^ ksq.bb()),
            checkers,
            capture_mask,
            push_mask,
            pinned: calc_pinned_bb(pos, us, ksq, occupied),
            ep: pos.en_passant(),
        }
    }

    /// Destinations that resolve a single check, or every square when not in check
    #[inline]
    pub fn evasion_mask(&self) -> Bitboard {
        self.capture_mask | self.push_mask
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.checkers.is_occupied()
    }

    #[inline]
    pub fn in_double_check(&self) -> bool {
        self.checkers.more_than_one()
    }

    /// The line a piece on `sq` is confined to: the king line through it when pinned,
    /// every square otherwise
    #[inline]
    pub fn pin_line(&self, sq: Square) -> Bitboard {
        if self.pinned.contains(sq) {
            line_through(self.ksq, sq)
        } else {
            Bitboard::FULL
        }
    }
}

/******************************************\
|==========================================|
|             Mask Calculation             |
|==========================================|
\******************************************/

/// Every square attacked by `by`, with sliders seeing through `occ`
fn calc_attacked_bb(pos: &Position, by: Colour, occ: Bitboard) -> Bitboard {
    let mut threatened = pawn_attacks(by, pos.piece_bb(by, PieceType::Pawn));

    pos.piece_bb(by, PieceType::Knight).for_each(|sq| {
        threatened |= knight_attack(sq);
    });

    pos.diagonal_sliders(by).for_each(|sq| {
        threatened |= bishop_attacks(sq, occ);
    });

    pos.orthogonal_sliders(by).for_each(|sq| {
        threatened |= rook_attacks(sq, occ);
    });

    threatened | king_attack(pos.ksq(by))
}

/// Pieces of `us` that are the only piece between their king and an opposing slider of
/// matching geometry.
///
/// For each of the four lines through the king, the first piece in each direction is
/// found, our own ones are lifted off, and whatever the king then sees beyond them that is
/// an opposing slider (and was not visible before) is a pinner.
fn calc_pinned_bb(pos: &Position, us: Colour, ksq: Square, occ: Bitboard) -> Bitboard {
    let them = !us;
    let own = pos.occupied_bb(us);

    let orthogonal = pos.orthogonal_sliders(them);
    let diagonal = pos.diagonal_sliders(them);

    let lines = [
        (Bitboard::rank_mask(ksq), orthogonal),
        (Bitboard::file_mask(ksq), orthogonal),
        (Bitboard::diagonal_mask(ksq), diagonal),
        (Bitboard::anti_diagonal_mask(ksq), diagonal),
    ];

    let mut pinned = Bitboard::EMPTY;

    for (line, sliders) in lines {
        let direct = line_attacks(ksq, occ, line);
        let blockers = direct & own;
        if blockers.is_empty() {
            continue;
        }

        let xray = line_attacks(ksq, occ ^ blockers, line);
        let pinners = xray & !direct & sliders;

        pinners.for_each(|pinner| {
            pinned |= between(ksq, pinner) & blockers;
        });
    }

    pinned
}

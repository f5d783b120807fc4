use crate::core::*;

/******************************************\
|==========================================|
|             Leaper Attacks               |
|==========================================|
\******************************************/

/// Moves a destination template centred on `centre` so that it is centred on `sq`.
///
/// Shifting a template across the board edge wraps destinations onto the far files, so the
/// result drops files a and b for squares on files e-h and files g and h for files a-d.
#[inline(always)]
const fn span_attack(span: Bitboard, centre: u8, sq: Square) -> Bitboard {
    let sq_index = sq as u8;

    let shifted = if sq_index >= centre {
        span.0 << (sq_index - centre)
    } else {
        span.0 >> (centre - sq_index)
    };

    if sq_index % 8 < 4 {
        Bitboard(shifted & !Bitboard::FILE_AB.0)
    } else {
        Bitboard(shifted & !Bitboard::FILE_GH.0)
    }
}

/// Squares a knight on `sq` attacks
#[inline]
pub const fn knight_attack(sq: Square) -> Bitboard {
    span_attack(Bitboard::KNIGHT_SPAN, Bitboard::KNIGHT_SPAN_CENTRE, sq)
}

/// Squares a king on `sq` attacks
#[inline]
pub const fn king_attack(sq: Square) -> Bitboard {
    span_attack(Bitboard::KING_SPAN, Bitboard::KING_SPAN_CENTRE, sq)
}

/// Squares attacked by every pawn in `pawns` of colour `col`.
///
/// `<< 9` moves towards the a-file and `<< 7` towards the h-file for white, so each shift
/// masks out the file a wrapped capture would land on. Black mirrors this.
#[inline]
pub const fn pawn_attacks(col: Colour, pawns: Bitboard) -> Bitboard {
    let bb = pawns.0;
    match col {
        Colour::White => Bitboard(
            ((bb << 9) & !Bitboard::FILE_H.0) | ((bb << 7) & !Bitboard::FILE_A.0),
        ),
        Colour::Black => Bitboard(
            ((bb >> 9) & !Bitboard::FILE_A.0) | ((bb >> 7) & !Bitboard::FILE_H.0),
        ),
    }
}

/// Squares attacked by a single pawn of colour `col` on `sq`
#[inline]
pub const fn pawn_attack(col: Colour, sq: Square) -> Bitboard {
    pawn_attacks(col, sq.bb())
}

/******************************************\
|==========================================|
|             Slider Attacks               |
|==========================================|
\******************************************/

/// Attacks of a slider on `sq` along the single line `line` (which must pass through `sq`),
/// stopping at and including the first occupied square in each direction.
///
/// Hyperbola quintessence: subtracting twice the slider from the line occupancy flips every
/// bit up to the first blocker above it, and doing the same on the reversed board covers
/// the other direction.
#[inline]
pub const fn line_attacks(sq: Square, occ: Bitboard, line: Bitboard) -> Bitboard {
    let slider = sq.bb();
    let o = occ.0 & line.0;

    let forward = o.wrapping_sub(slider.0.wrapping_mul(2));
    let backward = Bitboard(o)
        .reverse()
        .0
        .wrapping_sub(slider.reverse().0.wrapping_mul(2));

    Bitboard((forward ^ Bitboard(backward).reverse().0) & line.0)
}

#[inline]
pub const fn rank_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    line_attacks(sq, occ, Bitboard::rank_mask(sq))
}

#[inline]
pub const fn file_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    line_attacks(sq, occ, Bitboard::file_mask(sq))
}

#[inline]
pub const fn diagonal_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    line_attacks(sq, occ, Bitboard::diagonal_mask(sq))
}

#[inline]
pub const fn anti_diagonal_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    line_attacks(sq, occ, Bitboard::anti_diagonal_mask(sq))
}

#[inline]
pub const fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    Bitboard(diagonal_attacks(sq, occ).0 | anti_diagonal_attacks(sq, occ).0)
}

#[inline]
pub const fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    Bitboard(rank_attacks(sq, occ).0 | file_attacks(sq, occ).0)
}

#[inline]
pub const fn queen_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    Bitboard(bishop_attacks(sq, occ).0 | rook_attacks(sq, occ).0)
}

/// Attacks of any piece type, pawns attacking as colour `col`
#[inline]
pub fn attacks(col: Colour, pt: PieceType, sq: Square, occ: Bitboard) -> Bitboard {
    match pt {
        PieceType::Pawn => pawn_attack(col, sq),
        PieceType::Knight => knight_attack(sq),
        PieceType::Bishop => bishop_attacks(sq, occ),
        PieceType::Rook => rook_attacks(sq, occ),
        PieceType::Queen => queen_attacks(sq, occ),
        PieceType::King => king_attack(sq),
    }
}

/******************************************\
|==========================================|
|              Line Geometry               |
|==========================================|
\******************************************/

/// The full rank, file, diagonal or anti-diagonal shared by `a` and `b`, or
/// [`Bitboard::EMPTY`] if they are not aligned
#[inline]
pub const fn line_through(a: Square, b: Square) -> Bitboard {
    let lines = [
        Bitboard::rank_mask(a),
        Bitboard::file_mask(a),
        Bitboard::diagonal_mask(a),
        Bitboard::anti_diagonal_mask(a),
    ];

    let mut i = 0;
    while i < lines.len() {
        if (a as u8) != (b as u8) && lines[i].contains(b) {
            return lines[i];
        }
        i += 1;
    }

    Bitboard::EMPTY
}

/// Squares strictly between two aligned squares, [`Bitboard::EMPTY`] otherwise
#[inline]
pub const fn between(a: Square, b: Square) -> Bitboard {
    let line = line_through(a, b);
    let occ = Bitboard(a.bb().0 | b.bb().0);

    Bitboard(line_attacks(a, occ, line).0 & line_attacks(b, occ, line).0)
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    /// Slow reference: walk each ray until it leaves the board or hits a piece
    fn ray_attacks(sq: Square, occ: Bitboard, dirs: &[(i8, i8)]) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for &(df, dr) in dirs {
            let (mut f, mut r) = (sq.file() as i8, sq.rank() as i8);
            loop {
                f += df;
                r += dr;
                if !(0..8).contains(&f) || !(0..8).contains(&r) {
                    break;
                }
                let to = Square::from_parts(
                    unsafe { File::from_unchecked(f as u8) },
                    unsafe { Rank::from_unchecked(r as u8) },
                );
                bb.set(to);
                if occ.contains(to) {
                    break;
                }
            }
        }
        bb
    }

    fn step_attacks(sq: Square, steps: &[(i8, i8)]) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for &(df, dr) in steps {
            let (f, r) = (sq.file() as i8 + df, sq.rank() as i8 + dr);
            if (0..8).contains(&f) && (0..8).contains(&r) {
                bb.set(Square::from_parts(
                    unsafe { File::from_unchecked(f as u8) },
                    unsafe { Rank::from_unchecked(r as u8) },
                ));
            }
        }
        bb
    }

    const KNIGHT_STEPS: [(i8, i8); 8] =
        [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];
    const KING_STEPS: [(i8, i8); 8] =
        [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];
    const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
    const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

    #[test]
    fn test_leaper_attacks_match_steps() {
        for sq in Square::iter() {
            assert_eq!(knight_attack(sq), step_attacks(sq, &KNIGHT_STEPS), "knight on {sq}");
            assert_eq!(king_attack(sq), step_attacks(sq, &KING_STEPS), "king on {sq}");
        }
    }

    #[test]
    fn test_knight_corner() {
        assert_eq!(knight_attack(A1), B3.bb() | C2.bb());
        assert_eq!(knight_attack(H8), G6.bb() | F7.bb());
        assert_eq!(knight_attack(F3), Bitboard::KNIGHT_SPAN);
        assert_eq!(king_attack(G2), Bitboard::KING_SPAN);
    }

    #[test]
    fn test_pawn_attacks() {
        assert_eq!(pawn_attack(Colour::White, E4), D5.bb() | F5.bb());
        assert_eq!(pawn_attack(Colour::Black, E4), D3.bb() | F3.bb());
        assert_eq!(pawn_attack(Colour::White, A2), B3.bb());
        assert_eq!(pawn_attack(Colour::White, H2), G3.bb());
        assert_eq!(pawn_attack(Colour::Black, A7), B6.bb());
        assert_eq!(pawn_attack(Colour::Black, H7), G6.bb());
        assert_eq!(pawn_attack(Colour::White, E8), Bitboard::EMPTY);
        assert_eq!(
            pawn_attacks(Colour::White, Bitboard::RANK_1 << 8),
            Rank::Rank3.bb()
        );
    }

    #[test]
    fn test_slider_attacks_match_rays() {
        let boards = [
            Bitboard::EMPTY,
            Bitboard(0x0000_1200_4400_2100),
            Bitboard(0x8142_2418_1824_4281),
            Bitboard(0x00FF_0000_0000_FF00),
            Bitboard(0x0123_4567_89AB_CDEF),
        ];

        for occ in boards {
            for sq in Square::iter() {
                assert_eq!(
                    rook_attacks(sq, occ),
                    ray_attacks(sq, occ, &ROOK_DIRS),
                    "rook on {sq}, occ {:#x}",
                    occ.0
                );
                assert_eq!(
                    bishop_attacks(sq, occ),
                    ray_attacks(sq, occ, &BISHOP_DIRS),
                    "bishop on {sq}, occ {:#x}",
                    occ.0
                );
            }
        }
    }

    #[test]
    fn test_slider_ignores_own_square() {
        // the slider may or may not be part of the occupancy
        let occ = D4.bb() | D7.bb() | B2.bb();
        assert_eq!(rook_attacks(D4, occ), rook_attacks(D4, occ ^ D4.bb()));
        assert_eq!(bishop_attacks(D4, occ), bishop_attacks(D4, occ ^ D4.bb()));
    }

    #[test]
    fn test_queen_blocked() {
        let occ = D5.bb() | E4.bb() | C3.bb();
        let expected = D5.bb()
            | E4.bb()
            | C3.bb()
            | Bitboard::from([A4, B4, C4, D3, D2, D1, E3, F2, G1, C5, B6, A7, E5, F6, G7, H8]);
        assert_eq!(queen_attacks(D4, occ), expected);
    }

    #[test]
    fn test_line_through() {
        assert_eq!(line_through(E1, E8), Bitboard::FILE_A >> 4);
        assert_eq!(line_through(A1, H1), Bitboard::RANK_1);
        assert_eq!(line_through(C3, F6), Bitboard::diagonal_mask(A1));
        assert_eq!(line_through(B7, G2), Bitboard::anti_diagonal_mask(A8));
        assert_eq!(line_through(A1, B3), Bitboard::EMPTY);
        assert_eq!(line_through(D4, D4), Bitboard::EMPTY);
    }

    #[test]
    fn test_between() {
        assert_eq!(between(E1, E4), E2.bb() | E3.bb());
        assert_eq!(between(A1, D4), B2.bb() | C3.bb());
        assert_eq!(between(H1, G2), Bitboard::EMPTY);
        assert_eq!(between(A1, B3), Bitboard::EMPTY);
        assert_eq!(between(H8, A1), Bitboard::diagonal_mask(A1) ^ H8.bb() ^ A1.bb());
    }
}

//! # Module: `gen`
//!
//! Enumerates the strictly legal moves of a position from a precomputed
//! [`MoveGenContext`]: checkers, pins and the opponent's attacked squares are known before
//! any move is produced, so every piece generator only intersects its pseudo moves with
//! the right masks.
//!
//! - Double check: only king moves.
//! - Single check: non-king moves must land in the capture mask (the checker) or the push
//!   mask (the squares between a sliding checker and the king).
//! - Pinned pieces stay on the line joining them to their king.
//! - En passant is verified by replaying the capture on scratch bitboards, which covers the
//!   case where both pawns leave the king's rank at once.
//! - Castling is only considered out of check.

use super::MoveList;
use super::attacks::*;
use super::context::MoveGenContext;
use crate::board::Position;
use crate::board::mask::CastleLane;
use crate::core::*;

/******************************************\
|==========================================|
|              Helper Functions            |
|==========================================|
\******************************************/

/// Adds all four promotion moves for one pawn move.
#[inline]
fn add_promotions(from: Square, to: Square, capture: bool, move_list: &mut MoveList) {
    for pt in PieceType::PROMOTIONS {
        if let Some(kind) = MoveKind::promotion(pt, capture) {
            move_list.add_move(Move::new(from, to, kind));
        }
    }
}

/// Adds one pawn move per destination in `targets`, each made by the pawn `offset` squares
/// behind it. Destinations on the last rank expand into the four promotions.
#[inline]
fn add_pawn_moves(
    targets: Bitboard,
    offset: i8,
    kind: MoveKind,
    promo_rank: Bitboard,
    move_list: &mut MoveList,
) {
    targets.for_each(|to| {
        // Safety: `to` was produced by shifting a pawn `offset` squares, so the origin exists
        let from = unsafe { Square::from_unchecked((to as i8 - offset) as u8) };

        if promo_rank.contains(to) {
            add_promotions(from, to, kind == MoveKind::Capture, move_list);
        } else {
            move_list.add_move(Move::new(from, to, kind));
        }
    });
}

/// Splits the destinations of a non-pawn piece into captures and quiet moves.
#[inline]
fn add_piece_moves(ctx: &MoveGenContext, from: Square, dest: Bitboard, move_list: &mut MoveList) {
    (dest & ctx.opponent).for_each(|to| {
        move_list.add_move(Move::new(from, to, MoveKind::Capture));
    });

    (dest & ctx.empty).for_each(|to| {
        move_list.add_move(Move::new(from, to, MoveKind::Quiet));
    });
}

/******************************************\
|==========================================|
|               Pawn Shifts                |
|==========================================|
\******************************************/

/// Shift amounts and ranks that make pawn generation colour agnostic
struct PawnShifts {
    push: i8,

    /// Capture towards the a-file, masked with `!FILE_H` against wrapping
    capture_a: i8,

    /// Capture towards the h-file, masked with `!FILE_A` against wrapping
    capture_h: i8,

    /// Rank a double push lands on
    double_rank: Bitboard,

    promo_rank: Bitboard,
}

impl PawnShifts {
    const WHITE: PawnShifts = PawnShifts {
        push: 8,
        capture_a: 9,
        capture_h: 7,
        double_rank: Bitboard::RANK_4,
        promo_rank: Bitboard::RANK_8,
    };

    const BLACK: PawnShifts = PawnShifts {
        push: -8,
        capture_a: -7,
        capture_h: -9,
        double_rank: Bitboard::RANK_5,
        promo_rank: Bitboard::RANK_1,
    };

    #[inline]
    const fn of(col: Colour) -> &'static PawnShifts {
        match col {
            Colour::White => &Self::WHITE,
            Colour::Black => &Self::BLACK,
        }
    }
}

/******************************************\
|==========================================|
|              Move Generation             |
|==========================================|
\******************************************/

/// Generates every legal move of `pos` into `move_list`.
pub(crate) fn generate_moves(pos: &Position, move_list: &mut MoveList) {
    let ctx = MoveGenContext::new(pos);

    if ctx.in_double_check() {
        gen_king_moves(&ctx, move_list);
        return;
    }

    gen_pawn_moves(pos, &ctx, move_list);
    gen_en_passant(pos, &ctx, move_list);
    gen_knight_moves(pos, &ctx, move_list);
    gen_slider_moves(pos, &ctx, move_list);
    gen_king_moves(&ctx, move_list);

    if !ctx.in_check() {
        gen_castling_moves(pos, &ctx, move_list);
    }
}

/// Pushes, double pushes, captures and promotions.
///
/// Free pawns are generated set-wise. Pinned pawns are generated one at a time with their
/// destinations cut down to their pin line, which leaves a file-pinned pawn its pushes, a
/// diagonally pinned pawn the capture of its pinner, and a rank-pinned pawn nothing.
fn gen_pawn_moves(pos: &Position, ctx: &MoveGenContext, move_list: &mut MoveList) {
    let pawns = pos.piece_bb(ctx.us, PieceType::Pawn);
    let evasion = ctx.evasion_mask();

    gen_pawn_set(ctx, pawns & !ctx.pinned, evasion, move_list);

    (pawns & ctx.pinned).for_each(|sq| {
        gen_pawn_set(ctx, sq.bb(), evasion & ctx.pin_line(sq), move_list);
    });
}

fn gen_pawn_set(ctx: &MoveGenContext, pawns: Bitboard, allowed: Bitboard, move_list: &mut MoveList) {
    if pawns.is_empty() {
        return;
    }

    let shifts = PawnShifts::of(ctx.us);

    let single = pawns.shift_by(shifts.push) & ctx.empty;
    let double = single.shift_by(shifts.push) & ctx.empty & shifts.double_rank;
    let capture_a = pawns.shift_by(shifts.capture_a) & !Bitboard::FILE_H & ctx.opponent;
    let capture_h = pawns.shift_by(shifts.capture_h) & !Bitboard::FILE_A & ctx.opponent;

    let promo_rank = shifts.promo_rank;

    add_pawn_moves(capture_a & allowed, shifts.capture_a, MoveKind::Capture, promo_rank, move_list);
    add_pawn_moves(capture_h & allowed, shifts.capture_h, MoveKind::Capture, promo_rank, move_list);
    add_pawn_moves(single & allowed, shifts.push, MoveKind::Quiet, promo_rank, move_list);
    add_pawn_moves(
        double & allowed,
        shifts.push * 2,
        MoveKind::DoublePawnPush,
        promo_rank,
        move_list,
    );
}

/// En passant captures that do not leave the king attacked.
///
/// The capture removes two pawns from the board and may uncover attacks the pin and check
/// masks do not describe, so each candidate is replayed on copies of the occupancy and the
/// opponent pawns and the king's attackers are recomputed.
fn gen_en_passant(pos: &Position, ctx: &MoveGenContext, move_list: &mut MoveList) {
    let Some(ep) = ctx.ep else {
        return;
    };

    let shifts = PawnShifts::of(ctx.us);

    // Safety: the target is on the 3rd or 6th rank, so the pushed pawn is one rank beyond it
    let captured = unsafe { Square::from_unchecked((ep as i8 - shifts.push) as u8) };

    let our_pawns = pos.piece_bb(ctx.us, PieceType::Pawn);
    let candidates = pawn_attack(ctx.them, ep) & our_pawns;

    let their_pawns = pos.piece_bb(ctx.them, PieceType::Pawn) ^ captured.bb();
    let their_knights = pos.piece_bb(ctx.them, PieceType::Knight);
    let their_diagonal = pos.diagonal_sliders(ctx.them);
    let their_orthogonal = pos.orthogonal_sliders(ctx.them);

    candidates.for_each(|from| {
        let occ = ctx.occupied ^ from.bb() ^ ep.bb() ^ captured.bb();

        let checkers = pawn_attack(ctx.us, ctx.ksq) & their_pawns
            | knight_attack(ctx.ksq) & their_knights
            | bishop_attacks(ctx.ksq, occ) & their_diagonal
            | rook_attacks(ctx.ksq, occ) & their_orthogonal;

        if checkers.is_empty() {
            move_list.add_move(Move::new(from, ep, MoveKind::EnPassantCapture));
        }
    });
}

/// A pinned knight can never stay on its pin line, so only free knights move.
fn gen_knight_moves(pos: &Position, ctx: &MoveGenContext, move_list: &mut MoveList) {
    let knights = pos.piece_bb(ctx.us, PieceType::Knight) & !ctx.pinned;
    let target = !ctx.own & ctx.evasion_mask();

    knights.for_each(|from| {
        add_piece_moves(ctx, from, knight_attack(from) & target, move_list);
    });
}

/// Bishops, rooks and queens.
fn gen_slider_moves(pos: &Position, ctx: &MoveGenContext, move_list: &mut MoveList) {
    let target = !ctx.own & ctx.evasion_mask();

    for pt in [PieceType::Bishop, PieceType::Rook, PieceType::Queen] {
        pos.piece_bb(ctx.us, pt).for_each(|from| {
            let dest = attacks(ctx.us, pt, from, ctx.occupied) & target & ctx.pin_line(from);
            add_piece_moves(ctx, from, dest, move_list);
        });
    }
}

fn gen_king_moves(ctx: &MoveGenContext, move_list: &mut MoveList) {
    let dest = king_attack(ctx.ksq) & !ctx.own & !ctx.opponent_attacks;
    add_piece_moves(ctx, ctx.ksq, dest, move_list);
}

/// Castles whose right is held and whose lane, every square between king and rook, is
/// empty and not attacked. The caller guarantees the king is not in check.
fn gen_castling_moves(pos: &Position, ctx: &MoveGenContext, move_list: &mut MoveList) {
    let rights = pos.castling() & Castling::colour(ctx.us);

    for right in Castling::RIGHTS {
        if !rights.has(right) {
            continue;
        }

        let lane = CastleLane::of(right);
        debug_assert_eq!(lane.king_from, ctx.ksq, "castling right without king at home");

        if ((ctx.occupied | ctx.opponent_attacks) & lane.lane).is_empty() {
            move_list.add_move(Move::new(lane.king_from, lane.king_to, MoveKind::castle(right)));
        }
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

//! # Module: `movegen`
//!
//! Legal move generation for a [`Position`].
//!
//! ## Overview
//!
//! - **Attack Generation** (`attacks`): knight and king attacks come from a single
//!   destination template shifted into place, pawn attacks from whole-board shifts, and
//!   slider attacks from hyperbola quintessence along each rank, file and diagonal. Nothing
//!   is precomputed at start-up.
//! - **Context** (`context`): the per-ply snapshot of checkers, evasion masks, pins and
//!   opponent attacks that every generator reads.
//! - **Generation** (`gen`): the piece-by-piece enumeration of legal moves.
//! - **Move List** (`move_list`): the fixed-capacity output buffer.
//!
//! ## Usage
//!
//! ```
//! use bitchess::Position;
//!
//! let pos = Position::default();
//! assert_eq!(pos.generate_moves().len(), 20);
//! ```

mod attacks;
mod context;
mod r#gen;
mod move_list;

pub use attacks::{
    anti_diagonal_attacks, between, bishop_attacks, diagonal_attacks, file_attacks,
    king_attack, knight_attack, line_attacks, line_through, pawn_attack, pawn_attacks,
    queen_attacks, rank_attacks, rook_attacks,
};
pub use move_list::MoveList;

use super::Position;

impl Position {
    /// Every legal move for the side to move. Empty on checkmate or stalemate.
    pub fn generate_moves(&self) -> MoveList {
        let mut move_list = MoveList::new();
        r#gen::generate_moves(self, &mut move_list);
        move_list
    }

    /// Whether the side to move is checkmated
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.generate_moves().is_empty()
    }

    /// Whether the side to move has no legal move and is not in check
    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.generate_moves().is_empty()
    }
}

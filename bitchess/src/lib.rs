//! # bitchess
//!
//! Bitboard legal move generation and move application for standard chess.
//!
//! A [`Position`] is built from a [`PositionDescription`] (a 64-entry piece-code array plus
//! side to move, castling rights and en-passant target), asked for its legal moves with
//! [`Position::generate_moves`], and advanced in place with [`Position::apply_move`].
pub mod board;
pub mod core;
pub mod utils;

pub use board::{MoveError, MoveList, Position, PositionDescription, PositionError};
pub use crate::core::*;

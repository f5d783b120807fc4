// Core value types shared by the position and the move generator

mod macros;

pub mod bitboard;
pub mod moves;
pub mod piece;
pub mod square;
pub mod types;

// Re-export common types for easier access
pub use bitboard::{BitIter, Bitboard};
pub use moves::{Move, MoveKind};
pub use piece::{ParsePieceError, Piece, PieceType};
pub use square::{File, ParseFileError, ParseRankError, ParseSquareError, Rank, Square};
pub use types::{Castling, Colour};

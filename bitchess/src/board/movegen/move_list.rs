use std::mem::MaybeUninit;
use std::slice;

use crate::Move;
use crate::board::MAX_MOVES;

/// Fixed capacity list of the legal moves of one position, filled by the generator.
///
/// No chess position has more than 218 legal moves, so [`MAX_MOVES`] slots never overflow.
pub struct MoveList {
    moves: [MaybeUninit<Move>; MAX_MOVES],
    num_moves: usize,
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        assert!(index < self.num_moves, "MoveList index out of bounds");
        unsafe { self.moves[index].assume_init_ref() }
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveList {
    #[inline]
    pub fn new() -> MoveList {
        MoveList {
            moves: [MaybeUninit::uninit(); MAX_MOVES],
            num_moves: 0,
        }
    }

    #[inline]
    pub(crate) fn add_move(&mut self, move_: Move) {
        debug_assert!(self.num_moves < MAX_MOVES);
        self.moves[self.num_moves].write(move_);
        self.num_moves += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.num_moves
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_moves == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        // The first `num_moves` slots have all been written by `add_move`
        unsafe {
            let ptr = self.moves.as_ptr() as *const Move;
            slice::from_raw_parts(ptr, self.num_moves)
        }
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn contains(&self, move_: Move) -> bool {
        self.as_slice().contains(&move_)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl std::fmt::Display for MoveList {
    /// Space separated coordinate notation
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, move_) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{move_}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MoveKind, Square};

    #[test]
    fn test_add_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let e4 = Move::new(Square::E2, Square::E4, MoveKind::DoublePawnPush);
        let nf3 = Move::new(Square::G1, Square::F3, MoveKind::Quiet);
        list.add_move(e4);
        list.add_move(nf3);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], e4);
        assert_eq!(list[1], nf3);
        assert!(list.contains(nf3));
        assert!(!list.contains(Move::new(Square::E2, Square::E4, MoveKind::Quiet)));
        assert_eq!((&list).into_iter().count(), 2);
        assert_eq!(list.to_string(), "e2e4 g1f3");
    }
}

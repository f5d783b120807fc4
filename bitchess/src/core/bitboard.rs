use std::fmt;

use super::{File, Rank, Square};

/******************************************\
|==========================================|
|                 Bitboard                 |
|==========================================|
\******************************************/

/// Represents a 64-bit bitboard: a set of squares where bit `i` is `Square` `i`.
/// Bit 0 is h1, bit 7 is a1, bit 56 is h8 and bit 63 is a8.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

crate::impl_bit_ops!(Bitboard);
crate::impl_shift_ops!(Bitboard);

/******************************************\
|==========================================|
|           Bitboard Constants             |
|==========================================|
\******************************************/

impl Bitboard {
    /// An empty bitboard, with no bits set.
    pub const EMPTY: Bitboard = Bitboard(0);

    /// A full bitboard, with all 64 bits set.
    pub const FULL: Bitboard = Bitboard(!0);

    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_4: Bitboard = Bitboard(0x0000_0000_FF00_0000);
    pub const RANK_5: Bitboard = Bitboard(0x0000_00FF_0000_0000);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    pub const FILE_A: Bitboard = Bitboard(0x8080_8080_8080_8080);
    pub const FILE_B: Bitboard = Bitboard(0x4040_4040_4040_4040);
    pub const FILE_G: Bitboard = Bitboard(0x0202_0202_0202_0202);
    pub const FILE_H: Bitboard = Bitboard(0x0101_0101_0101_0101);

    /// Files a and b, where a template shifted from the h side would wrap into
    pub const FILE_AB: Bitboard = Bitboard(Self::FILE_A.0 | Self::FILE_B.0);

    /// Files g and h, where a template shifted from the a side would wrap into
    pub const FILE_GH: Bitboard = Bitboard(Self::FILE_G.0 | Self::FILE_H.0);

    /// Knight destinations from [`Self::KNIGHT_SPAN_CENTRE`] (f3)
    pub const KNIGHT_SPAN: Bitboard = Bitboard(0x0000_000A_1100_110A);
    pub const KNIGHT_SPAN_CENTRE: u8 = 18;

    /// King destinations from [`Self::KING_SPAN_CENTRE`] (g2)
    pub const KING_SPAN: Bitboard = Bitboard(0x0000_0000_0007_0507);
    pub const KING_SPAN_CENTRE: u8 = 9;
}

/******************************************\
|==========================================|
|               Line Masks                 |
|==========================================|
\******************************************/

/// Ranks, indexed by `square / 8`
const RANK_MASKS: [u64; 8] = [
    0x0000_0000_0000_00FF,
    0x0000_0000_0000_FF00,
    0x0000_0000_00FF_0000,
    0x0000_0000_FF00_0000,
    0x0000_00FF_0000_0000,
    0x0000_FF00_0000_0000,
    0x00FF_0000_0000_0000,
    0xFF00_0000_0000_0000,
];

/// Files a to h, indexed by `7 - square % 8`
const FILE_MASKS: [u64; 8] = [
    0x8080_8080_8080_8080,
    0x4040_4040_4040_4040,
    0x2020_2020_2020_2020,
    0x1010_1010_1010_1010,
    0x0808_0808_0808_0808,
    0x0404_0404_0404_0404,
    0x0202_0202_0202_0202,
    0x0101_0101_0101_0101,
];

/// a1-h8 direction diagonals, indexed by `square / 8 + square % 8`
const DIAGONAL_MASKS: [u64; 15] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_0102,
    0x0000_0000_0001_0204,
    0x0000_0000_0102_0408,
    0x0000_0001_0204_0810,
    0x0000_0102_0408_1020,
    0x0001_0204_0810_2040,
    0x0102_0408_1020_4080,
    0x0204_0810_2040_8000,
    0x0408_1020_4080_0000,
    0x0810_2040_8000_0000,
    0x1020_4080_0000_0000,
    0x2040_8000_0000_0000,
    0x4080_0000_0000_0000,
    0x8000_0000_0000_0000,
];

/// h1-a8 direction anti-diagonals, indexed by `square / 8 + 7 - square % 8`
const ANTI_DIAGONAL_MASKS: [u64; 15] = [
    0x0000_0000_0000_0080,
    0x0000_0000_0000_8040,
    0x0000_0000_0080_4020,
    0x0000_0000_8040_2010,
    0x0000_0080_4020_1008,
    0x0000_8040_2010_0804,
    0x0080_4020_1008_0402,
    0x8040_2010_0804_0201,
    0x4020_1008_0402_0100,
    0x2010_0804_0201_0000,
    0x1008_0402_0100_0000,
    0x0804_0201_0000_0000,
    0x0402_0100_0000_0000,
    0x0201_0000_0000_0000,
    0x0100_0000_0000_0000,
];

impl Bitboard {
    /// The rank through `sq`
    #[inline]
    pub const fn rank_mask(sq: Square) -> Bitboard {
        Bitboard(RANK_MASKS[sq as usize / 8])
    }

    /// The file through `sq`
    #[inline]
    pub const fn file_mask(sq: Square) -> Bitboard {
        Bitboard(FILE_MASKS[7 - sq as usize % 8])
    }

    /// The a1-h8 direction diagonal through `sq`
    #[inline]
    pub const fn diagonal_mask(sq: Square) -> Bitboard {
        Bitboard(DIAGONAL_MASKS[sq as usize / 8 + sq as usize % 8])
    }

    /// The h1-a8 direction anti-diagonal through `sq`
    #[inline]
    pub const fn anti_diagonal_mask(sq: Square) -> Bitboard {
        Bitboard(ANTI_DIAGONAL_MASKS[sq as usize / 8 + 7 - sq as usize % 8])
    }
}

/******************************************\
|==========================================|
|                Conversions               |
|==========================================|
\******************************************/

impl Square {
    /// Converts a `Square` into a `Bitboard` with only that square's bit set.
    #[inline]
    pub const fn bb(&self) -> Bitboard {
        Bitboard(1u64 << *self as u8)
    }
}

impl Rank {
    /// Converts a `Rank` into a `Bitboard` with all squares on that rank set.
    pub const fn bb(&self) -> Bitboard {
        Bitboard(RANK_MASKS[*self as usize])
    }
}

impl File {
    /// Converts a `File` into a `Bitboard` with all squares on that file set.
    pub const fn bb(&self) -> Bitboard {
        Bitboard(FILE_MASKS[*self as usize])
    }
}

impl<const N: usize> From<[Square; N]> for Bitboard {
    fn from(squares: [Square; N]) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for square in squares {
            bb.set(square);
        }
        bb
    }
}

/******************************************\
|==========================================|
|          Bit Scan & Reversal             |
|==========================================|
\******************************************/

const DEBRUIJN_64: u64 = 0x03f7_9d71_b4cb_0a89;

#[rustfmt::skip]
const DEBRUIJN_INDEX: [u8; 64] = [
     0, 47,  1, 56, 48, 27,  2, 60,
    57, 49, 41, 37, 28, 16,  3, 61,
    54, 58, 35, 52, 50, 42, 21, 44,
    38, 32, 29, 23, 17, 11,  4, 62,
    46, 55, 26, 59, 40, 36, 15, 53,
    34, 51, 20, 43, 31, 22, 10, 45,
    25, 39, 14, 33, 19, 30,  9, 24,
    13, 18,  8, 12,  7,  6,  5, 63,
];

impl Bitboard {
    /// Index of the lowest set bit via De Bruijn multiplication of `x ^ (x - 1)`.
    /// The result is meaningless for an empty board.
    #[inline]
    const fn bit_scan_forward(x: u64) -> u8 {
        let isolated = x ^ x.wrapping_sub(1);
        DEBRUIJN_INDEX[(isolated.wrapping_mul(DEBRUIJN_64) >> 58) as usize]
    }

    /// Reverses the bit order, so h1 maps to a8 and a1 maps to h8.
    #[inline]
    pub const fn reverse(self) -> Bitboard {
        let mut x = self.0;
        x = ((x >> 1) & 0x5555_5555_5555_5555) | ((x & 0x5555_5555_5555_5555) << 1);
        x = ((x >> 2) & 0x3333_3333_3333_3333) | ((x & 0x3333_3333_3333_3333) << 2);
        x = ((x >> 4) & 0x0F0F_0F0F_0F0F_0F0F) | ((x & 0x0F0F_0F0F_0F0F_0F0F) << 4);
        x = ((x >> 8) & 0x00FF_00FF_00FF_00FF) | ((x & 0x00FF_00FF_00FF_00FF) << 8);
        x = ((x >> 16) & 0x0000_FFFF_0000_FFFF) | ((x & 0x0000_FFFF_0000_FFFF) << 16);
        Bitboard((x >> 32) | (x << 32))
    }
}

/******************************************\
|==========================================|
|        Bitboard Implementation         |
|==========================================|
\******************************************/

impl Bitboard {
    /// Finds the least significant bit (LSB) set in the bitboard and returns its corresponding `Square`.
    /// Returns `None` if the bitboard is empty.
    ///
    /// ## Examples
    /// ```rust
    /// use bitchess::core::{Square, Bitboard};
    /// assert_eq!((Square::A1.bb() | Square::H8.bb()).lsb(), Some(Square::A1));
    /// assert_eq!(Bitboard::EMPTY.lsb(), None);
    /// ```
    #[inline]
    pub const fn lsb(&self) -> Option<Square> {
        match self.0 {
            0 => None,
            bits => Some(unsafe { Square::from_unchecked(Self::bit_scan_forward(bits)) }),
        }
    }

    /// Finds the least significant bit (LSB) set in the bitboard and returns its corresponding `Square`.
    ///
    /// # Panics
    /// Panics in debug mode if the bitboard is empty.
    #[inline]
    pub const fn lsb_unchecked(&self) -> Square {
        debug_assert!(self.0 != 0, "Bitboard is empty");
        unsafe { Square::from_unchecked(Self::bit_scan_forward(self.0)) }
    }

    /// Finds and removes (clears) the least significant bit (LSB) from the bitboard,
    /// returning its corresponding `Square`. Returns `None` if the bitboard was empty.
    #[inline]
    pub const fn pop_lsb(&mut self) -> Option<Square> {
        match self.0 {
            0 => None,
            _ => Some(self.pop_lsb_unchecked()),
        }
    }

    /// Finds and removes (clears) the least significant bit (LSB) from the bitboard,
    /// returning its corresponding `Square`.
    ///
    /// # Panics
    /// Panics in debug mode if the bitboard is empty.
    #[inline]
    pub const fn pop_lsb_unchecked(&mut self) -> Square {
        let lsb_square = self.lsb_unchecked();
        self.0 &= self.0 - 1;
        lsb_square
    }

    /// Counts the number of set bits (population count) in the bitboard.
    #[inline]
    pub const fn count_bits(&self) -> u32 {
        self.0.count_ones()
    }

    /// Checks if the bitboard is empty (no bits set).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the bitboard has at least one bit set.
    #[inline]
    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    /// Checks if the bit corresponding to the given `Square` is set.
    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & square.bb().0 != 0
    }

    /// Sets the bit corresponding to the given `Square`.
    #[inline]
    pub const fn set(&mut self, square: Square) {
        self.0 |= square.bb().0;
    }

    /// Clears the bit corresponding to the given `Square`.
    #[inline]
    pub const fn clear(&mut self, square: Square) {
        self.0 &= !square.bb().0;
    }

    /// Checks if exactly one bit is set in the bitboard.
    #[inline]
    pub const fn is_singleton(&self) -> bool {
        !self.is_empty() && !self.more_than_one()
    }

    /// Checks if more than one bit is set in the bitboard.
    #[inline]
    pub const fn more_than_one(&self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    /// Iterates over each set bit in the bitboard, calling the provided function `f` with the `Square` for each.
    #[inline]
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(Square),
    {
        self.iter().for_each(f);
    }

    /// Lazily yields the set squares from lowest to highest bit.
    /// The bitboard itself is untouched, so iterating again starts over.
    #[inline]
    pub const fn iter(&self) -> BitIter {
        BitIter(*self)
    }

    /// Shifts by a signed square distance, positive towards a8, dropping bits that leave the board.
    #[inline]
    pub const fn shift_by(self, offset: i8) -> Bitboard {
        if offset >= 0 {
            Bitboard(self.0 << offset as u32)
        } else {
            Bitboard(self.0 >> (-offset) as u32)
        }
    }
}

/******************************************\
|==========================================|
|               Bit Iterator               |
|==========================================|
\******************************************/

/// Iterator over the set squares of a [`Bitboard`], consuming the lowest bit on each step.
#[derive(Debug, Clone)]
pub struct BitIter(Bitboard);

impl Iterator for BitIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_bits() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for BitIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitIter;

    #[inline]
    fn into_iter(self) -> BitIter {
        self.iter()
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SEPARATOR: &str = "\n     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{}", SEPARATOR)?;

        for rank in Rank::iter().rev() {
            write!(f, " {}   |", rank)?;

            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                let cell = if self.contains(square) { " 1 " } else { "   " };
                write!(f, "{}|", cell)?;
            }

            writeln!(f, "{}", SEPARATOR)?;
        }

        writeln!(f)?;
        writeln!(f, "       A   B   C   D   E   F   G   H")?;
        writeln!(f)?;
        writeln!(f, "Bitboard: {:#x}", self.0)
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb_matches_every_square() {
        for sq in Square::iter() {
            assert_eq!(sq.bb().lsb(), Some(sq));
            // a higher bit must not disturb the scan
            assert_eq!((sq.bb() | Square::A8.bb()).lsb(), Some(sq));
        }
        assert_eq!(Bitboard::EMPTY.lsb(), None);
    }

    #[test]
    fn test_pop_lsb() {
        let mut bb = Square::E4.bb() | Square::A1.bb();
        assert_eq!(bb.pop_lsb(), Some(Square::A1));
        assert_eq!(bb.pop_lsb(), Some(Square::E4));
        assert_eq!(bb.pop_lsb(), None);
        assert_eq!(bb.pop_lsb(), None);
    }

    #[test]
    fn test_iter_is_restartable() {
        let bb = Square::E4.bb() | Square::D5.bb() | Square::H1.bb();

        let first: Vec<Square> = bb.iter().collect();
        let second: Vec<Square> = bb.into_iter().collect();

        assert_eq!(first, vec![Square::H1, Square::E4, Square::D5]);
        assert_eq!(first, second);
        assert_eq!(bb.iter().len(), 3);
    }

    #[test]
    fn test_count_bits() {
        assert_eq!(Bitboard::EMPTY.count_bits(), 0);
        assert_eq!(Square::E4.bb().count_bits(), 1);
        assert_eq!(Bitboard::FULL.count_bits(), 64);
        assert_eq!(Bitboard::KNIGHT_SPAN.count_bits(), 8);
        assert_eq!(Bitboard::KING_SPAN.count_bits(), 8);
    }

    #[test]
    fn test_set_and_clear() {
        let mut bb = Bitboard::EMPTY;
        bb.set(Square::E4);
        assert!(bb.contains(Square::E4));
        assert!(!bb.contains(Square::A1));

        bb.clear(Square::E4);
        assert!(bb.is_empty());

        bb.clear(Square::D5);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_singleton() {
        assert!(Square::C3.bb().is_singleton());
        assert!(!Bitboard::EMPTY.is_singleton());
        assert!((Square::C3.bb() | Square::C4.bb()).more_than_one());
    }

    #[test]
    fn test_reverse() {
        assert_eq!(Square::H1.bb().reverse(), Square::A8.bb());
        assert_eq!(Square::A1.bb().reverse(), Square::H8.bb());
        assert_eq!(Bitboard::RANK_1.reverse(), Bitboard::RANK_8);
        assert_eq!(Bitboard::FILE_A.reverse(), Bitboard::FILE_H);
        for sq in Square::iter() {
            assert_eq!(sq.bb().reverse().0, sq.bb().0.reverse_bits());
        }
    }

    #[test]
    fn test_line_masks() {
        assert_eq!(Bitboard::rank_mask(Square::E4), Rank::Rank4.bb());
        assert_eq!(Bitboard::file_mask(Square::E4), File::FileE.bb());
        assert_eq!(Bitboard::file_mask(Square::A3), Bitboard::FILE_A);
        assert_eq!(Bitboard::file_mask(Square::H6), Bitboard::FILE_H);

        assert_eq!(
            Bitboard::diagonal_mask(Square::C3),
            Bitboard::from([
                Square::A1, Square::B2, Square::C3, Square::D4,
                Square::E5, Square::F6, Square::G7, Square::H8,
            ])
        );
        assert_eq!(
            Bitboard::anti_diagonal_mask(Square::F3),
            Bitboard::from([Square::H1, Square::G2, Square::F3, Square::E4, Square::D5, Square::C6, Square::B7, Square::A8])
        );
        assert_eq!(Bitboard::diagonal_mask(Square::H1), Square::H1.bb());
        assert_eq!(Bitboard::anti_diagonal_mask(Square::A1), Square::A1.bb());

        for sq in Square::iter() {
            assert!(Bitboard::rank_mask(sq).contains(sq));
            assert!(Bitboard::file_mask(sq).contains(sq));
            assert!(Bitboard::diagonal_mask(sq).contains(sq));
            assert!(Bitboard::anti_diagonal_mask(sq).contains(sq));
        }
    }

    #[test]
    fn test_edge_constants() {
        assert_eq!(Bitboard::FILE_A, File::FileA.bb());
        assert_eq!(Bitboard::FILE_H, File::FileH.bb());
        assert_eq!(Bitboard::RANK_4, Rank::Rank4.bb());
        assert_eq!(Bitboard::RANK_5, Rank::Rank5.bb());
        assert!(Bitboard::FILE_A.contains(Square::A1));
        assert!(Bitboard::FILE_H.contains(Square::H1));
    }

    #[test]
    fn test_shift_by() {
        assert_eq!(Square::E4.bb().shift_by(8), Square::E5.bb());
        assert_eq!(Square::E4.bb().shift_by(-8), Square::E3.bb());
        assert_eq!(Square::E8.bb().shift_by(8), Bitboard::EMPTY);
    }

    #[test]
    fn test_bitboard_operations() {
        let a1 = Square::A1.bb();
        let h8 = Square::H8.bb();

        let combined = a1 | h8;
        assert_eq!(combined.count_bits(), 2);
        assert!((a1 & h8).is_empty());
        assert!((a1 ^ a1).is_empty());

        let inverted = !a1;
        assert!(!inverted.contains(Square::A1));
        assert_eq!(inverted.count_bits(), 63);

        assert_eq!(Square::H1.bb() << 1, Square::G1.bb());
        assert_eq!(Square::A2.bb() >> 8, Square::A1.bb());
    }
}

use super::Square;

/******************************************\
|==========================================|
|                 Colours                  |
|==========================================|
\******************************************/

/// # Colour Representation
///
/// Represents the two colours in chess: White and Black.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    /// Number of elements in the Colour enum
    pub const NUM: usize = 2;
}

crate::impl_from_to_primitive!(Colour);
crate::impl_enum_iter!(Colour);

impl std::ops::Not for Colour {
    type Output = Self;

    /// Returns the opposite colour
    fn not(self) -> Self::Output {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

/******************************************\
|==========================================|
|                 Castling                 |
|==========================================|
\******************************************/

/// # Castling Representation
///
/// The four castling rights of a position packed into the low nibble of a byte.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Castling(pub u8);

impl Default for Castling {
    fn default() -> Self {
        Castling::ALL
    }
}

crate::impl_bit_ops!(Castling);

impl Castling {
    // Atomic castling rights
    pub const WK: Castling = Castling(1);
    pub const WQ: Castling = Castling(2);
    pub const BK: Castling = Castling(4);
    pub const BQ: Castling = Castling(8);
    // Board colour castling rights
    pub const WHITE_CASTLING: Castling = Castling(3);
    pub const BLACK_CASTLING: Castling = Castling(12);
    // All or nothing castling rights
    pub const ALL: Castling = Castling(15);
    pub const NONE: Castling = Castling(0);

    /// The four atomic rights in `KQkq` order
    pub const RIGHTS: [Castling; 4] = [Castling::WK, Castling::WQ, Castling::BK, Castling::BQ];

    /// Helper function to check if any of `right` is held
    #[inline]
    pub const fn has(self, right: Castling) -> bool {
        self.0 & right.0 != 0
    }

    /// Helper function to set castling rights
    #[inline]
    pub fn set(&mut self, right: Castling) {
        *self |= right;
    }

    /// Helper function to remove castling rights
    #[inline]
    pub fn remove(&mut self, right: Castling) {
        *self &= !right;
    }

    /// All rights belonging to `colour`
    #[inline]
    pub const fn colour(colour: Colour) -> Self {
        match colour {
            Colour::White => Castling::WHITE_CASTLING,
            Colour::Black => Castling::BLACK_CASTLING,
        }
    }

    /// Home square of the king that owns an atomic right
    #[inline]
    pub const fn king_home(self) -> Square {
        debug_assert!(self.0.count_ones() == 1, "expected an atomic castling right");
        match self {
            Castling::WK | Castling::WQ => Square::E1,
            _ => Square::E8,
        }
    }

    /// Home square of the rook that owns an atomic right
    #[inline]
    pub const fn rook_home(self) -> Square {
        debug_assert!(self.0.count_ones() == 1, "expected an atomic castling right");
        match self {
            Castling::WK => Square::H1,
            Castling::WQ => Square::A1,
            Castling::BK => Square::H8,
            _ => Square::A8,
        }
    }
}

impl std::ops::Not for Castling {
    type Output = Self;

    /// Invert the bits to give the opposite castling rights
    #[inline]
    fn not(self) -> Self::Output {
        Castling(!self.0 & 0x0F)
    }
}

impl std::fmt::Display for Castling {
    /// Displays castling right in the `KQkq` format
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }

        for (right, c) in Castling::RIGHTS.into_iter().zip(['K', 'Q', 'k', 'q']) {
            if self.has(right) {
                write!(f, "{c}")?;
            }
        }

        Ok(())
    }
}

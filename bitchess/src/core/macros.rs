/******************************************\
|==========================================|
|       Macro: impl_from_to_primitive      |
|==========================================|
\******************************************/

/// Generates `from_unchecked` and `index` for a fieldless `#[repr(u8)]` enum with a `NUM` constant.
///
/// The second arm targets enums backed by another primitive (the move kind is `u16`) and only
/// generates `from_unchecked`.
#[macro_export]
macro_rules! impl_from_to_primitive {
    ($enum_name:ident) => {
        impl $enum_name {
            #[doc=concat!("Converts a raw `u8` discriminant into a ", stringify!($enum_name))]
            /// ## Safety
            /// - `index` must be a valid discriminant, i.e. `index < Self::NUM`
            #[inline]
            pub const unsafe fn from_unchecked(index: u8) -> Self {
                debug_assert!((index as usize) < Self::NUM, "Index out of bounds");
                unsafe { std::mem::transmute(index) }
            }

            #[doc=concat!("Returns the discriminant of a ", stringify!($enum_name), " as a `usize` table index")]
            #[inline]
            pub const fn index(&self) -> usize {
                *self as usize
            }
        }
    };

    ($enum_name:ident, $type_name:ty) => {
        impl $enum_name {
            #[doc=concat!("Converts a raw `", stringify!($type_name), "` discriminant into a ", stringify!($enum_name))]
            /// ## Safety
            /// - `index` must be a valid discriminant
            #[inline]
            pub const unsafe fn from_unchecked(index: $type_name) -> Self {
                debug_assert!((index as usize) < Self::NUM, "Index out of bounds");
                unsafe { std::mem::transmute(index) }
            }
        }
    };
}

/******************************************\
|==========================================|
|          Macro: impl_enum_iter           |
|==========================================|
\******************************************/

/// Generates `iter()` over every variant in discriminant order.
/// Requires `NUM` and the `u8` arm of [`impl_from_to_primitive`].
#[macro_export]
macro_rules! impl_enum_iter {
    ($enum_name:ident) => {
        impl $enum_name {
            #[doc=concat!("Iterates over every ", stringify!($enum_name), " in discriminant order")]
            pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
                (0..Self::NUM as u8).map(|i| unsafe { Self::from_unchecked(i) })
            }
        }
    };
}

/******************************************\
|==========================================|
|             Macro: impl_op               |
|==========================================|
\******************************************/

/// Implements a binary operator for a single-field tuple struct, either against itself or
/// against a primitive right-hand side (used for shifts).
#[macro_export]
macro_rules! impl_op {
    ($struct_name:ident, $op_name:ident, $method_name:ident, $op:tt) => {
        impl std::ops::$op_name for $struct_name {
            type Output = Self;

            #[inline]
            fn $method_name(self, rhs: Self) -> Self::Output {
                Self(self.0 $op rhs.0)
            }
        }
    };
    ($struct_name:ident, $op_name:ident, $method_name:ident, $op:tt, $other_type:ident) => {
        impl std::ops::$op_name<$other_type> for $struct_name {
            type Output = Self;

            #[inline]
            fn $method_name(self, rhs: $other_type) -> Self::Output {
                Self(self.0 $op rhs)
            }
        }
    }
}

/******************************************\
|==========================================|
|          Macro: impl_assign_op           |
|==========================================|
\******************************************/

/// Implements the compound assignment form of an operator already provided by [`impl_op`].
#[macro_export]
macro_rules! impl_assign_op {
    ($struct_name:ident, $op_name:ident, $method_name:ident, $op:tt, $other_type:ident) => {
        impl std::ops::$op_name<$other_type> for $struct_name {
            #[inline]
            fn $method_name(&mut self, rhs: $other_type) {
                *self = *self $op rhs;
            }
        }
    };
}

/******************************************\
|==========================================|
|           Macro: impl_bit_ops            |
|==========================================|
\******************************************/

/// `&`, `|`, `^` and their assignment forms between two values of the same newtype.
#[macro_export]
macro_rules! impl_bit_ops {
    ($struct_name:ident) => {
        $crate::impl_op!($struct_name, BitAnd, bitand, &);
        $crate::impl_op!($struct_name, BitOr, bitor, |);
        $crate::impl_op!($struct_name, BitXor, bitxor, ^);

        $crate::impl_assign_op!($struct_name, BitAndAssign, bitand_assign, &, $struct_name);
        $crate::impl_assign_op!($struct_name, BitOrAssign, bitor_assign, |, $struct_name);
        $crate::impl_assign_op!($struct_name, BitXorAssign, bitxor_assign, ^, $struct_name);
    };
}

/******************************************\
|==========================================|
|          Macro: impl_shift_ops           |
|==========================================|
\******************************************/

/// `<<`, `>>`, their assignment forms, and `!` for a newtype over an unsigned integer.
/// Shifts take a `u32` amount so callers can pass square distances directly.
#[macro_export]
macro_rules! impl_shift_ops {
    ($struct_name:ident) => {
        $crate::impl_op!($struct_name, Shl, shl, <<, u32);
        $crate::impl_op!($struct_name, Shr, shr, >>, u32);

        impl std::ops::Not for $struct_name {
            type Output = Self;

            #[inline]
            fn not(self) -> Self::Output {
                Self(!self.0)
            }
        }

        $crate::impl_assign_op!($struct_name, ShlAssign, shl_assign, <<, u32);
        $crate::impl_assign_op!($struct_name, ShrAssign, shr_assign, >>, u32);
    };
}

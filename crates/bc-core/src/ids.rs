//! Strongly typed identifier wrappers for riders and cars.
//!
//! Both ids are `Copy + Ord + Hash` and index directly into the park's
//! per-rider and per-car arrays via `.index()`.  `INVALID` doubles as the
//! "empty seat" marker in a car's occupant cell.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `false` for the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }

            /// Iterate the ids `0..count` in ascending order.
            pub fn range(count: usize) -> impl Iterator<Item = $name> {
                (0..count as $inner).map($name)
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", $label, self.0)
            }
        }
    };
}

typed_id! {
    /// Identity of a park guest, `0..riders`.
    pub struct RiderId(u32) => "Rider";
}

typed_id! {
    /// Identity of a bumper car, `0..cars`.
    pub struct CarId(u32) => "Car";
}

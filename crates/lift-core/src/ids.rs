//! Strongly typed identifier wrappers.
//!
//! The inner integer is `pub` so callers can index `Vec`s directly, but the
//! `.index()` helper reads better at call sites.

use std::fmt;

/// Generate a typed wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Position of an elevator in the building's fleet.
    pub struct ElevatorId(u32);
}

typed_id! {
    /// A floor number.  `Floor(0)` is the ground floor where every rider
    /// boards; destinations are `1..=floors`.
    pub struct Floor(u32);
}

impl Floor {
    pub const GROUND: Floor = Floor(0);

    #[inline]
    pub fn is_ground(self) -> bool {
        self.0 == 0
    }

    /// Index of this destination's completed-rider bucket (`floor - 1`).
    ///
    /// Returns `None` for the ground floor, which is never a destination.
    #[inline]
    pub fn bucket(self) -> Option<usize> {
        self.index().checked_sub(1)
    }

    /// Floors climbed going from `self` up to `to`, or `None` if `to` is below.
    #[inline]
    pub fn rise_to(self, to: Floor) -> Option<u32> {
        to.0.checked_sub(self.0)
    }
}

//! Change significance
//!
//! A three-step lattice used to summarise how much two snapshots of a
//! value differ, so a host can decide whether an edit is worth persisting.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// How significant a change between two snapshots is.
///
/// Ordered `None < Small < Significant`; adding two values yields the more
/// severe one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difference {
    /// Nothing changed
    #[default]
    None,
    /// Cosmetic change (cursor movement, pending style, in-progress word)
    Small,
    /// Real content change
    Significant,
}

impl Difference {
    /// `Significant` when `changed`, otherwise `None`
    pub fn significant_if(changed: bool) -> Self {
        if changed {
            Difference::Significant
        } else {
            Difference::None
        }
    }

    /// `Small` when `changed`, otherwise `None`
    pub fn small_if(changed: bool) -> Self {
        if changed {
            Difference::Small
        } else {
            Difference::None
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Difference::None
    }

    pub fn is_significant(&self) -> bool {
        *self == Difference::Significant
    }
}

impl Add for Difference {
    type Output = Difference;

    fn add(self, other: Difference) -> Difference {
        self.max(other)
    }
}

impl AddAssign for Difference {
    fn add_assign(&mut self, other: Difference) {
        *self = *self + other;
    }
}

impl Sum for Difference {
    fn sum<I: Iterator<Item = Difference>>(iter: I) -> Self {
        iter.fold(Difference::None, |acc, d| acc + d)
    }
}

use std::fmt;
use std::ops::Mul;

use bitflags::bitflags;

use crate::Float;

bitflags! {
    /// Orthonormal basis blade of the conformal algebra, as a set of axes.
    ///
    /// The blade is the product of its axes in bit order `e₋ e₊ x y z`.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Axes: u8 {
        /// Scalar
        const SCALAR = 0;

        /// `e₋`, squares to `−1`
        const E_MINUS = 1 << 0;
        /// `e₊`, squares to `+1`
        const E_PLUS = 1 << 1;
        /// `e₋e₊`, which equals `e0∧ei`
        const E_PLANE = Self::E_MINUS.bits() | Self::E_PLUS.bits();

        /// `e1`
        const X = 1 << 2;
        /// `e2`
        const Y = 1 << 3;
        /// `e3`
        const Z = 1 << 4;
        /// `e1e2e3`
        const EUCLIDEAN = Self::X.bits() | Self::Y.bits() | Self::Z.bits();
    }
}

impl fmt::Display for Axes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in Self::NAMES.iter().enumerate() {
            if self.bits() & (1 << i) != 0 {
                f.write_str(name)?;
            }
        }
        Ok(())
    }
}

impl Axes {
    /// Name of each axis, in bit order.
    pub const NAMES: [&'static str; 5] = ["e₋", "e₊", "x", "y", "z"];

    /// Returns the Euclidean axis with index `i`, where `0` is `x`.
    pub const fn euclidean(i: u8) -> Self {
        Self::from_bits_truncate(Self::X.bits() << i)
    }

    /// Returns the number of axes.
    pub const fn count(self) -> u8 {
        self.bits().count_ones() as u8
    }

    /// Returns `±1` such that reversing the order of the axes multiplies the
    /// blade by it.
    pub const fn sign_of_reverse(self) -> Float {
        // k axes take k(k-1)/2 transpositions to reverse
        if self.count() % 4 >= 2 { -1.0 } else { 1.0 }
    }
}

/// Sign of the geometric product of two blades, relative to the blade of their
/// symmetric difference.
impl Mul for Axes {
    type Output = Float;

    fn mul(self, rhs: Self) -> Float {
        // Each axis of `rhs` moves left past every axis of `self` with a
        // higher bit.
        let mut swaps = 0;
        let mut remaining = rhs.bits();
        while remaining != 0 {
            let bit = remaining.trailing_zeros();
            swaps += (self.bits() >> bit >> 1).count_ones();
            remaining &= remaining - 1;
        }

        let squares_to_minus_one = self.intersects(Self::E_MINUS) && rhs.intersects(Self::E_MINUS);
        if (swaps % 2 == 1) != squares_to_minus_one {
            -1.0
        } else {
            1.0
        }
    }
}

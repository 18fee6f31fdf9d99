use std::fmt;

use bitflags::bitflags;
use itertools::Itertools;

use super::Axes;

bitflags! {
    /// Basis blade label in the null basis `{e0, e1, e2, e3, ei}`.
    ///
    /// `e0` is the origin `o` and `ei` is the point at infinity `∞`. A label
    /// always denotes the outer product of its vectors in the order
    /// `e0 e1 e2 e3 ei`, so `E123I` is `e1∧e2∧e3∧ei`.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct NullBlade: u8 {
        /// Scalar (no vectors)
        const SCALAR = 0;

        /// Origin
        const E0 = 1 << 0;
        /// Euclidean X axis
        const E1 = 1 << 1;
        /// Euclidean Y axis
        const E2 = 1 << 2;
        /// Euclidean Z axis
        const E3 = 1 << 3;
        /// Point at infinity
        const EI = 1 << 4;

        /// `e1∧e2`
        const E12 = Self::E1.bits() | Self::E2.bits();
        /// `e1∧e2∧e3`
        const E123 = Self::E12.bits() | Self::E3.bits();
        /// `e0∧e1∧e2∧e3`
        const E0123 = Self::E0.bits() | Self::E123.bits();
        /// `e1∧e2∧e3∧ei`
        const E123I = Self::E123.bits() | Self::EI.bits();
        /// `e0∧e1∧e2∧e3∧ei`
        const E0123I = Self::E0.bits() | Self::E123I.bits();
    }
}

impl fmt::Display for NullBlade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "1");
        }
        let names = (0..5)
            .filter(|&i| self.bits() & (1 << i) != 0)
            .filter_map(|i| Self::NAMES.get(i))
            .join("∧");
        write!(f, "{names}")
    }
}

impl NullBlade {
    /// Name of each null basis vector.
    pub const NAMES: &'static [&'static str] = &["e0", "e1", "e2", "e3", "ei"];

    /// Returns the Euclidean basis vector with index `i`, where `0` is `e1`.
    pub const fn euclidean(i: u8) -> Self {
        Self::from_bits_truncate(Self::E1.bits() << i)
    }

    /// Returns the orthonormal axes of the Euclidean part of the label.
    pub fn euclidean_axes(self) -> Axes {
        Axes::from_bits_truncate(self.intersection(Self::E123).bits() << 1)
    }

    /// Iterates over every label, in order of bitmask.
    pub fn iter_all() -> impl Iterator<Item = Self> {
        (0..=Self::all().bits()).map(Self::from_bits_truncate)
    }
}

//! Conformal geometric algebra primitives for three-dimensional Euclidean
//! space.
//!
//! The algebra is generated by the three Euclidean axes plus two extra axes
//! `e₋` and `e₊`. Objects such as points and spheres are [`cga::Multivector`]
//! values, and transformations are applied by conjugating them with versors.
//! Everything here is a plain value type; there is no global algebra state.

pub use {approx, smallvec};

/// Floating-point type used for the algebra.
pub type Float = f64;

/// Absolute tolerance for approximate comparisons.
pub const EPSILON: Float = 0.000001;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
    ($a:expr, $b:expr, epsilon = $eps:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $eps)
    };
}

#[macro_use]
mod impl_macros;

pub mod approx_cmp;
pub mod cga;
pub mod util;

/// Structs, traits, and constants.
pub mod prelude {
    pub use approx::AbsDiffEq;

    pub use crate::approx_cmp::*;
    pub use crate::cga::{Axes, Multivector, NullBlade, Term};
    pub use crate::{EPSILON, Float, cga};
}
pub use prelude::*;

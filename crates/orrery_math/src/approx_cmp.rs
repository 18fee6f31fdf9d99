//! Floating-point comparisons with the crate-wide [`EPSILON`].

pub use approx::AbsDiffEq;
use num_traits::Zero;

use crate::{EPSILON, Float};

/// Returns whether `a` and `b` differ by at most [`EPSILON`]. Equal infinities
/// compare equal.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float>>(a: &T, b: &T) -> bool {
    a == b || a.abs_diff_eq(b, EPSILON)
}

/// Returns whether `x` is within [`EPSILON`] of zero.
pub fn is_approx_zero<T: AbsDiffEq<Epsilon = Float> + Zero>(x: &T) -> bool {
    approx_eq(x, &T::zero())
}

/// Returns whether `a` and `b` differ by at most `tolerance` relative to the
/// larger of their magnitudes.
pub fn relative_eq(a: Float, b: Float, tolerance: Float) -> bool {
    a == b || (a - b).abs() <= tolerance * Float::max(a.abs(), b.abs())
}

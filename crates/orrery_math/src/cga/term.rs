use std::fmt;
use std::ops::{BitXor, Mul, MulAssign, Neg, Shl};

use crate::*;

/// Scalar multiple of a single orthonormal basis blade.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Term {
    /// Coefficient.
    pub coef: Float,
    /// Basis blade.
    pub axes: Axes,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.axes.is_empty() {
            write!(f, "{}", self.coef)
        } else {
            write!(f, "{} {}", self.coef, self.axes)
        }
    }
}

impl approx::AbsDiffEq for Term {
    type Epsilon = Float;

    fn default_epsilon() -> Float {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Float) -> bool {
        self.axes == other.axes && (self.coef - other.coef).abs() <= epsilon
    }
}

impl Neg for Term {
    type Output = Term;

    fn neg(self) -> Term {
        Term::new(-self.coef, self.axes)
    }
}

/// Geometric product. Axes shared by both terms cancel out, contributing only
/// their square to the sign.
impl Mul for Term {
    type Output = Term;

    fn mul(self, rhs: Term) -> Term {
        let sign = self.axes * rhs.axes;
        Term::new(sign * self.coef * rhs.coef, self.axes.symmetric_difference(rhs.axes))
    }
}
impl MulAssign for Term {
    fn mul_assign(&mut self, rhs: Term) {
        *self = *self * rhs;
    }
}

/// Outer product, or `None` if the terms share an axis.
#[allow(clippy::suspicious_arithmetic_impl)]
impl BitXor for Term {
    type Output = Option<Term>;

    fn bitxor(self, rhs: Term) -> Option<Term> {
        (!self.axes.intersects(rhs.axes)).then(|| self * rhs)
    }
}

/// Left contraction, or `None` unless every axis of `self` is in `rhs`.
impl Shl for Term {
    type Output = Option<Term>;

    fn shl(self, rhs: Term) -> Option<Term> {
        rhs.axes.contains(self.axes).then(|| self * rhs)
    }
}

impl Mul<Float> for Term {
    type Output = Term;

    fn mul(self, rhs: Float) -> Term {
        Term::new(self.coef * rhs, self.axes)
    }
}

impl Term {
    /// Unit pseudoscalar `e0∧e1∧e2∧e3∧ei`.
    ///
    /// `e0∧ei = e₋e₊`, and carrying `ei` past the three Euclidean axes to get
    /// there negates the orthonormal blade `e₋e₊xyz`.
    pub const PSEUDOSCALAR: Self = Term::new(-1.0, Axes::all());
    /// Inverse of [`Term::PSEUDOSCALAR`]. The pseudoscalar squares to `−1`.
    pub const INVERSE_PSEUDOSCALAR: Self = Term::new(1.0, Axes::all());

    /// Constructs a term.
    pub const fn new(coef: Float, axes: Axes) -> Self {
        Term { coef, axes }
    }
    /// Constructs a scalar term.
    pub const fn scalar(coef: Float) -> Self {
        Term::new(coef, Axes::SCALAR)
    }
    /// Constructs a basis blade with a coefficient of one.
    pub const fn unit(axes: Axes) -> Self {
        Term::new(1.0, axes)
    }

    /// Returns whether the coefficient is within [`EPSILON`] of zero.
    pub fn is_zero(self) -> bool {
        is_approx_zero(&self.coef)
    }

    /// Returns the number of axes in the basis blade.
    pub const fn grade(self) -> u8 {
        self.axes.count()
    }

    /// Returns the term with the order of its axes reversed.
    #[must_use]
    pub fn reverse(self) -> Self {
        self * self.axes.sign_of_reverse()
    }
    /// Returns the multiplicative inverse, or `None` if the basis blade is
    /// null or the coefficient is zero.
    #[must_use]
    pub fn inverse(self) -> Option<Self> {
        let rev = self.reverse();
        util::try_div(rev, self.dot(rev))
    }

    /// Returns the scalar part of the geometric product of two terms.
    pub fn dot(self, other: Self) -> Float {
        if self.axes == other.axes {
            (self * other).coef
        } else {
            0.0
        }
    }
}

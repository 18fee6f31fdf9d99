use std::fmt;
use std::iter::Sum;
use std::ops::{
    Add, AddAssign, BitXor, BitXorAssign, Index, Mul, MulAssign, Neg, Shl, ShlAssign, Sub,
    SubAssign,
};

use approx::AbsDiffEq;
use itertools::Itertools;
use smallvec::{SmallVec, smallvec_inline};

use super::{Axes, NullBlade, Term};
use crate::{EPSILON, Float, is_approx_zero, util};

/// Linear combination of orthonormal basis blades, stored as at most one term
/// per blade, sorted by blade.
#[derive(Default, Clone, PartialEq)]
pub struct Multivector(SmallVec<[Term; 2]>);

/// Formats the multivector in the null basis, which is how conformal objects
/// are usually written down.
impl fmt::Display for Multivector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut components = NullBlade::iter_all()
            .map(|blade| (blade, self.component(blade)))
            .filter(|(_blade, coef)| !is_approx_zero(coef));

        let Some((blade, coef)) = components.next() else {
            return fmt::Display::fmt(&0.0, f);
        };
        write_component(f, blade, coef)?;
        for (blade, coef) in components {
            write!(f, " + ")?;
            write_component(f, blade, coef)?;
        }
        Ok(())
    }
}

fn write_component(f: &mut fmt::Formatter<'_>, blade: NullBlade, coef: Float) -> fmt::Result {
    fmt::Display::fmt(&coef, f)?;
    if !blade.is_empty() {
        write!(f, " {blade}")?;
    }
    Ok(())
}

impl fmt::Debug for Multivector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|term| {
                let blade = if term.axes.is_empty() {
                    "1".to_string()
                } else {
                    term.axes.to_string()
                };
                (blade, term.coef)
            }))
            .finish()
    }
}

impl AbsDiffEq for Multivector {
    type Epsilon = Float;

    fn default_epsilon() -> Float {
        EPSILON
    }

    /// Compares every component, including those missing from one side.
    fn abs_diff_eq(&self, other: &Self, epsilon: Float) -> bool {
        self.0
            .iter()
            .chain(&other.0)
            .all(|term| (self[term.axes] - other[term.axes]).abs() <= epsilon)
    }
}

impl From<Term> for Multivector {
    fn from(term: Term) -> Self {
        Multivector::ZERO + term
    }
}

impl Index<Axes> for Multivector {
    type Output = Float;

    fn index(&self, axes: Axes) -> &Float {
        self.position(axes).map_or(&0.0, |i| &self.0[i].coef)
    }
}

impl Neg for Multivector {
    type Output = Multivector;

    fn neg(self) -> Multivector {
        self * -1.0
    }
}
impl Neg for &Multivector {
    type Output = Multivector;

    fn neg(self) -> Multivector {
        self.clone() * -1.0
    }
}

impl Mul<Float> for Multivector {
    type Output = Multivector;

    fn mul(mut self, rhs: Float) -> Multivector {
        self.0.iter_mut().for_each(|term| term.coef *= rhs);
        self.0.retain(|term| term.coef != 0.0);
        self
    }
}
impl Mul<Float> for &Multivector {
    type Output = Multivector;

    fn mul(self, rhs: Float) -> Multivector {
        self.clone() * rhs
    }
}

/// Adds a term. Only an exact cancellation removes a component, so that
/// tiny coefficients survive until [`Multivector::round_zero()`].
impl AddAssign<Term> for Multivector {
    fn add_assign(&mut self, rhs: Term) {
        match self.0.binary_search_by_key(&rhs.axes, |term| term.axes) {
            Ok(i) => {
                self.0[i].coef += rhs.coef;
                if self.0[i].coef == 0.0 {
                    self.0.remove(i);
                }
            }
            Err(i) => {
                if rhs.coef != 0.0 {
                    self.0.insert(i, rhs);
                }
            }
        }
    }
}
impl SubAssign<Term> for Multivector {
    fn sub_assign(&mut self, rhs: Term) {
        *self += -rhs;
    }
}
/// Right geometric product with a term.
impl MulAssign<Term> for Multivector {
    fn mul_assign(&mut self, rhs: Term) {
        self.0.iter_mut().for_each(|term| *term *= rhs);
        self.0.retain(|term| term.coef != 0.0);
        self.0.sort_unstable_by_key(|term| term.axes);
    }
}
impl_term_operand!(Add::add, AddAssign::add_assign);
impl_term_operand!(Sub::sub, SubAssign::sub_assign);
impl_term_operand!(Mul::mul, MulAssign::mul_assign);

/// Left geometric product with a term.
impl Mul<&Multivector> for Term {
    type Output = Multivector;

    fn mul(self, rhs: &Multivector) -> Multivector {
        rhs.terms().iter().map(|&term| self * term).sum()
    }
}
impl Mul<Multivector> for Term {
    type Output = Multivector;

    fn mul(self, rhs: Multivector) -> Multivector {
        self * &rhs
    }
}

impl Add for &Multivector {
    type Output = Multivector;

    fn add(self, rhs: Self) -> Multivector {
        rhs.terms().iter().fold(self.clone(), |sum, &term| sum + term)
    }
}
impl_by_ref_forwarding!(Add::add, AddAssign::add_assign);

impl Sub for &Multivector {
    type Output = Multivector;

    fn sub(self, rhs: Self) -> Multivector {
        rhs.terms().iter().fold(self.clone(), |diff, &term| diff - term)
    }
}
impl_by_ref_forwarding!(Sub::sub, SubAssign::sub_assign);

impl_bilinear_product!(
    /// Geometric product.
    Mul::mul, MulAssign::mul_assign,
    |a, b| Some(a * b),
);
impl_bilinear_product!(
    /// Outer product.
    BitXor::bitxor, BitXorAssign::bitxor_assign,
    |a, b| a ^ b,
);
impl_bilinear_product!(
    /// Left contraction.
    Shl::shl, ShlAssign::shl_assign,
    |a, b| a << b,
);

impl Sum for Multivector {
    fn sum<I: Iterator<Item = Multivector>>(iter: I) -> Self {
        iter.fold(Multivector::ZERO, |sum, m| sum + m)
    }
}
impl Sum<Term> for Multivector {
    fn sum<I: Iterator<Item = Term>>(iter: I) -> Self {
        iter.fold(Multivector::ZERO, |sum, term| sum + term)
    }
}

impl Multivector {
    /// Zero multivector.
    pub const ZERO: Self = Self(SmallVec::new_const());

    /// Origin `o = ½(e₋ − e₊)`.
    pub const NO: Self = Self(smallvec_inline![
        Term::new(0.5, Axes::E_MINUS),
        Term::new(-0.5, Axes::E_PLUS),
    ]);
    /// Point at infinity `∞ = e₋ + e₊`.
    pub const NI: Self = Self(smallvec_inline![
        Term::new(1.0, Axes::E_MINUS),
        Term::new(1.0, Axes::E_PLUS),
    ]);

    /// Returns a scalar.
    pub fn scalar(s: Float) -> Self {
        Term::scalar(s).into()
    }
    /// Returns the scalar `1`.
    pub fn identity() -> Self {
        Self::scalar(1.0)
    }
    /// Returns the Euclidean vector `v[0]·e1 + v[1]·e2 + v[2]·e3`.
    pub fn vector(v: [Float; 3]) -> Self {
        (0..)
            .zip(v)
            .map(|(i, coef)| Term::new(coef, Axes::euclidean(i)))
            .sum()
    }
    /// Returns the conformal point `o + x + ½‖x‖²∞`.
    pub fn point(x: [Float; 3]) -> Self {
        let half_mag2 = x.iter().map(|c| c * c).sum::<Float>() / 2.0;
        Self::NO + Self::vector(x) + Self::NI * half_mag2
    }

    /// Returns `e0`, the origin.
    pub fn e0() -> Self {
        Self::NO
    }
    /// Returns `e1`.
    pub fn e1() -> Self {
        Term::unit(Axes::X).into()
    }
    /// Returns `e2`.
    pub fn e2() -> Self {
        Term::unit(Axes::Y).into()
    }
    /// Returns `e3`.
    pub fn e3() -> Self {
        Term::unit(Axes::Z).into()
    }
    /// Returns `ei`, the point at infinity.
    pub fn ei() -> Self {
        Self::NI
    }
    /// Returns the unit pseudoscalar `e0∧e1∧e2∧e3∧ei`.
    pub fn pseudoscalar() -> Self {
        Term::PSEUDOSCALAR.into()
    }

    fn position(&self, axes: Axes) -> Option<usize> {
        self.0.binary_search_by_key(&axes, |term| term.axes).ok()
    }

    /// Returns the coefficient of an orthonormal blade, or `None` if the
    /// multivector has no such term.
    pub fn get(&self, axes: Axes) -> Option<Float> {
        Some(self.0[self.position(axes)?].coef)
    }
    /// Returns the coefficient of `o` times the blade `rest`.
    pub fn get_no(&self, rest: Axes) -> Float {
        self[rest | Axes::E_MINUS] - self[rest | Axes::E_PLUS]
    }
    /// Returns the coefficient of `∞` times the blade `rest`.
    pub fn get_ni(&self, rest: Axes) -> Float {
        (self[rest | Axes::E_MINUS] + self[rest | Axes::E_PLUS]) / 2.0
    }
    /// Returns the coefficient of a blade of the null basis.
    pub fn component(&self, blade: NullBlade) -> Float {
        let euclidean = blade.euclidean_axes();
        // `ei` is written after the Euclidean axes.
        let ei_sign = match euclidean.count() % 2 {
            0 => 1.0,
            _ => -1.0,
        };
        match (blade.contains(NullBlade::E0), blade.contains(NullBlade::EI)) {
            (false, false) => self[euclidean],
            (true, false) => self.get_no(euclidean),
            (false, true) => ei_sign * self.get_ni(euclidean),
            (true, true) => ei_sign * self[euclidean | Axes::E_PLANE],
        }
    }

    /// Returns whether every coefficient is within [`EPSILON`] of zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|term| term.is_zero())
    }

    /// Returns the terms, sorted by blade.
    pub fn terms(&self) -> &[Term] {
        &self.0
    }

    /// Returns the reverse.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self(self.0.iter().map(|&term| term.reverse()).collect())
    }
    /// Returns the versor inverse `X̃ / (X·X̃)`, or `None` if it does not
    /// exist.
    ///
    /// The result is only meaningful for blades and versors.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let rev = self.reverse();
        let ret = util::try_div(&rev, self.dot(&rev))?;
        ret.0
            .iter()
            .all(|term| term.coef.is_finite())
            .then_some(ret)
    }

    /// Returns the scalar product.
    pub fn dot(&self, other: &Multivector) -> Float {
        self.0
            .iter()
            .filter_map(|&a| Some(a.dot(Term::new(other.get(a.axes)?, a.axes))))
            .sum()
    }
    /// Returns `X·X̃`.
    pub fn quadratic_norm(&self) -> Float {
        self.dot(&self.reverse())
    }

    /// Returns the dual `X·I⁻¹`.
    #[must_use]
    pub fn dual(&self) -> Self {
        self * Term::INVERSE_PSEUDOSCALAR
    }

    /// Returns the multivector without terms whose coefficient is smaller than
    /// `epsilon` in absolute value.
    #[must_use]
    pub fn round_zero(&self, epsilon: Float) -> Self {
        self.filter_terms(|term| term.coef.abs() >= epsilon)
    }

    /// Returns the terms for which `f` returns `true`.
    #[must_use]
    pub fn filter_terms(&self, mut f: impl FnMut(Term) -> bool) -> Self {
        Self(self.0.iter().copied().filter(|&term| f(term)).collect())
    }
    /// Returns the terms of grade `grade`.
    #[must_use]
    pub fn grade_project(&self, grade: u8) -> Self {
        self.filter_terms(|term| term.grade() == grade)
    }
    /// Returns the grade shared by every term that is not approximately zero,
    /// or `None` if there is more than one. Zero has grade `0`.
    pub fn homogeneous_grade(&self) -> Option<u8> {
        let grades = self
            .0
            .iter()
            .filter(|term| !term.is_zero())
            .map(|term| term.grade());
        match grades.dedup().at_most_one() {
            Ok(grade) => Some(grade.unwrap_or(0)),
            Err(_) => None,
        }
    }
}

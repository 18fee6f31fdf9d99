//! Versors describing conformal transformations, and the operations that
//! apply them to objects in the algebra.

use std::fmt;

use orrery_math::{Float, Multivector};
use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// Coefficients smaller than this are dropped after a rotation or a scaling.
pub const ROUNDING_EPSILON: Float = 1e-10;

/// Rotation angle, in degrees, used when a rotation step gives none.
pub const DEFAULT_ROTATE_DEGREES: Float = 90.0;

/// Returns the default translation direction `e3`.
pub fn default_direction() -> Multivector {
    Multivector::e3()
}
/// Returns the default rotation plane `e1∧e2`.
pub fn default_plane() -> Multivector {
    Multivector::e1() ^ Multivector::e2()
}

/// Translator, rotor, or dilator.
///
/// A versor is built for a single transform call, applied once by conjugation
/// `V·X·V⁻¹`, and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Versor(Multivector);

impl fmt::Display for Versor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Versor {
    /// Constructs a translator `1 − ½·d·t·∞` that moves objects by `distance`
    /// along the Euclidean vector `direction`.
    pub fn translator(distance: Float, direction: &Multivector) -> Self {
        Self(Multivector::identity() - direction * &Multivector::NI * (distance / 2.0))
    }

    /// Constructs a rotor `cos(θ/2) − B·sin(θ/2)` that rotates objects by
    /// `degrees` in the plane of the bivector `plane`.
    pub fn rotor(degrees: Float, plane: &Multivector) -> Self {
        let half_angle = degrees.to_radians() / 2.0;
        let (sin, cos) = half_angle.sin_cos();
        Self(Multivector::scalar(cos) - plane * sin)
    }

    /// Constructs a dilator `1 − ((1−f)/(1+f))·e0∧ei` that scales objects by
    /// `factor` about the origin.
    ///
    /// Returns an error for `factor = −1`, where the coefficient is undefined.
    pub fn dilator(factor: Float) -> Result<Self, GeometryError> {
        if factor == -1.0 || !factor.is_finite() {
            return Err(GeometryError::InvalidScaleFactor(factor));
        }
        let coef = (1.0 - factor) / (1.0 + factor);
        let e0_ei = Multivector::e0() ^ Multivector::ei();
        Ok(Self(Multivector::identity() - e0_ei * coef))
    }

    /// Returns the versor's multivector.
    pub fn multivector(&self) -> &Multivector {
        &self.0
    }

    /// Returns the inverse of the versor.
    pub fn inverse(&self) -> Result<Multivector, GeometryError> {
        self.0.inverse().ok_or(GeometryError::NonInvertibleVersor)
    }

    /// Applies the versor to `obj` by conjugation: `V·obj·V⁻¹`.
    pub fn apply(&self, obj: &Multivector) -> Result<Multivector, GeometryError> {
        let inverse = self.inverse()?;
        Ok(&self.0 * obj * inverse)
    }
}

/// Translates `obj` by `distance` along `direction`.
///
/// Unlike [`rotate()`] and [`scale()`], the result is not rounded.
pub fn translate(
    obj: &Multivector,
    distance: Float,
    direction: &Multivector,
) -> Result<Multivector, GeometryError> {
    Versor::translator(distance, direction).apply(obj)
}

/// Rotates `obj` by `degrees` in the plane of the bivector `plane`, dropping
/// coefficients below [`ROUNDING_EPSILON`].
pub fn rotate(
    obj: &Multivector,
    degrees: Float,
    plane: &Multivector,
) -> Result<Multivector, GeometryError> {
    let ret = Versor::rotor(degrees, plane).apply(obj)?;
    Ok(ret.round_zero(ROUNDING_EPSILON))
}

/// Scales `obj` by `factor` about the origin, dropping coefficients below
/// [`ROUNDING_EPSILON`].
///
/// A factor of `0` collapses everything onto the origin, and has no inverse
/// dilator; it is rejected along with `−1`.
pub fn scale(obj: &Multivector, factor: Float) -> Result<Multivector, GeometryError> {
    if factor < 0.0 {
        log::warn!("negative scale factor {factor} turns objects inside out");
    }
    let ret = Versor::dilator(factor)?
        .apply(obj)
        .map_err(|_| GeometryError::InvalidScaleFactor(factor))?;
    Ok(ret.round_zero(ROUNDING_EPSILON))
}

/// Single transformation step, using the default direction and plane.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Translation along `e3` by a distance.
    Translate(Float),
    /// Uniform scaling about the origin by a factor.
    Scale(Float),
    /// Rotation in the `e1∧e2` plane by an angle in degrees.
    Rotate(Float),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Translate(d) => write!(f, "translate {d}"),
            Transform::Scale(s) => write!(f, "scale {s}"),
            Transform::Rotate(deg) => write!(f, "rotate {deg}°"),
        }
    }
}

impl Transform {
    /// Applies the transformation to `obj`.
    pub fn apply(self, obj: &Multivector) -> Result<Multivector, GeometryError> {
        log::debug!("applying {self}");
        match self {
            Transform::Translate(distance) => translate(obj, distance, &default_direction()),
            Transform::Scale(factor) => scale(obj, factor),
            Transform::Rotate(degrees) => rotate(obj, degrees, &default_plane()),
        }
    }
}

//! [Conformal geometric algebra](https://w.wiki/7SP3) over three-dimensional
//! Euclidean space.
//!
//! Multivectors are stored in the orthonormal basis `{e₋, e₊, x, y, z}`.
//! [`Multivector::component()`] reads them back in the null basis
//! `{e0, e1, e2, e3, ei}`.

mod axes;
mod multivector;
mod null_blade;
mod term;

pub use axes::Axes;
pub use multivector::Multivector;
pub use null_blade::NullBlade;
pub use term::Term;

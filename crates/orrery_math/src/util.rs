//! Numeric helpers shared by the algebra.

use std::ops::Mul;

use super::Float;

/// Returns `lhs / rhs`, or `None` if `1 / rhs` is not finite.
pub fn try_div<T: Mul<Float>>(lhs: T, rhs: Float) -> Option<T::Output> {
    let recip = rhs.recip();
    recip.is_finite().then(|| lhs * recip)
}

/// Returns `√n`, or `None` if `n` is negative or not finite.
pub fn try_sqrt(n: Float) -> Option<Float> {
    Some(n.sqrt()).filter(|root| root.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_div() {
        assert_eq!(Some(2.0), try_div(4.0, 2.0));
        assert_eq!(None, try_div(4.0, 0.0));
    }

    #[test]
    fn test_try_sqrt() {
        assert_eq!(Some(3.0), try_sqrt(9.0));
        assert_eq!(None, try_sqrt(-1.0));
    }
}

/// Implements a bilinear product of two multivectors, given the product of
/// two terms as a `fn(Term, Term) -> Option<Term>`. Pairs of terms whose
/// product is `None` contribute nothing.
///
/// Only `&Multivector ∘ &Multivector` does any work; the other operand
/// combinations and the compound assignment operator are forwarded to it.
macro_rules! impl_bilinear_product {
    (
        $(#[$attr:meta])*
        $op:ident::$method:ident, $op_assign:ident::$method_assign:ident,
        $term_product:expr $(,)?
    ) => {
        $(#[$attr])*
        impl $op for &Multivector {
            type Output = Multivector;

            fn $method(self, rhs: Self) -> Multivector {
                let term_product: fn(Term, Term) -> Option<Term> = $term_product;
                itertools::iproduct!(self.terms(), rhs.terms())
                    .filter_map(|(&a, &b)| term_product(a, b))
                    .sum()
            }
        }
        impl_by_ref_forwarding!($op::$method, $op_assign::$method_assign);
    };
}

/// Forwards owned operands of a binary multivector operator, and its compound
/// assignment operator, to the implementation for `&Multivector`.
macro_rules! impl_by_ref_forwarding {
    ($op:ident::$method:ident, $op_assign:ident::$method_assign:ident) => {
        impl $op for Multivector {
            type Output = Multivector;

            fn $method(self, rhs: Multivector) -> Multivector {
                (&self).$method(&rhs)
            }
        }
        impl $op<&Multivector> for Multivector {
            type Output = Multivector;

            fn $method(self, rhs: &Multivector) -> Multivector {
                (&self).$method(rhs)
            }
        }
        impl $op<Multivector> for &Multivector {
            type Output = Multivector;

            fn $method(self, rhs: Multivector) -> Multivector {
                self.$method(&rhs)
            }
        }
        impl $op_assign for Multivector {
            fn $method_assign(&mut self, rhs: Multivector) {
                *self = (&*self).$method(&rhs);
            }
        }
        impl $op_assign<&Multivector> for Multivector {
            fn $method_assign(&mut self, rhs: &Multivector) {
                *self = (&*self).$method(rhs);
            }
        }
    };
}

/// Implements a binary operator between a multivector and a single term in
/// terms of its compound assignment operator.
macro_rules! impl_term_operand {
    ($op:ident::$method:ident, $op_assign:ident::$method_assign:ident) => {
        impl $op<Term> for Multivector {
            type Output = Multivector;

            fn $method(mut self, rhs: Term) -> Multivector {
                $op_assign::$method_assign(&mut self, rhs);
                self
            }
        }
        impl $op<Term> for &Multivector {
            type Output = Multivector;

            fn $method(self, rhs: Term) -> Multivector {
                self.clone().$method(rhs)
            }
        }
    };
}

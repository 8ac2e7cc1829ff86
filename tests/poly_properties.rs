use std::sync::Arc;

use proptest::prelude::*;

use berlekamp::{GaloisField, LogField, Poly};

fn gf8() -> Arc<LogField> {
    Arc::new(LogField::new(2, 3, &[1, 1, 0, 1]).unwrap())
}

/// Raw coefficient vectors; `Poly::new` trims them on intake.
fn arb_coeffs() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..8, 0..12)
}

fn poly(coeffs: Vec<u32>) -> Poly<LogField> {
    Poly::new(gf8(), coeffs)
}

proptest! {
    #[test]
    fn leading_coefficient_is_never_zero(coeffs in arb_coeffs()) {
        let p = poly(coeffs);
        if let Some(lc) = p.leading_coeff() {
            prop_assert!(!p.field().is_zero(lc));
        } else {
            prop_assert!(p.is_zero());
        }
    }
}

proptest! {
    #[test]
    fn addition_commutative(a in arb_coeffs(), b in arb_coeffs()) {
        let (a, b) = (poly(a), poly(b));
        prop_assert_eq!(&a + &b, &b + &a);
    }
}

proptest! {
    #[test]
    fn subtraction_inverts_addition(a in arb_coeffs(), b in arb_coeffs()) {
        let (a, b) = (poly(a), poly(b));
        prop_assert_eq!(&(&a + &b) - &b, a);
    }
}

proptest! {
    #[test]
    fn multiplication_distributes(a in arb_coeffs(), b in arb_coeffs(), c in arb_coeffs()) {
        let (a, b, c) = (poly(a), poly(b), poly(c));
        prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
    }
}

proptest! {
    #[test]
    fn division_invariant(a in arb_coeffs(), b in arb_coeffs()) {
        let (a, b) = (poly(a), poly(b));
        prop_assume!(!b.is_zero());

        let (q, r) = a.div_rem(&b).unwrap();
        prop_assert_eq!(&(&q * &b) + &r, a);
        match (r.degree(), b.degree()) {
            (Some(rd), Some(bd)) => prop_assert!(rd < bd),
            (None, _) => {}
            _ => unreachable!(),
        }
    }
}

proptest! {
    #[test]
    fn derivative_is_additive(a in arb_coeffs(), b in arb_coeffs()) {
        let (a, b) = (poly(a), poly(b));
        prop_assert_eq!((&a + &b).derivative(), &a.derivative() + &b.derivative());
    }
}

proptest! {
    #[test]
    fn derivative_product_rule(a in arb_coeffs(), b in arb_coeffs()) {
        let (a, b) = (poly(a), poly(b));
        let lhs = (&a * &b).derivative();
        let rhs = &(&a.derivative() * &b) + &(&a * &b.derivative());
        prop_assert_eq!(lhs, rhs);
    }
}

proptest! {
    #[test]
    fn gcd_divides_both_and_is_monic(a in arb_coeffs(), b in arb_coeffs()) {
        let (a, b) = (poly(a), poly(b));
        prop_assume!(!a.is_zero() || !b.is_zero());

        let g = Poly::gcd(&a, &b);
        prop_assert_eq!(g.leading_coeff(), Some(1));
        prop_assert!(a.rem(&g).unwrap().is_zero());
        prop_assert!(b.rem(&g).unwrap().is_zero());
    }
}

proptest! {
    #[test]
    fn common_divisors_divide_the_gcd(a in arb_coeffs(), b in arb_coeffs(), d in arb_coeffs()) {
        let d = poly(d);
        prop_assume!(!d.is_zero());
        let a = &poly(a) * &d;
        let b = &poly(b) * &d;
        prop_assume!(!a.is_zero() && !b.is_zero());

        let g = Poly::gcd(&a, &b);
        prop_assert!(g.rem(&d).unwrap().is_zero());
    }
}

proptest! {
    #[test]
    fn monic_preserves_divisibility(a in arb_coeffs(), b in arb_coeffs()) {
        let b = poly(b);
        prop_assume!(!b.is_zero());
        let a = &poly(a) * &b;
        prop_assume!(!a.is_zero());

        // a is divisible by b, and stays divisible after normalisation
        let monic = a.monic().unwrap();
        prop_assert!(monic.rem(&b).unwrap().is_zero());
        prop_assert_eq!(monic.monic().unwrap(), monic);
    }
}

proptest! {
    #[test]
    fn gcd_with_zero_is_monic_self(a in arb_coeffs()) {
        let a = poly(a);
        prop_assume!(!a.is_zero());
        let zero = Poly::zero(gf8());
        prop_assert_eq!(Poly::gcd(&a, &zero), a.monic().unwrap());
    }
}

//! Polynomial factorization over small Galois fields.
//!
//! This example demonstrates:
//! - Constructing GF(p^k) from a primitive polynomial
//! - Factoring polynomials into monic irreducible factors
//! - Counting the field operations a factorization performs
//!
//! Run with: cargo run --example factorize

use std::sync::Arc;

use berlekamp::{Berlekamp, CountingField, LogField, Poly};

fn main() {
    println!("=== Factorization over GF(8) ===\n");

    // GF(8) = GF(2^3) with primitive polynomial m(x) = 1 + x + x^3
    let field = Arc::new(LogField::new(2, 3, &[1, 1, 0, 1]).unwrap());
    let solver = Berlekamp::new();

    // (1 + x)^3 * (1 + x + x^2)
    let poly = Poly::new(Arc::clone(&field), vec![1, 0, 1, 1, 0, 1]);
    println!("f(x) = {}", poly);
    for (factor, power) in solver.factorize(&poly) {
        println!("  ({})^{}", factor, power);
    }
    println!();

    // x^8 - x splits into the eight linear factors (x - c)
    let poly = &Poly::monomial(Arc::clone(&field), 1, 8) - &Poly::x(Arc::clone(&field));
    println!("f(x) = {}", poly);
    for (factor, power) in solver.factorize(&poly) {
        println!("  ({})^{}", factor, power);
    }
    println!();

    println!("=== Factorization over GF(9) ===\n");

    // GF(9) = GF(3^2) with m(x) = 2 + 2x + x^2
    let field = Arc::new(LogField::new(3, 2, &[2, 2, 1]).unwrap());
    let solver = Berlekamp::new();

    // (x + 1)^3 has a vanishing derivative; the cube root is extracted first
    let poly = Poly::new(Arc::clone(&field), vec![1, 0, 0, 1]);
    println!("f(x) = {}", poly);
    for (factor, power) in solver.factorize(&poly) {
        println!("  ({})^{}", factor, power);
    }
    println!();

    println!("=== Counting field operations ===\n");

    let field = Arc::new(CountingField::new(
        LogField::new(2, 3, &[1, 1, 0, 1]).unwrap(),
    ));
    let solver = Berlekamp::new();

    for coeffs in [vec![1u32, 0, 1, 1, 0, 1], vec![1, 1, 1], vec![1, 0, 1]] {
        let poly = Poly::new(Arc::clone(&field), coeffs);
        field.reset();
        let factors = solver.factorize(&poly);
        println!(
            "factoring {} into {} factor(s) took {} field operations",
            poly,
            factors.len(),
            field.operations()
        );
    }
}

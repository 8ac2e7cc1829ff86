use core::cell::Cell;

use crate::algebra::field::GaloisField;

/// A field wrapper that counts element-level arithmetic operations.
///
/// Every `add`, `sub`, `neg`, `mul`, `div`, `inverse` and `pow` bumps a
/// per-instance counter; the arithmetic itself is delegated unchanged, so
/// wrapping a field never alters results. Intended for measuring the work a
/// factorization performs.
///
/// The counter is a [`Cell`], so a `CountingField` belongs to a single
/// thread; experiments running in parallel should give each task its own
/// instance and aggregate the counts afterwards.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use berlekamp::{Berlekamp, CountingField, GaloisField, LogField, Poly};
///
/// let field = LogField::new(2, 3, &[1, 1, 0, 1]).unwrap();
/// let counting = Arc::new(CountingField::new(field));
///
/// let poly = Poly::new(Arc::clone(&counting), vec![1, 0, 1, 1, 0, 1]);
/// Berlekamp::new().factorize(&poly);
///
/// assert!(counting.operations() > 0);
/// counting.reset();
/// assert_eq!(counting.operations(), 0);
/// ```
pub struct CountingField<F> {
    inner: F,
    operations: Cell<u64>,
}

impl<F> CountingField<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            operations: Cell::new(0),
        }
    }

    /// The wrapped field.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Arithmetic operations performed since construction or the last
    /// [`reset`](Self::reset).
    pub fn operations(&self) -> u64 {
        self.operations.get()
    }

    /// Set the operation counter back to zero.
    pub fn reset(&self) {
        self.operations.set(0);
    }

    fn tick(&self) {
        self.operations.set(self.operations.get() + 1);
    }
}

impl<F: PartialEq> PartialEq for CountingField<F> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<F: GaloisField> GaloisField for CountingField<F> {
    type Value = F::Value;

    fn characteristic(&self) -> u32 {
        self.inner.characteristic()
    }

    fn extension(&self) -> u32 {
        self.inner.extension()
    }

    fn size(&self) -> u32 {
        self.inner.size()
    }

    fn zero(&self) -> Self::Value {
        self.inner.zero()
    }

    fn one(&self) -> Self::Value {
        self.inner.one()
    }

    fn constant(&self, n: u64) -> Self::Value {
        self.inner.constant(n)
    }

    fn add(&self, a: Self::Value, b: Self::Value) -> Self::Value {
        self.tick();
        self.inner.add(a, b)
    }

    fn sub(&self, a: Self::Value, b: Self::Value) -> Self::Value {
        self.tick();
        self.inner.sub(a, b)
    }

    fn neg(&self, a: Self::Value) -> Self::Value {
        self.tick();
        self.inner.neg(a)
    }

    fn mul(&self, a: Self::Value, b: Self::Value) -> Self::Value {
        self.tick();
        self.inner.mul(a, b)
    }

    fn div(&self, a: Self::Value, b: Self::Value) -> Self::Value {
        self.tick();
        self.inner.div(a, b)
    }

    fn inverse(&self, a: Self::Value) -> Option<Self::Value> {
        self.tick();
        self.inner.inverse(a)
    }

    fn pow(&self, a: Self::Value, exp: u64) -> Self::Value {
        self.tick();
        self.inner.pow(a, exp)
    }

    fn first(&self) -> Self::Value {
        self.inner.first()
    }

    fn next(&self, v: Self::Value) -> Option<Self::Value> {
        self.inner.next(v)
    }

    fn last(&self) -> Self::Value {
        self.inner.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::gf::LogField;

    fn counting_gf8() -> CountingField<LogField> {
        CountingField::new(LogField::new(2, 3, &[1, 1, 0, 1]).unwrap())
    }

    #[test]
    fn delegates_arithmetic_unchanged() {
        let field = counting_gf8();
        assert_eq!(field.add(3, 5), field.inner().add(3, 5));
        assert_eq!(field.mul(3, 3), field.inner().mul(3, 3));
        assert_eq!(field.inverse(0), None);
        assert_eq!(field.pow(2, 3), field.inner().pow(2, 3));
    }

    #[test]
    fn counts_every_operation() {
        let field = counting_gf8();
        assert_eq!(field.operations(), 0);
        field.add(1, 2);
        field.sub(1, 2);
        field.neg(1);
        field.mul(2, 3);
        field.div(6, 3);
        field.inverse(5);
        field.pow(2, 10);
        assert_eq!(field.operations(), 7);
    }

    #[test]
    fn queries_are_free() {
        let field = counting_gf8();
        field.zero();
        field.one();
        field.constant(5);
        let _: Vec<u32> = field.elements().collect();
        assert_eq!(field.operations(), 0);
    }

    #[test]
    fn reset_clears_the_counter() {
        let field = counting_gf8();
        field.mul(2, 3);
        assert_eq!(field.operations(), 1);
        field.reset();
        assert_eq!(field.operations(), 0);
    }
}

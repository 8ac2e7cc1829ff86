use core::fmt;

/// The capability set required of a Galois field GF(p^k).
///
/// Elements are plain machine integers (the associated [`Value`] type); all
/// arithmetic goes through the field object, which owns whatever tables or
/// state the representation needs. Implementations must guarantee that
/// element encodings are canonical: two values compare equal if and only if
/// they denote the same field element.
///
/// `PartialEq` is a supertrait so that callers holding two field handles can
/// check they describe the same field before mixing their elements.
///
/// [`Value`]: GaloisField::Value
pub trait GaloisField: PartialEq {
    /// Element encoding. Must be large enough to hold any intermediate the
    /// representation produces (a `u32` covers every intended field).
    type Value: Copy + Eq + Ord + fmt::Debug;

    /// The field characteristic p.
    fn characteristic(&self) -> u32;

    /// The extension degree k.
    fn extension(&self) -> u32;

    /// The field size q = p^k.
    fn size(&self) -> u32;

    /// The additive identity.
    fn zero(&self) -> Self::Value;

    /// The multiplicative identity.
    fn one(&self) -> Self::Value;

    /// The canonical image of `n mod p` as a field constant.
    fn constant(&self, n: u64) -> Self::Value;

    /// Field sum `a + b`.
    fn add(&self, a: Self::Value, b: Self::Value) -> Self::Value;

    /// Field difference `a - b`.
    fn sub(&self, a: Self::Value, b: Self::Value) -> Self::Value;

    /// Additive inverse. For characteristic 2 this is the identity map.
    fn neg(&self, a: Self::Value) -> Self::Value;

    /// Field product `a * b`.
    fn mul(&self, a: Self::Value, b: Self::Value) -> Self::Value;

    /// Field quotient `a / b`.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero; dividing by zero is a caller bug.
    fn div(&self, a: Self::Value, b: Self::Value) -> Self::Value {
        let inv = self.inverse(b).expect("division by zero field element");
        self.mul(a, inv)
    }

    /// Multiplicative inverse, `None` for zero.
    fn inverse(&self, a: Self::Value) -> Option<Self::Value>;

    /// `a^exp` with `a^0 = 1` and `0^exp = 0` for `exp > 0`.
    fn pow(&self, a: Self::Value, exp: u64) -> Self::Value;

    /// The first element in the canonical enumeration order.
    fn first(&self) -> Self::Value;

    /// The successor of `v` in the canonical enumeration order, `None` once
    /// `v` is the last element.
    fn next(&self, v: Self::Value) -> Option<Self::Value>;

    /// The last element in the canonical enumeration order.
    fn last(&self) -> Self::Value;

    fn is_zero(&self, v: Self::Value) -> bool {
        v == self.zero()
    }

    fn is_one(&self, v: Self::Value) -> bool {
        v == self.one()
    }

    /// Iterate over all q field elements in canonical order.
    ///
    /// # Example
    ///
    /// ```
    /// use berlekamp::{GaloisField, LogField};
    ///
    /// let field = LogField::new(2, 3, &[1, 1, 0, 1]).unwrap();
    /// let elements: Vec<u32> = field.elements().collect();
    /// assert_eq!(elements, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    /// ```
    fn elements(&self) -> FieldElements<'_, Self>
    where
        Self: Sized,
    {
        FieldElements {
            field: self,
            current: Some(self.first()),
        }
    }
}

/// Iterator over all elements of a field, from [`GaloisField::elements`].
pub struct FieldElements<'a, F: GaloisField> {
    field: &'a F,
    current: Option<F::Value>,
}

impl<F: GaloisField> Iterator for FieldElements<'_, F> {
    type Item = F::Value;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.current?;
        self.current = self.field.next(value);
        Some(value)
    }
}

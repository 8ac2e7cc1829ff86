use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::sync::Arc;

use crate::algebra::field::GaloisField;

/// Polynomial over a Galois field.
///
/// Coefficients are stored in ascending order of degree: `coeffs[i]` is the
/// coefficient of `x^i`. The zero polynomial is represented as an empty
/// coefficient vector, and no polynomial ever carries trailing zeros.
///
/// The field is shared behind an `Arc` so that polynomials can be cloned
/// cheaply while all referring to the same tables.
pub struct Poly<F: GaloisField> {
    field: Arc<F>,
    coeffs: Vec<F::Value>,
}

impl<F: GaloisField> Poly<F> {
    /// Create a polynomial from coefficients in ascending order.
    ///
    /// Trailing zeros are automatically removed.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use berlekamp::{LogField, Poly};
    ///
    /// let field = Arc::new(LogField::new(2, 3, &[1, 1, 0, 1]).unwrap());
    ///
    /// // 1 + x + x^2 over GF(8)
    /// let p = Poly::new(field, vec![1, 1, 1]);
    /// assert_eq!(p.degree(), Some(2));
    /// ```
    pub fn new(field: Arc<F>, coeffs: Vec<F::Value>) -> Self {
        let mut poly = Self { field, coeffs };
        poly.trim();
        poly
    }

    /// Create the zero polynomial.
    pub fn zero(field: Arc<F>) -> Self {
        Self {
            field,
            coeffs: Vec::new(),
        }
    }

    /// Create the one polynomial.
    pub fn one(field: Arc<F>) -> Self {
        let one = field.one();
        Self {
            field,
            coeffs: vec![one],
        }
    }

    /// Create a constant polynomial.
    pub fn constant(field: Arc<F>, c: F::Value) -> Self {
        Self::new(field, vec![c])
    }

    /// Create the polynomial `x`.
    pub fn x(field: Arc<F>) -> Self {
        let coeffs = vec![field.zero(), field.one()];
        Self { field, coeffs }
    }

    /// Create a monomial `c * x^n`.
    pub fn monomial(field: Arc<F>, c: F::Value, n: usize) -> Self {
        if field.is_zero(c) {
            return Self::zero(field);
        }
        let mut coeffs = vec![field.zero(); n + 1];
        coeffs[n] = c;
        Self { field, coeffs }
    }

    /// Create a monic polynomial from its roots: `(x - r1)(x - r2)...`.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use berlekamp::{GaloisField, LogField, Poly};
    ///
    /// let field = Arc::new(LogField::new(3, 2, &[2, 2, 1]).unwrap());
    ///
    /// let p = Poly::from_roots(Arc::clone(&field), &[1, 2]);
    /// assert_eq!(p.eval(1), field.zero());
    /// assert_eq!(p.eval(2), field.zero());
    /// ```
    pub fn from_roots(field: Arc<F>, roots: &[F::Value]) -> Self {
        let mut result = Self::one(Arc::clone(&field));
        for &root in roots {
            let linear = Self::new(Arc::clone(&field), vec![field.neg(root), field.one()]);
            result = &result * &linear;
        }
        result
    }

    /// The field this polynomial lives over.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// A shared handle to the field.
    pub fn field_arc(&self) -> Arc<F> {
        Arc::clone(&self.field)
    }

    /// Check if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Check if this is the one polynomial.
    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.field.is_one(self.coeffs[0])
    }

    /// The degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// The leading coefficient, or `None` for the zero polynomial.
    pub fn leading_coeff(&self) -> Option<F::Value> {
        self.coeffs.last().copied()
    }

    /// The coefficient of `x^i` (zero beyond the degree).
    pub fn coeff(&self, i: usize) -> F::Value {
        self.coeffs.get(i).copied().unwrap_or_else(|| self.field.zero())
    }

    /// All coefficients, constant term first, with no trailing zeros.
    pub fn coefficients(&self) -> &[F::Value] {
        &self.coeffs
    }

    /// Evaluate at a point using Horner's method.
    pub fn eval(&self, x: F::Value) -> F::Value {
        let field = &self.field;
        let mut result = field.zero();
        for &c in self.coeffs.iter().rev() {
            result = field.add(field.mul(result, x), c);
        }
        result
    }

    fn trim(&mut self) {
        while self
            .coeffs
            .last()
            .is_some_and(|&c| self.field.is_zero(c))
        {
            self.coeffs.pop();
        }
    }

    fn assert_same_field(&self, other: &Self) {
        assert!(
            Arc::ptr_eq(&self.field, &other.field) || *self.field == *other.field,
            "polynomials must share the same field"
        );
    }

    /// The formal derivative.
    ///
    /// Each coefficient index is lifted into the field mod p, so in
    /// characteristic p the derivative vanishes exactly when every monomial
    /// with a nonzero coefficient has an exponent divisible by p.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use berlekamp::{LogField, Poly};
    ///
    /// let field = Arc::new(LogField::new(2, 3, &[1, 1, 0, 1]).unwrap());
    ///
    /// // D(x^2) = 2x = 0 over a field of characteristic 2
    /// let p = Poly::new(field, vec![0, 0, 1]);
    /// assert!(p.derivative().is_zero());
    /// ```
    pub fn derivative(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero(self.field_arc());
        }
        let field = &self.field;
        let coeffs = (1..self.coeffs.len())
            .map(|i| field.mul(field.constant(i as u64), self.coeffs[i]))
            .collect();
        Self::new(self.field_arc(), coeffs)
    }

    /// A monic copy of this polynomial, or `None` if it is zero.
    pub fn monic(&self) -> Option<Self> {
        let lc = *self.coeffs.last()?;
        if self.field.is_one(lc) {
            return Some(self.clone());
        }
        Some(self.div_scalar(lc))
    }

    /// Divide every coefficient by the leading one, in place. No-op on the
    /// zero polynomial.
    pub fn make_monic(&mut self) {
        let Some(&lc) = self.coeffs.last() else {
            return;
        };
        if self.field.is_one(lc) {
            return;
        }
        let inv = self
            .field
            .inverse(lc)
            .expect("leading coefficient is nonzero");
        for c in &mut self.coeffs {
            *c = self.field.mul(*c, inv);
        }
    }

    /// Multiply every coefficient by `c`.
    pub fn scale(&self, c: F::Value) -> Self {
        if self.field.is_zero(c) {
            return Self::zero(self.field_arc());
        }
        let coeffs = self.coeffs.iter().map(|&a| self.field.mul(a, c)).collect();
        Self::new(self.field_arc(), coeffs)
    }

    /// Divide every coefficient by `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is zero.
    pub fn div_scalar(&self, c: F::Value) -> Self {
        let inv = self
            .field
            .inverse(c)
            .expect("division by zero field element");
        self.scale(inv)
    }

    /// Add the constant `c`.
    pub fn add_scalar(&self, c: F::Value) -> Self {
        let mut coeffs = self.coeffs.clone();
        if coeffs.is_empty() {
            coeffs.push(c);
        } else {
            coeffs[0] = self.field.add(coeffs[0], c);
        }
        Self::new(self.field_arc(), coeffs)
    }

    /// Subtract the constant `c`.
    pub fn sub_scalar(&self, c: F::Value) -> Self {
        self.add_scalar(self.field.neg(c))
    }

    /// Euclidean division: `(q, r)` with `self = q * divisor + r` and
    /// `deg(r) < deg(divisor)`. Returns `None` if the divisor is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use berlekamp::{LogField, Poly};
    ///
    /// let field = Arc::new(LogField::new(2, 3, &[1, 1, 0, 1]).unwrap());
    ///
    /// // (x^2 + 1) / (x + 1) = x + 1 over GF(8), remainder 0
    /// let dividend = Poly::new(Arc::clone(&field), vec![1, 0, 1]);
    /// let divisor = Poly::new(field, vec![1, 1]);
    /// let (q, r) = dividend.div_rem(&divisor).unwrap();
    ///
    /// assert_eq!(q, divisor);
    /// assert!(r.is_zero());
    /// ```
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        self.assert_same_field(divisor);
        if divisor.is_zero() {
            return None;
        }
        if self.coeffs.len() < divisor.coeffs.len() {
            return Some((Self::zero(self.field_arc()), self.clone()));
        }

        let field = &self.field;
        let divisor_deg = divisor.coeffs.len() - 1;
        let lc_inv = field
            .inverse(divisor.coeffs[divisor_deg])
            .expect("divisor leading coefficient is nonzero");

        let mut remainder = self.coeffs.clone();
        let mut quotient = vec![field.zero(); self.coeffs.len() - divisor_deg];
        for step in (0..quotient.len()).rev() {
            let lead = remainder[step + divisor_deg];
            if field.is_zero(lead) {
                continue;
            }
            let coeff = field.mul(lead, lc_inv);
            quotient[step] = coeff;
            for (i, &d) in divisor.coeffs.iter().enumerate() {
                remainder[step + i] = field.sub(remainder[step + i], field.mul(d, coeff));
            }
        }

        Some((
            Self::new(self.field_arc(), quotient),
            Self::new(self.field_arc(), remainder),
        ))
    }

    /// The remainder of Euclidean division, `None` for a zero divisor.
    pub fn rem(&self, divisor: &Self) -> Option<Self> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    /// The greatest common divisor, monic unless both inputs are zero.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use berlekamp::{GaloisField, LogField, Poly};
    ///
    /// let field = Arc::new(LogField::new(3, 2, &[2, 2, 1]).unwrap());
    ///
    /// let a = Poly::from_roots(Arc::clone(&field), &[1, 2]);
    /// let b = Poly::from_roots(Arc::clone(&field), &[2, 8]);
    /// let g = Poly::gcd(&a, &b);
    ///
    /// assert_eq!(g.degree(), Some(1));
    /// assert_eq!(g.eval(2), field.zero());
    /// ```
    pub fn gcd(a: &Self, b: &Self) -> Self {
        if b.is_zero() {
            return a.monic().unwrap_or_else(|| a.clone());
        }
        let r = a.rem(b).expect("divisor is nonzero");
        Self::gcd(b, &r)
    }

    /// Raise to a non-negative integer power by square-and-multiply.
    pub fn pow(&self, exp: u32) -> Self {
        let mut result = Self::one(self.field_arc());
        let mut base = self.clone();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = &result * &base;
            }
            base = &base * &base;
            e >>= 1;
        }
        result
    }
}

impl<F: GaloisField> Clone for Poly<F> {
    fn clone(&self) -> Self {
        Self {
            field: Arc::clone(&self.field),
            coeffs: self.coeffs.clone(),
        }
    }
}

/// Structural equality on the trimmed coefficient sequence.
impl<F: GaloisField> PartialEq for Poly<F> {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs == other.coeffs
    }
}

impl<F: GaloisField> Eq for Poly<F> {}

/// Total order for use as an associative-container key: shorter
/// polynomials sort first, equal lengths compare coefficient-wise from the
/// constant term up. The order has no arithmetic meaning.
impl<F: GaloisField> Ord for Poly<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.coeffs
            .len()
            .cmp(&other.coeffs.len())
            .then_with(|| self.coeffs.cmp(&other.coeffs))
    }
}

impl<F: GaloisField> PartialOrd for Poly<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/* ---- arithmetic operators ---- */

impl<F: GaloisField> Add for &Poly<F> {
    type Output = Poly<F>;

    fn add(self, rhs: Self) -> Self::Output {
        self.assert_same_field(rhs);
        let max_len = self.coeffs.len().max(rhs.coeffs.len());
        let field = &self.field;
        let coeffs = (0..max_len)
            .map(|i| field.add(self.coeff(i), rhs.coeff(i)))
            .collect();
        Poly::new(self.field_arc(), coeffs)
    }
}

impl<F: GaloisField> Sub for &Poly<F> {
    type Output = Poly<F>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.assert_same_field(rhs);
        let max_len = self.coeffs.len().max(rhs.coeffs.len());
        let field = &self.field;
        let coeffs = (0..max_len)
            .map(|i| field.sub(self.coeff(i), rhs.coeff(i)))
            .collect();
        Poly::new(self.field_arc(), coeffs)
    }
}

impl<F: GaloisField> Mul for &Poly<F> {
    type Output = Poly<F>;

    /// Schoolbook multiplication, with an O(n) path when either operand is
    /// a constant.
    fn mul(self, rhs: Self) -> Self::Output {
        self.assert_same_field(rhs);
        if self.is_zero() || rhs.is_zero() {
            return Poly::zero(self.field_arc());
        }
        if rhs.coeffs.len() == 1 {
            return self.scale(rhs.coeffs[0]);
        }
        if self.coeffs.len() == 1 {
            return rhs.scale(self.coeffs[0]);
        }

        let field = &self.field;
        let mut coeffs = vec![field.zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] = field.add(coeffs[i + j], field.mul(a, b));
            }
        }
        Poly::new(self.field_arc(), coeffs)
    }
}

impl<F: GaloisField> Div for &Poly<F> {
    type Output = Poly<F>;

    fn div(self, rhs: Self) -> Self::Output {
        self.div_rem(rhs).expect("division by zero polynomial").0
    }
}

impl<F: GaloisField> Rem for &Poly<F> {
    type Output = Poly<F>;

    fn rem(self, rhs: Self) -> Self::Output {
        self.div_rem(rhs).expect("division by zero polynomial").1
    }
}

impl<F: GaloisField> Neg for &Poly<F> {
    type Output = Poly<F>;

    fn neg(self) -> Self::Output {
        let coeffs = self.coeffs.iter().map(|&c| self.field.neg(c)).collect();
        Poly {
            field: self.field_arc(),
            coeffs,
        }
    }
}

impl<F: GaloisField> Add for Poly<F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl<F: GaloisField> Sub for Poly<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl<F: GaloisField> Mul for Poly<F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl<F: GaloisField> Div for Poly<F> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        &self / &rhs
    }
}

impl<F: GaloisField> Rem for Poly<F> {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        &self % &rhs
    }
}

impl<F: GaloisField> Neg for Poly<F> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<F: GaloisField> fmt::Debug for Poly<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (i, &coeff) in self.coeffs.iter().enumerate() {
            if self.field.is_zero(coeff) {
                continue;
            }

            if !first {
                write!(f, " + ")?;
            }
            first = false;

            match i {
                0 => write!(f, "{:?}", coeff)?,
                1 if self.field.is_one(coeff) => write!(f, "x")?,
                1 => write!(f, "{:?}*x", coeff)?,
                _ if self.field.is_one(coeff) => write!(f, "x^{}", i)?,
                _ => write!(f, "{:?}*x^{}", coeff, i)?,
            }
        }

        Ok(())
    }
}

impl<F: GaloisField> fmt::Display for Poly<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(feature = "serde")]
impl<F: GaloisField> serde::Serialize for Poly<F>
where
    F::Value: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.coeffs.serialize(serializer)
    }
}

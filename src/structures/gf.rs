//! Table-based Galois fields GF(p^k) of small characteristic.
//!
//! This module provides:
//! - The [`LogField`] struct, a field built from discrete-logarithm tables
//!   that are computed once at construction
//! - The [`FieldError`] type for construction validation

use core::fmt;

use crate::algebra::field::GaloisField;
use crate::utils::is_prime;

/// Largest table index width the constructor accepts, in bits.
///
/// Berlekamp's algorithm only makes sense for small fields (the splitting
/// loop walks every field constant), so the tables are capped rather than
/// grown without bound.
const MAX_TABLE_BITS: u32 = 20;

/// Error type for field construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The characteristic is not a prime number.
    CharacteristicNotPrime { p: u32 },
    /// The extension degree is zero.
    ZeroExtension,
    /// The generator polynomial has the wrong number of coefficients.
    WrongGeneratorLength { expected: usize, got: usize },
    /// The generator polynomial is not monic.
    GeneratorNotMonic,
    /// The field is too large for the table representation.
    TooLarge { p: u32, k: u32 },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::CharacteristicNotPrime { p } => {
                write!(f, "characteristic {} is not prime", p)
            }
            FieldError::ZeroExtension => write!(f, "extension degree must be at least 1"),
            FieldError::WrongGeneratorLength { expected, got } => {
                write!(f, "generator has wrong length: expected {}, got {}", expected, got)
            }
            FieldError::GeneratorNotMonic => write!(f, "generator polynomial is not monic"),
            FieldError::TooLarge { p, k } => {
                write!(f, "field GF({}^{}) is too large for table construction", p, k)
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// A Galois field GF(p^k) backed by discrete-logarithm tables.
///
/// Elements are stored in packed polynomial form. For p = 2 an element is a
/// bitfield with one bit per coefficient, so addition is XOR and negation is
/// the identity. For p > 2 each coefficient occupies a digit wide enough to
/// hold `2p - 1`, so two elements can be added with a single integer
/// addition followed by one lookup in a digit-reduction table.
///
/// Multiplication, division, inversion and exponentiation all go through the
/// `pow_of`/`log_of` tables built at construction: every nonzero element is
/// `x^e mod m(x)` for a unique exponent `e`, where `m` is the primitive
/// polynomial the field was constructed with. The `pow_of` table covers
/// exponents up to `2(q - 1)` so that sums and differences of logarithms
/// never need an explicit reduction.
///
/// The tables never change after construction, so a field can be shared
/// freely between threads (e.g. behind an `Arc`).
///
/// # Example
///
/// ```
/// use berlekamp::{GaloisField, LogField};
///
/// // GF(8) with m(x) = 1 + x + x^3
/// let field = LogField::new(2, 3, &[1, 1, 0, 1]).unwrap();
///
/// assert_eq!(field.size(), 8);
/// assert_eq!(field.add(0b011, 0b101), 0b110);
/// assert_eq!(field.mul(0b011, 0b011), 0b101); // (x + 1)^2 = x^2 + 1
/// assert_eq!(field.inverse(0), None);
/// ```
pub struct LogField {
    p: u32,
    k: u32,
    q: u32,
    digit_bits: u32,
    digit_mask: u32,
    /// Every digit equal to p; negation subtracts from this constant.
    all_p: u32,
    /// The largest canonical element encoding.
    max_element: u32,
    /// Discrete log of every nonzero canonical encoding.
    log_of: Vec<u32>,
    /// `x^e` for `e` in `[0, 2(q - 1))`; the upper half repeats the lower.
    pow_of: Vec<u32>,
    /// Digit-wise reduction modulo p of every packed value. Empty for p = 2.
    reduce: Vec<u32>,
    /// The generator coefficients, reduced mod p. Kept for field equality.
    generator: Vec<u32>,
}

impl LogField {
    /// Construct GF(p^k) from a monic primitive polynomial of degree k over
    /// GF(p), given as `k + 1` coefficients from the constant term up.
    ///
    /// The coefficients are reduced mod p on intake. Primitivity is trusted:
    /// handing in a polynomial whose root does not generate the
    /// multiplicative group leaves the field in an undefined state (checked
    /// only by a `debug_assert`).
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] if p is not prime, k is zero, the
    /// coefficient slice has the wrong length, the leading coefficient is
    /// not 1, or the tables would exceed the small-field regime.
    ///
    /// # Example
    ///
    /// ```
    /// use berlekamp::{FieldError, LogField};
    ///
    /// // GF(9) with m(x) = 2 + 2x + x^2
    /// assert!(LogField::new(3, 2, &[2, 2, 1]).is_ok());
    ///
    /// assert_eq!(
    ///     LogField::new(4, 2, &[1, 1, 1]),
    ///     Err(FieldError::CharacteristicNotPrime { p: 4 })
    /// );
    /// ```
    pub fn new(p: u32, k: u32, generator: &[u32]) -> Result<Self, FieldError> {
        if !is_prime(p) {
            return Err(FieldError::CharacteristicNotPrime { p });
        }
        if k == 0 {
            return Err(FieldError::ZeroExtension);
        }
        if generator.len() != k as usize + 1 {
            return Err(FieldError::WrongGeneratorLength {
                expected: k as usize + 1,
                got: generator.len(),
            });
        }
        let generator: Vec<u32> = generator.iter().map(|&c| c % p).collect();
        if generator[k as usize] != 1 {
            return Err(FieldError::GeneratorNotMonic);
        }

        let digit_bits = if p == 2 {
            1
        } else {
            // wide enough for a sum of two digits without carry-over
            32 - (2 * p - 1).leading_zeros()
        };
        let table_bits = digit_bits * k;
        if table_bits > MAX_TABLE_BITS {
            return Err(FieldError::TooLarge { p, k });
        }
        let table_len = 1usize << table_bits;
        let q = p.pow(k);
        let digit_mask = (1u32 << digit_bits) - 1;

        let pack = |digit_of: &dyn Fn(u32) -> u32| {
            (0..k).fold(0u32, |acc, i| acc | (digit_of(i) << (i * digit_bits)))
        };
        let all_p = pack(&|_| p);
        let max_element = pack(&|_| p - 1);

        let reduce = if p == 2 {
            Vec::new()
        } else {
            let mut reduce = vec![0u32; table_len];
            for (v, slot) in reduce.iter_mut().enumerate() {
                *slot = pack(&|i| ((v as u32 >> (i * digit_bits)) & digit_mask) % p);
            }
            reduce
        };

        // m(x) = 0 means x^k = -(m(x) - x^k), so an overflow digit c at x^k
        // is replaced by c times this constant.
        let reducer = if p == 2 {
            // full generator bitmask, bit k included, so XOR clears the
            // overflow bit and folds in the low part at once
            generator
                .iter()
                .enumerate()
                .fold(0u32, |acc, (i, &c)| acc | (c << i))
        } else {
            pack(&|i| (p - generator[i as usize]) % p)
        };

        let scale = |c: u32, v: u32| pack(&|i| (((v >> (i * digit_bits)) & digit_mask) * c) % p);

        let mut log_of = vec![0u32; table_len];
        let mut pow_of = vec![0u32; 2 * (q as usize - 1)];
        let mut poly = 1u32;
        for e in 0..q - 1 {
            pow_of[e as usize] = poly;
            log_of[poly as usize] = e;
            poly = if p == 2 {
                let shifted = poly << 1;
                if shifted & (1 << k) != 0 {
                    shifted ^ reducer
                } else {
                    shifted
                }
            } else {
                let shifted = poly << digit_bits;
                let carry = shifted >> table_bits;
                let low = shifted & ((1 << table_bits) - 1);
                if carry == 0 {
                    low
                } else {
                    reduce[(low + scale(carry, reducer)) as usize]
                }
            };
        }
        debug_assert!(poly == 1, "generator polynomial is not primitive");
        for e in 0..q as usize - 1 {
            pow_of[q as usize - 1 + e] = pow_of[e];
        }

        Ok(Self {
            p,
            k,
            q,
            digit_bits,
            digit_mask,
            all_p,
            max_element,
            log_of,
            pow_of,
            reduce,
            generator,
        })
    }

    /// Pack a slice of at most k coefficients (constant term first, each
    /// taken mod p) into an element encoding.
    ///
    /// For p = 2 the encoding is just the coefficient bitfield, but for
    /// p > 2 the digit layout is an implementation detail, so this is the
    /// supported way to spell out an element of a proper extension.
    ///
    /// # Example
    ///
    /// ```
    /// use berlekamp::{GaloisField, LogField};
    ///
    /// let field = LogField::new(3, 2, &[2, 2, 1]).unwrap();
    /// let x = field.element_from_coeffs(&[0, 1]);
    /// let x_plus_1 = field.element_from_coeffs(&[1, 1]);
    ///
    /// // x^2 = x + 1 under m(x) = 2 + 2x + x^2
    /// assert_eq!(field.mul(x, x), x_plus_1);
    /// ```
    pub fn element_from_coeffs(&self, coeffs: &[u32]) -> u32 {
        assert!(
            coeffs.len() <= self.k as usize,
            "element has more coefficients than the extension degree"
        );
        coeffs
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &c)| acc | ((c % self.p) << (i as u32 * self.digit_bits)))
    }

    /// The k coefficients of an element, constant term first.
    pub fn element_coeffs(&self, v: u32) -> Vec<u32> {
        (0..self.k)
            .map(|i| (v >> (i * self.digit_bits)) & self.digit_mask)
            .collect()
    }

    fn is_canonical(&self, v: u32) -> bool {
        if self.p == 2 {
            return true;
        }
        (0..self.k).all(|i| ((v >> (i * self.digit_bits)) & self.digit_mask) < self.p)
    }
}

impl PartialEq for LogField {
    fn eq(&self, other: &Self) -> bool {
        self.p == other.p && self.k == other.k && self.generator == other.generator
    }
}

impl Eq for LogField {}

impl fmt::Debug for LogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogField(GF({}^{}))", self.p, self.k)
    }
}

impl GaloisField for LogField {
    type Value = u32;

    fn characteristic(&self) -> u32 {
        self.p
    }

    fn extension(&self) -> u32 {
        self.k
    }

    fn size(&self) -> u32 {
        self.q
    }

    fn zero(&self) -> u32 {
        0
    }

    fn one(&self) -> u32 {
        1
    }

    fn constant(&self, n: u64) -> u32 {
        (n % self.p as u64) as u32
    }

    fn add(&self, a: u32, b: u32) -> u32 {
        if self.p == 2 {
            a ^ b
        } else {
            self.reduce[(a + b) as usize]
        }
    }

    fn sub(&self, a: u32, b: u32) -> u32 {
        self.add(a, self.neg(b))
    }

    fn neg(&self, a: u32) -> u32 {
        if self.p == 2 {
            a
        } else {
            // every digit of a canonical encoding is below p, so the
            // subtraction never borrows across digits
            self.reduce[(self.all_p - a) as usize]
        }
    }

    fn mul(&self, a: u32, b: u32) -> u32 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.pow_of[(self.log_of[a as usize] + self.log_of[b as usize]) as usize]
    }

    fn div(&self, a: u32, b: u32) -> u32 {
        assert!(b != 0, "division by zero field element");
        if a == 0 {
            return 0;
        }
        let index = self.q - 1 + self.log_of[a as usize] - self.log_of[b as usize];
        self.pow_of[index as usize]
    }

    fn inverse(&self, a: u32) -> Option<u32> {
        if a == 0 {
            return None;
        }
        Some(self.pow_of[(self.q - 1 - self.log_of[a as usize]) as usize])
    }

    fn pow(&self, a: u32, exp: u64) -> u32 {
        if exp == 0 {
            return 1;
        }
        if a == 0 {
            return 0;
        }
        let order = (self.q - 1) as u64;
        let log = self.log_of[a as usize] as u64;
        self.pow_of[((exp % order) * log % order) as usize]
    }

    fn first(&self) -> u32 {
        0
    }

    fn next(&self, v: u32) -> Option<u32> {
        let mut v = v;
        loop {
            if v == self.max_element {
                return None;
            }
            v += 1;
            if self.is_canonical(v) {
                return Some(v);
            }
        }
    }

    fn last(&self) -> u32 {
        self.max_element
    }
}

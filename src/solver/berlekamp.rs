//! Factorization of polynomials over a Galois field into monic irreducible
//! factors, using Berlekamp's algorithm.

use core::marker::PhantomData;
use std::collections::BTreeMap;
use std::mem;
use std::sync::Arc;

use crate::algebra::field::GaloisField;
use crate::structures::poly::Poly;

/// The Berlekamp factorizer.
///
/// [`factorize`](Self::factorize) splits a polynomial into monic irreducible
/// factors with multiplicities. The algorithm peels repeated factors with
/// `gcd(f, f')`, takes p-th roots when the derivative vanishes, and splits
/// each square-free part by row-reducing the Frobenius map on `F[x]/(h)` and
/// taking gcds with the kernel polynomials shifted by every field constant.
/// It is intended for small fields: the splitting step walks all q field
/// elements.
///
/// A factorizer holds no state between calls; one instance can factor any
/// number of polynomials over its field type.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use berlekamp::{Berlekamp, LogField, Poly};
///
/// let field = Arc::new(LogField::new(2, 3, &[1, 1, 0, 1]).unwrap());
///
/// // (1 + x)^3 * (1 + x + x^2) over GF(8)
/// let poly = Poly::new(Arc::clone(&field), vec![1, 0, 1, 1, 0, 1]);
/// let factors = Berlekamp::new().factorize(&poly);
///
/// assert_eq!(
///     factors,
///     vec![
///         (Poly::new(Arc::clone(&field), vec![1, 1]), 3),
///         (Poly::new(field, vec![1, 1, 1]), 1),
///     ]
/// );
/// ```
pub struct Berlekamp<F: GaloisField> {
    _field: PhantomData<F>,
}

impl<F: GaloisField> Berlekamp<F> {
    pub fn new() -> Self {
        Self {
            _field: PhantomData,
        }
    }

    /// Factor `poly` into monic irreducible factors with multiplicities.
    ///
    /// The product of `factor^multiplicity` over the result equals the monic
    /// normalisation of `poly`. Zero and constant inputs produce an empty
    /// list. The result is sorted by the polynomial key order, so equal
    /// inputs always factor into identical lists.
    pub fn factorize(&self, poly: &Poly<F>) -> Vec<(Poly<F>, u32)> {
        if poly.is_zero() {
            return Vec::new();
        }
        let monic = poly.monic().expect("polynomial is nonzero");
        if monic.is_one() {
            return Vec::new();
        }
        self.factorize_impl(monic).into_iter().collect()
    }

    fn factorize_impl(&self, mut f: Poly<F>) -> BTreeMap<Poly<F>, u32> {
        let mut result = BTreeMap::new();
        while !f.is_one() {
            let derivative = f.derivative();
            if derivative.is_zero() {
                // f = g(x)^p; factor the root and lift the multiplicities
                let p = f.field().characteristic();
                for (factor, power) in self.factorize_impl(self.characteristic_root(&f)) {
                    *result.entry(factor).or_insert(0) += power * p;
                }
                break;
            }
            let repeated = Poly::gcd(&f, &derivative);
            // f / repeated has each distinct irreducible factor exactly once
            for factor in self.split_square_free(&f / &repeated) {
                *result.entry(factor).or_insert(0) += 1;
            }
            f = repeated;
        }
        result
    }

    /// Given `f = g^p` (detected by `f' = 0`), recover `g`.
    ///
    /// Every monomial of `f` has an exponent divisible by p, and each
    /// coefficient `a` is the p-th power of `a^{q/p}`.
    fn characteristic_root(&self, f: &Poly<F>) -> Poly<F> {
        let field = f.field_arc();
        let p = field.characteristic() as usize;
        let root_exp = (field.size() / field.characteristic()) as u64;

        let coeffs = f.coefficients();
        debug_assert_eq!(
            (coeffs.len() - 1) % p,
            0,
            "the degree of a p-th power is divisible by p"
        );
        let mut root = Vec::with_capacity((coeffs.len() + p - 1) / p);
        for i in (0..coeffs.len()).step_by(p) {
            root.push(field.pow(coeffs[i], root_exp));
        }
        Poly::new(field, root)
    }

    /// Split a monic square-free polynomial into its distinct monic
    /// irreducible factors.
    fn split_square_free(&self, h: Poly<F>) -> Vec<Poly<F>> {
        let basis = self.factorizing_basis(&h);
        if basis.len() <= 1 {
            // only the constants satisfy g^q = g, so h is irreducible
            return vec![h];
        }

        let field = h.field_arc();
        let constants: Vec<F::Value> = field.elements().collect();
        let target = basis.len();

        let mut factors = vec![h];
        // reused between rounds to keep reallocation down
        let mut peeled: Vec<Poly<F>> = Vec::with_capacity(target);
        for g in basis.iter().filter(|g| g.degree().map_or(false, |d| d > 0)) {
            for factor in &factors {
                for &c in &constants {
                    let split = Poly::gcd(factor, &g.sub_scalar(c));
                    if !split.is_one() {
                        peeled.push(split);
                    }
                }
            }
            if peeled.len() == target {
                return peeled;
            }
            mem::swap(&mut factors, &mut peeled);
            peeled.clear();
        }
        factors
    }

    /// A basis of the polynomials `g` with `g^q ≡ g (mod h)`, as vectors in
    /// the monomial basis of `F[x]/(h)`. Its dimension equals the number of
    /// distinct irreducible factors of `h`.
    fn factorizing_basis(&self, h: &Poly<F>) -> Vec<Poly<F>> {
        let field = h.field_arc();
        let n = h.coefficients().len() - 1;
        let matrix = self.row_reduce(self.frobenius_matrix(h), &field);
        let rank = matrix.len();

        // pivot columns hold dependent coordinates, the rest are free
        let mut pivot_cols = Vec::with_capacity(rank);
        let mut free_cols = Vec::with_capacity(n - rank);
        let mut column = 0;
        for row in matrix.iter() {
            while column < n && field.is_zero(row[column]) {
                free_cols.push(column);
                column += 1;
            }
            pivot_cols.push(column);
            column += 1;
        }
        while column < n {
            free_cols.push(column);
            column += 1;
        }

        // one basis vector per free column: that coordinate is 1, pivot
        // coordinates are read off the reduced rows, other free ones are 0
        let mut basis = Vec::with_capacity(free_cols.len());
        for &free in &free_cols {
            let mut coeffs = vec![field.zero(); n];
            coeffs[free] = field.one();
            for (row, &pivot) in matrix.iter().zip(&pivot_cols) {
                coeffs[pivot] = field.neg(row[free]);
            }
            basis.push(Poly::new(Arc::clone(&field), coeffs));
        }
        basis
    }

    /// The matrix `(A - I)^T`, where row i of A is `x^{i*q} mod h` in the
    /// monomial basis; A represents the (F-linear) map `y -> y^q` on
    /// `F[x]/(h)`. The transpose turns kernel vectors into rows for the row
    /// reduction that follows.
    fn frobenius_matrix(&self, h: &Poly<F>) -> Vec<Vec<F::Value>> {
        let field = h.field_arc();
        let n = h.coefficients().len() - 1;
        let one = field.one();

        let base = Poly::monomial(Arc::clone(&field), one, field.size() as usize)
            .rem(h)
            .expect("modulus is nonzero");

        let mut matrix = vec![vec![field.zero(); n]; n];
        let mut current = Poly::one(Arc::clone(&field));
        for row in matrix.iter_mut() {
            for (i, &c) in current.coefficients().iter().enumerate() {
                row[i] = c;
            }
            current = (&current * &base).rem(h).expect("modulus is nonzero");
        }

        for i in 0..n {
            matrix[i][i] = field.sub(matrix[i][i], one);
            for j in i + 1..n {
                let t = matrix[i][j];
                matrix[i][j] = matrix[j][i];
                matrix[j][i] = t;
            }
        }
        matrix
    }

    /// Reduce a square matrix to reduced row-echelon form and drop the zero
    /// rows, leaving `rank` rows with strictly increasing pivot columns.
    fn row_reduce(&self, mut matrix: Vec<Vec<F::Value>>, field: &Arc<F>) -> Vec<Vec<F::Value>> {
        let n = matrix.len();
        let mut row = 0;
        for column in 0..n {
            let Some(pivot_row) = (row..n).find(|&r| !field.is_zero(matrix[r][column])) else {
                continue;
            };
            matrix.swap(row, pivot_row);

            let inv = field
                .inverse(matrix[row][column])
                .expect("pivot entry is nonzero");
            for entry in &mut matrix[row][column..] {
                *entry = field.mul(*entry, inv);
            }

            let pivot = matrix[row].clone();
            for (index, other) in matrix.iter_mut().enumerate() {
                if index == row || field.is_zero(other[column]) {
                    continue;
                }
                let coefficient = other[column];
                other[column] = field.zero();
                for i in column + 1..n {
                    other[i] = field.sub(other[i], field.mul(pivot[i], coefficient));
                }
            }
            row += 1;
        }
        matrix.truncate(row);
        matrix
    }
}

impl<F: GaloisField> Default for Berlekamp<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::gf::LogField;

    fn gf2() -> Arc<LogField> {
        Arc::new(LogField::new(2, 1, &[1, 1]).unwrap())
    }

    fn gf8() -> Arc<LogField> {
        Arc::new(LogField::new(2, 3, &[1, 1, 0, 1]).unwrap())
    }

    fn gf9() -> Arc<LogField> {
        Arc::new(LogField::new(3, 2, &[2, 2, 1]).unwrap())
    }

    fn product(field: &Arc<LogField>, factors: &[(Poly<LogField>, u32)]) -> Poly<LogField> {
        let mut acc = Poly::one(Arc::clone(field));
        for (factor, power) in factors {
            acc = &acc * &factor.pow(*power);
        }
        acc
    }

    #[test]
    fn zero_and_constants_have_no_factors() {
        let field = gf8();
        let solver = Berlekamp::new();
        assert!(solver.factorize(&Poly::zero(Arc::clone(&field))).is_empty());
        assert!(solver.factorize(&Poly::one(Arc::clone(&field))).is_empty());
        assert!(solver
            .factorize(&Poly::constant(Arc::clone(&field), 5))
            .is_empty());
    }

    #[test]
    fn factors_x_to_itself() {
        let field = gf8();
        let x = Poly::x(Arc::clone(&field));
        assert_eq!(Berlekamp::new().factorize(&x), vec![(x.clone(), 1)]);
    }

    #[test]
    fn splits_cube_times_quadratic_over_gf8() {
        // (1 + x)^3 * (1 + x + x^2) = 1 + x^2 + x^3 + x^5
        let field = gf8();
        let poly = Poly::new(Arc::clone(&field), vec![1, 0, 1, 1, 0, 1]);
        let factors = Berlekamp::new().factorize(&poly);
        assert_eq!(
            factors,
            vec![
                (Poly::new(Arc::clone(&field), vec![1, 1]), 3),
                (Poly::new(Arc::clone(&field), vec![1, 1, 1]), 1),
            ]
        );
        assert_eq!(product(&field, &factors), poly);
    }

    #[test]
    fn factors_over_the_prime_field_gf2() {
        // 1 + x^4 + x^6 + x^7
        let field = gf2();
        let poly = Poly::new(Arc::clone(&field), vec![1, 0, 0, 0, 1, 0, 1, 1]);
        let factors = Berlekamp::new().factorize(&poly);
        assert!(!factors.is_empty());
        for (factor, power) in &factors {
            assert!(*power > 0);
            assert_eq!(factor.leading_coeff(), Some(1));
            assert!(factor.degree() > Some(0));
        }
        assert_eq!(product(&field, &factors), poly);
    }

    #[test]
    fn irreducible_input_comes_back_unchanged() {
        // x^2 + x + 1 has no roots in GF(8), whose multiplicative group has
        // order 7
        let field = gf8();
        let poly = Poly::new(Arc::clone(&field), vec![1, 1, 1]);
        assert_eq!(Berlekamp::new().factorize(&poly), vec![(poly.clone(), 1)]);
    }

    #[test]
    fn splits_x_q_minus_x_into_all_linear_factors() {
        // x^q - x is the product of (x - c) over every field element
        for field in [gf8(), gf9()] {
            let q = field.size() as usize;
            let x = Poly::x(Arc::clone(&field));
            let poly = &Poly::monomial(Arc::clone(&field), 1, q) - &x;
            let factors = Berlekamp::new().factorize(&poly);
            assert_eq!(factors.len(), q);
            for (factor, power) in &factors {
                assert_eq!(*power, 1);
                assert_eq!(factor.degree(), Some(1));
            }
            assert_eq!(product(&field, &factors), poly);
        }
    }

    #[test]
    fn takes_square_roots_in_characteristic_two() {
        // 1 + x^2 = (1 + x)^2 over GF(8), derivative is zero
        let field = gf8();
        let poly = Poly::new(Arc::clone(&field), vec![1, 0, 1]);
        let factors = Berlekamp::new().factorize(&poly);
        assert_eq!(
            factors,
            vec![(Poly::new(Arc::clone(&field), vec![1, 1]), 2)]
        );
    }

    #[test]
    fn takes_cube_roots_in_characteristic_three() {
        // (x + 1)^3 = x^3 + 1 over GF(9)
        let field = gf9();
        let poly = Poly::new(Arc::clone(&field), vec![1, 0, 0, 1]);
        let factors = Berlekamp::new().factorize(&poly);
        assert_eq!(
            factors,
            vec![(Poly::new(Arc::clone(&field), vec![1, 1]), 3)]
        );
    }

    #[test]
    fn merges_root_multiplicities_across_levels() {
        // (1 + x)^6 = 1 + x^2 + x^4 + x^6 needs two nested root extractions
        let field = gf8();
        let poly = Poly::new(Arc::clone(&field), vec![1, 1]).pow(6);
        assert_eq!(poly.coefficients(), &[1, 0, 1, 0, 1, 0, 1]);
        let factors = Berlekamp::new().factorize(&poly);
        assert_eq!(
            factors,
            vec![(Poly::new(Arc::clone(&field), vec![1, 1]), 6)]
        );
    }

    #[test]
    fn normalises_non_monic_input() {
        let field = gf9();
        let monic = Poly::from_roots(Arc::clone(&field), &[1, 2, 8]);
        let scaled = monic.scale(2);
        let solver = Berlekamp::new();
        assert_eq!(solver.factorize(&scaled), solver.factorize(&monic));
    }

    #[test]
    fn factorization_is_deterministic() {
        let field = gf9();
        let poly = Poly::new(Arc::clone(&field), vec![2, 1, 0, 2, 1, 0, 1]);
        let solver = Berlekamp::new();
        assert_eq!(solver.factorize(&poly), solver.factorize(&poly));
    }

    #[test]
    fn linear_factors_with_extension_constants() {
        // roots that only exist in the extension field, not in GF(2)
        let field = gf8();
        let roots = [0b010u32, 0b011, 0b111];
        let poly = Poly::from_roots(Arc::clone(&field), &roots);
        let factors = Berlekamp::new().factorize(&poly);
        assert_eq!(factors.len(), 3);
        for (factor, power) in &factors {
            assert_eq!(*power, 1);
            assert_eq!(factor.degree(), Some(1));
            let root = factor.field().neg(factor.coeff(0));
            assert!(roots.contains(&root));
        }
    }

    #[test]
    fn basis_dimension_counts_distinct_factors() {
        // the kernel dimension equals the number of distinct irreducibles
        let solver = Berlekamp::new();

        let field = gf8();
        let h = &(&Poly::x(Arc::clone(&field)) * &Poly::new(Arc::clone(&field), vec![1, 1]))
            * &Poly::new(Arc::clone(&field), vec![1, 1, 1]);
        assert_eq!(solver.factorizing_basis(&h).len(), 3);

        let field = gf2();
        let parts: [&[u32]; 4] = [&[0, 1], &[1, 1], &[1, 1, 1], &[1, 1, 0, 1]];
        let mut h = Poly::one(Arc::clone(&field));
        for coeffs in parts {
            h = &h * &Poly::new(Arc::clone(&field), coeffs.to_vec());
        }
        assert_eq!(solver.factorizing_basis(&h).len(), 4);
    }

    #[test]
    fn basis_of_irreducible_is_constants_only() {
        let solver: Berlekamp<LogField> = Berlekamp::new();
        let h = Poly::new(gf8(), vec![1, 1, 1]);
        let basis = solver.factorizing_basis(&h);
        assert_eq!(basis.len(), 1);
        assert!(basis[0].is_one());
    }
}

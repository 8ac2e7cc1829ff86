//! Factorization of univariate polynomials over small Galois fields GF(p^k)
//! using Berlekamp's algorithm.

pub mod algebra;
pub mod solver;
pub mod structures;
pub mod utils;

pub use algebra::field::{FieldElements, GaloisField};
pub use solver::berlekamp::Berlekamp;
pub use structures::counting::CountingField;
pub use structures::gf::{FieldError, LogField};
pub use structures::poly::Poly;
pub use utils::is_prime;

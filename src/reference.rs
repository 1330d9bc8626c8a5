//! Brute force weights from the Taylor matching conditions.
//! Much slower and worse conditioned than [`crate::weights`],
//! but independent of it, so we use it to check the recursion.

use crate::error::*;
use crate::weights::validate;
use nalgebra::{DMatrix, DVector};

/// Row `i`, column `j` holds `(x[j] - z)^i / i!`.
pub fn vandermonde_matrix(z: f64, x: &[f64]) -> DMatrix<f64> {
    let n = x.len();
    let mut a = DMatrix::<f64>::zeros(n, n);
    for j in 0..n {
        let offset = x[j] - z;
        let mut term = 1.0;
        for i in 0..n {
            a[(i, j)] = term;
            term *= offset / (i + 1) as f64;
        }
    }
    a
}

/// Solve `A c = e_order` with a dense LU factorization.
#[profiling::function]
pub fn vandermonde_weights(
    order: usize,
    z: f64,
    x: &[f64],
) -> Result<Vec<f64>> {
    validate(order, z, x)?;

    let n = x.len();
    let a = vandermonde_matrix(z, x);
    let mut b = DVector::<f64>::zeros(n);
    b[order] = 1.0;

    let c = a.lu().solve(&b).ok_or(FdError::SingularSystem(n))?;
    Ok(c.iter().copied().collect())
}

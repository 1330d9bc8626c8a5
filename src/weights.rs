//! Finite difference weights on arbitrary grids.
//!
//!   B. Fornberg, "Calculation of weights in finite difference formulas",
//!   SIAM Review 40 (1998), pp. 685-691.

use crate::error::*;
use nalgebra::DMatrix;

/// Check the preconditions shared by every weight computation.
/// The sample set must hold at least `order + 1` finite, pairwise distinct
/// locations and the evaluation point must be finite.
pub fn validate(order: usize, z: f64, x: &[f64]) -> Result<()> {
    let result = check_samples(order, z, x);
    if let Err(ref e) = result {
        tracing::debug!(order, z, samples = x.len(), "rejected input: {e}");
    }
    result.map_err(FdError::from)
}

fn check_samples(
    order: usize,
    z: f64,
    x: &[f64],
) -> std::result::Result<(), InvalidInput> {
    if x.is_empty() {
        return Err(InvalidInput::EmptySampleSet);
    }
    if x.len() <= order {
        return Err(InvalidInput::InsufficientSamples {
            order,
            samples: x.len(),
        });
    }
    if !z.is_finite() {
        return Err(InvalidInput::NonFiniteEvaluationPoint);
    }
    if let Some(index) = x.iter().position(|v| !v.is_finite()) {
        return Err(InvalidInput::NonFinite { index });
    }

    // Sorting indices puts equal locations next to each other.
    let mut sorted: Vec<usize> = (0..x.len()).collect();
    sorted.sort_by(|a, b| x[*a].total_cmp(&x[*b]));
    for pair in sorted.windows(2) {
        let (a, b) = (pair[0].min(pair[1]), pair[0].max(pair[1]));
        if x[a] == x[b] {
            return Err(InvalidInput::DuplicatePoint {
                first: a,
                second: b,
                value: x[a],
            });
        }
    }
    Ok(())
}

/// Weights for every derivative order up to `order`.
/// Row `i` belongs to sample `x[i]`, column `m` to the `m`-th derivative,
/// so column `m` dotted with samples of `u` approximates `u^(m)(z)`.
pub fn compute_weight_table(
    order: usize,
    z: f64,
    x: &[f64],
) -> Result<DMatrix<f64>> {
    validate(order, z, x)?;
    Ok(fornberg_table(order, z, x))
}

/// Weights for the `order`-th derivative at `z` using samples at `x`,
/// aligned with `x`.
pub fn compute_weights(order: usize, z: f64, x: &[f64]) -> Result<Vec<f64>> {
    let table = compute_weight_table(order, z, x)?;
    Ok(table.column(order).iter().copied().collect())
}

/// The recursion itself, inputs already validated.
/// Each incoming sample `i` extends the interpolants built from `0..i`.
/// Rows `0..i` are rescaled in place, so derivative orders are visited
/// from high to low: entry `m` reads entry `m - 1` of the same row
/// before that one is overwritten.
#[profiling::function]
fn fornberg_table(order: usize, z: f64, x: &[f64]) -> DMatrix<f64> {
    let n = x.len() - 1;
    let mut c = DMatrix::<f64>::zeros(n + 1, order + 1);

    let mut c1 = 1.0;
    let mut c4 = x[0] - z;
    c[(0, 0)] = 1.0;
    for i in 1..=n {
        let mn = i.min(order);
        let mut c2 = 1.0;
        let c5 = c4;
        c4 = x[i] - z;
        for j in 0..i {
            let c3 = x[i] - x[j];
            c2 *= c3;
            if j == i - 1 {
                for m in (1..=mn).rev() {
                    c[(i, m)] = c1
                        * (m as f64 * c[(i - 1, m - 1)] - c5 * c[(i - 1, m)])
                        / c2;
                }
                c[(i, 0)] = -c1 * c5 * c[(i - 1, 0)] / c2;
            }
            for m in (1..=mn).rev() {
                c[(j, m)] = (c4 * c[(j, m)] - m as f64 * c[(j, m - 1)]) / c3;
            }
            c[(j, 0)] = c4 * c[(j, 0)] / c3;
        }
        c1 = c2;
    }
    c
}

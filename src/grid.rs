//! One dimensional grids on `[a, b]`, ordered left to right.
//! Both ends are always hit exactly.

use crate::error::*;
use rand::prelude::*;

fn check_interval(a: f64, b: f64, n: usize) -> Result<()> {
    if n < 2 {
        return Err(InvalidInput::GridSize(n).into());
    }
    if !(a.is_finite() && b.is_finite() && a < b) {
        return Err(InvalidInput::GridInterval(a, b).into());
    }
    Ok(())
}

/// Map `s` in `[0, 1]` onto the grid, computing each point from its index
/// rather than accumulating steps, so roundoff does not build up.
fn from_unit<F: Fn(f64) -> f64>(a: f64, b: f64, n: usize, map: F) -> Vec<f64> {
    let mut result: Vec<f64> = (0..n)
        .map(|i| map(i as f64 / (n - 1) as f64))
        .collect();
    result[0] = a;
    result[n - 1] = b;
    result
}

/// `n` equispaced points.
pub fn uniform(a: f64, b: f64, n: usize) -> Result<Vec<f64>> {
    check_interval(a, b, n)?;
    Ok(from_unit(a, b, n, |s| a + (b - a) * s))
}

/// `n` points clustered towards both ends like Chebyshev extreme points.
pub fn chebyshev(a: f64, b: f64, n: usize) -> Result<Vec<f64>> {
    check_interval(a, b, n)?;
    Ok(from_unit(a, b, n, |s| {
        a + 0.5 * (b - a) * (1.0 + (std::f64::consts::PI * (1.0 - s)).cos())
    }))
}

/// Uniform grid with each interior point moved by a random amount
/// of at most `fraction` times the spacing.
/// Points stay distinct and sorted as long as `fraction < 0.5`.
pub fn jittered<R: Rng + ?Sized>(
    a: f64,
    b: f64,
    n: usize,
    fraction: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if !(0.0..0.5).contains(&fraction) {
        return Err(InvalidInput::JitterFraction(fraction).into());
    }
    let mut result = uniform(a, b, n)?;
    let h = (b - a) / (n - 1) as f64;
    if fraction > 0.0 {
        for p in result.iter_mut().take(n - 1).skip(1) {
            *p += rng.gen_range(-fraction..fraction) * h;
        }
    }
    Ok(result)
}

use crate::error::*;
use crate::weights::compute_weights;

/// A derivative approximation, sample locations paired with their weights.
/// Unlike a fixed offset stencil, the points may be anywhere,
/// so we keep them alongside the weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Stencil {
    order: usize,
    center: f64,
    points: Vec<f64>,
    weights: Vec<f64>,
}

impl Stencil {
    /// Approximate the `order`-th derivative at `center`
    /// from samples at `points`.
    pub fn new(order: usize, center: f64, points: &[f64]) -> Result<Self> {
        let weights = compute_weights(order, center, points)?;
        Ok(Stencil {
            order,
            center,
            points: points.to_vec(),
            weights,
        })
    }

    /// Uniform grid stencil centered at 0, sample `i` sits at `offsets[i] * h`.
    pub fn from_offsets(order: usize, offsets: &[i32], h: f64) -> Result<Self> {
        let points: Vec<f64> = offsets.iter().map(|o| *o as f64 * h).collect();
        Self::new(order, 0.0, &points)
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dot product with function values sampled at `points()`.
    pub fn apply(&self, values: &[f64]) -> f64 {
        debug_assert_eq!(values.len(), self.weights.len());
        self.weights.iter().zip(values).map(|(w, v)| w * v).sum()
    }

    pub fn apply_fn<F: Fn(f64) -> f64>(&self, f: F) -> f64 {
        self.weights
            .iter()
            .zip(&self.points)
            .map(|(w, p)| w * f(*p))
            .sum()
    }

    /// Whether the points mirror each other about the center.
    pub fn is_symmetric(&self) -> bool {
        let mut offsets: Vec<f64> =
            self.points.iter().map(|p| p - self.center).collect();
        offsets.sort_by(f64::total_cmp);
        let scale = offsets
            .iter()
            .fold(0.0_f64, |acc, o| acc.max(o.abs()))
            .max(f64::MIN_POSITIVE);
        let n = offsets.len();
        (0..n / 2 + 1).all(|i| {
            (offsets[i] + offsets[n - 1 - i]).abs() <= 1e-12 * scale
        })
    }

    /// Power of the spacing in the leading error term.
    /// Samples fix `len - order` powers, symmetry cancels one more
    /// when that count is odd.
    pub fn accuracy_order(&self) -> usize {
        let base = self.len() - self.order;
        if base % 2 == 1 && self.is_symmetric() {
            base + 1
        } else {
            base
        }
    }
}

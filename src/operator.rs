use crate::error::*;
use crate::weights::{compute_weights, validate};
use nalgebra::DMatrix;
use rayon::prelude::*;

/// Weights for one matrix row,
/// nonzero in columns `start..start + weights.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorRow {
    pub start: usize,
    pub weights: Vec<f64>,
}

/// A dense `order`-th derivative operator on a grid.
/// Row `i` approximates the derivative at `x[i]` from `width` consecutive
/// grid points around `i`, or from the whole grid when `width` is `None`.
/// Windows are taken in index order, so windowed operators need an
/// increasing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOperator {
    pub order: usize,
    pub width: Option<usize>,
}

/// Every point strictly left of the next one.
pub fn check_increasing(x: &[f64]) -> Result<()> {
    match x.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(index) => {
            Err(InvalidInput::Unsorted { index: index + 1 }.into())
        }
        None => Ok(()),
    }
}

impl DiffOperator {
    pub fn new(order: usize, width: Option<usize>) -> Self {
        DiffOperator { order, width }
    }

    /// Operator built from every grid point, the spectral-like limit.
    pub fn global(order: usize) -> Self {
        Self::new(order, None)
    }

    pub fn local(order: usize, width: usize) -> Self {
        Self::new(order, Some(width))
    }

    fn window_width(&self, n: usize) -> Result<usize> {
        match self.width {
            None => Ok(n),
            Some(width) if width >= 1 && width <= n => Ok(width),
            Some(width) => Err(InvalidInput::StencilWidth {
                width,
                samples: n,
            }
            .into()),
        }
    }

    /// First column of the window for row `i`.
    /// Centered on `i`, shifted inwards near the ends.
    pub fn window_start(n: usize, width: usize, i: usize) -> usize {
        debug_assert!(width <= n && i < n);
        i.saturating_sub(width / 2).min(n - width)
    }

    /// A single row, without the whole grid check `assemble` does up front.
    pub fn assemble_row(&self, x: &[f64], i: usize) -> Result<OperatorRow> {
        if i >= x.len() {
            return Err(InvalidInput::RowIndex {
                index: i,
                rows: x.len(),
            }
            .into());
        }
        let width = self.window_width(x.len())?;
        let start = Self::window_start(x.len(), width, i);
        let weights =
            compute_weights(self.order, x[i], &x[start..start + width])?;
        Ok(OperatorRow { start, weights })
    }

    pub fn rows(&self, x: &[f64]) -> Result<Vec<OperatorRow>> {
        profiling::scope!("operator: rows");
        validate(0, 0.0, x)?;
        self.window_width(x.len())?;
        if self.width.is_some() {
            check_increasing(x)?;
        }
        (0..x.len())
            .into_par_iter()
            .map(|i| self.assemble_row(x, i))
            .collect()
    }

    /// Dense `n x n` matrix, one row per grid point.
    pub fn assemble(&self, x: &[f64]) -> Result<DMatrix<f64>> {
        let rows = self.rows(x)?;
        let n = x.len();
        let mut result = DMatrix::<f64>::zeros(n, n);
        for (i, row) in rows.iter().enumerate() {
            for (offset, w) in row.weights.iter().enumerate() {
                result[(i, row.start + offset)] = *w;
            }
        }
        tracing::debug!(
            order = self.order,
            width = ?self.width,
            rows = n,
            "assembled differentiation operator"
        );
        Ok(result)
    }
}

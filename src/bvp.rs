//! Dense solver for `u'' = f` on `[x[0], x[n-1]]`.

use crate::error::*;
use crate::operator::{check_increasing, DiffOperator};
use crate::weights::validate;
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// `u = value`
    Dirichlet(f64),
    /// `u' = value`
    Neumann(f64),
}

impl Boundary {
    fn value(&self) -> f64 {
        match self {
            Boundary::Dirichlet(v) | Boundary::Neumann(v) => *v,
        }
    }
}

/// Norms of the inverse system matrix. A scheme is stable when these
/// stay bounded, in the grid sense, as the grid is refined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseNorms {
    /// Largest singular value.
    pub two: f64,
    /// Largest absolute row sum.
    pub infinity: f64,
}

/// Interior rows approximate `u''` from `width` neighbors, the whole
/// grid when `width` is `None`. Neumann rows use first derivative weights
/// over the same window at the end point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoPointProblem {
    pub left: Boundary,
    pub right: Boundary,
    pub width: Option<usize>,
}

impl TwoPointProblem {
    pub fn new(left: Boundary, right: Boundary) -> Self {
        TwoPointProblem {
            left,
            right,
            width: None,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    fn boundary_row(
        &self,
        boundary: Boundary,
        x: &[f64],
        i: usize,
        a: &mut DMatrix<f64>,
    ) -> Result<()> {
        match boundary {
            Boundary::Dirichlet(_) => {
                a[(i, i)] = 1.0;
            }
            Boundary::Neumann(_) => {
                let row =
                    DiffOperator::new(1, self.width).assemble_row(x, i)?;
                for (offset, w) in row.weights.iter().enumerate() {
                    a[(i, row.start + offset)] = *w;
                }
            }
        }
        Ok(())
    }

    /// The assembled system matrix for an increasing grid `x`.
    pub fn matrix(&self, x: &[f64]) -> Result<DMatrix<f64>> {
        profiling::scope!("bvp: matrix");
        let n = x.len();
        if n < 2 {
            return Err(InvalidInput::GridSize(n).into());
        }
        if let (Boundary::Neumann(_), Boundary::Neumann(_)) =
            (self.left, self.right)
        {
            return Err(InvalidInput::PureNeumann.into());
        }
        validate(0, 0.0, x)?;
        check_increasing(x)?;

        let d2 = DiffOperator::new(2, self.width);
        let interior = (1..n - 1)
            .into_par_iter()
            .map(|i| d2.assemble_row(x, i))
            .collect::<Result<Vec<_>>>()?;

        let mut a = DMatrix::<f64>::zeros(n, n);
        for (i, row) in interior.iter().enumerate() {
            for (offset, w) in row.weights.iter().enumerate() {
                a[(i + 1, row.start + offset)] = *w;
            }
        }
        self.boundary_row(self.left, x, 0, &mut a)?;
        self.boundary_row(self.right, x, n - 1, &mut a)?;
        Ok(a)
    }

    /// Solve with `rhs[i] = f(x[i])` on interior points.
    /// The first and last entries of `rhs` are ignored.
    pub fn solve_values(
        &self,
        x: &[f64],
        rhs: &[f64],
    ) -> Result<DVector<f64>> {
        if rhs.len() != x.len() {
            return Err(InvalidInput::RhsLength {
                expected: x.len(),
                got: rhs.len(),
            }
            .into());
        }
        let a = self.matrix(x)?;
        let n = x.len();
        let mut b = DVector::from_column_slice(rhs);
        b[0] = self.left.value();
        b[n - 1] = self.right.value();

        profiling::scope!("bvp: lu solve");
        let u = a.lu().solve(&b).ok_or(FdError::SingularSystem(n))?;
        tracing::trace!(n, width = ?self.width, "solved two point problem");
        Ok(u)
    }

    pub fn solve<F: Fn(f64) -> f64>(
        &self,
        x: &[f64],
        f: F,
    ) -> Result<DVector<f64>> {
        let rhs: Vec<f64> = x.iter().map(|v| f(*v)).collect();
        self.solve_values(x, &rhs)
    }

    #[profiling::function]
    pub fn inverse_norms(&self, x: &[f64]) -> Result<InverseNorms> {
        let a = self.matrix(x)?;
        let n = a.nrows();
        let inverse = a.try_inverse().ok_or(FdError::SingularSystem(n))?;
        let infinity = inverse
            .row_iter()
            .map(|row| row.iter().map(|v| v.abs()).sum::<f64>())
            .fold(0.0, f64::max);
        let two = inverse.svd(false, false).singular_values.max();
        Ok(InverseNorms { two, infinity })
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::grid;
    use float_cmp::assert_approx_eq;

    fn max_error<F: Fn(f64) -> f64>(
        x: &[f64],
        u: &DVector<f64>,
        exact: F,
    ) -> f64 {
        x.iter()
            .zip(u.iter())
            .map(|(p, v)| (v - exact(*p)).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn neumann_matrix() {
        // 4 interior points on [0, 1]
        let x = grid::uniform(0.0, 1.0, 6).unwrap();
        let h = 0.2;
        let problem = TwoPointProblem::new(
            Boundary::Neumann(0.0),
            Boundary::Dirichlet(0.0),
        )
        .with_width(3);
        let a = problem.matrix(&x).unwrap();

        assert_approx_eq!(f64, a[(0, 0)], -3.0 / (2.0 * h), epsilon = 1e-10);
        assert_approx_eq!(f64, a[(0, 1)], 2.0 / h, epsilon = 1e-10);
        assert_approx_eq!(f64, a[(0, 2)], -1.0 / (2.0 * h), epsilon = 1e-10);
        let c = 1.0 / (h * h);
        for i in 1..5 {
            assert_approx_eq!(f64, a[(i, i - 1)], c, epsilon = 1e-9);
            assert_approx_eq!(f64, a[(i, i)], -2.0 * c, epsilon = 1e-9);
            assert_approx_eq!(f64, a[(i, i + 1)], c, epsilon = 1e-9);
        }
        assert_approx_eq!(f64, a[(5, 5)], 1.0);
        assert_approx_eq!(f64, a.row(5).sum(), 1.0);
    }

    #[test]
    fn quadratic_is_exact() {
        // u = 3x^2 - 6x, u'' = 6, u'(0) = -6, u(1) = -3
        let x = grid::uniform(0.0, 1.0, 22).unwrap();
        let problem = TwoPointProblem::new(
            Boundary::Neumann(-6.0),
            Boundary::Dirichlet(-3.0),
        )
        .with_width(3);
        let u = problem.solve(&x, |_| 6.0).unwrap();
        let err = max_error(&x, &u, |p| 3.0 * p * p - 6.0 * p);
        assert!(err < 1e-10, "err = {err}");

        // And the operator applied to the exact solution gives the rhs.
        let a = problem.matrix(&x).unwrap();
        let exact = DVector::from_iterator(
            x.len(),
            x.iter().map(|p| 3.0 * p * p - 6.0 * p),
        );
        let b = &a * exact;
        assert_approx_eq!(f64, b[0], -6.0, epsilon = 1e-10);
        for i in 1..21 {
            assert_approx_eq!(f64, b[i], 6.0, epsilon = 1e-8);
        }
        assert_approx_eq!(f64, b[21], -3.0, epsilon = 1e-14);
    }

    #[test]
    fn second_order_convergence() {
        let exact = |p: f64| (2.0 * p).sin();
        let problem = TwoPointProblem::new(
            Boundary::Neumann(2.0),
            Boundary::Dirichlet(2.0f64.sin()),
        )
        .with_width(3);
        let errors: Vec<f64> = [50, 100]
            .iter()
            .map(|n| {
                let x = grid::uniform(0.0, 1.0, *n).unwrap();
                let u =
                    problem.solve(&x, |p| -4.0 * (2.0 * p).sin()).unwrap();
                max_error(&x, &u, exact)
            })
            .collect();
        let ratio = errors[0] / errors[1];
        assert!(ratio > 3.0 && ratio < 5.0, "errors = {errors:?}");
    }

    #[test]
    fn chebyshev_beats_equispaced() {
        let (a, b) = (-1.8, 2.1);
        let sol = |p: f64| (2.8 * p - 1.1).cos();
        let d_sol = |p: f64| -2.8 * (2.8 * p - 1.1).sin();
        let d2_sol = |p: f64| -2.8 * 2.8 * (2.8 * p - 1.1).cos();
        let problem = TwoPointProblem::new(
            Boundary::Neumann(d_sol(a)),
            Boundary::Dirichlet(sol(b)),
        );

        let n = 40;
        let x = grid::uniform(a, b, n).unwrap();
        let equi = max_error(&x, &problem.solve(&x, d2_sol).unwrap(), sol);
        let x = grid::chebyshev(a, b, n).unwrap();
        let cheb = max_error(&x, &problem.solve(&x, d2_sol).unwrap(), sol);

        assert!(cheb < 1e-6, "chebyshev error {cheb}");
        assert!(cheb < equi, "chebyshev {cheb} equispaced {equi}");
    }

    #[test]
    fn rejected_problems() {
        let x = grid::uniform(0.0, 1.0, 5).unwrap();
        let problem = TwoPointProblem::new(
            Boundary::Neumann(0.0),
            Boundary::Neumann(1.0),
        );
        assert_eq!(
            problem.solve(&x, |_| 0.0),
            Err(FdError::InvalidInput(InvalidInput::PureNeumann))
        );

        let problem = TwoPointProblem::new(
            Boundary::Dirichlet(0.0),
            Boundary::Dirichlet(1.0),
        );
        assert_eq!(
            problem.solve_values(&x, &[0.0; 3]),
            Err(FdError::InvalidInput(InvalidInput::RhsLength {
                expected: 5,
                got: 3
            }))
        );
        assert_eq!(
            problem.matrix(&[0.0]),
            Err(FdError::InvalidInput(InvalidInput::GridSize(1)))
        );
        assert!(matches!(
            problem.with_width(2).matrix(&x),
            Err(FdError::InvalidInput(
                InvalidInput::InsufficientSamples { .. }
            ))
        ));
    }

    #[test]
    fn unsorted_grid() {
        let problem = TwoPointProblem::new(
            Boundary::Dirichlet(0.0),
            Boundary::Dirichlet(1.0),
        );
        assert_eq!(
            problem.matrix(&[0.0, 0.6, 0.3, 1.0]),
            Err(FdError::InvalidInput(InvalidInput::Unsorted { index: 2 }))
        );
        // Reversed grids would swap the ends.
        assert_eq!(
            problem.solve(&[1.0, 0.5, 0.0], |_| 0.0),
            Err(FdError::InvalidInput(InvalidInput::Unsorted { index: 1 }))
        );
    }

    #[test]
    fn inverse_norms_stay_bounded() {
        for left in [Boundary::Dirichlet(0.0), Boundary::Neumann(0.0)] {
            let problem =
                TwoPointProblem::new(left, Boundary::Dirichlet(0.0))
                    .with_width(3);
            let norms: Vec<InverseNorms> = [51, 101, 201]
                .iter()
                .map(|n| {
                    let x = grid::uniform(0.0, 1.0, *n).unwrap();
                    problem.inverse_norms(&x).unwrap()
                })
                .collect();

            for (n, norm) in [51, 101, 201].iter().zip(&norms) {
                assert!(norm.infinity < 3.0, "{left:?}: {norms:?}");
                // the boundary columns alone give sqrt(n)
                let scaled = norm.two / (*n as f64).sqrt();
                assert!(scaled > 0.5 && scaled < 2.0, "{left:?}: {norms:?}");
            }
            for pair in norms.windows(2) {
                assert!(pair[1].infinity < 1.05 * pair[0].infinity);
                assert!(pair[1].two < 1.5 * pair[0].two);
            }
        }

        // u'' = 1, u(0) = u(1) = 0 has max |u| = 1/8 on top of the
        // unit boundary columns.
        let x = grid::uniform(0.0, 1.0, 101).unwrap();
        let norms = TwoPointProblem::new(
            Boundary::Dirichlet(0.0),
            Boundary::Dirichlet(0.0),
        )
        .with_width(3)
        .inverse_norms(&x)
        .unwrap();
        assert_approx_eq!(f64, norms.infinity, 1.125, epsilon = 1e-6);
    }
}

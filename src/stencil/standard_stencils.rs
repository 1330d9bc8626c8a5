//! Uniform grid stencils with well known closed forms.

use crate::error::*;
use crate::stencil::*;

/// `(u(h) - u(0)) / h`
pub fn forward_first(h: f64) -> Result<Stencil> {
    Stencil::from_offsets(1, &[0, 1], h)
}

/// `(u(-h) - 2 u(0) + u(h)) / h^2`
pub fn central_second(h: f64) -> Result<Stencil> {
    Stencil::from_offsets(2, &[-1, 0, 1], h)
}

/// Second order one sided first derivative,
/// `(-3 u(0) + 4 u(h) - u(2h)) / 2h`, used for Neumann boundary rows.
pub fn one_sided_first(h: f64) -> Result<Stencil> {
    Stencil::from_offsets(1, &[0, 1, 2], h)
}

/// Symmetric stencil on offsets `-half_width..=half_width`.
pub fn centered(order: usize, half_width: usize, h: f64) -> Result<Stencil> {
    let hw = half_width as i32;
    let offsets: Vec<i32> = (-hw..=hw).collect();
    Stencil::from_offsets(order, &offsets, h)
}

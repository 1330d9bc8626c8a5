pub mod build_info;
pub mod bvp;
pub mod demo_args;
pub mod error;
pub mod grid;
pub mod operator;
pub mod reference;
pub mod stencil;
pub mod weights;

pub use error::{FdError, InvalidInput, Result};
pub use weights::{compute_weight_table, compute_weights};

use thiserror::Error;

/// Preconditions a caller can violate.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidInput {
    #[error("sample set is empty")]
    EmptySampleSet,

    #[error(
        "derivative order {order} needs at least {} samples, got {samples}",
        .order.saturating_add(1)
    )]
    InsufficientSamples { order: usize, samples: usize },

    #[error("samples {first} and {second} share location {value}")]
    DuplicatePoint {
        first: usize,
        second: usize,
        value: f64,
    },

    #[error("sample {index} is not finite")]
    NonFinite { index: usize },

    #[error("evaluation point is not finite")]
    NonFiniteEvaluationPoint,

    #[error("grid needs at least 2 points, got {0}")]
    GridSize(usize),

    #[error("grid interval [{0}, {1}] is empty or not finite")]
    GridInterval(f64, f64),

    #[error("jitter fraction {0} must lie in [0, 0.5)")]
    JitterFraction(f64),

    #[error("stencil width {width} is outside 1..={samples}")]
    StencilWidth { width: usize, samples: usize },

    #[error("both ends carry Neumann conditions, solution is not unique")]
    PureNeumann,

    #[error("row {index} is outside a grid of {rows} points")]
    RowIndex { index: usize, rows: usize },

    #[error("grid is not increasing at point {index}")]
    Unsorted { index: usize },

    #[error("right hand side has {got} entries, grid has {expected}")]
    RhsLength { expected: usize, got: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FdError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// LU factorization hit a zero pivot.
    #[error("linear system of size {0} is singular")]
    SingularSystem(usize),
}

pub type Result<T, E = FdError> = std::result::Result<T, E>;

//! Error types for the anofox-seasonality library.

use thiserror::Error;

/// Result type alias for seasonality operations.
pub type Result<T> = std::result::Result<T, SeasonalityError>;

/// Errors that can occur while configuring or evaluating seasonality terms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeasonalityError {
    /// Harmonic order is not a positive integer.
    #[error("n_order must be a positive integer, got {n_order}")]
    InvalidOrder { n_order: usize },

    /// The harmonic axis is missing from the declared dims.
    #[error("dims {dims:?} must include the harmonic axis '{axis}'")]
    MissingAxis { axis: String, dims: Vec<String> },

    /// Variable name coincides with the prefix.
    #[error("variable name cannot be the same as the prefix '{0}'")]
    NameCollision(String),

    /// The sample axis is already declared by the weights.
    #[error("sample axis '{0}' already exists on the weights")]
    AxisCollision(String),

    /// Two tensors disagree on the size of a shared axis.
    #[error("dimension mismatch on axis '{axis}': expected {expected}, got {got}")]
    DimensionMismatch {
        axis: String,
        expected: usize,
        got: usize,
    },

    /// Buffer shape does not fit the declared axes.
    #[error("invalid shape: expected {expected} axes, got {got}")]
    InvalidShape { expected: usize, got: usize },

    /// Flat buffer length does not match the product of the shape.
    #[error("buffer of {got} values does not fit a shape of {expected} elements")]
    BufferLength { expected: usize, got: usize },

    /// The same axis name was declared twice.
    #[error("duplicate axis '{0}'")]
    DuplicateAxis(String),

    /// Axis is not part of the target axis list.
    #[error("unknown axis '{0}'")]
    UnknownAxis(String),

    /// No coordinate labels were supplied for an axis.
    #[error("missing coordinates for axis '{0}'")]
    MissingCoords(String),

    /// Variable was already recorded.
    #[error("variable '{0}' already exists")]
    DuplicateVariable(String),

    /// Variable is not present in the dataset.
    #[error("variable '{0}' not found")]
    MissingVariable(String),

    /// Unknown seasonality kind tag.
    #[error("unknown seasonality kind: {0}. Choose from yearly, monthly")]
    UnknownKind(String),

    /// Distribution parameter rejected by the sampler.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

//! Error types for packed matrix operations

use core::fmt;

/// Errors that can occur during matrix operations
///
/// Every variant carries the values that failed validation so that callers can
/// report them without re-deriving the shapes involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Requested dimensions are unrepresentable
    InvalidShape { rows: usize, cols: usize },
    /// A shape with other than two dimensions was supplied
    InvalidDimensionality { dims: usize },
    /// A supplied buffer or vector has the wrong number of elements
    SizeMismatch { expected: usize, actual: usize },
    /// Nested input has rows of unequal length
    NonRectangularShape { row: usize, len: usize, expected: usize },
    /// Elementwise operands do not have identical shapes
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Inner dimensions of a product do not agree
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Vector length does not match the broadcast target dimension
    IncompatibleBroadcast { len: usize, target: usize },
    /// Row, column, band or rectangle outside the valid range
    IndexOutOfBounds { index: isize, bound: usize },
    /// Transform source vector has the wrong length
    WrongSourceLength { expected: usize, actual: usize },
    /// Transform destination vector has the wrong length
    WrongDestLength { expected: usize, actual: usize },
    /// Destination buffer is too small for a bulk copy
    InsufficientBuffer { required: usize, available: usize },
}

/// Coarse grouping of [`MatrixError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Shape or dimension disagreement
    Shape,
    /// Index or range outside the matrix
    Index,
    /// Caller-supplied storage is too small
    Buffer,
}

impl MatrixError {
    /// Get the category of this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            MatrixError::InvalidShape { .. }
            | MatrixError::InvalidDimensionality { .. }
            | MatrixError::SizeMismatch { .. }
            | MatrixError::NonRectangularShape { .. }
            | MatrixError::ShapeMismatch { .. }
            | MatrixError::DimensionMismatch { .. }
            | MatrixError::IncompatibleBroadcast { .. }
            | MatrixError::WrongSourceLength { .. }
            | MatrixError::WrongDestLength { .. } => ErrorCategory::Shape,
            MatrixError::IndexOutOfBounds { .. } => ErrorCategory::Index,
            MatrixError::InsufficientBuffer { .. } => ErrorCategory::Buffer,
        }
    }

    /// Shorthand for an out-of-bounds unsigned index
    ///
    /// Indices above `isize::MAX` are reported as `isize::MAX`.
    pub const fn out_of_bounds(index: usize, bound: usize) -> Self {
        let index = if index > isize::MAX as usize {
            isize::MAX
        } else {
            index as isize
        };
        MatrixError::IndexOutOfBounds { index, bound }
    }
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MatrixError::InvalidShape { rows, cols } => {
                write!(f, "Invalid matrix shape {rows}x{cols}")
            }
            MatrixError::InvalidDimensionality { dims } => {
                write!(f, "Cannot create a matrix with dimensionality {dims}")
            }
            MatrixError::SizeMismatch { expected, actual } => {
                write!(f, "Data has wrong size: expected {expected} elements, got {actual}")
            }
            MatrixError::NonRectangularShape { row, len, expected } => write!(
                f,
                "Array shape is not rectangular: row {row} has length {len}, expected {expected}"
            ),
            MatrixError::ShapeMismatch { left, right } => write!(
                f,
                "Mismatched shapes: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            MatrixError::DimensionMismatch { left, right } => write!(
                f,
                "Incompatible dimensions for product: {}x{} * {}x{}",
                left.0, left.1, right.0, right.1
            ),
            MatrixError::IncompatibleBroadcast { len, target } => {
                write!(f, "Cannot broadcast vector of length {len} to dimension {target}")
            }
            MatrixError::IndexOutOfBounds { index, bound } => {
                write!(f, "Index {index} out of bounds (bound {bound})")
            }
            MatrixError::WrongSourceLength { expected, actual } => {
                write!(f, "Source vector has length {actual}, expected {expected}")
            }
            MatrixError::WrongDestLength { expected, actual } => {
                write!(f, "Destination vector has length {actual}, expected {expected}")
            }
            MatrixError::InsufficientBuffer { required, available } => write!(
                f,
                "Insufficient buffer space: need {required} elements, {available} available"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatrixError {}

/// Result type for matrix operations
pub type Result<T> = core::result::Result<T, MatrixError>;

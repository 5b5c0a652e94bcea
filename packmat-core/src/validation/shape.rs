//! Shape agreement checks for binary matrix operations

use crate::MatrixError;

/// Require two operands to have identical shapes
pub const fn check_same_shape(
    left: (usize, usize),
    right: (usize, usize),
) -> Result<(), MatrixError> {
    if left.0 != right.0 || left.1 != right.1 {
        return Err(MatrixError::ShapeMismatch { left, right });
    }
    Ok(())
}

/// Require `left * right` to be defined, returning the product shape
pub const fn check_product(
    left: (usize, usize),
    right: (usize, usize),
) -> Result<(usize, usize), MatrixError> {
    if left.1 != right.0 {
        return Err(MatrixError::DimensionMismatch { left, right });
    }
    Ok((left.0, right.1))
}

/// Require a transform's source and destination lengths to fit an `nrows x ncols` matrix
///
/// The source is checked first.
pub const fn check_transform(
    nrows: usize,
    ncols: usize,
    source_len: usize,
    dest_len: usize,
) -> Result<(), MatrixError> {
    if source_len != ncols {
        return Err(MatrixError::WrongSourceLength {
            expected: ncols,
            actual: source_len,
        });
    }
    if dest_len != nrows {
        return Err(MatrixError::WrongDestLength {
            expected: nrows,
            actual: dest_len,
        });
    }
    Ok(())
}

/// Require a buffer of `actual` elements where `expected` are needed
pub const fn check_length(expected: usize, actual: usize) -> Result<(), MatrixError> {
    if expected != actual {
        return Err(MatrixError::SizeMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_same_shape() {
        assert_eq!(check_same_shape((2, 3), (2, 3)), Ok(()));
        assert_eq!(
            check_same_shape((2, 3), (3, 2)),
            Err(MatrixError::ShapeMismatch {
                left: (2, 3),
                right: (3, 2)
            })
        );
    }

    #[test]
    fn test_check_product() {
        assert_eq!(check_product((2, 3), (3, 5)), Ok((2, 5)));
        assert_eq!(check_product((0, 3), (3, 0)), Ok((0, 0)));
        assert_eq!(
            check_product((2, 3), (2, 3)),
            Err(MatrixError::DimensionMismatch {
                left: (2, 3),
                right: (2, 3)
            })
        );
    }

    #[test]
    fn test_check_transform() {
        assert_eq!(check_transform(2, 3, 3, 2), Ok(()));
        assert_eq!(
            check_transform(2, 3, 2, 2),
            Err(MatrixError::WrongSourceLength {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            check_transform(2, 3, 3, 3),
            Err(MatrixError::WrongDestLength {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_check_length() {
        assert_eq!(check_length(4, 4), Ok(()));
        assert_eq!(
            check_length(4, 5),
            Err(MatrixError::SizeMismatch {
                expected: 4,
                actual: 5
            })
        );
    }
}

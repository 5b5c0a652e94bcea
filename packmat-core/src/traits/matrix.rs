//! Generic matrix contract
//!
//! This module defines the read interface that every matrix representation
//! (dense, strided, sparse, block...) exposes so that it can interoperate with
//! packed matrices. These are pure interfaces with no concrete implementations.

use crate::validation::check_capacity;
use crate::Result;

/// Read access to any 2-D matrix of `f64`
///
/// Implementors only need the shape and element accessors. The bulk export and
/// capability methods have element-by-element defaults that specialised types
/// override.
pub trait MatrixLike {
    /// Number of rows
    fn nrows(&self) -> usize;

    /// Number of columns
    fn ncols(&self) -> usize;

    /// Element at `(row, col)`
    ///
    /// Callers guarantee `row < nrows()` and `col < ncols()`. Implementations may
    /// panic otherwise.
    fn element(&self, row: usize, col: usize) -> f64;

    /// Shape as `(rows, cols)`
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Total number of elements
    fn element_count(&self) -> usize {
        self.nrows() * self.ncols()
    }

    /// Copy every element into `dest` in row-major order
    ///
    /// Fails with `InsufficientBuffer` if `dest` is shorter than
    /// [`element_count`](Self::element_count).
    fn copy_elements_to(&self, dest: &mut [f64]) -> Result<()> {
        let (nrows, ncols) = self.shape();
        check_capacity(nrows * ncols, 0, dest.len())?;
        for row in 0..nrows {
            for col in 0..ncols {
                dest[row * ncols + col] = self.element(row, col);
            }
        }
        Ok(())
    }

    /// The packed row-major buffer backing this matrix, if it has one
    ///
    /// Returning `Some` promises that the slice has exactly
    /// `nrows() * ncols()` elements laid out with row stride `ncols()` and
    /// column stride 1. Operations use this to pick a buffer-level fast path.
    fn as_packed(&self) -> Option<&[f64]> {
        None
    }

    /// Whether this matrix is a window onto storage owned by something else
    fn is_view(&self) -> bool {
        false
    }
}

impl<M: MatrixLike + ?Sized> MatrixLike for &M {
    fn nrows(&self) -> usize {
        (**self).nrows()
    }

    fn ncols(&self) -> usize {
        (**self).ncols()
    }

    fn element(&self, row: usize, col: usize) -> f64 {
        (**self).element(row, col)
    }

    fn copy_elements_to(&self, dest: &mut [f64]) -> Result<()> {
        (**self).copy_elements_to(dest)
    }

    fn as_packed(&self) -> Option<&[f64]> {
        (**self).as_packed()
    }

    fn is_view(&self) -> bool {
        (**self).is_view()
    }
}

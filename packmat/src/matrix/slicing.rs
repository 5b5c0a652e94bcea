//! Views onto the storage of a dense matrix
//!
//! Every view borrows the matrix, so the matrix outlives the view and a mutable
//! view is the only live access to the buffer.

use packmat_core::validation::{band_offset, check_band, check_index, check_submatrix};
use packmat_core::{band_length, MatrixError, Result};

use super::DenseMatrix;
use crate::storage::{DenseData, MutDenseData};
use crate::vector::{StridedVector, SubVector};
use crate::views::{StridedMatrix, TransposeView};

/// `(offset, len, stride)` of column `col`
///
/// A single-column matrix is its own column, so the window becomes the whole
/// buffer with unit stride.
fn column_window(nrows: usize, ncols: usize, col: usize) -> (usize, usize, usize) {
    if ncols == 1 {
        (0, nrows, 1)
    } else {
        (col, nrows, ncols)
    }
}

/// `(offset, len, stride)` of band `band`
///
/// Empty bands never read their stride, so they get a unit one.
fn band_window(nrows: usize, ncols: usize, band: isize) -> Result<(usize, usize, usize)> {
    let len = band_length(nrows, ncols, band);
    if len == 0 {
        return Ok((0, 0, 1));
    }
    let stride = ncols
        .checked_add(1)
        .ok_or(MatrixError::InvalidShape { rows: nrows, cols: ncols })?;
    Ok((band_offset(ncols, band), len, stride))
}

impl<S: DenseData> DenseMatrix<S> {
    /// Rectangular window of `rows x cols` elements starting at `(row_start, col_start)`
    ///
    /// The start corner must lie inside the matrix and the window must not pass
    /// its edge; nothing is clipped.
    pub fn sub_matrix(
        &self,
        row_start: usize,
        rows: usize,
        col_start: usize,
        cols: usize,
    ) -> Result<StridedMatrix<&[f64]>> {
        check_submatrix(row_start, rows, col_start, cols, self.nrows(), self.ncols())?;
        let layout = self.layout().window(row_start, rows, col_start, cols);
        StridedMatrix::try_new(self.as_slice(), layout)
    }

    /// Row `row` as a contiguous view
    pub fn row_view(&self, row: usize) -> Result<SubVector<&[f64]>> {
        check_index(row, self.nrows())?;
        let ncols = self.ncols();
        Ok(SubVector::new(&self.as_slice()[row * ncols..(row + 1) * ncols]))
    }

    /// Column `col` as a strided view
    pub fn column_view(&self, col: usize) -> Result<StridedVector<&[f64]>> {
        check_index(col, self.ncols())?;
        let (offset, len, stride) = column_window(self.nrows(), self.ncols(), col);
        StridedVector::anchored(self.as_slice(), offset, len, stride)
    }

    /// Diagonal band `band` as a strided view
    ///
    /// Band 0 is the main diagonal, band `b > 0` starts at `(0, b)` and band
    /// `b < 0` starts at `(-b, 0)`. Valid bands are `-nrows..=ncols`; the outermost
    /// ones are empty.
    pub fn band(&self, band: isize) -> Result<StridedVector<&[f64]>> {
        check_band(band, self.nrows(), self.ncols())?;
        let (offset, len, stride) = band_window(self.nrows(), self.ncols(), band)?;
        StridedVector::anchored(self.as_slice(), offset, len, stride)
    }

    /// O(1) transpose sharing this matrix's buffer
    pub fn transpose_view(&self) -> TransposeView<&[f64]> {
        TransposeView::of(self.as_view())
    }

    /// Consuming O(1) transpose
    pub fn into_transpose_view(self) -> TransposeView<S> {
        TransposeView::of(self)
    }
}

impl<S: MutDenseData> DenseMatrix<S> {
    /// Mutable form of [`sub_matrix`](Self::sub_matrix)
    pub fn sub_matrix_mut(
        &mut self,
        row_start: usize,
        rows: usize,
        col_start: usize,
        cols: usize,
    ) -> Result<StridedMatrix<&mut [f64]>> {
        check_submatrix(row_start, rows, col_start, cols, self.nrows(), self.ncols())?;
        let layout = self.layout().window(row_start, rows, col_start, cols);
        StridedMatrix::try_new(self.as_mut_slice(), layout)
    }

    /// Mutable form of [`row_view`](Self::row_view)
    pub fn row_view_mut(&mut self, row: usize) -> Result<SubVector<&mut [f64]>> {
        check_index(row, self.nrows())?;
        let ncols = self.ncols();
        Ok(SubVector::new(
            &mut self.as_mut_slice()[row * ncols..(row + 1) * ncols],
        ))
    }

    /// Mutable form of [`column_view`](Self::column_view)
    pub fn column_view_mut(&mut self, col: usize) -> Result<StridedVector<&mut [f64]>> {
        check_index(col, self.ncols())?;
        let (offset, len, stride) = column_window(self.nrows(), self.ncols(), col);
        StridedVector::anchored(self.as_mut_slice(), offset, len, stride)
    }

    /// Mutable form of [`band`](Self::band)
    pub fn band_mut(&mut self, band: isize) -> Result<StridedVector<&mut [f64]>> {
        check_band(band, self.nrows(), self.ncols())?;
        let (offset, len, stride) = band_window(self.nrows(), self.ncols(), band)?;
        StridedVector::anchored(self.as_mut_slice(), offset, len, stride)
    }

    /// Mutable O(1) transpose sharing this matrix's buffer
    pub fn transpose_view_mut(&mut self) -> TransposeView<&mut [f64]> {
        TransposeView::of(self.as_view_mut())
    }
}

#[cfg(test)]
mod tests {
    use crate::matrix::Matrix;
    use packmat_core::{MatrixError, MatrixLike, VectorLike};

    fn counting(nrows: usize, ncols: usize) -> Matrix {
        let data = (0..nrows * ncols).map(|x| x as f64).collect();
        Matrix::from_vec(nrows, ncols, data).unwrap()
    }

    #[test]
    fn test_views_of_small_matrix() {
        let m = Matrix::from_nested(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m.band(0).unwrap().to_vec(), vec![1.0, 4.0]);
        assert_eq!(m.row_view(1).unwrap().to_vec(), vec![3.0, 4.0]);
        assert_eq!(m.column_view(0).unwrap().to_vec(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_sub_matrix() {
        let m = counting(3, 4);
        let view = m.sub_matrix(1, 2, 2, 2).unwrap();
        assert_eq!(view.to_matrix().unwrap().as_slice(), &[6.0, 7.0, 10.0, 11.0]);
        assert!(view.is_view());

        let whole = m.sub_matrix(0, 3, 0, 4).unwrap();
        assert_eq!(whole.as_packed(), Some(m.as_slice()));
    }

    #[test]
    fn test_sub_matrix_out_of_bounds() {
        let m = counting(3, 4);
        assert_eq!(
            m.sub_matrix(3, 0, 0, 1).unwrap_err(),
            MatrixError::out_of_bounds(3, 3)
        );
        assert_eq!(
            m.sub_matrix(0, 1, 4, 0).unwrap_err(),
            MatrixError::out_of_bounds(4, 4)
        );
        assert_eq!(
            m.sub_matrix(2, 2, 0, 1).unwrap_err(),
            MatrixError::out_of_bounds(4, 3)
        );
        assert_eq!(
            m.sub_matrix(0, 1, 1, 4).unwrap_err(),
            MatrixError::out_of_bounds(5, 4)
        );
    }

    #[test]
    fn test_column_view_of_single_column() {
        let m = counting(4, 1);
        let column = m.column_view(0).unwrap();
        assert_eq!(column.stride(), 1);
        assert_eq!(column.as_packed(), Some(m.as_slice()));
        assert!(m.column_view(1).is_err());
    }

    #[test]
    fn test_bands() {
        let m = counting(3, 4);
        assert_eq!(m.band(0).unwrap().to_vec(), vec![0.0, 5.0, 10.0]);
        assert_eq!(m.band(1).unwrap().to_vec(), vec![1.0, 6.0, 11.0]);
        assert_eq!(m.band(2).unwrap().to_vec(), vec![2.0, 7.0]);
        assert_eq!(m.band(3).unwrap().to_vec(), vec![3.0]);
        assert!(m.band(4).unwrap().is_empty());
        assert_eq!(m.band(-1).unwrap().to_vec(), vec![4.0, 9.0]);
        assert_eq!(m.band(-2).unwrap().to_vec(), vec![8.0]);
        assert!(m.band(-3).unwrap().is_empty());

        assert_eq!(
            m.band(5).unwrap_err(),
            MatrixError::IndexOutOfBounds { index: 5, bound: 4 }
        );
        assert_eq!(
            m.band(-4).unwrap_err(),
            MatrixError::IndexOutOfBounds { index: -4, bound: 3 }
        );
    }

    #[test]
    fn test_band_of_widest_empty_matrix() {
        let m = Matrix::zeros(0, usize::MAX).unwrap();
        assert!(m.band(0).unwrap().is_empty());
        assert!(m.band(isize::MAX).unwrap().is_empty());
        assert!(m.band(-1).is_err());

        let mut m = m;
        assert!(m.band_mut(0).unwrap().is_empty());
    }

    #[test]
    fn test_column_views_compare_by_value() {
        let a = Matrix::from_nested(&[[1.0, 5.0], [2.0, 6.0]]).unwrap();
        let b = Matrix::from_nested(&[[1.0, 7.0], [2.0, 8.0]]).unwrap();
        assert_eq!(a.column_view(0).unwrap(), b.column_view(0).unwrap());
        assert_ne!(a.column_view(1).unwrap(), b.column_view(1).unwrap());

        let diagonal = Matrix::from_nested(&[[1.0, 0.0], [0.0, 2.0]]).unwrap();
        assert_eq!(a.column_view(0).unwrap(), diagonal.band(0).unwrap());
    }

    #[test]
    fn test_bands_of_degenerate_matrix() {
        let m = Matrix::zeros(0, 3).unwrap();
        assert!(m.band(3).unwrap().is_empty());
        assert!(m.band(1).unwrap().is_empty());
        assert!(m.column_view(2).unwrap().is_empty());
    }

    #[test]
    fn test_mutable_views_write_through() {
        let mut m = Matrix::zeros(3, 3).unwrap();
        m.row_view_mut(0).unwrap().fill(1.0);
        m.column_view_mut(2).unwrap().scale(5.0);
        m.band_mut(-1).unwrap().fill(-1.0);
        m.sub_matrix_mut(1, 2, 1, 2).unwrap().add_scalar(2.0);
        assert_eq!(
            m.as_slice(),
            &[1.0, 1.0, 5.0, -1.0, 2.0, 2.0, 0.0, 1.0, 2.0]
        );
    }

    #[test]
    fn test_transpose_views() {
        let mut m = counting(2, 3);
        assert_eq!(m.transpose_view().to_matrix().unwrap(), m.to_matrix_transpose().unwrap());

        m.transpose_view_mut().set(2, 1, 50.0).unwrap();
        assert_eq!(m.get(1, 2).unwrap(), 50.0);

        let t = m.transpose_view();
        assert_eq!(t.transpose_view(), m);
    }
}

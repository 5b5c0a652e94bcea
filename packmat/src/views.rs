//! Non-packed matrix views
//!
//! [`StridedMatrix`] is an arbitrary [`Layout`] window over a buffer. It is what
//! sub-matrix views of a [`DenseMatrix`](crate::DenseMatrix) produce:
//!
//! ```text
//!            |<-- row_stride -->|
//!            |<- ncols ->|
//!            +-----------+
//! offset ->  | a0 a1 a2  | a3 a4
//!            | b0 b1 b2  | b3 b4     nrows
//!            +-----------+
//! ```
//!
//! [`TransposeView`] is a column-major dense window. Transposing a row-major
//! matrix in O(1) produces one, and transposing it again gives back a row-major
//! [`DenseMatrix`].

use std::ops::{Index, IndexMut};

use packmat_core::validation::{check_element, check_index, check_length, check_submatrix};
use packmat_core::{element_count, Layout, MatrixError, MatrixLike, Result};

use crate::iter::ElementIter;
use crate::matrix::{DenseMatrix, Matrix, MatrixRef};
use crate::storage::{DenseData, MutDenseData};
use crate::vector::{StridedVector, SubVector};

///////////////////
// StridedMatrix //
///////////////////

/// Strided window over matrix storage
#[derive(Debug, Clone, Copy)]
pub struct StridedMatrix<S>
where
    S: DenseData,
{
    data: S,
    layout: Layout,
}

impl<S: DenseData> StridedMatrix<S> {
    /// Construct a view, checking that every element of `layout` lies in `data`
    ///
    /// Empty layouts must still start inside the buffer and keep every row and
    /// column start offset representable.
    pub fn try_new(data: S, layout: Layout) -> Result<Self> {
        let buffer_len = data.as_slice().len();
        let extent = match layout.checked_last_index() {
            Some(_) if layout.is_empty() => Some(layout.offset),
            Some(last) => last.checked_add(1),
            None => None,
        };
        match extent {
            Some(end) if end <= buffer_len => Ok(Self { data, layout }),
            _ => Err(MatrixError::out_of_bounds(
                extent.unwrap_or(usize::MAX),
                buffer_len,
            )),
        }
    }

    pub fn nrows(&self) -> usize {
        self.layout.nrows
    }

    pub fn ncols(&self) -> usize {
        self.layout.ncols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.layout.nrows, self.layout.ncols)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Offset of element `(0, 0)` in the underlying buffer
    pub fn offset(&self) -> usize {
        self.layout.offset
    }

    pub fn row_stride(&self) -> usize {
        self.layout.row_stride
    }

    pub fn col_stride(&self) -> usize {
        self.layout.col_stride
    }

    /// Checked element access
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        check_element(row, col, self.nrows(), self.ncols())?;
        Ok(self.data.as_slice()[self.layout.index(row, col)])
    }

    /// Element access without bounds checks
    ///
    /// # Safety
    ///
    /// `row < nrows()` and `col < ncols()` must hold.
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.nrows() && col < self.ncols());
        // SAFETY: In-range indices map inside the buffer, which `try_new` checked.
        unsafe { *self.data.as_slice().get_unchecked(self.layout.index(row, col)) }
    }

    /// Row `row` as a strided vector
    pub fn row(&self, row: usize) -> Result<StridedVector<&[f64]>> {
        check_index(row, self.nrows())?;
        StridedVector::anchored(
            self.data.as_slice(),
            self.layout.index(row, 0),
            self.ncols(),
            self.col_stride(),
        )
    }

    /// Column `col` as a strided vector
    pub fn column(&self, col: usize) -> Result<StridedVector<&[f64]>> {
        check_index(col, self.ncols())?;
        StridedVector::anchored(
            self.data.as_slice(),
            self.layout.index(0, col),
            self.nrows(),
            self.row_stride(),
        )
    }

    /// Read-only sub-window of this view
    pub fn sub_matrix(
        &self,
        row_start: usize,
        rows: usize,
        col_start: usize,
        cols: usize,
    ) -> Result<StridedMatrix<&[f64]>> {
        check_submatrix(row_start, rows, col_start, cols, self.nrows(), self.ncols())?;
        StridedMatrix::try_new(
            self.data.as_slice(),
            self.layout.window(row_start, rows, col_start, cols),
        )
    }

    /// Swap rows and columns without moving any data
    pub fn transpose(self) -> Self {
        Self {
            data: self.data,
            layout: self.layout.transpose(),
        }
    }

    /// Borrowing transpose
    pub fn transpose_view(&self) -> StridedMatrix<&[f64]> {
        StridedMatrix {
            data: self.data.as_slice(),
            layout: self.layout.transpose(),
        }
    }

    /// Iterate the window in row-major order
    pub fn element_iter(&self) -> ElementIter<'_> {
        ElementIter::new(self.data.as_slice(), self.layout)
    }

    pub fn element_sum(&self) -> f64 {
        self.element_iter().fold(0.0, |total, x| total + x)
    }

    /// Packed copy of the window
    pub fn to_matrix(&self) -> Result<Matrix> {
        Matrix::from_matrix(self)
    }

    pub fn into_inner(self) -> S {
        self.data
    }
}

impl<S: MutDenseData> StridedMatrix<S> {
    /// Checked element write
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        check_element(row, col, self.nrows(), self.ncols())?;
        let index = self.layout.index(row, col);
        self.data.as_mut_slice()[index] = value;
        Ok(())
    }

    /// Mutable sub-window of this view
    pub fn sub_matrix_mut(
        &mut self,
        row_start: usize,
        rows: usize,
        col_start: usize,
        cols: usize,
    ) -> Result<StridedMatrix<&mut [f64]>> {
        check_submatrix(row_start, rows, col_start, cols, self.nrows(), self.ncols())?;
        let layout = self.layout.window(row_start, rows, col_start, cols);
        StridedMatrix::try_new(self.data.as_mut_slice(), layout)
    }

    /// Row `row` as a mutable strided vector
    pub fn row_mut(&mut self, row: usize) -> Result<StridedVector<&mut [f64]>> {
        check_index(row, self.nrows())?;
        let (offset, len, stride) = (self.layout.index(row, 0), self.ncols(), self.col_stride());
        StridedVector::anchored(self.data.as_mut_slice(), offset, len, stride)
    }

    /// Column `col` as a mutable strided vector
    pub fn column_mut(&mut self, col: usize) -> Result<StridedVector<&mut [f64]>> {
        check_index(col, self.ncols())?;
        let (offset, len, stride) = (self.layout.index(0, col), self.nrows(), self.row_stride());
        StridedVector::anchored(self.data.as_mut_slice(), offset, len, stride)
    }

    /// Apply `f` to every element of the window
    pub fn apply(&mut self, mut f: impl FnMut(f64) -> f64) {
        let layout = self.layout;
        let data = self.data.as_mut_slice();
        for row in 0..layout.nrows {
            for col in 0..layout.ncols {
                let x = &mut data[layout.index(row, col)];
                *x = f(*x);
            }
        }
    }

    pub fn fill(&mut self, value: f64) {
        self.apply(|_| value);
    }

    pub fn scale(&mut self, factor: f64) {
        self.apply(|x| x * factor);
    }

    pub fn add_scalar(&mut self, value: f64) {
        self.apply(|x| x + value);
    }
}

impl<S: DenseData> MatrixLike for StridedMatrix<S> {
    fn nrows(&self) -> usize {
        self.layout.nrows
    }

    fn ncols(&self) -> usize {
        self.layout.ncols
    }

    fn element(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    fn as_packed(&self) -> Option<&[f64]> {
        let data = self.data.as_slice();
        if self.layout.is_packed() && data.len() == self.layout.len() {
            Some(data)
        } else {
            None
        }
    }

    fn is_view(&self) -> bool {
        true
    }
}

impl<S: DenseData> Index<(usize, usize)> for StridedMatrix<S> {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.nrows() && col < self.ncols(),
            "element ({row}, {col}) out of bounds for {}x{} view",
            self.nrows(),
            self.ncols()
        );
        &self.data.as_slice()[self.layout.index(row, col)]
    }
}

impl<S: MutDenseData> IndexMut<(usize, usize)> for StridedMatrix<S> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.nrows() && col < self.ncols(),
            "element ({row}, {col}) out of bounds for {}x{} view",
            self.nrows(),
            self.ncols()
        );
        let index = self.layout.index(row, col);
        &mut self.data.as_mut_slice()[index]
    }
}

///////////////////
// TransposeView //
///////////////////

/// Column-major dense view
///
/// Element `(i, j)` lives at `j * nrows + i`. Taking the transpose of a
/// `nrows x ncols` row-major matrix yields an `ncols x nrows` `TransposeView`
/// over the same buffer.
#[derive(Debug, Clone, Copy)]
pub struct TransposeView<S>
where
    S: DenseData,
{
    data: S,
    nrows: usize,
    ncols: usize,
}

impl<S: DenseData> TransposeView<S> {
    /// Wrap a column-major buffer of exactly `nrows * ncols` elements
    pub fn try_new(data: S, nrows: usize, ncols: usize) -> Result<Self> {
        let len = element_count(nrows, ncols)?;
        check_length(len, data.as_slice().len())?;
        Ok(Self { data, nrows, ncols })
    }

    /// Transpose of a row-major matrix, reusing its storage
    pub(crate) fn of(matrix: DenseMatrix<S>) -> Self {
        let (nrows, ncols) = matrix.shape();
        Self {
            data: matrix.into_inner(),
            nrows: ncols,
            ncols: nrows,
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn layout(&self) -> Layout {
        Layout::column_major(self.nrows, self.ncols)
    }

    /// The column-major buffer
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }

    /// Checked element access
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        check_element(row, col, self.nrows, self.ncols)?;
        Ok(self.as_slice()[col * self.nrows + row])
    }

    /// Row `row` as a strided vector
    pub fn row_view(&self, row: usize) -> Result<StridedVector<&[f64]>> {
        check_index(row, self.nrows)?;
        StridedVector::anchored(self.as_slice(), row, self.ncols, self.nrows)
    }

    /// Column `col` as a contiguous vector
    pub fn column_view(&self, col: usize) -> Result<SubVector<&[f64]>> {
        check_index(col, self.ncols)?;
        Ok(SubVector::new(
            &self.as_slice()[col * self.nrows..(col + 1) * self.nrows],
        ))
    }

    /// Transpose back to a row-major matrix over the same buffer
    pub fn transpose_view(&self) -> MatrixRef<'_> {
        DenseMatrix::from_parts(self.as_slice(), self.ncols, self.nrows)
    }

    /// Consuming form of [`transpose_view`](Self::transpose_view)
    pub fn into_transpose(self) -> DenseMatrix<S> {
        DenseMatrix::from_parts(self.data, self.ncols, self.nrows)
    }

    /// Iterate the view in row-major order
    pub fn element_iter(&self) -> ElementIter<'_> {
        ElementIter::new(self.as_slice(), self.layout())
    }

    /// Packed row-major copy
    pub fn to_matrix(&self) -> Result<Matrix> {
        Matrix::from_matrix(self)
    }

    pub fn into_inner(self) -> S {
        self.data
    }
}

impl<S: MutDenseData> TransposeView<S> {
    /// Checked element write
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        check_element(row, col, self.nrows, self.ncols)?;
        let nrows = self.nrows;
        self.data.as_mut_slice()[col * nrows + row] = value;
        Ok(())
    }

    /// Row `row` as a mutable strided vector
    pub fn row_view_mut(&mut self, row: usize) -> Result<StridedVector<&mut [f64]>> {
        check_index(row, self.nrows)?;
        let (len, stride) = (self.ncols, self.nrows);
        StridedVector::anchored(self.data.as_mut_slice(), row, len, stride)
    }
}

impl<S: DenseData> MatrixLike for TransposeView<S> {
    fn nrows(&self) -> usize {
        self.nrows
    }

    fn ncols(&self) -> usize {
        self.ncols
    }

    fn element(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    fn copy_elements_to(&self, dest: &mut [f64]) -> Result<()> {
        self.transpose_view().transpose_into(dest)
    }

    fn as_packed(&self) -> Option<&[f64]> {
        if self.layout().is_packed() {
            Some(self.as_slice())
        } else {
            None
        }
    }

    fn is_view(&self) -> bool {
        true
    }
}

impl<S: DenseData> Index<(usize, usize)> for TransposeView<S> {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.nrows && col < self.ncols,
            "element ({row}, {col}) out of bounds for {}x{} view",
            self.nrows,
            self.ncols
        );
        &self.as_slice()[col * self.nrows + row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(nrows: usize, ncols: usize) -> Matrix {
        let data = (0..nrows * ncols).map(|x| x as f64).collect();
        Matrix::from_vec(nrows, ncols, data).unwrap()
    }

    #[test]
    fn test_strided_bounds() {
        let data = [0.0; 10];
        let layout = Layout::row_major(2, 5).window(0, 2, 1, 3);
        assert!(StridedMatrix::try_new(&data[..], layout).is_ok());

        let too_far = Layout {
            offset: 8,
            ..layout
        };
        assert!(StridedMatrix::try_new(&data[..], too_far).is_err());

        let overflowing = Layout {
            row_stride: usize::MAX,
            ..layout
        };
        assert!(StridedMatrix::try_new(&data[..], overflowing).is_err());
    }

    #[test]
    fn test_empty_strided_bounds() {
        let data = [0.0; 10];
        let rows_only = Layout {
            offset: 4,
            nrows: 3,
            ncols: 0,
            row_stride: 2,
            col_stride: 1,
        };
        let view = StridedMatrix::try_new(&data[..], rows_only).unwrap();
        assert!(view.row(2).unwrap().is_empty());
        assert!(view.column(0).is_err());

        let huge_stride = Layout {
            row_stride: usize::MAX,
            ..rows_only
        };
        assert!(StridedMatrix::try_new(&data[..], huge_stride).is_err());

        let past_end = Layout {
            offset: 11,
            ..rows_only
        };
        assert_eq!(
            StridedMatrix::try_new(&data[..], past_end).unwrap_err(),
            MatrixError::out_of_bounds(11, 10)
        );

        let huge_offset = Layout {
            offset: usize::MAX,
            ..rows_only
        };
        assert_eq!(
            StridedMatrix::try_new(&data[..], huge_offset).unwrap_err(),
            MatrixError::out_of_bounds(usize::MAX, 10)
        );
    }

    #[test]
    fn test_strided_rows_and_columns() {
        let m = counting(3, 4);
        let view = StridedMatrix::try_new(m.as_slice(), m.layout().window(1, 2, 1, 2)).unwrap();
        assert_eq!(view.shape(), (2, 2));
        assert_eq!(view.offset(), 5);
        assert_eq!(view.row(1).unwrap().to_vec(), vec![9.0, 10.0]);
        assert_eq!(view.column(0).unwrap().to_vec(), vec![5.0, 9.0]);
        assert_eq!(view.element_iter().collect::<Vec<_>>(), vec![5.0, 6.0, 9.0, 10.0]);
        assert_eq!(view.element_sum(), 30.0);
        assert!(view.as_packed().is_none());
        assert!(view.is_view());
    }

    #[test]
    fn test_strided_transpose() {
        let m = counting(2, 3);
        let view = StridedMatrix::try_new(m.as_slice(), m.layout()).unwrap();
        let t = view.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 1).unwrap(), 5.0);
        assert_eq!(t.to_matrix().unwrap(), m.to_matrix_transpose().unwrap());
        assert_eq!(t.transpose_view().to_matrix().unwrap(), m);
        assert_eq!(view.as_packed(), Some(m.as_slice()));
    }

    #[test]
    fn test_strided_mutation() {
        let mut m = Matrix::zeros(3, 3).unwrap();
        {
            let layout = m.layout().window(1, 2, 0, 2);
            let mut view = StridedMatrix::try_new(m.as_mut_slice(), layout).unwrap();
            view.fill(1.0);
            view.scale(3.0);
            view.set(0, 1, 5.0).unwrap();
            view.column_mut(0).unwrap().add_scalar(1.0);
            view[(1, 1)] = 7.0;
            assert!(view.set(2, 0, 0.0).is_err());
        }
        assert_eq!(
            m.as_slice(),
            &[0.0, 0.0, 0.0, 4.0, 5.0, 0.0, 4.0, 7.0, 0.0]
        );
    }

    #[test]
    fn test_transpose_view_layout() {
        let m = counting(2, 3);
        let t = TransposeView::of(m.as_view());
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 0).unwrap(), 2.0);
        assert_eq!(t.get(0, 1).unwrap(), 3.0);
        assert_eq!(t.row_view(1).unwrap().to_vec(), vec![1.0, 4.0]);
        assert_eq!(t.column_view(1).unwrap().to_vec(), vec![3.0, 4.0, 5.0]);
        assert_eq!(
            t.element_iter().collect::<Vec<_>>(),
            vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]
        );
        assert_eq!(t.to_matrix().unwrap(), m.to_matrix_transpose().unwrap());
        assert_eq!(t.transpose_view(), m);
        assert!(t.as_packed().is_none());
    }

    #[test]
    fn test_transpose_view_round_trip_keeps_buffer() {
        let m = counting(2, 2);
        let ptr = m.as_slice().as_ptr();
        let back = TransposeView::of(m).into_transpose();
        assert_eq!(back.as_slice().as_ptr(), ptr);
        assert_eq!(back, counting(2, 2));
    }

    #[test]
    fn test_transpose_view_vector_is_packed() {
        let column = counting(3, 1);
        let t = TransposeView::of(column.as_view());
        assert_eq!(t.shape(), (1, 3));
        assert_eq!(t.as_packed(), Some(column.as_slice()));
    }

    #[test]
    fn test_transpose_view_set() {
        let mut data = [0.0; 6];
        {
            let mut t = TransposeView::try_new(&mut data[..], 2, 3).unwrap();
            t.set(1, 2, 9.0).unwrap();
            t.row_view_mut(0).unwrap().fill(1.0);
        }
        assert_eq!(data, [1.0, 0.0, 1.0, 0.0, 1.0, 9.0]);
        assert!(TransposeView::try_new(&data[..], 4, 2).is_err());
    }
}

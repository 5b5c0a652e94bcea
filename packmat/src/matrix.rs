//! Dense row-major matrices
//!
//! [`DenseMatrix`] stores `nrows * ncols` elements in one packed buffer with
//! element `(i, j)` at offset `i * ncols + j`. It is generic over the storage
//! so that the same type serves as an owned matrix ([`Matrix`]), a read-only
//! wrapper around a borrowed buffer ([`MatrixRef`]) and a mutable wrapper
//! ([`MatrixMut`]).
//!
//! ## Views
//!
//! Row, column, band, sub-matrix and transpose views borrow the matrix they were
//! taken from. Writes through a mutable view are visible in the parent once the
//! view is dropped:
//!
//! ```rust
//! use packmat::Matrix;
//!
//! let mut m = Matrix::zeros(3, 3).unwrap();
//! m.column_view_mut(1).unwrap().fill(2.0);
//! assert_eq!(m.get(2, 1).unwrap(), 2.0);
//! ```

mod arith;
pub mod ops;
mod product;
mod slicing;

use std::ops::{Index, IndexMut};

use packmat_core::validation::{check_capacity, check_element, check_index, check_length};
use packmat_core::{
    element_count, ElementSink, Layout, MatrixError, MatrixLike, Result, VectorLike,
};
use rand::Rng;

use crate::iter::ElementIter;
use crate::storage::{DenseData, MutDenseData};
use crate::vector::{SubVector, Vector};

/// Packed row-major `f64` matrix over storage `S`
#[derive(Debug, Clone, Copy)]
pub struct DenseMatrix<S>
where
    S: DenseData,
{
    data: S,
    nrows: usize,
    ncols: usize,
}

/// Matrix owning its buffer
pub type Matrix = DenseMatrix<Box<[f64]>>;

/// Read-only matrix over a borrowed buffer
pub type MatrixRef<'a> = DenseMatrix<&'a [f64]>;

/// Mutable matrix over a borrowed buffer
pub type MatrixMut<'a> = DenseMatrix<&'a mut [f64]>;

////////////////////
// Owned matrices //
////////////////////

impl Matrix {
    /// Zero-filled `nrows x ncols` matrix
    pub fn zeros(nrows: usize, ncols: usize) -> Result<Self> {
        let len = element_count(nrows, ncols)?;
        Ok(Self::from_parts(vec![0.0; len].into_boxed_slice(), nrows, ncols))
    }

    /// Copy any matrix into a new packed matrix of the same shape
    pub fn from_matrix(source: &(impl MatrixLike + ?Sized)) -> Result<Self> {
        let mut out = Self::zeros(source.nrows(), source.ncols())?;
        source.copy_elements_to(out.as_mut_slice())?;
        Ok(out)
    }

    /// Take ownership of a row-major `Vec` holding exactly `nrows * ncols` elements
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<f64>) -> Result<Self> {
        let len = element_count(nrows, ncols)?;
        check_length(len, data.len())?;
        Ok(Self::from_parts(data.into_boxed_slice(), nrows, ncols))
    }

    /// Square identity matrix
    pub fn identity(n: usize) -> Result<Self> {
        Self::identity_rect(n, n)
    }

    /// Rectangular matrix with ones on the main diagonal
    pub fn identity_rect(nrows: usize, ncols: usize) -> Result<Self> {
        let mut out = Self::zeros(nrows, ncols)?;
        let data = out.as_mut_slice();
        for i in 0..nrows.min(ncols) {
            data[i * ncols + i] = 1.0;
        }
        Ok(out)
    }

    /// Stack vectors as the rows of a new matrix
    ///
    /// Every vector must have the length of the first. An empty slice gives a
    /// 0x0 matrix.
    pub fn from_rows<V: VectorLike>(rows: &[V]) -> Result<Self> {
        let ncols = rows.first().map_or(0, |row| row.len());
        for row in rows {
            check_length(ncols, row.len())?;
        }

        let mut out = Self::zeros(rows.len(), ncols)?;
        let data = out.as_mut_slice();
        for (i, row) in rows.iter().enumerate() {
            row.copy_to(data, i * ncols)?;
        }
        Ok(out)
    }

    /// Build a matrix from nested rows
    ///
    /// Fails with `NonRectangularShape` if any row differs in length from the
    /// first.
    pub fn from_nested<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let ncols = rows.first().map_or(0, |row| row.as_ref().len());
        for (i, row) in rows.iter().enumerate() {
            let len = row.as_ref().len();
            if len != ncols {
                return Err(MatrixError::NonRectangularShape {
                    row: i,
                    len,
                    expected: ncols,
                });
            }
        }

        let mut data = Vec::with_capacity(element_count(rows.len(), ncols)?);
        for row in rows {
            data.extend_from_slice(row.as_ref());
        }
        Ok(Self::from_parts(data.into_boxed_slice(), rows.len(), ncols))
    }

    /// Zero matrix from a dimension list, which must have exactly two entries
    pub fn from_shape(shape: &[usize]) -> Result<Self> {
        match *shape {
            [nrows, ncols] => Self::zeros(nrows, ncols),
            _ => Err(MatrixError::InvalidDimensionality { dims: shape.len() }),
        }
    }

    /// Matrix of independent samples from `[0, 1)`
    pub fn random<R: Rng>(nrows: usize, ncols: usize, rng: &mut R) -> Result<Self> {
        let len = element_count(nrows, ncols)?;
        let data: Vec<f64> = (0..len).map(|_| rng.gen::<f64>()).collect();
        Ok(Self::from_parts(data.into_boxed_slice(), nrows, ncols))
    }
}

impl<'a> MatrixRef<'a> {
    /// Read-only row view with the lifetime of the underlying buffer
    pub fn row(&self, row: usize) -> Result<&'a [f64]> {
        check_index(row, self.nrows)?;
        let data: &'a [f64] = self.data;
        Ok(&data[row * self.ncols..(row + 1) * self.ncols])
    }
}

///////////////////////
// Generic accessors //
///////////////////////

impl<S: DenseData> DenseMatrix<S> {
    /// Wrap `data` as an `nrows x ncols` row-major matrix
    ///
    /// `data` must hold exactly `nrows * ncols` elements. No copy is made, so a
    /// borrowed buffer is aliased by the returned matrix.
    pub fn wrap(nrows: usize, ncols: usize, data: S) -> Result<Self> {
        let len = element_count(nrows, ncols)?;
        check_length(len, data.as_slice().len())?;
        Ok(Self::from_parts(data, nrows, ncols))
    }

    /// Assemble a matrix from already validated parts
    pub(crate) fn from_parts(data: S, nrows: usize, ncols: usize) -> Self {
        debug_assert_eq!(data.as_slice().len(), nrows * ncols);
        Self { data, nrows, ncols }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Shape as `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.nrows * self.ncols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Dense matrices are never views, even when wrapping a borrowed buffer
    pub fn is_view(&self) -> bool {
        false
    }

    /// Dense matrices are always packed
    pub fn is_packed(&self) -> bool {
        true
    }

    /// Offset mapping of this matrix
    pub fn layout(&self) -> Layout {
        Layout::row_major(self.nrows, self.ncols)
    }

    /// The packed row-major buffer
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }

    /// Read-only matrix over the same buffer
    pub fn as_view(&self) -> MatrixRef<'_> {
        DenseMatrix::from_parts(self.as_slice(), self.nrows, self.ncols)
    }

    /// Return the storage
    pub fn into_inner(self) -> S {
        self.data
    }

    /// Checked element access
    ///
    /// Both indices are validated; an out-of-range column never reads into the
    /// next row.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        check_element(row, col, self.nrows, self.ncols)?;
        Ok(self.as_slice()[row * self.ncols + col])
    }

    /// Element access without bounds checks
    ///
    /// # Safety
    ///
    /// `row < nrows()` and `col < ncols()` must hold.
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.nrows && col < self.ncols);
        // SAFETY: The caller guarantees the indices are in range and the buffer
        // length was validated at construction.
        unsafe { *self.as_slice().get_unchecked(row * self.ncols + col) }
    }

    /// Copy row `row` into `dest` starting at `offset`
    pub fn copy_row_to(&self, row: usize, dest: &mut [f64], offset: usize) -> Result<()> {
        check_index(row, self.nrows)?;
        check_capacity(self.ncols, offset, dest.len())?;
        let start = row * self.ncols;
        dest[offset..offset + self.ncols].copy_from_slice(&self.as_slice()[start..start + self.ncols]);
        Ok(())
    }

    /// Copy column `col` into `dest` starting at `offset`
    pub fn copy_column_to(&self, col: usize, dest: &mut [f64], offset: usize) -> Result<()> {
        check_index(col, self.ncols)?;
        check_capacity(self.nrows, offset, dest.len())?;
        let data = self.as_slice();
        for (i, slot) in dest[offset..offset + self.nrows].iter_mut().enumerate() {
            *slot = data[i * self.ncols + col];
        }
        Ok(())
    }

    /// New matrix holding the transpose of this one
    pub fn to_matrix_transpose(&self) -> Result<Matrix> {
        let mut out = Matrix::zeros(self.ncols, self.nrows)?;
        self.transpose_into(out.as_mut_slice())?;
        Ok(out)
    }

    /// Write the transpose in row-major order to the start of `dest`
    pub(crate) fn transpose_into(&self, dest: &mut [f64]) -> Result<()> {
        check_capacity(self.len(), 0, dest.len())?;
        for (i, row) in self.as_slice().chunks_exact(self.ncols.max(1)).enumerate() {
            for (j, &value) in row.iter().enumerate() {
                dest[j * self.nrows + i] = value;
            }
        }
        Ok(())
    }

    /// Owned copy of this matrix
    pub fn to_matrix(&self) -> Matrix {
        Matrix::from_parts(self.as_slice().into(), self.nrows, self.ncols)
    }

    /// Element-wise equality with any matrix of the same shape
    pub fn equals(&self, other: &(impl MatrixLike + ?Sized)) -> bool {
        if other.shape() != self.shape() {
            return false;
        }
        if let Some(packed) = other.as_packed() {
            return packed == self.as_slice();
        }
        self.element_iter()
            .enumerate()
            .all(|(k, value)| value == other.element(k / self.ncols, k % self.ncols))
    }

    //////////////
    // Export   //
    //////////////

    /// Iterate all elements in row-major order
    pub fn element_iter(&self) -> ElementIter<'_> {
        ElementIter::new(self.as_slice(), self.layout())
    }

    /// Fresh row-major copy of the elements
    pub fn to_vec(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }

    /// Copy every element into `dest` starting at `offset`
    pub fn get_elements(&self, dest: &mut [f64], offset: usize) -> Result<()> {
        let data = self.as_slice();
        check_capacity(data.len(), offset, dest.len())?;
        dest[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Append every element to `sink` in one bulk write
    pub fn write_to(&self, sink: &mut (impl ElementSink + ?Sized)) -> Result<()> {
        sink.put_slice(self.as_slice())
    }

    /// Native-endian byte representation of the buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Fresh vector holding the elements in row-major order
    pub fn to_vector(&self) -> Vector {
        Vector::from_slice(self.as_slice())
    }

    /// The whole buffer as a single vector view
    pub fn as_vector(&self) -> SubVector<&[f64]> {
        SubVector::new(self.as_slice())
    }
}

impl<S: MutDenseData> DenseMatrix<S> {
    /// The packed row-major buffer
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.data.as_mut_slice()
    }

    /// Mutable matrix over the same buffer
    pub fn as_view_mut(&mut self) -> MatrixMut<'_> {
        let (nrows, ncols) = self.shape();
        DenseMatrix::from_parts(self.as_mut_slice(), nrows, ncols)
    }

    /// The whole buffer as a single mutable vector view
    pub fn as_vector_mut(&mut self) -> SubVector<&mut [f64]> {
        SubVector::new(self.as_mut_slice())
    }

    /// Checked element write
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        check_element(row, col, self.nrows, self.ncols)?;
        let ncols = self.ncols;
        self.as_mut_slice()[row * ncols + col] = value;
        Ok(())
    }

    /// Element write without bounds checks
    ///
    /// # Safety
    ///
    /// `row < nrows()` and `col < ncols()` must hold.
    pub unsafe fn set_unchecked(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.nrows && col < self.ncols);
        let ncols = self.ncols;
        // SAFETY: The caller guarantees the indices are in range and the buffer
        // length was validated at construction.
        unsafe { *self.as_mut_slice().get_unchecked_mut(row * ncols + col) = value }
    }

    /// Add `delta` to the element at linear offset `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn add_at(&mut self, index: usize, delta: f64) {
        self.as_mut_slice()[index] += delta;
    }

    /// Subtract `delta` from the element at linear offset `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn sub_at(&mut self, index: usize, delta: f64) {
        self.as_mut_slice()[index] -= delta;
    }

    /// Multiply the element at linear offset `index` by `factor`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn mul_at(&mut self, index: usize, factor: f64) {
        self.as_mut_slice()[index] *= factor;
    }

    /// Divide the element at linear offset `index` by `divisor`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn div_at(&mut self, index: usize, divisor: f64) {
        self.as_mut_slice()[index] /= divisor;
    }

    /// Add `delta` to element `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of range.
    pub fn add_at_2d(&mut self, row: usize, col: usize, delta: f64) {
        assert!(
            row < self.nrows && col < self.ncols,
            "element ({row}, {col}) out of bounds for {}x{} matrix",
            self.nrows,
            self.ncols
        );
        let ncols = self.ncols;
        self.as_mut_slice()[row * ncols + col] += delta;
    }

    /// Exchange rows `a` and `b`
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        check_index(a, self.nrows)?;
        check_index(b, self.nrows)?;
        if a == b {
            return Ok(());
        }

        let ncols = self.ncols;
        let (low, high) = (a.min(b), a.max(b));
        let (head, tail) = self.as_mut_slice().split_at_mut(high * ncols);
        head[low * ncols..(low + 1) * ncols].swap_with_slice(&mut tail[..ncols]);
        Ok(())
    }

    /// Exchange columns `a` and `b`
    pub fn swap_columns(&mut self, a: usize, b: usize) -> Result<()> {
        check_index(a, self.ncols)?;
        check_index(b, self.ncols)?;
        if a == b {
            return Ok(());
        }

        let ncols = self.ncols;
        for row in self.as_mut_slice().chunks_exact_mut(ncols) {
            row.swap(a, b);
        }
        Ok(())
    }

    /// Scale row `row` by `factor`
    pub fn multiply_row(&mut self, row: usize, factor: f64) -> Result<()> {
        check_index(row, self.nrows)?;
        let ncols = self.ncols;
        for x in &mut self.as_mut_slice()[row * ncols..(row + 1) * ncols] {
            *x *= factor;
        }
        Ok(())
    }

    /// `row[dest] += factor * row[src]`
    pub fn add_row_multiple(&mut self, src: usize, dest: usize, factor: f64) -> Result<()> {
        check_index(src, self.nrows)?;
        check_index(dest, self.nrows)?;
        let ncols = self.ncols;
        let data = self.as_mut_slice();
        for j in 0..ncols {
            let value = data[src * ncols + j];
            data[dest * ncols + j] += factor * value;
        }
        Ok(())
    }

    /// Overwrite row `row` with `values`
    pub fn set_row(&mut self, row: usize, values: &(impl VectorLike + ?Sized)) -> Result<()> {
        check_index(row, self.nrows)?;
        check_length(self.ncols, values.len())?;
        let ncols = self.ncols;
        values.copy_to(self.as_mut_slice(), row * ncols)
    }

    /// Overwrite column `col` with `values`
    pub fn set_column(&mut self, col: usize, values: &(impl VectorLike + ?Sized)) -> Result<()> {
        check_index(col, self.ncols)?;
        check_length(self.nrows, values.len())?;
        let ncols = self.ncols;
        let data = self.as_mut_slice();
        for i in 0..values.len() {
            data[i * ncols + col] = values.element(i);
        }
        Ok(())
    }
}

impl<S, T> PartialEq<DenseMatrix<T>> for DenseMatrix<S>
where
    S: DenseData,
    T: DenseData,
{
    fn eq(&self, other: &DenseMatrix<T>) -> bool {
        self.shape() == other.shape() && self.as_slice() == other.as_slice()
    }
}

impl<S: DenseData> MatrixLike for DenseMatrix<S> {
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
        self.get_elements(dest, 0)
    }

    fn as_packed(&self) -> Option<&[f64]> {
        Some(self.as_slice())
    }
}

/// Panicking element access
impl<S: DenseData> Index<(usize, usize)> for DenseMatrix<S> {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.nrows && col < self.ncols,
            "element ({row}, {col}) out of bounds for {}x{} matrix",
            self.nrows,
            self.ncols
        );
        &self.as_slice()[row * self.ncols + col]
    }
}

impl<S: MutDenseData> IndexMut<(usize, usize)> for DenseMatrix<S> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.nrows && col < self.ncols,
            "element ({row}, {col}) out of bounds for {}x{} matrix",
            self.nrows,
            self.ncols
        );
        let ncols = self.ncols;
        &mut self.as_mut_slice()[row * ncols + col]
    }
}

//! Dense vectors and vector views
//!
//! [`Vector`] is the owned dense vector returned by matrix-vector products.
//! [`SubVector`] is a contiguous window (a matrix row) and [`StridedVector`] a
//! constant-stride window (a matrix column or diagonal band) over storage owned
//! by a matrix.

use std::ops::{Index, IndexMut};

use packmat_core::validation::{check_index, check_length};
use packmat_core::{MatrixError, Result, VectorLike, VectorLikeMut};

use crate::storage::{DenseData, MutDenseData};

////////////
// Vector //
////////////

/// Owned dense vector of `f64`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    data: Box<[f64]>,
}

impl Vector {
    /// Zero-filled vector of length `len`
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0.0; len].into_boxed_slice(),
        }
    }

    /// Take ownership of `data`
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }

    /// Copy `data` into a new vector
    pub fn from_slice(data: &[f64]) -> Self {
        Self { data: data.into() }
    }

    /// Copy any vector into a new dense vector
    pub fn from_vector(source: &(impl VectorLike + ?Sized)) -> Self {
        let mut data = vec![0.0; source.len()];
        for (i, slot) in data.iter_mut().enumerate() {
            *slot = source.element(i);
        }
        Self::from_vec(data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checked element access
    pub fn get(&self, index: usize) -> Result<f64> {
        check_index(index, self.len())?;
        Ok(self.data[index])
    }

    /// Checked element write
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        check_index(index, self.len())?;
        self.data[index] = value;
        Ok(())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Fresh copy of the elements
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.to_vec()
    }

    /// Consume the vector and return its buffer
    pub fn into_inner(self) -> Box<[f64]> {
        self.data
    }

    /// Dot product with another vector of the same length
    pub fn dot(&self, other: &(impl VectorLike + ?Sized)) -> Result<f64> {
        check_length(self.len(), other.len())?;
        Ok(other.dot_slice(&self.data))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self::from_vec(data)
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }
}

impl VectorLike for Vector {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn element(&self, index: usize) -> f64 {
        self.data[index]
    }

    fn as_packed(&self) -> Option<&[f64]> {
        Some(&self.data)
    }
}

impl VectorLikeMut for Vector {
    fn set_element(&mut self, index: usize, value: f64) {
        self.data[index] = value;
    }

    fn as_packed_mut(&mut self) -> Option<&mut [f64]> {
        Some(&mut self.data)
    }
}

///////////////
// SubVector //
///////////////

/// Contiguous window over matrix storage
///
/// The storage holds exactly the elements of the window. Row views of a packed
/// matrix are `SubVector`s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubVector<S>
where
    S: DenseData,
{
    data: S,
}

impl<S: DenseData> SubVector<S> {
    /// Wrap an already-sliced buffer
    pub fn new(data: S) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checked element access
    pub fn get(&self, index: usize) -> Result<f64> {
        check_index(index, self.len())?;
        Ok(self.data.as_slice()[index])
    }

    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }

    /// Fresh copy of the window
    pub fn to_vec(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }

    /// Copy the window into an owned vector
    pub fn to_vector(&self) -> Vector {
        Vector::from_slice(self.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.as_slice().iter()
    }

    pub fn element_sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Dot product with another vector of the same length
    pub fn dot(&self, other: &(impl VectorLike + ?Sized)) -> Result<f64> {
        check_length(self.len(), other.len())?;
        Ok(other.dot_slice(self.as_slice()))
    }

    /// Consume the view and return its storage
    pub fn into_inner(self) -> S {
        self.data
    }
}

impl<S: MutDenseData> SubVector<S> {
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.data.as_mut_slice()
    }

    /// Checked element write
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        check_index(index, self.len())?;
        self.data.as_mut_slice()[index] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: f64) {
        self.as_mut_slice().fill(value);
    }

    pub fn scale(&mut self, factor: f64) {
        self.as_mut_slice().iter_mut().for_each(|x| *x *= factor);
    }

    pub fn add_scalar(&mut self, value: f64) {
        self.as_mut_slice().iter_mut().for_each(|x| *x += value);
    }

    /// Overwrite the window with the elements of `source`
    pub fn set_from(&mut self, source: &(impl VectorLike + ?Sized)) -> Result<()> {
        check_length(self.len(), source.len())?;
        source.copy_to(self.as_mut_slice(), 0)
    }
}

impl<S: DenseData> VectorLike for SubVector<S> {
    fn len(&self) -> usize {
        self.data.as_slice().len()
    }

    fn element(&self, index: usize) -> f64 {
        self.data.as_slice()[index]
    }

    fn as_packed(&self) -> Option<&[f64]> {
        Some(self.data.as_slice())
    }
}

impl<S: MutDenseData> VectorLikeMut for SubVector<S> {
    fn set_element(&mut self, index: usize, value: f64) {
        self.data.as_mut_slice()[index] = value;
    }

    fn as_packed_mut(&mut self) -> Option<&mut [f64]> {
        Some(self.data.as_mut_slice())
    }
}

///////////////////
// StridedVector //
///////////////////

/// Constant-stride window over matrix storage
///
/// Element `i` lives at `offset + i * stride` in the underlying buffer. Column
/// views use `stride = ncols`, diagonal bands use `stride = ncols + 1`.
///
/// Equality compares the elements of the window only, so views into different
/// buffers, offsets or strides are equal when they read the same values.
#[derive(Debug, Clone, Copy)]
pub struct StridedVector<S>
where
    S: DenseData,
{
    data: S,
    offset: usize,
    len: usize,
    stride: usize,
}

impl<S: DenseData> StridedVector<S> {
    /// Construct a strided window, checking that every element lies in `data`
    pub fn try_new(data: S, offset: usize, len: usize, stride: usize) -> Result<Self> {
        let buffer_len = data.as_slice().len();
        let extent = match len {
            0 => Some(offset),
            _ => (len - 1)
                .checked_mul(stride)
                .and_then(|span| span.checked_add(offset))
                .and_then(|last| last.checked_add(1)),
        };
        match extent {
            Some(end) if end <= buffer_len => Ok(Self {
                data,
                offset,
                len,
                stride,
            }),
            _ => Err(MatrixError::out_of_bounds(
                extent.unwrap_or(usize::MAX),
                buffer_len,
            )),
        }
    }

    /// Like [`try_new`](Self::try_new), but an empty window is anchored at 0
    ///
    /// Empty rows, columns and bands of degenerate matrices can start past the
    /// end of the buffer.
    pub(crate) fn anchored(data: S, offset: usize, len: usize, stride: usize) -> Result<Self> {
        let offset = if len == 0 { 0 } else { offset };
        Self::try_new(data, offset, len, stride)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Checked element access
    pub fn get(&self, index: usize) -> Result<f64> {
        check_index(index, self.len)?;
        Ok(self.data.as_slice()[self.offset + index * self.stride])
    }

    /// Iterate the window in order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        let data = self.data.as_slice();
        (0..self.len).map(move |i| data[self.offset + i * self.stride])
    }

    /// Fresh copy of the window
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Copy the window into an owned vector
    pub fn to_vector(&self) -> Vector {
        Vector::from_vec(self.to_vec())
    }

    pub fn element_sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Dot product with another vector of the same length
    pub fn dot(&self, other: &(impl VectorLike + ?Sized)) -> Result<f64> {
        check_length(self.len, other.len())?;
        Ok(self
            .iter()
            .enumerate()
            .fold(0.0, |total, (i, x)| total + x * other.element(i)))
    }
}

impl<S: MutDenseData> StridedVector<S> {
    /// Checked element write
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        check_index(index, self.len)?;
        let at = self.offset + index * self.stride;
        self.data.as_mut_slice()[at] = value;
        Ok(())
    }

    fn for_each_mut(&mut self, mut f: impl FnMut(&mut f64)) {
        let (offset, len, stride) = (self.offset, self.len, self.stride);
        let data = self.data.as_mut_slice();
        for i in 0..len {
            f(&mut data[offset + i * stride]);
        }
    }

    pub fn fill(&mut self, value: f64) {
        self.for_each_mut(|x| *x = value);
    }

    pub fn scale(&mut self, factor: f64) {
        self.for_each_mut(|x| *x *= factor);
    }

    pub fn add_scalar(&mut self, value: f64) {
        self.for_each_mut(|x| *x += value);
    }

    /// Overwrite the window with the elements of `source`
    pub fn set_from(&mut self, source: &(impl VectorLike + ?Sized)) -> Result<()> {
        check_length(self.len, source.len())?;
        let mut i = 0;
        self.for_each_mut(|x| {
            *x = source.element(i);
            i += 1;
        });
        Ok(())
    }
}

impl<S: DenseData, T: DenseData> PartialEq<StridedVector<T>> for StridedVector<S> {
    fn eq(&self, other: &StridedVector<T>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<S: DenseData> VectorLike for StridedVector<S> {
    fn len(&self) -> usize {
        self.len
    }

    fn element(&self, index: usize) -> f64 {
        self.data.as_slice()[self.offset + index * self.stride]
    }

    fn as_packed(&self) -> Option<&[f64]> {
        if self.stride == 1 || self.len <= 1 {
            Some(&self.data.as_slice()[self.offset..self.offset + self.len])
        } else {
            None
        }
    }
}

impl<S: MutDenseData> VectorLikeMut for StridedVector<S> {
    fn set_element(&mut self, index: usize, value: f64) {
        let at = self.offset + index * self.stride;
        self.data.as_mut_slice()[at] = value;
    }

    fn as_packed_mut(&mut self) -> Option<&mut [f64]> {
        if self.stride == 1 || self.len <= 1 {
            let (offset, len) = (self.offset, self.len);
            Some(&mut self.data.as_mut_slice()[offset..offset + len])
        } else {
            None
        }
    }
}

//! Generic vector contracts

use crate::validation::check_capacity;
use crate::Result;

/// Read access to any 1-D vector of `f64`
pub trait VectorLike {
    /// Number of elements
    fn len(&self) -> usize;

    /// Element at `index`; callers guarantee `index < len()`
    fn element(&self, index: usize) -> f64;

    /// Whether the vector has no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Contiguous buffer backing this vector, if it has one
    fn as_packed(&self) -> Option<&[f64]> {
        None
    }

    /// Dot product with the first `len()` elements of `data`
    ///
    /// Accumulates left to right into a single `f64`.
    ///
    /// # Panics
    ///
    /// Panics if `data` is shorter than `len()`.
    fn dot_slice(&self, data: &[f64]) -> f64 {
        let data = &data[..self.len()];
        match self.as_packed() {
            Some(packed) => packed
                .iter()
                .zip(data)
                .fold(0.0, |total, (a, b)| total + a * b),
            None => data
                .iter()
                .enumerate()
                .fold(0.0, |total, (i, b)| total + self.element(i) * b),
        }
    }

    /// Copy every element into `dest` starting at `offset`
    fn copy_to(&self, dest: &mut [f64], offset: usize) -> Result<()> {
        let len = self.len();
        check_capacity(len, offset, dest.len())?;
        match self.as_packed() {
            Some(packed) => dest[offset..offset + len].copy_from_slice(packed),
            None => {
                for (i, slot) in dest[offset..offset + len].iter_mut().enumerate() {
                    *slot = self.element(i);
                }
            }
        }
        Ok(())
    }
}

/// Write access companion to [`VectorLike`]
pub trait VectorLikeMut: VectorLike {
    /// Overwrite the element at `index`; callers guarantee `index < len()`
    fn set_element(&mut self, index: usize, value: f64);

    /// Mutable contiguous buffer backing this vector, if it has one
    ///
    /// Must span the same memory as [`VectorLike::as_packed`].
    fn as_packed_mut(&mut self) -> Option<&mut [f64]> {
        None
    }
}

impl VectorLike for [f64] {
    fn len(&self) -> usize {
        <[f64]>::len(self)
    }

    fn element(&self, index: usize) -> f64 {
        self[index]
    }

    fn as_packed(&self) -> Option<&[f64]> {
        Some(self)
    }
}

impl VectorLikeMut for [f64] {
    fn set_element(&mut self, index: usize, value: f64) {
        self[index] = value;
    }

    fn as_packed_mut(&mut self) -> Option<&mut [f64]> {
        Some(self)
    }
}

impl<const N: usize> VectorLike for [f64; N] {
    fn len(&self) -> usize {
        N
    }

    fn element(&self, index: usize) -> f64 {
        self[index]
    }

    fn as_packed(&self) -> Option<&[f64]> {
        Some(self)
    }
}

impl<const N: usize> VectorLikeMut for [f64; N] {
    fn set_element(&mut self, index: usize, value: f64) {
        self[index] = value;
    }

    fn as_packed_mut(&mut self) -> Option<&mut [f64]> {
        Some(self)
    }
}

#[cfg(feature = "alloc")]
impl VectorLike for alloc::vec::Vec<f64> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn element(&self, index: usize) -> f64 {
        self[index]
    }

    fn as_packed(&self) -> Option<&[f64]> {
        Some(self)
    }
}

#[cfg(feature = "alloc")]
impl VectorLikeMut for alloc::vec::Vec<f64> {
    fn set_element(&mut self, index: usize, value: f64) {
        self[index] = value;
    }

    fn as_packed_mut(&mut self) -> Option<&mut [f64]> {
        Some(self)
    }
}

impl<V: VectorLike + ?Sized> VectorLike for &V {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn element(&self, index: usize) -> f64 {
        (**self).element(index)
    }

    fn as_packed(&self) -> Option<&[f64]> {
        (**self).as_packed()
    }

    fn dot_slice(&self, data: &[f64]) -> f64 {
        (**self).dot_slice(data)
    }
}

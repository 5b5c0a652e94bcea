//! Linear `f64` storage shared by matrices and views
//!
//! Matrices and views are generic over their storage so the same code serves
//! owned buffers, borrowed read-only buffers and borrowed mutable buffers:
//!
//! | storage          | produced by                              |
//! |------------------|------------------------------------------|
//! | `Box<[f64]>`     | `Matrix` factories                       |
//! | `Vec<f64>`       | wrapping a caller `Vec` by value         |
//! | `&[f64]`         | read-only views, wrapping shared slices  |
//! | `&mut [f64]`     | mutable views, wrapping caller buffers   |
//!
//! Views borrow the storage of their owner, so the borrow checker guarantees the
//! buffer outlives every view and that a mutable view excludes all other access.

/// Read access to a contiguous `f64` buffer
///
/// # Safety
///
/// `as_slice` must be idempotent: it must **always** return the same slice with the
/// same length. Unchecked accessors on matrices rely on the length validated at
/// construction staying true.
pub unsafe trait DenseData {
    /// Return the underlying data as a slice.
    fn as_slice(&self) -> &[f64];
}

/// Write access companion to [`DenseData`]
///
/// # Safety
///
/// `as_mut_slice` must be idempotent and must span exactly the memory returned by
/// [`DenseData::as_slice`].
pub unsafe trait MutDenseData: DenseData {
    /// Return the underlying data as a mutable slice.
    fn as_mut_slice(&mut self) -> &mut [f64];
}

// SAFETY: A shared slice always returns itself.
unsafe impl DenseData for &[f64] {
    fn as_slice(&self) -> &[f64] {
        self
    }
}

// SAFETY: A mutable slice always returns itself.
unsafe impl DenseData for &mut [f64] {
    fn as_slice(&self) -> &[f64] {
        self
    }
}

// SAFETY: Returns the same memory as `as_slice`.
unsafe impl MutDenseData for &mut [f64] {
    fn as_mut_slice(&mut self) -> &mut [f64] {
        self
    }
}

// SAFETY: A boxed slice cannot change length.
unsafe impl DenseData for Box<[f64]> {
    fn as_slice(&self) -> &[f64] {
        self
    }
}

// SAFETY: Returns the same memory as `as_slice`.
unsafe impl MutDenseData for Box<[f64]> {
    fn as_mut_slice(&mut self) -> &mut [f64] {
        self
    }
}

// SAFETY: Matrices never hand out the `Vec` itself, so its length cannot change
// while it is used as storage.
unsafe impl DenseData for Vec<f64> {
    fn as_slice(&self) -> &[f64] {
        self
    }
}

// SAFETY: Returns the same memory as `as_slice`.
unsafe impl MutDenseData for Vec<f64> {
    fn as_mut_slice(&mut self) -> &mut [f64] {
        self
    }
}

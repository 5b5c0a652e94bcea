//! Out-of-place arithmetic writing into a caller-supplied destination
//!
//! These take three distinct matrices, so the borrow checker rules out a
//! destination that aliases an operand.

use packmat_core::validation::check_same_shape;
use packmat_core::Result;

use super::DenseMatrix;
use crate::storage::{DenseData, MutDenseData};

/// `dest = a + b`
pub fn add_into<D, A, B>(
    dest: &mut DenseMatrix<D>,
    a: &DenseMatrix<A>,
    b: &DenseMatrix<B>,
) -> Result<()>
where
    D: MutDenseData,
    A: DenseData,
    B: DenseData,
{
    check_same_shape(dest.shape(), a.shape())?;
    check_same_shape(dest.shape(), b.shape())?;
    for ((x, &p), &q) in dest.as_mut_slice().iter_mut().zip(a.as_slice()).zip(b.as_slice()) {
        *x = p + q;
    }
    Ok(())
}

/// `dest = factor * src`
pub fn scale_into<D, A>(dest: &mut DenseMatrix<D>, src: &DenseMatrix<A>, factor: f64) -> Result<()>
where
    D: MutDenseData,
    A: DenseData,
{
    check_same_shape(dest.shape(), src.shape())?;
    for (x, &p) in dest.as_mut_slice().iter_mut().zip(src.as_slice()) {
        *x = p * factor;
    }
    Ok(())
}

/// `dest = a + b_factor * b`
pub fn scale_add_into<D, A, B>(
    dest: &mut DenseMatrix<D>,
    a: &DenseMatrix<A>,
    b: &DenseMatrix<B>,
    b_factor: f64,
) -> Result<()>
where
    D: MutDenseData,
    A: DenseData,
    B: DenseData,
{
    check_same_shape(dest.shape(), a.shape())?;
    check_same_shape(dest.shape(), b.shape())?;
    for ((x, &p), &q) in dest.as_mut_slice().iter_mut().zip(a.as_slice()).zip(b.as_slice()) {
        *x = p + b_factor * q;
    }
    Ok(())
}

//! Elementwise arithmetic and reductions
//!
//! Every operation here is a single pass over the packed buffer. Binary
//! operations check shapes before touching `self`, and take a buffer-level fast
//! path when the other operand exposes a packed buffer.

use packmat_core::validation::check_same_shape;
use packmat_core::{MatrixError, MatrixLike, Result, VectorLike};

use super::{ops, DenseMatrix, Matrix};
use crate::storage::{DenseData, MutDenseData};

impl<S: DenseData> DenseMatrix<S> {
    /// Sum of all elements, accumulated in row-major order
    pub fn element_sum(&self) -> f64 {
        self.as_slice().iter().fold(0.0, |total, &x| total + x)
    }

    /// Sum of the squares of all elements
    pub fn element_squared_sum(&self) -> f64 {
        self.as_slice().iter().fold(0.0, |total, &x| total + x * x)
    }

    /// Largest element, or negative infinity for an empty matrix
    pub fn element_max(&self) -> f64 {
        self.as_slice().iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest element, or positive infinity for an empty matrix
    pub fn element_min(&self) -> f64 {
        self.as_slice().iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Number of elements that are not exactly zero
    pub fn non_zero_count(&self) -> usize {
        self.as_slice().iter().filter(|&&x| x != 0.0).count()
    }

    /// Whether every element is zero
    pub fn is_zero(&self) -> bool {
        self.as_slice().iter().all(|&x| x == 0.0)
    }

    /// Whether every element is exactly 0.0 or 1.0
    pub fn is_boolean(&self) -> bool {
        self.as_slice().iter().all(|&x| x == 0.0 || x == 1.0)
    }

    /// `self + other` as a new matrix
    pub fn add_copy<T: DenseData>(&self, other: &DenseMatrix<T>) -> Result<Matrix> {
        check_same_shape(self.shape(), other.shape())?;
        let mut out = Matrix::zeros(self.nrows(), self.ncols())?;
        ops::add_into(&mut out, self, other)?;
        Ok(out)
    }
}

impl<S: MutDenseData> DenseMatrix<S> {
    /// Apply `f` to every element in place
    pub fn apply(&mut self, mut f: impl FnMut(f64) -> f64) {
        for x in self.as_mut_slice() {
            *x = f(*x);
        }
    }

    pub fn abs(&mut self) {
        self.apply(f64::abs);
    }

    /// Replace each element by its sign; zeros keep their value and NaN stays NaN
    pub fn signum(&mut self) {
        self.apply(|x| {
            if x > 0.0 {
                1.0
            } else if x < 0.0 {
                -1.0
            } else {
                x
            }
        });
    }

    pub fn square(&mut self) {
        self.apply(|x| x * x);
    }

    pub fn exp(&mut self) {
        self.apply(f64::exp);
    }

    /// Natural logarithm of each element
    pub fn log(&mut self) {
        self.apply(f64::ln);
    }

    pub fn reciprocal(&mut self) {
        self.apply(|x| 1.0 / x);
    }

    /// Limit every element to `[min, max]`
    ///
    /// Unlike [`f64::clamp`] this never panics; with `min > max` every element
    /// ends up at one of the two bounds.
    pub fn clamp(&mut self, min: f64, max: f64) {
        self.apply(|x| {
            if x < min {
                min
            } else if x > max {
                max
            } else {
                x
            }
        });
    }

    pub fn add_scalar(&mut self, value: f64) {
        self.apply(|x| x + value);
    }

    /// Multiply every element by `factor`
    pub fn scale(&mut self, factor: f64) {
        self.apply(|x| x * factor);
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: f64) {
        self.as_mut_slice().fill(value);
    }

    /// `self += other`
    pub fn add(&mut self, other: &(impl MatrixLike + ?Sized)) -> Result<()> {
        self.zip_with(other, |x, y| x + y)
    }

    /// `self -= other`
    pub fn sub(&mut self, other: &(impl MatrixLike + ?Sized)) -> Result<()> {
        self.zip_with(other, |x, y| x - y)
    }

    /// `self += factor * other`
    pub fn add_multiple(&mut self, other: &(impl MatrixLike + ?Sized), factor: f64) -> Result<()> {
        self.zip_with(other, |x, y| x + factor * y)
    }

    /// `self = factor * other`
    pub fn set_multiple(&mut self, other: &(impl MatrixLike + ?Sized), factor: f64) -> Result<()> {
        self.zip_with(other, |_, y| y * factor)
    }

    /// Overwrite every element with the matching element of `other`
    pub fn set_from(&mut self, other: &(impl MatrixLike + ?Sized)) -> Result<()> {
        check_same_shape(self.shape(), other.shape())?;
        other.copy_elements_to(self.as_mut_slice())
    }

    /// `self += a + b` in a single pass
    ///
    /// Each element becomes `x + (a + b)`.
    pub fn add2(
        &mut self,
        a: &(impl MatrixLike + ?Sized),
        b: &(impl MatrixLike + ?Sized),
    ) -> Result<()> {
        check_same_shape(self.shape(), a.shape())?;
        check_same_shape(self.shape(), b.shape())?;

        let ncols = self.ncols();
        match (a.as_packed(), b.as_packed()) {
            (Some(left), Some(right)) => {
                for ((x, &p), &q) in self.as_mut_slice().iter_mut().zip(left).zip(right) {
                    *x += p + q;
                }
            }
            _ => {
                for (k, x) in self.as_mut_slice().iter_mut().enumerate() {
                    let (i, j) = (k / ncols, k % ncols);
                    *x += a.element(i, j) + b.element(i, j);
                }
            }
        }
        Ok(())
    }

    /// Broadcast a vector over the rows
    ///
    /// The vector must have one element per row. Its elements are written at the
    /// start of the buffer and the resulting first row is then copied into every
    /// other row, so with a non-square shape only the leading part of row 0 comes
    /// from the vector.
    pub fn set_vector(&mut self, values: &(impl VectorLike + ?Sized)) -> Result<()> {
        let (nrows, ncols) = self.shape();
        if values.len() != nrows {
            return Err(MatrixError::IncompatibleBroadcast {
                len: values.len(),
                target: nrows,
            });
        }
        if ncols == 0 {
            return Ok(());
        }

        let data = self.as_mut_slice();
        values.copy_to(data, 0)?;
        for i in 1..nrows {
            data.copy_within(0..ncols, i * ncols);
        }
        Ok(())
    }

    /// Combine each element with the matching element of `other`
    fn zip_with(
        &mut self,
        other: &(impl MatrixLike + ?Sized),
        mut f: impl FnMut(f64, f64) -> f64,
    ) -> Result<()> {
        check_same_shape(self.shape(), other.shape())?;

        let ncols = self.ncols();
        match other.as_packed() {
            Some(packed) => {
                for (x, &y) in self.as_mut_slice().iter_mut().zip(packed) {
                    *x = f(*x, y);
                }
            }
            None => {
                for (k, x) in self.as_mut_slice().iter_mut().enumerate() {
                    *x = f(*x, other.element(k / ncols, k % ncols));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packmat_core::MatrixError;

    fn sample() -> Matrix {
        Matrix::from_nested(&[[1.0, -2.0], [0.0, 4.0]]).unwrap()
    }

    /// Matrix that only exposes element access
    struct Diagonal(usize);

    impl MatrixLike for Diagonal {
        fn nrows(&self) -> usize {
            self.0
        }

        fn ncols(&self) -> usize {
            self.0
        }

        fn element(&self, row: usize, col: usize) -> f64 {
            if row == col {
                (row + 1) as f64
            } else {
                0.0
            }
        }
    }

    #[test]
    fn test_reductions() {
        let m = sample();
        assert_eq!(m.element_sum(), 3.0);
        assert_eq!(m.element_squared_sum(), 21.0);
        assert_eq!(m.element_max(), 4.0);
        assert_eq!(m.element_min(), -2.0);
        assert_eq!(m.non_zero_count(), 3);
        assert!(!m.is_zero());
        assert!(!m.is_boolean());
        assert!(Matrix::identity(3).unwrap().is_boolean());
    }

    #[test]
    fn test_empty_reductions() {
        let m = Matrix::zeros(0, 3).unwrap();
        assert_eq!(m.element_sum(), 0.0);
        assert_eq!(m.element_max(), f64::NEG_INFINITY);
        assert_eq!(m.element_min(), f64::INFINITY);
        assert_eq!(m.non_zero_count(), 0);
        assert!(m.is_zero());
    }

    #[test]
    fn test_unary() {
        let mut m = sample();
        m.signum();
        assert_eq!(m.as_slice(), &[1.0, -1.0, 0.0, 1.0]);

        let mut m = sample();
        m.abs();
        m.square();
        assert_eq!(m.as_slice(), &[1.0, 4.0, 0.0, 16.0]);
        m.reciprocal();
        assert_eq!(m.as_slice(), &[1.0, 0.25, f64::INFINITY, 0.0625]);

        let mut m = sample();
        m.clamp(-1.0, 2.0);
        assert_eq!(m.as_slice(), &[1.0, -1.0, 0.0, 2.0]);

        let mut m = Matrix::zeros(1, 2).unwrap();
        m.exp();
        assert_eq!(m.as_slice(), &[1.0, 1.0]);
        m.log();
        assert_eq!(m.as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn test_signum_keeps_negative_zero() {
        let mut m = Matrix::from_vec(1, 1, vec![-0.0]).unwrap();
        m.signum();
        assert!(m.as_slice()[0].is_sign_negative());
    }

    #[test]
    fn test_scalar() {
        let mut m = sample();
        m.add_scalar(1.0);
        m.scale(2.0);
        assert_eq!(m.as_slice(), &[4.0, -2.0, 2.0, 10.0]);
        m.fill(3.0);
        assert_eq!(m.element_sum(), 12.0);
    }

    #[test]
    fn test_add_and_sub() {
        let mut m = sample();
        m.add(&sample()).unwrap();
        assert_eq!(m.as_slice(), &[2.0, -4.0, 0.0, 8.0]);
        m.sub(&sample()).unwrap();
        assert_eq!(m, sample());
        m.add_multiple(&Matrix::identity(2).unwrap(), 10.0).unwrap();
        assert_eq!(m.as_slice(), &[11.0, -2.0, 0.0, 14.0]);
    }

    #[test]
    fn test_generic_operand_matches_packed() {
        let diagonal = Diagonal(2);
        let packed = Matrix::from_matrix(&diagonal).unwrap();

        let mut fast = sample();
        let mut slow = sample();
        fast.add_multiple(&packed, 0.5).unwrap();
        slow.add_multiple(&diagonal, 0.5).unwrap();
        assert_eq!(fast, slow);

        fast.add2(&packed, &packed).unwrap();
        slow.add2(&diagonal, &packed).unwrap();
        assert_eq!(fast, slow);
    }

    #[test]
    fn test_shape_checked_before_mutation() {
        let mut m = sample();
        let wide = Matrix::zeros(2, 3).unwrap();
        assert_eq!(
            m.add(&wide),
            Err(MatrixError::ShapeMismatch {
                left: (2, 2),
                right: (2, 3)
            })
        );
        assert!(m.add2(&sample(), &wide).is_err());
        assert!(m.set_from(&wide).is_err());
        assert!(m.add_copy(&wide).is_err());
        assert_eq!(m, sample());
    }

    #[test]
    fn test_set_multiple_and_set_from() {
        let mut m = Matrix::zeros(2, 2).unwrap();
        m.set_multiple(&sample(), -1.0).unwrap();
        assert_eq!(m.as_slice(), &[-1.0, 2.0, -0.0, -4.0]);
        m.set_from(&Diagonal(2)).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_add_copy_leaves_operands() {
        let a = sample();
        let b = Matrix::identity(2).unwrap();
        let c = a.add_copy(&b).unwrap();
        assert_eq!(c.as_slice(), &[2.0, -2.0, 0.0, 5.0]);
        assert_eq!(a, sample());
    }

    #[test]
    fn test_apply() {
        let mut m = sample();
        m.apply(|x| x * 10.0 + 1.0);
        assert_eq!(m.as_slice(), &[11.0, -19.0, 1.0, 41.0]);
    }

    #[test]
    fn test_set_vector_square() {
        let mut m = Matrix::zeros(3, 3).unwrap();
        m.set_vector(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            m.as_slice(),
            &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn test_set_vector_non_square() {
        let mut tall = Matrix::zeros(3, 2).unwrap();
        tall.set_vector(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(tall.as_slice(), &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);

        let mut wide = Matrix::from_nested(&[[9.0, 9.0, 9.0], [0.0, 0.0, 0.0]]).unwrap();
        wide.set_vector(&[1.0, 2.0]).unwrap();
        assert_eq!(wide.as_slice(), &[1.0, 2.0, 9.0, 1.0, 2.0, 9.0]);

        assert_eq!(
            wide.set_vector(&[1.0, 2.0, 3.0]),
            Err(MatrixError::IncompatibleBroadcast { len: 3, target: 2 })
        );
    }
}

//! Matrix products and matrix-vector transforms

use packmat_core::validation::{check_product, check_transform};
use packmat_core::{MatrixError, MatrixLike, Result, VectorLike, VectorLikeMut};

use super::{DenseMatrix, Matrix};
use crate::multiply::Multiplier;
use crate::storage::DenseData;
use crate::vector::Vector;

impl<S: DenseData> DenseMatrix<S> {
    /// `self * other` with the default dispatcher
    pub fn inner_product<T: DenseData>(&self, other: &DenseMatrix<T>) -> Result<Matrix> {
        self.inner_product_with(&Multiplier::default(), other)
    }

    /// `self * other` with a caller-configured dispatcher
    pub fn inner_product_with<T: DenseData>(
        &self,
        multiplier: &Multiplier,
        other: &DenseMatrix<T>,
    ) -> Result<Matrix> {
        multiplier.multiply(self.as_view(), other.as_view())
    }

    /// `self * other` for any matrix representation
    ///
    /// Operands exposing a packed buffer take the same path as
    /// [`inner_product`](Self::inner_product). Others are read element by
    /// element.
    pub fn inner_product_any(&self, other: &(impl MatrixLike + ?Sized)) -> Result<Matrix> {
        let multiplier = Multiplier::default();
        match other.as_packed() {
            Some(packed) => {
                let other = DenseMatrix::wrap(other.nrows(), other.ncols(), packed)?;
                multiplier.multiply(self.as_view(), other)
            }
            None => {
                check_product(self.shape(), other.shape())?;
                multiplier.multiply_generic(self.as_view(), other)
            }
        }
    }

    /// `self * other` through a trait object
    pub fn inner_product_generic(&self, other: &dyn MatrixLike) -> Result<Matrix> {
        self.inner_product_any(other)
    }

    /// `transpose(self) * other`
    ///
    /// The transpose is materialised first, so this costs an extra
    /// `nrows * ncols` copy.
    pub fn transpose_inner_product<T: DenseData>(&self, other: &DenseMatrix<T>) -> Result<Matrix> {
        if self.nrows() != other.nrows() {
            return Err(MatrixError::DimensionMismatch {
                left: (self.ncols(), self.nrows()),
                right: other.shape(),
            });
        }
        self.to_matrix_transpose()?.inner_product(other)
    }

    /// `self * v` as a new vector of length `nrows()`
    pub fn transform(&self, v: &(impl VectorLike + ?Sized)) -> Result<Vector> {
        if v.len() != self.ncols() {
            return Err(MatrixError::DimensionMismatch {
                left: self.shape(),
                right: (v.len(), 1),
            });
        }
        let mut out = Vector::zeros(self.nrows());
        self.transform_into(v, &mut out)?;
        Ok(out)
    }

    /// Alias of [`transform`](Self::transform)
    pub fn inner_product_vector(&self, v: &(impl VectorLike + ?Sized)) -> Result<Vector> {
        self.transform(v)
    }

    /// Write `self * source` into `dest`
    ///
    /// Each output element is accumulated left to right across its row in a
    /// local before being stored. Fails with `WrongSourceLength` or
    /// `WrongDestLength`, source checked first.
    pub fn transform_into(
        &self,
        source: &(impl VectorLike + ?Sized),
        dest: &mut (impl VectorLikeMut + ?Sized),
    ) -> Result<()> {
        check_transform(self.nrows(), self.ncols(), source.len(), dest.len())?;
        let ncols = self.ncols();
        if ncols == 0 {
            for i in 0..self.nrows() {
                dest.set_element(i, 0.0);
            }
            return Ok(());
        }

        let rows = self.as_slice().chunks_exact(ncols);
        match (source.as_packed(), dest.as_packed_mut()) {
            (Some(src), Some(out)) => {
                for (row, slot) in rows.zip(out) {
                    let mut total = 0.0;
                    for (&a, &x) in row.iter().zip(src) {
                        total += a * x;
                    }
                    *slot = total;
                }
            }
            _ => {
                for (i, row) in rows.enumerate() {
                    let mut total = 0.0;
                    for (j, &a) in row.iter().enumerate() {
                        total += a * source.element(j);
                    }
                    dest.set_element(i, total);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::StridedVector;

    /// Upper-triangular ones, exposed only through element access
    struct Upper(usize);

    impl MatrixLike for Upper {
        fn nrows(&self) -> usize {
            self.0
        }

        fn ncols(&self) -> usize {
            self.0
        }

        fn element(&self, row: usize, col: usize) -> f64 {
            if row <= col {
                1.0
            } else {
                0.0
            }
        }
    }

    fn sample() -> Matrix {
        Matrix::from_nested(&[[1.0, 2.0], [3.0, 4.0]]).unwrap()
    }

    #[test]
    fn test_inner_product() {
        let m = sample();
        let squared = m.inner_product(&m).unwrap();
        assert_eq!(squared.as_slice(), &[7.0, 10.0, 15.0, 22.0]);

        let identity = Matrix::identity(2).unwrap();
        assert_eq!(identity.inner_product(&identity).unwrap(), identity);
    }

    #[test]
    fn test_inner_product_any_paths_agree() {
        let m = sample();
        let upper = Upper(2);
        let dense_upper = Matrix::from_matrix(&upper).unwrap();

        let slow = m.inner_product_any(&upper).unwrap();
        let fast = m.inner_product_any(&dense_upper).unwrap();
        assert_eq!(slow, fast);
        assert_eq!(slow.as_slice(), &[1.0, 3.0, 3.0, 7.0]);
        assert_eq!(m.inner_product_generic(&upper).unwrap(), fast);

        assert!(matches!(
            m.inner_product_any(&Upper(3)),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_transpose_inner_product() {
        let a = Matrix::from_nested(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::from_nested(&[[1.0], [1.0]]).unwrap();
        let product = a.transpose_inner_product(&b).unwrap();
        assert_eq!(product.shape(), (3, 1));
        assert_eq!(product.as_slice(), &[5.0, 7.0, 9.0]);

        assert!(a.transpose_inner_product(&Matrix::zeros(3, 1).unwrap()).is_err());
    }

    #[test]
    fn test_transform() {
        let m = sample();
        assert_eq!(m.transform(&[1.0, 1.0]).unwrap().as_slice(), &[3.0, 7.0]);
        assert_eq!(
            m.transform(&[1.0, 1.0, 1.0]),
            Err(MatrixError::DimensionMismatch {
                left: (2, 2),
                right: (3, 1)
            })
        );

        let identity = Matrix::identity(2).unwrap();
        assert_eq!(
            identity.inner_product_vector(&vec![3.0, 5.0]).unwrap().to_vec(),
            vec![3.0, 5.0]
        );
    }

    #[test]
    fn test_transform_into_checks_source_first() {
        let m = Matrix::zeros(2, 3).unwrap();
        let mut dest = [0.0; 5];
        assert_eq!(
            m.transform_into(&[1.0; 4], &mut dest),
            Err(MatrixError::WrongSourceLength {
                expected: 3,
                actual: 4
            })
        );
        assert_eq!(
            m.transform_into(&[1.0; 3], &mut dest),
            Err(MatrixError::WrongDestLength {
                expected: 2,
                actual: 5
            })
        );
    }

    #[test]
    fn test_transform_into_strided_paths_agree() {
        let m = sample();
        let storage = [1.0, 9.0, -1.0, 9.0];
        let source = StridedVector::try_new(&storage[..], 0, 2, 2).unwrap();

        let mut packed = [0.0; 2];
        m.transform_into(&source, &mut packed).unwrap();
        assert_eq!(packed, [-1.0, -1.0]);

        let mut backing = [0.0; 4];
        let mut strided = StridedVector::try_new(&mut backing[..], 1, 2, 2).unwrap();
        m.transform_into(&[1.0, -1.0], &mut strided).unwrap();
        assert_eq!(backing, [0.0, -1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_transform_empty_columns() {
        let m = Matrix::zeros(3, 0).unwrap();
        let empty: [f64; 0] = [];
        let mut dest = [7.0; 3];
        m.transform_into(&empty, &mut dest).unwrap();
        assert_eq!(dest, [0.0; 3]);
    }
}

//! packmat - dense row-major matrices of `f64`
//!
//! This library provides a packed matrix type with zero-copy views, in-place
//! arithmetic and a multiplication dispatcher that scales from a naive loop to a
//! rayon-parallel kernel.
//!
//! ## Architecture
//!
//! packmat follows a contract/implementation separation:
//!
//! - **packmat-core**: error taxonomy, offset layouts, validation and the
//!   generic `MatrixLike` / `VectorLike` contracts (`no_std`, no allocation)
//! - **packmat**: the dense matrix, its views, vectors and the multiplication
//!   dispatcher
//!
//! ## Quick Start
//!
//! ```rust
//! use packmat::{Matrix, Result};
//!
//! fn example() -> Result<()> {
//!     let m = Matrix::from_nested(&[[1.0, 2.0], [3.0, 4.0]])?;
//!
//!     assert_eq!(m.element_sum(), 10.0);
//!     assert_eq!(m.transform(&[1.0, 1.0])?.as_slice(), &[3.0, 7.0]);
//!     assert_eq!(m.band(0)?.to_vec(), vec![1.0, 4.0]);
//!
//!     let squared = m.inner_product(&m)?;
//!     assert_eq!(squared.as_slice(), &[7.0, 10.0, 15.0, 22.0]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Zero-copy views**: rows, columns, diagonal bands, sub-matrices and
//!   transposes borrow the parent's buffer
//! - **Capability dispatch**: operands exposing a packed buffer take
//!   slice-level fast paths, everything else goes through `MatrixLike`
//! - **Configurable multiplication**: naive, cache-blocked and parallel
//!   kernels with bit-identical results
//! - **Serde support**: `MultiplyConfig` and `Layout` can be loaded from config
//!   files (`serde` feature, on by default)

// Re-export core abstractions
pub use packmat_core::{
    // Contracts
    ElementSink, MatrixLike, SliceSink, VectorLike, VectorLikeMut,
    // Indexing
    band_length, element_count, Layout,
    // Error handling
    ErrorCategory, MatrixError, Result,
};

// Implementation modules
pub mod config;
pub mod iter;
pub mod matrix;
pub mod multiply;
pub mod storage;
pub mod vector;
pub mod views;

// Public exports
pub use config::MultiplyConfig;
pub use iter::ElementIter;
pub use matrix::{DenseMatrix, Matrix, MatrixMut, MatrixRef};
pub use multiply::{multiply, Algorithm, Multiplier};
pub use storage::{DenseData, MutDenseData};
pub use vector::{StridedVector, SubVector, Vector};
pub use views::{StridedMatrix, TransposeView};

//! Abstract interfaces for packed matrix interoperation
//!
//! This module defines the trait abstractions that let dense matrices exchange
//! data with other matrix and vector representations. Traits are pure interfaces:
//! concrete implementations live in the `packmat` crate.

pub mod matrix;
pub mod sink;
pub mod vector;

pub use matrix::MatrixLike;
pub use sink::{ElementSink, SliceSink};
pub use vector::{VectorLike, VectorLikeMut};

//! Shape and bounds validation for packed matrices
//!
//! This module contains pure validation functions with no storage access.
//! All functions are arithmetic checks on shapes, indices and strides.

pub mod bounds;
pub mod shape;

pub use bounds::{
    band_length, band_offset, check_band, check_capacity, check_element, check_index,
    check_submatrix, element_count,
};
pub use shape::{check_length, check_product, check_same_shape, check_transform};

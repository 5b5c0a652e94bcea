#![no_std]

//! packmat core - contracts for dense packed matrices
//!
//! This crate provides the error taxonomy, the closed-form indexing scheme and
//! the generic matrix/vector interfaces shared by every matrix representation.
//! It performs no allocation unless the `alloc` feature is enabled and contains
//! no concrete matrix type.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod layout;
pub mod traits;
pub mod validation;

pub use error::*;
pub use layout::Layout;
pub use traits::*;
pub use validation::{band_length, element_count};

//! Matrix multiplication dispatcher
//!
//! The dispatcher picks a kernel from the product shape and a
//! [`MultiplyConfig`]:
//!
//! - **Naive**: `i-k-j` loop order over packed rows.
//! - **Blocked**: the same loop nest tiled into `block_size` squares so that a
//!   tile of `b` stays in cache while it is reused.
//! - **Parallel**: output rows distributed over the rayon thread pool, each row
//!   computed with the naive kernel.
//!
//! Every kernel accumulates output element `(i, j)` as
//! `((0 + a[i,0]*b[0,j]) + a[i,1]*b[1,j]) + ...` in ascending `k` order, so all
//! of them return bit-identical results. Operands that are not packed go through
//! [`Multiplier::multiply_generic`], which reads them element by element in the
//! same order.

use packmat_core::validation::check_product;
use packmat_core::{MatrixLike, Result};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::MultiplyConfig;
use crate::matrix::{Matrix, MatrixRef};

/// Multiplication kernel chosen for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Naive,
    Blocked { block_size: usize },
    Parallel,
}

/// Selects and runs multiplication kernels
#[derive(Debug, Clone, Default)]
pub struct Multiplier {
    config: MultiplyConfig,
}

impl Multiplier {
    /// Create a dispatcher, rejecting invalid configurations
    pub fn new(config: MultiplyConfig) -> Result<Self> {
        config.validate()?;
        debug!(?config, "configured matrix multiplier");
        Ok(Self { config })
    }

    /// Get the active configuration
    pub fn config(&self) -> &MultiplyConfig {
        &self.config
    }

    /// Kernel used for an `m x k` by `k x n` product
    pub fn select(&self, m: usize, n: usize, k: usize) -> Algorithm {
        let work = m.saturating_mul(n).saturating_mul(k);
        if work >= self.config.parallel_threshold && m > 1 {
            Algorithm::Parallel
        } else if work >= self.config.blocked_threshold {
            Algorithm::Blocked {
                block_size: self.config.block_size,
            }
        } else {
            Algorithm::Naive
        }
    }

    /// Multiply two packed matrices
    ///
    /// Fails with `DimensionMismatch` unless `a.ncols() == b.nrows()`.
    pub fn multiply(&self, a: MatrixRef<'_>, b: MatrixRef<'_>) -> Result<Matrix> {
        let (m, n) = check_product(a.shape(), b.shape())?;
        let k = a.ncols();
        let mut out = Matrix::zeros(m, n)?;
        if m == 0 || n == 0 || k == 0 {
            return Ok(out);
        }

        let algorithm = self.select(m, n, k);
        trace!(m, n, k, ?algorithm, "dispatching matrix product");

        let (a, b) = (a.as_slice(), b.as_slice());
        let c = out.as_mut_slice();
        match algorithm {
            Algorithm::Naive => naive(a, b, c, n, k),
            Algorithm::Blocked { block_size } => blocked(a, b, c, m, n, k, block_size),
            Algorithm::Parallel => parallel(a, b, c, n, k),
        }
        Ok(out)
    }

    /// Multiply a packed matrix by any matrix through its element accessor
    ///
    /// This is the slow path for operands that do not expose a packed buffer.
    pub fn multiply_generic(
        &self,
        a: MatrixRef<'_>,
        b: &(impl MatrixLike + ?Sized),
    ) -> Result<Matrix> {
        let (m, n) = check_product(a.shape(), b.shape())?;
        let k = a.ncols();
        trace!(m, n, k, "dispatching generic matrix product");

        let mut out = Matrix::zeros(m, n)?;
        let a = a.as_slice();
        let c = out.as_mut_slice();
        for i in 0..m {
            let a_row = &a[i * k..(i + 1) * k];
            for j in 0..n {
                let mut total = 0.0;
                for (p, &a_ip) in a_row.iter().enumerate() {
                    total += a_ip * b.element(p, j);
                }
                c[i * n + j] = total;
            }
        }
        Ok(out)
    }
}

/// Multiply two packed matrices with the default dispatcher
pub fn multiply(a: MatrixRef<'_>, b: MatrixRef<'_>) -> Result<Matrix> {
    Multiplier::default().multiply(a, b)
}

/// `out_row += a_row * b` for one output row
#[inline]
fn accumulate_row(a_row: &[f64], b: &[f64], out_row: &mut [f64], n: usize) {
    for (p, &a_ip) in a_row.iter().enumerate() {
        let b_row = &b[p * n..(p + 1) * n];
        for (out, &b_pj) in out_row.iter_mut().zip(b_row) {
            *out += a_ip * b_pj;
        }
    }
}

fn naive(a: &[f64], b: &[f64], c: &mut [f64], n: usize, k: usize) {
    for (a_row, out_row) in a.chunks_exact(k).zip(c.chunks_exact_mut(n)) {
        accumulate_row(a_row, b, out_row, n);
    }
}

#[allow(clippy::too_many_arguments)]
fn blocked(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize, block: usize) {
    for i0 in (0..m).step_by(block) {
        let i1 = (i0 + block).min(m);
        // k tiles stay outermost after i so every element sees ascending k.
        for p0 in (0..k).step_by(block) {
            let p1 = (p0 + block).min(k);
            for j0 in (0..n).step_by(block) {
                let j1 = (j0 + block).min(n);
                for i in i0..i1 {
                    let out_row = &mut c[i * n + j0..i * n + j1];
                    for p in p0..p1 {
                        let a_ip = a[i * k + p];
                        let b_row = &b[p * n + j0..p * n + j1];
                        for (out, &b_pj) in out_row.iter_mut().zip(b_row) {
                            *out += a_ip * b_pj;
                        }
                    }
                }
            }
        }
    }
}

fn parallel(a: &[f64], b: &[f64], c: &mut [f64], n: usize, k: usize) {
    c.par_chunks_mut(n)
        .zip(a.par_chunks(k))
        .for_each(|(out_row, a_row)| accumulate_row(a_row, b, out_row, n));
}

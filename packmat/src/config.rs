//! Configuration for the multiplication dispatcher

use packmat_core::{MatrixError, Result};

/// Thresholds that steer algorithm selection in [`Multiplier`](crate::Multiplier)
///
/// Work is measured as `m * n * k` multiply-adds for an `m x k` by `k x n`
/// product.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MultiplyConfig {
    /// Minimum work for the cache-blocked algorithm
    pub blocked_threshold: usize,
    /// Minimum work for the row-parallel algorithm
    pub parallel_threshold: usize,
    /// Edge length of the square tiles used by the blocked algorithm
    pub block_size: usize,
}

impl MultiplyConfig {
    /// Set the blocked algorithm threshold
    pub fn with_blocked_threshold(mut self, work: usize) -> Self {
        self.blocked_threshold = work;
        self
    }

    /// Set the parallel algorithm threshold
    pub fn with_parallel_threshold(mut self, work: usize) -> Self {
        self.parallel_threshold = work;
        self
    }

    /// Set the tile edge length for blocked multiplication
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Config that always runs the naive algorithm
    pub fn naive_only() -> Self {
        Self::default()
            .with_blocked_threshold(usize::MAX)
            .with_parallel_threshold(usize::MAX)
    }

    /// Get the tile edge length
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Reject configurations the dispatcher cannot run
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(MatrixError::InvalidShape {
                rows: self.block_size,
                cols: self.block_size,
            });
        }
        Ok(())
    }
}

impl Default for MultiplyConfig {
    fn default() -> Self {
        Self {
            blocked_threshold: 32 * 32 * 32,
            parallel_threshold: 128 * 128 * 128,
            block_size: 64,
        }
    }
}

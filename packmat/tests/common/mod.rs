//! Shared helpers for the integration tests

#![allow(dead_code)]

use packmat::Matrix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Install a thread-local subscriber that writes through the test harness.
///
/// Respects `RUST_LOG`; defaults to `trace` so dispatcher decisions show up in
/// the captured output of failing tests.
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    let fmt_layer = fmt::layer().with_target(true).with_test_writer();

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::TRACE.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .set_default()
}

/// Reproducible matrix with entries in `[-0.5, 0.5)`
pub fn random_matrix(nrows: usize, ncols: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut m = Matrix::random(nrows, ncols, &mut rng).unwrap();
    m.add_scalar(-0.5);
    m
}

/// Matrix whose elements are `0, 1, 2, ...` in row-major order
pub fn counting(nrows: usize, ncols: usize) -> Matrix {
    let data = (0..nrows * ncols).map(|x| x as f64).collect();
    Matrix::from_vec(nrows, ncols, data).unwrap()
}

//! Example showing construction, arithmetic and products on dense matrices
//!
//! Run with `RUST_LOG=packmat=debug` to see which multiplication algorithm the
//! dispatcher picks for each product.

use packmat::{Matrix, MultiplyConfig, Multiplier, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn print_matrix(label: &str, m: &Matrix) -> Result<()> {
    println!("{} ({}x{}):", label, m.nrows(), m.ncols());
    for i in 0..m.nrows() {
        println!("  {:?}", m.row_view(i)?.as_slice());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Build from nested rows
    let mut a = Matrix::from_nested(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])?;
    print_matrix("a", &a)?;
    println!("sum = {}, max = {}", a.element_sum(), a.element_max());

    // In-place arithmetic
    a.scale(0.5);
    a.add_scalar(1.0);
    a.swap_rows(0, 1)?;
    print_matrix("a after scale, shift and swap", &a)?;

    // Products and transforms
    let identity = Matrix::identity(3)?;
    let product = a.inner_product(&identity)?;
    println!("a * I == a: {}", product == a);

    let transformed = a.transform(&[1.0, 0.0, -1.0])?;
    println!("a * [1, 0, -1] = {:?}", transformed.as_slice());

    // A dispatcher tuned to always take the parallel kernel
    let mut rng = StdRng::seed_from_u64(7);
    let left = Matrix::random(96, 80, &mut rng)?;
    let right = Matrix::random(80, 64, &mut rng)?;
    let config = MultiplyConfig::default().with_parallel_threshold(0);
    let multiplier = Multiplier::new(config)?;
    println!(
        "algorithm for 96x80 * 80x64: {:?}",
        multiplier.select(left.nrows(), right.ncols(), left.ncols())
    );

    let parallel = left.inner_product_with(&multiplier, &right)?;
    let naive = left.inner_product_with(&Multiplier::new(MultiplyConfig::naive_only())?, &right)?;
    println!("parallel and naive agree: {}", parallel == naive);

    // Errors carry the offending shapes
    match a.inner_product(&a) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("error ({:?}): {}", err.category(), err),
    }

    Ok(())
}

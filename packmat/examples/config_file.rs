//! Example loading multiplication thresholds from JSON
//!
//! Missing fields fall back to the defaults, so a config file only needs the
//! thresholds it changes.

use packmat::{Matrix, MultiplyConfig, Multiplier};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = r#"{ "blocked_threshold": 1000, "block_size": 16 }"#;
    let config: MultiplyConfig = serde_json::from_str(text)?;
    println!("loaded: {:?}", config);

    let multiplier = Multiplier::new(config)?;
    for size in [4, 16, 64, 256] {
        println!(
            "{0}x{0} * {0}x{0} -> {1:?}",
            size,
            multiplier.select(size, size, size)
        );
    }

    let m = Matrix::identity(32)?;
    let squared = m.inner_product_with(&multiplier, &m)?;
    println!("I * I == I: {}", squared == m);

    let bad: MultiplyConfig = serde_json::from_str(r#"{ "block_size": 0 }"#)?;
    if let Err(err) = Multiplier::new(bad) {
        println!("rejected config: {}", err);
    }

    Ok(())
}

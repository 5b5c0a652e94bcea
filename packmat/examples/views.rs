//! Example showing zero-copy views onto a matrix buffer
//!
//! Rows, columns, bands, sub-matrices and transposes all borrow the parent
//! matrix, so writes through a mutable view land in the parent.

use packmat::{Matrix, Result};

fn main() -> Result<()> {
    let data: Vec<f64> = (0..12).map(|x| x as f64).collect();
    let mut m = Matrix::from_vec(3, 4, data)?;

    println!("row 1:    {:?}", m.row_view(1)?.to_vec());
    println!("column 2: {:?}", m.column_view(2)?.to_vec());
    for band in -(m.nrows() as isize)..=m.ncols() as isize {
        println!("band {:>2}:  {:?}", band, m.band(band)?.to_vec());
    }

    let window = m.sub_matrix(1, 2, 1, 2)?;
    println!(
        "window at (1, 1): {:?}",
        window.element_iter().collect::<Vec<_>>()
    );

    // Transposing is O(1) and shares the buffer
    let t = m.transpose_view();
    println!("transpose is {}x{}, t[3, 0] = {}", t.nrows(), t.ncols(), t.get(3, 0)?);

    // Mutable views write through
    m.band_mut(0)?.fill(-1.0);
    m.column_view_mut(3)?.scale(10.0);
    m.sub_matrix_mut(0, 1, 0, 2)?.add_scalar(100.0);
    for i in 0..m.nrows() {
        println!("  {:?}", m.row_view(i)?.as_slice());
    }

    // Export paths
    let mut flat = vec![0.0; m.len()];
    m.get_elements(&mut flat, 0)?;
    println!("flat: {:?}", flat);
    println!("as bytes: {} bytes", m.as_bytes().len());

    Ok(())
}

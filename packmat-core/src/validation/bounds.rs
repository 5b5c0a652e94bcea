//! Element count and index bounds validation
//!
//! Pure arithmetic checks with no access to matrix storage. Every function is
//! `const` so the checks can run in constant contexts.

use crate::MatrixError;

/// Validate a requested shape and return its element count
///
/// Fails with `InvalidShape` if `nrows * ncols` overflows or exceeds the largest
/// allocation a slice of `f64` can address.
pub const fn element_count(nrows: usize, ncols: usize) -> Result<usize, MatrixError> {
    let count = match nrows.checked_mul(ncols) {
        Some(count) => count,
        None => return Err(MatrixError::InvalidShape { rows: nrows, cols: ncols }),
    };

    if count > isize::MAX as usize / core::mem::size_of::<f64>() {
        return Err(MatrixError::InvalidShape { rows: nrows, cols: ncols });
    }

    Ok(count)
}

/// Validate a single index against an exclusive bound
pub const fn check_index(index: usize, bound: usize) -> Result<(), MatrixError> {
    if index >= bound {
        return Err(MatrixError::out_of_bounds(index, bound));
    }
    Ok(())
}

/// Validate a `(row, col)` pair against a shape
pub const fn check_element(
    row: usize,
    col: usize,
    nrows: usize,
    ncols: usize,
) -> Result<(), MatrixError> {
    if col >= ncols {
        return Err(MatrixError::out_of_bounds(col, ncols));
    }
    if row >= nrows {
        return Err(MatrixError::out_of_bounds(row, nrows));
    }
    Ok(())
}

/// Validate a rectangular sub-region of an `nrows x ncols` matrix
///
/// The start corner must lie strictly inside the matrix and the end corner must
/// not pass its edge. Nothing is clipped.
pub const fn check_submatrix(
    row_start: usize,
    rows: usize,
    col_start: usize,
    cols: usize,
    nrows: usize,
    ncols: usize,
) -> Result<(), MatrixError> {
    if row_start >= nrows {
        return Err(MatrixError::out_of_bounds(row_start, nrows));
    }
    if col_start >= ncols {
        return Err(MatrixError::out_of_bounds(col_start, ncols));
    }

    match row_start.checked_add(rows) {
        Some(end) if end <= nrows => {}
        _ => return Err(MatrixError::out_of_bounds(row_start.saturating_add(rows), nrows)),
    }
    match col_start.checked_add(cols) {
        Some(end) if end <= ncols => {}
        _ => return Err(MatrixError::out_of_bounds(col_start.saturating_add(cols), ncols)),
    }

    Ok(())
}

/// Validate a band index: `-nrows <= band <= ncols`
pub const fn check_band(band: isize, nrows: usize, ncols: usize) -> Result<(), MatrixError> {
    let too_high = band > 0 && band.unsigned_abs() > ncols;
    let too_low = band < 0 && band.unsigned_abs() > nrows;
    if too_high {
        return Err(MatrixError::IndexOutOfBounds { index: band, bound: ncols });
    }
    if too_low {
        return Err(MatrixError::IndexOutOfBounds { index: band, bound: nrows });
    }
    Ok(())
}

/// Number of elements on band `band` of an `nrows x ncols` matrix
///
/// Band 0 is the main diagonal, positive bands lie above it and negative bands
/// below. Bands outside the matrix have length zero.
pub const fn band_length(nrows: usize, ncols: usize, band: isize) -> usize {
    let distance = band.unsigned_abs();
    if band >= 0 {
        if distance < ncols {
            min(nrows, ncols - distance)
        } else {
            0
        }
    } else if distance < nrows {
        min(nrows - distance, ncols)
    } else {
        0
    }
}

/// Offset of the first element of band `band` in packed row-major storage
pub const fn band_offset(ncols: usize, band: isize) -> usize {
    if band >= 0 {
        band.unsigned_abs()
    } else {
        band.unsigned_abs() * ncols
    }
}

/// Validate that `available` elements can hold `required` more starting at `offset`
pub const fn check_capacity(
    required: usize,
    offset: usize,
    available: usize,
) -> Result<(), MatrixError> {
    if offset > available || available - offset < required {
        return Err(MatrixError::InsufficientBuffer {
            required,
            available: available.saturating_sub(offset),
        });
    }
    Ok(())
}

const fn min(a: usize, b: usize) -> usize {
    if a < b {
        a
    } else {
        b
    }
}

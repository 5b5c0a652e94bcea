//! Closed-form offset mapping for dense and strided matrices
//!
//! A [`Layout`] describes where logical element `(row, col)` lives in a linear
//! buffer:
//!
//! ```text
//! offset(row, col) = base + row * row_stride + col * col_stride
//! ```
//!
//! Packed row-major storage is the special case `base = 0`, `row_stride = ncols`,
//! `col_stride = 1`. Transposing a layout swaps the shape and the two strides, which
//! is all a transpose view needs.

/// Offset and stride parameters for a 2-D window over a linear buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    /// Offset of element (0, 0)
    pub offset: usize,
    /// Number of rows
    pub nrows: usize,
    /// Number of columns
    pub ncols: usize,
    /// Distance between vertically adjacent elements
    pub row_stride: usize,
    /// Distance between horizontally adjacent elements
    pub col_stride: usize,
}

impl Layout {
    /// Packed row-major layout with no padding
    pub const fn row_major(nrows: usize, ncols: usize) -> Self {
        Self {
            offset: 0,
            nrows,
            ncols,
            row_stride: ncols,
            col_stride: 1,
        }
    }

    /// Packed column-major layout with no padding
    pub const fn column_major(nrows: usize, ncols: usize) -> Self {
        Self {
            offset: 0,
            nrows,
            ncols,
            row_stride: 1,
            col_stride: nrows,
        }
    }

    /// Linear offset of `(row, col)`
    ///
    /// No validation is performed; callers must ensure the indices are in range.
    #[inline(always)]
    pub const fn index(&self, row: usize, col: usize) -> usize {
        self.offset + row * self.row_stride + col * self.col_stride
    }

    /// Number of logical elements
    pub const fn len(&self) -> usize {
        self.nrows * self.ncols
    }

    /// Whether the window contains no elements
    pub const fn is_empty(&self) -> bool {
        self.nrows == 0 || self.ncols == 0
    }

    /// Layout with rows and columns exchanged over the same buffer
    pub const fn transpose(&self) -> Self {
        Self {
            offset: self.offset,
            nrows: self.ncols,
            ncols: self.nrows,
            row_stride: self.col_stride,
            col_stride: self.row_stride,
        }
    }

    /// Layout of a rectangular sub-window starting at `(row, col)`
    ///
    /// No validation is performed here; see
    /// [`check_submatrix`](crate::validation::check_submatrix).
    pub const fn window(&self, row: usize, nrows: usize, col: usize, ncols: usize) -> Self {
        Self {
            offset: self.index(row, col),
            nrows,
            ncols,
            row_stride: self.row_stride,
            col_stride: self.col_stride,
        }
    }

    /// Whether this is packed row-major storage of exactly `nrows * ncols` elements
    pub const fn is_packed(&self) -> bool {
        if self.offset != 0 {
            return false;
        }
        let cols_contiguous = self.col_stride == 1 || self.ncols <= 1;
        let rows_contiguous = self.row_stride == self.ncols || self.nrows <= 1;
        cols_contiguous && rows_contiguous
    }

    /// Offset of the last addressable `(row, col)`, or `None` on overflow
    ///
    /// An empty dimension still addresses index 0, so the rows of an `n x 0`
    /// window and the columns of a `0 x n` window have a start offset.
    pub const fn checked_last_index(&self) -> Option<usize> {
        let down = match self.nrows.saturating_sub(1).checked_mul(self.row_stride) {
            Some(down) => down,
            None => return None,
        };
        let across = match self.ncols.saturating_sub(1).checked_mul(self.col_stride) {
            Some(across) => across,
            None => return None,
        };
        match down.checked_add(across) {
            Some(span) => span.checked_add(self.offset),
            None => None,
        }
    }

    /// One past the largest offset touched by this layout, or `offset` when empty
    pub const fn extent(&self) -> usize {
        if self.is_empty() {
            self.offset
        } else {
            self.index(self.nrows - 1, self.ncols - 1) + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_index() {
        let layout = Layout::row_major(3, 4);
        assert_eq!(layout.index(0, 0), 0);
        assert_eq!(layout.index(1, 0), 4);
        assert_eq!(layout.index(2, 3), 11);
        assert_eq!(layout.extent(), 12);
        assert!(layout.is_packed());
    }

    #[test]
    fn test_checked_last_index() {
        assert_eq!(Layout::row_major(3, 4).checked_last_index(), Some(11));
        assert_eq!(Layout::row_major(0, 0).checked_last_index(), Some(0));

        let rows_only = Layout {
            offset: 2,
            nrows: 3,
            ncols: 0,
            row_stride: 5,
            col_stride: 1,
        };
        assert_eq!(rows_only.checked_last_index(), Some(12));

        let overflowing = Layout {
            row_stride: usize::MAX,
            ..rows_only
        };
        assert_eq!(overflowing.checked_last_index(), None);
    }

    #[test]
    fn test_transpose_swaps_strides() {
        let layout = Layout::row_major(2, 3);
        let t = layout.transpose();
        assert_eq!((t.nrows, t.ncols), (3, 2));
        assert_eq!(t.index(2, 1), layout.index(1, 2));
        assert_eq!(t, Layout::column_major(3, 2));
        assert!(!t.is_packed());
        assert_eq!(t.transpose(), layout);
    }

    #[test]
    fn test_window() {
        let layout = Layout::row_major(4, 5);
        let window = layout.window(1, 2, 2, 3);
        assert_eq!(window.offset, 7);
        assert_eq!(window.index(1, 2), layout.index(2, 4));
        assert_eq!(window.extent(), 15);
        assert!(!window.is_packed());
    }

    #[test]
    fn test_empty_layouts() {
        assert!(Layout::row_major(0, 3).is_empty());
        assert!(Layout::row_major(3, 0).is_packed());
        assert_eq!(Layout::row_major(0, 0).extent(), 0);
    }
}

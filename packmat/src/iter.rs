//! Row-major element traversal
//!
//! [`ElementIter`] walks any [`Layout`] over a borrowed buffer in logical
//! row-major order. Packed matrices, strided sub-matrices and transpose views all
//! share it.

use std::iter::FusedIterator;

use packmat_core::Layout;

/// Lazy, finite, single-pass iterator over the elements of a 2-D window
#[derive(Debug, Clone)]
pub struct ElementIter<'a> {
    data: &'a [f64],
    layout: Layout,
    row: usize,
    col: usize,
    remaining: usize,
}

impl<'a> ElementIter<'a> {
    /// Iterate `layout` over `data`
    ///
    /// # Panics
    ///
    /// Iteration panics if the layout reaches past the end of `data`; callers
    /// construct layouts that have already been validated against the buffer.
    pub fn new(data: &'a [f64], layout: Layout) -> Self {
        Self {
            data,
            layout,
            row: 0,
            col: 0,
            remaining: layout.len(),
        }
    }
}

impl Iterator for ElementIter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }

        let value = self.data[self.layout.index(self.row, self.col)];
        self.remaining -= 1;
        self.col += 1;
        if self.col == self.layout.ncols {
            self.col = 0;
            self.row += 1;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ElementIter<'_> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl FusedIterator for ElementIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_order() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let iter = ElementIter::new(&data, Layout::row_major(2, 3));
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.collect::<Vec<_>>(), data.to_vec());
    }

    #[test]
    fn test_transposed_order() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let layout = Layout::row_major(2, 3).transpose();
        let values: Vec<f64> = ElementIter::new(&data, layout).collect();
        assert_eq!(values, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_exhausted_stays_exhausted() {
        let data = [7.0];
        let mut iter = ElementIter::new(&data, Layout::row_major(1, 1));
        assert_eq!(iter.next(), Some(7.0));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_empty_shapes() {
        let data: [f64; 0] = [];
        assert_eq!(ElementIter::new(&data, Layout::row_major(0, 4)).count(), 0);
        assert_eq!(ElementIter::new(&data, Layout::row_major(4, 0)).count(), 0);
    }
}

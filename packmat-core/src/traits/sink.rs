//! Streaming export targets
//!
//! An [`ElementSink`] is a linear, append-only destination for matrix elements,
//! analogous to writing into a numeric buffer with a moving position.

use crate::validation::check_capacity;
use crate::Result;

/// Append-only destination for `f64` elements
pub trait ElementSink {
    /// Append all of `values`, or fail without writing anything
    fn put_slice(&mut self, values: &[f64]) -> Result<()>;

    /// Append one value
    fn put(&mut self, value: f64) -> Result<()> {
        self.put_slice(&[value])
    }
}

/// Cursor writing into a caller-owned slice
///
/// Fails with `InsufficientBuffer` once the remaining space is too small.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buffer: &'a mut [f64],
    position: usize,
}

impl<'a> SliceSink<'a> {
    /// Create a sink that starts writing at the beginning of `buffer`
    pub fn new(buffer: &'a mut [f64]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Create a sink that starts writing at `position`
    pub fn with_position(buffer: &'a mut [f64], position: usize) -> Result<Self> {
        check_capacity(0, position, buffer.len())?;
        Ok(Self { buffer, position })
    }

    /// Index of the next element to be written
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of elements that can still be written
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }
}

impl ElementSink for SliceSink<'_> {
    fn put_slice(&mut self, values: &[f64]) -> Result<()> {
        check_capacity(values.len(), self.position, self.buffer.len())?;
        let end = self.position + values.len();
        self.buffer[self.position..end].copy_from_slice(values);
        self.position = end;
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl ElementSink for alloc::vec::Vec<f64> {
    fn put_slice(&mut self, values: &[f64]) -> Result<()> {
        self.extend_from_slice(values);
        Ok(())
    }
}

impl<S: ElementSink + ?Sized> ElementSink for &mut S {
    fn put_slice(&mut self, values: &[f64]) -> Result<()> {
        (**self).put_slice(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixError;

    #[test]
    fn test_slice_sink_advances() {
        let mut buffer = [0.0; 5];
        let mut sink = SliceSink::new(&mut buffer);
        sink.put_slice(&[1.0, 2.0]).unwrap();
        sink.put(3.0).unwrap();
        assert_eq!(sink.position(), 3);
        assert_eq!(sink.remaining(), 2);
        assert_eq!(buffer, [1.0, 2.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_slice_sink_overflow_writes_nothing() {
        let mut buffer = [0.0; 3];
        let mut sink = SliceSink::with_position(&mut buffer, 2).unwrap();
        assert_eq!(
            sink.put_slice(&[1.0, 2.0]),
            Err(MatrixError::InsufficientBuffer {
                required: 2,
                available: 1
            })
        );
        assert_eq!(sink.position(), 2);
        assert_eq!(buffer, [0.0; 3]);
    }

    #[test]
    fn test_slice_sink_bad_start() {
        let mut buffer = [0.0; 3];
        assert!(SliceSink::with_position(&mut buffer, 4).is_err());
    }
}

//! Shaped views over caller-owned sample buffers
//!
//! Hosts hand tables and pixel rows over as flat, row-major buffers plus a
//! shape. The views here carry the shape so that builders and evaluators can
//! check dimensionality before touching the data.

use crate::{Error, Result};

fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

fn check_len(shape: &[usize], len: usize) -> Result<()> {
    let expected = element_count(shape);
    if expected != len {
        return Err(Error::BufferSize {
            expected,
            actual: len,
        });
    }
    Ok(())
}

fn flat_index(shape: &[usize], index: &[usize]) -> Option<usize> {
    if index.len() != shape.len() {
        return None;
    }
    let mut flat = 0usize;
    for (&i, &extent) in index.iter().zip(shape) {
        if i >= extent {
            return None;
        }
        flat = flat * extent + i;
    }
    Some(flat)
}

/// Read-only row-major N-dimensional view
#[derive(Debug, Clone)]
pub struct ArrayView<'a, T> {
    data: &'a [T],
    shape: Vec<usize>,
}

impl<'a, T: Copy> ArrayView<'a, T> {
    /// Create a view; `data.len()` must equal the product of `shape`
    pub fn new(data: &'a [T], shape: &[usize]) -> Result<Self> {
        check_len(shape, data.len())?;
        Ok(Self {
            data,
            shape: shape.to_vec(),
        })
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Extent of every dimension
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Underlying flat buffer
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Element at a full multi-dimensional index
    pub fn get(&self, index: &[usize]) -> Option<T> {
        flat_index(&self.shape, index).map(|i| self.data[i])
    }

    /// Row `i` of a 2-D view
    pub fn row(&self, i: usize) -> &'a [T] {
        let cols = self.shape[1];
        &self.data[i * cols..(i + 1) * cols]
    }

    /// Column `j` of a 2-D view, copied into a contiguous vector
    pub fn column(&self, j: usize) -> Vec<T> {
        let cols = self.shape[1];
        self.data.iter().skip(j).step_by(cols).copied().collect()
    }
}

impl<'a, T: bytemuck::Pod> ArrayView<'a, T> {
    /// View raw bytes (native endianness) as elements of `T`
    pub fn from_bytes(bytes: &'a [u8], shape: &[usize]) -> Result<Self> {
        let data: &[T] =
            bytemuck::try_cast_slice(bytes).map_err(|e| Error::BufferCast(format!("{e:?}")))?;
        Self::new(data, shape)
    }
}

/// Mutable row-major N-dimensional view
#[derive(Debug)]
pub struct ArrayViewMut<'a, T> {
    data: &'a mut [T],
    shape: Vec<usize>,
}

impl<'a, T: Copy> ArrayViewMut<'a, T> {
    /// Create a view; `data.len()` must equal the product of `shape`
    pub fn new(data: &'a mut [T], shape: &[usize]) -> Result<Self> {
        check_len(shape, data.len())?;
        Ok(Self {
            data,
            shape: shape.to_vec(),
        })
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Extent of every dimension
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Underlying flat buffer
    pub fn as_slice(&self) -> &[T] {
        &*self.data
    }

    /// Element at a full multi-dimensional index
    pub fn get(&self, index: &[usize]) -> Option<T> {
        flat_index(&self.shape, index).map(|i| self.data[i])
    }

    /// Mutable row `i` of a 2-D view
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        let cols = self.shape[1];
        &mut self.data[i * cols..(i + 1) * cols]
    }
}

impl<'a, T: bytemuck::Pod> ArrayViewMut<'a, T> {
    /// View raw bytes (native endianness) as elements of `T`
    pub fn from_bytes(bytes: &'a mut [u8], shape: &[usize]) -> Result<Self> {
        let data: &mut [T] = bytemuck::try_cast_slice_mut(bytes)
            .map_err(|e| Error::BufferCast(format!("{e:?}")))?;
        Self::new(data, shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_shape_and_index() {
        let data: Vec<u16> = (0..24).collect();
        let view = ArrayView::new(&data, &[2, 3, 4]).unwrap();

        assert_eq!(view.ndim(), 3);
        assert_eq!(view.shape(), &[2, 3, 4]);
        assert_eq!(view.get(&[0, 0, 0]), Some(0));
        assert_eq!(view.get(&[1, 2, 3]), Some(23));
        assert_eq!(view.get(&[1, 0, 2]), Some(14));
        assert_eq!(view.get(&[2, 0, 0]), None);
        assert_eq!(view.get(&[0, 0]), None);
    }

    #[test]
    fn test_view_rejects_wrong_length() {
        let data = [0u16; 5];
        let err = ArrayView::new(&data, &[2, 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSize {
                expected: 6,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_rows_and_columns() {
        let data = [1u16, 2, 3, 4, 5, 6];
        let view = ArrayView::new(&data, &[3, 2]).unwrap();
        assert_eq!(view.row(1), &[3, 4]);
        assert_eq!(view.column(0), vec![1, 3, 5]);
        assert_eq!(view.column(1), vec![2, 4, 6]);
    }

    #[test]
    fn test_view_from_bytes() {
        let values = [1u16, 2, 3, 65535];
        let bytes: &[u8] = bytemuck::cast_slice(&values);
        let view = ArrayView::<u16>::from_bytes(bytes, &[2, 2]).unwrap();
        assert_eq!(view.get(&[1, 1]), Some(65535));

        // Odd byte count cannot be viewed as u16
        assert!(ArrayView::<u16>::from_bytes(&bytes[..3], &[1]).is_err());
    }

    #[test]
    fn test_mut_view_rows() {
        let mut data = [0u16; 6];
        let mut view = ArrayViewMut::new(&mut data, &[2, 3]).unwrap();
        view.row_mut(1).copy_from_slice(&[7, 8, 9]);
        assert_eq!(view.get(&[1, 2]), Some(9));
        assert_eq!(data, [0, 0, 0, 7, 8, 9]);
    }
}

//! Dense 2-D array views over borrowed slices.
//!
//! This module provides `DenseView` and `DenseViewMut`, non-owning
//! descriptions of how to read a slice as a matrix (shape, element strides,
//! starting offset), and `DenseArray`, the owned row-major buffer engines
//! allocate for temporaries.
//!
//! Key features:
//! - Zero-copy construction over caller buffers
//! - Arbitrary (including negative) strides, validated once against the slice
//! - Zero-copy transpose (`t`) by swapping shape and strides
//! - Row-major contiguity queries

use crate::{BlasError, Result};
use num_traits::Zero;

/// An immutable 2-D strided view over a slice.
///
/// # Example
/// ```
/// use strided_blas::DenseView;
///
/// // Column-major 2x3 matrix
/// let data = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
/// let view = DenseView::new(&data, [2, 3], [1, 2], 0).unwrap();
/// assert_eq!(view.get([1, 2]), 6.0);
/// assert_eq!(view.t().get([2, 1]), 6.0);
/// ```
#[derive(Debug)]
pub struct DenseView<'a, T> {
    data: &'a [T],
    size: [usize; 2],
    strides: [isize; 2],
    offset: usize,
}

impl<T> Clone for DenseView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DenseView<'_, T> {}

/// A mutable 2-D strided view over a slice.
///
/// Same as `DenseView` but allows writes through the view.
#[derive(Debug)]
pub struct DenseViewMut<'a, T> {
    data: &'a mut [T],
    size: [usize; 2],
    strides: [isize; 2],
    offset: usize,
}

impl<'a, T> DenseView<'a, T> {
    /// Create a new view.
    ///
    /// # Arguments
    /// - `data`: The backing slice
    /// - `size`: `[rows, cols]`
    /// - `strides`: Stride of each dimension, in elements (may be negative)
    /// - `offset`: Position of element `[0, 0]` in `data`
    ///
    /// # Errors
    /// Returns an error if any element of the view falls outside `data`.
    pub fn new(
        data: &'a [T],
        size: [usize; 2],
        strides: [isize; 2],
        offset: usize,
    ) -> Result<Self> {
        validate_bounds(data.len(), &size, &strides, offset)?;
        Ok(Self {
            data,
            size,
            strides,
            offset,
        })
    }

    #[inline]
    pub fn size(&self) -> &[usize; 2] {
        &self.size
    }

    #[inline]
    pub fn strides(&self) -> &[isize; 2] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.size[0]
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.size[1]
    }

    /// Total number of logical elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.size[0] * self.size[1]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.contains(&0)
    }

    /// The backing slice (not just the viewed elements).
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Raw pointer to element `[0, 0]`, for handing the view to a kernel library.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr().wrapping_add(self.offset)
    }

    /// Transpose (swap dimensions).
    ///
    /// This is a zero-copy operation that just swaps size and strides.
    #[inline]
    pub fn t(self) -> DenseView<'a, T> {
        DenseView {
            data: self.data,
            size: [self.size[1], self.size[0]],
            strides: [self.strides[1], self.strides[0]],
            offset: self.offset,
        }
    }

    /// Check if the view is contiguous in row-major (C) order.
    pub fn is_contiguous(&self) -> bool {
        is_row_major_contiguous(&self.size, &self.strides)
    }

    #[inline]
    fn linear_index(&self, indices: [usize; 2]) -> usize {
        linear_index(self.offset, &self.strides, indices)
    }
}

impl<T: Copy> DenseView<'_, T> {
    /// Get the element at `[row, col]`.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, indices: [usize; 2]) -> T {
        assert!(
            indices[0] < self.size[0] && indices[1] < self.size[1],
            "index out of bounds"
        );
        self.data[self.linear_index(indices)]
    }
}

impl<'a, T> DenseViewMut<'a, T> {
    /// Create a new mutable view. Bounds are validated as in [`DenseView::new`].
    pub fn new(
        data: &'a mut [T],
        size: [usize; 2],
        strides: [isize; 2],
        offset: usize,
    ) -> Result<Self> {
        validate_bounds(data.len(), &size, &strides, offset)?;
        Ok(Self {
            data,
            size,
            strides,
            offset,
        })
    }

    #[inline]
    pub fn size(&self) -> &[usize; 2] {
        &self.size
    }

    #[inline]
    pub fn strides(&self) -> &[isize; 2] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size[0] * self.size[1]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.contains(&0)
    }

    /// Mutable raw pointer to element `[0, 0]`.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr().wrapping_add(self.offset)
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }

    /// Reborrow as an immutable view.
    #[inline]
    pub fn as_view(&self) -> DenseView<'_, T> {
        DenseView {
            data: &*self.data,
            size: self.size,
            strides: self.strides,
            offset: self.offset,
        }
    }

    /// Reborrow mutably for a shorter lifetime.
    #[inline]
    pub fn reborrow(&mut self) -> DenseViewMut<'_, T> {
        DenseViewMut {
            data: &mut *self.data,
            size: self.size,
            strides: self.strides,
            offset: self.offset,
        }
    }

    /// Zero-copy transpose.
    #[inline]
    pub fn t(self) -> DenseViewMut<'a, T> {
        DenseViewMut {
            data: self.data,
            size: [self.size[1], self.size[0]],
            strides: [self.strides[1], self.strides[0]],
            offset: self.offset,
        }
    }

    pub fn is_contiguous(&self) -> bool {
        is_row_major_contiguous(&self.size, &self.strides)
    }
}

impl<T: Copy> DenseViewMut<'_, T> {
    #[inline]
    pub fn get(&self, indices: [usize; 2]) -> T {
        assert!(
            indices[0] < self.size[0] && indices[1] < self.size[1],
            "index out of bounds"
        );
        self.data[linear_index(self.offset, &self.strides, indices)]
    }

    #[inline]
    pub fn set(&mut self, indices: [usize; 2], value: T) {
        assert!(
            indices[0] < self.size[0] && indices[1] < self.size[1],
            "index out of bounds"
        );
        let idx = linear_index(self.offset, &self.strides, indices);
        self.data[idx] = value;
    }
}

// ============================================================================
// DenseArray
// ============================================================================

/// Owned row-major matrix, used for temporaries produced by a
/// [`MatMulEngine`](crate::MatMulEngine).
#[derive(Debug, Clone, PartialEq)]
pub struct DenseArray<T> {
    data: Vec<T>,
    size: [usize; 2],
}

impl<T: Zero + Clone> DenseArray<T> {
    /// Zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            size: [rows, cols],
        }
    }
}

impl<T> DenseArray<T> {
    /// Wrap an existing row-major buffer.
    pub fn from_vec(data: Vec<T>, size: [usize; 2]) -> Result<Self> {
        let required = size[0] * size[1];
        if data.len() != required {
            return Err(BlasError::ShapeMismatch(vec![data.len()], size.to_vec()));
        }
        Ok(Self { data, size })
    }

    #[inline]
    pub fn size(&self) -> &[usize; 2] {
        &self.size
    }

    #[inline]
    pub fn strides(&self) -> [isize; 2] {
        [self.size[1] as isize, 1]
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn view(&self) -> DenseView<'_, T> {
        DenseView {
            data: &self.data,
            size: self.size,
            strides: self.strides(),
            offset: 0,
        }
    }

    pub fn view_mut(&mut self) -> DenseViewMut<'_, T> {
        let strides = self.strides();
        DenseViewMut {
            data: &mut self.data,
            size: self.size,
            strides,
            offset: 0,
        }
    }
}

impl<T: Copy> DenseArray<T> {
    #[inline]
    pub fn get(&self, indices: [usize; 2]) -> T {
        self.view().get(indices)
    }
}

// ============================================================================
// Helper functions
// ============================================================================

#[inline]
fn linear_index(offset: usize, strides: &[isize; 2], indices: [usize; 2]) -> usize {
    let idx = offset as isize + indices[0] as isize * strides[0] + indices[1] as isize * strides[1];
    idx as usize
}

/// Validate that every addressed element lies within `[0, len)`.
fn validate_bounds(
    len: usize,
    size: &[usize; 2],
    strides: &[isize; 2],
    offset: usize,
) -> Result<()> {
    // Empty view - nothing is ever addressed
    if size.contains(&0) {
        return Ok(());
    }
    let mut min_offset = isize::try_from(offset).map_err(|_| BlasError::OffsetOverflow)?;
    let mut max_offset = min_offset;
    for (&dim, &stride) in size.iter().zip(strides.iter()) {
        if dim > 1 {
            let end = stride
                .checked_mul(dim as isize - 1)
                .ok_or(BlasError::OffsetOverflow)?;
            if end >= 0 {
                max_offset = max_offset
                    .checked_add(end)
                    .ok_or(BlasError::OffsetOverflow)?;
            } else {
                min_offset = min_offset
                    .checked_add(end)
                    .ok_or(BlasError::OffsetOverflow)?;
            }
        }
    }
    if min_offset < 0 {
        return Err(BlasError::OffsetOverflow);
    }
    let required = max_offset as usize + 1;
    if required > len {
        return Err(BlasError::BufferTooSmall { required, len });
    }
    Ok(())
}

pub(crate) fn is_row_major_contiguous(size: &[usize; 2], strides: &[isize; 2]) -> bool {
    let mut expected = 1isize;
    for i in (0..2).rev() {
        if size[i] <= 1 {
            continue;
        }
        if strides[i] != expected {
            return false;
        }
        expected *= size[i] as isize;
    }
    true
}

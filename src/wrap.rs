//! Zero-copy wrapping of BLAS buffers as dense views.
//!
//! BLAS callers hand over column-major buffers described by a shape and a
//! leading dimension. By default a buffer is read Fortran-style: element
//! `(i, j)` of an `nrow x ncol` matrix lives at `i + j*LD`. When transposed,
//! the same memory is read C-style with the dimensions reversed, which is the
//! column-major matrix's transpose. Either way only strides change; no data
//! is ever moved.

use crate::view::{DenseView, DenseViewMut};
use crate::{BlasError, Result};

/// BLAS transpose operation flag.
///
/// Only real element types are supported, so the conjugate transpose `'C'`
/// collapses onto [`Trans::Trans`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trans {
    /// No transpose (`'N'`).
    NoTrans,
    /// Transpose (`'T'`, or `'C'` for real types).
    Trans,
}

impl Trans {
    /// Parse a BLAS transpose character for `routine`.
    pub fn parse(routine: &'static str, flag: char) -> Result<Self> {
        match flag {
            'N' | 'n' => Ok(Trans::NoTrans),
            'T' | 't' | 'C' | 'c' => Ok(Trans::Trans),
            _ => Err(BlasError::InvalidTranspose { routine, flag }),
        }
    }

    #[inline]
    pub fn is_trans(self) -> bool {
        self == Trans::Trans
    }

    /// Convert to the canonical BLAS character.
    pub fn to_char(self) -> char {
        match self {
            Trans::NoTrans => 'N',
            Trans::Trans => 'T',
        }
    }
}

/// Shape and element strides of a wrapped `nrow x ncol` buffer.
#[inline]
fn op_layout(to_transpose: bool, nrow: usize, ncol: usize, ld: usize) -> ([usize; 2], [isize; 2]) {
    let ld = ld as isize;
    if to_transpose {
        ([ncol, nrow], [ld, 1])
    } else {
        ([nrow, ncol], [1, ld])
    }
}

/// Wrap a read-only column-major buffer, optionally as its transpose.
///
/// The result has shape `(nrow, ncol)` and strides `(1, ld)`, or shape
/// `(ncol, nrow)` and strides `(ld, 1)` when `to_transpose` is set.
pub fn op<T>(
    to_transpose: bool,
    data: &[T],
    nrow: usize,
    ncol: usize,
    ld: usize,
) -> Result<DenseView<'_, T>> {
    let (size, strides) = op_layout(to_transpose, nrow, ncol, ld);
    DenseView::new(data, size, strides, 0)
}

/// Writable counterpart of [`op`].
pub fn op_mut<T>(
    to_transpose: bool,
    data: &mut [T],
    nrow: usize,
    ncol: usize,
    ld: usize,
) -> Result<DenseViewMut<'_, T>> {
    let (size, strides) = op_layout(to_transpose, nrow, ncol, ld);
    DenseViewMut::new(data, size, strides, 0)
}

/// Writable Fortran-order view of an output matrix such as GEMM's `C`.
#[inline]
pub fn fortran_mut<T>(
    data: &mut [T],
    nrow: usize,
    ncol: usize,
    ld: usize,
) -> Result<DenseViewMut<'_, T>> {
    op_mut(false, data, nrow, ncol, ld)
}

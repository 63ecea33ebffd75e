//! BLAS-compatible dense kernels built on strided array views.
//!
//! This crate is a software fallback for three reference-BLAS routines, used
//! when no optimized BLAS library is available:
//!
//! - [`gemm`](level3::gemm): `C = alpha * op(A) * op(B) + beta * C`
//! - [`gemv`](level2::gemv): `y = alpha * op(A) * x + beta * y`
//! - [`dot`](level1::dot): `x · y`
//!
//! The routines accept the conventional BLAS argument list (column-major
//! buffers, leading dimensions, increments, transpose characters) and are
//! implemented entirely in terms of zero-copy strided views plus a single
//! matrix-product primitive, [`MatMulEngine`]. The product only writes
//! row-major (C-contiguous) outputs, so GEMM computes `op(B)^T · op(A)^T`
//! through transposed views and reads the result back as the column-major
//! `op(A) · op(B)`.
//!
//! # Core Types
//!
//! - [`DenseView`] / [`DenseViewMut`]: non-owning 2-D views over borrowed slices
//! - [`DenseArray`]: owned row-major scratch buffer returned by engines
//! - [`MatMulEngine`]: the matrix-product primitive ([`FaerEngine`], [`NaiveEngine`])
//! - [`Blas`]: driver facade bound to an engine
//!
//! # Example
//!
//! ```rust
//! use strided_blas::dgemm;
//!
//! // Column-major A = [[1, 2], [3, 4]], B = [[5, 6], [7, 8]]
//! let a = [1.0, 3.0, 2.0, 4.0];
//! let b = [5.0, 7.0, 6.0, 8.0];
//! let mut c = [0.0; 4];
//!
//! dgemm('N', 'N', 2, 2, 2, 1.0, &a, 2, &b, 2, 0.0, &mut c, 2).unwrap();
//! assert_eq!(c, [19.0, 43.0, 22.0, 50.0]);
//! ```

mod blas;
mod engine;
pub mod fatal;
#[cfg(feature = "ffi")]
pub mod ffi;
mod kernel;
pub mod level1;
pub mod level2;
pub mod level3;
mod ops;
mod scalar;
pub mod view;
pub mod wrap;

// ============================================================================
// Drivers
// ============================================================================
pub use blas::{ddot, dgemm, dgemv, sdot, sgemm, sgemv, Blas};

// ============================================================================
// Matrix-product primitive
// ============================================================================
#[cfg(feature = "faer")]
pub use engine::FaerEngine;
pub use engine::{DefaultEngine, MatMulEngine, NaiveEngine};

// ============================================================================
// Views and element-wise operations
// ============================================================================
pub use ops::{copy_into, extended_sum_inplace, scale_inplace};
pub use scalar::{Real, Scalar};
pub use view::{DenseArray, DenseView, DenseViewMut};
pub use wrap::Trans;

// ============================================================================
// Error types
// ============================================================================

/// Errors raised by the BLAS drivers and the view machinery beneath them.
#[derive(Debug, thiserror::Error)]
pub enum BlasError {
    /// A dimension, leading dimension or increment was negative.
    #[error("the integer arguments passed to {routine} must all be at least 0")]
    NegativeArgument { routine: &'static str },

    /// Transpose flag outside `N`, `T`, `C` (either case).
    #[error("{routine}: invalid transpose flag {flag:?}")]
    InvalidTranspose { routine: &'static str, flag: char },

    /// An empty matrix was paired with a non-empty output vector.
    #[error("{routine}: the output vector should be empty, got length {len}")]
    NonEmptyOutput { routine: &'static str, len: usize },

    /// A view would address memory past the end of its backing slice.
    #[error("view needs {required} elements but the buffer holds {len}")]
    BufferTooSmall { required: usize, len: usize },

    /// Integer overflow or a negative position while computing an offset.
    #[error("offset overflow while computing pointer")]
    OffsetOverflow,

    /// Operand shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// The matrix product was asked to write a non row-major output.
    #[error("product output must be C-contiguous, got dims {dims:?} strides {strides:?}")]
    NonContiguousOutput { dims: [usize; 2], strides: [isize; 2] },

    /// A failure inside one sub-step of a driver.
    #[error("{routine}: unable to {step}")]
    Step {
        routine: &'static str,
        step: &'static str,
        #[source]
        source: Box<BlasError>,
    },
}

impl BlasError {
    /// Routine name attached to this error, if any.
    pub fn routine(&self) -> Option<&'static str> {
        match self {
            BlasError::NegativeArgument { routine }
            | BlasError::InvalidTranspose { routine, .. }
            | BlasError::NonEmptyOutput { routine, .. }
            | BlasError::Step { routine, .. } => Some(*routine),
            _ => None,
        }
    }
}

/// Result type for BLAS operations.
pub type Result<T> = std::result::Result<T, BlasError>;

/// Attach the failing driver sub-step to an error.
pub(crate) trait StepContext<T> {
    fn step(self, routine: &'static str, step: &'static str) -> Result<T>;
}

impl<T> StepContext<T> for Result<T> {
    #[inline]
    fn step(self, routine: &'static str, step: &'static str) -> Result<T> {
        self.map_err(|source| BlasError::Step {
            routine,
            step,
            source: Box::new(source),
        })
    }
}

/// Convert BLAS integer arguments to sizes, rejecting negatives.
pub(crate) fn non_negative<const N: usize>(
    routine: &'static str,
    args: [i32; N],
) -> Result<[usize; N]> {
    let mut out = [0usize; N];
    for (dst, &arg) in out.iter_mut().zip(args.iter()) {
        *dst = usize::try_from(arg).map_err(|_| BlasError::NegativeArgument { routine })?;
    }
    Ok(out)
}

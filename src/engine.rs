//! The matrix-product primitive the BLAS drivers are written against.
//!
//! Every driver reduces its work to one call of [`MatMulEngine::matmul`] or
//! [`MatMulEngine::matmul_into`] plus element-wise reconciliation. Engines
//! only ever write row-major (C-contiguous) outputs.
//!
//! Two engines are provided:
//! - [`FaerEngine`] (feature `faer`, the default): SIMD kernels from faer
//! - [`NaiveEngine`]: a plain triple loop with no external dependency
//!
//! [`DefaultEngine`] is the single point of engine selection.

use crate::view::{DenseArray, DenseView, DenseViewMut};
use crate::{BlasError, Result};
use num_traits::Zero;
use std::ops::{Add, Mul};

/// A dense matrix-product primitive.
///
/// Inputs may have arbitrary strides; outputs must be C-contiguous.
/// Implementations outside this crate (instrumented or accelerated engines)
/// can be handed to [`Blas::with_engine`](crate::Blas::with_engine).
pub trait MatMulEngine<T: Copy + Zero> {
    /// Allocate a zero-filled, C-contiguous `rows x cols` matrix.
    fn alloc(&self, rows: usize, cols: usize) -> Result<DenseArray<T>> {
        Ok(DenseArray::zeros(rows, cols))
    }

    /// Compute `out = a * b`, overwriting `out`.
    ///
    /// # Errors
    /// - [`BlasError::ShapeMismatch`] if `a` is `m x k`, `b` is not `k x n`,
    ///   or `out` is not `m x n`
    /// - [`BlasError::NonContiguousOutput`] if `out` is not row-major
    ///   contiguous
    fn matmul_into(
        &self,
        a: &DenseView<'_, T>,
        b: &DenseView<'_, T>,
        out: &mut DenseViewMut<'_, T>,
    ) -> Result<()>;

    /// Compute `a * b` into a freshly allocated matrix.
    fn matmul(&self, a: &DenseView<'_, T>, b: &DenseView<'_, T>) -> Result<DenseArray<T>> {
        let mut out = self.alloc(a.nrows(), b.ncols())?;
        self.matmul_into(a, b, &mut out.view_mut())?;
        Ok(out)
    }
}

/// Validate operand shapes and output layout, returning `[m, k, n]`.
pub(crate) fn check_product<T>(
    a: &DenseView<'_, T>,
    b: &DenseView<'_, T>,
    out: &DenseViewMut<'_, T>,
) -> Result<[usize; 3]> {
    let [m, k] = *a.size();
    let [kb, n] = *b.size();
    if k != kb {
        return Err(BlasError::ShapeMismatch(a.size().to_vec(), b.size().to_vec()));
    }
    if out.size() != &[m, n] {
        return Err(BlasError::ShapeMismatch(vec![m, n], out.size().to_vec()));
    }
    if !out.is_contiguous() {
        return Err(BlasError::NonContiguousOutput {
            dims: *out.size(),
            strides: *out.strides(),
        });
    }
    Ok([m, k, n])
}

// ---------------------------------------------------------------------------
// NaiveEngine
// ---------------------------------------------------------------------------

/// Triple-loop engine with no external dependency.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveEngine;

impl<T> MatMulEngine<T> for NaiveEngine
where
    T: Copy + Zero + Add<Output = T> + Mul<Output = T>,
{
    fn matmul_into(
        &self,
        a: &DenseView<'_, T>,
        b: &DenseView<'_, T>,
        out: &mut DenseViewMut<'_, T>,
    ) -> Result<()> {
        let [m, k, n] = check_product(a, b, out)?;
        let (a_data, [a_rs, a_cs], a_off) = (a.data(), *a.strides(), a.offset() as isize);
        let (b_data, [b_rs, b_cs], b_off) = (b.data(), *b.strides(), b.offset() as isize);
        let [c_rs, c_cs] = *out.strides();
        let c_off = out.offset() as isize;
        let c_data = out.data_mut();

        for i in 0..m {
            let a_row = a_off + i as isize * a_rs;
            for j in 0..n {
                let b_col = b_off + j as isize * b_cs;
                let mut acc = T::zero();
                for p in 0..k {
                    let av = a_data[(a_row + p as isize * a_cs) as usize];
                    let bv = b_data[(b_col + p as isize * b_rs) as usize];
                    acc = acc + av * bv;
                }
                c_data[(c_off + i as isize * c_rs + j as isize * c_cs) as usize] = acc;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FaerEngine
// ---------------------------------------------------------------------------

/// Engine backed by `faer::linalg::matmul`.
///
/// Strided inputs are handed to faer as-is; no operand is copied.
#[cfg(feature = "faer")]
#[derive(Debug, Clone, Copy)]
pub struct FaerEngine {
    par: faer::Par,
}

#[cfg(feature = "faer")]
impl Default for FaerEngine {
    fn default() -> Self {
        Self {
            par: faer::Par::Seq,
        }
    }
}

#[cfg(feature = "faer")]
impl FaerEngine {
    /// Sequential faer engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine using the given faer parallelism setting.
    pub fn with_par(par: faer::Par) -> Self {
        Self { par }
    }

    pub fn par(&self) -> faer::Par {
        self.par
    }
}

#[cfg(feature = "faer")]
impl<T> MatMulEngine<T> for FaerEngine
where
    T: crate::Scalar,
{
    fn matmul_into(
        &self,
        a: &DenseView<'_, T>,
        b: &DenseView<'_, T>,
        out: &mut DenseViewMut<'_, T>,
    ) -> Result<()> {
        use faer::linalg::matmul::matmul_with_conj;
        use faer::mat::{MatMut, MatRef};
        use faer::{Accum, Conj};

        let [m, k, n] = check_product(a, b, out)?;
        if m == 0 || n == 0 {
            return Ok(());
        }
        if k == 0 {
            crate::ops::fill(out, <T as Zero>::zero())?;
            return Ok(());
        }

        let [a_rs, a_cs] = *a.strides();
        let [b_rs, b_cs] = *b.strides();
        let [c_rs, c_cs] = *out.strides();
        let c_ptr = out.as_mut_ptr();

        // SAFETY: all three views were bounds-checked against their slices on
        // construction, and `out` is borrowed mutably so it cannot alias `a`
        // or `b`.
        unsafe {
            let a_mat: MatRef<'_, T> = MatRef::from_raw_parts(a.as_ptr(), m, k, a_rs, a_cs);
            let b_mat: MatRef<'_, T> = MatRef::from_raw_parts(b.as_ptr(), k, n, b_rs, b_cs);
            let c_mat: MatMut<'_, T> = MatMut::from_raw_parts_mut(c_ptr, m, n, c_rs, c_cs);
            matmul_with_conj(
                c_mat,
                Accum::Replace,
                a_mat,
                Conj::No,
                b_mat,
                Conj::No,
                <T as num_traits::One>::one(),
                self.par,
            );
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DefaultEngine type alias
// ---------------------------------------------------------------------------

/// The engine used by the precision-specific free functions.
///
/// - `faer` enabled -> [`FaerEngine`]
/// - otherwise -> [`NaiveEngine`]
#[cfg(feature = "faer")]
pub type DefaultEngine = FaerEngine;

#[cfg(not(feature = "faer"))]
pub type DefaultEngine = NaiveEngine;

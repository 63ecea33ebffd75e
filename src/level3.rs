//! Level 3: general matrix-matrix multiply.
//!
//! `C = alpha * op(A) * op(B) + beta * C` over column-major buffers.
//!
//! The engine only writes row-major outputs, so the driver asks it for
//! `op(B)^T · op(A)^T` (an `N x M` product). Read back column-major, that
//! buffer is exactly `op(A) · op(B)`. Both transposes are stride swaps made by
//! [`op`](crate::wrap::op); no operand is ever copied.

use crate::engine::MatMulEngine;
use crate::ops::{copy_into, extended_sum_inplace, scale_inplace};
use crate::scalar::Real;
use crate::view::DenseViewMut;
use crate::wrap::{fortran_mut, op, Trans};
use crate::{non_negative, Result, StepContext};

/// General matrix-matrix multiply: `C = alpha * op(A) * op(B) + beta * C`.
///
/// `op(A)` is `M x K`, `op(B)` is `K x N` and `C` is `M x N`, all stored
/// column-major with leading dimensions `lda`, `ldb`, `ldc`.
///
/// When `beta == 0` `C` is never read, so NaNs in it do not propagate.
///
/// # Errors
/// - [`NegativeArgument`](crate::BlasError::NegativeArgument) if any of
///   `m, n, k, lda, ldb, ldc` is negative
/// - [`InvalidTranspose`](crate::BlasError::InvalidTranspose) for an unknown
///   transpose flag, unless `m` or `n` is zero
/// - [`Step`](crate::BlasError::Step) wrapping a failure to wrap a buffer
///   (too small for its shape and leading dimension) or a failure of the
///   engine
#[allow(clippy::too_many_arguments)]
pub fn gemm<T, E>(
    engine: &E,
    trans_a: char,
    trans_b: char,
    m: i32,
    n: i32,
    k: i32,
    alpha: T,
    a: &[T],
    lda: i32,
    b: &[T],
    ldb: i32,
    beta: T,
    c: &mut [T],
    ldc: i32,
) -> Result<()>
where
    T: Real,
    E: MatMulEngine<T> + ?Sized,
{
    let routine = T::GEMM;
    let [m, n, k, lda, ldb, ldc] = non_negative(routine, [m, n, k, lda, ldb, ldc])?;
    log::trace!(
        "{routine}(trans_a={trans_a:?}, trans_b={trans_b:?}, m={m}, n={n}, k={k}, \
         lda={lda}, ldb={ldb}, ldc={ldc})"
    );

    // C holds M*N == 0 elements. The flags are not parsed on this path.
    if m == 0 || n == 0 {
        return Ok(());
    }

    let trans_a = Trans::parse(routine, trans_a)?;
    let trans_b = Trans::parse(routine, trans_b)?;

    // Stored shapes of A and B.
    let (nrow_a, ncol_a) = if trans_a.is_trans() { (k, m) } else { (m, k) };
    let (nrow_b, ncol_b) = if trans_b.is_trans() { (n, k) } else { (k, n) };

    let op_a_t = op(!trans_a.is_trans(), a, nrow_a, ncol_a, lda).step(routine, "wrap A")?;
    let op_b_t = op(!trans_b.is_trans(), b, nrow_b, ncol_b, ldb).step(routine, "wrap B")?;

    let beta_zero = beta == T::zero();
    let alpha_one = alpha == T::one();

    if beta_zero && ldc == m {
        // C is write-only and packed: it can take the N x M product directly.
        log::debug!("{routine}: computing op(A)*op(B) directly in C");
        let mut product = DenseViewMut::new(c, [n, m], [ldc as isize, 1], 0)
            .step(routine, "wrap C as product buffer")?;
        engine
            .matmul_into(&op_b_t, &op_a_t, &mut product)
            .step(routine, "compute matrix product")?;
        if !alpha_one {
            scale_inplace(alpha, &mut product).step(routine, "scale product by ALPHA")?;
        }
        return Ok(());
    }

    let mut product = engine
        .matmul(&op_b_t, &op_a_t)
        .step(routine, "compute matrix product")?;
    let mut matrix_c = fortran_mut(c, m, n, ldc).step(routine, "wrap C")?;

    if beta_zero {
        log::debug!("{routine}: copying ALPHA*op(A)*op(B) into padded C (ldc={ldc})");
        if !alpha_one {
            scale_inplace(alpha, &mut product.view_mut())
                .step(routine, "scale product by ALPHA")?;
        }
        copy_into(&mut matrix_c, &product.view().t())
            .step(routine, "copy ALPHA*op(A)*op(B) into C when BETA == 0")?;
    } else {
        log::debug!("{routine}: accumulating ALPHA*op(A)*op(B) + BETA*C");
        extended_sum_inplace(alpha, &product.view().t(), beta, &mut matrix_c)
            .step(routine, "accumulate into C")?;
    }
    Ok(())
}

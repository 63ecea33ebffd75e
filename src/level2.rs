//! Level 2: general matrix-vector multiply.

use crate::engine::MatMulEngine;
use crate::ops::{copy_into, extended_sum_inplace, scale_inplace};
use crate::scalar::Real;
use crate::wrap::{op, op_mut, Trans};
use crate::{non_negative, BlasError, Result, StepContext};

/// General matrix-vector multiply: `y = alpha * op(A) * x + beta * y`.
///
/// `A` is an `M x N` column-major matrix with leading dimension `lda`.
/// `x` and `y` are read with increments `incx` and `incy`; with `trans` set
/// to no-transpose `x` has length `N` and `y` length `M`, otherwise the
/// lengths swap.
///
/// With `alpha == 0` neither `A` nor `x` is read and `y` is only scaled by
/// `beta`.
///
/// # Errors
/// - [`NegativeArgument`](BlasError::NegativeArgument) if any of
///   `m, n, lda, incx, incy` is negative
/// - [`InvalidTranspose`](BlasError::InvalidTranspose) for an unknown flag
/// - [`NonEmptyOutput`](BlasError::NonEmptyOutput) if `A` is empty but the
///   output length (`N` when transposed, `M` otherwise) is not
/// - [`Step`](BlasError::Step) wrapping a view or engine failure
#[allow(clippy::too_many_arguments)]
pub fn gemv<T, E>(
    engine: &E,
    trans: char,
    m: i32,
    n: i32,
    alpha: T,
    a: &[T],
    lda: i32,
    x: &[T],
    incx: i32,
    beta: T,
    y: &mut [T],
    incy: i32,
) -> Result<()>
where
    T: Real,
    E: MatMulEngine<T> + ?Sized,
{
    let routine = T::GEMV;
    let [m, n, lda, incx, incy] = non_negative(routine, [m, n, lda, incx, incy])?;
    let trans = Trans::parse(routine, trans)?;
    log::trace!(
        "{routine}(trans={}, m={m}, n={n}, lda={lda}, incx={incx}, incy={incy})",
        trans.to_char(),
    );

    let (x_len, y_len) = if trans.is_trans() { (m, n) } else { (n, m) };

    if m == 0 || n == 0 {
        // A holds no values, so y must be empty too.
        if y_len != 0 {
            return Err(BlasError::NonEmptyOutput {
                routine,
                len: y_len,
            });
        }
        return Ok(());
    }

    let matrix_a = op(trans.is_trans(), a, m, n, lda).step(routine, "wrap A")?;
    let vector_x = op(true, x, 1, x_len, incx).step(routine, "wrap x")?;
    let mut vector_y = op_mut(true, y, 1, y_len, incy).step(routine, "wrap y")?;

    if alpha == T::zero() {
        log::debug!("{routine}: ALPHA == 0, scaling y by BETA");
        return scale_inplace(beta, &mut vector_y).step(routine, "scale y by BETA");
    }

    if beta == T::zero() {
        if vector_y.is_contiguous() {
            log::debug!("{routine}: computing op(A)*x directly in y");
            engine
                .matmul_into(&matrix_a, &vector_x, &mut vector_y)
                .step(routine, "compute matrix product")?;
            scale_inplace(alpha, &mut vector_y).step(routine, "scale y by ALPHA")?;
        } else {
            log::debug!("{routine}: y is strided (incy={incy}), using a temporary");
            let mut temp = engine
                .matmul(&matrix_a, &vector_x)
                .step(routine, "compute matrix product")?;
            scale_inplace(alpha, &mut temp.view_mut()).step(routine, "scale product by ALPHA")?;
            copy_into(&mut vector_y, &temp.view()).step(routine, "update output")?;
        }
        return Ok(());
    }

    log::debug!("{routine}: accumulating ALPHA*op(A)*x + BETA*y");
    let temp = engine
        .matmul(&matrix_a, &vector_x)
        .step(routine, "compute matrix product")?;
    extended_sum_inplace(alpha, &temp.view(), beta, &mut vector_y)
        .step(routine, "accumulate into y")
}

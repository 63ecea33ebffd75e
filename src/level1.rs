//! Level 1: dot product.

use crate::engine::MatMulEngine;
use crate::scalar::Real;
use crate::wrap::op;
use crate::{non_negative, Result, StepContext};

/// Dot product of two strided vectors of length `n`.
///
/// `sx` is wrapped as a `1 x N` row and `sy` as an `N x 1` column; their
/// `1 x 1` product is the result. `n == 0` returns zero.
///
/// # Errors
/// - [`NegativeArgument`](crate::BlasError::NegativeArgument) if any of
///   `n, incx, incy` is negative
/// - [`Step`](crate::BlasError::Step) wrapping a view or engine failure
pub fn dot<T, E>(engine: &E, n: i32, sx: &[T], incx: i32, sy: &[T], incy: i32) -> Result<T>
where
    T: Real,
    E: MatMulEngine<T> + ?Sized,
{
    let routine = T::DOT;
    let [n, incx, incy] = non_negative(routine, [n, incx, incy])?;
    log::trace!("{routine}(n={n}, incx={incx}, incy={incy})");

    let vector_x = op(false, sx, 1, n, incx).step(routine, "wrap x")?;
    let vector_y = op(true, sy, 1, n, incy).step(routine, "wrap y")?;

    let product = engine
        .matmul(&vector_x, &vector_y)
        .step(routine, "compute dot")?;
    Ok(product.get([0, 0]))
}

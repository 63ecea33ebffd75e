//! BLAS entry points.
//!
//! [`Blas`] binds the drivers to one [`MatMulEngine`]; the precision-named
//! free functions (`sgemm`, `dgemv`, `ddot`, ...) run on a fresh
//! [`DefaultEngine`] and mirror the reference BLAS argument lists.

use crate::engine::{DefaultEngine, MatMulEngine};
use crate::scalar::Real;
use crate::{level1, level2, level3, Result};

/// BLAS driver facade holding a matrix-product engine.
///
/// # Example
/// ```
/// use strided_blas::{Blas, NaiveEngine};
///
/// let blas = Blas::with_engine(NaiveEngine);
/// let r = blas.dot(3, &[1.0, 2.0, 3.0], 1, &[4.0, 5.0, 6.0], 1).unwrap();
/// assert_eq!(r, 32.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Blas<E = DefaultEngine> {
    engine: E,
}

impl Blas {
    /// Facade over the default engine.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E> Blas<E> {
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// `C = alpha * op(A) * op(B) + beta * C`. See [`level3::gemm`].
    #[allow(clippy::too_many_arguments)]
    pub fn gemm<T>(
        &self,
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
        E: MatMulEngine<T>,
    {
        level3::gemm(
            &self.engine,
            trans_a,
            trans_b,
            m,
            n,
            k,
            alpha,
            a,
            lda,
            b,
            ldb,
            beta,
            c,
            ldc,
        )
    }

    /// `y = alpha * op(A) * x + beta * y`. See [`level2::gemv`].
    #[allow(clippy::too_many_arguments)]
    pub fn gemv<T>(
        &self,
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
        E: MatMulEngine<T>,
    {
        level2::gemv(
            &self.engine,
            trans,
            m,
            n,
            alpha,
            a,
            lda,
            x,
            incx,
            beta,
            y,
            incy,
        )
    }

    /// Dot product. See [`level1::dot`].
    pub fn dot<T>(&self, n: i32, sx: &[T], incx: i32, sy: &[T], incy: i32) -> Result<T>
    where
        T: Real,
        E: MatMulEngine<T>,
    {
        level1::dot(&self.engine, n, sx, incx, sy, incy)
    }
}

// ============================================================================
// Precision-named entry points
// ============================================================================

macro_rules! define_precision {
    ($t:ty, $gemm:ident, $gemv:ident, $dot:ident) => {
        #[doc = concat!("`", stringify!($t), "` GEMM on the default engine.")]
        #[allow(clippy::too_many_arguments)]
        pub fn $gemm(
            trans_a: char,
            trans_b: char,
            m: i32,
            n: i32,
            k: i32,
            alpha: $t,
            a: &[$t],
            lda: i32,
            b: &[$t],
            ldb: i32,
            beta: $t,
            c: &mut [$t],
            ldc: i32,
        ) -> Result<()> {
            Blas::new().gemm(
                trans_a, trans_b, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc,
            )
        }

        #[doc = concat!("`", stringify!($t), "` GEMV on the default engine.")]
        #[allow(clippy::too_many_arguments)]
        pub fn $gemv(
            trans: char,
            m: i32,
            n: i32,
            alpha: $t,
            a: &[$t],
            lda: i32,
            x: &[$t],
            incx: i32,
            beta: $t,
            y: &mut [$t],
            incy: i32,
        ) -> Result<()> {
            Blas::new().gemv(trans, m, n, alpha, a, lda, x, incx, beta, y, incy)
        }

        #[doc = concat!("`", stringify!($t), "` dot product on the default engine.")]
        pub fn $dot(n: i32, sx: &[$t], incx: i32, sy: &[$t], incy: i32) -> Result<$t> {
            Blas::new().dot(n, sx, incx, sy, incy)
        }
    };
}

define_precision!(f32, sgemm, sgemv, sdot);
define_precision!(f64, dgemm, dgemv, ddot);

//! Element types accepted by the BLAS drivers.
//!
//! Only the two real floating-point widths are supported. Each carries the
//! routine names used in diagnostics, following the reference BLAS
//! `s`/`d` prefix convention (`sgemm_`, `dgemv_`, ...).

use std::fmt::Debug;

/// Real floating-point precision usable by the drivers.
pub trait Real: num_traits::Float + Default + Debug + Send + Sync + 'static {
    /// Name of the matrix-matrix routine for this precision.
    const GEMM: &'static str;
    /// Name of the matrix-vector routine for this precision.
    const GEMV: &'static str;
    /// Name of the dot-product routine for this precision.
    const DOT: &'static str;
}

impl Real for f32 {
    const GEMM: &'static str = "sgemm_";
    const GEMV: &'static str = "sgemv_";
    const DOT: &'static str = "sdot_";
}

impl Real for f64 {
    const GEMM: &'static str = "dgemm_";
    const GEMV: &'static str = "dgemv_";
    const DOT: &'static str = "ddot_";
}

/// Trait alias for element types usable with the [`DefaultEngine`].
///
/// When the `faer` feature is enabled, this additionally requires
/// `faer_traits::ComplexField` so the faer product can be used.
///
/// [`DefaultEngine`]: crate::DefaultEngine
#[cfg(feature = "faer")]
pub trait Scalar: Real + faer_traits::ComplexField {}

#[cfg(feature = "faer")]
impl<T> Scalar for T where T: Real + faer_traits::ComplexField {}

/// Trait alias for element types usable with the [`DefaultEngine`].
///
/// [`DefaultEngine`]: crate::DefaultEngine
#[cfg(not(feature = "faer"))]
pub trait Scalar: Real {}

#[cfg(not(feature = "faer"))]
impl<T> Scalar for T where T: Real {}

//! Fortran-ABI entry points (`sgemm_`, `dgemm_`, `sgemv_`, `dgemv_`, `sdot_`,
//! `ddot_`) for drop-in linking in place of a reference BLAS.
//!
//! Every argument is passed by pointer, as Fortran does. Errors cannot be
//! returned through this ABI, so any failure goes to
//! [`fatal_error`](crate::fatal::fatal_error) and the process aborts.

use crate::fatal::OrFatal;
use crate::Blas;
use std::os::raw::{c_char, c_int};

/// Number of elements spanned by a column-major `nrow x ncol` matrix.
fn matrix_extent(nrow: c_int, ncol: c_int, ld: c_int) -> usize {
    match (usize::try_from(nrow), usize::try_from(ncol), usize::try_from(ld)) {
        (Ok(0), _, _) | (_, Ok(0), _) => 0,
        (Ok(nrow), Ok(ncol), Ok(ld)) => (ncol - 1)
            .checked_mul(ld)
            .and_then(|x| x.checked_add(nrow))
            .unwrap_or(0),
        // Negative arguments are rejected before the buffer is touched.
        _ => 0,
    }
}

/// Number of elements spanned by a length-`n` vector with increment `inc`.
fn vector_extent(n: c_int, inc: c_int) -> usize {
    matrix_extent(1, n, inc)
}

/// Stored `(rows, cols)` of a matrix used as `op(X)` of shape `rows x cols`.
fn stored_dims(flag: char, rows: c_int, cols: c_int) -> Option<(c_int, c_int)> {
    match flag {
        'N' | 'n' => Some((rows, cols)),
        'T' | 't' | 'C' | 'c' => Some((cols, rows)),
        _ => None,
    }
}

unsafe fn flag(ptr: *const c_char) -> char {
    if ptr.is_null() {
        '\0'
    } else {
        *ptr as u8 as char
    }
}

unsafe fn slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if ptr.is_null() || len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(ptr, len)
    }
}

unsafe fn slice_mut<'a, T>(ptr: *mut T, len: usize) -> &'a mut [T] {
    if ptr.is_null() || len == 0 {
        &mut []
    } else {
        std::slice::from_raw_parts_mut(ptr, len)
    }
}

macro_rules! define_ffi {
    ($t:ty, $gemm:ident, $gemv:ident, $dot:ident) => {
        /// # Safety
        /// All pointers must be valid and the buffers must be large enough
        /// for the given dimensions and leading dimensions, as in reference
        /// BLAS. `C` must not overlap `A` or `B`.
        #[no_mangle]
        pub unsafe extern "C" fn $gemm(
            transa: *const c_char,
            transb: *const c_char,
            m: *const c_int,
            n: *const c_int,
            k: *const c_int,
            alpha: *const $t,
            a: *const $t,
            lda: *const c_int,
            b: *const $t,
            ldb: *const c_int,
            beta: *const $t,
            c: *mut $t,
            ldc: *const c_int,
        ) {
            let (transa, transb) = (flag(transa), flag(transb));
            let (m, n, k) = (*m, *n, *k);
            let (lda, ldb, ldc) = (*lda, *ldb, *ldc);
            let a_len = stored_dims(transa, m, k)
                .map_or(0, |(rows, cols)| matrix_extent(rows, cols, lda));
            let b_len = stored_dims(transb, k, n)
                .map_or(0, |(rows, cols)| matrix_extent(rows, cols, ldb));
            let c_len = matrix_extent(m, n, ldc);
            Blas::new()
                .gemm(
                    transa,
                    transb,
                    m,
                    n,
                    k,
                    *alpha,
                    slice(a, a_len),
                    lda,
                    slice(b, b_len),
                    ldb,
                    *beta,
                    slice_mut(c, c_len),
                    ldc,
                )
                .or_fatal()
        }

        /// # Safety
        /// All pointers must be valid and the buffers must be large enough
        /// for the given dimensions and increments. `y` must not overlap `A`
        /// or `x`.
        #[no_mangle]
        pub unsafe extern "C" fn $gemv(
            trans: *const c_char,
            m: *const c_int,
            n: *const c_int,
            alpha: *const $t,
            a: *const $t,
            lda: *const c_int,
            x: *const $t,
            incx: *const c_int,
            beta: *const $t,
            y: *mut $t,
            incy: *const c_int,
        ) {
            let trans = flag(trans);
            let (m, n, lda, incx, incy) = (*m, *n, *lda, *incx, *incy);
            let (x_len, y_len) = match stored_dims(trans, n, m) {
                Some((x_len, y_len)) => (vector_extent(x_len, incx), vector_extent(y_len, incy)),
                None => (0, 0),
            };
            Blas::new()
                .gemv(
                    trans,
                    m,
                    n,
                    *alpha,
                    slice(a, matrix_extent(m, n, lda)),
                    lda,
                    slice(x, x_len),
                    incx,
                    *beta,
                    slice_mut(y, y_len),
                    incy,
                )
                .or_fatal()
        }

        /// # Safety
        /// All pointers must be valid and the buffers must be large enough
        /// for `n` elements at the given increments.
        #[no_mangle]
        pub unsafe extern "C" fn $dot(
            n: *const c_int,
            sx: *const $t,
            incx: *const c_int,
            sy: *const $t,
            incy: *const c_int,
        ) -> $t {
            let (n, incx, incy) = (*n, *incx, *incy);
            Blas::new()
                .dot(
                    n,
                    slice(sx, vector_extent(n, incx)),
                    incx,
                    slice(sy, vector_extent(n, incy)),
                    incy,
                )
                .or_fatal()
        }
    };
}

define_ffi!(f32, sgemm_, sgemv_, sdot_);
define_ffi!(f64, dgemm_, dgemv_, ddot_);

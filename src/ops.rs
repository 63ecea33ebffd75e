//! In-place element-wise operations on strided views.
//!
//! These are the reconciliation steps of the BLAS drivers: scaling by a
//! scalar, the fused `B = s1*A + s2*B` update, and copying a temporary back
//! into a caller's buffer. All of them accept arbitrary (including negative)
//! strides and visit each logical element exactly once.

use crate::kernel::for_each_inner;
use crate::view::{DenseView, DenseViewMut};
use crate::{BlasError, Result};
use std::ops::{Add, Mul};

fn ensure_same_shape(a: &[usize; 2], b: &[usize; 2]) -> Result<()> {
    if a != b {
        return Err(BlasError::ShapeMismatch(a.to_vec(), b.to_vec()));
    }
    Ok(())
}

/// Scale in place: `m = s * m`.
pub fn scale_inplace<T>(s: T, m: &mut DenseViewMut<'_, T>) -> Result<()>
where
    T: Copy + Mul<Output = T>,
{
    let dims = *m.size();
    let strides = *m.strides();
    let base = m.offset() as isize;
    let data = m.data_mut();

    for_each_inner(dims, [strides], Some(0), |offsets, len, inner| {
        let mut idx = base + offsets[0];
        for _ in 0..len {
            let slot = &mut data[idx as usize];
            *slot = s * *slot;
            idx += inner[0];
        }
        Ok(())
    })
}

/// Overwrite every element of `m` with `value`.
#[cfg_attr(not(feature = "faer"), allow(dead_code))]
pub(crate) fn fill<T: Copy>(m: &mut DenseViewMut<'_, T>, value: T) -> Result<()> {
    let dims = *m.size();
    let strides = *m.strides();
    let base = m.offset() as isize;
    let data = m.data_mut();

    for_each_inner(dims, [strides], Some(0), |offsets, len, inner| {
        let mut idx = base + offsets[0];
        for _ in 0..len {
            data[idx as usize] = value;
            idx += inner[0];
        }
        Ok(())
    })
}

/// Extended sum in place: `b = s1 * a + s2 * b`.
///
/// `a` and `b` must have the same shape but may have unrelated strides.
pub fn extended_sum_inplace<T>(
    s1: T,
    a: &DenseView<'_, T>,
    s2: T,
    b: &mut DenseViewMut<'_, T>,
) -> Result<()>
where
    T: Copy + Add<Output = T> + Mul<Output = T>,
{
    ensure_same_shape(a.size(), b.size())?;
    let dims = *b.size();
    let strides = [*a.strides(), *b.strides()];
    let a_base = a.offset() as isize;
    let b_base = b.offset() as isize;
    let a_data = a.data();
    let b_data = b.data_mut();

    for_each_inner(dims, strides, Some(1), |offsets, len, inner| {
        let mut ia = a_base + offsets[0];
        let mut ib = b_base + offsets[1];
        for _ in 0..len {
            let slot = &mut b_data[ib as usize];
            *slot = s1 * a_data[ia as usize] + s2 * *slot;
            ia += inner[0];
            ib += inner[1];
        }
        Ok(())
    })
}

/// Copy `src` into `dest` element by element.
pub fn copy_into<T: Copy>(dest: &mut DenseViewMut<'_, T>, src: &DenseView<'_, T>) -> Result<()> {
    ensure_same_shape(dest.size(), src.size())?;
    let dims = *dest.size();
    let strides = [*dest.strides(), *src.strides()];
    let d_base = dest.offset() as isize;
    let s_base = src.offset() as isize;
    let s_data = src.data();
    let d_data = dest.data_mut();

    for_each_inner(dims, strides, Some(0), |offsets, len, inner| {
        let mut id = d_base + offsets[0];
        let mut is = s_base + offsets[1];
        for _ in 0..len {
            d_data[id as usize] = s_data[is as usize];
            id += inner[0];
            is += inner[1];
        }
        Ok(())
    })
}

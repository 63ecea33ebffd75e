//! Stride-ordered iteration over 2-D views.
//!
//! Element-wise operations walk every logical position of one or more views
//! of identical shape. Following Strided.jl's `_mapreduce_order!`, the loop
//! order is chosen from the operands' strides: the innermost loop runs along
//! the dimension with the smallest combined stride, the destination's stride
//! counting double.

use crate::Result;

/// Pick the loop order for a 2-D iteration, returned as `[outer, inner]`.
pub(crate) fn compute_order<const K: usize>(
    dims: &[usize; 2],
    strides_list: &[[isize; 2]; K],
    dest_index: Option<usize>,
) -> [usize; 2] {
    let score0 = dim_score(0, strides_list, dest_index);
    let score1 = dim_score(1, strides_list, dest_index);
    let mut order = if score0 <= score1 { [1, 0] } else { [0, 1] };
    // A unit dimension makes a useless inner loop.
    if dims[order[1]] == 1 {
        order.swap(0, 1);
    }
    order
}

fn dim_score<const K: usize>(
    dim: usize,
    strides_list: &[[isize; 2]; K],
    dest_index: Option<usize>,
) -> usize {
    let mut score = 0usize;
    for (i, strides) in strides_list.iter().enumerate() {
        let weight = if dest_index == Some(i) { 2 } else { 1 };
        score = score.saturating_add(weight * strides[dim].unsigned_abs());
    }
    score
}

/// Iterate over inner runs, calling `f(offsets, run_len, inner_strides)`.
///
/// `offsets` are relative to each operand's `[0, 0]` element; the callback
/// visits `run_len` elements per operand stepping by `inner_strides`. Every
/// logical position is covered exactly once.
#[inline]
pub(crate) fn for_each_inner<const K: usize, F>(
    dims: [usize; 2],
    strides_list: [[isize; 2]; K],
    dest_index: Option<usize>,
    mut f: F,
) -> Result<()>
where
    F: FnMut(&[isize; K], usize, &[isize; K]) -> Result<()>,
{
    if dims.contains(&0) {
        return Ok(());
    }
    let [outer, inner] = compute_order(&dims, &strides_list, dest_index);
    let inner_strides: [isize; K] = std::array::from_fn(|i| strides_list[i][inner]);
    let outer_strides: [isize; K] = std::array::from_fn(|i| strides_list[i][outer]);

    let mut offsets = [0isize; K];
    for _ in 0..dims[outer] {
        f(&offsets, dims[inner], &inner_strides)?;
        for (offset, s) in offsets.iter_mut().zip(outer_strides.iter()) {
            *offset += s;
        }
    }
    Ok(())
}

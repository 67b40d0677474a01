//! Extent validation and the mapping between multidimensional indices and
//! flat offsets into row-major storage.
//!
//! For an extent `[n0, n1, ..., nk]` the strides are
//! `[n1*n2*...*nk, n2*...*nk, ..., nk, 1]` and the offset of index
//! `[i0, i1, ..., ik]` is `i0 * stride0 + i1 * stride1 + ... + ik`.

use crate::error::{ArrayError, Result};

/// Number of elements described by `extents`, rejecting zero sized dimensions
/// and products that do not fit in `usize`.
pub fn element_count<const N: usize>(extents: &[usize; N]) -> Result<usize> {
    if extents.iter().any(|&d| d == 0) {
        return Err(ArrayError::InvalidExtent { extents: extents.to_vec() });
    }
    extents
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| ArrayError::ExtentOverflow { extents: extents.to_vec() })
}

/// Computes the strides from the extents, the last stride is always 1.
/// Does not validate; a zero extent produces zero strides to its left.
pub fn compute_strides<const N: usize>(extents: &[usize; N]) -> [usize; N] {
    let mut strides = [0; N];
    let mut k = 1usize;
    for i in (0..N).rev() {
        strides[i] = k;
        k = k.wrapping_mul(extents[i]);
    }
    strides
}

/// Converts a multidimensional index to a flat offset.
///
/// Each component is checked against its own extent before anything is
/// summed, so an index like `[0, 5]` on a `[3, 2]` array is rejected even
/// though `0 * 2 + 5` would land inside the buffer.
pub fn linearize<const N: usize>(
    index: &[usize; N],
    extents: &[usize; N],
    strides: &[usize; N],
) -> Result<usize> {
    let mut idx = 0;
    for axis in 0..N {
        if index[axis] >= extents[axis] {
            return Err(ArrayError::OutOfRange {
                axis,
                index: index[axis],
                extent: extents[axis],
            });
        }
        idx += index[axis] * strides[axis];
    }
    Ok(idx)
}

/// Inverse of [`linearize`], recovers the multidimensional index of a flat offset.
pub fn unravel<const N: usize>(offset: usize, extents: &[usize; N]) -> Result<[usize; N]> {
    let len = extents.iter().product::<usize>();
    if offset >= len {
        return Err(ArrayError::OffsetOutOfRange { offset, len });
    }
    let mut index = [0; N];
    let mut rest = offset;
    for axis in (0..N).rev() {
        index[axis] = rest % extents[axis];
        rest /= extents[axis];
    }
    Ok(index)
}

/// Increase the index by 1 in row-major order, carrying over to outer dimensions.
/// Returns true once the index wraps back to all zeros.
pub(crate) fn carry_over(index: &mut [usize], dims: &[usize]) -> bool {
    for (x, &d) in index.iter_mut().zip(dims.iter()).rev() {
        *x += 1;
        if *x < d {
            return false;
        }
        *x = 0;
    }
    true
}

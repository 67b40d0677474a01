// Rust has no stable arithmetic on const generics, so NdArray<T, N> cannot
// name NdArray<T, N - 1> directly. The pairing is spelled out per dimension
// below instead, which also means a 1-D array simply has no slice type.

use std::slice::Chunks;

use super::narray::NdArray;
use crate::error::{ArrayError, Result};

/// Extents that can lose their outermost dimension.
pub trait RemoveOuter {
    /// The extents with the first entry removed.
    type Smaller;
    fn remove_outer(&self) -> Self::Smaller;
}

/// Dimension-reducing slicing along the outermost axis, available for
/// arrays of 2 up to 12 dimensions.
///
/// ```
/// use ndbuf::{NdArray, OuterSlice};
///
/// let a = NdArray::from_iter_exact([4, 3, 2], 0..24).unwrap();
/// let s = a.slice(2).unwrap();
/// assert_eq!(s.extents(), [3, 2]);
/// assert_eq!(s.data(), (12..18).collect::<Vec<_>>());
/// ```
///
/// A vector has nothing to slice into:
///
/// ```compile_fail
/// use ndbuf::{NdArray, OuterSlice};
///
/// let v = NdArray::<i32, 1>::with_extents([3]).unwrap();
/// let s = v.slice(0);
/// ```
pub trait OuterSlice {
    /// The array type with the outermost dimension removed.
    type Smaller;

    /// Copies the block at outer index `i` into a new, independent array whose
    /// extents are the parent's extents without the first one.
    fn slice(&self, i: usize) -> Result<Self::Smaller>;

    /// Every slice along the outermost axis, in order. Empty for an unsized array.
    fn slices(&self) -> Vec<Self::Smaller>;
}

/// Owned slices along the outermost axis, see `NdArray::outer_iter`.
pub struct OuterIter<'a, T, const M: usize> {
    blocks: Chunks<'a, T>,
    extents: [usize; M],
}

impl<'a, T: Clone, const M: usize> Iterator for OuterIter<'a, T, M> {
    type Item = NdArray<T, M>;
    fn next(&mut self) -> Option<Self::Item> {
        let block = self.blocks.next()?;
        Some(NdArray::from_block(self.extents, block.to_vec()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.blocks.size_hint()
    }
}

impl<'a, T: Clone, const M: usize> ExactSizeIterator for OuterIter<'a, T, M> {}

fn outer_iter_impl<T, const N: usize, const M: usize>(arr: &NdArray<T, N>) -> OuterIter<'_, T, M>
where
    [usize; N]: RemoveOuter<Smaller = [usize; M]>,
{
    // the unsized state has a zero outer stride and an empty buffer
    let stride = arr.strides()[0].max(1);
    OuterIter { blocks: arr.as_slice().chunks(stride), extents: arr.extents().remove_outer() }
}

fn slice_impl<T: Clone, const N: usize, const M: usize>(arr: &NdArray<T, N>, i: usize) -> Result<NdArray<T, M>>
where
    [usize; N]: RemoveOuter<Smaller = [usize; M]>,
{
    let extents = arr.extents();
    if i >= extents[0] {
        return Err(ArrayError::OutOfRange { axis: 0, index: i, extent: extents[0] });
    }
    let stride = arr.strides()[0];
    let block = &arr.as_slice()[i * stride..(i + 1) * stride];
    Ok(NdArray::from_block(extents.remove_outer(), block.to_vec()))
}

macro_rules! impl_outer_slice {
    ($($n:literal => $m:literal),* $(,)?) => {
        $(
            impl RemoveOuter for [usize; $n] {
                type Smaller = [usize; $m];
                fn remove_outer(&self) -> [usize; $m] {
                    let mut smaller = [0; $m];
                    smaller.copy_from_slice(&self[1..]);
                    smaller
                }
            }

            impl<T: Clone> OuterSlice for NdArray<T, $n> {
                type Smaller = NdArray<T, $m>;

                fn slice(&self, i: usize) -> Result<Self::Smaller> {
                    slice_impl(self, i)
                }

                fn slices(&self) -> Vec<Self::Smaller> {
                    self.outer_iter().collect()
                }
            }

            impl<T: Clone> NdArray<T, $n> {
                /// Iterates over owned copies of every outer block, in order.
                pub fn outer_iter(&self) -> OuterIter<'_, T, $m> {
                    outer_iter_impl(self)
                }
            }
        )*
    };
}

impl_outer_slice! {
    2 => 1,
    3 => 2,
    4 => 3,
    5 => 4,
    6 => 5,
    7 => 6,
    8 => 7,
    9 => 8,
    10 => 9,
    11 => 10,
    12 => 11,
}

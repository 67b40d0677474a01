use std::ops::{Index, IndexMut};

use log::{debug, trace};

use super::index::{self, carry_over, compute_strides};
use crate::error::{ArrayError, Result};

/////////////////////////////////////////////////////////////////////
// A dense array with a fixed number of dimensions N, owning one flat
// row-major buffer whose length always equals the product of the extents
/////////////////////////////////////////////////////////////////////

/// An `N` dimensional array of `T`.
///
/// The array is either *unsized* (the [`Default`] state: all extents are zero and
/// the buffer is empty) or *sized* (every extent is at least 1 and the buffer
/// holds exactly `product(extents)` elements in row-major order).
///
/// ```
/// use ndbuf::NdArray;
///
/// let mut a = NdArray::<i32, 3>::with_extents([4, 3, 2]).unwrap();
/// a[[3, 2, 1]] = 18;
/// assert_eq!(a.get([3, 2, 1]), Ok(&18));
/// assert_eq!(a.as_slice()[23], 18);
/// ```
///
/// A zero dimensional array is rejected when it is instantiated:
///
/// ```compile_fail
/// use ndbuf::NdArray;
///
/// let a = NdArray::<i32, 0>::new();
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NdArray<T, const N: usize> {
    data: Vec<T>,        // row-major elements
    extents: [usize; N], // outermost first
    strides: [usize; N], // cached from extents
}

struct NonZeroDims<const N: usize>;

impl<const N: usize> NonZeroDims<N> {
    const OK: () = assert!(N > 0, "an NdArray needs at least one dimension");
}

impl<T, const N: usize> Default for NdArray<T, N> {
    fn default() -> Self {
        let () = NonZeroDims::<N>::OK;
        NdArray { data: Vec::new(), extents: [0; N], strides: [0; N] }
    }
}

impl<T, const N: usize> NdArray<T, N> {
    /// An unsized array, usable after [`set_extents`](Self::set_extents).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sized construction, every element is `T::default()`.
    pub fn with_extents(extents: [usize; N]) -> Result<Self>
    where
        T: Default + Clone,
    {
        Self::from_elem(extents, T::default())
    }

    /// Sized construction, every element is a clone of `elem`.
    pub fn from_elem(extents: [usize; N], elem: T) -> Result<Self>
    where
        T: Clone,
    {
        let () = NonZeroDims::<N>::OK;
        let len = index::element_count(&extents)?;
        trace!("allocating {} elements for extents {:?}", len, extents);
        Ok(NdArray { data: vec![elem; len], extents, strides: compute_strides(&extents) })
    }

    /// Sized construction filled with zeros.
    pub fn zeros(extents: [usize; N]) -> Result<Self>
    where
        T: num::Zero + Clone,
    {
        Self::from_elem(extents, T::zero())
    }

    /// Sized construction where the element at each index is `f(index)`.
    /// `f` is called in row-major order.
    pub fn from_fn<F>(extents: [usize; N], mut f: F) -> Result<Self>
    where
        F: FnMut([usize; N]) -> T,
    {
        let () = NonZeroDims::<N>::OK;
        let len = index::element_count(&extents)?;
        let mut data = Vec::with_capacity(len);
        let mut idx = [0; N];
        loop {
            data.push(f(idx));
            if carry_over(&mut idx, &extents) {
                break;
            }
        }
        Ok(NdArray { data, extents, strides: compute_strides(&extents) })
    }

    /// Takes ownership of `data`, which is read as already being in row-major
    /// order for `extents`.
    pub fn from_vec(extents: [usize; N], data: Vec<T>) -> Result<Self> {
        let expected = Self::checked_len(&extents, data.len())?;
        trace!("adopting {} elements for extents {:?}", expected, extents);
        Ok(NdArray { data, extents, strides: compute_strides(&extents) })
    }

    /// Copies `data` once it is known to fit `extents`.
    pub fn from_slice(extents: [usize; N], data: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        Self::checked_len(&extents, data.len())?;
        Ok(NdArray { data: data.to_vec(), extents, strides: compute_strides(&extents) })
    }

    /// Pulls at most `product(extents) + 1` items from `iter`, so an oversized
    /// or endless iterator is reported as a size mismatch without draining it.
    /// In that case the reported `actual` count is `product(extents) + 1`.
    pub fn from_iter_exact<I>(extents: [usize; N], iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let expected = index::element_count(&extents)?;
        let data: Vec<T> = iter.into_iter().take(expected.saturating_add(1)).collect();
        Self::from_vec(extents, data)
    }

    /// Builds an array from a block already known to hold `product(extents)`
    /// elements, used when splitting a valid parent.
    pub(crate) fn from_block(extents: [usize; N], data: Vec<T>) -> Self {
        debug_assert_eq!(extents.iter().product::<usize>(), data.len());
        NdArray { data, extents, strides: compute_strides(&extents) }
    }

    fn checked_len(extents: &[usize; N], actual: usize) -> Result<usize> {
        let () = NonZeroDims::<N>::OK;
        let expected = index::element_count(extents)?;
        if actual != expected {
            return Err(ArrayError::SizeMismatch { expected, actual });
        }
        Ok(expected)
    }

    /// Replaces the extents and resizes the buffer to the new element count.
    ///
    /// The buffer is truncated or extended with `T::default()` *positionally*:
    /// elements are not moved to follow the new geometry, so the element that
    /// lived at `[1, 0]` of a `[2, 3]` array is found at `[0, 3]` after resizing
    /// to `[2, 4]`. Use a fresh array and copy if the values must follow their
    /// indices.
    ///
    /// On error the array is left unchanged.
    pub fn set_extents(&mut self, extents: [usize; N]) -> Result<()>
    where
        T: Default + Clone,
    {
        let len = index::element_count(&extents)?;
        if len != self.data.len() {
            debug!(
                "resizing {:?} -> {:?}, buffer {} -> {} elements, stored values keep their flat offsets",
                self.extents,
                extents,
                self.data.len(),
                len
            );
        }
        self.data.resize(len, T::default());
        self.extents = extents;
        self.strides = compute_strides(&extents);
        Ok(())
    }

    /// Copy of the extents.
    pub fn extents(&self) -> [usize; N] {
        self.extents
    }

    pub fn strides(&self) -> [usize; N] {
        self.strides
    }

    pub fn ndim(&self) -> usize {
        N
    }

    /// Total number of elements, 0 for an unsized array.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat offset of `index`, checking every component against its extent.
    pub fn offset_of(&self, index: [usize; N]) -> Result<usize> {
        index::linearize(&index, &self.extents, &self.strides)
    }

    /// Multidimensional index of a flat offset.
    pub fn index_of(&self, offset: usize) -> Result<[usize; N]> {
        index::unravel(offset, &self.extents)
    }

    pub fn get(&self, index: [usize; N]) -> Result<&T> {
        let i = self.offset_of(index)?;
        Ok(&self.data[i])
    }

    pub fn get_mut(&mut self, index: [usize; N]) -> Result<&mut T> {
        let i = self.offset_of(index)?;
        Ok(&mut self.data[i])
    }

    pub fn set(&mut self, index: [usize; N], value: T) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Independent copy of the whole buffer in row-major order.
    pub fn data(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Iterates over `(index, &element)` pairs in row-major order.
    pub fn indexed_iter(&self) -> IndexedIter<'_, T, N> {
        IndexedIter { inner: self.data.iter(), extents: self.extents, cur: [0; N] }
    }
}

/////////////////////////////////////////////////////////////////////
/// Indexing operations, always checks each axis and panics when out of range
/////////////////////////////////////////////////////////////////////

impl<T, const N: usize> Index<[usize; N]> for NdArray<T, N> {
    type Output = T;
    fn index(&self, index: [usize; N]) -> &T {
        match self.get(index) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T, const N: usize> IndexMut<[usize; N]> for NdArray<T, N> {
    fn index_mut(&mut self, index: [usize; N]) -> &mut T {
        match self.get_mut(index) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a NdArray<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut NdArray<T, N> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Walks the buffer linearly while keeping the matching multidimensional index
/// up to date with a carry-over increment.
pub struct IndexedIter<'a, T, const N: usize> {
    inner: std::slice::Iter<'a, T>,
    extents: [usize; N],
    cur: [usize; N],
}

impl<'a, T, const N: usize> Iterator for IndexedIter<'a, T, N> {
    type Item = ([usize; N], &'a T);
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        let idx = self.cur;
        carry_over(&mut self.cur, &self.extents);
        Some((idx, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T, const N: usize> ExactSizeIterator for IndexedIter<'a, T, N> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::Rng;

    #[test]
    fn default_is_unsized() {
        let a = NdArray::<f32, 3>::default();
        assert_eq!(a.extents(), [0, 0, 0]);
        assert!(a.is_empty());
        assert!(a.data().is_empty());
        assert_eq!(a.get([0, 0, 0]).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn sized_construction() {
        let a = NdArray::<i32, 4>::with_extents([5, 4, 3, 2]).unwrap();
        assert_eq!(a.len(), 120);
        assert_eq!(a.ndim(), 4);
        assert_eq!(a.strides(), [24, 6, 2, 1]);
        assert!(a.iter().all(|&x| x == 0));

        let z = NdArray::<f64, 2>::zeros([2, 3]).unwrap();
        assert_eq!(z.data(), vec![0.0; 6]);
        let e = NdArray::from_elem([3], 'x').unwrap();
        assert_eq!(e.data(), vec!['x'; 3]);
    }

    #[test]
    fn zero_extent_rejected() {
        let e = NdArray::<i32, 3>::with_extents([4, 0, 2]).unwrap_err();
        assert_eq!(e, ArrayError::InvalidExtent { extents: vec![4, 0, 2] });
        assert_eq!(NdArray::<i32, 1>::with_extents([0]).unwrap_err().kind(), ErrorKind::InvalidExtent);
        assert_eq!(
            NdArray::<i32, 2>::from_vec([0, 3], vec![]).unwrap_err().kind(),
            ErrorKind::InvalidExtent
        );
        assert_eq!(NdArray::<u8, 2>::from_fn([3, 0], |_| 0).unwrap_err().kind(), ErrorKind::InvalidExtent);
    }

    #[test]
    fn from_data_checks_length() {
        let e = NdArray::<i32, 2>::from_vec([2, 2], vec![1, 2, 3, 4, 5]).unwrap_err();
        assert_eq!(e, ArrayError::SizeMismatch { expected: 4, actual: 5 });
        let e = NdArray::<i32, 2>::from_slice([2, 2], &[1, 2, 3]).unwrap_err();
        assert_eq!(e, ArrayError::SizeMismatch { expected: 4, actual: 3 });

        let a = NdArray::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        assert_eq!(a.data(), vec![1, 2, 3, 4]);
        assert_eq!(a[[1, 0]], 3);

        let b = NdArray::from_iter_exact([2, 3], 0..6).unwrap();
        assert_eq!(b[[1, 2]], 5);
        assert!(NdArray::<i32, 2>::from_iter_exact([2, 3], 0..7).is_err());
    }

    #[test]
    fn from_iter_stops_after_one_extra() {
        let mut pulled = 0;
        let e = NdArray::<i32, 2>::from_iter_exact([2, 2], (0..1_000_000).inspect(|_| pulled += 1))
            .unwrap_err();
        assert_eq!(e, ArrayError::SizeMismatch { expected: 4, actual: 5 });
        assert_eq!(pulled, 5);

        // an endless source still terminates
        let e = NdArray::<u64, 1>::from_iter_exact([3], 0..).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::SizeMismatch);

        let e = NdArray::<u64, 2>::from_iter_exact([3, 0], 0..).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidExtent);
    }

    #[test]
    fn round_trip_any_extent() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let e = [rng.gen_range(1..5), rng.gen_range(1..5), rng.gen_range(1..5)];
            let d: Vec<u32> = (0..e.iter().product::<usize>()).map(|_| rng.gen()).collect();
            let a = NdArray::from_slice(e, &d).unwrap();
            assert_eq!(a.data(), d);
            assert_eq!(a.extents(), e);
        }
    }

    #[test]
    fn from_fn_matches_offsets() {
        let a = NdArray::from_fn([4, 3, 2], |[z, y, x]| z * 6 + y * 2 + x).unwrap();
        assert_eq!(a.data(), (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn write_is_isolated() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let e = [rng.gen_range(1..5), rng.gen_range(1..5), rng.gen_range(1..5)];
            let mut a = NdArray::<i64, 3>::with_extents(e).unwrap();
            let target = [rng.gen_range(0..e[0]), rng.gen_range(0..e[1]), rng.gen_range(0..e[2])];
            a.set(target, -7).unwrap();
            for (idx, &v) in a.indexed_iter() {
                if idx == target {
                    assert_eq!(v, -7);
                } else {
                    assert_eq!(v, 0);
                }
            }
        }
    }

    #[test]
    fn access_checks_every_axis() {
        let mut a = NdArray::<i32, 2>::with_extents([3, 2]).unwrap();
        assert_eq!(
            a.get([0, 5]),
            Err(ArrayError::OutOfRange { axis: 1, index: 5, extent: 2 })
        );
        assert_eq!(a.set([3, 0], 1), Err(ArrayError::OutOfRange { axis: 0, index: 3, extent: 3 }));
        assert!(a.iter().all(|&x| x == 0));
        *a.get_mut([2, 1]).unwrap() = 9;
        assert_eq!(a.as_slice()[5], 9);
        assert_eq!(a.offset_of([2, 1]), Ok(5));
        assert_eq!(a.index_of(5), Ok([2, 1]));
    }

    #[test]
    #[should_panic(expected = "index 2 out of range for axis 1")]
    fn index_operator_panics() {
        let a = NdArray::<i32, 2>::with_extents([3, 2]).unwrap();
        let _x = a[[0, 2]];
    }

    #[test]
    fn data_is_a_copy() {
        let a = NdArray::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let mut d = a.data();
        d[0] = 100;
        assert_eq!(a.data(), vec![1, 2, 3, 4]);
        assert_eq!(a.data(), a.data());
        assert_eq!(a.extents(), a.extents());
    }

    #[test]
    fn resize_keeps_flat_layout() {
        let mut a = NdArray::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
        a.set_extents([2, 4]).unwrap();
        assert_eq!(a.extents(), [2, 4]);
        assert_eq!(a.data(), vec![1, 2, 3, 4, 5, 6, 0, 0]);
        // the value formerly at [1, 0] now sits at [0, 3]
        assert_eq!(a[[0, 3]], 4);

        a.set_extents([1, 3]).unwrap();
        assert_eq!(a.data(), vec![1, 2, 3]);
        assert_eq!(a.strides(), [3, 1]);
    }

    #[test]
    fn failed_resize_changes_nothing() {
        let mut a = NdArray::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let e = a.set_extents([2, 0]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidExtent);
        assert_eq!(a.extents(), [2, 2]);
        assert_eq!(a.data(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn unsized_to_sized() {
        let mut a = NdArray::<u8, 3>::new();
        a.set_extents([4, 4, 4]).unwrap();
        assert_eq!(a.len(), 64);
        a[[3, 3, 3]] = 1;
        assert_eq!(a.as_slice()[63], 1);
    }

    #[test]
    fn iteration() {
        let mut a = NdArray::from_iter_exact([2, 2], 0..4).unwrap();
        for x in &mut a {
            *x *= 10;
        }
        assert_eq!((&a).into_iter().copied().collect::<Vec<_>>(), vec![0, 10, 20, 30]);
        let idx: Vec<_> = a.indexed_iter().map(|(i, _)| i).collect();
        assert_eq!(idx, vec![[0, 0], [0, 1], [1, 0], [1, 1]]);
        a.fill(1);
        assert_eq!(a.into_vec(), vec![1; 4]);
    }
}

//! Conversions between [`NdArray`] and the outside world: the `ndarray` crate's
//! dynamic arrays, and serde.
//!
//! Both directions into an `NdArray` run through [`NdArray::from_vec`], so a
//! converted array satisfies the same invariants as one built directly.

use ndarray::{ArrayD, Dimension, IxDyn};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::narray::NdArray;
use crate::error::{ArrayError, Result};

fn extents_from_slice<const N: usize>(shape: &[usize]) -> Result<[usize; N]> {
    if shape.len() != N {
        return Err(ArrayError::DimensionMismatch { expected: N, actual: shape.len() });
    }
    let mut extents = [0; N];
    extents.copy_from_slice(shape);
    Ok(extents)
}

impl<T: Clone, const N: usize> NdArray<T, N> {
    /// Copies the array into an `ndarray::ArrayD` with the same shape.
    /// The unsized state becomes an empty array of all zero extents.
    pub fn to_ndarray(&self) -> ArrayD<T> {
        let strides = self.strides();
        let data = self.as_slice();
        ArrayD::from_shape_fn(IxDyn(&self.extents()), |idx| {
            let offset: usize = idx.slice().iter().zip(strides.iter()).map(|(i, s)| i * s).sum();
            data[offset].clone()
        })
    }
}

/// Elements are taken in the logical (row-major) order of `arr`, whatever its memory layout.
impl<T: Clone, const N: usize> TryFrom<ArrayD<T>> for NdArray<T, N> {
    type Error = ArrayError;
    fn try_from(arr: ArrayD<T>) -> Result<Self> {
        let extents = extents_from_slice::<N>(arr.shape())?;
        NdArray::from_iter_exact(extents, arr.iter().cloned())
    }
}

/////////////////////////////////////////////////////////////////////
// serde, an array is represented as { extents: [..], data: [..] }
/////////////////////////////////////////////////////////////////////

#[derive(serde::Serialize)]
#[serde(rename = "NdArray")]
struct RawArrayRef<'a, T> {
    extents: &'a [usize],
    data: &'a [T],
}

#[derive(serde::Deserialize)]
#[serde(rename = "NdArray")]
struct RawArray<T> {
    extents: Vec<usize>,
    data: Vec<T>,
}

impl<T> RawArray<T> {
    fn into_array<const N: usize>(self) -> Result<NdArray<T, N>> {
        let extents = extents_from_slice::<N>(&self.extents)?;
        // the unsized state round-trips as all zero extents with no data
        if self.data.is_empty() && extents.iter().all(|&d| d == 0) {
            return Ok(NdArray::default());
        }
        NdArray::from_vec(extents, self.data)
    }
}

impl<T: Serialize, const N: usize> Serialize for NdArray<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let extents = self.extents();
        RawArrayRef { extents: &extents, data: self.as_slice() }.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for NdArray<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawArray::<T>::deserialize(deserializer)?;
        raw.into_array().map_err(de::Error::custom)
    }
}

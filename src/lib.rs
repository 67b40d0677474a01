//! Fixed-dimensionality dense arrays backed by a single row-major buffer.
//!
//! [`NdArray<T, N>`] stores `product(extents)` elements contiguously, supports
//! bounds-checked multi-index access, positional resizing and slicing into an
//! owned `N - 1` dimensional array through [`OuterSlice`].

pub mod array;
pub mod config;
pub mod error;

pub use array::{NdArray, OuterIter, OuterSlice, RemoveOuter};
pub use error::{ArrayError, ErrorKind, Result};

pub mod index;
pub mod narray;
pub mod slice;
mod convert;
mod display;

pub use narray::{NdArray, IndexedIter};
pub use slice::{OuterIter, OuterSlice, RemoveOuter};

use strum::{AsRefStr, Display, EnumIter};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArrayError>;

/// Errors returned by the fallible operations of [`NdArray`](crate::NdArray).
///
/// A failed operation never leaves the array half-modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// Some dimension of the requested extent is zero.
    #[error("invalid extent {extents:?}: every dimension must be at least 1")]
    InvalidExtent { extents: Vec<usize> },
    /// `product(extent)` overflowed `usize`.
    #[error("invalid extent {extents:?}: element count overflows usize")]
    ExtentOverflow { extents: Vec<usize> },
    /// The supplied data does not hold `product(extent)` elements.
    #[error("size mismatch: extent holds {expected} elements, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    /// A single index component is not below its extent.
    #[error("index {index} out of range for axis {axis} with extent {extent}")]
    OutOfRange { axis: usize, index: usize, extent: usize },
    /// A flat offset is not below the element count.
    #[error("offset {offset} out of range for {len} elements")]
    OffsetOutOfRange { offset: usize, len: usize },
    /// A dynamically shaped source does not have the expected number of axes.
    #[error("dimension mismatch: expected {expected} axes, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Coarse classification of an [`ArrayError`], for callers that only care
/// about which rule was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
pub enum ErrorKind {
    InvalidExtent,
    SizeMismatch,
    OutOfRange,
    DimensionMismatch,
}

impl ArrayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidExtent { .. } | Self::ExtentOverflow { .. } => ErrorKind::InvalidExtent,
            Self::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            Self::OutOfRange { .. } | Self::OffsetOutOfRange { .. } => ErrorKind::OutOfRange,
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
        }
    }
}

use sparse_voxels_core::prelude::*;

use thiserror::Error;

/// Returned by the checked `try_get` and `try_set` accessors.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum AccessError {
    #[error("point {point:?} is outside of the storage extent {extent:?}")]
    OutOfBounds { point: Point3i, extent: Extent3i },
}

/// Returned when an `Octree` can't be built from the requested bounds.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum OctreeError {
    #[error("octree minimum {0:?} has a negative component")]
    NegativeMinimum(Point3i),
    #[error("octree maximum {max:?} is less than the minimum {min:?} on some axis")]
    InvertedBounds { min: Point3i, max: Point3i },
    #[error("octree shape {0:?} has a negative component")]
    NegativeShape(Point3i),
    #[error("octree extent {0:?} can't be padded to powers of 2 without overflowing i32")]
    ExtentTooLarge(Extent3i),
    #[error("slab split height {0} must be a power of 2 no less than 8")]
    InvalidSlabSplitHeight(i32),
}

//! A dense 3D array, used as the baseline that sparse storages are measured and tested against.
//!
//! The domain of an array is exactly the set of points in an `Extent3i`. Values are stored in row-major order, so X varies
//! fastest, then Y, then Z.
//!
//! ```
//! use sparse_voxels_core::prelude::*;
//! use sparse_voxels_storage::prelude::*;
//!
//! let array_extent = Extent3i::from_min_and_shape(Point3i::ZERO, Point3i::fill(16));
//! let mut array = Array3::fill(array_extent, 0);
//!
//! // Write all points in the extent to the same value.
//! let write_extent = Extent3i::from_min_and_lub(Point3i::fill(4), Point3i::fill(8));
//! for p in write_extent.iter_points() {
//!     array.set(p, 1);
//! }
//!
//! // Only the points in the extent should have been written.
//! array.for_each(|p, value| {
//!     if write_extent.contains(p) {
//!         assert_eq!(value, 1);
//!     } else {
//!         assert_eq!(value, 0);
//!     }
//! });
//! ```
//!
//! Indexing assumes that points are in-bounds of the array, panicking otherwise.

use crate::{Get, MemoryUsage, MemoryUsageAccounting, Set};

use sparse_voxels_core::prelude::*;

use std::mem::size_of;

/// A dense 3D array over `extent`, with one `T` per point.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Array3<T> {
    extent: Extent3i,
    values: Vec<T>,
}

impl<T> Array3<T> {
    /// Creates an array from `values` in row-major order. Panics if the number of values doesn't match the extent.
    pub fn new(extent: Extent3i, values: Vec<T>) -> Self {
        assert_eq!(extent.num_points(), values.len());

        Self { extent, values }
    }

    /// Creates an array with `value` at every point of `extent`.
    pub fn fill(extent: Extent3i, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(extent, vec![value; extent.num_points()])
    }

    /// Creates an array by sampling `filler` at every point of `extent`.
    pub fn fill_with(extent: Extent3i, filler: impl FnMut(Point3i) -> T) -> Self {
        Self::new(extent, extent.iter_points().map(filler).collect())
    }

    #[inline]
    pub fn extent(&self) -> &Extent3i {
        &self.extent
    }

    /// Calls `f` on every point of the array with its value, in row-major order.
    pub fn for_each(&self, mut f: impl FnMut(Point3i, T))
    where
        T: Copy,
    {
        for (p, value) in self.extent.iter_points().zip(self.values.iter()) {
            f(p, *value);
        }
    }

    #[inline]
    fn index(&self, p: Point3i) -> usize {
        assert!(
            self.extent.contains(p),
            "{:?} is outside of the array extent {:?}",
            p,
            self.extent
        );
        let local = p - self.extent.minimum;
        let shape = self.extent.shape;

        (local.x() + shape.x() * (local.y() + shape.y() * local.z())) as usize
    }
}

impl<T> Get<Point3i> for Array3<T>
where
    T: Copy,
{
    type Data = T;

    #[inline]
    fn get(&self, p: Point3i) -> T {
        self.values[self.index(p)]
    }
}

impl<T> Set<Point3i> for Array3<T> {
    type Data = T;

    #[inline]
    fn set(&mut self, p: Point3i, value: T) {
        let index = self.index(p);
        self.values[index] = value;
    }
}

impl<T> MemoryUsageAccounting for Array3<T> {
    fn memory_usage(&self) -> MemoryUsage {
        MemoryUsage {
            bytes_used: size_of::<Self>() + self.values.len() * size_of::<T>(),
            logical_voxels: self.extent.num_points(),
            num_nodes: 0,
            num_dense_leaves: 0,
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

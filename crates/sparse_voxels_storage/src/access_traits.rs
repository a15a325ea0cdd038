//! Traits defining point access to voxel storage.
//!
//! Every storage in this crate (the fixed-schema `ChunkOctree`, the generic `Octree` and the dense `Array3` baseline)
//! implements `Get<Point3i>` and `Set<Point3i>`, so tests and benchmarks can drive them interchangeably:
//!
//! ```
//! use sparse_voxels_core::prelude::*;
//! use sparse_voxels_storage::prelude::*;
//!
//! fn draw_column<M>(map: &mut M, x: i32, z: i32, height: i32)
//! where
//!     M: Set<Point3i, Data = u16>,
//! {
//!     for y in 0..height {
//!         map.set(PointN([x, y, z]), 1);
//!     }
//! }
//!
//! let mut chunk = ChunkOctree::new(0u16);
//! let mut array = Array3::fill(CHUNK_EXTENT, 0u16);
//! draw_column(&mut chunk, 3, 4, 10);
//! draw_column(&mut array, 3, 4, 10);
//!
//! for p in CHUNK_EXTENT.iter_points() {
//!     assert_eq!(chunk.get(p), array.get(p));
//! }
//! ```
//!
//! The `get` and `set` methods assume that the location is in-bounds of the storage. Checked alternatives are available as
//! inherent `try_get` and `try_set` methods on the octrees.

use auto_impl::auto_impl;

//  ██████╗ ███████╗████████╗████████╗███████╗██████╗ ███████╗
// ██╔════╝ ██╔════╝╚══██╔══╝╚══██╔══╝██╔════╝██╔══██╗██╔════╝
// ██║  ███╗█████╗     ██║      ██║   █████╗  ██████╔╝███████╗
// ██║   ██║██╔══╝     ██║      ██║   ██╔══╝  ██╔══██╗╚════██║
// ╚██████╔╝███████╗   ██║      ██║   ███████╗██║  ██║███████║
//  ╚═════╝ ╚══════╝   ╚═╝      ╚═╝   ╚══════╝╚═╝  ╚═╝╚══════╝

#[auto_impl(&, &mut, Box)]
pub trait Get<L> {
    type Data;

    /// Get an owned value at `location`.
    fn get(&self, location: L) -> Self::Data;
}

// ███████╗███████╗████████╗████████╗███████╗██████╗ ███████╗
// ██╔════╝██╔════╝╚══██╔══╝╚══██╔══╝██╔════╝██╔══██╗██╔════╝
// ███████╗█████╗     ██║      ██║   █████╗  ██████╔╝███████╗
// ╚════██║██╔══╝     ██║      ██║   ██╔══╝  ██╔══██╗╚════██║
// ███████║███████╗   ██║      ██║   ███████╗██║  ██║███████║
// ╚══════╝╚══════╝   ╚═╝      ╚═╝   ╚══════╝╚═╝  ╚═╝╚══════╝

#[auto_impl(&mut, Box)]
pub trait Set<L> {
    type Data;

    /// Write `value` at `location`. Sparse storages may allocate on the first write of a differing value to a uniform region,
    /// but writing the value that is already present never allocates.
    fn set(&mut self, location: L, value: Self::Data);
}

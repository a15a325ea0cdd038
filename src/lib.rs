//! Sparse storage for voxel data, measured against dense arrays.
//!
//! This library is organized into two crates:
//! - **core**: lattice point, extent, and octant data types
//! - **storage**: the sparse octrees, the dense `Array3` baseline, and memory accounting
//!
//! There are two octrees with the same rules. A node stays uniform until a differing value is written into it, at which point
//! it subdivides and seeds every child with its old value. Nodes never merge back together.
//!
//! - `ChunkOctree` has a fixed 16x64x16 shape, with a distinct type for each level of the tree.
//! - `Octree` covers any box chosen at runtime, padded to power-of-2 dimensions.
//!
//! ```
//! use sparse_voxels::prelude::*;
//!
//! let mut chunk = ChunkOctree::new(0u8);
//! chunk.set(PointN([1, 2, 3]), 9);
//! assert_eq!(chunk.get(PointN([1, 2, 3])), 9);
//!
//! let usage = chunk.memory_usage();
//! assert_eq!(usage.logical_voxels, CHUNK_EXTENT.num_points());
//! assert!(usage.bytes_used < usage.dense_equivalent_bytes::<u8>());
//! ```

pub use sparse_voxels_core as core;
pub use sparse_voxels_storage as storage;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::storage::prelude::*;
}

//! Sparse storage for chunks of voxels.
//!
//! The storage types are:
//!   - `ChunkOctree`: a fixed-schema octree for exactly one 16x64x16 chunk, built from the `Block16`, `Block8`, `Block4` and
//!     `LeafBlock` levels
//!   - `Octree`: a generic recursive octree over any box with a non-negative minimum, padded to power of 2 dimensions
//!   - `Array3`: a dense array, the baseline for memory and correctness comparisons
//!
//! All of them implement the `Get`, `Set` and `MemoryUsageAccounting` traits. The sparse storages start uniform and subdivide
//! lazily when a differing value is written, and they never merge back, so memory usage only grows.
//!
//! None of the storages are synchronized. Mutation requires `&mut`, so sharing one between threads requires external locking.

pub mod access_traits;
pub mod array;
pub mod chunk_octree;
pub mod error;
pub mod memory;
pub mod octree;

pub use access_traits::*;
pub use array::*;
pub use chunk_octree::*;
pub use error::*;
pub use memory::*;
pub use octree::*;

pub mod prelude {
    pub use super::{
        AccessError, Array3, Block16, Block4, Block8, ChunkBlock, ChunkOctree, Get, LeafBlock,
        MemoryUsage, MemoryUsageAccounting, Octree, OctreeBuilder, OctreeError, Set,
        CHUNK_EXTENT, CHUNK_SHAPE,
    };
}

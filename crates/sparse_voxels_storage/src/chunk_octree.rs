//! The `ChunkOctree` is a sparse voxel storage whose shape is fixed to a single 16x64x16 chunk.
//!
//! The schema is a hierarchy of block types with compile-time sizes:
//!
//! | Type         | Edge length | Children                   |
//! |--------------|-------------|----------------------------|
//! | `ChunkOctree`| 16x64x16    | 4 `Block16` stacked on Y   |
//! | `Block16`    | 16          | 8 `Block8`                 |
//! | `Block8`     | 8           | 8 `Block4`                 |
//! | `Block4`     | 4           | 8 `LeafBlock`              |
//! | `LeafBlock`  | 2           | dense buffer of 8 voxels   |
//!
//! Every block starts out uniform and is split lazily, the first time a different value is written into it. Writing the value
//! a region already has is free, so a chunk of mostly air and stone only pays for the blocks that straddle a boundary.
//!
//! ```
//! use sparse_voxels_core::prelude::*;
//! use sparse_voxels_storage::prelude::*;
//!
//! let mut chunk = ChunkOctree::new(0u16);
//! chunk.set(PointN([0, 0, 0]), 5);
//!
//! assert_eq!(chunk.get(PointN([0, 0, 0])), 5);
//! assert_eq!(chunk.get(PointN([1, 0, 0])), 0);
//!
//! let usage = chunk.memory_usage();
//! assert_eq!(usage.logical_voxels, 16 * 64 * 16);
//! assert!(usage.bytes_used < usage.dense_equivalent_bytes::<u16>());
//! ```
//!
//! Blocks never merge back into a uniform block, even if all of their voxels are rewritten to the same value, so memory usage
//! only grows as the chunk is edited.

mod leaf_block;
mod octant_block;

pub use leaf_block::LeafBlock;
pub use octant_block::OctantBlock;

use crate::{AccessError, Get, MemoryUsage, MemoryUsageAccounting, Set};

use sparse_voxels_core::prelude::*;

/// The shape of a chunk.
pub const CHUNK_SHAPE: Point3i = PointN([16, 64, 16]);

/// The extent of a chunk in chunk-local coordinates.
pub const CHUNK_EXTENT: Extent3i = Extent3i {
    minimum: Point3i::ZERO,
    shape: CHUNK_SHAPE,
};

/// A 4x4x4 block of 8 `LeafBlock`s.
pub type Block4<T> = OctantBlock<LeafBlock<T>, T>;
/// An 8x8x8 block of 8 `Block4`s.
pub type Block8<T> = OctantBlock<Block4<T>, T>;
/// A 16x16x16 block of 8 `Block8`s.
pub type Block16<T> = OctantBlock<Block8<T>, T>;

/// One level of the chunk schema: a cube of `EDGE_LENGTH` voxels that is either uniform or subdivided.
pub trait ChunkBlock<T>:
    Get<Point3i, Data = T> + Set<Point3i, Data = T> + MemoryUsageAccounting
{
    const EDGE_LENGTH: i32;
    const VOLUME: usize = (Self::EDGE_LENGTH * Self::EDGE_LENGTH * Self::EDGE_LENGTH) as usize;

    /// A block at `minimum` with `value` in every voxel. `minimum` must be a multiple of `EDGE_LENGTH`.
    fn new_uniform(minimum: Point3i, value: T) -> Self;

    fn minimum(&self) -> Point3i;

    /// The value of every voxel in the block, if the block has not been subdivided.
    fn uniform_value(&self) -> Option<T>;

    /// Calls `f` on every maximal uniform region in the block. Regions are disjoint and cover the whole block.
    fn for_each_region<F>(&self, f: &mut F)
    where
        F: FnMut(Extent3i, T);

    #[inline]
    fn extent(&self) -> Extent3i {
        Extent3i::from(Octant::new_unchecked(self.minimum(), Self::EDGE_LENGTH))
    }
}

/// Sparse storage for one 16x64x16 chunk of voxels.
///
/// Since 64 is not the edge length of a cube built from the lower levels, the chunk splits into exactly 4 `Block16`s stacked
/// along Y at heights 0, 16, 32 and 48, selected by `(y >> 4) & 3`.
#[derive(Clone, Debug)]
pub struct ChunkOctree<T> {
    state: ChunkState<T>,
}

#[derive(Clone, Debug)]
enum ChunkState<T> {
    Uniform(T),
    Split(Box<[Block16<T>; 4]>),
}

impl<T> ChunkOctree<T>
where
    T: Copy + PartialEq,
{
    /// A chunk with `initial_value` in every voxel.
    #[inline]
    pub fn new(initial_value: T) -> Self {
        Self {
            state: ChunkState::Uniform(initial_value),
        }
    }

    #[inline]
    pub fn extent(&self) -> Extent3i {
        CHUNK_EXTENT
    }

    /// Returns `true` iff the chunk has been split into its 4 `Block16`s.
    #[inline]
    pub fn is_split(&self) -> bool {
        matches!(self.state, ChunkState::Split(_))
    }

    /// The stacked `Block16`s of a split chunk, from bottom to top.
    #[inline]
    pub fn blocks(&self) -> Option<&[Block16<T>; 4]> {
        match &self.state {
            ChunkState::Uniform(_) => None,
            ChunkState::Split(blocks) => Some(blocks),
        }
    }

    /// Same as `get`, but returns an error instead of assuming `p` is in the chunk.
    #[inline]
    pub fn try_get(&self, p: Point3i) -> Result<T, AccessError> {
        Self::check_bounds(p)?;

        Ok(self.get(p))
    }

    /// Same as `set`, but returns an error instead of assuming `p` is in the chunk.
    #[inline]
    pub fn try_set(&mut self, p: Point3i, value: T) -> Result<(), AccessError> {
        Self::check_bounds(p)?;
        self.set(p, value);

        Ok(())
    }

    /// Calls `f` on every maximal uniform region of the chunk. Regions are disjoint and cover the whole chunk.
    pub fn for_each_region(&self, mut f: impl FnMut(Extent3i, T)) {
        match &self.state {
            ChunkState::Uniform(value) => f(CHUNK_EXTENT, *value),
            ChunkState::Split(blocks) => {
                for block in blocks.iter() {
                    block.for_each_region(&mut f);
                }
            }
        }
    }

    #[inline]
    fn block_index(p: Point3i) -> usize {
        debug_assert!(
            CHUNK_EXTENT.contains(p),
            "{:?} is outside of the chunk",
            p
        );

        ((p.y() >> 4) & 0x3) as usize
    }

    #[inline]
    fn check_bounds(p: Point3i) -> Result<(), AccessError> {
        if CHUNK_EXTENT.contains(p) {
            Ok(())
        } else {
            Err(AccessError::OutOfBounds {
                point: p,
                extent: CHUNK_EXTENT,
            })
        }
    }

    fn subdivide(&mut self, value: T) {
        #[cfg(feature = "tracing")]
        tracing::trace!("splitting chunk into stacked blocks");

        let blocks =
            Box::new([0, 1, 2, 3].map(|i| Block16::new_uniform(PointN([0, 16 * i, 0]), value)));
        self.state = ChunkState::Split(blocks);
    }
}

impl<T> Get<Point3i> for ChunkOctree<T>
where
    T: Copy + PartialEq,
{
    type Data = T;

    #[inline]
    fn get(&self, p: Point3i) -> T {
        match &self.state {
            ChunkState::Uniform(value) => *value,
            ChunkState::Split(blocks) => blocks[Self::block_index(p)].get(p),
        }
    }
}

impl<T> Set<Point3i> for ChunkOctree<T>
where
    T: Copy + PartialEq,
{
    type Data = T;

    #[inline]
    fn set(&mut self, p: Point3i, value: T) {
        let index = Self::block_index(p);
        if let ChunkState::Uniform(uniform) = self.state {
            if uniform == value {
                return;
            }
            self.subdivide(uniform);
        }
        if let ChunkState::Split(blocks) = &mut self.state {
            blocks[index].set(p, value);
        }
    }
}

impl<T> MemoryUsageAccounting for ChunkOctree<T>
where
    T: Copy + PartialEq,
{
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
    fn memory_usage(&self) -> MemoryUsage {
        let usage = match &self.state {
            ChunkState::Uniform(_) => MemoryUsage::node::<Self>(CHUNK_EXTENT.num_points()),
            ChunkState::Split(blocks) => {
                MemoryUsage::node::<Self>(0)
                    + blocks
                        .iter()
                        .map(|b| b.memory_usage())
                        .sum::<MemoryUsage>()
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(?usage, "chunk octree memory usage");

        usage
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

use super::ChunkBlock;
use crate::{Get, MemoryUsage, MemoryUsageAccounting, Set};

use sparse_voxels_core::prelude::*;

/// A cube-shaped block of the chunk schema with twice the edge length of its children, of type `C`.
///
/// The block stays uniform until the first write of a differing value, at which point it is split into 8 children seeded with
/// the uniform value. Once split, all reads and writes are forwarded to the child selected by the octant index of the point
/// relative to the block's minimum.
#[derive(Clone, Debug)]
pub struct OctantBlock<C, T> {
    minimum: Point3i,
    state: BlockState<C, T>,
}

#[derive(Clone, Debug)]
enum BlockState<C, T> {
    Uniform(T),
    Split(Box<[C; 8]>),
}

impl<C, T> OctantBlock<C, T>
where
    C: ChunkBlock<T>,
    T: Copy + PartialEq,
{
    /// log2 of the child edge length.
    const CHILD_SHIFT: i32 = C::EDGE_LENGTH.trailing_zeros() as i32;

    /// Returns `true` iff the block has been split into children.
    #[inline]
    pub fn is_split(&self) -> bool {
        matches!(self.state, BlockState::Split(_))
    }

    /// The children of a split block, in octant index order.
    #[inline]
    pub fn children(&self) -> Option<&[C; 8]> {
        match &self.state {
            BlockState::Uniform(_) => None,
            BlockState::Split(children) => Some(children),
        }
    }

    #[inline]
    fn child_index(&self, p: Point3i) -> usize {
        debug_assert!(
            self.extent().contains(p),
            "{:?} is not in the block {:?}",
            p,
            self.extent()
        );

        (p - self.minimum).octant_index(Self::CHILD_SHIFT)
    }

    fn subdivide(&mut self, value: T) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            minimum = ?self.minimum,
            edge_length = Self::EDGE_LENGTH,
            "splitting chunk block"
        );

        let octant = Octant::new_unchecked(self.minimum, Self::EDGE_LENGTH);
        let children = Box::new(
            [0, 1, 2, 3, 4, 5, 6, 7].map(|i| C::new_uniform(octant.child(i).minimum(), value)),
        );
        self.state = BlockState::Split(children);
    }
}

impl<C, T> Get<Point3i> for OctantBlock<C, T>
where
    C: ChunkBlock<T>,
    T: Copy + PartialEq,
{
    type Data = T;

    #[inline]
    fn get(&self, p: Point3i) -> T {
        match &self.state {
            BlockState::Uniform(value) => *value,
            BlockState::Split(children) => children[self.child_index(p)].get(p),
        }
    }
}

impl<C, T> Set<Point3i> for OctantBlock<C, T>
where
    C: ChunkBlock<T>,
    T: Copy + PartialEq,
{
    type Data = T;

    #[inline]
    fn set(&mut self, p: Point3i, value: T) {
        let index = self.child_index(p);
        if let BlockState::Uniform(uniform) = self.state {
            if uniform == value {
                return;
            }
            self.subdivide(uniform);
        }
        if let BlockState::Split(children) = &mut self.state {
            children[index].set(p, value);
        }
    }
}

impl<C, T> MemoryUsageAccounting for OctantBlock<C, T>
where
    C: ChunkBlock<T>,
    T: Copy + PartialEq,
{
    fn memory_usage(&self) -> MemoryUsage {
        match &self.state {
            BlockState::Uniform(_) => MemoryUsage::node::<Self>(Self::VOLUME),
            BlockState::Split(children) => {
                MemoryUsage::node::<Self>(0)
                    + children
                        .iter()
                        .map(|c| c.memory_usage())
                        .sum::<MemoryUsage>()
            }
        }
    }
}

impl<C, T> ChunkBlock<T> for OctantBlock<C, T>
where
    C: ChunkBlock<T>,
    T: Copy + PartialEq,
{
    const EDGE_LENGTH: i32 = 2 * C::EDGE_LENGTH;

    #[inline]
    fn new_uniform(minimum: Point3i, value: T) -> Self {
        Self {
            minimum,
            state: BlockState::Uniform(value),
        }
    }

    #[inline]
    fn minimum(&self) -> Point3i {
        self.minimum
    }

    #[inline]
    fn uniform_value(&self) -> Option<T> {
        match self.state {
            BlockState::Uniform(value) => Some(value),
            BlockState::Split(_) => None,
        }
    }

    fn for_each_region<F>(&self, f: &mut F)
    where
        F: FnMut(Extent3i, T),
    {
        match &self.state {
            BlockState::Uniform(value) => f(self.extent(), *value),
            BlockState::Split(children) => {
                for child in children.iter() {
                    child.for_each_region(f);
                }
            }
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

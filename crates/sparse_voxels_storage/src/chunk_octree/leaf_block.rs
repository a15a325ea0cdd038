use super::ChunkBlock;
use crate::{Get, MemoryUsage, MemoryUsageAccounting, Set};

use sparse_voxels_core::prelude::*;

/// The smallest block of the chunk schema, covering 2x2x2 voxels.
///
/// A uniform leaf stores just one value. The first write of a different value allocates a dense buffer of 8 values, which is
/// kept for the rest of the leaf's life.
#[derive(Clone, Debug)]
pub struct LeafBlock<T> {
    minimum: Point3i,
    state: LeafState<T>,
}

#[derive(Clone, Debug)]
enum LeafState<T> {
    Uniform(T),
    Dense(Box<[T; 8]>),
}

impl<T> LeafBlock<T> {
    /// Returns `true` iff the leaf has allocated its dense buffer.
    #[inline]
    pub fn is_dense(&self) -> bool {
        matches!(self.state, LeafState::Dense(_))
    }

    #[inline]
    fn buffer_index(&self, p: Point3i) -> usize {
        debug_assert!(
            Extent3i::from_min_and_shape(self.minimum, Point3i::fill(2)).contains(p),
            "{:?} is not in the leaf at {:?}",
            p,
            self.minimum
        );

        (p - self.minimum).octant_index(0)
    }
}

impl<T> Get<Point3i> for LeafBlock<T>
where
    T: Copy,
{
    type Data = T;

    #[inline]
    fn get(&self, p: Point3i) -> T {
        match &self.state {
            LeafState::Uniform(value) => *value,
            LeafState::Dense(values) => values[self.buffer_index(p)],
        }
    }
}

impl<T> Set<Point3i> for LeafBlock<T>
where
    T: Copy + PartialEq,
{
    type Data = T;

    #[inline]
    fn set(&mut self, p: Point3i, value: T) {
        let index = self.buffer_index(p);
        match &mut self.state {
            LeafState::Uniform(uniform) => {
                if *uniform == value {
                    return;
                }
                let mut values = Box::new([*uniform; 8]);
                values[index] = value;
                self.state = LeafState::Dense(values);
            }
            LeafState::Dense(values) => values[index] = value,
        }
    }
}

impl<T> MemoryUsageAccounting for LeafBlock<T> {
    fn memory_usage(&self) -> MemoryUsage {
        let node = MemoryUsage::node::<Self>(8);
        match self.state {
            LeafState::Uniform(_) => node,
            LeafState::Dense(_) => node + MemoryUsage::dense_buffer::<T>(8),
        }
    }
}

impl<T> ChunkBlock<T> for LeafBlock<T>
where
    T: Copy + PartialEq,
{
    const EDGE_LENGTH: i32 = 2;

    #[inline]
    fn new_uniform(minimum: Point3i, value: T) -> Self {
        Self {
            minimum,
            state: LeafState::Uniform(value),
        }
    }

    #[inline]
    fn minimum(&self) -> Point3i {
        self.minimum
    }

    #[inline]
    fn uniform_value(&self) -> Option<T> {
        match self.state {
            LeafState::Uniform(value) => Some(value),
            LeafState::Dense(_) => None,
        }
    }

    fn for_each_region<F>(&self, f: &mut F)
    where
        F: FnMut(Extent3i, T),
    {
        match &self.state {
            LeafState::Uniform(value) => f(self.extent(), *value),
            LeafState::Dense(values) => {
                for (offset, value) in Point3i::CUBE_CORNER_OFFSETS.iter().zip(values.iter()) {
                    f(
                        Extent3i::from_min_and_shape(self.minimum + *offset, Point3i::ONES),
                        *value,
                    );
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

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn writing_uniform_value_does_not_allocate() {
        let mut leaf = LeafBlock::new_uniform(Point3i::fill(2), 3u8);
        let before = leaf.memory_usage();

        leaf.set(PointN([3, 2, 3]), 3);

        assert!(!leaf.is_dense());
        assert_eq!(leaf.memory_usage(), before);
    }

    #[test]
    fn first_different_write_keeps_siblings() {
        let minimum = Point3i::fill(2);
        let mut leaf = LeafBlock::new_uniform(minimum, 3u8);

        leaf.set(PointN([3, 2, 3]), 9);

        assert!(leaf.is_dense());
        assert_eq!(leaf.uniform_value(), None);
        for p in leaf.extent().iter_points() {
            let expected = if p == PointN([3, 2, 3]) { 9 } else { 3 };
            assert_eq!(leaf.get(p), expected);
        }
        assert_eq!(
            leaf.memory_usage().bytes_used,
            std::mem::size_of::<LeafBlock<u8>>() + 8
        );
    }

    #[test]
    fn buffer_layout_is_x_then_y_then_z() {
        let mut leaf = LeafBlock::new_uniform(Point3i::ZERO, 0u8);
        for (i, offset) in Point3i::CUBE_CORNER_OFFSETS.iter().enumerate() {
            leaf.set(*offset, i as u8);
        }

        match &leaf.state {
            LeafState::Dense(values) => assert_eq!(**values, [0, 1, 2, 3, 4, 5, 6, 7]),
            LeafState::Uniform(_) => panic!("leaf should be dense"),
        }
    }
}

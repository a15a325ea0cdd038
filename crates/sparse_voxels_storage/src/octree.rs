//! The `Octree` is a sparse voxel storage over an arbitrary box, chosen at runtime.
//!
//! It follows the same rules as the `ChunkOctree`, but with a single self-similar node type that knows its own bounding box.
//! The requested box is padded so that each dimension is a power of 2 (at least 2), and every node is either:
//!
//! - uniform: one value for the whole node
//! - dense: a 2x2x2 node holding one value per voxel
//! - split: 8 octants around the node's midpoint, or 4 slabs stacked on Y when the node is exactly as tall as the slab split
//!   height (64 by default, which reproduces the shape of the `ChunkOctree`)
//!
//! When the padded box is not a cube, an octant split only bisects the axes that are longer than 2, so a node is never thinner
//! than the minimal 2x2x2 leaf.
//!
//! ```
//! use sparse_voxels_core::prelude::*;
//! use sparse_voxels_storage::prelude::*;
//!
//! // Rounded up to a 4x4x4 cube.
//! let mut octree = Octree::new(Point3i::ZERO, PointN([3, 3, 3]), 1u8);
//! assert_eq!(octree.extent().shape, Point3i::fill(4));
//!
//! octree.set(PointN([3, 3, 3]), 7);
//! assert_eq!(octree.get(PointN([3, 3, 3])), 7);
//! assert_eq!(octree.get(PointN([0, 0, 0])), 1);
//! ```
//!
//! # Points outside of the octree
//!
//! The octree does not remember the box it was requested with, only the padded one. Reading a point outside of the padded box
//! returns `T::default()` and writing one does nothing. Use `try_get` and `try_set` to get an error instead.

mod builder;

pub use builder::{OctreeBuilder, DEFAULT_SLAB_SPLIT_HEIGHT};

use crate::{AccessError, Get, MemoryUsage, MemoryUsageAccounting, OctreeError, Set};

use sparse_voxels_core::prelude::*;

/// A sparse voxel storage over a power-of-2 padded box. See the [module docs](self) for details.
#[derive(Clone, Debug)]
pub struct Octree<T> {
    root: OctreeNode<T>,
    slab_split_height: Option<i32>,
}

impl<T> Octree<T>
where
    T: Copy + Default + PartialEq,
{
    /// An octree covering at least the box from `min` (inclusive) to `max` (exclusive), with `initial_value` everywhere.
    ///
    /// Panics if `min` has a negative component or if `max < min` on some axis. See `try_new` for a fallible version.
    pub fn new(min: Point3i, max: Point3i, initial_value: T) -> Self {
        Self::try_new(min, max, initial_value).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Same as `new`, but returns an error for invalid bounds.
    pub fn try_new(min: Point3i, max: Point3i, initial_value: T) -> Result<Self, OctreeError> {
        if !(min <= max) {
            return Err(OctreeError::InvertedBounds { min, max });
        }

        OctreeBuilder::new(Extent3i::from_min_and_lub(min, max), initial_value).try_build()
    }

    pub(crate) fn from_parts(
        extent: Extent3i,
        initial_value: T,
        slab_split_height: Option<i32>,
    ) -> Self {
        Self {
            root: OctreeNode::new(extent, initial_value),
            slab_split_height,
        }
    }

    /// The padded extent covered by the octree.
    #[inline]
    pub fn extent(&self) -> &Extent3i {
        &self.root.extent
    }

    #[inline]
    pub fn slab_split_height(&self) -> Option<i32> {
        self.slab_split_height
    }

    /// Same as `get`, but returns an error for points outside of the padded extent.
    #[inline]
    pub fn try_get(&self, p: Point3i) -> Result<T, AccessError> {
        self.check_bounds(p)?;

        Ok(self.root.get(p))
    }

    /// Same as `set`, but returns an error for points outside of the padded extent.
    #[inline]
    pub fn try_set(&mut self, p: Point3i, value: T) -> Result<(), AccessError> {
        self.check_bounds(p)?;
        self.root.set(p, value, self.slab_split_height);

        Ok(())
    }

    /// Calls `f` on every maximal uniform region of the octree. Regions are disjoint and cover the whole padded extent.
    pub fn for_each_region(&self, mut f: impl FnMut(Extent3i, T)) {
        self.root.for_each_region(&mut f)
    }

    #[inline]
    fn check_bounds(&self, p: Point3i) -> Result<(), AccessError> {
        if self.root.extent.contains(p) {
            Ok(())
        } else {
            Err(AccessError::OutOfBounds {
                point: p,
                extent: self.root.extent,
            })
        }
    }
}

impl<T> Get<Point3i> for Octree<T>
where
    T: Copy + Default + PartialEq,
{
    type Data = T;

    #[inline]
    fn get(&self, p: Point3i) -> T {
        if !self.root.extent.contains(p) {
            #[cfg(feature = "tracing")]
            tracing::warn!(point = ?p, extent = ?self.root.extent, "read outside of octree");

            return T::default();
        }

        self.root.get(p)
    }
}

impl<T> Set<Point3i> for Octree<T>
where
    T: Copy + Default + PartialEq,
{
    type Data = T;

    #[inline]
    fn set(&mut self, p: Point3i, value: T) {
        if !self.root.extent.contains(p) {
            #[cfg(feature = "tracing")]
            tracing::warn!(point = ?p, extent = ?self.root.extent, "ignored write outside of octree");

            return;
        }

        self.root.set(p, value, self.slab_split_height);
    }
}

impl<T> MemoryUsageAccounting for Octree<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
    fn memory_usage(&self) -> MemoryUsage {
        let usage = self.root.memory_usage();

        #[cfg(feature = "tracing")]
        tracing::debug!(?usage, "octree memory usage");

        usage
    }
}

#[derive(Clone, Debug)]
struct OctreeNode<T> {
    extent: Extent3i,
    mid: Point3i,
    state: NodeState<T>,
}

#[derive(Clone, Debug)]
enum NodeState<T> {
    Uniform(T),
    Dense(Box<[T; 8]>),
    Split(Box<[OctreeNode<T>]>),
}

impl<T> OctreeNode<T>
where
    T: Copy + Default + PartialEq,
{
    const LEAF_SHAPE: Point3i = Point3i::fill(2);

    fn new(extent: Extent3i, value: T) -> Self {
        Self {
            extent,
            mid: extent.minimum + extent.shape.map_components(|c| c / 2),
            state: NodeState::Uniform(value),
        }
    }

    fn get(&self, p: Point3i) -> T {
        match &self.state {
            NodeState::Uniform(value) => *value,
            NodeState::Dense(values) => values[Self::dense_index(self.extent.minimum, p)],
            NodeState::Split(children) => match children.iter().find(|c| c.extent.contains(p)) {
                Some(child) => child.get(p),
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(point = ?p, extent = ?self.extent, "no child contains point");

                    T::default()
                }
            },
        }
    }

    fn set(&mut self, p: Point3i, value: T, slab_split_height: Option<i32>) {
        if let NodeState::Uniform(uniform) = self.state {
            if uniform == value {
                return;
            }
            self.subdivide(uniform, slab_split_height);
        }
        let minimum = self.extent.minimum;
        match &mut self.state {
            NodeState::Uniform(_) => {}
            NodeState::Dense(values) => values[Self::dense_index(minimum, p)] = value,
            NodeState::Split(children) => {
                if let Some(child) = children.iter_mut().find(|c| c.extent.contains(p)) {
                    child.set(p, value, slab_split_height);
                }
            }
        }
    }

    #[inline]
    fn dense_index(minimum: Point3i, p: Point3i) -> usize {
        (p - minimum).octant_index(0)
    }

    fn subdivide(&mut self, value: T, slab_split_height: Option<i32>) {
        #[cfg(feature = "tracing")]
        tracing::trace!(extent = ?self.extent, "splitting octree node");

        self.state = if self.extent.shape == Self::LEAF_SHAPE {
            NodeState::Dense(Box::new([value; 8]))
        } else if slab_split_height == Some(self.extent.height()) {
            NodeState::Split(self.slabs(value))
        } else {
            NodeState::Split(self.octants(value))
        };
    }

    /// 4 slabs stacked along Y, each a quarter of the node's height.
    fn slabs(&self, value: T) -> Box<[Self]> {
        let slab_height = self.extent.height() / 4;
        let slab_shape = PointN([self.extent.width(), slab_height, self.extent.depth()]);

        (0..4)
            .map(|i| {
                let minimum = self.extent.minimum + PointN([0, i * slab_height, 0]);

                Self::new(Extent3i::from_min_and_shape(minimum, slab_shape), value)
            })
            .collect()
    }

    /// The octants around `mid`, skipping the upper half of any axis too short to bisect. Children are in octant index order.
    fn octants(&self, value: T) -> Box<[Self]> {
        let lub = self.extent.least_upper_bound();
        let split_axes = self.extent.shape.map_components(|c| (c > 2) as i32);

        Point3i::CUBE_CORNER_OFFSETS
            .iter()
            .filter(|corner| **corner * split_axes == **corner)
            .map(|corner| {
                let mut minimum = self.extent.minimum;
                let mut least_upper_bound = lub;
                for axis in 0..3 {
                    if split_axes.at(axis) == 0 {
                        continue;
                    }
                    if corner.at(axis) == 0 {
                        least_upper_bound.0[axis] = self.mid.at(axis);
                    } else {
                        minimum.0[axis] = self.mid.at(axis);
                    }
                }

                Self::new(Extent3i::from_min_and_lub(minimum, least_upper_bound), value)
            })
            .collect()
    }

    fn for_each_region(&self, f: &mut impl FnMut(Extent3i, T)) {
        match &self.state {
            NodeState::Uniform(value) => f(self.extent, *value),
            NodeState::Dense(values) => {
                for (offset, value) in Point3i::CUBE_CORNER_OFFSETS.iter().zip(values.iter()) {
                    f(
                        Extent3i::from_min_and_shape(self.extent.minimum + *offset, Point3i::ONES),
                        *value,
                    );
                }
            }
            NodeState::Split(children) => {
                for child in children.iter() {
                    child.for_each_region(f);
                }
            }
        }
    }
}

impl<T> OctreeNode<T> {
    fn memory_usage(&self) -> MemoryUsage {
        match &self.state {
            NodeState::Uniform(_) => MemoryUsage::node::<Self>(self.extent.num_points()),
            NodeState::Dense(_) => MemoryUsage::node::<Self>(8) + MemoryUsage::dense_buffer::<T>(8),
            NodeState::Split(children) => {
                MemoryUsage::node::<Self>(0)
                    + children
                        .iter()
                        .map(|c| c.memory_usage())
                        .sum::<MemoryUsage>()
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
    use crate::{Array3, ChunkOctree, CHUNK_EXTENT};

    use pretty_assertions::assert_eq;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    #[test]
    fn rounds_up_to_powers_of_2() {
        let octree = Octree::new(PointN([0, 0, 0]), PointN([3, 3, 3]), 0u8);
        assert_eq!(
            *octree.extent(),
            Extent3i::from_min_and_shape(Point3i::ZERO, Point3i::fill(4))
        );

        let octree = Octree::new(PointN([2, 0, 4]), PointN([7, 64, 5]), 0u8);
        assert_eq!(
            *octree.extent(),
            Extent3i::from_min_and_shape(PointN([2, 0, 4]), PointN([8, 64, 2]))
        );
    }

    #[test]
    fn padded_corner_is_addressable() {
        let mut octree = Octree::new(Point3i::ZERO, PointN([3, 3, 3]), 4u8);

        octree.set(PointN([3, 3, 3]), 7);

        assert_eq!(octree.get(PointN([3, 3, 3])), 7);
        assert_eq!(octree.get(PointN([0, 0, 0])), 4);
    }

    #[test]
    fn fresh_octree_is_uniform_everywhere() {
        let octree = Octree::new(PointN([4, 4, 4]), PointN([12, 12, 12]), 9i32);

        for p in octree.extent().iter_points() {
            assert_eq!(octree.get(p), 9);
        }
        assert_eq!(octree.memory_usage().num_nodes, 1);
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        assert_eq!(
            Octree::try_new(PointN([-1, 0, 0]), Point3i::fill(4), 0u8).unwrap_err(),
            OctreeError::NegativeMinimum(PointN([-1, 0, 0]))
        );
        assert_eq!(
            Octree::try_new(Point3i::fill(4), PointN([8, 2, 8]), 0u8).unwrap_err(),
            OctreeError::InvertedBounds {
                min: Point3i::fill(4),
                max: PointN([8, 2, 8])
            }
        );
    }

    #[test]
    fn bounds_too_large_to_pad_are_rejected() {
        let max = PointN([(1 << 30) + 1, 2, 2]);

        assert_eq!(
            Octree::try_new(Point3i::ZERO, max, 0u8).unwrap_err(),
            OctreeError::ExtentTooLarge(Extent3i::from_min_and_lub(Point3i::ZERO, max))
        );
    }

    #[test]
    #[should_panic]
    fn new_panics_on_negative_minimum() {
        Octree::new(PointN([0, -2, 0]), Point3i::fill(4), 0u8);
    }

    #[test]
    fn degenerate_box_still_has_a_leaf() {
        let mut octree = Octree::new(Point3i::ZERO, Point3i::ZERO, 0u8);
        assert_eq!(octree.extent().shape, Point3i::fill(2));

        octree.set(Point3i::ONES, 3);
        assert_eq!(octree.get(Point3i::ONES), 3);
        assert_eq!(octree.get(Point3i::ZERO), 0);
        assert_eq!(octree.memory_usage().num_dense_leaves, 1);
    }

    #[test]
    fn outside_reads_default_and_outside_writes_are_ignored() {
        let mut octree = Octree::new(Point3i::ZERO, Point3i::fill(8), 5u8);
        let before = octree.memory_usage();

        octree.set(PointN([8, 0, 0]), 1);

        assert_eq!(octree.memory_usage(), before);
        assert_eq!(octree.get(PointN([8, 0, 0])), 0);
        assert_eq!(
            octree.try_get(PointN([8, 0, 0])),
            Err(AccessError::OutOfBounds {
                point: PointN([8, 0, 0]),
                extent: *octree.extent()
            })
        );
        assert!(octree.try_set(PointN([0, 0, -1]), 1).is_err());
        assert_eq!(octree.try_get(PointN([7, 7, 7])), Ok(5));
    }

    #[test]
    fn chunk_shaped_octree_splits_into_slabs() {
        let mut octree = Octree::new(Point3i::ZERO, PointN([16, 64, 16]), 0u8);
        octree.set(PointN([0, 63, 0]), 1);

        let slabs = match &octree.root.state {
            NodeState::Split(children) => children,
            _ => panic!("root should be split"),
        };
        let slab_extents: Vec<_> = slabs.iter().map(|s| s.extent).collect();
        assert_eq!(
            slab_extents,
            (0..4)
                .map(|i| Extent3i::from_min_and_shape(PointN([0, 16 * i, 0]), Point3i::fill(16)))
                .collect::<Vec<_>>()
        );

        let top_slab_children = match &slabs[3].state {
            NodeState::Split(children) => children.len(),
            _ => panic!("top slab should be split"),
        };
        assert_eq!(top_slab_children, 8);
    }

    #[test]
    fn slab_split_can_be_disabled() {
        let mut octree = OctreeBuilder {
            extent: CHUNK_EXTENT,
            initial_value: 0u8,
            slab_split_height: None,
        }
        .build();
        octree.set(PointN([0, 63, 0]), 1);

        let children = match &octree.root.state {
            NodeState::Split(children) => children,
            _ => panic!("root should be split"),
        };
        // Width and depth are bisected along with the height.
        assert_eq!(children.len(), 8);
        assert_eq!(children[0].extent.shape, PointN([8, 32, 8]));
        assert_eq!(octree.get(PointN([0, 63, 0])), 1);
    }

    #[test]
    fn flat_box_never_splits_thinner_than_a_leaf() {
        let mut octree = Octree::new(Point3i::ZERO, PointN([8, 2, 4]), 0u8);

        for p in octree.extent().iter_points() {
            octree.set(p, (p.x() + p.z()) as u8);
        }

        for p in octree.extent().iter_points() {
            assert_eq!(octree.get(p), (p.x() + p.z()) as u8);
        }
        let usage = octree.memory_usage();
        assert_eq!(usage.num_dense_leaves, 8);
        assert_eq!(usage.logical_voxels, 64);
    }

    #[test]
    fn octant_writes_leave_siblings_untouched() {
        let mut octree = Octree::new(Point3i::ZERO, Point3i::fill(16), 0u16);
        let octant = Extent3i::from_min_and_shape(PointN([8, 0, 8]), Point3i::fill(8));

        for (i, p) in octant.iter_points().enumerate() {
            octree.set(p, i as u16 + 1);
        }

        for p in octree.extent().iter_points() {
            if octant.contains(p) {
                assert_ne!(octree.get(p), 0);
            } else {
                assert_eq!(octree.get(p), 0);
            }
        }
    }

    #[test]
    fn writing_existing_value_is_free_and_memory_never_shrinks() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut octree = Octree::new(Point3i::ZERO, Point3i::fill(32), 0u8);
        let mut last_bytes = octree.memory_usage().bytes_used;

        for _ in 0..2000 {
            let p = random_point(&mut rng, octree.extent());
            let value = rng.gen_range(0..3);

            let existing = octree.get(p);
            octree.set(p, value);

            let bytes = octree.memory_usage().bytes_used;
            if existing == value {
                assert_eq!(bytes, last_bytes);
            } else {
                assert!(bytes >= last_bytes);
            }
            last_bytes = bytes;
        }
    }

    #[test]
    fn matches_dense_array_for_random_writes() {
        let mut rng = SmallRng::seed_from_u64(1234);
        let requested = Extent3i::from_min_and_lub(PointN([2, 0, 1]), PointN([13, 30, 9]));
        let mut octree = Octree::new(requested.minimum, requested.least_upper_bound(), 0u16);
        let mut array = Array3::fill(requested, 0u16);

        for _ in 0..10_000 {
            let p = random_point(&mut rng, &requested);
            if rng.gen_bool(0.5) {
                let value = rng.gen_range(0..4);
                octree.set(p, value);
                array.set(p, value);
            } else {
                assert_eq!(octree.get(p), array.get(p));
            }
        }

        array.for_each(|p, value| assert_eq!(octree.get(p), value));
    }

    #[test]
    fn agrees_with_chunk_octree() {
        let mut rng = SmallRng::seed_from_u64(99);
        let mut octree = Octree::new(Point3i::ZERO, PointN([16, 64, 16]), 0u8);
        let mut chunk = ChunkOctree::new(0u8);

        for _ in 0..5000 {
            let p = random_point(&mut rng, &CHUNK_EXTENT);
            let value = rng.gen_range(0..2);
            octree.set(p, value);
            chunk.set(p, value);
        }

        for p in CHUNK_EXTENT.iter_points() {
            assert_eq!(octree.get(p), chunk.get(p));
        }
        let octree_usage = octree.memory_usage();
        let chunk_usage = chunk.memory_usage();
        assert_eq!(octree_usage.logical_voxels, chunk_usage.logical_voxels);
        assert_eq!(octree_usage.num_nodes, chunk_usage.num_nodes);
        assert_eq!(octree_usage.num_dense_leaves, chunk_usage.num_dense_leaves);
    }

    #[test]
    fn regions_cover_padded_extent() {
        let mut octree = Octree::new(Point3i::ZERO, PointN([5, 6, 7]), 1u8);
        octree.set(PointN([4, 5, 6]), 2);

        let mut covered = 0;
        octree.for_each_region(|extent, value| {
            covered += extent.num_points();
            for p in extent.iter_points() {
                assert_eq!(octree.get(p), value);
            }
        });

        assert_eq!(covered, octree.extent().num_points());
    }

    fn random_point(rng: &mut impl Rng, extent: &Extent3i) -> Point3i {
        let lub = extent.least_upper_bound();

        PointN([
            rng.gen_range(extent.minimum.x()..lub.x()),
            rng.gen_range(extent.minimum.y()..lub.y()),
            rng.gen_range(extent.minimum.z()..lub.z()),
        ])
    }
}

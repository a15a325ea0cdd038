use super::Octree;
use crate::OctreeError;

use sparse_voxels_core::prelude::*;

/// The node height at which an `Octree` splits into 4 stacked slabs instead of 8 octants, unless configured otherwise. This
/// matches the height of a `ChunkOctree`.
pub const DEFAULT_SLAB_SPLIT_HEIGHT: i32 = 64;

/// Everything needed to construct an `Octree`.
///
/// ```
/// use sparse_voxels_core::prelude::*;
/// use sparse_voxels_storage::prelude::*;
///
/// let builder = OctreeBuilder {
///     extent: Extent3i::from_min_and_shape(Point3i::ZERO, PointN([32, 128, 32])),
///     initial_value: 0u16,
///     slab_split_height: Some(128),
/// };
/// let octree = builder.build();
/// assert_eq!(octree.slab_split_height(), Some(128));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OctreeBuilder<T> {
    /// The requested extent. The octree pads it so each dimension is a power of 2, at least 2.
    pub extent: Extent3i,
    pub initial_value: T,
    /// Nodes of exactly this height split into 4 slabs along Y. `None` disables slab splits.
    pub slab_split_height: Option<i32>,
}

impl<T> OctreeBuilder<T>
where
    T: Copy + Default + PartialEq,
{
    /// A builder with the default slab split height.
    pub fn new(extent: Extent3i, initial_value: T) -> Self {
        Self {
            extent,
            initial_value,
            slab_split_height: Some(DEFAULT_SLAB_SPLIT_HEIGHT),
        }
    }

    /// The extent the octree will actually cover, or an error if the requested extent is invalid.
    pub fn padded_extent(&self) -> Result<Extent3i, OctreeError> {
        if !self.extent.minimum.is_non_negative() {
            return Err(OctreeError::NegativeMinimum(self.extent.minimum));
        }
        if !self.extent.shape.is_non_negative() {
            return Err(OctreeError::NegativeShape(self.extent.shape));
        }
        let at_least_a_leaf = Extent3i::from_min_and_shape(
            self.extent.minimum,
            self.extent.shape.join(Point3i::fill(2)),
        );

        at_least_a_leaf
            .padded_to_powers_of_2()
            .ok_or(OctreeError::ExtentTooLarge(self.extent))
    }

    pub fn try_build(self) -> Result<Octree<T>, OctreeError> {
        let extent = self.padded_extent()?;
        if let Some(height) = self.slab_split_height {
            if height < 8 || height.count_ones() != 1 {
                return Err(OctreeError::InvalidSlabSplitHeight(height));
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(requested = ?self.extent, padded = ?extent, "building octree");

        Ok(Octree::from_parts(
            extent,
            self.initial_value,
            self.slab_split_height,
        ))
    }

    /// Same as `try_build`, but panics on invalid configuration.
    pub fn build(self) -> Octree<T> {
        self.try_build().unwrap_or_else(|e| panic!("{}", e))
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

use crate::{Extent3i, Point3i};

/// A cube-shaped extent whose edge length is a power of 2. This is the space covered by a single node of an octree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Octant {
    minimum: Point3i,
    edge_length: i32,
}

impl Octant {
    /// The caller must ensure that `edge_length` is a power of 2.
    #[inline]
    pub fn new_unchecked(minimum: Point3i, edge_length: i32) -> Self {
        Self {
            minimum,
            edge_length,
        }
    }

    #[inline]
    pub fn minimum(&self) -> Point3i {
        self.minimum
    }

    /// The child octant with half the edge length at `octant_index`, where bit 0 selects the upper X half, bit 1 the upper Y
    /// half and bit 2 the upper Z half.
    #[inline]
    pub fn child(&self, octant_index: usize) -> Self {
        let half_edge_length = self.edge_length >> 1;

        Self {
            minimum: self.minimum + Point3i::CUBE_CORNER_OFFSETS[octant_index] * half_edge_length,
            edge_length: half_edge_length,
        }
    }
}

impl From<Octant> for Extent3i {
    #[inline]
    fn from(octant: Octant) -> Self {
        Extent3i::from_min_and_shape(octant.minimum, Point3i::fill(octant.edge_length))
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

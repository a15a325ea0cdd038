//! The core data types for addressing voxels in a bounded 3D integer lattice:
//! - `Point3i`: a 3D integer point
//! - `Extent3i`: an axis-aligned box with half-open bounds
//! - `Octant`: a cube-shaped extent with power of 2 edge length

pub mod extent;
pub mod int_math;
pub mod octant;
pub mod point;

pub use extent::{Extent3PointIter, Extent3i, ExtentN};
pub use int_math::next_power_of_two;
pub use octant::Octant;
pub use point::{Point3i, PointN};

pub mod prelude {
    pub use super::{Extent3i, ExtentN, Octant, Point3i, PointN};
}

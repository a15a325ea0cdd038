use core::ops::{Add, BitAnd, Mul, Shr, Sub};
use std::cmp::{max, min, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3-dimensional point, which is just a primitive array of type `N`.
///
/// ```
/// use sparse_voxels_core::PointN;
///
/// let p1 = PointN([1, 2, 3]);
/// let p2 = PointN([3, 4, 5]);
///
/// assert_eq!(p1 + p2, PointN([4, 6, 8]));
/// assert_eq!(p2 - p1, PointN([2, 2, 2]));
/// assert_eq!(p1 * 2, PointN([2, 4, 6]));
/// ```
///
/// There is also a partial order defined on points which says that a point A is greater than a point B if and only if all of
/// the components of point A are greater than point B. This is useful for checking if a point is inside of the box between two
/// other points:
///
/// ```
/// use sparse_voxels_core::PointN;
///
/// let min = PointN([0, 0, 0]);
/// let least_upper_bound = PointN([3, 3, 3]);
///
/// let p = PointN([0, 1, 2]);
/// assert!(min <= p && p < least_upper_bound);
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PointN<N>(pub N);

/// A 3-dimensional point with scalar type `i32`. Voxel coordinates are always expressed with this type.
pub type Point3i = PointN<[i32; 3]>;

impl Point3i {
    /// The origin.
    pub const ZERO: Self = PointN([0; 3]);
    /// A point of all ones.
    pub const ONES: Self = PointN([1; 3]);

    /// The 8 corners of the unit cube, in octant index order: bit 0 is X, bit 1 is Y, bit 2 is Z.
    pub const CUBE_CORNER_OFFSETS: [Self; 8] = [
        PointN([0, 0, 0]),
        PointN([1, 0, 0]),
        PointN([0, 1, 0]),
        PointN([1, 1, 0]),
        PointN([0, 0, 1]),
        PointN([1, 0, 1]),
        PointN([0, 1, 1]),
        PointN([1, 1, 1]),
    ];

    #[inline]
    pub const fn fill(value: i32) -> Self {
        PointN([value; 3])
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.0[2]
    }

    /// Returns the component specified by index. I.e. X = 0, Y = 1, Z = 2.
    #[inline]
    pub fn at(&self, component_index: usize) -> i32 {
        self.0[component_index]
    }

    /// Returns the point after applying `f` component-wise.
    #[inline]
    pub fn map_components(&self, f: impl Fn(i32) -> i32) -> Self {
        PointN([f(self.x()), f(self.y()), f(self.z())])
    }

    /// Component-wise maximum.
    #[inline]
    pub fn join(&self, other: Self) -> Self {
        PointN([
            max(self.x(), other.x()),
            max(self.y(), other.y()),
            max(self.z(), other.z()),
        ])
    }

    /// Component-wise minimum.
    #[inline]
    pub fn meet(&self, other: Self) -> Self {
        PointN([
            min(self.x(), other.x()),
            min(self.y(), other.y()),
            min(self.z(), other.z()),
        ])
    }

    /// The product of all components.
    #[inline]
    pub fn volume(&self) -> i32 {
        self.x() * self.y() * self.z()
    }

    /// Returns `true` iff no component is negative.
    #[inline]
    pub fn is_non_negative(&self) -> bool {
        *self >= Self::ZERO
    }

    /// Interleaves the lowest bit of each component (after shifting right by `shift`) into a 3-bit octant index
    /// `(z << 2) | (y << 1) | x`, matching the order of `CUBE_CORNER_OFFSETS`.
    #[inline]
    pub fn octant_index(&self, shift: i32) -> usize {
        let bits = (*self >> shift) & 1;

        ((bits.z() << 2) | (bits.y() << 1) | bits.x()) as usize
    }
}

impl PartialOrd for Point3i {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self < other {
            Some(Ordering::Less)
        } else if self > other {
            Some(Ordering::Greater)
        } else if self == other {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        self.x() < other.x() && self.y() < other.y() && self.z() < other.z()
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        self.x() > other.x() && self.y() > other.y() && self.z() > other.z()
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        self.x() <= other.x() && self.y() <= other.y() && self.z() <= other.z()
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        self.x() >= other.x() && self.y() >= other.y() && self.z() >= other.z()
    }
}

impl Add for Point3i {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        PointN([self.x() + rhs.x(), self.y() + rhs.y(), self.z() + rhs.z()])
    }
}

impl Sub for Point3i {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        PointN([self.x() - rhs.x(), self.y() - rhs.y(), self.z() - rhs.z()])
    }
}

impl Mul<i32> for Point3i {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        self.map_components(|c| c * rhs)
    }
}

impl Mul for Point3i {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        PointN([self.x() * rhs.x(), self.y() * rhs.y(), self.z() * rhs.z()])
    }
}

impl Shr<i32> for Point3i {
    type Output = Self;

    #[inline]
    fn shr(self, rhs: i32) -> Self {
        self.map_components(|c| c >> rhs)
    }
}

impl BitAnd<i32> for Point3i {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: i32) -> Self {
        self.map_components(|c| c & rhs)
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

    #[test]
    fn octant_index_matches_corner_offsets() {
        for (index, corner) in Point3i::CUBE_CORNER_OFFSETS.iter().enumerate() {
            assert_eq!(corner.octant_index(0), index);
            assert_eq!((*corner * 4).octant_index(2), index);
        }
    }

    #[test]
    fn octant_index_ignores_other_bits() {
        // Only bit 1 of each component matters at shift 1.
        assert_eq!(PointN([3, 0, 1]).octant_index(1), 0b001);
        assert_eq!(PointN([5, 6, 2]).octant_index(1), 0b110);
    }

    #[test]
    fn partial_order_is_componentwise() {
        let a = PointN([0, 1, 2]);
        let b = PointN([1, 2, 3]);
        let c = PointN([2, 0, 2]);

        assert!(a < b);
        assert!(a <= a);
        assert_eq!(a.partial_cmp(&c), None);
        assert!(!(c < b));
    }
}

use crate::{int_math::next_power_of_two, Point3i, PointN};

use core::ops::Range;
use itertools::{iproduct, ConsTuples, Product};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3-dimensional extent with scalar type `i32`.
pub type Extent3i = ExtentN<[i32; 3]>;

/// An axis-aligned box. This is mathematically the Cartesian product of a half-closed interval `[a, b)` in each dimension, so
/// a point `p` is contained iff `minimum <= p < minimum + shape`.
///
/// This is the bounding box type used by the generic `Octree`: every node knows its own extent.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ExtentN<N> {
    /// The least point contained in the extent.
    pub minimum: PointN<N>,
    /// The length of each dimension.
    pub shape: PointN<N>,
}

impl Extent3i {
    /// The default representation of an extent as the minimum point and shape.
    #[inline]
    pub fn from_min_and_shape(minimum: Point3i, shape: Point3i) -> Self {
        Self { minimum, shape }
    }

    /// An alternative representation of an extent as the minimum point and least upper bound.
    #[inline]
    pub fn from_min_and_lub(minimum: Point3i, least_upper_bound: Point3i) -> Self {
        // We want to avoid negative shape components.
        let shape = (least_upper_bound - minimum).join(Point3i::ZERO);

        Self { minimum, shape }
    }

    /// The least point `p` for which all points `q` in the extent satisfy `q < p`.
    #[inline]
    pub fn least_upper_bound(&self) -> Point3i {
        self.minimum + self.shape
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.shape.x()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.shape.y()
    }

    #[inline]
    pub fn depth(&self) -> i32 {
        self.shape.z()
    }

    /// The number of points contained in the extent.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.shape.volume() as usize
    }

    /// Returns `true` iff the number of points in the extent is 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    /// Returns `true` iff the point `p` is contained in this extent.
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        let lub = self.least_upper_bound();

        self.minimum <= p && p < lub
    }

    /// Returns `true` unless the extents are disjoint along some axis.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.minimum < other.least_upper_bound() && other.minimum < self.least_upper_bound()
    }

    /// Returns the extent containing only the points in both `self` and `other`.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        let minimum = self.minimum.join(other.minimum);
        let lub = self.least_upper_bound().meet(other.least_upper_bound());

        Self::from_min_and_lub(minimum, lub)
    }

    /// Returns `true` iff the intersection of `self` and `other` is equal to `self`.
    #[inline]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.intersection(other).eq(self)
    }

    /// Grows the shape of the extent so that each dimension is a power of 2, keeping the same minimum. Returns `None` if a
    /// padded dimension or the padded least upper bound would overflow `i32`.
    ///
    /// ```
    /// # use sparse_voxels_core::prelude::*;
    /// let extent = Extent3i::from_min_and_lub(Point3i::ZERO, PointN([3, 64, 5]));
    /// assert_eq!(extent.padded_to_powers_of_2().unwrap().shape, PointN([4, 64, 8]));
    ///
    /// let huge = Extent3i::from_min_and_shape(Point3i::ZERO, PointN([(1 << 30) + 1, 1, 1]));
    /// assert_eq!(huge.padded_to_powers_of_2(), None);
    /// ```
    #[inline]
    pub fn padded_to_powers_of_2(&self) -> Option<Self> {
        let mut shape = self.shape;
        for axis in 0..3 {
            let padded = next_power_of_two(shape.at(axis))?;
            self.minimum.at(axis).checked_add(padded)?;
            shape.0[axis] = padded;
        }

        Some(Self::from_min_and_shape(self.minimum, shape))
    }

    /// Iterate over all points in the extent, in row-major order (X varies fastest).
    /// ```
    /// # use sparse_voxels_core::prelude::*;
    /// #
    /// let extent = Extent3i::from_min_and_shape(PointN([0, 0, 0]), PointN([2, 2, 1]));
    /// let points = extent.iter_points().collect::<Vec<_>>();
    /// assert_eq!(points, vec![
    ///     PointN([0, 0, 0]), PointN([1, 0, 0]), PointN([0, 1, 0]), PointN([1, 1, 0])
    /// ]);
    /// ```
    #[inline]
    pub fn iter_points(&self) -> Extent3PointIter {
        let lub = self.least_upper_bound();

        Extent3PointIter {
            // iproduct is opposite of row-major order.
            product_iter: iproduct!(
                self.minimum.z()..lub.z(),
                self.minimum.y()..lub.y(),
                self.minimum.x()..lub.x()
            ),
        }
    }
}

type RangeProduct2 = Product<Range<i32>, Range<i32>>;
type RangeProduct3 = Product<RangeProduct2, Range<i32>>;

/// An iterator over all points in an `Extent3i`.
pub struct Extent3PointIter {
    product_iter: ConsTuples<RangeProduct3, ((i32, i32), i32)>,
}

impl Iterator for Extent3PointIter {
    type Item = Point3i;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.product_iter.next().map(|(z, y, x)| PointN([x, y, z]))
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

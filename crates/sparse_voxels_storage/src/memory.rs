//! Memory accounting for comparing sparse storages against a dense array of the same volume.
//!
//! The accounting is a pure, read-only traversal. Every node contributes the size of its own struct (origin or bounds, state
//! tag, and the uniform value or child pointer it holds), and every dense leaf buffer contributes `8 * size_of::<T>()`. Child
//! arrays are not charged separately, because each child charges its own struct size when it is visited.

use auto_impl::auto_impl;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use std::mem::size_of;

/// The result of a memory accounting traversal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MemoryUsage {
    /// Total bytes held by the storage.
    pub bytes_used: usize,
    /// The number of voxels the storage represents, i.e. its volume.
    pub logical_voxels: usize,
    /// The number of tree nodes visited.
    pub num_nodes: usize,
    /// The number of leaves holding a dense per-voxel buffer.
    pub num_dense_leaves: usize,
}

impl MemoryUsage {
    /// The cost of a single node of type `N` that represents `logical_voxels` voxels, not including anything it owns.
    #[inline]
    pub fn node<N>(logical_voxels: usize) -> Self {
        Self {
            bytes_used: size_of::<N>(),
            logical_voxels,
            num_nodes: 1,
            num_dense_leaves: 0,
        }
    }

    /// The cost of a heap-allocated buffer holding one `T` per voxel. This does not count as a node.
    #[inline]
    pub fn dense_buffer<T>(num_voxels: usize) -> Self {
        Self {
            bytes_used: num_voxels * size_of::<T>(),
            logical_voxels: 0,
            num_nodes: 0,
            num_dense_leaves: 1,
        }
    }

    /// The number of bytes a dense array of `T` would need to represent the same volume.
    #[inline]
    pub fn dense_equivalent_bytes<T>(&self) -> usize {
        self.logical_voxels * size_of::<T>()
    }

    /// `bytes_used` as a fraction of `dense_equivalent_bytes`. Lower is better.
    #[inline]
    pub fn compression_ratio<T>(&self) -> f64 {
        self.bytes_used as f64 / self.dense_equivalent_bytes::<T>() as f64
    }
}

impl Add for MemoryUsage {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            bytes_used: self.bytes_used + rhs.bytes_used,
            logical_voxels: self.logical_voxels + rhs.logical_voxels,
            num_nodes: self.num_nodes + rhs.num_nodes,
            num_dense_leaves: self.num_dense_leaves + rhs.num_dense_leaves,
        }
    }
}

impl AddAssign for MemoryUsage {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for MemoryUsage {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Storage that can report how much memory it occupies.
#[auto_impl(&, &mut, Box)]
pub trait MemoryUsageAccounting {
    fn memory_usage(&self) -> MemoryUsage;
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

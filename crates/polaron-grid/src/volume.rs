//! The local chunk's grid-volume descriptor.
//!
//! A [`GridVolume`] describes the slab of grid points held by one chunk of
//! the domain-decomposed simulation: per-axis point counts, the row-major
//! memory strides the field arrays are laid out with, and the iteration
//! range over *owned* points. The one-cell boundary layer around the owned
//! interior holds halo values exchanged with neighbouring chunks; the update
//! kernels read it (through strided neighbour access) but never write it.
//!
//! Reduced dimensionality is expressed with singleton axes: a 1-D line of
//! `n` points along z is `GridVolume::new([1, 1, n])`. Singleton axes have
//! zero stride so offsets along them are no-ops.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::direction::Direction;

/// Geometry of one chunk's local grid volume.
///
/// Layout is row-major with z fastest: the linear index of point
/// $(i_x, i_y, i_z)$ is $(i_x n_y + i_y) n_z + i_z$.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridVolume {
    num: [usize; 3],
}

impl GridVolume {
    /// Create a volume with the given per-axis point counts.
    ///
    /// # Panics
    /// Panics if any axis has zero points.
    pub fn new(num: [usize; 3]) -> Self {
        for (n, d) in num.iter().zip(Direction::ALL) {
            assert!(*n >= 1, "Axis {:?} must have at least one point", d);
        }
        Self { num }
    }

    /// Number of points along `d`.
    pub fn num(&self, d: Direction) -> usize {
        self.num[d.index()]
    }

    /// Total number of points in the local volume (owned plus halo layer).
    /// This is the allocation length of every dense per-point array.
    pub fn ntot(&self) -> usize {
        self.num[0] * self.num[1] * self.num[2]
    }

    /// Memory stride along `d`, in scalars.
    ///
    /// Zero for singleton axes. The sign convention at the call site is part
    /// of the kernel contract: strides are used as-is for electric
    /// components and negated for magnetic ones, reflecting the opposite
    /// relative offset of the two staggered locations.
    pub fn stride(&self, d: Direction) -> isize {
        if self.num[d.index()] == 1 {
            return 0;
        }
        let [_, ny, nz] = self.num;
        match d {
            Direction::X => (ny * nz) as isize,
            Direction::Y => nz as isize,
            Direction::Z => 1,
        }
    }

    fn owned_range(n: usize) -> Range<usize> {
        if n == 1 {
            0..1
        } else {
            1..n - 1
        }
    }

    /// Number of owned points (the interior of the local volume).
    pub fn num_owned(&self) -> usize {
        self.num.iter().map(|&n| Self::owned_range(n).len()).product()
    }

    /// Linear indices of the owned points, in ascending order.
    ///
    /// Every owned point has its full stencil neighbourhood (one cell in
    /// each non-singleton direction) inside the local volume, so strided
    /// neighbour reads from the kernels never leave the arrays.
    pub fn owned_points(&self) -> impl Iterator<Item = usize> {
        let [nx, ny, nz] = self.num;
        Self::owned_range(nx).flat_map(move |ix| {
            Self::owned_range(ny).flat_map(move |iy| {
                Self::owned_range(nz).map(move |iz| (ix * ny + iy) * nz + iz)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides_are_row_major_z_fastest() {
        let gv = GridVolume::new([4, 5, 6]);
        assert_eq!(gv.ntot(), 120);
        assert_eq!(gv.stride(Direction::Z), 1);
        assert_eq!(gv.stride(Direction::Y), 6);
        assert_eq!(gv.stride(Direction::X), 30);
    }

    #[test]
    fn test_singleton_axes_have_zero_stride() {
        let gv = GridVolume::new([1, 1, 8]);
        assert_eq!(gv.stride(Direction::X), 0);
        assert_eq!(gv.stride(Direction::Y), 0);
        assert_eq!(gv.stride(Direction::Z), 1);
    }

    #[test]
    fn test_owned_points_are_the_interior_of_a_line() {
        let gv = GridVolume::new([1, 1, 6]);
        assert_eq!(gv.num_owned(), 4);
        let owned: Vec<usize> = gv.owned_points().collect();
        assert_eq!(owned, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_owned_count_in_three_dimensions() {
        let gv = GridVolume::new([4, 4, 4]);
        assert_eq!(gv.num_owned(), 8);
        for i in gv.owned_points() {
            // Every owned point can reach all six neighbours in-array.
            assert!(i >= 21 && i + 21 < gv.ntot(), "Index {} too close to the edge", i);
        }
        assert_eq!(gv.owned_points().count(), gv.num_owned());
    }

    #[test]
    fn test_two_point_axis_owns_nothing() {
        let gv = GridVolume::new([1, 1, 2]);
        assert_eq!(gv.num_owned(), 0);
        assert_eq!(gv.owned_points().count(), 0);
    }
}

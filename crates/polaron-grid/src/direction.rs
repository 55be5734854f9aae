//! Spatial directions on the simulation grid.

use serde::{Deserialize, Serialize};

/// One of the three spatial axes of the grid.
///
/// Directions form a cyclic ordering $X \to Y \to Z \to X$, so the "next"
/// and "next-next" axes relative to a given one are well defined. The update
/// kernels use [`Direction::cycle`] to build the (own axis, first
/// off-diagonal, second off-diagonal) triple for anisotropic coupling.
///
/// A grid of reduced dimensionality does not shrink this set; unused axes
/// are expressed as singleton axes of the
/// [`GridVolume`](crate::volume::GridVolume), which carry zero stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    X,
    Y,
    Z,
}

impl Direction {
    /// All directions, in cyclic order.
    pub const ALL: [Direction; 3] = [Direction::X, Direction::Y, Direction::Z];

    /// Dense index in `0..3`, for table storage.
    pub fn index(self) -> usize {
        match self {
            Direction::X => 0,
            Direction::Y => 1,
            Direction::Z => 2,
        }
    }

    /// The direction `n` steps around the X → Y → Z → X cycle.
    pub fn cycle(self, n: usize) -> Direction {
        Direction::ALL[(self.index() + n) % 3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_around() {
        assert_eq!(Direction::X.cycle(1), Direction::Y);
        assert_eq!(Direction::X.cycle(2), Direction::Z);
        assert_eq!(Direction::Z.cycle(1), Direction::X);
        assert_eq!(Direction::Y.cycle(2), Direction::X);
        for d in Direction::ALL {
            assert_eq!(d.cycle(0), d);
            assert_eq!(d.cycle(3), d);
        }
    }
}

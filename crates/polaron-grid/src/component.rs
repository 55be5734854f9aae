//! Staggered-grid field components.
//!
//! A component tags one scalar field quantity at one staggered-grid
//! location: a field kind (electric or magnetic) plus an axis. Electric
//! components live on cell edges and magnetic components on cell faces, so
//! the two kinds sit at opposite relative offsets — the update kernels
//! encode this by negating memory strides for magnetic components.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Which physical field a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Electric,
    Magnetic,
}

/// One scalar field component on the staggered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    Ex,
    Ey,
    Ez,
    Hx,
    Hy,
    Hz,
}

impl Component {
    /// All components, in the canonical order used for backing-store layout.
    pub const ALL: [Component; 6] = [
        Component::Ex,
        Component::Ey,
        Component::Ez,
        Component::Hx,
        Component::Hy,
        Component::Hz,
    ];

    /// Dense index in `0..6`, for table storage.
    pub fn index(self) -> usize {
        match self {
            Component::Ex => 0,
            Component::Ey => 1,
            Component::Ez => 2,
            Component::Hx => 3,
            Component::Hy => 4,
            Component::Hz => 5,
        }
    }

    /// The field kind (electric or magnetic).
    pub fn kind(self) -> FieldKind {
        if self.index() < 3 {
            FieldKind::Electric
        } else {
            FieldKind::Magnetic
        }
    }

    pub fn is_electric(self) -> bool {
        self.kind() == FieldKind::Electric
    }

    pub fn is_magnetic(self) -> bool {
        self.kind() == FieldKind::Magnetic
    }

    /// The component's own axis.
    pub fn axis(self) -> Direction {
        Direction::ALL[self.index() % 3]
    }

    /// The component of the same kind with its axis re-pointed to `d`.
    ///
    /// For example, `Ex.with_axis(Y)` is `Ey` and `Hz.with_axis(X)` is `Hx`.
    /// This is how off-diagonal coupling names its driving component.
    pub fn with_axis(self, d: Direction) -> Component {
        Component::ALL[(self.index() / 3) * 3 + d.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_of_each_component() {
        assert_eq!(Component::Ex.axis(), Direction::X);
        assert_eq!(Component::Ez.axis(), Direction::Z);
        assert_eq!(Component::Hy.axis(), Direction::Y);
    }

    #[test]
    fn test_with_axis_preserves_kind() {
        for c in Component::ALL {
            for d in Direction::ALL {
                let cp = c.with_axis(d);
                assert_eq!(cp.kind(), c.kind());
                assert_eq!(cp.axis(), d);
            }
        }
        assert_eq!(Component::Ex.with_axis(Direction::Y), Component::Ey);
        assert_eq!(Component::Hz.with_axis(Direction::X), Component::Hx);
    }
}

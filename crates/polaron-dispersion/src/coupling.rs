//! The coupling tensor σ: spatially varying response strength.
//!
//! For each (component, direction) pair a susceptibility carries either a
//! dense per-point coupling array over the local volume, or the *trivial*
//! marker — coupling known to be zero everywhere, contributing nothing and
//! requiring no storage. The diagonal entry (direction equal to the
//! component's own axis) is the ordinary isotropic response strength;
//! off-diagonal entries drive anisotropic cross-coupling between field
//! directions.

use polaron_grid::component::Component;
use polaron_grid::direction::Direction;
use serde::{Deserialize, Serialize};

use crate::error::DispersionError;

/// Per-component, per-direction coupling coefficients for one
/// susceptibility, over one chunk's grid volume.
///
/// `Clone` deep-copies every non-trivial array (trivial entries stay
/// trivial), which is what chunk replication relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouplingTensor {
    ntot: usize,
    entries: [[Option<Vec<f64>>; 3]; 6],
}

impl CouplingTensor {
    /// A tensor with every entry trivial, over a volume of `ntot` points.
    pub fn trivial(ntot: usize) -> Self {
        Self {
            ntot,
            entries: std::array::from_fn(|_| std::array::from_fn(|_| None)),
        }
    }

    /// Install the coupling array for one (component, direction) entry.
    pub fn set(
        &mut self,
        c: Component,
        d: Direction,
        sigma: Vec<f64>,
    ) -> Result<(), DispersionError> {
        if sigma.len() != self.ntot {
            return Err(DispersionError::CouplingLength {
                component: c,
                direction: d,
                got: sigma.len(),
                want: self.ntot,
            });
        }
        self.entries[c.index()][d.index()] = Some(sigma);
        Ok(())
    }

    /// Install a spatially uniform coupling value for one entry.
    pub fn set_uniform(&mut self, c: Component, d: Direction, value: f64) {
        self.entries[c.index()][d.index()] = Some(vec![value; self.ntot]);
    }

    /// The coupling array, or `None` for a trivial entry.
    pub fn get(&self, c: Component, d: Direction) -> Option<&[f64]> {
        self.entries[c.index()][d.index()].as_deref()
    }

    /// Mutable access for the materials-assignment layer.
    pub fn get_mut(&mut self, c: Component, d: Direction) -> Option<&mut [f64]> {
        self.entries[c.index()][d.index()].as_deref_mut()
    }

    pub fn is_trivial(&self, c: Component, d: Direction) -> bool {
        self.entries[c.index()][d.index()].is_none()
    }

    /// True when every entry is trivial.
    pub fn is_entirely_trivial(&self) -> bool {
        self.entries.iter().flatten().all(|e| e.is_none())
    }

    /// Allocation length of every non-trivial array.
    pub fn ntot(&self) -> usize {
        self.ntot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_entirely_trivial() {
        let sigma = CouplingTensor::trivial(10);
        assert!(sigma.is_entirely_trivial());
        for c in Component::ALL {
            for d in Direction::ALL {
                assert!(sigma.is_trivial(c, d));
                assert!(sigma.get(c, d).is_none());
            }
        }
    }

    #[test]
    fn test_set_rejects_wrong_length() {
        let mut sigma = CouplingTensor::trivial(10);
        let err = sigma
            .set(Component::Ex, Direction::Y, vec![1.0; 4])
            .unwrap_err();
        assert!(matches!(err, DispersionError::CouplingLength { got: 4, want: 10, .. }));
        assert!(sigma.is_trivial(Component::Ex, Direction::Y));
    }

    #[test]
    fn test_set_uniform_fills_the_volume() {
        let mut sigma = CouplingTensor::trivial(6);
        sigma.set_uniform(Component::Hz, Direction::Z, 0.25);
        let arr = sigma.get(Component::Hz, Direction::Z).unwrap();
        assert_eq!(arr.len(), 6);
        assert!(arr.iter().all(|&v| v == 0.25));
        assert!(!sigma.is_entirely_trivial());
    }
}

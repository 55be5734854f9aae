//! Field and polarisation array sets for one chunk.
//!
//! Each chunk holds, per field component and per copy, an optional dense
//! array over the local grid volume. Two copies exist because fields are
//! complex under Bloch-periodic boundaries; real-field runs use copy 0
//! only. Whether a given array is present is the allocation decision made
//! once at setup (see [`crate::alloc`]) — the update kernels branch on
//! presence once per component, never per point.
//!
//! [`FieldSet`] is the read-only view of the driving fields W the external
//! solver passes in; [`PolarisationSet`] holds the mutable polarisation
//! arrays P owned by the chunk for one susceptibility.

use polaron_grid::component::Component;

use crate::error::DispersionError;

/// Number of per-component field copies (real and imaginary parts).
pub const NUM_FIELD_COPIES: usize = 2;

type ComponentArrays = [[Option<Vec<f64>>; NUM_FIELD_COPIES]; 6];

fn empty_arrays() -> ComponentArrays {
    std::array::from_fn(|_| std::array::from_fn(|_| None))
}

/// The driving-field arrays W for one chunk, per component and copy.
#[derive(Debug, Clone)]
pub struct FieldSet {
    ntot: usize,
    arrays: ComponentArrays,
}

impl FieldSet {
    /// An empty field set over a volume of `ntot` points.
    pub fn new(ntot: usize) -> Self {
        Self {
            ntot,
            arrays: empty_arrays(),
        }
    }

    /// Install the array for one component copy.
    pub fn set(
        &mut self,
        c: Component,
        copy: usize,
        values: Vec<f64>,
    ) -> Result<(), DispersionError> {
        if values.len() != self.ntot {
            return Err(DispersionError::FieldLength {
                component: c,
                copy,
                got: values.len(),
                want: self.ntot,
            });
        }
        self.arrays[c.index()][copy] = Some(values);
        Ok(())
    }

    pub fn get(&self, c: Component, copy: usize) -> Option<&[f64]> {
        self.arrays[c.index()][copy].as_deref()
    }

    /// Mutable access, for the external solver writing new field values.
    pub fn get_mut(&mut self, c: Component, copy: usize) -> Option<&mut [f64]> {
        self.arrays[c.index()][copy].as_deref_mut()
    }

    pub fn has(&self, c: Component, copy: usize) -> bool {
        self.arrays[c.index()][copy].is_some()
    }

    pub fn ntot(&self) -> usize {
        self.ntot
    }
}

/// The polarisation arrays P for one (chunk, susceptibility) pair.
///
/// Allocation must be uniform across the distributed grid: if any chunk
/// allocates P for a component, every chunk must, even where the local
/// coupling is trivial, so the boundary-exchange layer never meets a
/// missing array. That invariant spans chunks and is enforced by the
/// external setup layer, not checkable here.
#[derive(Debug, Clone)]
pub struct PolarisationSet {
    ntot: usize,
    arrays: ComponentArrays,
}

impl PolarisationSet {
    /// An empty polarisation set over a volume of `ntot` points.
    pub fn new(ntot: usize) -> Self {
        Self {
            ntot,
            arrays: empty_arrays(),
        }
    }

    /// Allocate a zero-initialised array for one component copy.
    /// Allocating twice is idempotent and keeps the existing state.
    pub fn allocate(&mut self, c: Component, copy: usize) {
        self.arrays[c.index()][copy].get_or_insert_with(|| vec![0.0; self.ntot]);
    }

    pub fn get(&self, c: Component, copy: usize) -> Option<&[f64]> {
        self.arrays[c.index()][copy].as_deref()
    }

    pub fn get_mut(&mut self, c: Component, copy: usize) -> Option<&mut [f64]> {
        self.arrays[c.index()][copy].as_deref_mut()
    }

    pub fn has(&self, c: Component, copy: usize) -> bool {
        self.arrays[c.index()][copy].is_some()
    }

    /// Number of allocated (component, copy) pairs.
    pub fn num_allocated(&self) -> usize {
        self.arrays
            .iter()
            .flatten()
            .filter(|a| a.is_some())
            .count()
    }

    pub fn ntot(&self) -> usize {
        self.ntot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_rejects_wrong_length() {
        let mut w = FieldSet::new(8);
        let err = w.set(Component::Ex, 0, vec![0.0; 5]).unwrap_err();
        assert!(err.to_string().contains("has 5 points"));
        assert!(!w.has(Component::Ex, 0));
    }

    #[test]
    fn test_allocate_is_idempotent() {
        let mut p = PolarisationSet::new(4);
        p.allocate(Component::Ey, 0);
        p.get_mut(Component::Ey, 0).unwrap()[2] = 7.5;
        p.allocate(Component::Ey, 0);
        assert_eq!(p.get(Component::Ey, 0).unwrap()[2], 7.5);
        assert_eq!(p.num_allocated(), 1);
    }
}

//! The susceptibility contract: identity, capability set, and chains.
//!
//! A susceptibility is one material response model attached to a field —
//! the Lorentzian family in [`crate::lorentzian`], with room for others.
//! The surrounding solver talks to every model through the same small
//! capability set: allocation queries at setup, backing-store sizing,
//! per-chunk replication, and the per-timestep update.
//!
//! Superposed responses on the same field form a [`SusceptibilityChain`],
//! an ordered sequence owned by the chunk. Replicating a chain for a new
//! chunk deep-copies every member; members never share coupling storage
//! across chunks.

use std::sync::atomic::{AtomicU32, Ordering};

use polaron_grid::component::Component;
use polaron_grid::volume::GridVolume;
use serde::{Deserialize, Serialize};

use crate::alloc;
use crate::coupling::CouplingTensor;
use crate::fields::{FieldSet, PolarisationSet};

/// Unique identity of a susceptibility, preserved across chunk replication.
///
/// Chunks compare ids to recognise clones of the same material response
/// when stitching boundary data together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SusceptibilityId(pub u32);

/// Monotonic id allocator, owned by the materials-assignment layer for the
/// lifetime of the program.
#[derive(Debug, Default)]
pub struct IdFactory {
    next: AtomicU32,
}

impl IdFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> SusceptibilityId {
        SusceptibilityId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// The capability set every susceptibility model implements.
///
/// One instance is sized for one chunk's grid volume. The solver calls the
/// allocation queries once at setup, `num_internal_data` once per chunk to
/// size the backing store, and `update_p` once per timestep per chunk.
pub trait Susceptibility: Send + Sync {
    /// Identity, shared by all chunk clones of the same response.
    fn id(&self) -> SusceptibilityId;

    /// Human-readable name of the response model.
    fn model_name(&self) -> &str;

    /// The coupling tensor σ for this chunk.
    fn coupling(&self) -> &CouplingTensor;

    /// Whether polarisation storage P\[c\] is needed. See
    /// [`alloc::needs_polarisation`]; callers must aggregate the answer
    /// over all chunks.
    fn needs_polarisation(&self, c: Component, w: &FieldSet) -> bool {
        alloc::needs_polarisation(self.coupling(), c, w)
    }

    /// Whether not-owned (halo) values of W\[c\] must be exchanged before
    /// each update. See [`alloc::needs_w_notowned`]; aggregate over chunks.
    fn needs_w_notowned(&self, c: Component, w: &FieldSet) -> bool {
        alloc::needs_w_notowned(self.coupling(), c, w)
    }

    /// Scalar count of cross-timestep internal state, for sizing the
    /// chunk's backing store. Must agree with the layout `update_p`
    /// actually traverses.
    fn num_internal_data(&self, p: &PolarisationSet, gv: &GridVolume) -> usize;

    /// Advance every active polarisation component one timestep, in place.
    ///
    /// `w` holds the driving fields at the current step, fully settled
    /// including any halo values the allocation policy asked for; `w_prev`
    /// is the previous step, reserved for models that need field history.
    /// `internal` is the chunk's backing store for this susceptibility,
    /// sized by [`Susceptibility::num_internal_data`].
    ///
    /// # Panics
    /// Panics if the backing store is mis-sized or a polarisation array
    /// promised by the allocation policy is missing — setup-layer bugs,
    /// not runtime data errors.
    fn update_p(
        &self,
        p: &mut PolarisationSet,
        w: &FieldSet,
        w_prev: &FieldSet,
        dt: f64,
        gv: &GridVolume,
        internal: &mut [f64],
    );

    /// Deep-copy this susceptibility for a new chunk: same id and
    /// parameters, independently owned coupling arrays, no storage aliasing
    /// with the original.
    fn clone_for_chunk(&self) -> Box<dyn Susceptibility>;
}

/// An ordered superposition of susceptibilities applied to the same field.
#[derive(Default)]
pub struct SusceptibilityChain {
    members: Vec<Box<dyn Susceptibility>>,
}

impl SusceptibilityChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sus: Box<dyn Susceptibility>) {
        self.members.push(sus);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Susceptibility> {
        self.members.iter().map(|m| m.as_ref())
    }

    /// Replicate the whole chain for a new chunk, preserving order and ids.
    pub fn clone_for_chunk(&self) -> Self {
        log::debug!("Replicating {} susceptibilities for a new chunk", self.members.len());
        Self {
            members: self.members.iter().map(|m| m.clone_for_chunk()).collect(),
        }
    }

    /// Total backing-store size for the chain, one polarisation set per
    /// member, in chain order.
    pub fn total_internal_data(&self, pols: &[PolarisationSet], gv: &GridVolume) -> usize {
        assert_eq!(
            pols.len(),
            self.members.len(),
            "One polarisation set per chain member"
        );
        self.members
            .iter()
            .zip(pols)
            .map(|(m, p)| m.num_internal_data(p, gv))
            .sum()
    }

    /// Update every member in chain order, carving each member's region out
    /// of one shared backing-store block.
    ///
    /// # Panics
    /// Panics if `pols` and the chain disagree in length, or if `internal`
    /// is not exactly [`SusceptibilityChain::total_internal_data`] long.
    pub fn update_all(
        &self,
        pols: &mut [PolarisationSet],
        w: &FieldSet,
        w_prev: &FieldSet,
        dt: f64,
        gv: &GridVolume,
        internal: &mut [f64],
    ) {
        assert_eq!(
            pols.len(),
            self.members.len(),
            "One polarisation set per chain member"
        );
        let mut cursor = 0;
        for (m, p) in self.members.iter().zip(pols.iter_mut()) {
            let n = m.num_internal_data(p, gv);
            m.update_p(p, w, w_prev, dt, gv, &mut internal[cursor..cursor + n]);
            cursor += n;
        }
        assert_eq!(
            cursor,
            internal.len(),
            "Backing store sized inconsistently with the chain"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_factory_is_monotonic() {
        let factory = IdFactory::new();
        let a = factory.next_id();
        let b = factory.next_id();
        let c = factory.next_id();
        assert_eq!(a, SusceptibilityId(0));
        assert_eq!(b, SusceptibilityId(1));
        assert_eq!(c, SusceptibilityId(2));
    }
}

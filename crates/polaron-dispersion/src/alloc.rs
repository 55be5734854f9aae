//! Setup-time allocation-policy queries.
//!
//! Two pure queries decide, once at setup and never per timestep, which
//! polarisation arrays a chunk must allocate and whether neighbour-owned
//! field values have to be exchanged before each update.
//!
//! Both queries must be evaluated over the *union* of all chunks: coupling
//! that is trivial in this chunk may be non-trivial elsewhere, and the
//! resulting allocation must be uniform across the grid (see
//! [`crate::fields::PolarisationSet`]). The aggregation across chunks is
//! the caller's responsibility; these functions answer for one tensor.

use polaron_grid::component::Component;
use polaron_grid::direction::Direction;

use crate::coupling::CouplingTensor;
use crate::fields::FieldSet;

/// Whether polarisation storage P\[c\] is needed at all.
///
/// True iff some direction `d` has non-trivial coupling σ(c, d) *and* the
/// field array driving it — the component with c's axis re-pointed to `d` —
/// is actually present in the simulated field set. An absent driving field
/// means the coupling can never contribute, so no storage is needed
/// regardless of the tensor's contents.
pub fn needs_polarisation(sigma: &CouplingTensor, c: Component, w: &FieldSet) -> bool {
    Direction::ALL
        .iter()
        .any(|&d| !sigma.is_trivial(c, d) && w.has(c.with_axis(d), 0))
}

/// Whether the update of some *other* component will read field values of
/// `c` at grid points this chunk does not own.
///
/// Off-diagonal coupling reaches one cell across the chunk boundary, so if
/// a component cP = c-repointed-to-d needs polarisation and couples back
/// through σ(cP, c's-own-axis), the halo values of W\[c\] must be exchanged
/// before the timestep proceeds.
pub fn needs_w_notowned(sigma: &CouplingTensor, c: Component, w: &FieldSet) -> bool {
    Direction::ALL
        .iter()
        .filter(|&&d| d != c.axis())
        .any(|&d| {
            let cp = c.with_axis(d);
            needs_polarisation(sigma, cp, w) && !sigma.is_trivial(cp, c.axis())
        })
}

//! The damped-oscillator (Lorentzian) susceptibility kernel.
//!
//! The polarisation obeys a damped harmonic-oscillator ODE driven by the
//! field W, discretised as a two-level recurrence per grid point:
//!
//! $$
//! P^{n+1} = \frac{1}{1+\Gamma\Delta t/2}\Bigl(
//!     (2 - (\Omega\Delta t)^2)\,P^{n}
//!     - (1-\Gamma\Delta t/2)\,P^{n-1}
//!     + (\Omega\Delta t)^2\,\sigma W^{n} \Bigr)
//! $$
//!
//! with $\Omega = 2\pi f_0$ and $\Gamma = 2\pi\gamma$. The internal backing
//! store holds exactly the $P^{n-1}$ level, one scalar per active
//! component copy per owned point. Anisotropic coupling adds one or two
//! off-diagonal driving terms, each interpolated onto the updated
//! component's staggered location by [`offdiag_average`].
//!
//! Everything here is floating-point-order sensitive: the grouping of the
//! recurrence, the four-point average, and the preference for the first
//! non-trivial off-diagonal direction are all part of the numeric contract
//! and must not be reassociated.

use std::f64::consts::PI;

use polaron_grid::component::Component;
use polaron_grid::volume::GridVolume;
use serde::{Deserialize, Serialize};

use crate::coupling::CouplingTensor;
use crate::fields::{FieldSet, PolarisationSet, NUM_FIELD_COPIES};
use crate::susceptibility::{Susceptibility, SusceptibilityId};

/// A single Lorentzian resonance, spatially weighted by a coupling tensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LorentzianSusceptibility {
    id: SusceptibilityId,
    /// Resonance frequency $f_0$ (solver frequency units).
    pub omega_0: f64,
    /// Damping rate $\gamma$ (same units as `omega_0`).
    pub gamma: f64,
    /// Zero the $(\Omega\Delta t)^2$ self-term of the recurrence, keeping
    /// the driving term. Used for zero-frequency (Drude) poles, where the
    /// ordinary restoring term is redundant and destabilising.
    pub no_omega_0_denominator: bool,
    coupling: CouplingTensor,
}

impl LorentzianSusceptibility {
    pub fn new(
        id: SusceptibilityId,
        omega_0: f64,
        gamma: f64,
        no_omega_0_denominator: bool,
        coupling: CouplingTensor,
    ) -> Self {
        Self {
            id,
            omega_0,
            gamma,
            no_omega_0_denominator,
            coupling,
        }
    }

    /// A Drude pole: a Lorentzian with the restoring self-term disabled.
    pub fn drude(
        id: SusceptibilityId,
        omega_0: f64,
        gamma: f64,
        coupling: CouplingTensor,
    ) -> Self {
        Self::new(id, omega_0, gamma, true, coupling)
    }

    /// Mutable coupling access for the materials-assignment layer.
    pub fn coupling_mut(&mut self) -> &mut CouplingTensor {
        &mut self.coupling
    }
}

/// Stable four-point average interpolating an off-diagonal driving term
/// onto the location of the component being updated.
///
/// The off-diagonal field naturally lives at a different staggered
/// location; the average
///
/// $$
/// \tfrac{1}{4}\bigl( (\sigma_i + \sigma_{i-s})\,w_i
///   + (\sigma_{i+s'} + \sigma_{i+s'-s})\,w_{i+s'} \bigr)
/// $$
///
/// (own-axis stride $s$, off-diagonal stride $s'$) brings it onto the
/// updated component's location without exciting the checkerboard mode a
/// naive two-point average would. The grouping and evaluation order are
/// normative; downstream validation compares against this exact form.
///
/// # Panics
/// Panics (via slice indexing) if `i` is not an owned point with its full
/// stencil neighbourhood in-array.
#[inline]
pub fn offdiag_average(
    sigma: &[f64],
    w: &[f64],
    i: usize,
    stride_off: isize,
    stride_own: isize,
) -> f64 {
    let j = offset(i, stride_off);
    0.25 * ((sigma[i] + sigma[offset(i, -stride_own)]) * w[i]
        + (sigma[j] + sigma[offset(j, -stride_own)]) * w[j])
}

#[inline]
fn offset(i: usize, stride: isize) -> usize {
    (i as isize + stride) as usize
}

impl Susceptibility for LorentzianSusceptibility {
    fn id(&self) -> SusceptibilityId {
        self.id
    }

    fn model_name(&self) -> &str {
        if self.no_omega_0_denominator {
            "Drude"
        } else {
            "Lorentzian"
        }
    }

    fn coupling(&self) -> &CouplingTensor {
        &self.coupling
    }

    /// The internal data is one previous-timestep polarisation value per
    /// active component copy per owned point, laid out in `Component::ALL`
    /// order with copies inner.
    fn num_internal_data(&self, p: &PolarisationSet, gv: &GridVolume) -> usize {
        p.num_allocated() * gv.num_owned()
    }

    fn update_p(
        &self,
        p: &mut PolarisationSet,
        w: &FieldSet,
        _w_prev: &FieldSet,
        dt: f64,
        gv: &GridVolume,
        internal: &mut [f64],
    ) {
        // Per-call constants; the point loops below touch no parameters.
        let omega2pi = 2.0 * PI * self.omega_0;
        let g2pi = 2.0 * PI * self.gamma;
        let omega0dtsqr = omega2pi * omega2pi * dt * dt;
        let gamma1inv = 1.0 / (1.0 + g2pi * dt / 2.0);
        let gamma1 = 1.0 - g2pi * dt / 2.0;
        let omega0dtsqr_denom = if self.no_omega_0_denominator {
            0.0
        } else {
            omega0dtsqr
        };

        assert_eq!(p.ntot(), gv.ntot(), "Polarisation set sized for a different volume");
        assert_eq!(w.ntot(), gv.ntot(), "Field set sized for a different volume");
        assert_eq!(
            internal.len(),
            self.num_internal_data(p, gv),
            "Backing store sized inconsistently with the active polarisation set"
        );
        for c in Component::ALL {
            assert!(
                !self.needs_polarisation(c, w) || p.has(c, 0),
                "P[{:?}] promised by the allocation policy was never allocated",
                c
            );
        }

        let n_owned = gv.num_owned();
        let mut cursor = 0;
        for c in Component::ALL {
            for cmp in 0..NUM_FIELD_COPIES {
                // Every allocated copy owns a backing-store region, even
                // when the local coupling is trivial (uniform allocation
                // across chunks) and the update below is skipped.
                let Some(parr) = p.get_mut(c, cmp) else { continue };
                let pp = &mut internal[cursor..cursor + n_owned];
                cursor += n_owned;

                let d = c.axis();
                let (Some(wd), Some(s)) = (w.get(c, cmp), self.coupling.get(c, d)) else {
                    continue;
                };

                // Strides for the own axis and the two candidate
                // off-diagonal directions; negated for magnetic components.
                let sign: isize = if c.is_magnetic() { -1 } else { 1 };
                let is = gv.stride(d) * sign;
                let d1 = d.cycle(1);
                let mut is1 = gv.stride(d1) * sign;
                let mut od1 = w
                    .get(c.with_axis(d1), cmp)
                    .and_then(|w1| self.coupling.get(c, d1).map(|s1| (s1, w1)));
                let d2 = d.cycle(2);
                let mut is2 = gv.stride(d2) * sign;
                let mut od2 = w
                    .get(c.with_axis(d2), cmp)
                    .and_then(|w2| self.coupling.get(c, d2).map(|s2| (s2, w2)));

                // Try the non-trivial off-diagonal direction first. The
                // resulting summation order is part of the numeric contract.
                if od1.is_none() && od2.is_some() {
                    std::mem::swap(&mut od1, &mut od2);
                    std::mem::swap(&mut is1, &mut is2);
                }

                match (od1, od2) {
                    // 3x3 anisotropic
                    (Some((s1, w1)), Some((s2, w2))) => {
                        for (j, i) in gv.owned_points().enumerate() {
                            let pcur = parr[i];
                            parr[i] = gamma1inv
                                * (pcur * (2.0 - omega0dtsqr_denom) - gamma1 * pp[j]
                                    + omega0dtsqr
                                        * (s[i] * wd[i]
                                            + offdiag_average(s1, w1, i, is1, is)
                                            + offdiag_average(s2, w2, i, is2, is)));
                            pp[j] = pcur;
                        }
                    }
                    // 2x2 anisotropic
                    (Some((s1, w1)), None) => {
                        for (j, i) in gv.owned_points().enumerate() {
                            let pcur = parr[i];
                            parr[i] = gamma1inv
                                * (pcur * (2.0 - omega0dtsqr_denom) - gamma1 * pp[j]
                                    + omega0dtsqr
                                        * (s[i] * wd[i]
                                            + offdiag_average(s1, w1, i, is1, is)));
                            pp[j] = pcur;
                        }
                    }
                    // isotropic
                    (None, _) => {
                        for (j, i) in gv.owned_points().enumerate() {
                            let pcur = parr[i];
                            parr[i] = gamma1inv
                                * (pcur * (2.0 - omega0dtsqr_denom) - gamma1 * pp[j]
                                    + omega0dtsqr * (s[i] * wd[i]));
                            pp[j] = pcur;
                        }
                    }
                }
            }
        }
    }

    fn clone_for_chunk(&self) -> Box<dyn Susceptibility> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polaron_grid::direction::Direction;

    #[test]
    fn test_offdiag_average_literal_value() {
        // Four-point line, unit strides. At i = 1 with j = 2:
        //   0.25 * ((2 + 1) * 20 + (3 + 2) * 30) = 0.25 * 210 = 52.5
        let sigma = [1.0, 2.0, 3.0, 4.0];
        let w = [10.0, 20.0, 30.0, 40.0];
        let got = offdiag_average(&sigma, &w, 1, 1, 1);
        assert_eq!(got, 52.5);
    }

    #[test]
    fn test_offdiag_average_with_negative_strides() {
        // Magnetic-sign strides walk the other way: at i = 2 with
        // stride_off = stride_own = -1, j = 1:
        //   0.25 * ((3 + 4) * 30 + (2 + 3) * 20) = 0.25 * 310 = 77.5
        let sigma = [1.0, 2.0, 3.0, 4.0];
        let w = [10.0, 20.0, 30.0, 40.0];
        let got = offdiag_average(&sigma, &w, 2, -1, -1);
        assert_eq!(got, 77.5);
    }

    #[test]
    fn test_clone_is_deep_and_preserves_id() {
        let mut sigma = CouplingTensor::trivial(5);
        sigma.set_uniform(Component::Ex, Direction::X, 1.5);
        let mut original =
            LorentzianSusceptibility::new(SusceptibilityId(7), 1.0, 0.01, false, sigma);
        let clone = original.clone_for_chunk();

        // Scribbling on the original must not reach the clone.
        original
            .coupling_mut()
            .get_mut(Component::Ex, Direction::X)
            .unwrap()[0] = 99.0;
        assert_eq!(
            clone.coupling().get(Component::Ex, Direction::X).unwrap()[0],
            1.5
        );
        assert_eq!(clone.id(), SusceptibilityId(7));

        // Trivial entries stay trivial.
        assert!(clone.coupling().is_trivial(Component::Ey, Direction::X));
    }

    #[test]
    fn test_drude_flag_zeroes_only_the_self_term() {
        // One step from a non-zero state: the Drude variant drops the
        // restoring (2 - a) reduction but keeps the a-scaled driving term.
        let gv = GridVolume::new([1, 1, 3]);
        let ntot = gv.ntot();
        let dt = 0.1;
        let f0 = 1.3;
        let g = 0.0;

        let run = |no_denom: bool| -> f64 {
            let mut sigma = CouplingTensor::trivial(ntot);
            sigma.set_uniform(Component::Ex, Direction::X, 1.0);
            let sus = LorentzianSusceptibility::new(
                SusceptibilityId(0),
                f0,
                g,
                no_denom,
                sigma,
            );
            let mut w = FieldSet::new(ntot);
            w.set(Component::Ex, 0, vec![2.0; ntot]).unwrap();
            let mut p = PolarisationSet::new(ntot);
            p.allocate(Component::Ex, 0);
            p.get_mut(Component::Ex, 0).unwrap()[1] = 1.0;
            let w_prev = w.clone();
            let mut internal = vec![0.0; sus.num_internal_data(&p, &gv)];
            sus.update_p(&mut p, &w, &w_prev, dt, &gv, &mut internal);
            p.get(Component::Ex, 0).unwrap()[1]
        };

        let a = (2.0 * PI * f0 * dt).powi(2);
        let lorentz = run(false);
        let drude = run(true);
        assert!((lorentz - (1.0 * (2.0 - a) + a * 2.0)).abs() < 1e-12);
        assert!((drude - (1.0 * 2.0 + a * 2.0)).abs() < 1e-12);
    }
}

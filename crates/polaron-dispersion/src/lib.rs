//! # Polaron Dispersion
//!
//! The dispersive-material response engine of the Polaron time-domain
//! solver. Lossy, resonant materials are modelled through an auxiliary
//! polarisation field $\mathbf{P} = \chi(\omega)\,\mathbf{W}$, where W is
//! the driving field (E or H). Each susceptibility model knows how to
//! advance P one timestep given W, plus whatever per-point state it keeps
//! between timesteps.
//!
//! Each $\chi(\omega)$ is spatially weighted by a per-point coupling array
//! $\sigma$. The surrounding solver owns the field and polarisation arrays
//! and hands them to [`susceptibility::Susceptibility::update_p`] once per
//! timestep per chunk; allocation decisions are made once at setup through
//! the [`alloc`] queries.
//!
//! ## Modules
//!
//! - [`coupling`] — The per-component, per-direction coupling tensor σ.
//! - [`fields`] — Field and polarisation array sets for one chunk.
//! - [`alloc`] — Setup-time allocation-policy queries.
//! - [`susceptibility`] — The susceptibility contract, identity, and chains.
//! - [`lorentzian`] — The damped-oscillator (Lorentzian/Drude) kernel.
//! - [`error`] — Setup-time validation errors.

pub mod alloc;
pub mod coupling;
pub mod error;
pub mod fields;
pub mod lorentzian;
pub mod susceptibility;

//! # Polaron Grid
//!
//! Spatial vocabulary for the Polaron time-domain engine. This crate holds
//! the small, allocation-free types that the numerical kernels index with:
//!
//! - [`direction`] — The three grid axes and their cyclic ordering.
//! - [`component`] — Staggered-grid field components $(E_x \ldots H_z)$.
//! - [`volume`] — The local chunk's grid-volume descriptor: point counts,
//!   memory strides, and the owned-point iteration range.
//!
//! Field and polarisation storage itself lives with the engine crates; this
//! crate only describes the geometry that storage is laid out over.

pub mod component;
pub mod direction;
pub mod volume;

//! Setup-time validation errors.
//!
//! Everything here is detectable while the materials layer is populating
//! coupling tensors and field sets, before timestepping begins. The hot
//! loops themselves do no recoverable error handling: structural contract
//! violations there are programming bugs and fail fast via assertions.

use polaron_grid::component::Component;
use polaron_grid::direction::Direction;
use thiserror::Error;

/// Errors from populating dispersion data structures.
#[derive(Debug, Error)]
pub enum DispersionError {
    #[error(
        "Coupling array for {component:?}/{direction:?} has {got} points but the grid volume has {want}"
    )]
    CouplingLength {
        component: Component,
        direction: Direction,
        got: usize,
        want: usize,
    },

    #[error("Field array for {component:?} (copy {copy}) has {got} points but the grid volume has {want}")]
    FieldLength {
        component: Component,
        copy: usize,
        got: usize,
        want: usize,
    },
}

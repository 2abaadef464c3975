//! Extensions to [`uom`].
//!
//! The thermophysical records in [`crate::fluids`] are stored as the literal
//! numbers written to disk. Typed views of those numbers use [`uom`]; this
//! module adds the quantities [`uom`] does not name directly.

use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, P2, Z0},
};

/// Specific enthalpy, J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Specific gas constant, J/kg·K in SI.
pub type SpecificGasConstant = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

//! # Firefish
//!
//! Writes OpenFOAM case directories and drives the OpenFOAM tools that
//! consume them.
//!
//! ## Crate layout
//!
//! - [`dict`]: The OpenFOAM dictionary model, text writer and parser.
//! - [`case`]: Case directories, scoped dictionary editing, and tool runs.
//! - [`fluids`]: Thermophysical property records for the supported fluids.
//! - [`mesh`]: `blockMesh` and `snappyHexMesh` configuration and generation.
//! - [`support`]: Numeric constraints and unit helpers.
//!
//! Modules in [`support`] are public because they're useful to callers
//! validating their own settings, but their APIs are not stable.
//!
//! No solver or mesher is included. Those are external executables found on
//! `PATH` or in [`CaseConfig::executable_dir`](case::CaseConfig::executable_dir).

pub mod case;
pub mod dict;
pub mod fluids;
pub mod mesh;
pub mod support;

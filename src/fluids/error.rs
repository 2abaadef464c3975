use thiserror::Error;

use crate::case::CaseError;

/// Errors from looking up or writing fluid properties.
#[derive(Debug, Error)]
pub enum FluidError {
    /// The identifier does not name a known fluid.
    #[error("unrecognized fluid: {name:?}")]
    Unrecognized { name: String },

    /// The properties could not be written to the case.
    #[error(transparent)]
    Case(#[from] CaseError),
}

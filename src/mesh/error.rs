use thiserror::Error;

use crate::{case::CaseError, support::constraint::ConstraintError};

/// Errors from building mesh dictionaries or running mesh tools.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error(transparent)]
    Case(#[from] CaseError),

    /// A numeric setting is outside its valid range.
    #[error("invalid setting {name}")]
    Setting {
        name: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// A multi-part operation was given no parts.
    #[error("at least one geometry part is required")]
    EmptyPartList,

    /// Surface paths and part names must pair up one to one.
    #[error("{paths} surface paths but {names} part names")]
    MismatchedParts { paths: usize, names: usize },

    /// A block or face refers to a vertex that does not exist.
    #[error("vertex index {index} out of range for {count} vertices")]
    InvalidVertex { index: usize, count: usize },
}

impl MeshError {
    /// Wraps a [`ConstraintError`] with the name of the offending setting.
    pub(crate) fn setting(name: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::Setting { name, source }
    }
}

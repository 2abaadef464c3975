use std::{fmt, path::Path};

/// Well-known dictionaries of an OpenFOAM case.
///
/// Each name resolves to a path relative to the case root, so it can be
/// passed anywhere a relative path is accepted:
///
/// ```
/// use std::path::Path;
/// use firefish::case::FileName;
///
/// let path: &Path = FileName::Control.as_ref();
/// assert_eq!(path, Path::new("system/controlDict"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileName {
    Control,
    BlockMesh,
    FvSchemes,
    FvSolution,
    SnappyHexMesh,
    MeshQuality,
    SurfaceFeatureExtract,
    ThermophysicalProperties,
    TurbulenceProperties,
    TransportProperties,
}

impl FileName {
    /// Every well-known dictionary, in the order listed above.
    pub const ALL: [FileName; 10] = [
        FileName::Control,
        FileName::BlockMesh,
        FileName::FvSchemes,
        FileName::FvSolution,
        FileName::SnappyHexMesh,
        FileName::MeshQuality,
        FileName::SurfaceFeatureExtract,
        FileName::ThermophysicalProperties,
        FileName::TurbulenceProperties,
        FileName::TransportProperties,
    ];

    /// Path of the dictionary relative to the case root.
    #[must_use]
    pub const fn relative_path(self) -> &'static str {
        match self {
            FileName::Control => "system/controlDict",
            FileName::BlockMesh => "system/blockMeshDict",
            FileName::FvSchemes => "system/fvSchemes",
            FileName::FvSolution => "system/fvSolution",
            FileName::SnappyHexMesh => "system/snappyHexMeshDict",
            FileName::MeshQuality => "system/meshQualityDict",
            FileName::SurfaceFeatureExtract => "system/surfaceFeatureExtractDict",
            FileName::ThermophysicalProperties => "constant/thermophysicalProperties",
            FileName::TurbulenceProperties => "constant/turbulenceProperties",
            FileName::TransportProperties => "constant/transportProperties",
        }
    }
}

impl AsRef<Path> for FileName {
    fn as_ref(&self) -> &Path {
        Path::new(self.relative_path())
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.relative_path())
    }
}

/// The OpenFOAM class recorded in a dictionary's `FoamFile` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileClass {
    #[default]
    Dictionary,

    /// A cell-centred scalar field such as `p` or `T`.
    ScalarField3d,

    /// A cell-centred vector field such as `U`.
    VectorField3d,
}

impl FileClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FileClass::Dictionary => "dictionary",
            FileClass::ScalarField3d => "volScalarField",
            FileClass::VectorField3d => "volVectorField",
        }
    }
}

impl fmt::Display for FileClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_live_in_system_or_constant() {
        for name in FileName::ALL {
            let path = name.relative_path();
            assert!(
                path.starts_with("system/") || path.starts_with("constant/"),
                "{path}"
            );
        }
    }

    #[test]
    fn thermophysical_properties_path() {
        assert_eq!(
            FileName::ThermophysicalProperties.to_string(),
            "constant/thermophysicalProperties"
        );
    }
}

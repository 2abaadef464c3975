use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    case::{Case, CaseError, FileClass, FileName},
    dict::{Dict, Value},
};

use super::MeshError;

/// Case directory holding imported surfaces.
const SURFACE_DIR: &str = "constant/triSurface";

/// Default included angle for feature edge extraction, in degrees.
const INCLUDED_ANGLE: f64 = 150.0;

/// Supported surface file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeometryFormat {
    #[default]
    Stl,
}

impl GeometryFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            GeometryFormat::Stl => "stl",
        }
    }
}

/// A surface imported into a case's `constant/triSurface` directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    format: GeometryFormat,
    name: String,

    /// Included angle used when extracting feature edges, in degrees.
    pub included_angle: f64,
}

impl Geometry {
    /// Copies the surface at `source` into the case under `name`.
    ///
    /// A `source` that already is the surface's file in the case is left as is.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Io`] if the file cannot be copied.
    pub fn load(
        format: GeometryFormat,
        source: impl AsRef<Path>,
        name: impl Into<String>,
        case: &Case,
    ) -> Result<Self, CaseError> {
        let geometry = Self {
            format,
            name: name.into(),
            included_angle: INCLUDED_ANGLE,
        };

        let source = source.as_ref();
        let target = case.path(geometry.relative_path());
        let dir = case.path(SURFACE_DIR);
        fs::create_dir_all(&dir).map_err(CaseError::io(&dir))?;
        if is_same_file(source, &target) {
            tracing::debug!(path = %target.display(), "surface already in place");
        } else {
            fs::copy(source, &target).map_err(CaseError::io(source))?;
            tracing::debug!(source = %source.display(), target = %target.display(), "imported surface");
        }

        Ok(geometry)
    }

    /// The region name used for patches and refinement entries.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn format(&self) -> GeometryFormat {
        self.format
    }

    /// File name inside `constant/triSurface`, such as `rocket.stl`.
    #[must_use]
    pub fn filename(&self) -> String {
        format!("{}.{}", self.name, self.format.extension())
    }

    /// File name of the extracted feature edges, such as `rocket.eMesh`.
    #[must_use]
    pub fn feature_filename(&self) -> String {
        format!("{}.eMesh", self.name)
    }

    /// Path of the imported surface relative to the case root.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        Path::new(SURFACE_DIR).join(self.filename())
    }

    /// Scales the surface in place by `factor` in every direction.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError`] if `surfaceTransformPoints` fails.
    pub fn scale(&self, case: &Case, factor: f64) -> Result<(), CaseError> {
        self.transform(case, "-scale", [factor; 3])
    }

    /// Translates the surface in place by `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError`] if `surfaceTransformPoints` fails.
    pub fn translate(&self, case: &Case, offset: [f64; 3]) -> Result<(), CaseError> {
        self.transform(case, "-translate", offset)
    }

    fn transform(&self, case: &Case, option: &str, vector: [f64; 3]) -> Result<(), CaseError> {
        let vector = Value::list(vector).to_string();
        let path = self.relative_path();
        let path = path.to_string_lossy();
        case.run_tool("surfaceTransformPoints", &[option, &vector, &path, &path])?;
        Ok(())
    }

    /// Writes `surfaceFeatureExtractDict` for this surface and runs
    /// `surfaceFeatureExtract`.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError`] if writing the dictionary or running the tool fails.
    pub fn extract_features(&self, case: &Case) -> Result<(), CaseError> {
        add_features(case, std::slice::from_ref(self))
    }

    fn feature_entry(&self) -> Dict {
        Dict::new()
            .with("extractionMethod", "extractFromSurface")
            .with(
                "extractFromSurfaceCoeffs",
                Dict::new().with("includedAngle", self.included_angle),
            )
            .with(
                "subsetFeatures",
                Dict::new()
                    .with("nonManifoldEdges", false)
                    .with("openEdges", true),
            )
            .with("writeObj", true)
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Writes one `surfaceFeatureExtractDict` covering every part and runs
/// `surfaceFeatureExtract` once.
///
/// # Errors
///
/// Returns [`CaseError`] if writing the dictionary or running the tool fails.
pub fn add_features(case: &Case, parts: &[Geometry]) -> Result<(), CaseError> {
    case.mutable_data_file(FileName::SurfaceFeatureExtract, FileClass::Dictionary, |d| {
        for part in parts {
            d.insert(part.filename(), part.feature_entry());
        }
    })?;
    case.run_tool("surfaceFeatureExtract", &[])?;
    Ok(())
}

/// Imports several surfaces, pairing each path with the name at the same position.
///
/// # Errors
///
/// Returns [`MeshError::EmptyPartList`] if no parts are given,
/// [`MeshError::MismatchedParts`] if `paths` and `names` differ in length, or
/// [`MeshError::Case`] if a copy fails.
pub fn load_multiple_geometries<P: AsRef<Path>>(
    format: GeometryFormat,
    paths: &[P],
    names: &[&str],
    case: &Case,
) -> Result<Vec<Geometry>, MeshError> {
    if paths.is_empty() && names.is_empty() {
        return Err(MeshError::EmptyPartList);
    }
    if paths.len() != names.len() {
        return Err(MeshError::MismatchedParts {
            paths: paths.len(),
            names: names.len(),
        });
    }
    paths
        .iter()
        .zip(names)
        .map(|(path, name)| Geometry::load(format, path, *name, case).map_err(MeshError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_with_stl(names: &[&str]) -> (tempfile::TempDir, Case, Vec<PathBuf>) {
        let dir = tempfile::tempdir().unwrap();
        let case = Case::new(dir.path().join("case")).unwrap();
        let sources = names
            .iter()
            .map(|name| {
                let path = dir.path().join(format!("{name}.stl"));
                fs::write(&path, format!("solid {name}\nendsolid {name}\n")).unwrap();
                path
            })
            .collect();
        (dir, case, sources)
    }

    #[test]
    fn load_copies_into_tri_surface() {
        let (_dir, case, sources) = case_with_stl(&["rocket"]);
        let geometry = Geometry::load(GeometryFormat::Stl, &sources[0], "whole", &case).unwrap();

        assert_eq!(geometry.filename(), "whole.stl");
        assert_eq!(geometry.feature_filename(), "whole.eMesh");
        let copied = fs::read_to_string(case.path("constant/triSurface/whole.stl")).unwrap();
        assert!(copied.starts_with("solid rocket"));
    }

    #[test]
    fn loading_a_surface_already_in_place_keeps_it() {
        let (_dir, case, _) = case_with_stl(&[]);
        let in_place = case.path("constant/triSurface/whole.stl");
        fs::create_dir_all(in_place.parent().unwrap()).unwrap();
        fs::write(&in_place, "solid whole\nendsolid whole\n").unwrap();

        let geometry = Geometry::load(GeometryFormat::Stl, &in_place, "whole", &case).unwrap();
        assert_eq!(geometry.relative_path(), Path::new("constant/triSurface/whole.stl"));
        assert_eq!(
            fs::read_to_string(&in_place).unwrap(),
            "solid whole\nendsolid whole\n"
        );
    }

    #[test]
    fn missing_source_is_an_io_error() {
        let (dir, case, _) = case_with_stl(&[]);
        let error =
            Geometry::load(GeometryFormat::Stl, dir.path().join("nope.stl"), "x", &case).unwrap_err();
        assert!(matches!(error, CaseError::Io { .. }));
    }

    #[test]
    fn load_multiple_pairs_paths_and_names() {
        let (_dir, case, sources) = case_with_stl(&["nosecone", "tail"]);
        let parts =
            load_multiple_geometries(GeometryFormat::Stl, &sources, &["nosecone", "tail"], &case)
                .unwrap();

        let names: Vec<_> = parts.iter().map(Geometry::name).collect();
        assert_eq!(names, ["nosecone", "tail"]);
        assert!(case.path("constant/triSurface/tail.stl").is_file());
    }

    #[test]
    fn load_multiple_requires_parts() {
        let (_dir, case, _) = case_with_stl(&[]);
        let paths: [&str; 0] = [];
        assert!(matches!(
            load_multiple_geometries(GeometryFormat::Stl, &paths, &[], &case),
            Err(MeshError::EmptyPartList)
        ));
    }

    #[test]
    fn load_multiple_rejects_mismatched_lengths() {
        let (_dir, case, sources) = case_with_stl(&["nosecone", "tail"]);
        assert!(matches!(
            load_multiple_geometries(GeometryFormat::Stl, &sources, &["nosecone"], &case),
            Err(MeshError::MismatchedParts { paths: 2, names: 1 })
        ));
        assert!(!case.path("constant/triSurface/nosecone.stl").exists());
    }

    #[test]
    fn feature_entry_contents() {
        let (_dir, case, sources) = case_with_stl(&["fin"]);
        let geometry = Geometry::load(GeometryFormat::Stl, &sources[0], "fin", &case).unwrap();

        let text = geometry.feature_entry().to_foam_string();
        assert!(text.contains("extractionMethod extractFromSurface;"));
        assert!(text.contains("includedAngle   150;"));
        assert!(text.contains("writeObj        true;"));
    }
}

use crate::{
    case::{Case, CaseError, FileClass, FileName},
    dict::{Dict, Value},
    support::constraint::{NonNegative, StrictlyPositive, UnitInterval},
};

use super::{Geometry, MeshError, MeshQuality, geometry::add_features, point};

/// Settings for `snappyHexMesh`.
///
/// Every field maps to an entry of `system/snappyHexMeshDict`. The defaults
/// suit a single closed body inside a block mesh a few body lengths across.
/// A block mesh must already exist before the mesh is generated.
#[derive(Debug, Clone, PartialEq)]
pub struct SnappyHexMesh {
    pub castellate: bool,
    pub snap: bool,
    pub add_layers: bool,

    // castellatedMeshControls
    pub max_local_cells: u64,
    pub max_global_cells: u64,
    pub min_refinement_cells: u64,
    pub max_load_unbalance: f64,
    pub n_cells_between_levels: u32,

    /// Refinement level applied along extracted feature edges.
    pub feature_level: u32,
    pub refinement_surface_min: u32,
    pub refinement_surface_max: u32,
    pub resolve_feature_angle: f64,

    /// `(distance, level)` pairs for distance-based refinement around the surface.
    pub distance_refinements: Vec<(f64, u32)>,

    /// A point inside the fluid region that is kept after castellation.
    pub location_in_mesh: [f64; 3],
    pub allow_free_standing_faces: bool,

    // snapControls
    pub n_smooth_patch: u32,
    pub snap_tolerance: f64,
    pub n_solve_iter: u32,
    pub snap_relax_iter: u32,
    pub n_feature_snap_iter: u32,
    pub implicit_feature_snap: bool,
    pub explicit_feature_snap: bool,
    pub multi_region_feature_snap: bool,

    // addLayersControls
    pub relative_sizes: bool,
    pub n_surface_layers: u32,
    pub expansion_ratio: f64,
    pub final_layer_thickness: f64,
    pub min_thickness: f64,
    pub n_grow: u32,
    pub feature_angle: f64,
    pub slip_feature_angle: f64,
    pub layer_relax_iter: u32,
    pub n_smooth_surface_normals: u32,
    pub n_smooth_normals: u32,
    pub n_smooth_thickness: u32,
    pub max_face_thickness_ratio: f64,
    pub max_thickness_to_medial_ratio: f64,
    pub min_medial_axis_angle: f64,
    pub n_buffer_cells_no_extrude: u32,
    pub n_layer_iter: u32,

    pub merge_tolerance: f64,

    /// Written to `system/meshQualityDict` and included by the snappy dictionary.
    pub mesh_quality: MeshQuality,

    /// Pass `-overwrite` so the final mesh lands directly in `constant/polyMesh`.
    pub overwrite: bool,
}

impl SnappyHexMesh {
    /// Default settings with the given feature edge refinement level.
    #[must_use]
    pub fn new(feature_level: u32) -> Self {
        Self {
            castellate: true,
            snap: true,
            add_layers: true,
            max_local_cells: 1_000_000,
            max_global_cells: 2_000_000,
            min_refinement_cells: 200,
            max_load_unbalance: 0.1,
            n_cells_between_levels: 3,
            feature_level,
            refinement_surface_min: 5,
            refinement_surface_max: 6,
            resolve_feature_angle: 30.0,
            distance_refinements: vec![(0.1, 4), (0.2, 3)],
            location_in_mesh: [0.001, 0.001, 0.0015],
            allow_free_standing_faces: true,
            n_smooth_patch: 3,
            snap_tolerance: 2.0,
            n_solve_iter: 30,
            snap_relax_iter: 5,
            n_feature_snap_iter: 10,
            implicit_feature_snap: false,
            explicit_feature_snap: true,
            multi_region_feature_snap: false,
            relative_sizes: false,
            n_surface_layers: 4,
            expansion_ratio: 1.2,
            final_layer_thickness: 0.0003,
            min_thickness: 0.0001,
            n_grow: 1,
            feature_angle: 30.0,
            slip_feature_angle: 30.0,
            layer_relax_iter: 3,
            n_smooth_surface_normals: 1,
            n_smooth_normals: 1,
            n_smooth_thickness: 10,
            max_face_thickness_ratio: 0.5,
            max_thickness_to_medial_ratio: 0.3,
            min_medial_axis_angle: 90.0,
            n_buffer_cells_no_extrude: 0,
            n_layer_iter: 50,
            merge_tolerance: 1e-6,
            mesh_quality: MeshQuality::default(),
            overwrite: false,
        }
    }

    /// Checks the numeric settings before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Setting`] naming the first invalid entry.
    pub fn validate(&self) -> Result<(), MeshError> {
        StrictlyPositive::new(self.max_local_cells).map_err(MeshError::setting("maxLocalCells"))?;
        StrictlyPositive::new(self.max_global_cells)
            .map_err(MeshError::setting("maxGlobalCells"))?;
        UnitInterval::new(self.max_load_unbalance)
            .map_err(MeshError::setting("maxLoadUnbalance"))?;
        StrictlyPositive::new(self.n_cells_between_levels)
            .map_err(MeshError::setting("nCellsBetweenLevels"))?;
        NonNegative::new(
            i64::from(self.refinement_surface_max) - i64::from(self.refinement_surface_min),
        )
        .map_err(MeshError::setting("refinementSurfaces.level"))?;
        for (distance, _) in &self.distance_refinements {
            StrictlyPositive::new(*distance).map_err(MeshError::setting("refinementRegions.levels"))?;
        }
        StrictlyPositive::new(self.snap_tolerance).map_err(MeshError::setting("tolerance"))?;
        StrictlyPositive::new(self.expansion_ratio).map_err(MeshError::setting("expansionRatio"))?;
        StrictlyPositive::new(self.final_layer_thickness)
            .map_err(MeshError::setting("finalLayerThickness"))?;
        StrictlyPositive::new(self.min_thickness).map_err(MeshError::setting("minThickness"))?;
        StrictlyPositive::new(self.merge_tolerance).map_err(MeshError::setting("mergeTolerance"))?;
        Ok(())
    }

    /// Builds the snappy dictionary for one or more surfaces.
    ///
    /// Distance refinement is applied around the first surface only.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::EmptyPartList`] if `parts` is empty, or
    /// [`MeshError::Setting`] if validation fails.
    pub fn to_dict(&self, parts: &[Geometry]) -> Result<Dict, MeshError> {
        self.validate()?;
        let first = parts.first().ok_or(MeshError::EmptyPartList)?;

        let mut geometry = Dict::new();
        let mut features = Vec::with_capacity(parts.len());
        let mut surfaces = Dict::new();
        let mut layers = Dict::new();
        for part in parts {
            geometry.insert(
                part.filename(),
                Dict::new()
                    .with("type", "triSurfaceMesh")
                    .with("name", part.name()),
            );
            features.push(Value::Dict(
                Dict::new()
                    .with("file", Value::string(part.feature_filename()))
                    .with("level", self.feature_level),
            ));
            surfaces.insert(
                part.name(),
                Dict::new().with(
                    "level",
                    [self.refinement_surface_min, self.refinement_surface_max],
                ),
            );
            layers.insert(
                part.name(),
                Dict::new().with("nSurfaceLayers", self.n_surface_layers),
            );
        }

        let levels = self
            .distance_refinements
            .iter()
            .map(|&(distance, level)| Value::List(vec![distance.into(), level.into()]));
        let regions = Dict::new().with(
            first.name(),
            Dict::new()
                .with("mode", "distance")
                .with("levels", Value::list(levels)),
        );

        let castellated = Dict::new()
            .with("maxLocalCells", self.max_local_cells)
            .with("maxGlobalCells", self.max_global_cells)
            .with("minRefinementCells", self.min_refinement_cells)
            .with("maxLoadUnbalance", self.max_load_unbalance)
            .with("nCellsBetweenLevels", self.n_cells_between_levels)
            .with("features", Value::List(features))
            .with("refinementSurfaces", surfaces)
            .with("resolveFeatureAngle", self.resolve_feature_angle)
            .with("refinementRegions", regions)
            .with("locationInMesh", point(self.location_in_mesh))
            .with("allowFreeStandingZoneFaces", self.allow_free_standing_faces);

        let snap = Dict::new()
            .with("nSmoothPatch", self.n_smooth_patch)
            .with("tolerance", self.snap_tolerance)
            .with("nSolveIter", self.n_solve_iter)
            .with("nRelaxIter", self.snap_relax_iter)
            .with("nFeatureSnapIter", self.n_feature_snap_iter)
            .with("implicitFeatureSnap", self.implicit_feature_snap)
            .with("explicitFeatureSnap", self.explicit_feature_snap)
            .with("multiRegionFeatureSnap", self.multi_region_feature_snap);

        let add_layers = Dict::new()
            .with("relativeSizes", self.relative_sizes)
            .with("layers", layers)
            .with("expansionRatio", self.expansion_ratio)
            .with("finalLayerThickness", self.final_layer_thickness)
            .with("minThickness", self.min_thickness)
            .with("nGrow", self.n_grow)
            .with("featureAngle", self.feature_angle)
            .with("slipFeatureAngle", self.slip_feature_angle)
            .with("nRelaxIter", self.layer_relax_iter)
            .with("nSmoothSurfaceNormals", self.n_smooth_surface_normals)
            .with("nSmoothNormals", self.n_smooth_normals)
            .with("nSmoothThickness", self.n_smooth_thickness)
            .with("maxFaceThicknessRatio", self.max_face_thickness_ratio)
            .with("maxThicknessToMedialRatio", self.max_thickness_to_medial_ratio)
            .with("minMedianAxisAngle", self.min_medial_axis_angle)
            .with("nBufferCellsNoExtrude", self.n_buffer_cells_no_extrude)
            .with("nLayerIter", self.n_layer_iter);

        Ok(Dict::new()
            .with("castellatedMesh", self.castellate)
            .with("snap", self.snap)
            .with("addLayers", self.add_layers)
            .with("geometry", geometry)
            .with("castellatedMeshControls", castellated)
            .with("snapControls", snap)
            .with("addLayersControls", add_layers)
            .with(
                "meshQualityControls",
                Dict::new().with("#include", Value::string("meshQualityDict")),
            )
            .with("mergeTolerance", self.merge_tolerance))
    }

    /// Writes `system/snappyHexMeshDict` for a single surface.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if validation or writing fails.
    pub fn write_snappy_dict(&self, case: &Case, geometry: &Geometry) -> Result<(), MeshError> {
        self.write_snappy_dict_multipart(case, std::slice::from_ref(geometry))
    }

    /// Writes `system/snappyHexMeshDict` covering every part.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if `parts` is empty, validation fails, or
    /// writing fails.
    pub fn write_snappy_dict_multipart(
        &self,
        case: &Case,
        parts: &[Geometry],
    ) -> Result<(), MeshError> {
        let dict = self.to_dict(parts)?;
        case.update_data_file(FileName::SnappyHexMesh, FileClass::Dictionary, dict)?;
        Ok(())
    }

    /// Extracts features, writes the quality and snappy dictionaries, and runs
    /// `snappyHexMesh` for a single surface.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if any step fails.
    pub fn generate_mesh(&self, case: &Case, geometry: &Geometry) -> Result<(), MeshError> {
        self.generate_mesh_multipart(case, std::slice::from_ref(geometry))
    }

    /// Like [`SnappyHexMesh::generate_mesh`] for several surfaces.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if any step fails.
    pub fn generate_mesh_multipart(&self, case: &Case, parts: &[Geometry]) -> Result<(), MeshError> {
        let dict = self.to_dict(parts)?;
        add_features(case, parts)?;
        self.mesh_quality.write_settings(case)?;
        case.update_data_file(FileName::SnappyHexMesh, FileClass::Dictionary, dict)?;

        let args: &[&str] = if self.overwrite { &["-overwrite"] } else { &[] };
        case.run_tool("snappyHexMesh", args)?;
        Ok(())
    }
}

/// Moves the mesh from the latest time directory into `constant/polyMesh` and
/// deletes the intermediate time directories written by `snappyHexMesh`.
///
/// Returns the time directory the mesh was taken from, or `None` if no time
/// directory other than `0` holds a mesh.
///
/// # Errors
///
/// Returns a [`CaseError`] if listing, moving, or deleting fails.
pub fn promote_latest_mesh(case: &Case) -> Result<Option<String>, CaseError> {
    let times: Vec<String> = case
        .time_dirs()?
        .into_iter()
        .filter(|time| time.parse::<f64>().is_ok_and(|t| t > 0.0))
        .collect();

    let Some(latest) = times
        .iter()
        .rev()
        .find(|time| case.path(time.as_str()).join("polyMesh").is_dir())
        .cloned()
    else {
        return Ok(None);
    };

    case.move_path(format!("{latest}/polyMesh"), "constant/polyMesh")?;
    for time in &times {
        case.remove_path(time)?;
    }
    tracing::info!(time = %latest, "promoted final mesh to constant/polyMesh");
    Ok(Some(latest))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    use crate::mesh::GeometryFormat;

    fn case_with_parts(names: &[&str]) -> (tempfile::TempDir, Case, Vec<Geometry>) {
        let dir = tempfile::tempdir().unwrap();
        let case = Case::new(dir.path().join("case")).unwrap();
        let parts = names
            .iter()
            .map(|name| {
                let source = dir.path().join(format!("{name}.stl"));
                fs::write(&source, "solid\nendsolid\n").unwrap();
                Geometry::load(GeometryFormat::Stl, &source, *name, &case).unwrap()
            })
            .collect();
        (dir, case, parts)
    }

    #[test]
    fn single_part_dictionary() {
        let (_dir, _case, parts) = case_with_parts(&["whole"]);
        let text = SnappyHexMesh::new(8).to_dict(&parts).unwrap().to_foam_string();

        assert!(text.starts_with("castellatedMesh true;\nsnap            true;\naddLayers       true;\n"));
        assert!(text.contains("    whole.stl\n    {\n        type            triSurfaceMesh;\n        name            whole;\n    }\n"));
        assert!(text.contains("        {\n            file            \"whole.eMesh\";\n            level           8;\n        }\n"));
        assert!(text.contains("            level           (5 6);"));
        assert!(text.contains("            levels          ((0.1 4) (0.2 3));"));
        assert!(text.contains("    locationInMesh  (0.001 0.001 0.0015);"));
        assert!(text.contains("    #include \"meshQualityDict\"\n"));
        assert!(text.contains("mergeTolerance  1e-6;"));
    }

    #[test]
    fn relax_iterations_are_separate_per_stage() {
        let (_dir, _case, parts) = case_with_parts(&["whole"]);
        let dict = SnappyHexMesh::new(4).to_dict(&parts).unwrap();

        let snap = dict.get_dict("snapControls").unwrap();
        let layers = dict.get_dict("addLayersControls").unwrap();
        assert_eq!(snap.get("nRelaxIter"), Some(&Value::Int(5)));
        assert_eq!(layers.get("nRelaxIter"), Some(&Value::Int(3)));
    }

    #[test]
    fn multipart_dictionary_lists_every_part() {
        let (_dir, _case, parts) = case_with_parts(&["nosecone", "upperTube", "tail"]);
        let dict = SnappyHexMesh::new(4).to_dict(&parts).unwrap();

        let geometry = dict.get_dict("geometry").unwrap();
        assert_eq!(
            geometry.keys().collect::<Vec<_>>(),
            ["nosecone.stl", "upperTube.stl", "tail.stl"]
        );

        let castellated = dict.get_dict("castellatedMeshControls").unwrap();
        let features = castellated.get("features").and_then(Value::as_list).unwrap();
        assert_eq!(features.len(), 3);

        let regions = castellated.get_dict("refinementRegions").unwrap();
        assert_eq!(regions.keys().collect::<Vec<_>>(), ["nosecone"]);

        let layers = dict
            .get_dict("addLayersControls")
            .and_then(|d| d.get_dict("layers"))
            .unwrap();
        assert!(layers.contains_key("tail"));
    }

    #[test]
    fn empty_part_list_is_rejected() {
        assert!(matches!(
            SnappyHexMesh::new(4).to_dict(&[]),
            Err(MeshError::EmptyPartList)
        ));
    }

    #[test]
    fn invalid_settings_are_rejected_before_writing() {
        let (_dir, case, parts) = case_with_parts(&["whole"]);

        let mut snappy = SnappyHexMesh::new(4);
        snappy.max_load_unbalance = 1.5;
        assert!(matches!(
            snappy.write_snappy_dict(&case, &parts[0]),
            Err(MeshError::Setting {
                name: "maxLoadUnbalance",
                ..
            })
        ));

        let mut snappy = SnappyHexMesh::new(4);
        snappy.refinement_surface_min = 7;
        assert!(matches!(
            snappy.validate(),
            Err(MeshError::Setting {
                name: "refinementSurfaces.level",
                ..
            })
        ));

        assert!(!case.path(FileName::SnappyHexMesh).exists());
    }

    #[test]
    fn write_snappy_dict_round_trips() {
        let (_dir, case, parts) = case_with_parts(&["whole"]);
        let mut snappy = SnappyHexMesh::new(8);
        snappy.max_global_cells = 20_000_000;
        snappy.write_snappy_dict(&case, &parts[0]).unwrap();

        let dict = case.read_data_file(FileName::SnappyHexMesh).unwrap().unwrap();
        let castellated = dict.get_dict("castellatedMeshControls").unwrap();
        assert_eq!(
            castellated.get("maxGlobalCells"),
            Some(&Value::Int(20_000_000))
        );
        assert_eq!(
            dict.get_dict("meshQualityControls")
                .and_then(|d| d.get("#include")),
            Some(&Value::string("meshQualityDict"))
        );
    }

    #[test]
    fn promote_latest_mesh_moves_and_cleans_up() {
        let (_dir, case, _) = case_with_parts(&[]);
        for time in ["0.001", "0.002"] {
            fs::create_dir_all(case.path(time).join("polyMesh")).unwrap();
            fs::write(case.path(time).join("polyMesh/points"), time).unwrap();
        }

        let promoted = promote_latest_mesh(&case).unwrap();
        assert_eq!(promoted.as_deref(), Some("0.002"));
        assert_eq!(
            fs::read_to_string(case.path("constant/polyMesh/points")).unwrap(),
            "0.002"
        );
        assert!(!case.path("0.001").exists());
        assert!(!case.path("0.002").exists());
        assert!(case.path("0").is_dir());
    }

    #[test]
    fn promote_without_time_dirs_is_a_no_op() {
        let (_dir, case, _) = case_with_parts(&[]);
        assert_eq!(promote_latest_mesh(&case).unwrap(), None);
    }
}

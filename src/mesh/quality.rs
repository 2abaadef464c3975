use crate::{
    case::{Case, CaseError, FileClass, FileName},
    dict::Dict,
};

/// Mesh quality limits enforced by `snappyHexMesh` while snapping and layering.
///
/// Defaults follow the values shipped with the OpenFOAM tutorials.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshQuality {
    pub max_non_ortho: f64,
    pub max_boundary_skewness: f64,
    pub max_internal_skewness: f64,
    pub max_concave: f64,
    pub min_vol: f64,
    pub min_tet_quality: f64,
    pub min_area: f64,
    pub min_twist: f64,
    pub min_determinant: f64,
    pub min_face_weight: f64,
    pub min_vol_ratio: f64,
    pub min_triangle_twist: f64,
    pub n_smooth_scale: u32,
    pub error_reduction: f64,

    /// Looser `maxNonOrtho` used for the final layer addition pass.
    pub relaxed_max_non_ortho: f64,
}

impl Default for MeshQuality {
    fn default() -> Self {
        Self {
            max_non_ortho: 65.0,
            max_boundary_skewness: 20.0,
            max_internal_skewness: 4.0,
            max_concave: 80.0,
            min_vol: 1e-13,
            min_tet_quality: 1e-15,
            min_area: -1.0,
            min_twist: 0.02,
            min_determinant: 0.001,
            min_face_weight: 0.05,
            min_vol_ratio: 0.01,
            min_triangle_twist: -1.0,
            n_smooth_scale: 4,
            error_reduction: 0.75,
            relaxed_max_non_ortho: 75.0,
        }
    }
}

impl MeshQuality {
    #[must_use]
    pub fn to_dict(&self) -> Dict {
        Dict::new()
            .with("maxNonOrtho", self.max_non_ortho)
            .with("maxBoundarySkewness", self.max_boundary_skewness)
            .with("maxInternalSkewness", self.max_internal_skewness)
            .with("maxConcave", self.max_concave)
            .with("minVol", self.min_vol)
            .with("minTetQuality", self.min_tet_quality)
            .with("minArea", self.min_area)
            .with("minTwist", self.min_twist)
            .with("minDeterminant", self.min_determinant)
            .with("minFaceWeight", self.min_face_weight)
            .with("minVolRatio", self.min_vol_ratio)
            .with("minTriangleTwist", self.min_triangle_twist)
            .with("nSmoothScale", self.n_smooth_scale)
            .with("errorReduction", self.error_reduction)
            .with(
                "relaxed",
                Dict::new().with("maxNonOrtho", self.relaxed_max_non_ortho),
            )
    }

    /// Writes `system/meshQualityDict`.
    ///
    /// # Errors
    ///
    /// Returns a [`CaseError`] if the dictionary cannot be written.
    pub fn write_settings(&self, case: &Case) -> Result<(), CaseError> {
        case.update_data_file(FileName::MeshQuality, FileClass::Dictionary, self.to_dict())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dict::Value;

    #[test]
    fn defaults_render() {
        let text = MeshQuality::default().to_dict().to_foam_string();
        assert!(text.contains("maxNonOrtho     65;"));
        assert!(text.contains("minVol          1e-13;"));
        assert!(text.contains("relaxed\n{\n    maxNonOrtho     75;\n}\n"));
    }

    #[test]
    fn write_settings_creates_quality_dict() {
        let dir = tempfile::tempdir().unwrap();
        let case = Case::new(dir.path()).unwrap();
        MeshQuality {
            max_non_ortho: 70.0,
            ..MeshQuality::default()
        }
        .write_settings(&case)
        .unwrap();

        let dict = case.read_data_file(FileName::MeshQuality).unwrap().unwrap();
        assert_eq!(dict.get("maxNonOrtho").and_then(Value::as_f64), Some(70.0));
        assert_eq!(dict.get("nSmoothScale"), Some(&Value::Int(4)));
    }
}

use crate::{
    case::{Case, FileClass, FileName},
    dict::{Dict, Value},
    support::constraint::StrictlyPositive,
};

use super::{MeshError, point};

/// A hexahedral block: eight vertex indices, cell counts and simple grading.
#[derive(Debug, Clone, PartialEq)]
pub struct HexBlock {
    pub vertices: [usize; 8],
    pub cells: [usize; 3],
    pub grading: [f64; 3],
}

impl HexBlock {
    /// A block with uniform cell spacing.
    #[must_use]
    pub fn uniform(vertices: [usize; 8], cells: [usize; 3]) -> Self {
        Self {
            vertices,
            cells,
            grading: [1.0, 1.0, 1.0],
        }
    }

    fn to_value(&self) -> Value {
        Value::tuple([
            Value::word("hex"),
            Value::list(self.vertices),
            Value::list(self.cells),
            Value::word("simpleGrading"),
            Value::list(self.grading),
        ])
    }
}

/// A curved block edge.
#[derive(Debug, Clone, PartialEq)]
pub enum Edge {
    /// Circular arc from `start` to `end` through `through`.
    Arc {
        start: usize,
        end: usize,
        through: [f64; 3],
    },

    /// Spline from `start` to `end` through the interior `points`.
    Spline {
        start: usize,
        end: usize,
        points: Vec<[f64; 3]>,
    },
}

impl Edge {
    fn endpoints(&self) -> [usize; 2] {
        match self {
            Edge::Arc { start, end, .. } | Edge::Spline { start, end, .. } => [*start, *end],
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Edge::Arc {
                start,
                end,
                through,
            } => Value::tuple([
                Value::word("arc"),
                Value::from(*start),
                Value::from(*end),
                point(*through),
            ]),
            Edge::Spline { start, end, points } => Value::tuple([
                Value::word("spline"),
                Value::from(*start),
                Value::from(*end),
                Value::list(points.iter().copied().map(point)),
            ]),
        }
    }
}

/// A named boundary patch made of quadrilateral faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub name: String,

    /// OpenFOAM patch type, such as `patch`, `wall` or `symmetryPlane`.
    pub kind: String,
    pub faces: Vec<[usize; 4]>,
}

impl Patch {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, faces: Vec<[usize; 4]>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            faces,
        }
    }

    fn to_value(&self) -> Value {
        let body = Dict::new()
            .with("type", self.kind.as_str())
            .with("faces", Value::list(self.faces.iter().copied().map(Value::list)));
        Value::tuple([Value::word(self.name.as_str()), Value::Dict(body)])
    }
}

/// Faces of the box produced by [`BlockMesh::cuboid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxFace {
    XMin,
    XMax,
    YMin,
    YMax,
    ZMin,
    ZMax,
}

impl BoxFace {
    pub const ALL: [BoxFace; 6] = [
        BoxFace::XMin,
        BoxFace::XMax,
        BoxFace::YMin,
        BoxFace::YMax,
        BoxFace::ZMin,
        BoxFace::ZMax,
    ];

    /// Vertex loop of the face, ordered so the normal points out of the box.
    #[must_use]
    pub const fn vertices(self) -> [usize; 4] {
        match self {
            BoxFace::XMin => [0, 4, 7, 3],
            BoxFace::XMax => [1, 2, 6, 5],
            BoxFace::YMin => [0, 1, 5, 4],
            BoxFace::YMax => [3, 7, 6, 2],
            BoxFace::ZMin => [0, 3, 2, 1],
            BoxFace::ZMax => [4, 5, 6, 7],
        }
    }
}

/// The contents of `system/blockMeshDict`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMesh {
    /// Factor applied to all vertex coordinates (`convertToMeters`).
    pub scale: f64,
    pub vertices: Vec<[f64; 3]>,
    pub blocks: Vec<HexBlock>,
    pub edges: Vec<Edge>,
    pub boundary: Vec<Patch>,
    pub merge_patch_pairs: Vec<(String, String)>,
}

impl Default for BlockMesh {
    fn default() -> Self {
        Self {
            scale: 1.0,
            vertices: Vec::new(),
            blocks: Vec::new(),
            edges: Vec::new(),
            boundary: Vec::new(),
            merge_patch_pairs: Vec::new(),
        }
    }
}

impl BlockMesh {
    /// A single block spanning the axis-aligned box from `min` to `max`.
    ///
    /// Vertices are numbered `0..4` around the `min[2]` face and `4..8` around
    /// the `max[2]` face. Patches are added with [`BlockMesh::with_patch`].
    #[must_use]
    pub fn cuboid(min: [f64; 3], max: [f64; 3], cells: [usize; 3]) -> Self {
        let [x0, y0, z0] = min;
        let [x1, y1, z1] = max;
        Self {
            vertices: vec![
                [x0, y0, z0],
                [x1, y0, z0],
                [x1, y1, z0],
                [x0, y1, z0],
                [x0, y0, z1],
                [x1, y0, z1],
                [x1, y1, z1],
                [x0, y1, z1],
            ],
            blocks: vec![HexBlock::uniform([0, 1, 2, 3, 4, 5, 6, 7], cells)],
            ..Self::default()
        }
    }

    /// Adds a patch made of the given box faces.
    #[must_use]
    pub fn with_patch(mut self, name: &str, kind: &str, faces: &[BoxFace]) -> Self {
        self.boundary.push(Patch::new(
            name,
            kind,
            faces.iter().map(|face| face.vertices()).collect(),
        ));
        self
    }

    /// Checks vertex references and cell counts.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidVertex`] for a dangling vertex index, or
    /// [`MeshError::Setting`] for a non-positive cell count or scale.
    pub fn validate(&self) -> Result<(), MeshError> {
        StrictlyPositive::new(self.scale).map_err(MeshError::setting("convertToMeters"))?;

        let count = self.vertices.len();
        let check = |index: usize| {
            if index < count {
                Ok(())
            } else {
                Err(MeshError::InvalidVertex { index, count })
            }
        };

        for block in &self.blocks {
            block.vertices.iter().copied().try_for_each(check)?;
            for cells in block.cells {
                StrictlyPositive::new(cells).map_err(MeshError::setting("blocks.cells"))?;
            }
        }
        for edge in &self.edges {
            edge.endpoints().into_iter().try_for_each(check)?;
        }
        for patch in &self.boundary {
            patch.faces.iter().flatten().copied().try_for_each(check)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn to_dict(&self) -> Dict {
        let pairs = self
            .merge_patch_pairs
            .iter()
            .map(|(a, b)| Value::list([a.as_str(), b.as_str()]));

        Dict::new()
            .with("convertToMeters", self.scale)
            .with("vertices", Value::list(self.vertices.iter().copied().map(point)))
            .with("blocks", Value::list(self.blocks.iter().map(HexBlock::to_value)))
            .with("edges", Value::list(self.edges.iter().map(Edge::to_value)))
            .with("boundary", Value::list(self.boundary.iter().map(Patch::to_value)))
            .with("mergePatchPairs", Value::list(pairs))
    }

    /// Validates the mesh and writes `system/blockMeshDict`.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if validation or writing fails.
    pub fn write(&self, case: &Case) -> Result<(), MeshError> {
        self.validate()?;
        case.update_data_file(FileName::BlockMesh, FileClass::Dictionary, self.to_dict())?;
        Ok(())
    }

    /// Writes the dictionary and runs `blockMesh`.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if writing fails or `blockMesh` does not succeed.
    pub fn generate(&self, case: &Case) -> Result<(), MeshError> {
        self.write(case)?;
        case.run_tool("blockMesh", &[])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounding_box() -> BlockMesh {
        BlockMesh::cuboid([-0.6, -1.0, -1.0], [3.0, 1.0, 1.0], [20, 20, 20])
            .with_patch("inlet", "patch", &[BoxFace::XMin])
            .with_patch("outlet", "patch", &[BoxFace::XMax])
            .with_patch(
                "fixedWalls",
                "wall",
                &[BoxFace::YMin, BoxFace::YMax, BoxFace::ZMin, BoxFace::ZMax],
            )
    }

    #[test]
    fn cuboid_renders_blocks_and_boundary() {
        let text = bounding_box().to_dict().to_foam_string();

        assert!(text.contains("((-0.6 -1 -1) (3 -1 -1) (3 1 -1) (-0.6 1 -1)"));
        assert!(text.contains("(hex (0 1 2 3 4 5 6 7) (20 20 20) simpleGrading (1 1 1))"));
        assert!(text.contains("    inlet\n    {\n        type            patch;\n        faces           ((0 4 7 3));\n    }\n"));
        assert!(text.contains("edges           ();"));
        assert!(text.contains("mergePatchPairs ();"));
    }

    #[test]
    fn every_box_face_is_used_once() {
        let mesh = bounding_box();
        let faces: Vec<_> = mesh.boundary.iter().flat_map(|p| p.faces.clone()).collect();
        assert_eq!(faces.len(), 6);
        for face in BoxFace::ALL {
            assert!(faces.contains(&face.vertices()));
        }
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn arc_edges() {
        let mut mesh = bounding_box();
        mesh.edges.push(Edge::Arc {
            start: 0,
            end: 1,
            through: [1.0, -1.2, -1.0],
        });
        let text = mesh.to_dict().to_foam_string();
        assert!(text.contains("edges           (arc 0 1 (1 -1.2 -1));"));
    }

    #[test]
    fn dangling_vertex_is_rejected() {
        let mut mesh = bounding_box();
        mesh.boundary.push(Patch::new("bad", "patch", vec![[0, 1, 2, 8]]));
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::InvalidVertex { index: 8, count: 8 })
        ));
    }

    #[test]
    fn zero_cells_are_rejected() {
        let mesh = BlockMesh::cuboid([0.0; 3], [1.0; 3], [10, 0, 10]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::Setting {
                name: "blocks.cells",
                ..
            })
        ));
    }

    #[test]
    fn write_creates_block_mesh_dict() {
        let dir = tempfile::tempdir().unwrap();
        let case = Case::new(dir.path()).unwrap();
        bounding_box().write(&case).unwrap();

        let dict = case.read_data_file(FileName::BlockMesh).unwrap().unwrap();
        assert_eq!(dict.get("convertToMeters").and_then(Value::as_f64), Some(1.0));
        assert_eq!(dict.get("vertices").and_then(Value::as_list).map(<[Value]>::len), Some(8));
    }
}

//! Meshes a rocket assembled from several STL parts with one
//! `snappyHexMesh` run, then optionally runs `rhoCentralFoam`.
//!
//! ```text
//! cargo run --example join_stl -- <stl_dir> [case_dir] [--run]
//! ```
//!
//! `<stl_dir>` must hold `nosecone.stl`, `upperTube.stl`, `lowerTube.stl`,
//! `finCan.stl` and `tail.stl`.

use std::{env, error::Error, path::PathBuf, process};

use firefish::{
    case::{Case, FileClass, FileName, InitialField},
    dict::{Dict, Dimension, Value},
    fluids::{Fluid, write_thermophysical_properties},
    mesh::{
        BlockMesh, BoxFace, GeometryFormat, SnappyHexMesh, load_multiple_geometries,
        promote_latest_mesh,
    },
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const PARTS: [&str; 5] = ["nosecone", "upperTube", "lowerTube", "finCan", "tail"];
const STREAM_VELOCITY: f64 = 2.0;

fn main() -> Result<(), Box<dyn Error>> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let mut run_solver = false;
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--run" {
            run_solver = true;
        } else {
            positional.push(arg);
        }
    }
    let mut positional = positional.into_iter();
    let Some(stl_dir) = positional.next().map(PathBuf::from) else {
        eprintln!("usage: join_stl <stl_dir> [case_dir] [--run]");
        process::exit(2);
    };
    let case_dir = PathBuf::from(positional.next().unwrap_or_else(|| "joinSTL".to_string()));

    // Start from a clean directory on every run.
    if case_dir.exists() {
        std::fs::remove_dir_all(&case_dir)?;
    }
    let case = Case::new(&case_dir)?;

    write_control_dict(&case)?;
    bounding_box().generate(&case)?;

    let paths: Vec<PathBuf> = PARTS
        .iter()
        .map(|part| stl_dir.join(format!("{part}.stl")))
        .collect();
    let parts = load_multiple_geometries(GeometryFormat::Stl, &paths, &PARTS, &case)?;

    let mut snappy = SnappyHexMesh::new(4);
    snappy.location_in_mesh = [0.0012, 0.124, 0.19];
    snappy.add_layers = false;

    write_fv_schemes(&case)?;
    write_fv_solution(&case)?;
    write_thermophysical_properties(&case, Fluid::DimensionlessAir)?;
    case.update_data_file(
        FileName::TurbulenceProperties,
        FileClass::Dictionary,
        Dict::new().with("simulationType", "laminar"),
    )?;
    write_initial_conditions(&case)?;

    snappy.generate_mesh_multipart(&case, &parts)?;
    if promote_latest_mesh(&case)?.is_none() {
        tracing::warn!("snappyHexMesh wrote no time directories; keeping constant/polyMesh");
    }

    if run_solver {
        case.run_tool("rhoCentralFoam", &[])?;
    }

    tracing::info!(case = %case.root().display(), "done");
    Ok(())
}

fn bounding_box() -> BlockMesh {
    BlockMesh::cuboid([0.0, 0.0, 0.0], [6.0, 3.0, 3.0], [20, 20, 20])
        .with_patch("inlet", "patch", &[BoxFace::XMin])
        .with_patch("outlet", "patch", &[BoxFace::XMax])
        .with_patch(
            "fixedWalls",
            "wall",
            &[BoxFace::YMin, BoxFace::YMax, BoxFace::ZMin, BoxFace::ZMax],
        )
}

fn write_control_dict(case: &Case) -> Result<(), Box<dyn Error>> {
    let control = Dict::new()
        .with("application", "rhoCentralFoam")
        .with("startFrom", "startTime")
        .with("startTime", 0)
        .with("stopAt", "endTime")
        .with("endTime", 10)
        .with("deltaT", 0.001)
        .with("writeControl", "runTime")
        .with("writeInterval", 1)
        .with("purgeWrite", 0)
        .with("writeFormat", "ascii")
        .with("writePrecision", 6)
        .with("writeCompression", "off")
        .with("timeFormat", "general")
        .with("timePrecision", 6)
        .with("runTimeModifiable", true)
        .with("adjustTimeStep", "no")
        .with("maxCo", 1)
        .with("maxDeltaT", 1e-6);
    case.update_data_file(FileName::Control, FileClass::Dictionary, control)?;
    Ok(())
}

fn write_fv_schemes(case: &Case) -> Result<(), Box<dyn Error>> {
    let schemes = Dict::new()
        .with("ddtSchemes", Dict::new().with("default", "Euler"))
        .with("gradSchemes", Dict::new().with("default", "Gauss linear"))
        .with(
            "divSchemes",
            Dict::new()
                .with("default", "none")
                .with("div(tauMC)", "Gauss linear"),
        )
        .with(
            "laplacianSchemes",
            Dict::new().with("default", "Gauss linear corrected"),
        )
        .with(
            "interpolationSchemes",
            Dict::new()
                .with("default", "linear")
                .with("reconstruct(rho)", "vanLeer")
                .with("reconstruct(U)", "vanLeerV")
                .with("reconstruct(T)", "vanLeer"),
        )
        .with("snGradSchemes", Dict::new().with("default", "corrected"));
    case.update_data_file(FileName::FvSchemes, FileClass::Dictionary, schemes)?;
    Ok(())
}

fn write_fv_solution(case: &Case) -> Result<(), Box<dyn Error>> {
    let solvers = Dict::new()
        .with("\"(rho|rhoU|rhoE)\"", Dict::new().with("solver", "diagonal"))
        .with(
            "U",
            Dict::new()
                .with("solver", "smoothSolver")
                .with("smoother", "GaussSeidel")
                .with("nSweeps", 2)
                .with("tolerance", 1e-9)
                .with("relTol", 0.01),
        )
        .with(
            "h",
            Dict::new()
                .with("$U", Value::word(""))
                .with("tolerance", 1e-10)
                .with("relTol", 0),
        );
    case.update_data_file(
        FileName::FvSolution,
        FileClass::Dictionary,
        Dict::new().with("solvers", solvers),
    )?;
    Ok(())
}

fn write_initial_conditions(case: &Case) -> Result<(), Box<dyn Error>> {
    let inflow = [STREAM_VELOCITY, 0.0, 0.0];

    let mut p = InitialField::scalar(Dimension::PRESSURE, 1.0)
        .fixed_value("inlet", 1.0)
        .zero_gradient("outlet")
        .zero_gradient("fixedWalls");
    let mut u = InitialField::vector(Dimension::VELOCITY, inflow)
        .fixed_value("inlet", inflow)
        .zero_gradient("outlet")
        .zero_gradient("fixedWalls");
    let mut t = InitialField::scalar(Dimension::TEMPERATURE, 1.0)
        .fixed_value("inlet", 1.0)
        .zero_gradient("outlet")
        .zero_gradient("fixedWalls");
    for part in PARTS {
        p = p.zero_gradient(part);
        u = u.slip(part);
        t = t.zero_gradient(part);
    }

    p.write(case, "p")?;
    u.write(case, "U")?;
    t.write(case, "T")?;
    Ok(())
}

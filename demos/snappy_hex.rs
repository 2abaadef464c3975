//! Meshes a single STL surface with `snappyHexMesh` and prepares the case for
//! `rhoCentralFoam`.
//!
//! ```text
//! cargo run --example snappy_hex -- streamDartNoHoles.stl [case_dir]
//! ```
//!
//! The surface is assumed to be in millimetres. OpenFOAM must be on `PATH`.

use std::{env, error::Error, process};

use firefish::{
    case::{Case, FileClass, FileName, InitialField},
    dict::{Dict, Dimension, Value},
    fluids::{Fluid, write_thermophysical_properties},
    mesh::{BlockMesh, BoxFace, Geometry, GeometryFormat, SnappyHexMesh},
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const PART: &str = "whole";

fn main() -> Result<(), Box<dyn Error>> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let mut args = env::args().skip(1);
    let Some(stl) = args.next() else {
        eprintln!("usage: snappy_hex <surface.stl> [case_dir]");
        process::exit(2);
    };
    let case_dir = args.next().unwrap_or_else(|| "snappy".to_string());

    let case = Case::create_new(&case_dir)?;
    write_control_dict(&case)?;
    bounding_box().generate(&case)?;

    let rocket = Geometry::load(GeometryFormat::Stl, &stl, PART, &case)?;
    rocket.scale(&case, 0.001)?;
    rocket.translate(&case, [1.0, 1.5, 1.5])?;

    let mut snappy = SnappyHexMesh::new(8);
    snappy.refinement_surface_min = 8;
    snappy.refinement_surface_max = 9;
    snappy.max_global_cells = 20_000_000;
    snappy.distance_refinements = vec![(0.01, 8), (0.025, 7), (0.04, 6), (0.6, 4)];
    snappy.snap_tolerance = 8.0;
    // Off-grid so the point never lies on a cell face.
    snappy.location_in_mesh = [0.0012, 0.124, 0.19];
    snappy.overwrite = true;

    write_fv_schemes(&case)?;
    write_fv_solution(&case)?;
    snappy.generate_mesh(&case, &rocket)?;

    write_thermophysical_properties(&case, Fluid::DimensionlessAir)?;
    case.update_data_file(
        FileName::TurbulenceProperties,
        FileClass::Dictionary,
        Dict::new().with("simulationType", "laminar"),
    )?;
    write_initial_conditions(&case)?;

    tracing::info!(case = %case.root().display(), "case ready");
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
    InitialField::scalar(Dimension::PRESSURE, 1.0)
        .fixed_value("inlet", 1.0)
        .zero_gradient("outlet")
        .zero_gradient("fixedWalls")
        .zero_gradient(PART)
        .write(case, "p")?;

    InitialField::vector(Dimension::VELOCITY, [2.0, 0.0, 0.0])
        .fixed_value("inlet", [2.0, 0.0, 0.0])
        .zero_gradient("outlet")
        .slip("fixedWalls")
        .slip(PART)
        .write(case, "U")?;

    InitialField::scalar(Dimension::TEMPERATURE, 1.0)
        .fixed_value("inlet", 1.0)
        .zero_gradient("outlet")
        .zero_gradient("fixedWalls")
        .zero_gradient(PART)
        .write(case, "T")?;
    Ok(())
}

// Copyright 2020 TwoCookingMice

use tetmesh::core::loader::load_mesh;
use tetmesh::core::mesh::TetMesh;
use tetmesh::core::options::MeshOptions;
use tetmesh::io::text_source::FileSource;
use tetmesh::math::constants::Float;

use indicatif::{ProgressBar, ProgressStyle};

use std::env;
use std::path::Path;

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <mesh.tmesh> [--ticks N] [--amplitude A] [--epsilon E] [--no-triangulate]", args[0]);
        std::process::exit(1);
    }

    let input_path = Path::new(&args[1]);
    let mut ticks: u32 = 0;
    let mut amplitude: Float = 0.01;
    let mut options = MeshOptions::default();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                i += 1;
                ticks = args.get(i).and_then(|v| v.parse::<u32>().ok()).unwrap_or(0);
            }
            "--amplitude" => {
                i += 1;
                amplitude = args.get(i).and_then(|v| v.parse::<Float>().ok()).unwrap_or(amplitude);
            }
            "--epsilon" => {
                i += 1;
                options.degenerate_epsilon = args.get(i)
                    .and_then(|v| v.parse::<Float>().ok())
                    .unwrap_or(options.degenerate_epsilon);
            }
            "--no-triangulate" => {
                options.triangulate_polygons = false;
            }
            other => {
                log::warn!("Ignoring unknown argument: {}.", other);
            }
        }
        i += 1;
    }

    let base_dir = input_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = match input_path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => {
            eprintln!("Invalid mesh path: {}", input_path.display());
            std::process::exit(1);
        }
    };

    let source = FileSource::new(base_dir);
    let mut mesh = match pollster::block_on(load_mesh(&source, file_name, &options)) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("Failed to load {}: {}", input_path.display(), e);
            std::process::exit(1);
        }
    };

    print_summary(&mesh);

    if ticks > 0 {
        deform(&mut mesh, ticks, amplitude);
        print_summary(&mesh);
    }
}

fn print_summary(mesh: &TetMesh) {
    let bound = mesh.bounding_box();
    println!("Vertices: {}, faces: {}, tetrahedra: {}",
             mesh.vertex_count(), mesh.face_count(), mesh.tetrahedra().len());
    println!("Bounds: ({:.4}, {:.4}, {:.4}) - ({:.4}, {:.4}, {:.4})",
             bound.p_min[0], bound.p_min[1], bound.p_min[2],
             bound.p_max[0], bound.p_max[1], bound.p_max[2]);
    println!("Surface area: {:.6}", mesh.total_area());
}

// Breathes the surface along its vertex normals, standing in for a simulation step.
fn deform(mesh: &mut TetMesh, ticks: u32, amplitude: Float) {
    let scale = amplitude * mesh.bounding_box().extent();
    let progress = ProgressBar::new(ticks as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ticks")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut degenerate_ticks = 0;
    for tick in 0..ticks {
        let offset = scale * (tick as Float).sin();
        let normals = mesh.vertex_normals().to_vec();
        for (p, n) in mesh.positions_mut().iter_mut().zip(normals.iter()) {
            *p += n * offset;
        }
        if !mesh.update().is_empty() {
            degenerate_ticks += 1;
        }
        progress.inc(1);
    }
    progress.finish();

    if degenerate_ticks > 0 {
        log::warn!("{} of {} ticks produced degenerate geometry.", degenerate_ticks, ticks);
    }
}

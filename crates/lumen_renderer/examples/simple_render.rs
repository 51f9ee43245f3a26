//! Simple progressive render example.
//!
//! Renders a cube next to a smooth sphere with the normal integrator and
//! saves the film to PPM format.

use lumen_core::{shapes, Scene};
use lumen_renderer::{CameraControls, ControlOptions, NormalMode, RayTracer, RenderConfig, Vec3};
use std::fs::File;
use std::io::{BufWriter, Write};

const PASSES: u32 = 8;

fn main() -> std::io::Result<()> {
    println!("Lumen Ray Tracer - Simple Example");
    println!("=================================");

    let mut cube = shapes::cube(0.5);
    cube.rotate_y(0.6);
    cube.translate(Vec3::new(-0.8, 0.0, 0.0));
    let mut sphere = shapes::uv_sphere(0.6, 32, 16);
    sphere.translate(Vec3::new(0.8, 0.0, 0.0));
    let scene: Scene = vec![cube, sphere].into_iter().collect();

    let config = RenderConfig {
        normal_mode: NormalMode::Shading,
        ..Default::default()
    };
    let mut tracer = RayTracer::with_config(scene, 400, 225, config);
    let controls = CameraControls::new(Default::default(), ControlOptions::default());
    let params = controls.parameters(tracer.film().resolution());

    let start = std::time::Instant::now();
    for _ in 0..PASSES {
        tracer.render_pass(&params);
    }
    println!("Rendered {} passes in {:?}", PASSES, start.elapsed());

    let filename = "output.ppm";
    save_ppm(&tracer, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn save_ppm(tracer: &RayTracer, filename: &str) -> std::io::Result<()> {
    let film = tracer.film();
    let mut file = BufWriter::new(File::create(filename)?);

    writeln!(file, "P3")?;
    writeln!(file, "{} {}", film.width(), film.height())?;
    writeln!(file, "255")?;

    for rgba in film.to_rgba8().chunks_exact(4) {
        writeln!(file, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
    }

    Ok(())
}

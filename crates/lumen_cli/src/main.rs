use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::{shapes, Scene};
use lumen_math::{CameraParameters, Vec3};
use lumen_renderer::{CameraControls, ControlOptions, RayTracer, RenderConfig};

mod cli;

use cli::{Args, SceneChoice};

/// Assemble one of the built-in scenes.
fn build_scene(choice: SceneChoice) -> Scene {
    match choice {
        SceneChoice::Triangle => std::iter::once(shapes::triangle()).collect(),
        SceneChoice::Cube => {
            let mut cube = shapes::cube(0.5);
            cube.rotate_y(0.5);
            std::iter::once(cube).collect()
        }
        SceneChoice::Sphere => std::iter::once(shapes::uv_sphere(0.8, 48, 24)).collect(),
        SceneChoice::Showcase => {
            let mut cube = shapes::cube(0.4);
            cube.rotate_y(0.7);
            cube.translate(Vec3::new(-0.6, 0.0, 0.0));

            let mut sphere = shapes::uv_sphere(0.45, 48, 24);
            sphere.translate(Vec3::new(0.6, 0.05, 0.0));

            let mut ground = shapes::quad(4.0);
            ground.rotate_x(-std::f32::consts::FRAC_PI_2);
            ground.translate(Vec3::new(0.0, -0.4, 0.0));

            vec![cube, sphere, ground].into_iter().collect()
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn save_png(tracer: &RayTracer, path: &Path) -> Result<()> {
    let film = tracer.film();
    let image = image::RgbaImage::from_raw(film.width(), film.height(), film.to_rgba8())
        .context("Film size does not match its pixel buffer")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    log::info!("Starting Lumen");

    let mut params: CameraParameters = match &args.camera {
        Some(path) => read_json(path)?,
        None => CameraParameters::default(),
    };
    if args.ortho {
        params.is_perspective = false;
    }

    let mut config: RenderConfig = match &args.config {
        Some(path) => read_json(path)?,
        None => RenderConfig::default(),
    };
    if let Some(normals) = args.normals {
        config.normal_mode = normals.into();
    }

    let scene = build_scene(args.scene);
    let mut tracer = RayTracer::with_config(scene, args.width, args.height, config);

    let mut controls = CameraControls::new(
        params,
        ControlOptions {
            turntable: args.turntable != 0.0,
            ..Default::default()
        },
    );
    controls.advance(args.turntable);
    let frame_params = controls.parameters(tracer.film().resolution());
    log::debug!("Camera: {:?}", frame_params);

    let start = Instant::now();
    for pass in 0..args.passes {
        let buckets = tracer.render_pass(&frame_params);
        if buckets == 0 {
            log::warn!("Nothing to render at {}x{}", args.width, args.height);
            break;
        }
        log::info!("Pass {}/{} done after {:?}", pass + 1, args.passes, start.elapsed());
    }

    if tracer.film().pixels().is_empty() {
        anyhow::bail!("Cannot save an empty image ({}x{})", args.width, args.height);
    }
    save_png(&tracer, &args.output)?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scenes() {
        assert_eq!(build_scene(SceneChoice::Triangle).triangle_count(), 1);
        assert_eq!(build_scene(SceneChoice::Cube).triangle_count(), 12);
        assert_eq!(build_scene(SceneChoice::Showcase).mesh_count(), 3);

        let sphere = build_scene(SceneChoice::Sphere);
        assert!((sphere.bounds().max.y - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_ground_faces_up() {
        let scene = build_scene(SceneChoice::Showcase);
        let ground = scene.mesh(2).unwrap();
        assert!((ground.face_normal(0) - Vec3::Y).length() < 1e-5);
        assert!((ground.bounds().min.y + 0.4).abs() < 1e-5);
    }
}

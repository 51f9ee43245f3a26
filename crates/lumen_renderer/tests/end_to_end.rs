//! Whole-pipeline checks: scene, camera, integrator and film together.

use glam::{IVec2, UVec2};
use lumen_core::{shapes, Scene};
use lumen_renderer::{
    CameraControls, CameraParameters, Color, ControlOptions, RayTracer, RenderConfig, Vec3,
};

const BACKGROUND: Color = Color::new(0.1, 0.2, 0.3);

fn triangle_tracer(width: i32, height: i32, jitter: bool) -> RayTracer {
    let scene: Scene = std::iter::once(shapes::triangle()).collect();
    let config = RenderConfig {
        jitter,
        background: BACKGROUND,
        bucket_size: 4,
        ..Default::default()
    };
    RayTracer::with_config(scene, width, height, config)
}

fn front_camera() -> CameraParameters {
    CameraParameters::look_at(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO)
}

#[test]
fn unit_triangle_center_hits_and_corners_miss() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut tracer = triangle_tracer(9, 9, false);
    tracer.render_pass(&front_camera());
    let film = tracer.film();

    let center = film.pixel(IVec2::new(4, 4)).unwrap();
    assert!((center - Color::new(0.5, 0.5, 1.0)).length() < 1e-5);

    for corner in [
        IVec2::new(0, 0),
        IVec2::new(8, 0),
        IVec2::new(0, 8),
        IVec2::new(8, 8),
    ] {
        assert_eq!(film.pixel(corner), Some(BACKGROUND));
    }
    assert!(film.weights().iter().all(|&w| w == 1));
}

#[test]
fn apex_is_at_the_top_of_the_image() {
    // Narrow view so the triangle fills most of the frame
    let mut params = front_camera();
    params.perspective.fov = 20.0;

    let mut tracer = triangle_tracer(21, 21, false);
    tracer.render_pass(&params);
    let film = tracer.film();

    // The apex row is narrow, the base row is wide
    let hits_in_row = |y: i32| {
        (0..21)
            .filter(|&x| film.pixel(IVec2::new(x, y)) != Some(BACKGROUND))
            .count()
    };
    assert!(hits_in_row(4) < hits_in_row(16));
}

#[test]
fn orthographic_view_renders_the_triangle() {
    let mut params = front_camera();
    params.is_perspective = false;

    let mut tracer = triangle_tracer(8, 8, false);
    tracer.render_pass(&params);
    let film = tracer.film();

    let center = film.pixel(IVec2::new(4, 4)).unwrap();
    assert!((center - Color::new(0.5, 0.5, 1.0)).length() < 1e-5);
    assert_eq!(film.pixel(IVec2::new(0, 0)), Some(BACKGROUND));
}

#[test]
fn jittered_passes_converge_on_flat_regions() {
    let mut tracer = triangle_tracer(9, 9, true);
    let params = front_camera();
    for _ in 0..5 {
        tracer.render_pass(&params);
    }
    let film = tracer.film();

    assert!(film.weights().iter().all(|&w| w == 5));
    // Every sample of the center pixel hits the same face
    let center = film.pixel(IVec2::new(4, 4)).unwrap();
    assert!((center - Color::new(0.5, 0.5, 1.0)).length() < 1e-5);
    assert_eq!(film.pixel(IVec2::new(0, 0)), Some(BACKGROUND));
}

#[test]
fn camera_controls_drive_the_tracer() {
    let scene: Scene = std::iter::once(shapes::cube(0.5)).collect();
    let mut tracer = RayTracer::new(scene, 32, 16);
    let mut controls = CameraControls::new(front_camera(), ControlOptions::default());

    let params = controls.parameters(tracer.film().resolution());
    assert_eq!(params.aspect, 2.0);
    tracer.render_pass(&params);

    // Looking straight at the +Z face: the center is (0, 0, 1) mapped to color
    let center = tracer.film().pixel(IVec2::new(16, 8)).unwrap();
    assert!((center - Color::new(0.5, 0.5, 1.0)).length() < 1e-5);

    tracer.reset(&mut controls);
    assert_eq!(tracer.film().sample_count(), 0);
    assert_eq!(tracer.film().resolution(), UVec2::new(32, 16));
}

//! Progressive ray tracing driver.
//!
//! The [`RayTracer`] owns the scene and the film. Each call to
//! [`RayTracer::step`] renders one bucket and folds its samples into the
//! film, so an outer loop can interleave rendering with display updates and
//! stop at any time. After the last bucket the order starts over with a new
//! pass, refining the running mean of every pixel.

use lumen_core::Scene;
use lumen_math::CameraParameters;

use crate::bucket::{generate_buckets, render_bucket, Bucket};
use crate::{Camera, CameraControls, Film, Integrator, RenderConfig};

/// What a single [`RayTracer::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Bucket that was rendered, `None` for an empty film
    pub bucket: Option<Bucket>,
    /// Pass the bucket belonged to
    pub pass: u32,
    /// True if this step finished the pass
    pub pass_complete: bool,
}

/// Drives progressive rendering of a scene into a film.
pub struct RayTracer {
    scene: Scene,
    film: Film,
    integrator: Box<dyn Integrator>,
    config: RenderConfig,
    buckets: Vec<Bucket>,
    next_bucket: usize,
    pass: u32,
}

impl RayTracer {
    /// Create a tracer with the default configuration.
    pub fn new(scene: Scene, width: i32, height: i32) -> Self {
        Self::with_config(scene, width, height, RenderConfig::default())
    }

    /// Create a tracer using the normal integrator described by `config`.
    pub fn with_config(scene: Scene, width: i32, height: i32, config: RenderConfig) -> Self {
        let film = Film::new(width, height);
        let buckets = generate_buckets(film.width(), film.height(), config.bucket_size);
        log::info!(
            "Ray tracer: {} meshes, {} triangles, {}x{} film, {} buckets",
            scene.mesh_count(),
            scene.triangle_count(),
            film.width(),
            film.height(),
            buckets.len()
        );

        Self {
            scene,
            film,
            integrator: Box::new(config.integrator()),
            config,
            buckets,
            next_bucket: 0,
            pass: 0,
        }
    }

    /// Replace the integrator. The film restarts since old samples no
    /// longer match.
    pub fn set_integrator(&mut self, integrator: Box<dyn Integrator>) {
        self.integrator = integrator;
        self.restart();
    }

    /// Change the film resolution and start over.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.film = Film::new(width, height);
        self.buckets = generate_buckets(self.film.width(), self.film.height(), self.config.bucket_size);
        self.restart();
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn film(&self) -> &Film {
        &self.film
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Buckets in render order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Number of passes finished since the last restart.
    pub fn passes_completed(&self) -> u32 {
        self.pass
    }

    /// Render the next bucket with a camera built from `params`.
    pub fn step(&mut self, params: &CameraParameters) -> StepReport {
        let pass = self.pass;
        let Some(bucket) = self.buckets.get(self.next_bucket).copied() else {
            return StepReport {
                bucket: None,
                pass,
                pass_complete: false,
            };
        };

        let camera = Camera::new(params);
        let result = render_bucket(
            &bucket,
            &camera,
            &self.scene,
            self.integrator.as_ref(),
            &self.config,
            self.film.resolution(),
            pass,
        );
        for (pixel, samples) in result.pixels() {
            for &color in samples {
                self.film.add_pixel_color(pixel, color);
            }
        }
        log::debug!(
            "Pass {} bucket {}/{} at ({}, {})",
            pass,
            bucket.index + 1,
            self.buckets.len(),
            bucket.x,
            bucket.y
        );

        self.next_bucket += 1;
        let pass_complete = self.next_bucket == self.buckets.len();
        if pass_complete {
            self.next_bucket = 0;
            self.pass += 1;
            log::info!("Pass {} complete", pass);
        }

        StepReport {
            bucket: Some(bucket),
            pass,
            pass_complete,
        }
    }

    /// Render the remaining buckets of the current pass. Returns how many
    /// buckets were rendered.
    pub fn render_pass(&mut self, params: &CameraParameters) -> usize {
        let mut rendered = 0;
        loop {
            let report = self.step(params);
            if report.bucket.is_none() {
                break;
            }
            rendered += 1;
            if report.pass_complete {
                break;
            }
        }
        rendered
    }

    /// Clear the film and start again from the first bucket.
    pub fn restart(&mut self) {
        self.film.clear();
        self.next_bucket = 0;
        self.pass = 0;
        log::info!("Rendering restarted");
    }

    /// Reset the camera controls and restart.
    pub fn reset(&mut self, controls: &mut CameraControls) {
        controls.reset();
        self.restart();
    }
}

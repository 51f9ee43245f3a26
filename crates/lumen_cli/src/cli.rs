use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::NormalMode;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// A single unit triangle facing the default camera
    Triangle,
    /// A flat-shaded cube
    Cube,
    /// A smooth UV sphere
    Sphere,
    /// A cube, a sphere and a ground quad
    Showcase,
}

/// Normal visualized by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NormalChoice {
    Geometric,
    Shading,
}

impl From<NormalChoice> for NormalMode {
    fn from(choice: NormalChoice) -> Self {
        match choice {
            NormalChoice::Geometric => NormalMode::Geometric,
            NormalChoice::Shading => NormalMode::Shading,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Progressive CPU ray tracer that visualizes surface normals")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: i32,

    /// Image height in pixels
    #[arg(long, default_value_t = 480)]
    pub height: i32,

    /// Number of progressive passes to render
    #[arg(short, long, default_value_t = 4)]
    pub passes: u32,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneChoice::Showcase)]
    pub scene: SceneChoice,

    /// JSON file with camera parameters
    #[arg(long)]
    pub camera: Option<PathBuf>,

    /// JSON file with render settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Render with the orthographic projection
    #[arg(long)]
    pub ortho: bool,

    /// Override the normal visualized by the integrator
    #[arg(long, value_enum)]
    pub normals: Option<NormalChoice>,

    /// Turntable angle in radians applied to the camera position
    #[arg(long, default_value_t = 0.0)]
    pub turntable: f32,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Set the logging level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["lumen"]);
        assert_eq!((args.width, args.height, args.passes), (640, 480, 4));
        assert_eq!(args.scene, SceneChoice::Showcase);
        assert!(!args.ortho);
        assert!(args.camera.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "lumen", "--scene", "sphere", "--normals", "shading", "--ortho", "-p", "2", "-o",
            "out.png",
        ]);
        assert_eq!(args.scene, SceneChoice::Sphere);
        assert_eq!(args.normals, Some(NormalChoice::Shading));
        assert!(args.ortho);
        assert_eq!(args.passes, 2);
        assert_eq!(args.output, PathBuf::from("out.png"));
    }
}

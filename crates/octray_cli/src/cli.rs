use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use octray_core::RenderSettings;

/// Log levels accepted on the command line
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

/// Built-in demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Polished metal spheres over a metal floor
    Spheres,
    /// Diffuse, glass and metal spheres on a yellow ground
    Glass,
    /// A cube mesh over a metal floor
    Mesh,
}

#[derive(Debug, Parser)]
#[command(name = "octray")]
#[command(about = "Offline ray tracer with an octree accelerator")]
pub struct Args {
    /// Render settings as JSON, replacing the scene's camera preset
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// OBJ files to add to the scene as meshes
    #[arg(long = "obj")]
    pub obj: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = SceneKind::Spheres)]
    pub scene: SceneKind,

    #[arg(long, help = "Image width in pixels")]
    pub width: Option<u32>,

    #[arg(long, short = 's', help = "Number of samples per pixel")]
    pub samples: Option<u32>,

    #[arg(long, help = "Maximum bounce depth")]
    pub depth: Option<u32>,

    #[arg(long, short = 't', help = "Worker threads (0 = all cores)")]
    pub threads: Option<usize>,

    #[arg(long, help = "Random seed")]
    pub seed: Option<u64>,

    /// Interpolate vertex normals on loaded meshes
    #[arg(long)]
    pub smooth: bool,

    #[arg(short, long, default_value = "output.ppm", help = "Output file (.ppm or .png)")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info, help = "Set the logging level")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of `settings`.
    pub fn apply_overrides(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.image_width = width;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            settings.max_depth = depth;
        }
        if let Some(threads) = self.threads {
            settings.threads = threads;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["octray"]);
        assert_eq!(args.scene, SceneKind::Spheres);
        assert!(args.obj.is_empty());
        assert_eq!(args.output, PathBuf::from("output.ppm"));
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "octray", "--scene", "glass", "--width", "64", "-s", "3", "--depth", "2", "-t", "2",
            "--obj", "a.obj", "--obj", "b.obj", "--smooth",
        ]);
        assert_eq!(args.scene, SceneKind::Glass);
        assert_eq!(args.obj.len(), 2);
        assert!(args.smooth);

        let mut settings = RenderSettings::default();
        args.apply_overrides(&mut settings);
        assert_eq!(settings.image_width, 64);
        assert_eq!(settings.samples_per_pixel, 3);
        assert_eq!(settings.max_depth, 2);
        assert_eq!(settings.threads, 2);
        assert_eq!(settings.seed, RenderSettings::default().seed);
    }
}

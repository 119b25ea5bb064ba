use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use octray_core::{load_obj, save_image, RenderSettings};
use octray_renderer::{render, SceneBuilder, Shading};

mod cli;
mod scenes;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting octray");

    let mut builder = SceneBuilder::new();
    let preset = scenes::build(args.scene, &mut builder);

    let mut settings = match &args.config {
        Some(path) => RenderSettings::from_json_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => preset,
    };
    args.apply_overrides(&mut settings);

    if !args.obj.is_empty() {
        let start = Instant::now();
        let material = builder.add_material(scenes::mesh_material());
        let shading = if args.smooth {
            Shading::Smooth
        } else {
            Shading::Flat
        };

        for path in &args.obj {
            let mesh = load_obj(path)
                .with_context(|| format!("Failed to load OBJ {}", path.display()))?;
            builder.add_mesh(&mesh, material, shading);
        }
        log::info!("Parsed {} OBJ file(s) in {:.2?}", args.obj.len(), start.elapsed());
    }

    let scene = builder.build();
    let (framebuffer, report) = render(&scene, &settings).context("Render failed")?;

    log::debug!("Scanlines per worker: {:?}", report.rows_per_worker);

    save_image(
        &args.output,
        framebuffer.width(),
        framebuffer.height(),
        &framebuffer.resolve(),
    )
    .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

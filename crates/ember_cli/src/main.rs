use anyhow::{Context, Result};
use clap::Parser;
use ember_renderer::{render, render_parallel, save_image, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

mod cli;
mod scenes;
mod settings;

use cli::{init_logger, Args};
use settings::{RenderJob, Settings};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let job = RenderJob::resolve(&args, &settings)?;

    log::info!(
        "Building scene {:?} ({}x{}, seed {})",
        job.scene,
        job.width,
        job.height,
        job.config.seed
    );
    let mut scene_rng = StdRng::seed_from_u64(job.config.seed);
    let scene = scenes::build(job.scene, job.aspect(), &mut scene_rng);
    log::debug!("Scene has {} top-level objects", scene.world.len());

    let config = RenderConfig {
        use_sky_gradient: scene.sky,
        ..job.config.clone()
    };

    let image = if args.single_thread {
        log::info!("Rendering on a single thread");
        let start = Instant::now();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let image = render(&scene.camera, &scene.world, job.width, job.height, &config, &mut rng);
        log::info!("Render finished in {:.2?}", start.elapsed());
        image
    } else {
        render_parallel(
            &scene.camera,
            &scene.world,
            job.width,
            job.height,
            args.bucket_size,
            &config,
        )
    };

    save_image(&image, &job.output)
        .with_context(|| format!("failed to write {}", job.output.display()))?;
    log::info!("Wrote {}", job.output.display());

    Ok(())
}

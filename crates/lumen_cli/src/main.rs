//! lumen - render a sphere scene to a PPM image.
//!
//! Usage:
//!   lumen                                 - render the built-in demo scene
//!   lumen --scene scene.json -o out.ppm   - render a scene file
//!
//! Set `RUST_LOG=debug` for more detail.

mod demo;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::load_scene;
use lumen_renderer::{
    render, save_ppm, Camera, RenderConfig, TraceConfig, DEFAULT_BUCKET_SIZE, DEFAULT_MAX_DEPTH,
};

/// Largest accepted width or height in pixels.
const MAX_IMAGE_SIZE: i64 = 16_384;

/// Recursive ray tracer for spheres and point lights.
#[derive(Parser, Debug)]
#[command(name = "lumen", version)]
struct Args {
    /// Scene description (JSON). The built-in demo scene is used when omitted.
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image (PPM, P3)
    #[arg(short, long, default_value = "out.ppm")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(
        long,
        default_value_t = 640,
        value_parser = clap::value_parser!(u32).range(1..=MAX_IMAGE_SIZE)
    )]
    width: u32,

    /// Image height in pixels
    #[arg(
        long,
        default_value_t = 480,
        value_parser = clap::value_parser!(u32).range(1..=MAX_IMAGE_SIZE)
    )]
    height: u32,

    /// Jittered samples per pixel
    #[arg(long, default_value_t = 16)]
    samples: u32,

    /// Maximum reflection/refraction depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Seed for sub-pixel jitter
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Disable the diffuse term
    #[arg(long)]
    no_diffuse: bool,

    /// Disable the specular highlight
    #[arg(long)]
    no_specular: bool,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: self.samples.max(1),
            seed: self.seed,
            bucket_size: DEFAULT_BUCKET_SIZE,
            trace: TraceConfig {
                max_depth: self.max_depth,
                diffuse: !self.no_diffuse,
                specular: !self.no_specular,
                ..Default::default()
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let loaded = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, rendering the built-in demo scene");
            demo::demo_scene().context("Built-in demo scene is invalid")?
        }
    };

    let mut camera =
        Camera::from_description(&loaded.camera).with_resolution(args.width, args.height);
    camera.initialize();

    let image = render(&camera, &loaded.scene, &args.render_config());

    save_ppm(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}

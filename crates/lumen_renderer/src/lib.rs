//! Lumen Renderer - recursive CPU ray tracing.
//!
//! A Whitted-style tracer: nearest-hit search over every sphere, Phong
//! shading with hard shadows for opaque surfaces, and recursive mirror and
//! refracted rays with a fixed energy split.

mod bucket;
mod camera;
mod ppm;
mod renderer;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use ppm::{save_ppm, write_ppm};
pub use renderer::{color_to_rgb, linear_to_gamma, render, render_pixel, ImageBuffer, RenderConfig};
pub use tracer::{trace, TraceConfig, DEFAULT_BIAS, DEFAULT_MAX_DEPTH};

/// Re-export the scene and math types the renderer works with
pub use lumen_core::{ConstantLight, Light, Material, Scene, Sphere};
pub use lumen_math::{Color, Ray, Vec3};

use rand::{Rng, RngCore};

/// Uniform random number in [0, 1).
#[inline]
pub(crate) fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

//! Supersampling render driver.
//!
//! Casts jittered camera rays through every pixel, averages their traced
//! radiance, and assembles the image from buckets rendered in parallel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use lumen_core::Scene;
use rand::RngCore;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::tracer::{trace, TraceConfig};
use crate::{Camera, Color};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Base seed for the per-bucket random streams
    pub seed: u64,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Settings passed to every `trace` call
    pub trace: TraceConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 16,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
            trace: TraceConfig::default(),
        }
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
fn clamp_01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * clamp_01(linear_to_gamma(color.x))) as u8;
    let g = (255.0 * clamp_01(linear_to_gamma(color.y))) as u8;
    let b = (255.0 * clamp_01(linear_to_gamma(color.z))) as u8;
    [r, g, b]
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.samples_per_pixel.max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += trace(scene, &ray, 0, &config.trace);
    }

    // Average the samples
    pixel_color / samples as f64
}

/// Linear radiance image.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Row-major offset of (x, y), computed in `usize` so large images don't wrap.
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[(local_y * bucket.width + local_x) as usize];
                self.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    /// Convert to gamma-corrected RGB bytes, row by row.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer.
///
/// Buckets are traced in parallel. Each bucket draws from its own seeded
/// random stream, so the result does not depend on thread scheduling.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let width = camera.image_width;
    let height = camera.image_height;
    let buckets = generate_buckets(width, height, config.bucket_size.max(1));
    let total = buckets.len();
    let report_every = (total / 10).max(1);
    let completed = AtomicUsize::new(0);
    let start = Instant::now();

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {} ({} buckets, {} spheres, {} lights)",
        width,
        height,
        config.samples_per_pixel,
        config.trace.max_depth,
        total,
        scene.sphere_count(),
        scene.light_count()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, camera, scene, config);

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if done % report_every == 0 || done == total {
                log::info!(
                    "Progress: {}/{} buckets ({:.0}%)",
                    done,
                    total,
                    100.0 * done as f64 / total as f64
                );
            }

            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{ConstantLight, Material, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_scene() -> Scene {
        let mut scene = Scene::new(Color::splat(0.05));
        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -4.0),
            1.0,
            Arc::new(Material::opaque(Color::new(0.8, 0.3, 0.3), 30.0)),
        ));
        scene.add_sphere(Sphere::new(
            Vec3::new(1.2, 0.2, -2.5),
            0.4,
            Arc::new(Material::transparent(1.0 / 1.5)),
        ));
        scene.add_light(ConstantLight::new(Vec3::new(3.0, 4.0, 0.0), Color::ONE, 30.0));
        scene
    }

    fn test_camera(width: u32, height: u32) -> Camera {
        let mut camera = Camera::new()
            .with_resolution(width, height)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_fov(60.0);
        camera.initialize();
        camera
    }

    fn fast_config() -> RenderConfig {
        RenderConfig {
            samples_per_pixel: 2,
            seed: 7,
            bucket_size: 8,
            trace: TraceConfig {
                max_depth: 5,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(4.0, 0.25, -1.0)), [255, 127, 0]);
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let scene = test_scene();
        let camera = test_camera(21, 21);
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel looks straight at the red sphere
        let color = render_pixel(&camera, &scene, 10, 10, &fast_config(), &mut rng);
        assert!(color.x > scene.ambient().x);
        assert!(color.x > color.z);
    }

    #[test]
    fn test_render_pixel_miss_is_ambient() {
        let scene = test_scene();
        let camera = test_camera(21, 21);
        let mut rng = StdRng::seed_from_u64(42);

        let color = render_pixel(&camera, &scene, 0, 20, &fast_config(), &mut rng);
        assert!((color - scene.ambient()).length() < 1e-12);
    }

    #[test]
    fn test_render_fills_image() {
        let scene = test_scene();
        let camera = test_camera(20, 12);
        let image = render(&camera, &scene, &fast_config());

        assert_eq!(image.width, 20);
        assert_eq!(image.height, 12);
        assert_eq!(image.pixels.len(), 240);
        assert_eq!(image.to_rgb().len(), 240 * 3);
        assert!(image.pixels.iter().all(|c| c.is_finite()));
        assert!(image.get(10, 6).x > scene.ambient().x);
    }

    #[test]
    fn test_render_is_deterministic() {
        let scene = test_scene();
        let camera = test_camera(16, 16);
        let config = fast_config();

        let a = render(&camera, &scene, &config);
        let b = render(&camera, &scene, &config);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_image_buffer_set_get() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(3, 2, Color::new(0.1, 0.2, 0.3));

        assert_eq!(image.get(3, 2), Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_image_index_past_u32_range() {
        // 100_000^2 pixels overflow u32; only the offset math is exercised here
        let image = ImageBuffer {
            width: 100_000,
            height: 100_000,
            pixels: Vec::new(),
        };

        assert_eq!(image.index(99_999, 99_999), 9_999_999_999);
        assert_eq!(image.index(5, 1), 100_005);
    }
}

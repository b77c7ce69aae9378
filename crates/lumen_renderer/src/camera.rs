//! Pinhole camera for primary ray generation.

use crate::{gen_f64, Ray};
use lumen_core::CameraDescription;
use lumen_math::{normalize_in_place, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    vfov: f64, // Vertical field of view in degrees

    // Cached computed values (set by initialize())
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 800,
            image_height: 600,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 60.0,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            w: Vec3::Z,
        }
    }

    /// Create a camera placed as described in a scene file.
    pub fn from_description(desc: &CameraDescription) -> Self {
        Self::new()
            .with_position(desc.look_from, desc.look_at, desc.vup)
            .with_fov(desc.vfov)
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f64) -> Self {
        self.vfov = vfov;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.center = self.look_from;

        // Image plane one unit in front of the eye
        let h = (self.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width =
            viewport_height * (self.image_width as f64 / self.image_height.max(1) as f64);

        self.w = (self.look_from - self.look_at).normalize_or_zero();
        let u = self.vup.cross(self.w).normalize_or_zero();
        let v = self.w.cross(u);

        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        self.pixel_delta_u = viewport_u / self.image_width.max(1) as f64;
        self.pixel_delta_v = viewport_v / self.image_height.max(1) as f64;

        let viewport_upper_left = self.center - self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Ray through pixel (i, j) offset by (dx, dy) from the pixel center,
    /// in pixel units. Row 0 is the top of the image.
    pub fn ray_through(&self, i: u32, j: u32, dx: f64, dy: f64) -> Ray {
        let pixel_sample = self.pixel00_loc
            + (i as f64 + dx) * self.pixel_delta_u
            + (j as f64 + dy) * self.pixel_delta_v;

        let mut direction = pixel_sample - self.center;
        normalize_in_place(&mut direction);
        Ray::new(self.center, direction)
    }

    /// Generate a ray for pixel (i, j) jittered within the pixel square.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let dx = gen_f64(rng) - 0.5;
        let dy = gen_f64(rng) - 0.5;
        self.ray_through(i, j, dx, dy)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

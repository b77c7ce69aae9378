//! Scene container.
//!
//! A scene is built once before rendering and only read while tracing.

use lumen_math::Color;

use crate::light::Light;
use crate::sphere::Sphere;

/// Spheres, lights and the ambient floor color.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
    ambient: Color,
}

impl Scene {
    /// Create an empty scene with the given ambient color.
    pub fn new(ambient: Color) -> Self {
        Self {
            spheres: Vec::new(),
            lights: Vec::new(),
            ambient,
        }
    }

    /// Add a sphere to the scene.
    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Radiance of rays that hit nothing, and the floor of every opaque hit.
    pub fn ambient(&self) -> Color {
        self.ambient
    }

    /// Get the number of spheres.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Get the number of lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Check if the scene has no geometry.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}

//! Surface shading coefficients.

use lumen_math::Color;

/// Shading coefficients for a sphere surface.
///
/// Materials are immutable once built and are shared between spheres by
/// reference (`Arc<Material>`), so one definition can back many spheres.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Diffuse reflectance (RGB, 0-1). Also tints the specular highlight.
    pub diffuse: Color,

    /// Specular reflectance (RGB, 0-1)
    pub specular: Color,

    /// Phong exponent, larger values give tighter highlights
    pub shininess: f64,

    /// Transparent surfaces skip local shading and split into reflected
    /// and refracted rays instead
    pub transparent: bool,

    /// Relative index of refraction used when a ray enters the sphere.
    /// Its reciprocal is used when leaving. Ignored for opaque materials.
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color::splat(0.5), // Grey default
            specular: Color::ONE,
            shininess: 50.0,
            transparent: false,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    /// Create an opaque material with the given diffuse color and Phong exponent.
    pub fn opaque(diffuse: Color, shininess: f64) -> Self {
        Self {
            diffuse,
            shininess,
            ..Default::default()
        }
    }

    /// Create a transparent material with the given relative refractive index.
    pub fn transparent(refractive_index: f64) -> Self {
        Self {
            diffuse: Color::ONE,
            transparent: true,
            refractive_index,
            ..Default::default()
        }
    }

    /// Set the specular color.
    pub fn with_specular(mut self, specular: Color) -> Self {
        self.specular = specular;
        self
    }
}

//! Point lights.

use lumen_math::{Color, Vec3};

/// Isotropic point light with constant output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantLight {
    position: Vec3,
    /// Base color already multiplied by energy
    illumination: Color,
}

impl ConstantLight {
    /// Create a new light. The emitted illumination is `color * energy`.
    pub fn new(position: Vec3, color: Color, energy: f64) -> Self {
        Self {
            position,
            illumination: color * energy,
        }
    }
}

/// A light source in the scene.
///
/// Only constant point lights exist today. Any new variant must expose a
/// position and an illumination at a given point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Constant(ConstantLight),
}

impl Light {
    /// Position of the light.
    #[inline]
    pub fn position(&self) -> Vec3 {
        match self {
            Light::Constant(light) => light.position,
        }
    }

    /// Illumination arriving at `point`, before distance falloff.
    #[inline]
    pub fn illumination(&self, _point: Vec3) -> Color {
        match self {
            Light::Constant(light) => light.illumination,
        }
    }
}

impl From<ConstantLight> for Light {
    fn from(light: ConstantLight) -> Self {
        Light::Constant(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_light_premultiplies_energy() {
        let light: Light =
            ConstantLight::new(Vec3::new(1.0, 2.0, 3.0), Color::new(1.0, 0.5, 0.0), 10.0).into();

        assert_eq!(light.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(light.illumination(Vec3::ZERO), Color::new(10.0, 5.0, 0.0));
    }

    #[test]
    fn test_constant_light_is_isotropic() {
        let light: Light = ConstantLight::new(Vec3::ZERO, Color::ONE, 2.0).into();
        assert_eq!(
            light.illumination(Vec3::new(5.0, 0.0, 0.0)),
            light.illumination(Vec3::new(0.0, -100.0, 3.0))
        );
    }
}

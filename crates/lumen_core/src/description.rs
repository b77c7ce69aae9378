//! JSON scene descriptions.
//!
//! A scene file declares materials once by name; spheres reference them by
//! that name and end up sharing one `Arc<Material>`. The camera block is
//! carried alongside the built scene for the renderer to consume.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use lumen_math::{Color, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::light::ConstantLight;
use crate::material::Material;
use crate::scene::Scene;
use crate::sphere::Sphere;

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Sphere {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("Light {index} has invalid energy {energy}")]
    InvalidEnergy { index: usize, energy: f64 },

    #[error("Material '{name}' has invalid refractive index {value}")]
    InvalidRefractiveIndex { name: String, value: f64 },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// Pinhole camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CameraDescription {
    pub look_from: Vec3,
    pub look_at: Vec3,
    #[serde(default = "default_vup")]
    pub vup: Vec3,
    /// Vertical field of view in degrees
    #[serde(default = "default_vfov")]
    pub vfov: f64,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: default_vup(),
            vfov: default_vfov(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MaterialDescription {
    pub diffuse: Color,
    #[serde(default = "default_specular")]
    pub specular: Color,
    #[serde(default = "default_shininess")]
    pub shininess: f64,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default = "default_refractive_index")]
    pub refractive_index: f64,
}

impl From<&MaterialDescription> for Material {
    fn from(desc: &MaterialDescription) -> Self {
        Material {
            diffuse: desc.diffuse,
            specular: desc.specular,
            shininess: desc.shininess,
            transparent: desc.transparent,
            refractive_index: desc.refractive_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f64,
    /// Name of an entry in `materials`
    pub material: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDescription {
    Constant {
        position: Vec3,
        #[serde(default = "default_light_color")]
        color: Color,
        energy: f64,
    },
}

/// Top-level scene file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneDescription {
    #[serde(default = "default_ambient")]
    pub ambient: Color,
    #[serde(default)]
    pub camera: CameraDescription,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDescription>,
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
}

fn default_vup() -> Vec3 {
    Vec3::Y
}

fn default_vfov() -> f64 {
    60.0
}

fn default_specular() -> Color {
    Color::ONE
}

fn default_shininess() -> f64 {
    50.0
}

fn default_refractive_index() -> f64 {
    1.0
}

fn default_light_color() -> Color {
    Color::ONE
}

fn default_ambient() -> Color {
    Color::splat(0.05)
}

impl CameraDescription {
    /// Reject placements that leave the camera basis degenerate.
    pub fn validate(&self) -> SceneResult<()> {
        let view = self.look_at - self.look_from;
        if !view.is_finite() || view.length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(format!(
                "look_from {} and look_at {} do not define a view direction",
                self.look_from, self.look_at
            )));
        }
        if !self.vup.is_finite() || self.vup.cross(view).length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(format!(
                "vup {} is parallel to the view direction {}",
                self.vup, view
            )));
        }
        if !(self.vfov.is_finite() && self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "vfov {} is outside (0, 180) degrees",
                self.vfov
            )));
        }
        Ok(())
    }
}

/// A built scene together with the camera it was described with.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub scene: Scene,
    pub camera: CameraDescription,
}

impl SceneDescription {
    /// Validate the description and build the immutable scene.
    pub fn build(&self) -> SceneResult<Scene> {
        self.camera.validate()?;

        let mut materials: HashMap<&str, Arc<Material>> = HashMap::new();
        for (name, desc) in &self.materials {
            let valid_index = desc.refractive_index.is_finite() && desc.refractive_index > 0.0;
            if desc.transparent && !valid_index {
                return Err(SceneError::InvalidRefractiveIndex {
                    name: name.clone(),
                    value: desc.refractive_index,
                });
            }
            materials.insert(name.as_str(), Arc::new(Material::from(desc)));
        }

        let mut scene = Scene::new(self.ambient);

        for (index, desc) in self.spheres.iter().enumerate() {
            if !(desc.radius.is_finite() && desc.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: desc.radius,
                });
            }
            let material = materials
                .get(desc.material.as_str())
                .ok_or_else(|| SceneError::UnknownMaterial {
                    index,
                    name: desc.material.clone(),
                })?;
            scene.add_sphere(Sphere::new(desc.center, desc.radius, material.clone()));
        }

        for (index, desc) in self.lights.iter().enumerate() {
            match *desc {
                LightDescription::Constant {
                    position,
                    color,
                    energy,
                } => {
                    if !(energy.is_finite() && energy >= 0.0) {
                        return Err(SceneError::InvalidEnergy { index, energy });
                    }
                    scene.add_light(ConstantLight::new(position, color, energy));
                }
            }
        }

        for (name, material) in &materials {
            // Only the local map holds it
            if Arc::strong_count(material) == 1 {
                log::warn!("Material '{}' is not used by any sphere", name);
            }
        }

        if scene.light_count() == 0 {
            log::warn!("Scene has no lights, only ambient color will be visible");
        }

        log::debug!(
            "Built scene: {} spheres, {} lights, {} materials",
            scene.sphere_count(),
            scene.light_count(),
            materials.len()
        );

        Ok(scene)
    }
}

/// Load a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> SceneResult<LoadedScene> {
    let description: SceneDescription = serde_json::from_str(json)?;
    let scene = description.build()?;
    Ok(LoadedScene {
        scene,
        camera: description.camera,
    })
}

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<LoadedScene> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let loaded = load_scene_from_str(&json)?;

    log::info!(
        "Loaded {} spheres and {} lights from {}",
        loaded.scene.sphere_count(),
        loaded.scene.light_count(),
        path.display()
    );

    Ok(loaded)
}

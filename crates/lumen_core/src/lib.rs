//! Lumen Core - scene data model for the lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Material`, `Light`
//! - **Scene files**: JSON scene descriptions and loading
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_scene;
//!
//! let loaded = load_scene("scenes/classic.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     loaded.scene.sphere_count(),
//!     loaded.scene.light_count());
//! ```

pub mod description;
pub mod light;
pub mod material;
pub mod scene;
pub mod sphere;

// Re-export commonly used types
pub use description::{
    load_scene, load_scene_from_str, CameraDescription, LightDescription, LoadedScene,
    MaterialDescription, SceneDescription, SceneError, SceneResult, SphereDescription,
};
pub use light::{ConstantLight, Light};
pub use material::Material;
pub use scene::Scene;
pub use sphere::{Intersection, Sphere};

//! Built-in scene used when no scene file is given.

use lumen_core::{load_scene_from_str, LoadedScene, SceneResult};

const CLASSIC_SCENE: &str = include_str!("../scenes/classic.json");

/// Floor, three opaque spheres and two glass spheres under two point lights.
pub fn demo_scene() -> SceneResult<LoadedScene> {
    load_scene_from_str(CLASSIC_SCENE)
}

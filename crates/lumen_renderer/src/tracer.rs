//! The recursive shading function.
//!
//! `trace` returns the radiance carried by one ray:
//!
//! - miss: the scene's ambient color
//! - opaque hit: ambient + diffuse + specular from every unshadowed light,
//!   plus half of the radiance along the mirror direction
//! - transparent hit: a quarter of the reflected radiance plus three
//!   quarters of the refracted radiance (no local shading)
//!
//! Recursion stops adding child rays once `depth` reaches `max_depth`.

use lumen_core::{Scene, Sphere};
use lumen_math::{normalize_in_place, reflect, refract, Color, Ray, Vec3};

/// Default recursion limit.
pub const DEFAULT_MAX_DEPTH: u32 = 40;

/// Default distance a spawn point is nudged per step to clear its surface.
pub const DEFAULT_BIAS: f64 = 1e-7;

/// Upper bound on nudge steps for a single spawn point.
const MAX_BIAS_STEPS: u32 = 10_000;

const OPAQUE_REFLECTION_WEIGHT: f64 = 0.5;
const TRANSPARENT_REFLECTION_WEIGHT: f64 = 0.25;
const REFRACTION_WEIGHT: f64 = 0.75;

/// Tracer settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceConfig {
    /// Depth at which no more child rays are spawned
    pub max_depth: u32,
    /// Include the Lambertian term in local shading
    pub diffuse: bool,
    /// Include the Phong highlight in local shading
    pub specular: bool,
    /// Nudge distance used to move spawn points off a surface
    pub bias: f64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            diffuse: true,
            specular: true,
            bias: DEFAULT_BIAS,
        }
    }
}

/// Closest forward hit along a ray.
struct NearestHit<'a> {
    sphere: &'a Sphere,
    t: f64,
    origin_inside: bool,
}

/// Compute the radiance seen along `ray`.
///
/// `ray.direction()` must be unit length. The outer driver starts at depth 0.
pub fn trace(scene: &Scene, ray: &Ray, depth: u32, config: &TraceConfig) -> Color {
    let Some(hit) = nearest_hit(scene, ray) else {
        return scene.ambient();
    };

    let sphere = hit.sphere;
    let direction = ray.direction();
    let hit_point = ray.at(hit.t);
    let normal = sphere.normal_at(hit_point);

    if !sphere.material().transparent {
        let point = nudge(hit_point, normal * config.bias, |p| sphere.is_outside(p));
        let mut color = shade_local(scene, sphere, point, normal, -direction, config);

        if depth < config.max_depth && direction.dot(normal) < 0.0 {
            let reflected = Ray::new(point, reflect(direction, normal));
            color += OPAQUE_REFLECTION_WEIGHT * trace(scene, &reflected, depth + 1, config);
        }
        return color;
    }

    if depth >= config.max_depth {
        return Color::ZERO;
    }

    let children = transparent_children(&hit, hit_point, normal, direction, config.bias);
    let mut color =
        TRANSPARENT_REFLECTION_WEIGHT * trace(scene, &children.reflected, depth + 1, config);
    if let Some(refracted) = children.refracted {
        color += REFRACTION_WEIGHT * trace(scene, &refracted, depth + 1, config);
    }
    color
}

/// Linear scan for the closest sphere in front of the ray.
fn nearest_hit<'a>(scene: &'a Scene, ray: &Ray) -> Option<NearestHit<'a>> {
    let mut nearest: Option<NearestHit<'a>> = None;

    for sphere in scene.spheres() {
        let Some(hit) = sphere.intersect(ray) else {
            continue;
        };

        // From inside, the near root is behind the origin and we leave through t1
        let t = if hit.origin_inside {
            hit.t1
        } else if hit.t0 >= 0.0 {
            hit.t0
        } else {
            continue;
        };

        if nearest.as_ref().map_or(true, |n| t < n.t) {
            nearest = Some(NearestHit {
                sphere,
                t,
                origin_inside: hit.origin_inside,
            });
        }
    }

    nearest
}

/// A shadow ray is blocked by any sphere it meets in front of its origin.
fn is_occluded(scene: &Scene, shadow_ray: &Ray) -> bool {
    scene.spheres().iter().any(|sphere| {
        sphere
            .intersect(shadow_ray)
            .is_some_and(|hit| hit.t0 > 0.0 || hit.t1 > 0.0)
    })
}

/// Ambient floor plus Phong diffuse and specular terms from each visible light.
///
/// The highlight is tinted with the diffuse color, not the material's
/// specular color.
fn shade_local(
    scene: &Scene,
    sphere: &Sphere,
    point: Vec3,
    normal: Vec3,
    view_dir: Vec3,
    config: &TraceConfig,
) -> Color {
    let material = sphere.material();
    let mut color = scene.ambient();

    for light in scene.lights() {
        let to_light = light.position() - point;
        let distance_squared = to_light.length_squared();
        let mut light_dir = to_light;
        normalize_in_place(&mut light_dir);

        if is_occluded(scene, &Ray::new(point, light_dir)) {
            continue;
        }

        let incoming = light.illumination(point) / distance_squared;
        let cos_theta = normal.dot(light_dir);

        if config.diffuse {
            color += cos_theta.max(0.0) * incoming * material.diffuse;
        }

        if config.specular && cos_theta >= 0.0 {
            let mirrored = reflect(-light_dir, normal);
            let highlight = view_dir.dot(mirrored).max(0.0).powf(material.shininess);
            color += highlight * incoming * material.diffuse;
        }
    }

    color
}

/// Child rays spawned by a transparent hit.
#[derive(Debug, Clone, Copy)]
struct TransparentChildren {
    reflected: Ray,
    /// `None` on total internal reflection or a grazing hit
    refracted: Option<Ray>,
}

/// Build the reflected and refracted children of a transparent hit.
///
/// The reflected child stays on the side the ray arrived from and the
/// refracted one crosses the surface. Entering uses the material's index
/// as `eta`, leaving uses its reciprocal.
fn transparent_children(
    hit: &NearestHit<'_>,
    hit_point: Vec3,
    normal: Vec3,
    direction: Vec3,
    bias: f64,
) -> TransparentChildren {
    let sphere = hit.sphere;
    let entering = !hit.origin_inside;
    let refractive_index = sphere.material().refractive_index;
    let outward_step = normal * bias;
    let to_outside = |p: Vec3| nudge(p, outward_step, |q| sphere.is_outside(q));
    let to_inside = |p: Vec3| nudge(p, -outward_step, |q| sphere.contains(q));

    // Normal facing the incoming ray, and the index ratio across the surface
    let (facing, eta) = if entering {
        (normal, refractive_index)
    } else {
        (-normal, 1.0 / refractive_index)
    };

    let reflect_origin = if entering {
        to_outside(hit_point)
    } else {
        to_inside(hit_point)
    };
    let reflected = Ray::new(reflect_origin, reflect(direction, facing));

    let mut refracted = None;
    if direction.dot(facing) < 0.0 {
        let mut refracted_dir = refract(direction, facing, eta);
        // Zero means total internal reflection
        if refracted_dir != Vec3::ZERO {
            normalize_in_place(&mut refracted_dir);
            let refract_origin = if entering {
                to_inside(hit_point)
            } else {
                to_outside(hit_point)
            };
            refracted = Some(Ray::new(refract_origin, refracted_dir));
        }
    }

    TransparentChildren {
        reflected,
        refracted,
    }
}

/// Step `p` by `step` until `done` holds, giving up after `MAX_BIAS_STEPS`.
#[inline]
fn nudge(mut p: Vec3, step: Vec3, done: impl Fn(Vec3) -> bool) -> Vec3 {
    for _ in 0..MAX_BIAS_STEPS {
        if done(p) {
            break;
        }
        p += step;
    }
    p
}

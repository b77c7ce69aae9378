//! Sphere primitive and ray intersection.

use std::sync::Arc;

use lumen_math::{normalize_in_place, Ray, Vec3};

use crate::material::Material;

/// Both roots of a ray/sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Near root, `t0 <= t1`
    pub t0: f64,
    /// Far root
    pub t1: f64,
    /// Whether the ray origin lies strictly inside the sphere. When set,
    /// `t0 < 0 < t1` and the ray leaves the sphere at `t1`.
    pub origin_inside: bool,
}

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere. `radius` must be positive.
    pub fn new(center: Vec3, radius: f64, material: Arc<Material>) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Shared handle to the material, for spheres built from the same definition.
    pub fn material_handle(&self) -> &Arc<Material> {
        &self.material
    }

    /// Returns true if `p` is strictly inside the sphere.
    ///
    /// Points exactly on the surface count as outside.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        (p - self.center).length_squared() < self.radius * self.radius
    }

    /// Returns true if `p` is strictly outside the sphere.
    #[inline]
    pub fn is_outside(&self, p: Vec3) -> bool {
        (p - self.center).length_squared() > self.radius * self.radius
    }

    /// Outward unit normal at a point on (or near) the surface.
    #[inline]
    pub fn normal_at(&self, p: Vec3) -> Vec3 {
        let mut n = p - self.center;
        normalize_in_place(&mut n);
        n
    }

    /// Intersect a ray with the sphere.
    ///
    /// Returns both roots of the quadratic, or `None` if the ray's line
    /// misses the sphere. Roots behind the origin are reported as negative
    /// values; picking the relevant one is up to the caller.
    ///
    /// An origin exactly on the surface yields a root of 0 and is not
    /// supported. The tracer's bias loops step every spawn point strictly
    /// inside or outside before casting from it.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let oc = ray.origin() - self.center;
        let dir = ray.direction();
        let r2 = self.radius * self.radius;

        let origin_inside = oc.dot(oc) < r2;

        let a = dir.dot(dir);
        let b = 2.0 * oc.dot(dir);
        let c = oc.dot(oc) - r2;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        Some(Intersection {
            t0: (-b - sqrtd) / (2.0 * a),
            t1: (-b + sqrtd) / (2.0 * a),
            origin_inside,
        })
    }
}

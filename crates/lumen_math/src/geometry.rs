//! Geometric operators used by intersection and shading code.

use crate::Vec3;

/// Slack allowed on the hemisphere preconditions of [`reflect`] and
/// [`refract`]. Hit normals are recomputed from rounded hit points, so a
/// ray meeting a sphere tangentially can land a hair on the wrong side.
const HEMISPHERE_TOLERANCE: f64 = 1e-9;

/// Normalize `v` in place.
///
/// The zero vector has no direction and is left unchanged.
#[inline]
pub fn normalize_in_place(v: &mut Vec3) {
    let length = v.dot(*v).sqrt();
    if length > 0.0 {
        *v *= 1.0 / length;
    }
}

/// Mirror `incident` about `normal`.
///
/// `incident` must point into the surface, i.e. `incident · normal <= 0`.
/// The result has the same length as `incident`.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    debug_assert!(
        incident.dot(normal) <= HEMISPHERE_TOLERANCE,
        "reflect: incident {incident} leaves the surface along normal {normal}"
    );
    incident - normal * (2.0 * incident.dot(normal))
}

/// Bend `incident` through a surface with relative index `eta`.
///
/// Both vectors must be unit length and `incident` must point into the
/// surface. Returns `Vec3::ZERO` on total internal reflection, in which case
/// no transmitted ray exists.
#[inline]
pub fn refract(incident: Vec3, normal: Vec3, eta: f64) -> Vec3 {
    debug_assert!(incident.is_normalized(), "refract: incident {incident} is not unit length");
    debug_assert!(normal.is_normalized(), "refract: normal {normal} is not unit length");
    debug_assert!(
        incident.dot(normal) <= HEMISPHERE_TOLERANCE,
        "refract: incident {incident} leaves the surface along normal {normal}"
    );

    let c = -incident.dot(normal);
    let delta = 1.0 - eta * eta * (1.0 - c * c);
    if delta < 0.0 {
        return Vec3::ZERO;
    }
    incident * eta + normal * (eta * c - delta.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_normalize_in_place() {
        let mut v = Vec3::new(3.0, 0.0, 4.0);
        normalize_in_place(&mut v);
        assert!((v.length() - 1.0).abs() < EPS);
        assert!((v - Vec3::new(0.6, 0.0, 0.8)).length() < EPS);
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        let mut v = Vec3::ZERO;
        normalize_in_place(&mut v);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_reflect_head_on() {
        let r = reflect(Vec3::new(0.0, 0.0, -1.0), Vec3::Z);
        assert_eq!(r, Vec3::Z);
    }

    #[test]
    fn test_reflect_preserves_length_and_flips_normal_component() {
        let normal = Vec3::new(1.0, 2.0, 2.0).normalize();
        let directions = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.3, -0.9, -0.1),
            Vec3::new(-0.2, -0.2, -0.9),
            Vec3::new(2.0, -1.0, -0.5),
        ];

        for d in directions {
            let incident = d.normalize();
            assert!(incident.dot(normal) <= 0.0);

            let r = reflect(incident, normal);
            assert!(r.dot(normal) >= 0.0, "reflected {r} points into the surface");
            assert!((r.length() - incident.length()).abs() < EPS);
            assert!((r.dot(normal) + incident.dot(normal)).abs() < EPS);
        }
    }

    #[test]
    fn test_refract_matched_index_passes_straight_through() {
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        let t = refract(incident, Vec3::Y, 1.0);
        assert!((t - incident).length() < EPS);
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        let t = refract(incident, Vec3::Y, 1.0 / 1.5);

        assert!((t.length() - 1.0).abs() < 1e-9);
        // Snell: sin(theta_t) = eta * sin(theta_i)
        let sin_i = incident.x;
        assert!((t.x - sin_i / 1.5).abs() < 1e-9);
        assert!(t.y < 0.0);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        // 60 degrees from the normal, leaving glass into air
        let incident = Vec3::new(3f64.sqrt() / 2.0, -0.5, 0.0);
        let t = refract(incident, Vec3::Y, 1.5);
        assert_eq!(t, Vec3::ZERO);
    }
}

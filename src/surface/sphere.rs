//! Spherical surface
//!
//! Intersection of a ray with a spherical cap. The cap is described by its chord (the flat disc
//! spanned by the rim of the cap), the normal of the chord pointing towards the center of
//! curvature, the (positive) curvature and the diameter of the chord.
use nalgebra::{Point3, Vector3};
use roots::{find_roots_quadratic, Roots};
use std::f64::consts::FRAC_PI_2;

use super::{intersect_plane, Intersection};
use crate::config::SimulationConfig;

/// Returns the half opening angle of a spherical cap with the given diameter and curvature.
///
/// If the cap is larger than a hemisphere (`|diameter * curvature / 2| > 1`), the angle is
/// clamped to `±pi/2`.
#[must_use]
pub fn half_angle(diameter: f64, curvature: f64) -> f64 {
    let sin_theta = diameter * curvature / 2.0;
    if sin_theta.abs() > 1.0 {
        FRAC_PI_2.copysign(sin_theta)
    } else {
        sin_theta.asin()
    }
}
/// Returns the center of the sphere defined by a chord and a (signed) curvature.
///
/// With a positive curvature the center lies on the side of `chord_normal`, with a negative one
/// on the opposite side.
#[must_use]
pub fn sphere_center(
    chord_center: &Point3<f64>,
    chord_normal: &Vector3<f64>,
    curvature: f64,
    diameter: f64,
) -> Point3<f64> {
    let theta = half_angle(diameter, curvature);
    chord_center + theta.cos() * chord_normal / curvature
}
/// Calculate the intersection of a ray with a spherical cap.
///
/// The ray starts at `origin` and propagates along the unit vector `dir`. `chord_normal` must
/// point towards the center of curvature and `curvature` must be positive. Use
/// [`OpticalSurface::intersect`](super::OpticalSurface::intersect) for surfaces with a signed
/// curvature.
///
/// Caps with `curvature` below [`SimulationConfig::flat_curvature`] are treated as flat discs.
/// Of the (up to two) intersections with the full sphere, the closer one lying on the cap is
/// returned.
#[must_use]
pub fn intersect_spherical_surface(
    origin: &Point3<f64>,
    dir: &Vector3<f64>,
    chord_center: &Point3<f64>,
    chord_normal: &Vector3<f64>,
    curvature: f64,
    diameter: f64,
    config: &SimulationConfig,
) -> Option<Intersection> {
    if curvature.abs() < config.flat_curvature() {
        return intersect_plane(origin, dir, chord_center, chord_normal, diameter, config);
    }
    let center = sphere_center(chord_center, chord_normal, curvature, diameter);
    let radius = 1.0 / curvature;
    // |origin + t*dir - center|^2 = r^2
    // t^2 |dir|^2 - 2 t dir.(center-origin) + |center-origin|^2 - r^2 = 0
    let pc = center - origin;
    let a = dir.norm_squared();
    let b = -2.0 * dir.dot(&pc);
    let c = radius.mul_add(-radius, pc.norm_squared());
    let (t1, t2) = match find_roots_quadratic(a, b, c) {
        Roots::Two(t) => (f64::min(t[0], t[1]), f64::max(t[0], t[1])),
        // tangent ray or no real solution
        _ => return None,
    };
    let aperture = diameter * curvature.abs() / 2.0;
    [t1, t2].into_iter().find_map(|t| {
        if t <= config.zero() {
            return None;
        }
        let point = origin + t * dir;
        let local_normal = (center - point).normalize();
        if local_normal.dot(chord_normal) > 0.0 && local_normal.cross(chord_normal).norm() < aperture
        {
            Some(Intersection::new(t, point))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    #[test]
    fn half_angle_clamped() {
        assert_eq!(half_angle(1.0, 0.0), 0.0);
        assert_relative_eq!(half_angle(1.0, 1.0), 0.5_f64.asin());
        assert_eq!(half_angle(4.0, 1.0), FRAC_PI_2);
        assert_eq!(half_angle(4.0, -1.0), -FRAC_PI_2);
    }
    #[test]
    fn center() {
        // hemisphere of radius 1
        let c = sphere_center(&Point3::origin(), &Vector3::z(), 1.0, 2.0);
        assert_abs_diff_eq!(c, Point3::origin(), epsilon = 1e-15);
        // small cap
        let c = sphere_center(&Point3::origin(), &Vector3::z(), 0.5, 0.1);
        assert_relative_eq!(c.z, (1.0 - 0.025_f64.powi(2)).sqrt() * 2.0);
        let c = sphere_center(&Point3::origin(), &Vector3::z(), -0.5, 0.1);
        assert_relative_eq!(c.z, -(1.0 - 0.025_f64.powi(2)).sqrt() * 2.0);
    }
    #[test]
    fn flat_delegates_to_plane() {
        let config = SimulationConfig::default();
        let hit = intersect_spherical_surface(
            &Point3::origin(),
            &Vector3::z(),
            &Point3::new(0.0, 0.0, 1.0),
            &-Vector3::z(),
            1e-6,
            0.1,
            &config,
        )
        .unwrap();
        assert_eq!(hit.distance(), 1.0);
    }
    #[test]
    fn concave_cap_on_axis() {
        // chord at z=1, center of curvature towards the ray origin (concave as seen by the ray)
        let config = SimulationConfig::default();
        let curvature = 1.0 / 0.5;
        let diameter = 0.2;
        let hit = intersect_spherical_surface(
            &Point3::origin(),
            &Vector3::z(),
            &Point3::new(0.0, 0.0, 1.0),
            &-Vector3::z(),
            curvature,
            diameter,
            &config,
        )
        .unwrap();
        // apex lies behind the chord by the sagitta
        let sagitta = 0.5 - (0.25_f64 - 0.01).sqrt();
        assert_relative_eq!(hit.distance(), 1.0 + sagitta, max_relative = 1e-12);
        assert_abs_diff_eq!(hit.point().x, 0.0);
    }
    #[test]
    fn convex_cap_on_axis() {
        // center of curvature behind the chord (as seen from the ray)
        let config = SimulationConfig::default();
        let hit = intersect_spherical_surface(
            &Point3::origin(),
            &Vector3::z(),
            &Point3::new(0.0, 0.0, 1.0),
            &Vector3::z(),
            2.0,
            0.2,
            &config,
        )
        .unwrap();
        let sagitta = 0.5 - (0.25_f64 - 0.01).sqrt();
        assert_relative_eq!(hit.distance(), 1.0 - sagitta, max_relative = 1e-12);
    }
    #[test]
    fn from_inside_the_sphere() {
        // ray starts at the center of curvature of a concave cap: distance = radius
        let config = SimulationConfig::default();
        let chord_center = Point3::new(0.0, 0.0, 1.0);
        let center = sphere_center(&chord_center, &-Vector3::z(), 2.0, 0.2);
        let hit = intersect_spherical_surface(
            &center,
            &Vector3::z(),
            &chord_center,
            &-Vector3::z(),
            2.0,
            0.2,
            &config,
        )
        .unwrap();
        assert_relative_eq!(hit.distance(), 0.5, max_relative = 1e-12);
    }
    #[test]
    fn miss_outside_aperture() {
        let config = SimulationConfig::default();
        let hit = intersect_spherical_surface(
            &Point3::new(0.15, 0.0, 0.0),
            &Vector3::z(),
            &Point3::new(0.0, 0.0, 1.0),
            &-Vector3::z(),
            2.0,
            0.2,
            &config,
        );
        assert!(hit.is_none());
    }
    #[test]
    fn miss_sphere() {
        let config = SimulationConfig::default();
        let hit = intersect_spherical_surface(
            &Point3::new(2.0, 0.0, 0.0),
            &Vector3::z(),
            &Point3::new(0.0, 0.0, 1.0),
            &-Vector3::z(),
            2.0,
            0.2,
            &config,
        );
        assert!(hit.is_none());
    }
    #[test]
    fn miss_behind() {
        let config = SimulationConfig::default();
        let hit = intersect_spherical_surface(
            &Point3::origin(),
            &-Vector3::z(),
            &Point3::new(0.0, 0.0, 1.0),
            &-Vector3::z(),
            2.0,
            0.2,
            &config,
        );
        assert!(hit.is_none());
    }
}

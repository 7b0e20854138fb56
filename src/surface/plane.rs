//! Flat surface
//!
//! Intersection of a ray with a flat disc of given center, normal and diameter.
use nalgebra::{Point3, Vector3};

use super::Intersection;
use crate::config::SimulationConfig;

/// Calculate the intersection of a ray with a flat disc.
///
/// The ray starts at `origin` and propagates along the unit vector `dir`. The disc is centered
/// at `center`, has the surface normal `normal` and the given `diameter`.
///
/// This function returns `None` if
///   - the ray is parallel to the disc plane
///   - the intersection lies behind the ray origin or closer than [`SimulationConfig::zero`]
///     (self intersection)
///   - the intersection point lies outside the disc
#[must_use]
pub fn intersect_plane(
    origin: &Point3<f64>,
    dir: &Vector3<f64>,
    center: &Point3<f64>,
    normal: &Vector3<f64>,
    diameter: f64,
    config: &SimulationConfig,
) -> Option<Intersection> {
    let denominator = normal.dot(dir);
    if denominator == 0.0 {
        // ray parallel to plane
        return None;
    }
    let distance = normal.dot(&(center - origin)) / denominator;
    if distance <= config.zero() {
        return None;
    }
    let point = origin + distance * dir;
    if (point - center).norm() >= diameter / 2.0 {
        return None;
    }
    Some(Intersection::new(distance, point))
}

//! Cylindrical surface
//!
//! Intersection of a ray with the side of a cylindrical substrate. The cylinder axis is given by
//! the face normal and extends from the face center `thickness` into the substrate (i.e. against
//! the face normal).
use nalgebra::{Point3, Vector3};
use roots::{find_roots_quadratic, Roots};

use super::Intersection;
use crate::config::SimulationConfig;

/// Calculate the intersection of a ray with the side of a finite cylinder.
///
/// The ray starts at `origin` and propagates along the unit vector `dir`. The cylinder has the
/// given `diameter` and its axis runs from `face_center` to `face_center - thickness * face_normal`.
///
/// This function returns `None` if the ray propagates parallel to the cylinder axis, does not
/// hit the infinite cylinder or hits it outside the finite segment.
#[must_use]
pub fn intersect_cylinder(
    origin: &Point3<f64>,
    dir: &Vector3<f64>,
    face_center: &Point3<f64>,
    face_normal: &Vector3<f64>,
    thickness: f64,
    diameter: f64,
    config: &SimulationConfig,
) -> Option<Intersection> {
    let dir_n = dir.dot(face_normal);
    let a = dir_n.mul_add(-dir_n, 1.0);
    if a < f64::EPSILON {
        // propagation parallel to the cylinder axis
        return None;
    }
    let radius = diameter / 2.0;
    // insert ray (p: position, d: direction) into the distance from the axis (c: face center, n: axis):
    // |c - p - t*d|^2 - ((c - p - t*d).n)^2 = r^2
    let pc = face_center - origin;
    let pc_n = pc.dot(face_normal);
    let pc_dir = pc.dot(dir);
    let b = -2.0 * dir_n.mul_add(-pc_n, pc_dir);
    let c = pc_n.mul_add(-pc_n, radius.mul_add(-radius, pc.norm_squared()));
    let (t1, t2) = match find_roots_quadratic(a, b, c) {
        Roots::Two(t) => (f64::min(t[0], t[1]), f64::max(t[0], t[1])),
        _ => return None,
    };
    let mid_point = face_center - thickness / 2.0 * face_normal;
    let max_distance = radius.hypot(thickness / 2.0);
    [t1, t2].into_iter().find_map(|t| {
        if t <= config.zero() {
            return None;
        }
        let point = origin + t * dir;
        if (point - mid_point).norm() < max_distance {
            Some(Intersection::new(t, point))
        } else {
            None
        }
    })
}

//! Helper functions for directions and transverse coordinate systems.
use nalgebra::Vector3;

use crate::error::{GbtError, GbtResult};

/// Returns the orthonormal transverse basis `(u, v)` orthogonal to the given direction.
///
/// The first axis is the projection of the z-axis onto the plane perpendicular to `direction`
/// and the second axis completes the direct frame: `v = direction x u`. If `direction` is
/// (anti-)parallel to the z-axis, `u` is chosen along `±x` and `v` along `y`.
///
/// The resulting basis depends only on the direction itself (no rotation history), so two beams
/// with identical directions always share the same transverse axes.
///
/// # Errors
///
/// This function will return an error if the given direction has (nearly) zero length or is
/// not finite.
pub fn transverse_basis(direction: &Vector3<f64>) -> GbtResult<(Vector3<f64>, Vector3<f64>)> {
    if direction.norm() < f64::EPSILON || direction.iter().any(|c| !c.is_finite()) {
        return Err(GbtError::Geometry(
            "direction vector must have a non zero length and be finite!".into(),
        ));
    }
    let a = direction.normalize();
    let cos_z = a.dot(&Vector3::z());
    if (1.0 - cos_z.abs()) < f64::EPSILON {
        // parallel to the z-axis
        let u = cos_z.signum() * Vector3::x();
        return Ok((u, Vector3::y()));
    }
    let u = (Vector3::z() - cos_z * a).normalize();
    let v = a.cross(&u).normalize();
    Ok((u, v))
}
/// Rotates a transverse basis `(u, v)` by the angle `alpha` (in radians) around its normal.
#[must_use]
pub fn rotate_basis(
    u: &Vector3<f64>,
    v: &Vector3<f64>,
    alpha: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let (sin_a, cos_a) = alpha.sin_cos();
    (cos_a * u + sin_a * v, -sin_a * u + cos_a * v)
}
/// Returns the unit vector defined by the spherical angles `theta` (polar angle from the z-axis)
/// and `phi` (azimuth from the x-axis).
#[must_use]
pub fn direction_from_angles(theta: f64, phi: f64) -> Vector3<f64> {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    Vector3::new(sin_t * cos_p, sin_t * sin_p, cos_t)
}
/// Returns the spherical angles `(theta, phi)` of the given vector.
///
/// `theta` is within `[0, pi]` and `phi` within `(-pi, pi]`. For vectors along the z-axis `phi`
/// is `0.0`.
#[must_use]
pub fn direction_to_angles(direction: &Vector3<f64>) -> (f64, f64) {
    let norm = direction.norm();
    if norm < f64::EPSILON {
        return (0.0, 0.0);
    }
    let theta = (direction.z / norm).clamp(-1.0, 1.0).acos();
    let phi = if direction.x.abs() < f64::EPSILON && direction.y.abs() < f64::EPSILON {
        0.0
    } else {
        direction.y.atan2(direction.x)
    };
    (theta, phi)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_direct_orthonormal(a: &Vector3<f64>, u: &Vector3<f64>, v: &Vector3<f64>) {
        assert_abs_diff_eq!(u.norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.dot(u), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.dot(v), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u.dot(v), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.normalize().cross(u), *v, epsilon = 1e-12);
    }
    #[test]
    fn transverse_basis_wrong() {
        assert!(transverse_basis(&Vector3::zeros()).is_err());
        assert!(transverse_basis(&Vector3::new(f64::NAN, 0.0, 1.0)).is_err());
    }
    #[test]
    fn transverse_basis_z_axis() {
        let (u, v) = transverse_basis(&Vector3::z()).unwrap();
        assert_eq!(u, Vector3::x());
        assert_eq!(v, Vector3::y());
        let (u, v) = transverse_basis(&-Vector3::z()).unwrap();
        assert_eq!(u, -Vector3::x());
        assert_eq!(v, Vector3::y());
        assert_direct_orthonormal(&-Vector3::z(), &u, &v);
    }
    #[test]
    fn transverse_basis_x_axis() {
        let (u, v) = transverse_basis(&Vector3::x()).unwrap();
        assert_abs_diff_eq!(u, Vector3::z(), epsilon = 1e-12);
        assert_abs_diff_eq!(v, -Vector3::y(), epsilon = 1e-12);
    }
    #[test]
    fn transverse_basis_opposite_directions() {
        let a = Vector3::new(1.0, 2.0, 0.5);
        let (u1, v1) = transverse_basis(&a).unwrap();
        let (u2, v2) = transverse_basis(&-a).unwrap();
        assert_abs_diff_eq!(u1, u2, epsilon = 1e-12);
        assert_abs_diff_eq!(v1, -v2, epsilon = 1e-12);
    }
    #[test]
    fn transverse_basis_arbitrary() {
        for a in [
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-0.3, 2.0, -5.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1e-3, 0.0, 1.0),
        ] {
            let (u, v) = transverse_basis(&a).unwrap();
            assert_direct_orthonormal(&a, &u, &v);
        }
    }
    #[test]
    fn rotate_basis_quarter() {
        let (u, v) = rotate_basis(&Vector3::x(), &Vector3::y(), FRAC_PI_2);
        assert_abs_diff_eq!(u, Vector3::y(), epsilon = 1e-12);
        assert_abs_diff_eq!(v, -Vector3::x(), epsilon = 1e-12);
        let (u, v) = rotate_basis(&Vector3::x(), &Vector3::y(), 0.0);
        assert_eq!(u, Vector3::x());
        assert_eq!(v, Vector3::y());
    }
    #[test]
    fn angles() {
        assert_abs_diff_eq!(direction_from_angles(0.0, 0.0), Vector3::z());
        assert_abs_diff_eq!(
            direction_from_angles(FRAC_PI_2, 0.0),
            Vector3::x(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            direction_from_angles(FRAC_PI_2, FRAC_PI_2),
            Vector3::y(),
            epsilon = 1e-12
        );
        assert_eq!(direction_to_angles(&Vector3::z()), (0.0, 0.0));
        assert_eq!(direction_to_angles(&-Vector3::z()), (PI, 0.0));
        let (theta, phi) = direction_to_angles(&direction_from_angles(FRAC_PI_4, -2.0));
        assert_abs_diff_eq!(theta, FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(phi, -2.0, epsilon = 1e-12);
        assert_eq!(direction_to_angles(&Vector3::zeros()), (0.0, 0.0));
    }
}

//! Directions of reflected and refracted beams at a surface.
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Directions of the daughter beams created at a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaughterDirections {
    reflected: Vector3<f64>,
    refracted: Option<Vector3<f64>>,
}
impl DaughterDirections {
    /// Returns the direction of the reflected beam.
    #[must_use]
    pub const fn reflected(&self) -> Vector3<f64> {
        self.reflected
    }
    /// Returns the direction of the refracted beam or `None` in case of total reflection.
    #[must_use]
    pub const fn refracted(&self) -> Option<Vector3<f64>> {
        self.refracted
    }
    /// Returns `true` if the incident beam is totally reflected.
    #[must_use]
    pub const fn total_reflection(&self) -> bool {
        self.refracted.is_none()
    }
}

/// Computes the directions of the reflected and the refracted beam.
///
/// `incident` is the unit direction of the incoming beam, `normal` the unit surface normal at the
/// point of incidence oriented **against** the incoming beam. `n1` is the refractive index on the
/// side of the incoming beam, `n2` the one behind the surface.
///
/// At normal incidence, the reflected direction equals the normal and the refracted direction the
/// incident one. Total reflection occurs if `n1 * sin(theta1) / n2` reaches 1. Exactly at the
/// critical angle the refracted beam would run along the surface, so it is reflected as well.
#[must_use]
pub fn compute_daughter_directions(
    incident: &Vector3<f64>,
    normal: &Vector3<f64>,
    n1: f64,
    n2: f64,
) -> DaughterDirections {
    let cos_incident = incident.dot(normal);
    if (1.0 - cos_incident.abs()) < f64::EPSILON {
        return DaughterDirections {
            reflected: *normal,
            refracted: Some(*incident),
        };
    }
    let reflected = (incident - 2.0 * cos_incident * normal).normalize();
    let theta1 = (-cos_incident).clamp(-1.0, 1.0).acos();
    let sin_theta2 = n1 * theta1.sin() / n2;
    if sin_theta2.abs() >= 1.0 {
        return DaughterDirections {
            reflected,
            refracted: None,
        };
    }
    let theta2 = sin_theta2.asin();
    let alpha = n1 / n2;
    let beta = alpha.mul_add(theta1.cos(), -theta2.cos());
    let refracted = (alpha * incident + beta * normal).normalize();
    DaughterDirections {
        reflected,
        refracted: Some(refracted),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_4;

    fn incident_at(angle: f64) -> Vector3<f64> {
        // incident in the xz-plane onto a surface with normal -z
        Vector3::new(angle.sin(), 0.0, angle.cos())
    }
    #[test]
    fn normal_incidence() {
        let d = compute_daughter_directions(&Vector3::z(), &-Vector3::z(), 1.0, 1.5);
        assert_eq!(d.reflected(), -Vector3::z());
        assert_eq!(d.refracted(), Some(Vector3::z()));
        assert!(!d.total_reflection());
    }
    #[test]
    fn reflection_law() {
        let d = compute_daughter_directions(&incident_at(FRAC_PI_4), &-Vector3::z(), 1.0, 1.0);
        assert_abs_diff_eq!(
            d.reflected(),
            Vector3::new(FRAC_PI_4.sin(), 0.0, -FRAC_PI_4.cos()),
            epsilon = 1e-12
        );
        // same index: straight through
        assert_abs_diff_eq!(
            d.refracted().unwrap(),
            incident_at(FRAC_PI_4),
            epsilon = 1e-12
        );
    }
    #[test]
    fn snell_law() {
        let n1 = 1.0;
        let n2 = 1.5;
        let theta1: f64 = 0.4;
        let d = compute_daughter_directions(&incident_at(theta1), &-Vector3::z(), n1, n2);
        let refracted = d.refracted().unwrap();
        assert_relative_eq!(refracted.norm(), 1.0, max_relative = 1e-12);
        let sin_theta2 = refracted.x;
        assert_relative_eq!(n1 * theta1.sin(), n2 * sin_theta2, max_relative = 1e-12);
        assert!(refracted.z > 0.0);
        assert_abs_diff_eq!(refracted.y, 0.0);
    }
    #[test]
    fn critical_angle() {
        let n1: f64 = 1.5;
        let n2: f64 = 1.0;
        let critical = (n2 / n1).asin();
        // slightly below: refracted
        let d = compute_daughter_directions(&incident_at(critical - 1e-6), &-Vector3::z(), n1, n2);
        assert!(!d.total_reflection());
        // slightly above: total reflection
        let d = compute_daughter_directions(&incident_at(critical + 1e-6), &-Vector3::z(), n1, n2);
        assert!(d.total_reflection());
        assert!(d.refracted().is_none());
        assert_abs_diff_eq!(d.reflected().z, -(critical + 1e-6).cos(), epsilon = 1e-12);
        // far above
        let d = compute_daughter_directions(&incident_at(1.2), &-Vector3::z(), n1, n2);
        assert!(d.total_reflection());
    }
    #[test]
    fn exactly_critical_angle() {
        let incident = incident_at(0.7);
        let normal = -Vector3::z();
        let n1: f64 = 1.0;
        let theta1 = (-incident.dot(&normal)).clamp(-1.0, 1.0).acos();
        let n2 = n1 * theta1.sin();
        assert_eq!(n1 * theta1.sin() / n2, 1.0);
        let d = compute_daughter_directions(&incident, &normal, n1, n2);
        assert!(d.total_reflection());
        assert_abs_diff_eq!(d.reflected().z, -0.7_f64.cos(), epsilon = 1e-12);
    }
}

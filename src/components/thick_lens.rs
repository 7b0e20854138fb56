use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use super::{Actions, Coefficients, Component, ComponentKind, Substrate};
use crate::{
    error::GbtResult,
    surface::{half_angle, OpticalSurface},
    utils::geom_transformation::direction_from_angles,
};

/// Construction parameters of a thick lens.
///
/// `position` is the apex of the HR surface, the AR apex lies `thickness` behind it on the lens
/// axis. Both curvatures are given with respect to the outward normal of their face (positive =
/// concave), so a biconvex lens has two negative curvatures.
///
/// Reflections on both faces are stray paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ThickLensParameters {
    pub reference: String,
    /// apex of the HR surface (m)
    pub position: Point3<f64>,
    pub theta: f64,
    pub phi: f64,
    pub hr_curvature: f64,
    pub ar_curvature: f64,
    /// on-axis thickness (m)
    pub thickness: f64,
    pub diameter: f64,
    pub refractive_index: f64,
    /// reflectance of both faces
    pub reflectance: f64,
    /// transmittance of both faces
    pub transmittance: f64,
}
impl Default for ThickLensParameters {
    /// A symmetric biconvex 5 cm lens (radii of 10 cm, 1 cm thick).
    fn default() -> Self {
        Self {
            reference: "ThickLens".into(),
            position: Point3::origin(),
            theta: FRAC_PI_2,
            phi: 0.0,
            hr_curvature: -10.0,
            ar_curvature: -10.0,
            thickness: 1e-2,
            diameter: 5e-2,
            refractive_index: 1.4585,
            reflectance: 0.1,
            transmittance: 0.9,
        }
    }
}
/// Returns the chord center of a spherical face given its apex.
fn chord_center(
    apex: Point3<f64>,
    normal: &nalgebra::Vector3<f64>,
    curvature: f64,
    diameter: f64,
) -> Point3<f64> {
    if curvature == 0.0 {
        apex
    } else {
        let theta = half_angle(diameter, curvature).abs();
        apex + (1.0 - theta.cos()) / curvature * normal
    }
}
impl ThickLensParameters {
    /// Creates the thick lens [`Component`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the parameters are invalid.
    pub fn build(&self) -> GbtResult<Component> {
        let coefficients = Coefficients::new(self.reflectance, self.transmittance)?;
        let substrate = Substrate::new(
            self.refractive_index,
            coefficients,
            coefficients,
            Actions::new(0, 1, 0, 1),
        )?;
        let hr_normal = direction_from_angles(self.theta, self.phi);
        let ar_normal = -hr_normal;
        let ar_apex = self.position + self.thickness * ar_normal;
        let hr = OpticalSurface::new(
            chord_center(self.position, &hr_normal, self.hr_curvature, self.diameter),
            hr_normal,
            self.hr_curvature,
            self.diameter,
        )?;
        let ar = OpticalSurface::new(
            chord_center(ar_apex, &ar_normal, self.ar_curvature, self.diameter),
            ar_normal,
            self.ar_curvature,
            self.diameter,
        )?;
        Component::new(
            &self.reference,
            ComponentKind::ThickLens(substrate),
            hr,
            ar,
            self.thickness,
            (0.0, 0.0),
        )
    }
}
